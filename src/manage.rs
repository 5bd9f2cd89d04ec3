//! Bringing a window under management and releasing it again, shared by
//! the `MapRequest`/`DestroyNotify`/`UnmapNotify` handlers (spec component
//! 4.H) and the initial scan (spec component 4.J).
use crate::backend::{DisplayBackend, ServerGrab, WindowInfo, WindowTypeHint};
use crate::bindings::{ClickTarget, ModMask, MouseButton};
use crate::client::{Client, ClientId, WindowId};
use crate::manager::WindowManager;
use crate::monitor::MonitorId;
use crate::Error;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    /// Bring `window` under management: apply rules, build its `Client`,
    /// attach it to the order-list and focus-stack, map it, and focus it.
    pub fn manage(&mut self, window: WindowId, info: WindowInfo) -> Result<ClientId> {
        let mon = self.state.selected_monitor().ok_or(Error::NoMonitors)?;

        let rule_match = crate::rules::match_rules(&self.state.config.rules, &info);

        let target_mon = match rule_match.monitor {
            Some(idx) if idx >= 0 => self
                .state
                .monitors
                .order
                .get(idx as usize)
                .copied()
                .unwrap_or(mon),
            _ => mon,
        };

        let work_area = self
            .state
            .monitor(target_mon)
            .map(|m| m.work_area)
            .unwrap_or_default();
        let rect = info.fixed_position.unwrap_or(work_area);

        let tagmask = if rule_match.tags != 0 {
            rule_match.tags
        } else {
            self.state
                .monitor(target_mon)
                .map(|m| m.selected_tagmask())
                .unwrap_or(1)
        };

        let mut client = Client::new(window, target_mon, tagmask, rect);
        client.set_title(info.title.clone());
        client.class = info.class.clone();
        client.instance = info.instance.clone();
        client.hints = info.size_hints;
        client.hints_valid = true;
        client.is_fixed = client.hints.is_fixed();
        client.urgent = info.wm_hints.urgent;
        client.never_focus = info.wm_hints.never_focus;
        client.border_width = self.state.config.border_width;
        client.floating = rule_match.floating
            || info.transient_for.is_some()
            || info.window_type != WindowTypeHint::Normal
            || client.is_fixed;

        let id = self.state.clients.insert(client);

        if let Some(m) = self.state.monitors.arena.get_mut(target_mon) {
            crate::lists::attach(&self.state.clients, m, id);
            crate::lists::stack_attach(m, id);
        }

        self.backend
            .set_border_width(window, self.state.config.border_width.max(0) as u32)
            .ok();
        self.backend
            .set_border_color(window, self.state.config.palette.normal.border)
            .ok();
        self.backend
            .grab_buttons(window, &[(ClickTarget::ClientWindow, ModMask::empty(), MouseButton::Left)])
            .ok();
        self.backend.map_window(window).ok();

        self.run_manage_hooks(id)?;

        self.arrange(target_mon)?;

        let on_current_view = self
            .state
            .monitor(target_mon)
            .map(|m| tagmask & m.selected_tagmask() != 0)
            .unwrap_or(false);
        if self.state.config.follow_new_windows || on_current_view {
            self.focus(Some(id))?;
        }
        self.run_refresh_hooks(target_mon)?;

        tracing::debug!(?id, class = %self.state.clients[id].class, "client managed");
        Ok(id)
    }

    /// Release `id` from management: detach it from every list, unmap (or
    /// skip unmapping when the window already destroyed itself), and
    /// re-focus whatever the monitor's stack now resolves to. The window
    /// may already be gone by the time we get here, so the detach-and-unmap
    /// sequence runs under a server grab with the permissive error handler
    /// installed.
    pub fn unmanage(&mut self, id: ClientId, already_destroyed: bool) -> Result<()> {
        let Some(client) = self.state.clients.get(id).cloned() else {
            return Ok(());
        };
        let mon = client.monitor;

        self.backend.install_error_handler(true);
        {
            let mut grab = ServerGrab::acquire(&mut self.backend)?;
            if let Some(m) = self.state.monitors.arena.get_mut(mon) {
                crate::lists::detach(m, id);
                crate::lists::stack_detach(&self.state.clients, m, id);
            }
            self.state.clients.remove(id);

            if !already_destroyed {
                grab.backend_mut().ungrab_buttons(client.handle).ok();
                grab.backend_mut().set_border_width(client.handle, 0).ok();
                grab.backend_mut().unmap_window(client.handle).ok();
            }
        }
        self.backend.install_error_handler(false);

        self.restore_selection_after_removal(mon)?;
        self.arrange(mon)?;
        tracing::debug!(?id, "client unmanaged");
        Ok(())
    }

    fn restore_selection_after_removal(&mut self, mon: MonitorId) -> Result<()> {
        let still_selected = self
            .state
            .monitor(mon)
            .map(|m| m.sel)
            .unwrap_or(None)
            .map(|sel| self.state.clients.contains_key(sel))
            .unwrap_or(false);
        if !still_selected {
            self.focus(None)?;
        }
        Ok(())
    }
}
