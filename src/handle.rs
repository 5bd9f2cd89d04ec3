//! Per-event-type handlers and the `handle_event` dispatcher (spec
//! component 4.H). Every branch either mutates [`crate::state::State`]
//! through the `arrange`/`focus`/`manage` primitives or forwards straight
//! to the backend; none of it is reachable except through a real or mock
//! [`crate::backend::DisplayBackend`] event.
use crate::backend::DisplayBackend;
use crate::client::WindowId;
use crate::event::{ClientMessage, XEvent};
use crate::manager::WindowManager;
use crate::monitor::MonitorId;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    pub fn handle_event(&mut self, event: XEvent) -> Result<()> {
        match event {
            XEvent::ButtonPress(ev) => self.on_button_press(ev),
            XEvent::ClientMessage(msg) => self.on_client_message(msg),
            XEvent::ConfigureNotify { window, geometry } => self.on_configure_notify(window, geometry),
            XEvent::ConfigureRequest(req) => self.on_configure_request(req),
            XEvent::DestroyNotify { window } => self.on_destroy_notify(window),
            XEvent::EnterNotify { window, root_x, root_y } => self.on_enter_notify(window, root_x, root_y),
            XEvent::Expose { window } => self.on_expose(window),
            XEvent::FocusIn { window } => self.on_focus_in(window),
            XEvent::KeyPress(ev) => self.on_key_press(ev),
            XEvent::MappingNotify => self.on_mapping_notify(),
            XEvent::MapRequest { window } => self.on_map_request(window),
            XEvent::MotionNotify { root_x, root_y } => self.on_motion_notify(root_x, root_y),
            XEvent::PropertyNotify { window, atom } => self.on_property_notify(window, &atom),
            XEvent::UnmapNotify { window, synthetic } => self.on_unmap_notify(window, synthetic),
        }
    }

    /// The monitor whose geometry contains `(x, y)`, falling back to the
    /// currently selected monitor if the point lands in no screen (can
    /// happen transiently during a Xinerama reconfigure).
    pub(crate) fn find_monitor_at(&self, x: i32, y: i32) -> Option<MonitorId> {
        self.state
            .monitors
            .order
            .iter()
            .copied()
            .find(|&id| {
                self.state
                    .monitors
                    .arena
                    .get(id)
                    .map_or(false, |m| m.geometry.contains_point(x, y))
            })
            .or(self.state.monitors.selected)
    }

    fn on_button_press(&mut self, ev: crate::event::ButtonEvent) -> Result<()> {
        let binding = self
            .state
            .config
            .mouse_bindings
            .find(ev.target, ev.modifiers, ev.button)
            .cloned();
        if let Some(binding) = binding {
            return self.apply_command(binding.command, &binding.arg);
        }

        if ev.target == crate::bindings::ClickTarget::ClientWindow {
            if let Some(id) = self.state.find_client_by_handle(ev.window) {
                self.focus(Some(id))?;
            }
        }
        Ok(())
    }

    fn on_client_message(&mut self, msg: ClientMessage) -> Result<()> {
        match msg {
            ClientMessage::RequestFullscreen { window, set, toggle } => {
                let Some(id) = self.state.find_client_by_handle(window) else {
                    return Ok(());
                };
                let currently = self.state.clients.get(id).map_or(false, |c| c.fullscreen);
                let enable = if toggle { !currently } else { set };
                self.set_fullscreen(id, enable)?;
                let Some(mon) = self.state.monitor_of(id) else {
                    return Ok(());
                };
                self.arrange(mon)
            }
            ClientMessage::RequestActivate { window } => {
                let Some(id) = self.state.find_client_by_handle(window) else {
                    return Ok(());
                };
                let Some(mon) = self.state.monitor_of(id) else {
                    return Ok(());
                };
                let tags = self.state.clients.get(id).map(|c| c.tags).unwrap_or(0);
                if let Some(m) = self.state.monitors.arena.get_mut(mon) {
                    if tags != 0 && tags & m.selected_tagmask() == 0 {
                        crate::tags::view_tag(m, tags, false);
                    }
                }
                self.state.monitors.selected = Some(mon);
                self.focus(Some(id))?;
                self.arrange(mon)
            }
        }
    }

    /// The root window reported a geometry change: reconcile monitors
    /// against the backend's current screen layout.
    fn on_configure_notify(&mut self, window: WindowId, _geometry: crate::geometry::Rect) -> Result<()> {
        if window != self.backend.root() {
            return Ok(());
        }
        self.reconcile_monitors()
    }

    fn on_configure_request(&mut self, req: crate::event::ConfigureRequest) -> Result<()> {
        let Some(id) = self.state.find_client_by_handle(req.window) else {
            // Unmanaged window: let it do as it pleases.
            self.backend
                .move_resize(req.window, req.requested)
                .ok();
            if let Some(bw) = req.border_width {
                self.backend.set_border_width(req.window, bw.max(0) as u32).ok();
            }
            return Ok(());
        };

        let floating = self.state.clients.get(id).map_or(false, |c| c.floating);
        if floating {
            self.resize_client(id, req.requested, true)
        } else {
            // Tiled clients don't get to move themselves; just ack with
            // their current geometry so well-behaved toolkits stop asking.
            let (handle, rect, bw) = {
                let Some(c) = self.state.client(id) else { return Ok(()) };
                (c.handle, c.rect, c.border_width)
            };
            self.backend.send_configure_notify(handle, rect, bw)
        }
    }

    fn on_destroy_notify(&mut self, window: WindowId) -> Result<()> {
        if let Some(id) = self.state.find_client_by_handle(window) {
            self.unmanage(id, true)?;
        }
        Ok(())
    }

    fn on_enter_notify(&mut self, window: WindowId, root_x: i32, root_y: i32) -> Result<()> {
        if window == self.backend.root() {
            if let Some(mon) = self.find_monitor_at(root_x, root_y) {
                if Some(mon) != self.state.monitors.selected {
                    self.state.monitors.selected = Some(mon);
                    self.focus(None)?;
                }
            }
            return Ok(());
        }
        let Some(id) = self.state.find_client_by_handle(window) else {
            return Ok(());
        };
        let (mon, tags, minimized) = {
            let Some(c) = self.state.client(id) else { return Ok(()) };
            (c.monitor, c.tags, c.minimized)
        };
        let visible = self
            .state
            .monitor(mon)
            .map_or(false, |m| tags & m.selected_tagmask() != 0);
        if visible && !minimized {
            if Some(mon) != self.state.monitors.selected {
                self.state.monitors.selected = Some(mon);
            }
            self.focus(Some(id))?;
        }
        Ok(())
    }

    fn on_expose(&mut self, window: WindowId) -> Result<()> {
        let mon = self.state.monitors.order.iter().copied().find(|&id| {
            self.state.monitors.arena.get(id).map_or(false, |m| {
                m.tagbar_window == Some(window) || m.clientbar_window == Some(window)
            })
        });
        if let Some(mon) = mon {
            self.redraw_bar(mon)?;
        }
        Ok(())
    }

    fn on_focus_in(&mut self, window: WindowId) -> Result<()> {
        // Some clients steal focus behind our back (a dialog raising
        // itself); if the stack disagrees, reassert our own selection.
        let Some(mon) = self.state.monitors.selected else {
            return Ok(());
        };
        let sel = self.state.monitor(mon).and_then(|m| m.sel);
        let sel_handle = sel.and_then(|id| self.state.client(id)).map(|c| c.handle);
        if sel_handle != Some(window) {
            if let Some(id) = sel {
                let handle = self.state.clients[id].handle;
                self.backend.set_input_focus(handle).ok();
            }
        }
        Ok(())
    }

    fn on_key_press(&mut self, ev: crate::event::KeyEvent) -> Result<()> {
        let binding = self
            .state
            .config
            .key_bindings
            .find(ev.modifiers, ev.key)
            .cloned();
        if let Some(binding) = binding {
            self.apply_command(binding.command, &binding.arg)?;
        }
        Ok(())
    }

    fn on_mapping_notify(&mut self) -> Result<()> {
        let root = self.backend.root();
        let keys: Vec<_> = self
            .state
            .config
            .key_bindings
            .0
            .iter()
            .map(|b| b.key)
            .collect();
        self.backend.grab_keys(root, &keys).ok();
        Ok(())
    }

    fn on_map_request(&mut self, window: WindowId) -> Result<()> {
        if self.state.find_client_by_handle(window).is_some() {
            return Ok(());
        }
        let info = self.backend.window_info(window)?;
        self.manage(window, info)?;
        Ok(())
    }

    fn on_motion_notify(&mut self, root_x: i32, root_y: i32) -> Result<()> {
        let Some(mon) = self.find_monitor_at(root_x, root_y) else {
            return Ok(());
        };
        if Some(mon) != self.state.monitors.selected {
            self.state.monitors.selected = Some(mon);
            self.focus(None)?;
        }
        Ok(())
    }

    fn on_property_notify(&mut self, window: WindowId, atom: &str) -> Result<()> {
        if window == self.backend.root() {
            if atom == "WM_NAME" || atom == "_NET_WM_NAME" {
                if let Ok(info) = self.backend.window_info(window) {
                    self.state.set_status_text(info.title);
                    if let Some(mon) = self.state.monitors.selected {
                        self.redraw_bar(mon)?;
                    }
                }
            }
            return Ok(());
        }

        let Some(id) = self.state.find_client_by_handle(window) else {
            return Ok(());
        };
        if atom == "WM_NAME" || atom == "_NET_WM_NAME" {
            if let Ok(info) = self.backend.window_info(window) {
                if let Some(c) = self.state.client_mut(id) {
                    c.set_title(info.title);
                }
                if let Some(mon) = self.state.monitor_of(id) {
                    self.redraw_bar(mon)?;
                }
            }
        }
        Ok(())
    }

    fn on_unmap_notify(&mut self, window: WindowId, synthetic: bool) -> Result<()> {
        let Some(id) = self.state.find_client_by_handle(window) else {
            return Ok(());
        };
        if synthetic {
            self.backend.set_wm_state(window, true).ok();
        } else {
            self.unmanage(id, false)?;
        }
        Ok(())
    }

    /// Re-read the backend's current screen layout and reconcile monitors:
    /// attach new ones, detach vanished ones (handing their clients to the
    /// monitor before them in order), resize survivors in place.
    pub(crate) fn reconcile_monitors(&mut self) -> Result<()> {
        let rects = self.backend.screen_rects()?;
        let existing: Vec<_> = self.state.monitors.order.clone();

        for (mon, rect) in existing.iter().zip(rects.iter()) {
            if let Some(m) = self.state.monitors.arena.get_mut(*mon) {
                m.geometry = *rect;
            }
            self.arrange(*mon)?;
        }

        if rects.len() > existing.len() {
            let default_marked_width = self.state.config.marked_width;
            let show_tagbar = self.state.config.show_tagbar;
            for rect in &rects[existing.len()..] {
                let mon = self
                    .state
                    .monitors
                    .insert(crate::monitor::Monitor::new(*rect, default_marked_width, show_tagbar));
                self.create_bars(mon)?;
                self.arrange(mon)?;
            }
        } else if rects.len() < existing.len() {
            let survivor = existing.first().copied();
            for &mon in &existing[rects.len()..] {
                let client_ids: Vec<_> = self
                    .state
                    .clients
                    .iter()
                    .filter(|(_, c)| c.monitor == mon)
                    .map(|(id, _)| id)
                    .collect();
                if let Some(target) = survivor.filter(|&t| t != mon) {
                    for id in client_ids {
                        self.move_client_to_monitor(id, target)?;
                    }
                }
                self.destroy_bars(mon);
                self.state.monitors.remove(mon);
            }
            if let Some(first) = existing.first() {
                self.arrange(*first)?;
            }
        }

        Ok(())
    }

    pub(crate) fn move_client_to_monitor(&mut self, id: crate::client::ClientId, target: MonitorId) -> Result<()> {
        let Some(source) = self.state.monitor_of(id) else {
            return Ok(());
        };
        if source == target {
            return Ok(());
        }
        if let Some(m) = self.state.monitors.arena.get_mut(source) {
            crate::lists::detach(m, id);
            crate::lists::stack_detach(&self.state.clients, m, id);
        }
        let tagmask = self.state.monitor(target).map(|m| m.selected_tagmask()).unwrap_or(1);
        if let Some(c) = self.state.client_mut(id) {
            c.monitor = target;
            c.tags = tagmask;
        }
        if let Some(m) = self.state.monitors.arena.get_mut(target) {
            crate::lists::attach(&self.state.clients, m, id);
            crate::lists::stack_attach(m, id);
        }
        Ok(())
    }

    pub(crate) fn create_bars(&mut self, mon: MonitorId) -> Result<()> {
        let geometry = self.state.monitor(mon).map(|m| m.geometry).unwrap_or_default();
        let tagbar = self
            .backend
            .create_window(crate::backend::WinKind::TagBar, geometry)?;
        let clientbar = self
            .backend
            .create_window(crate::backend::WinKind::ClientBar, geometry)?;
        self.backend.map_window(tagbar)?;
        self.backend.map_window(clientbar)?;
        if let Some(m) = self.state.monitors.arena.get_mut(mon) {
            m.tagbar_window = Some(tagbar);
            m.clientbar_window = Some(clientbar);
        }
        Ok(())
    }

    pub(crate) fn destroy_bars(&mut self, mon: MonitorId) {
        let windows = self
            .state
            .monitor(mon)
            .map(|m| (m.tagbar_window, m.clientbar_window))
            .unwrap_or((None, None));
        if let Some(win) = windows.0 {
            self.backend.destroy_window(win).ok();
        }
        if let Some(win) = windows.1 {
            self.backend.destroy_window(win).ok();
        }
    }
}
