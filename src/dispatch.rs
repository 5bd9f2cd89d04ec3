//! Applies a bound [`Command`]/[`Arg`] pair to the manager (spec component
//! 4.I).
use std::process::Command as ProcessCommand;

use crate::backend::{CursorShape, DisplayBackend, ServerGrab};
use crate::command::{Arg, Command};
use crate::manager::WindowManager;
use crate::monitor::ClientBarMode;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    pub fn apply_command(&mut self, command: Command, arg: &Arg) -> Result<()> {
        match command {
            Command::ViewTag => self.cmd_view_tag(arg),
            Command::ToggleTagView => self.cmd_toggle_tag_view(arg),
            Command::CycleView => self.cmd_cycle_view(arg),
            Command::TagClient => self.cmd_tag_client(arg),
            Command::ToggleTag => self.cmd_toggle_tag(arg),
            Command::ShiftTag => self.cmd_shift_tag(arg),

            Command::SetLayout => self.cmd_set_layout(arg),
            Command::AdjustMarkedWidth => self.cmd_adjust_marked_width(arg),
            Command::SetMarkedWidth => self.cmd_set_marked_width(arg),

            Command::CycleFocus => self.cmd_cycle_focus(arg),
            Command::CycleStackAreaSelection => self.cmd_cycle_stack_area_selection(arg),
            Command::PushClientLeft => self.cmd_push_client(arg, -1),
            Command::PushClientRight => self.cmd_push_client(arg, 1),
            Command::FocusClientByIndex => self.cmd_focus_client_by_index(arg),

            Command::ToggleFloating => self.cmd_toggle_floating(),
            Command::ToggleFullscreen => self.cmd_toggle_fullscreen(),
            Command::ToggleMark => self.cmd_toggle_mark(),
            Command::HideWindow => self.cmd_hide_window(),
            Command::ToggleHidden => self.cmd_toggle_hidden(arg),
            Command::KillClient => self.cmd_kill_client(),

            Command::ToggleTagBar => self.cmd_toggle_tagbar(),
            Command::SetClientBarMode => self.cmd_set_clientbar_mode(arg),

            Command::CycleFocusMonitor => self.cmd_cycle_focus_monitor(arg),
            Command::SendToMonitor => self.cmd_send_to_monitor(arg),

            Command::DragWindow => self.cmd_drag_window(),
            Command::ResizeWithMouse => self.cmd_resize_with_mouse(),

            Command::Spawn => self.cmd_spawn(arg),
            Command::Quit => {
                self.state.running = false;
                Ok(())
            }
        }
    }

    fn selected_mon(&self) -> Option<crate::monitor::MonitorId> {
        self.state.selected_monitor()
    }

    fn cmd_view_tag(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let mask = arg.as_uint().unwrap_or(0);
        let toggles = self.state.config.view_tag_toggles;
        if let Some(m) = self.state.monitor_mut(mon) {
            if crate::tags::view_tag(m, mask, toggles) {
                self.focus(None)?;
                return self.arrange(mon);
            }
        }
        Ok(())
    }

    fn cmd_toggle_tag_view(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let mask = arg.as_uint().unwrap_or(0);
        if let Some(m) = self.state.monitor_mut(mon) {
            if crate::tags::toggle_tag_view(m, mask) {
                self.focus(None)?;
                return self.arrange(mon);
            }
        }
        Ok(())
    }

    fn cmd_cycle_view(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let dir = arg.as_int().unwrap_or(1);
        let num_tags = self.state.config.tags.len();
        if let Some(m) = self.state.monitor_mut(mon) {
            if crate::tags::cycle_view(m, num_tags, dir) {
                self.focus(None)?;
                return self.arrange(mon);
            }
        }
        Ok(())
    }

    fn cmd_tag_client(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let mask = arg.as_uint().unwrap_or(0);
        if crate::tags::tag_client(&mut self.state.clients, id, mask) {
            self.focus(None)?;
            return self.arrange(mon);
        }
        Ok(())
    }

    fn cmd_toggle_tag(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let mask = arg.as_uint().unwrap_or(0);
        if crate::tags::toggle_tag(&mut self.state.clients, id, mask) {
            self.focus(None)?;
            return self.arrange(mon);
        }
        Ok(())
    }

    fn cmd_shift_tag(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let dir = arg.as_int().unwrap_or(1);
        let num_tags = self.state.config.tags.len();
        if crate::tags::shift_tag(&mut self.state.clients, num_tags, id, dir) {
            self.focus(None)?;
            return self.arrange(mon);
        }
        Ok(())
    }

    fn cmd_set_layout(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(idx) = arg.as_uint().map(|v| v as usize) else { return Ok(()) };
        if idx >= self.state.config.layouts.len() {
            return Ok(());
        }
        if let Some(m) = self.state.monitor_mut(mon) {
            m.layout[m.selected_layout] = idx;
        }
        self.arrange(mon)
    }

    fn cmd_adjust_marked_width(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let delta = arg.as_float().unwrap_or(0.0);
        let layout_idx = match self.state.monitor(mon) {
            Some(m) => m.layout[m.selected_layout],
            None => return Ok(()),
        };
        if self.is_layout_floating(layout_idx) {
            return Ok(());
        }
        if let Some(m) = self.state.monitor_mut(mon) {
            m.marked_width = (m.marked_width + delta).clamp(0.05, 0.95);
        }
        self.arrange(mon)
    }

    fn cmd_set_marked_width(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(ratio) = arg.as_float() else { return Ok(()) };
        if let Some(m) = self.state.monitor_mut(mon) {
            m.marked_width = ratio.clamp(0.05, 0.95);
        }
        self.arrange(mon)
    }

    fn cmd_cycle_focus(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(m) = self.state.monitor(mon) else { return Ok(()) };
        let Some(sel) = m.sel else { return Ok(()) };
        let dir = arg.as_int().unwrap_or(1);
        let next = if dir >= 0 {
            crate::lists::next_tiled(&self.state.clients, m, Some(sel))
                .or_else(|| crate::lists::next_tiled(&self.state.clients, m, None))
        } else {
            crate::lists::prev_tiled(&self.state.clients, m, sel).or_else(|| {
                crate::lists::tiled_clients(&self.state.clients, m).last().copied()
            })
        };
        if let Some(id) = next {
            self.focus(Some(id))?;
        }
        Ok(())
    }

    fn cmd_cycle_stack_area_selection(&mut self, arg: &Arg) -> Result<()> {
        // Cycle focus restricted to the stack (non-master) area.
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(m) = self.state.monitor(mon) else { return Ok(()) };
        let candidates = crate::lists::tiled_clients(&self.state.clients, m);
        let num_marked = m.num_marked_win.min(candidates.len());
        let stack = &candidates[num_marked..];
        if stack.is_empty() {
            return Ok(());
        }
        let dir = arg.as_int().unwrap_or(1);
        let cur_pos = m.sel.and_then(|s| stack.iter().position(|&c| c == s));
        let next_pos = match cur_pos {
            Some(p) => (p as i32 + dir).rem_euclid(stack.len() as i32) as usize,
            None => 0,
        };
        let id = stack[next_pos];
        self.focus(Some(id))
    }

    fn cmd_push_client(&mut self, _arg: &Arg, dir: i32) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(sel) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        if let Some(m) = self.state.monitors.arena.get_mut(mon) {
            if dir < 0 {
                crate::lists::push_left(&self.state.clients, m, sel);
            } else {
                crate::lists::push_right(&self.state.clients, m, sel);
            }
        }
        self.arrange(mon)
    }

    fn cmd_focus_client_by_index(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(idx) = arg.as_uint().map(|v| v as usize) else { return Ok(()) };
        let Some(m) = self.state.monitor(mon) else { return Ok(()) };
        let candidates = crate::lists::tiled_clients(&self.state.clients, m);
        if let Some(&id) = candidates.get(idx) {
            self.focus(Some(id))?;
        }
        Ok(())
    }

    fn cmd_toggle_floating(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let Some(c) = self.state.client_mut(id) else { return Ok(()) };
        if c.fullscreen {
            return Ok(());
        }
        c.floating = !c.floating;
        if c.floating {
            c.rect = c.old_rect;
        }
        self.arrange(mon)
    }

    fn cmd_toggle_fullscreen(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let currently_fullscreen = self.state.clients.get(id).map_or(false, |c| c.fullscreen);
        self.set_fullscreen(id, !currently_fullscreen)?;
        self.arrange(mon)
    }

    /// Enter or leave fullscreen, per the open-question resolution: the
    /// `floating` flag is restored to exactly what it was immediately
    /// before entering fullscreen, never the rule-assigned original.
    pub(crate) fn set_fullscreen(&mut self, id: crate::client::ClientId, enable: bool) -> Result<()> {
        let Some(mon) = self.state.monitor_of(id) else { return Ok(()) };
        let Some(c) = self.state.client(id) else { return Ok(()) };
        if enable == c.fullscreen {
            return Ok(());
        }

        if enable {
            let old_state = c.floating;
            let old_border = c.border_width;
            let old_rect = c.rect;
            let geometry = self.state.monitor(mon).map(|m| m.geometry).unwrap_or(old_rect);
            if let Some(c) = self.state.client_mut(id) {
                c.old_state = old_state;
                c.old_border_width = old_border;
                c.old_rect = old_rect;
                c.floating = true;
                c.border_width = 0;
                c.fullscreen = true;
            }
            self.resize_client(id, geometry, true)
        } else {
            let (old_state, old_border, old_rect) = {
                let c = &self.state.clients[id];
                (c.old_state, c.old_border_width, c.old_rect)
            };
            if let Some(c) = self.state.client_mut(id) {
                c.fullscreen = false;
                c.floating = old_state;
                c.border_width = old_border;
            }
            self.resize_client(id, old_rect, false)
        }
    }

    fn cmd_toggle_mark(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        if let Some(c) = self.state.client_mut(id) {
            c.marked = !c.marked;
        }
        self.arrange(mon)
    }

    fn cmd_hide_window(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        if let Some(c) = self.state.client_mut(id) {
            c.minimized = true;
        }
        self.focus(None)?;
        self.arrange(mon)
    }

    fn cmd_toggle_hidden(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(idx) = arg.as_uint().map(|v| v as usize) else { return Ok(()) };
        let Some(m) = self.state.monitor(mon) else { return Ok(()) };
        let hidden: Vec<_> = m
            .order
            .iter()
            .copied()
            .filter(|&id| self.state.clients.get(id).map_or(false, |c| c.minimized))
            .collect();
        if let Some(&id) = hidden.get(idx) {
            if let Some(c) = self.state.client_mut(id) {
                c.minimized = false;
            }
            self.focus(Some(id))?;
        }
        self.arrange(mon)
    }

    /// A misbehaving client can vanish between the protocol check and the
    /// kill; hold the server grab across both with the permissive error
    /// handler installed so the stray `BadWindow` doesn't take the whole
    /// process down.
    fn cmd_kill_client(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let Some(c) = self.state.client(id) else { return Ok(()) };
        let handle = c.handle;
        let supports_delete = self.backend.supports_protocol(handle, "WM_DELETE_WINDOW").unwrap_or(false);

        self.backend.install_error_handler(true);
        let mut grab = ServerGrab::acquire(&mut self.backend)?;
        if supports_delete {
            grab.backend_mut().send_protocol_message(handle, "WM_DELETE_WINDOW").ok();
        } else {
            grab.backend_mut().kill_client(handle).ok();
        }
        drop(grab);
        self.backend.install_error_handler(false);
        Ok(())
    }

    fn cmd_toggle_tagbar(&mut self) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        if let Some(m) = self.state.monitor_mut(mon) {
            m.show_tagbar = !m.show_tagbar;
            let t = m.pertag.cur_tag;
            m.pertag.show_tagbars[t] = m.show_tagbar;
        }
        self.arrange(mon)
    }

    /// `arg < 0` cycles to the next mode; `arg >= 0` sets the mode to
    /// `arg % 3`, matching the open-question resolution in `DESIGN.md`.
    fn cmd_set_clientbar_mode(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let requested = arg.as_int().unwrap_or(-1);
        if let Some(m) = self.state.monitor_mut(mon) {
            m.clientbar_mode = if requested < 0 {
                m.clientbar_mode.cycle()
            } else {
                ClientBarMode::from(requested as u32)
            };
        }
        self.arrange(mon)
    }

    fn cmd_cycle_focus_monitor(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let dir = arg.as_int().unwrap_or(1);
        let next = if dir >= 0 {
            self.state.monitors.next(mon)
        } else {
            self.state.monitors.prev(mon)
        };
        if let Some(next) = next {
            self.state.monitors.selected = Some(next);
            self.focus(None)?;
        }
        Ok(())
    }

    fn cmd_send_to_monitor(&mut self, arg: &Arg) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let dir = arg.as_int().unwrap_or(1);
        let target = if dir >= 0 {
            self.state.monitors.next(mon)
        } else {
            self.state.monitors.prev(mon)
        };
        let Some(target) = target else { return Ok(()) };

        if let Some(m) = self.state.monitors.arena.get_mut(mon) {
            crate::lists::detach(m, id);
            crate::lists::stack_detach(&self.state.clients, m, id);
        }
        let target_tagmask = self.state.monitor(target).map(|m| m.selected_tagmask()).unwrap_or(1);
        if let Some(c) = self.state.client_mut(id) {
            c.monitor = target;
            c.tags = target_tagmask;
        }
        if let Some(m) = self.state.monitors.arena.get_mut(target) {
            crate::lists::attach(&self.state.clients, m, id);
            crate::lists::stack_attach(m, id);
        }

        self.focus(None)?;
        self.arrange(mon)?;
        self.arrange(target)
    }

    fn cmd_drag_window(&mut self) -> Result<()> {
        self.mouse_drag_or_resize(true)
    }

    fn cmd_resize_with_mouse(&mut self) -> Result<()> {
        self.mouse_drag_or_resize(false)
    }

    fn mouse_drag_or_resize(&mut self, moving: bool) -> Result<()> {
        let Some(mon) = self.selected_mon() else { return Ok(()) };
        let Some(id) = self.state.monitor(mon).and_then(|m| m.sel) else { return Ok(()) };
        let Some(c) = self.state.client(id) else { return Ok(()) };
        if c.fullscreen {
            return Ok(());
        }
        let start_rect = c.rect;
        let handle = c.handle;
        let (start_px, start_py) = self.backend.cursor_position().unwrap_or((0, 0));

        let cursor = if moving { CursorShape::Move } else { CursorShape::Resize };
        self.backend.grab_pointer_for_drag(cursor)?;

        if !self.state.clients.get(id).map_or(false, |c| c.floating) {
            if let Some(c) = self.state.client_mut(id) {
                c.floating = true;
            }
            self.arrange(mon)?;
        }

        loop {
            let event = self.backend.next_event()?;
            match event {
                crate::event::XEvent::MotionNotify { root_x, root_y } => {
                    let dx = root_x - start_px;
                    let dy = root_y - start_py;
                    let target = if moving {
                        crate::geometry::Rect::new(start_rect.x + dx, start_rect.y + dy, start_rect.w, start_rect.h)
                    } else {
                        crate::geometry::Rect::new(
                            start_rect.x,
                            start_rect.y,
                            (start_rect.w + dx).max(1),
                            (start_rect.h + dy).max(1),
                        )
                    };
                    self.resize_client(id, target, true)?;
                }
                crate::event::XEvent::ButtonPress(_) => {
                    // A second button press ends the drag; treat any
                    // button event here as release, since the mock/real
                    // backend only reports the press we are polling for.
                    break;
                }
                other => {
                    self.handle_event(other)?;
                }
            }
        }

        self.backend.ungrab_pointer()?;
        let _ = handle;
        self.arrange(mon)
    }

    fn cmd_spawn(&mut self, arg: &Arg) -> Result<()> {
        let Arg::Argv(argv) = arg else {
            tracing::warn!("spawn command invoked without an argv");
            return Ok(());
        };
        let Some((program, rest)) = argv.split_first() else {
            return Ok(());
        };
        match ProcessCommand::new(program).args(rest).spawn() {
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, %program, "failed to spawn process"),
        }
        Ok(())
    }
}
