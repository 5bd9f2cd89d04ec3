//! Onscreen/visibility derivation, layout invocation, focus and stacking
//! (spec component 4.E), implemented as methods on [`WindowManager`].
use crate::backend::DisplayBackend;
use crate::client::ClientId;
use crate::geometry::{apply_size_hints, Rect};
use crate::layout::{LayoutContext, OnscreenPolicy};
use crate::manager::WindowManager;
use crate::monitor::MonitorId;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    pub(crate) fn is_layout_floating(&self, layout_idx: usize) -> bool {
        self.state
            .config
            .layouts
            .get(layout_idx)
            .map_or(true, |l| l.is_floating())
    }

    /// Recompute every tag-visible, non-minimized client's `onscreen` flag
    /// for `mon`, per the active layout's [`OnscreenPolicy`] (always
    /// `AllVisible` under a floating layout), and recount `num_marked_win`
    /// as the number of marked, tag-visible clients this arrangement.
    pub fn update_onscreen(&mut self, mon: MonitorId) {
        let Some(m) = self.state.monitor(mon) else {
            return;
        };
        let layout_idx = m.layout[m.selected_layout];
        let policy = if self.is_layout_floating(layout_idx) {
            OnscreenPolicy::AllVisible
        } else {
            self.state
                .config
                .layouts
                .get(layout_idx)
                .map_or(OnscreenPolicy::AllVisible, |l| l.onscreen_policy())
        };
        let tagmask = m.selected_tagmask();
        let sel = m.sel;
        let ids: Vec<ClientId> = m.order.clone();

        let mut num_marked = 0usize;
        for id in ids {
            let Some(c) = self.state.client_mut(id) else {
                continue;
            };
            let visible = c.is_visible_on(tagmask) && !c.minimized;
            c.onscreen = match policy {
                OnscreenPolicy::AllVisible => visible,
                OnscreenPolicy::SelectionOnly => visible && (c.floating || Some(id) == sel),
                OnscreenPolicy::MarkedOrSelection => {
                    visible && (c.floating || c.marked || Some(id) == sel)
                }
            };
            if visible && c.marked {
                num_marked += 1;
            }
        }

        if let Some(m) = self.state.monitor_mut(mon) {
            m.num_marked_win = num_marked;
        }
    }

    /// Move every client assigned to `mon` to its current rectangle if it
    /// is onscreen (or, when `hide_buried_windows` is disabled, any
    /// tag-visible non-minimized client) and set its ICCCM state to
    /// Normal; everything else is parked off-screen (still mapped) and set
    /// to Iconic. Actual re-tiling happens afterward once the layout has
    /// run.
    pub fn update_visibility(&mut self, mon: MonitorId) -> Result<()> {
        let Some(m) = self.state.monitor(mon) else {
            return Ok(());
        };
        let tagmask = m.selected_tagmask();
        let hide_buried = self.state.config.hide_buried_windows;
        let ids: Vec<ClientId> = m.order.clone();

        for id in ids {
            let Some(c) = self.state.client(id) else {
                continue;
            };
            let handle = c.handle;
            let border = c.border_width;
            let rect = c.rect;
            let show = c.onscreen || (!hide_buried && c.is_visible_on(tagmask) && !c.minimized);
            let target = if show {
                rect
            } else {
                Rect::new(-(rect.total_width(border) * 2), rect.y, rect.w, rect.h)
            };
            if let Err(e) = self.backend.move_resize(handle, target) {
                tracing::warn!(error = %e, ?id, "failed to reposition client visibility");
            }
            if let Err(e) = self.backend.set_wm_state(handle, !show) {
                tracing::warn!(error = %e, ?id, "failed to set ICCCM state");
            }
        }
        Ok(())
    }

    /// Recompute `mon`'s work area from its full geometry minus whichever
    /// bars are currently shown.
    pub fn update_bar_positions(&mut self, mon: MonitorId) -> Result<()> {
        let bar_h = self.backend.font_metrics()?.height + 2;
        let tagbar_on_top = self.state.config.tagbar_on_top;

        let tab_count = match self.state.monitors.arena.get(mon) {
            Some(m) => crate::lists::tiled_clients(&self.state.clients, m).len(),
            None => return Ok(()),
        };

        let Some(m) = self.state.monitors.arena.get_mut(mon) else {
            return Ok(());
        };
        m.clientbar_visible = crate::bar::clientbar_should_show(m.clientbar_mode, tab_count);

        let mut work = m.geometry;
        let mut top = work.y;
        let mut bottom = work.y + work.h;

        if m.show_tagbar {
            if tagbar_on_top {
                m.bar_y = top;
                top += bar_h;
            } else {
                bottom -= bar_h;
                m.bar_y = bottom;
            }
        }

        if m.clientbar_visible {
            if tagbar_on_top {
                m.clientbar_y = top;
                top += bar_h;
            } else {
                bottom -= bar_h;
                m.clientbar_y = bottom;
            }
        }

        work.y = top;
        work.h = (bottom - top).max(1);
        m.work_area = work;
        Ok(())
    }

    /// Run the full per-monitor reconcile cycle: onscreen derivation,
    /// visibility, bar geometry, layout invocation, then restack.
    pub fn arrange(&mut self, mon: MonitorId) -> Result<()> {
        self.update_onscreen(mon);
        self.update_visibility(mon)?;
        self.update_bar_positions(mon)?;

        let Some(m) = self.state.monitor(mon) else {
            return Ok(());
        };
        let layout_idx = m.layout[m.selected_layout];
        let border_width = self.state.config.border_width;
        let marked_width = m.marked_width;
        let num_marked_win = m.num_marked_win;
        let work_area = m.work_area;
        let candidates = crate::lists::tiled_clients(&self.state.clients, m);

        let (symbol, rects) = match self.state.config.layouts.get(layout_idx) {
            Some(layout) => {
                let ctx = LayoutContext {
                    clients: &self.state.clients,
                    work_area,
                    border_width,
                    marked_width,
                    candidates: &candidates,
                    num_marked_win,
                };
                let outcome = layout.arrange(&ctx);
                let symbol = outcome
                    .symbol_override
                    .unwrap_or_else(|| layout.symbol().to_string());
                (symbol, outcome.rects)
            }
            None => (String::new(), Vec::new()),
        };

        if let Some(m) = self.state.monitor_mut(mon) {
            m.layout_symbol = symbol;
        }

        for (id, rect) in rects {
            self.resize_client(id, rect, false)?;
        }

        self.restack(mon)
    }

    /// Solve `target` against size hints and containment, commit the
    /// result to the client's stored geometry, and push it to the
    /// backend.
    pub fn resize_client(&mut self, id: ClientId, target: Rect, interact: bool) -> Result<()> {
        let Some(mon) = self.state.monitor_of(id) else {
            return Ok(());
        };
        let layout_floating = self
            .state
            .monitor(mon)
            .map(|m| self.is_layout_floating(m.layout[m.selected_layout]))
            .unwrap_or(true);
        let bounds = self
            .state
            .monitor(mon)
            .map(|m| if interact { m.geometry } else { m.work_area })
            .unwrap_or(target);

        let Some(c) = self.state.client(id) else {
            return Ok(());
        };
        let apply_hints = self.state.config.resize_hints || c.floating || layout_floating;
        let solved =
            apply_size_hints(target, c.border_width, &c.hints, 0, bounds, interact, apply_hints)
                .unwrap_or(target);
        let handle = c.handle;
        let border_width = c.border_width;
        let old_rect = c.rect;

        if let Some(c) = self.state.client_mut(id) {
            c.old_rect = old_rect;
            c.rect = solved;
        }

        if let Err(e) = self.backend.move_resize(handle, solved) {
            tracing::warn!(error = %e, ?id, "failed to move/resize client");
            return Ok(());
        }
        if let Err(e) = self.backend.send_configure_notify(handle, solved, border_width) {
            tracing::warn!(error = %e, ?id, "failed to send synthetic configure notify");
        }
        Ok(())
    }

    /// Resolve input focus: honor an explicit `target`, otherwise pick the
    /// top of the selected monitor's focus-stack that is still
    /// visible/non-minimized. Updates border colors and EWMH input focus.
    pub fn focus(&mut self, target: Option<ClientId>) -> Result<()> {
        let Some(mon) = self.state.selected_monitor() else {
            return Ok(());
        };

        let resolved = match target {
            Some(id) => Some(id),
            None => {
                let m = &self.state.monitors.arena[mon];
                let tagmask = m.selected_tagmask();
                m.stack.iter().copied().find(|&id| {
                    self.state
                        .clients
                        .get(id)
                        .map_or(false, |c| c.is_visible_on(tagmask) && !c.minimized)
                })
            }
        };

        let prev_sel = self.state.monitors.arena[mon].sel;
        if prev_sel != resolved {
            if let Some(prev) = prev_sel {
                self.unfocus(prev, true)?;
            }
        }

        if let Some(id) = resolved {
            crate::lists::stack_attach(&mut self.state.monitors.arena[mon], id);
            if let Some(c) = self.state.client_mut(id) {
                c.urgent = false;
            }
            self.state.monitors.arena[mon].sel = Some(id);

            let (handle, never_focus) = {
                let c = &self.state.clients[id];
                (c.handle, c.never_focus)
            };
            let color = self.state.config.palette.selected.border;
            if let Err(e) = self.backend.set_border_color(handle, color) {
                tracing::warn!(error = %e, "failed to set selected border color");
            }
            if !never_focus {
                if let Err(e) = self.backend.set_input_focus(handle) {
                    tracing::warn!(error = %e, "failed to set input focus");
                }
            } else if let Err(e) = self.backend.send_protocol_message(handle, "WM_TAKE_FOCUS") {
                tracing::trace!(error = %e, "client does not support WM_TAKE_FOCUS");
            }
            tracing::debug!(?id, "focus changed");
        } else {
            self.state.monitors.arena[mon].sel = None;
            if let Err(e) = self.backend.clear_input_focus() {
                tracing::warn!(error = %e, "failed to clear input focus");
            }
        }

        self.restack(mon)
    }

    pub(crate) fn unfocus(&mut self, id: ClientId, set_border: bool) -> Result<()> {
        let Some(c) = self.state.client(id) else {
            return Ok(());
        };
        let handle = c.handle;
        if set_border {
            let color = self.state.config.palette.normal.border;
            if let Err(e) = self.backend.set_border_color(handle, color) {
                tracing::warn!(error = %e, "failed to reset border color");
            }
        }
        Ok(())
    }

    /// Raise the selected client above its siblings when it is floating
    /// (or the whole layout is), then keep the bar windows on top.
    pub fn restack(&mut self, mon: MonitorId) -> Result<()> {
        let Some(m) = self.state.monitor(mon) else {
            return Ok(());
        };
        if let Some(sel) = m.sel {
            let floating_layout = self.is_layout_floating(m.layout[m.selected_layout]);
            if let Some(c) = self.state.client(sel) {
                if c.floating || floating_layout {
                    let handle = c.handle;
                    if let Err(e) = self.backend.raise_window(handle) {
                        tracing::warn!(error = %e, "failed to raise selected client");
                    }
                }
            }
        }

        let m = &self.state.monitors.arena[mon];
        if let Some(win) = m.tagbar_window {
            self.backend.raise_window(win).ok();
        }
        if let Some(win) = m.clientbar_window {
            self.backend.raise_window(win).ok();
        }
        Ok(())
    }
}
