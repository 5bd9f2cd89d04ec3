//! Translates a [`crate::bar::BarLayout`] into the primitive drawing calls
//! a [`crate::backend::DisplayBackend`] exposes. The layout itself (spec
//! component 4.G) stays pure; this is the one place pixels get involved,
//! and even here the core never opens a drawable directly — it only calls
//! through the backend.
use crate::backend::DisplayBackend;
use crate::bar::BarLayout;
use crate::color::ColorScheme;
use crate::geometry::Rect;
use crate::manager::WindowManager;
use crate::monitor::MonitorId;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    /// Rebuild and redraw `mon`'s bars. Called after every `arrange` and
    /// on `Expose` for a bar window.
    pub fn redraw_bar(&mut self, mon: MonitorId) -> Result<()> {
        let Some(m) = self.state.monitor(mon) else {
            return Ok(());
        };
        let tagbar_window = m.tagbar_window;
        let clientbar_window = m.clientbar_window;
        let bar_y = m.bar_y;
        let clientbar_y = m.clientbar_y;
        let width = m.geometry.w;
        let x0 = m.geometry.x;
        let palette = self.state.config.palette;
        let hide_inactive_tags = self.state.config.hide_inactive_tags;
        let viewinfo_w = self.backend.text_width(&m.layout_symbol)?.max(1) + 8;

        let layout = crate::bar::build_bar_layout(
            &self.state.clients,
            m,
            &self.state.config.tags,
            &self.state.status_text,
            hide_inactive_tags,
            width,
            viewinfo_w,
            |s| self.backend.text_width(s).unwrap_or(0).max(1),
        );

        if let Some(m) = self.state.monitors.arena.get_mut(mon) {
            m.num_client_tabs = layout.client_tabs.len();
            m.client_tab_widths = layout.client_tabs.iter().map(|t| t.width).collect();
        }

        if layout.show_tagbar {
            if let Some(win) = tagbar_window {
                let area = Rect::new(x0, bar_y, width, 0);
                self.draw_tag_bar(win, area, &layout, palette)?;
            }
        }
        if layout.show_clientbar {
            if let Some(win) = clientbar_window {
                let area = Rect::new(x0, clientbar_y, width, 0);
                self.draw_client_bar(win, area, &layout, palette)?;
            }
        }
        Ok(())
    }

    fn draw_tag_bar(
        &mut self,
        window: crate::client::WindowId,
        area: Rect,
        layout: &BarLayout,
        palette: crate::color::Palette,
    ) -> Result<()> {
        let font_h = self.backend.font_metrics()?.height;
        let bar_h = font_h + 2;
        self.backend.clear(Rect::new(area.x, area.y, area.w, bar_h), palette.normal.background);

        let mut x = area.x;
        for tag in &layout.tags {
            let scheme = pick_scheme(&palette, tag.selected, tag.urgent);
            let w = self.backend.text_width(&tag.label)?.max(1) + 8;
            self.backend.draw_rect(Rect::new(x, area.y, w, bar_h), scheme.background, true);
            self.backend.draw_text((x + 4, area.y), &tag.label, scheme.foreground, scheme.background);
            x += w;
        }

        let sym_w = self.backend.text_width(&layout.layout_symbol)?.max(1) + 8;
        self.backend.draw_text(
            (x + 4, area.y),
            &layout.layout_symbol,
            palette.normal.foreground,
            palette.normal.background,
        );
        x += sym_w;

        let status_w = self.backend.text_width(&layout.status_text)?.max(1);
        let status_x = (area.x + area.w - status_w - 4).max(x);
        self.backend.draw_text(
            (status_x, area.y),
            &layout.status_text,
            palette.normal.foreground,
            palette.normal.background,
        );

        if status_x > x {
            self.backend.draw_text(
                (x + 4, area.y),
                &layout.window_title,
                palette.normal.foreground,
                palette.normal.background,
            );
        }

        self.backend.present(window)
    }

    fn draw_client_bar(
        &mut self,
        window: crate::client::WindowId,
        area: Rect,
        layout: &BarLayout,
        palette: crate::color::Palette,
    ) -> Result<()> {
        let font_h = self.backend.font_metrics()?.height;
        let bar_h = font_h + 2;
        self.backend.clear(Rect::new(area.x, area.y, area.w, bar_h), palette.normal.background);

        if layout.client_tabs.is_empty() {
            return self.backend.present(window);
        }
        let mut x = area.x;
        for tab in &layout.client_tabs {
            let scheme = crate::bar::tab_scheme(&palette, tab);
            let rect = Rect::new(x, area.y, tab.width, bar_h);
            self.backend.draw_rect(rect, scheme.background, true);
            self.backend.draw_text((rect.x + 4, rect.y), &tab.title, scheme.foreground, scheme.background);
            if tab.marked {
                let indicator_w = (tab.width / 8).clamp(2, 6);
                self.backend.draw_rect(
                    Rect::new(rect.x + rect.w - indicator_w - 2, rect.y + 2, indicator_w, bar_h - 4),
                    scheme.foreground,
                    true,
                );
            }
            x += tab.width;
        }

        let sym_w = self.backend.text_width(&layout.layout_symbol)?.max(1) + 8;
        let sym_x = (area.x + area.w - sym_w).max(x);
        self.backend.draw_text(
            (sym_x + 4, area.y),
            &layout.layout_symbol,
            palette.normal.foreground,
            palette.normal.background,
        );

        self.backend.present(window)
    }
}

fn pick_scheme(palette: &crate::color::Palette, selected: bool, urgent: bool) -> ColorScheme {
    if urgent {
        palette.urgent
    } else if selected {
        palette.selected
    } else {
        palette.normal
    }
}

