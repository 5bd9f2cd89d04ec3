//! Pure status-bar layout model (spec component 4.G).
//!
//! Produces the data a backend's drawing routines consume; the core never
//! touches a pixel (spec §1 Non-goals).
use crate::client::{Client, ClientId};
use crate::monitor::Monitor;

/// One clickable tag cell in the tag-bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TagCell {
    pub label: String,
    pub index: usize,
    pub selected: bool,
    pub occupied: bool,
    pub urgent: bool,
}

/// One clickable tab in the client-bar (one per tag-visible client).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientTab {
    pub client: ClientId,
    pub title: String,
    pub selected: bool,
    pub urgent: bool,
    pub minimized: bool,
    pub marked: bool,
    /// Mirrors `Client::onscreen`: placed by the layout this cycle, as
    /// opposed to a buried deck/monocle stack entry that is still
    /// tag-visible but not actually mapped where this tab says.
    pub onscreen: bool,
    /// Pixel width this tab was allotted after truncation.
    pub width: i32,
}

/// Everything needed to draw one monitor's bars this frame.
#[derive(Debug, Clone, Default)]
pub struct BarLayout {
    pub tags: Vec<TagCell>,
    pub layout_symbol: String,
    pub status_text: String,
    pub window_title: String,
    pub show_tagbar: bool,
    pub show_clientbar: bool,
    pub client_tabs: Vec<ClientTab>,
}

/// Build the tag-bar's cell list: one per configured tag, in order,
/// flagged for selection/occupancy/urgency, filtered to occupied-or-viewed
/// tags unless `hide_inactive_tags` is false.
pub fn build_tag_cells(
    clients: &slotmap::SlotMap<ClientId, Client>,
    m: &Monitor,
    tag_labels: &[String],
    hide_inactive_tags: bool,
) -> Vec<TagCell> {
    let selected_mask = m.selected_tagmask();
    tag_labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            let bit = 1u32 << i;
            let mut occupied = false;
            let mut urgent = false;
            for &id in &m.order {
                if let Some(c) = clients.get(id) {
                    if c.tags & bit != 0 {
                        occupied = true;
                        urgent |= c.urgent;
                    }
                }
            }
            let selected = selected_mask & bit != 0;
            if hide_inactive_tags && !occupied && !selected {
                return None;
            }
            Some(TagCell {
                label: label.clone(),
                index: i,
                selected,
                occupied,
                urgent,
            })
        })
        .collect()
}

/// Spread `ww` pixels of client-bar space across `widths` (one per tab, any
/// order), per spec 4.G: sort ascending, find the largest `i` such that
/// `viewinfo + (num-i)*widths[i] <= ww`, then every tab shares
/// `(ww - accumulated) / (num - i)` equally — which is exactly `min(width,
/// share)` per tab, since the `i` narrowest tabs are by construction
/// already under `share`. Returns the final width for each input index, in
/// the same order as `widths`. No truncation at all (each tab keeps its
/// measured width) when everything already fits.
fn balance_tab_widths(widths: &[i32], viewinfo: i32, ww: i32) -> Vec<i32> {
    let n = widths.len();
    if n == 0 {
        return Vec::new();
    }
    let total: i32 = widths.iter().sum();
    if viewinfo + total <= ww {
        return widths.to_vec();
    }

    let mut sorted = widths.to_vec();
    sorted.sort_unstable();

    let mut chosen = 0usize;
    for i in 0..n {
        let remaining = (n - i) as i32;
        if viewinfo + remaining * sorted[i] <= ww {
            chosen = i;
        }
    }
    let accumulated: i32 = sorted[..chosen].iter().sum();
    let remaining = (n - chosen) as i32;
    let share = ((ww - viewinfo - accumulated) / remaining).max(1);

    widths.iter().map(|&w| w.min(share)).collect()
}

/// Build the client-bar's tab list: one tab per tag-visible client on `m`,
/// in order-list order, with per-tab widths already balanced to fit `ww`
/// pixels (`viewinfo_width` is reserved for the layout symbol and is not
/// available to tabs). `text_width` measures a title in pixels; injected so
/// this stays free of any backend dependency.
pub fn build_client_tabs(
    clients: &slotmap::SlotMap<ClientId, Client>,
    m: &Monitor,
    ww: i32,
    viewinfo_width: i32,
    mut text_width: impl FnMut(&str) -> i32,
) -> Vec<ClientTab> {
    let tagmask = m.selected_tagmask();
    let mut tabs: Vec<ClientTab> = m
        .order
        .iter()
        .filter_map(|&id| {
            clients.get(id).filter(|c| c.is_visible_on(tagmask)).map(|c| ClientTab {
                client: id,
                title: c.title.clone(),
                selected: m.sel == Some(id),
                urgent: c.urgent,
                minimized: c.minimized,
                marked: c.marked,
                onscreen: c.onscreen,
                width: 0,
            })
        })
        .collect();

    let widths: Vec<i32> = tabs.iter().map(|t| text_width(&t.title).max(1)).collect();
    let balanced = balance_tab_widths(&widths, viewinfo_width, ww);
    for (tab, w) in tabs.iter_mut().zip(balanced) {
        tab.width = w;
    }
    tabs
}

/// The color-scheme priority for one client-bar tab: selected > urgent >
/// minimized > visible (onscreen) > normal.
pub fn tab_scheme(palette: &crate::color::Palette, tab: &ClientTab) -> crate::color::ColorScheme {
    if tab.selected {
        palette.selected
    } else if tab.urgent {
        palette.urgent
    } else if tab.minimized {
        palette.minimized
    } else if tab.onscreen {
        palette.visible
    } else {
        palette.normal
    }
}

/// Whether the client-bar should actually be drawn this frame, given its
/// configured mode and how many tabs would be shown.
pub fn clientbar_should_show(mode: crate::monitor::ClientBarMode, tab_count: usize) -> bool {
    match mode {
        crate::monitor::ClientBarMode::Never => false,
        crate::monitor::ClientBarMode::Always => tab_count > 0,
        crate::monitor::ClientBarMode::Auto => tab_count > 1,
    }
}

/// Assemble the full [`BarLayout`] for a monitor this frame. `clientbar_w`
/// is the client-bar's full drawable width and `viewinfo_w` the slice of it
/// reserved for the layout symbol (spec 4.G); `text_width` measures a
/// string in pixels for truncation.
pub fn build_bar_layout(
    clients: &slotmap::SlotMap<ClientId, Client>,
    m: &Monitor,
    tag_labels: &[String],
    status_text: &str,
    hide_inactive_tags: bool,
    clientbar_w: i32,
    viewinfo_w: i32,
    text_width: impl FnMut(&str) -> i32,
) -> BarLayout {
    let client_tabs = build_client_tabs(clients, m, clientbar_w, viewinfo_w, text_width);
    let show_clientbar = clientbar_should_show(m.clientbar_mode, client_tabs.len());
    let window_title = m
        .sel
        .and_then(|id| clients.get(id))
        .map(|c| c.title.clone())
        .unwrap_or_default();

    BarLayout {
        tags: build_tag_cells(clients, m, tag_labels, hide_inactive_tags),
        layout_symbol: m.layout_symbol.clone(),
        status_text: status_text.to_string(),
        window_title,
        show_tagbar: m.show_tagbar,
        show_clientbar,
        client_tabs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn clientbar_auto_needs_more_than_one_tab() {
        assert!(!clientbar_should_show(crate::monitor::ClientBarMode::Auto, 1));
        assert!(clientbar_should_show(crate::monitor::ClientBarMode::Auto, 2));
    }

    #[test]
    fn tag_cells_flag_occupancy() {
        let mut clients = slotmap::SlotMap::with_key();
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());
        let c = Client::new(0, mon_id, 1 << 1, Rect::new(0, 0, 10, 10));
        let id = clients.insert(c);
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        m.order.push(id);

        let labels: Vec<String> = (1..=9).map(|n| n.to_string()).collect();
        let cells = build_tag_cells(&clients, &m, &labels, false);
        assert_eq!(cells.len(), 9);
        assert!(cells[1].occupied);
        assert!(!cells[0].occupied);
    }

    #[test]
    fn tag_cells_hide_inactive_filters_unoccupied_unviewed() {
        let mut clients = slotmap::SlotMap::with_key();
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());
        let c = Client::new(0, mon_id, 1 << 1, Rect::new(0, 0, 10, 10));
        let id = clients.insert(c);
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        m.order.push(id);

        let labels: Vec<String> = (1..=9).map(|n| n.to_string()).collect();
        let cells = build_tag_cells(&clients, &m, &labels, true);
        // tag 0 (selected, the default view) and tag 1 (occupied) survive;
        // the rest are neither occupied nor in view.
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().any(|c| c.index == 0 && c.selected));
        assert!(cells.iter().any(|c| c.index == 1 && c.occupied));
    }

    #[test]
    fn client_tabs_cover_all_tag_visible_clients_including_minimized() {
        let mut clients = slotmap::SlotMap::with_key();
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());
        let mut c1 = Client::new(0, mon_id, 1, Rect::new(0, 0, 10, 10));
        c1.set_title("alpha");
        let id1 = clients.insert(c1);
        let mut c2 = Client::new(1, mon_id, 1, Rect::new(0, 0, 10, 10));
        c2.set_title("beta");
        c2.minimized = true;
        let id2 = clients.insert(c2);

        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        m.order.push(id1);
        m.order.push(id2);
        m.sel = Some(id1);

        let tabs = build_client_tabs(&clients, &m, 800, 40, |s| s.len() as i32 * 8);
        assert_eq!(tabs.len(), 2);
        assert!(tabs.iter().any(|t| t.client == id1 && t.selected));
        assert!(tabs.iter().any(|t| t.client == id2 && t.minimized));
    }

    #[test]
    fn balance_tab_widths_shrinks_only_when_over_budget() {
        let widths = vec![40, 60, 500];
        let untouched = balance_tab_widths(&widths, 20, 1000);
        assert_eq!(untouched, widths);

        let shrunk = balance_tab_widths(&widths, 20, 200);
        assert_eq!(shrunk.len(), 3);
        assert!(shrunk.iter().sum::<i32>() + 20 <= 220); // some slack for rounding
        assert_eq!(shrunk[0], 40); // the narrowest tab keeps its real width
        assert!(shrunk[2] < 500); // the widest tab got capped
    }

    #[test]
    fn tab_scheme_priority_picks_selected_over_everything() {
        let palette = crate::color::Palette::default();
        let tab = ClientTab {
            client: slotmap::SlotMap::<ClientId, ()>::with_key().insert(()),
            title: String::new(),
            selected: true,
            urgent: true,
            minimized: true,
            marked: false,
            onscreen: true,
            width: 0,
        };
        assert_eq!(tab_scheme(&palette, &tab), palette.selected);
    }
}
