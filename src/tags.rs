//! Tag-set and per-tag layout memory transitions (spec component 4.F).
use slotmap::SlotMap;

use crate::client::{Client, ClientId, TAG_MASK};
use crate::monitor::Monitor;

/// Pull the working fields (marked width, layout, selected layout,
/// tag-bar visibility) for `m.pertag.cur_tag` into the monitor's active
/// fields. Called after any operation that changes which tag is current.
fn sync_pertag(m: &mut Monitor) {
    let t = m.pertag.cur_tag;
    m.marked_width = m.pertag.marked_widths[t];
    m.selected_layout = m.pertag.selected_layouts[t];
    m.layout = m.pertag.layout_idxs[t];
    m.show_tagbar = m.pertag.show_tagbars[t];
}

/// Push the monitor's current working fields back into
/// `m.pertag.cur_tag`'s slot, so a later `view_tag` back to this tag
/// restores exactly what was left here.
fn save_pertag(m: &mut Monitor) {
    let t = m.pertag.cur_tag;
    m.pertag.marked_widths[t] = m.marked_width;
    m.pertag.selected_layouts[t] = m.selected_layout;
    m.pertag.layout_idxs[t] = m.layout;
    m.pertag.show_tagbars[t] = m.show_tagbar;
}

/// Switch the monitor's selected tag-set to exactly `tagmask` (or restore
/// the previous view when `tagmask` is `0`). No-op (returns `false`) when
/// `tagmask` already matches the current view, unless `toggle_same` is set,
/// in which case re-viewing the current tag restores the previous view
/// instead (equivalent to calling with `tagmask = 0`).
pub fn view_tag(m: &mut Monitor, tagmask: u32, toggle_same: bool) -> bool {
    let mut requested = tagmask & TAG_MASK;
    if requested == m.tagset[m.selected_tags] {
        if !toggle_same {
            return false;
        }
        requested = 0;
    }

    save_pertag(m);
    m.selected_tags ^= 1;

    if requested != 0 {
        m.tagset[m.selected_tags] = requested;
        m.pertag.prev_tag = m.pertag.cur_tag;
        m.pertag.cur_tag = if requested == TAG_MASK {
            0
        } else {
            requested.trailing_zeros() as usize + 1
        };
    } else {
        let tmp = m.pertag.prev_tag;
        m.pertag.prev_tag = m.pertag.cur_tag;
        m.pertag.cur_tag = tmp;
    }

    sync_pertag(m);
    true
}

/// XOR `tagmask` into the currently visible tag-set, refusing to leave the
/// monitor showing no tags at all.
pub fn toggle_tag_view(m: &mut Monitor, tagmask: u32) -> bool {
    let new_mask = m.tagset[m.selected_tags] ^ (tagmask & TAG_MASK);
    if new_mask == 0 {
        return false;
    }
    m.tagset[m.selected_tags] = new_mask;
    true
}

/// Move the view to the next (`dir > 0`) or previous (`dir < 0`)
/// single-tag view, wrapping across `num_tags`. Viewing "all tags"
/// (`cur_tag == 0`) is treated as sitting just before tag `1`.
pub fn cycle_view(m: &mut Monitor, num_tags: usize, dir: i32) -> bool {
    if num_tags == 0 {
        return false;
    }
    let base = if m.pertag.cur_tag == 0 {
        0
    } else {
        m.pertag.cur_tag - 1
    };
    let next = (base as i32 + dir).rem_euclid(num_tags as i32) as usize;
    view_tag(m, 1 << next, false)
}

/// Set a client's tags outright (dwm's `tag()`); refuses to leave a client
/// with no tags at all.
pub fn tag_client(clients: &mut SlotMap<ClientId, Client>, id: ClientId, tagmask: u32) -> bool {
    let mask = tagmask & TAG_MASK;
    if mask == 0 {
        return false;
    }
    match clients.get_mut(id) {
        Some(c) if c.tags != mask => {
            c.tags = mask;
            true
        }
        _ => false,
    }
}

/// XOR `tagmask` into a client's tags; refuses to leave it tagless.
pub fn toggle_tag(clients: &mut SlotMap<ClientId, Client>, id: ClientId, tagmask: u32) -> bool {
    let Some(c) = clients.get_mut(id) else {
        return false;
    };
    let new_tags = c.tags ^ (tagmask & TAG_MASK);
    if new_tags == 0 {
        return false;
    }
    c.tags = new_tags;
    true
}

/// Shift a single-tagged client's tag by `dir` slots, wrapping across
/// `num_tags`. No-op for clients carrying more than one tag, since the
/// shift has no well-defined direction for them.
pub fn shift_tag(
    clients: &mut SlotMap<ClientId, Client>,
    num_tags: usize,
    id: ClientId,
    dir: i32,
) -> bool {
    let Some(c) = clients.get_mut(id) else {
        return false;
    };
    if num_tags == 0 || c.tags.count_ones() != 1 {
        return false;
    }
    let idx = c.tags.trailing_zeros() as i32;
    let new_idx = (idx + dir).rem_euclid(num_tags as i32);
    c.tags = 1 << new_idx;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn view_tag_is_a_noop_when_already_selected() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        assert!(!view_tag(&mut m, 1, false));
    }

    #[test]
    fn view_tag_toggles_back_to_previous_on_zero() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        assert!(view_tag(&mut m, 1 << 2, false));
        assert_eq!(m.tagset[m.selected_tags], 1 << 2);
        assert!(view_tag(&mut m, 0, false));
        assert_eq!(m.tagset[m.selected_tags], 1);
    }

    #[test]
    fn view_tag_with_toggle_same_restores_previous_view() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        assert!(view_tag(&mut m, 1 << 2, true));
        assert_eq!(m.tagset[m.selected_tags], 1 << 2);
        assert!(view_tag(&mut m, 1 << 2, true));
        assert_eq!(m.tagset[m.selected_tags], 1);
    }

    #[test]
    fn view_tag_without_toggle_same_ignores_reselect() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        assert!(view_tag(&mut m, 1 << 2, false));
        assert!(!view_tag(&mut m, 1 << 2, false));
        assert_eq!(m.tagset[m.selected_tags], 1 << 2);
    }

    #[test]
    fn toggle_tag_view_refuses_to_hide_everything() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        assert!(!toggle_tag_view(&mut m, 1));
    }

    #[test]
    fn cycle_view_wraps() {
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        m.tagset[0] = 1 << 8; // last of 9 tags
        m.pertag.cur_tag = 9;
        assert!(cycle_view(&mut m, 9, 1));
        assert_eq!(m.tagset[m.selected_tags], 1);
    }

    #[test]
    fn shift_tag_wraps_and_rejects_multi_tag() {
        let mut clients = SlotMap::with_key();
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());
        let mut c = Client::new(0, mon_id, 1 << 8, Rect::new(0, 0, 100, 100));
        c.tags = 1 << 8;
        let id = clients.insert(c);
        assert!(shift_tag(&mut clients, 9, id, 1));
        assert_eq!(clients[id].tags, 1);

        clients[id].tags = 0b11;
        assert!(!shift_tag(&mut clients, 9, id, 1));
    }
}
