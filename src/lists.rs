//! Order-list and focus-stack maintenance (spec component 4.B).
use slotmap::SlotMap;

use crate::client::{Client, ClientId};
use crate::monitor::Monitor;

/// `true` if `id` carries one of the monitor's currently visible tags.
pub fn tag_visible(clients: &SlotMap<ClientId, Client>, m: &Monitor, id: ClientId) -> bool {
    clients
        .get(id)
        .map(|c| c.is_visible_on(m.selected_tagmask()))
        .unwrap_or(false)
}

fn is_eligible_tiled(clients: &SlotMap<ClientId, Client>, m: &Monitor, id: ClientId) -> bool {
    match clients.get(id) {
        Some(c) => !c.floating && !c.minimized && c.is_visible_on(m.selected_tagmask()),
        None => false,
    }
}

/// Insert `id` into the monitor's order-list, preserving the invariant that
/// the list reads `floating* (marked & tiled)* tiled*`: the newcomer is
/// placed at the head of whichever band it belongs to.
pub fn attach(clients: &SlotMap<ClientId, Client>, m: &mut Monitor, id: ClientId) {
    let Some(client) = clients.get(id) else {
        m.order.insert(0, id);
        return;
    };

    if client.floating {
        m.order.insert(0, id);
        return;
    }

    let mut idx = 0;
    while idx < m.order.len() && clients.get(m.order[idx]).map_or(false, |c| c.floating) {
        idx += 1;
    }

    if !client.marked {
        while idx < m.order.len()
            && clients
                .get(m.order[idx])
                .map_or(false, |c| !c.floating && c.marked)
        {
            idx += 1;
        }
    }

    m.order.insert(idx, id);
}

/// Remove `id` from the monitor's order-list, wherever it currently sits.
pub fn detach(m: &mut Monitor, id: ClientId) {
    m.order.retain(|&c| c != id);
}

/// Push `id` onto the head of the focus-stack (most-recently-focused).
pub fn stack_attach(m: &mut Monitor, id: ClientId) {
    m.stack.retain(|&c| c != id);
    m.stack.insert(0, id);
}

/// Remove `id` from the focus-stack. If it was the current selection,
/// `m.sel` is re-derived from the next eligible (visible, non-minimized)
/// entry in the remaining stack.
pub fn stack_detach(clients: &SlotMap<ClientId, Client>, m: &mut Monitor, id: ClientId) {
    let was_selected = m.sel == Some(id);
    m.stack.retain(|&c| c != id);
    if was_selected {
        m.sel = m
            .stack
            .iter()
            .copied()
            .find(|&cand| clients.get(cand).map_or(false, |c| !c.minimized));
    }
}

/// The first tiled (non-floating, visible, non-minimized) client at or
/// after `from` in order-list order, or the first such client overall when
/// `from` is `None`.
pub fn next_tiled(
    clients: &SlotMap<ClientId, Client>,
    m: &Monitor,
    from: Option<ClientId>,
) -> Option<ClientId> {
    let start = match from {
        Some(id) => m.order.iter().position(|&c| c == id)?,
        None => 0,
    };
    m.order[start..]
        .iter()
        .copied()
        .find(|&id| is_eligible_tiled(clients, m, id))
}

/// The last tiled client strictly before `from` in order-list order.
pub fn prev_tiled(
    clients: &SlotMap<ClientId, Client>,
    m: &Monitor,
    from: ClientId,
) -> Option<ClientId> {
    let pos = m.order.iter().position(|&c| c == from)?;
    m.order[..pos]
        .iter()
        .rev()
        .copied()
        .find(|&id| is_eligible_tiled(clients, m, id))
}

/// All tiled clients in order-list order — the sequence `next_tiled` walks.
pub fn tiled_clients(clients: &SlotMap<ClientId, Client>, m: &Monitor) -> Vec<ClientId> {
    m.order
        .iter()
        .copied()
        .filter(|&id| is_eligible_tiled(clients, m, id))
        .collect()
}

/// Shift `id` one step earlier among the tiled (non-floating) clients,
/// wrapping past the first tiled client to the end.
pub fn push_left(clients: &SlotMap<ClientId, Client>, m: &mut Monitor, id: ClientId) {
    swap_among_tiled(clients, m, id, -1);
}

/// Shift `id` one step later among the tiled (non-floating) clients,
/// wrapping past the last tiled client to the front.
pub fn push_right(clients: &SlotMap<ClientId, Client>, m: &mut Monitor, id: ClientId) {
    swap_among_tiled(clients, m, id, 1);
}

fn swap_among_tiled(clients: &SlotMap<ClientId, Client>, m: &mut Monitor, id: ClientId, dir: i32) {
    let positions: Vec<usize> = m
        .order
        .iter()
        .enumerate()
        .filter(|&(_, &c)| clients.get(c).map_or(false, |cl| !cl.floating))
        .map(|(i, _)| i)
        .collect();

    let Some(rank) = positions.iter().position(|&i| m.order[i] == id) else {
        return;
    };
    if positions.len() < 2 {
        return;
    }
    let other_rank = ((rank as i32 + dir).rem_euclid(positions.len() as i32)) as usize;
    m.order.swap(positions[rank], positions[other_rank]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::monitor::Monitor;

    fn new_client(clients: &mut SlotMap<ClientId, Client>, mon: crate::monitor::MonitorId, floating: bool, marked: bool) -> ClientId {
        let mut c = Client::new(0, mon, 1, Rect::new(0, 0, 100, 100));
        c.floating = floating;
        c.marked = marked;
        clients.insert(c)
    }

    #[test]
    fn attach_preserves_band_ordering() {
        let mut clients = SlotMap::with_key();
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());

        let tiled_a = new_client(&mut clients, mon_id, false, false);
        let marked_a = new_client(&mut clients, mon_id, false, true);
        let float_a = new_client(&mut clients, mon_id, true, false);

        attach(&clients, &mut m, tiled_a);
        attach(&clients, &mut m, marked_a);
        attach(&clients, &mut m, float_a);

        // float_a should be at the head (floating band), then marked_a
        // (head of the marked-tiled band), then tiled_a.
        assert_eq!(m.order, vec![float_a, marked_a, tiled_a]);
    }

    #[test]
    fn stack_detach_reselects_next_eligible() {
        let mut clients = SlotMap::with_key();
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());

        let a = new_client(&mut clients, mon_id, false, false);
        let b = new_client(&mut clients, mon_id, false, false);
        stack_attach(&mut m, b);
        stack_attach(&mut m, a);
        m.sel = Some(a);

        stack_detach(&clients, &mut m, a);
        assert_eq!(m.sel, Some(b));
    }

    #[quickcheck_macros::quickcheck]
    fn order_list_membership_survives_attach_detach(n: u8) -> bool {
        let n = (n % 8) as usize;
        let mut clients = SlotMap::with_key();
        let mut m = Monitor::new(Rect::new(0, 0, 1920, 1080), 0.5, true);
        let mon_id = slotmap::SlotMap::<crate::monitor::MonitorId, ()>::with_key().insert(());
        let mut ids = Vec::new();
        for i in 0..n {
            let id = new_client(&mut clients, mon_id, i % 3 == 0, i % 5 == 0);
            attach(&clients, &mut m, id);
            ids.push(id);
        }
        let all_present = ids.iter().all(|id| m.order.contains(id));
        for id in &ids {
            detach(&mut m, *id);
        }
        all_present && m.order.is_empty()
    }
}
