//! Layout algorithms (spec component 4.D).
mod deck;
mod monocle;
mod tile;

pub use deck::Deck;
pub use monocle::Monocle;
pub use tile::Tile;

use slotmap::SlotMap;

use crate::client::{Client, ClientId};
use crate::geometry::Rect;

/// Everything a [`Layout`] needs to place the currently tiled clients on a
/// monitor. Built fresh by `arrange.rs` on every call; layouts hold no
/// mutable state of their own since `marked_width`/`num_marked_win` are
/// per-tag (`Pertag`), not per-layout.
pub struct LayoutContext<'a> {
    pub clients: &'a SlotMap<ClientId, Client>,
    pub work_area: Rect,
    pub border_width: i32,
    pub marked_width: f32,
    /// Non-floating, tag-visible, non-minimized clients in order-list order —
    /// the same sequence [`crate::lists::next_tiled`] walks.
    pub candidates: &'a [ClientId],
    pub num_marked_win: usize,
}

/// The result of arranging one monitor's tiled clients.
#[derive(Debug, Default)]
pub struct LayoutOutcome {
    pub rects: Vec<(ClientId, Rect)>,
    /// Overrides the layout's static `symbol()`, e.g. `"D 3"` for a deck
    /// holding 3 stacked clients.
    pub symbol_override: Option<String>,
}

/// Which tag-visible, non-minimized clients a layout keeps onscreen, used by
/// `arrange.rs`'s `update_onscreen`. Floating layouts always keep everything
/// onscreen regardless of this (see [`Layout::is_floating`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnscreenPolicy {
    /// Every tag-visible, non-minimized client is shown — the layout places
    /// all of them (tile's master/stack columns cover everyone).
    AllVisible,
    /// Only the floating clients and the current selection are shown; the
    /// rest sit in a single, collapsed slot (monocle).
    SelectionOnly,
    /// Floating clients, marked clients, and the current selection are
    /// shown; the rest share a single collapsed stack slot (deck).
    MarkedOrSelection,
}

/// A tiling algorithm.
///
/// Grounded on the teacher's `builtin::layout::Layout` trait, generalized to
/// take an explicit [`LayoutContext`] instead of owning mutable ratio state.
pub trait Layout: std::fmt::Debug + Send + Sync {
    /// The short glyph shown in the status bar's layout indicator.
    fn symbol(&self) -> &str;

    /// `true` for the floating "layout" that leaves every client untouched.
    fn is_floating(&self) -> bool {
        false
    }

    /// Which tag-visible clients this layout keeps onscreen. Ignored when
    /// [`Layout::is_floating`] is `true`.
    fn onscreen_policy(&self) -> OnscreenPolicy {
        OnscreenPolicy::AllVisible
    }

    fn arrange(&self, ctx: &LayoutContext) -> LayoutOutcome;
}

/// The always-available floating layout: clients keep whatever geometry
/// they already have.
#[derive(Debug, Default)]
pub struct Floating;

impl Layout for Floating {
    fn symbol(&self) -> &str {
        "><>"
    }

    fn is_floating(&self) -> bool {
        true
    }

    fn arrange(&self, _ctx: &LayoutContext) -> LayoutOutcome {
        LayoutOutcome::default()
    }
}

/// Split `candidates` into the master-column slice and the stack-column
/// slice, per the `num_marked_win` invariant every non-floating layout
/// shares: master members are exactly the leading marked-and-tiled clients.
pub(crate) fn master_stack_split<'a>(
    candidates: &'a [ClientId],
    num_marked_win: usize,
) -> (&'a [ClientId], &'a [ClientId]) {
    let split = num_marked_win.min(candidates.len());
    candidates.split_at(split)
}

/// Distribute `area`'s height across `slots.len()` clients stacked top to
/// bottom, with the last client absorbing the sequential-floor-division
/// remainder.
pub(crate) fn stack_vertically(
    slots: &[ClientId],
    area: Rect,
    x: i32,
    w: i32,
    border_width: i32,
) -> Vec<(ClientId, Rect)> {
    let mut rects = Vec::with_capacity(slots.len());
    let mut used_y = 0;
    for (i, &id) in slots.iter().enumerate() {
        let remaining = (slots.len() - i) as i32;
        let h = (area.h - used_y) / remaining;
        rects.push((
            id,
            Rect::new(
                x,
                area.y + used_y,
                (w - 2 * border_width).max(1),
                (h - 2 * border_width).max(1),
            ),
        ));
        used_y += h;
    }
    rects
}
