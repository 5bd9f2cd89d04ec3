//! Managed-client state (spec component 3 "Client").
use crate::geometry::{Rect, SizeHints};
use crate::monitor::MonitorId;

slotmap::new_key_type! {
    /// A stable, generation-checked handle to a managed client.
    pub struct ClientId;
}

/// An opaque backend window handle.
///
/// The core never interprets this value beyond equality and uses it purely
/// to hand work back to the [`DisplayBackend`][crate::backend::DisplayBackend]
/// that owns the real connection.
pub type WindowId = u64;

/// The maximum number of tags a `Config` may define.
pub const MAX_TAGS: usize = 9;
/// Bitmask covering every configured tag slot.
pub const TAG_MASK: u32 = (1 << MAX_TAGS) - 1;

/// A single managed top-level window.
///
/// Lives in a [`slotmap::SlotMap<ClientId, Client>`] arena; cross-references
/// (selection, focus-stack, order-list membership) are [`ClientId`] values
/// rather than pointers or raw indices, so unrelated removals can never
/// invalidate a live reference.
#[derive(Debug, Clone)]
pub struct Client {
    /// The backend window this client wraps.
    pub handle: WindowId,
    /// `WM_NAME`/`_NET_WM_NAME`, truncated to 255 UTF-16 code units.
    pub title: String,
    pub class: String,
    pub instance: String,

    pub rect: Rect,
    pub old_rect: Rect,
    pub border_width: i32,
    pub old_border_width: i32,

    pub hints: SizeHints,
    pub hints_valid: bool,
    pub is_fixed: bool,

    /// Bitmask of tags this client is attached to.
    pub tags: u32,
    pub monitor: MonitorId,

    pub floating: bool,
    pub was_floating: bool,
    pub urgent: bool,
    pub never_focus: bool,
    pub old_state: bool,
    pub fullscreen: bool,
    pub minimized: bool,
    pub onscreen: bool,
    pub marked: bool,
}

impl Client {
    pub fn new(handle: WindowId, monitor: MonitorId, tags: u32, rect: Rect) -> Self {
        Self {
            handle,
            title: String::new(),
            class: String::new(),
            instance: String::new(),
            rect,
            old_rect: rect,
            border_width: 0,
            old_border_width: 0,
            hints: SizeHints::default(),
            hints_valid: false,
            is_fixed: false,
            tags,
            monitor,
            floating: false,
            was_floating: false,
            urgent: false,
            never_focus: false,
            old_state: false,
            fullscreen: false,
            minimized: false,
            onscreen: false,
            marked: false,
        }
    }

    /// `true` if this client carries any of the currently visible tags.
    pub fn is_visible_on(&self, tagset: u32) -> bool {
        self.tags & tagset != 0
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.title = title.chars().take(255).collect();
    }
}
