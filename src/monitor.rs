//! Per-monitor state: viewport, order-list, focus-stack and pertag layout
//! memory (spec component 4.C).
use crate::client::{ClientId, WindowId, MAX_TAGS};
use crate::geometry::Rect;

slotmap::new_key_type! {
    /// A stable, generation-checked handle to a monitor.
    pub struct MonitorId;
}

/// Whether the per-monitor client-bar is drawn never, only when more than
/// one client is onscreen, or always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientBarMode {
    Never,
    Auto,
    Always,
}

impl ClientBarMode {
    pub fn cycle(self) -> Self {
        match self {
            ClientBarMode::Never => ClientBarMode::Auto,
            ClientBarMode::Auto => ClientBarMode::Always,
            ClientBarMode::Always => ClientBarMode::Never,
        }
    }
}

impl From<u32> for ClientBarMode {
    fn from(n: u32) -> Self {
        match n % 3 {
            0 => ClientBarMode::Never,
            1 => ClientBarMode::Auto,
            _ => ClientBarMode::Always,
        }
    }
}

/// Per-tag layout memory, indexed `0..=MAX_TAGS` where index `0` is the
/// "all tags" view used while cycling/toggling tag visibility.
#[derive(Debug, Clone)]
pub struct Pertag {
    pub marked_widths: [f32; MAX_TAGS + 1],
    pub layout_idxs: [[usize; 2]; MAX_TAGS + 1],
    pub selected_layouts: [usize; MAX_TAGS + 1],
    pub show_tagbars: [bool; MAX_TAGS + 1],
    pub cur_tag: usize,
    pub prev_tag: usize,
}

impl Pertag {
    pub fn new(default_marked_width: f32, show_tagbar: bool) -> Self {
        Self {
            marked_widths: [default_marked_width; MAX_TAGS + 1],
            layout_idxs: [[0, 1]; MAX_TAGS + 1],
            selected_layouts: [0; MAX_TAGS + 1],
            show_tagbars: [show_tagbar; MAX_TAGS + 1],
            cur_tag: 1,
            prev_tag: 1,
        }
    }
}

/// A physical (or Xinerama-virtual) monitor and everything tracked per
/// screen: viewport geometry, tag-set, tiling order, focus-stack and the
/// bar windows that belong to it.
#[derive(Debug, Clone)]
pub struct Monitor {
    /// Full screen geometry, as reported by the backend.
    pub geometry: Rect,
    /// Geometry available for client windows, after the bar is reserved.
    pub work_area: Rect,

    pub layout_symbol: String,
    pub marked_width: f32,
    pub num_marked_win: usize,

    /// `[selected, previous]` tag-set bitmasks, toggled by `view_tag`.
    pub tagset: [u32; 2],
    pub selected_tags: usize,

    /// Indices into the shared layout list, `[selected, previous]`.
    pub layout: [usize; 2],
    pub selected_layout: usize,

    pub show_tagbar: bool,
    pub tagbar_window: Option<WindowId>,
    pub bar_y: i32,

    pub clientbar_mode: ClientBarMode,
    pub clientbar_window: Option<WindowId>,
    pub clientbar_y: i32,
    pub clientbar_visible: bool,
    pub num_client_tabs: usize,
    pub client_tab_widths: Vec<i32>,

    /// Tiling order, head = index `0`.
    pub order: Vec<ClientId>,
    /// Focus history, most-recently-focused first.
    pub stack: Vec<ClientId>,
    pub sel: Option<ClientId>,

    pub pertag: Pertag,
}

impl Monitor {
    pub fn new(geometry: Rect, default_marked_width: f32, show_tagbar: bool) -> Self {
        Self {
            geometry,
            work_area: geometry,
            layout_symbol: String::new(),
            marked_width: default_marked_width,
            num_marked_win: 0,
            tagset: [1, 1],
            selected_tags: 0,
            layout: [0, 0],
            selected_layout: 0,
            show_tagbar,
            tagbar_window: None,
            bar_y: geometry.y,
            clientbar_mode: ClientBarMode::Auto,
            clientbar_window: None,
            clientbar_y: geometry.y,
            clientbar_visible: false,
            num_client_tabs: 0,
            client_tab_widths: Vec::new(),
            order: Vec::new(),
            stack: Vec::new(),
            sel: None,
            pertag: Pertag::new(default_marked_width, show_tagbar),
        }
    }

    pub fn selected_tagmask(&self) -> u32 {
        self.tagset[self.selected_tags]
    }
}

/// The set of live monitors plus which one currently has input focus.
///
/// Mirrors dwm's singly-linked monitor list: `order` records left-to-right
/// attachment order (used for "focus next/previous monitor"), while `arena`
/// owns the actual [`Monitor`] values behind stable [`MonitorId`] keys.
#[derive(Debug, Default)]
pub struct Monitors {
    pub arena: slotmap::SlotMap<MonitorId, Monitor>,
    pub order: Vec<MonitorId>,
    pub selected: Option<MonitorId>,
}

impl Monitors {
    pub fn new() -> Self {
        Self {
            arena: slotmap::SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
        }
    }

    pub fn insert(&mut self, monitor: Monitor) -> MonitorId {
        let id = self.arena.insert(monitor);
        self.order.push(id);
        if self.selected.is_none() {
            self.selected = Some(id);
        }
        tracing::debug!(?id, "monitor attached");
        id
    }

    pub fn remove(&mut self, id: MonitorId) -> Option<Monitor> {
        self.order.retain(|&m| m != id);
        if self.selected == Some(id) {
            self.selected = self.order.first().copied();
        }
        tracing::debug!(?id, "monitor detached");
        self.arena.remove(id)
    }

    pub fn next(&self, id: MonitorId) -> Option<MonitorId> {
        let pos = self.order.iter().position(|&m| m == id)?;
        self.order.get(pos + 1).copied()
    }

    pub fn prev(&self, id: MonitorId) -> Option<MonitorId> {
        let pos = self.order.iter().position(|&m| m == id)?;
        if pos == 0 {
            None
        } else {
            self.order.get(pos - 1).copied()
        }
    }
}
