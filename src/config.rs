//! Assembled-once startup configuration (spec §6 Configuration).
//!
//! `Config` is a plain value built with chained `&mut Self`-returning
//! setters, mirroring the teacher's `core::config::Config` builder, and is
//! never mutated by the core once bootstrap has consumed it.
use crate::bindings::{KeyBindings, MouseBindings};
use crate::color::Palette;
use crate::layout::{Deck, Floating, Layout, Monocle, Tile};
use crate::monitor::ClientBarMode;
use crate::rules::Rule;

/// Startup configuration for the window manager.
///
/// Plain-data fields (tags, palette, numeric knobs) additionally derive
/// `serde::{Serialize, Deserialize}` behind the `serde` feature for
/// snapshot-style tests and downstream config-file loaders; reading a
/// config file from disk is not this crate's concern.
pub struct Config {
    pub tags: Vec<String>,
    pub palette: Palette,
    pub border_width: i32,
    pub snap_distance: i32,
    pub marked_width: f32,
    pub show_tagbar: bool,
    pub tagbar_on_top: bool,
    pub clientbar_mode: ClientBarMode,
    pub bar_font: String,
    pub resize_hints: bool,
    pub lock_fullscreen: bool,
    /// Focus (and, if not already on the current view, select) a client as
    /// soon as it's managed, even when `false` and the client landed on a
    /// tag that isn't currently viewed.
    pub follow_new_windows: bool,
    /// Re-viewing the tag that's already selected restores the previous
    /// view instead of being a no-op.
    pub view_tag_toggles: bool,
    /// Include every configured tag in the tag-bar, not just occupied or
    /// in-view ones.
    pub hide_inactive_tags: bool,
    /// Park off-screen clients fully (iconic, moved off-screen) instead of
    /// keeping every tag-visible, non-minimized client positioned in place.
    pub hide_buried_windows: bool,
    pub rules: Vec<Rule>,
    pub layouts: Vec<Box<dyn Layout>>,
    pub key_bindings: KeyBindings,
    pub mouse_bindings: MouseBindings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("tags", &self.tags)
            .field("border_width", &self.border_width)
            .field("snap_distance", &self.snap_distance)
            .field("marked_width", &self.marked_width)
            .field("show_tagbar", &self.show_tagbar)
            .field("layouts", &self.layouts.iter().map(|l| l.symbol()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: ["1", "2", "3", "4", "5", "6", "7", "8", "9"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            palette: Palette::default(),
            border_width: 1,
            snap_distance: 32,
            marked_width: 0.55,
            show_tagbar: true,
            tagbar_on_top: true,
            clientbar_mode: ClientBarMode::Auto,
            bar_font: "monospace:size=10".to_string(),
            resize_hints: true,
            lock_fullscreen: true,
            follow_new_windows: true,
            view_tag_toggles: true,
            hide_inactive_tags: false,
            hide_buried_windows: true,
            rules: Vec::new(),
            layouts: vec![Box::new(Tile), Box::new(Deck), Box::new(Monocle), Box::new(Floating)],
            key_bindings: KeyBindings::default(),
            mouse_bindings: MouseBindings::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(&mut self, tags: Vec<String>) -> &mut Self {
        self.tags = tags;
        self
    }

    pub fn with_palette(&mut self, palette: Palette) -> &mut Self {
        self.palette = palette;
        self
    }

    pub fn with_border_width(&mut self, width: i32) -> &mut Self {
        self.border_width = width;
        self
    }

    pub fn with_snap_distance(&mut self, distance: i32) -> &mut Self {
        self.snap_distance = distance;
        self
    }

    pub fn with_marked_width(&mut self, ratio: f32) -> &mut Self {
        self.marked_width = ratio.clamp(0.05, 0.95);
        self
    }

    pub fn with_show_tagbar(&mut self, show: bool) -> &mut Self {
        self.show_tagbar = show;
        self
    }

    pub fn with_clientbar_mode(&mut self, mode: ClientBarMode) -> &mut Self {
        self.clientbar_mode = mode;
        self
    }

    pub fn with_bar_font(&mut self, font: impl Into<String>) -> &mut Self {
        self.bar_font = font.into();
        self
    }

    pub fn with_resize_hints(&mut self, enabled: bool) -> &mut Self {
        self.resize_hints = enabled;
        self
    }

    pub fn with_lock_fullscreen(&mut self, enabled: bool) -> &mut Self {
        self.lock_fullscreen = enabled;
        self
    }

    pub fn with_follow_new_windows(&mut self, enabled: bool) -> &mut Self {
        self.follow_new_windows = enabled;
        self
    }

    pub fn with_view_tag_toggles(&mut self, enabled: bool) -> &mut Self {
        self.view_tag_toggles = enabled;
        self
    }

    pub fn with_hide_inactive_tags(&mut self, enabled: bool) -> &mut Self {
        self.hide_inactive_tags = enabled;
        self
    }

    pub fn with_hide_buried_windows(&mut self, enabled: bool) -> &mut Self {
        self.hide_buried_windows = enabled;
        self
    }

    pub fn with_rules(&mut self, rules: Vec<Rule>) -> &mut Self {
        self.rules = rules;
        self
    }

    pub fn with_layouts(&mut self, layouts: Vec<Box<dyn Layout>>) -> &mut Self {
        self.layouts = layouts;
        self
    }

    pub fn with_key_bindings(&mut self, bindings: KeyBindings) -> &mut Self {
        self.key_bindings = bindings;
        self
    }

    pub fn with_mouse_bindings(&mut self, bindings: MouseBindings) -> &mut Self {
        self.mouse_bindings = bindings;
        self
    }

    /// Validates that `tags` fits the bit budget before bootstrap builds
    /// the first monitor.
    pub fn validate(&self) -> crate::Result<()> {
        if self.tags.len() > crate::client::MAX_TAGS {
            return Err(crate::Error::TooManyTags(self.tags.len(), crate::client::MAX_TAGS));
        }
        Ok(())
    }
}
