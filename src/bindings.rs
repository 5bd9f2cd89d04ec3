//! Key and mouse binding tables (spec §6 External interfaces).
use crate::command::{Arg, Command};

bitflags::bitflags! {
    /// A combination of modifier keys, matched exactly (not as a subset)
    /// against the modifiers reported on a key or button event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ModMask: u8 {
        const SHIFT   = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT     = 0b0000_0100;
        const SUPER   = 0b0000_1000;
    }
}

/// An opaque backend keysym/keycode. The core never interprets this beyond
/// equality; translating a physical key press into one is the backend's
/// job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCode(pub u32);

/// A mouse button, including the scroll wheel's synthetic buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

/// The bar region (or client window) a button click landed in — mirrors
/// dwm's `Clk*` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickTarget {
    TagBar,
    LayoutSymbol,
    StatusText,
    WinTitle,
    ClientBar,
    ClientWindow,
    RootWindow,
}

/// A key press bound to a command.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: ModMask,
    pub key: KeyCode,
    pub command: Command,
    pub arg: Arg,
}

/// A mouse click, scoped to a [`ClickTarget`], bound to a command.
#[derive(Debug, Clone)]
pub struct MouseBinding {
    pub target: ClickTarget,
    pub modifiers: ModMask,
    pub button: MouseButton,
    pub command: Command,
    pub arg: Arg,
}

/// The full key-binding table, matched in definition order (first match
/// wins, matching dwm's linear scan over its static `Key[]`).
#[derive(Debug, Clone, Default)]
pub struct KeyBindings(pub Vec<KeyBinding>);

impl KeyBindings {
    pub fn find(&self, modifiers: ModMask, key: KeyCode) -> Option<&KeyBinding> {
        self.0
            .iter()
            .find(|b| b.modifiers == modifiers && b.key == key)
    }
}

/// The full mouse-binding table.
#[derive(Debug, Clone, Default)]
pub struct MouseBindings(pub Vec<MouseBinding>);

impl MouseBindings {
    pub fn find(
        &self,
        target: ClickTarget,
        modifiers: ModMask,
        button: MouseButton,
    ) -> Option<&MouseBinding> {
        self.0
            .iter()
            .find(|b| b.target == target && b.modifiers == modifiers && b.button == button)
    }
}
