//! The command surface and its tagged-union argument (spec component 4.I).
use std::rc::Rc;

/// A tagged-union argument, matching dwm's `Arg` union: each [`Command`]
/// documents which variant (if any) it expects.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i32),
    UInt(u32),
    Float(f32),
    /// `argv` for [`Command::Spawn`].
    Argv(Rc<[String]>),
    None,
}

impl Arg {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Arg::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Arg::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Arg::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// The full enumerated command surface a key or mouse binding can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Tag-set / view (component F)
    ViewTag,
    ToggleTagView,
    CycleView,
    TagClient,
    ToggleTag,
    ShiftTag,

    // Layout (component D)
    SetLayout,
    AdjustMarkedWidth,
    SetMarkedWidth,

    // Focus / ordering (components B, E)
    CycleFocus,
    CycleStackAreaSelection,
    PushClientLeft,
    PushClientRight,
    FocusClientByIndex,

    // Client state
    ToggleFloating,
    ToggleFullscreen,
    ToggleMark,
    HideWindow,
    ToggleHidden,
    KillClient,

    // Bars
    ToggleTagBar,
    SetClientBarMode,

    // Multi-monitor
    CycleFocusMonitor,
    SendToMonitor,

    // Mouse-driven
    DragWindow,
    ResizeWithMouse,

    // Process / lifecycle
    Spawn,
    Quit,
}
