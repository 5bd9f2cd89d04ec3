//! Backend-reported events (spec component 4.H), grounded on the shape of
//! an X11 `XConn`'s event stream but written purely in terms of the data
//! the core actually needs.
use crate::bindings::{ClickTarget, KeyCode, ModMask, MouseButton};
use crate::client::WindowId;
use crate::geometry::Rect;

/// A button press/release reported by the backend, already resolved to the
/// bar region or window it landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub target: ClickTarget,
    pub window: WindowId,
    pub button: MouseButton,
    pub modifiers: ModMask,
    pub root_x: i32,
    pub root_y: i32,
}

/// A `ClientMessage` the backend has decoded down to the one core cares
/// about: a request from a client to change its own state (fullscreen,
/// urgency, active-window activation).
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    RequestFullscreen { window: WindowId, set: bool, toggle: bool },
    RequestActivate { window: WindowId },
}

/// A client's `ConfigureRequest`: it asked to change its own geometry,
/// stacking, or border width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigureRequest {
    pub window: WindowId,
    pub requested: Rect,
    pub border_width: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: ModMask,
}

/// Every event the core control loop reacts to. Backend-specific wire
/// formats (Xlib/XCB event structs) are decoded into this enum before
/// reaching the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum XEvent {
    ButtonPress(ButtonEvent),
    ClientMessage(ClientMessage),
    ConfigureNotify { window: WindowId, geometry: Rect },
    ConfigureRequest(ConfigureRequest),
    DestroyNotify { window: WindowId },
    EnterNotify { window: WindowId, root_x: i32, root_y: i32 },
    Expose { window: WindowId },
    FocusIn { window: WindowId },
    KeyPress(KeyEvent),
    MappingNotify,
    MapRequest { window: WindowId },
    MotionNotify { root_x: i32, root_y: i32 },
    PropertyNotify { window: WindowId, atom: String },
    UnmapNotify { window: WindowId, synthetic: bool },
}
