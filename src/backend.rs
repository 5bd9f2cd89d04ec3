//! The abstract display-server collaborator (spec §6 External interfaces).
//!
//! `wyndow-core` never opens a connection, parses a wire protocol, or draws
//! a pixel itself; every side effect is reached through [`DisplayBackend`],
//! grounded on the teacher's `x::XConn` trait and generalized to the
//! vocabulary the specification names.
use crate::bindings::{ClickTarget, KeyCode, ModMask, MouseButton};
use crate::client::WindowId;
use crate::color::Color;
use crate::event::XEvent;
use crate::geometry::{Rect, SizeHints};
use crate::Result;

/// The kind of top-level window to create — used only for the manager's
/// own bar windows, never for client windows (those arrive via
/// `MapRequest`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinKind {
    TagBar,
    ClientBar,
}

/// `_NET_WM_WINDOW_TYPE` boiled down to the handful of hints the core acts
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowTypeHint {
    #[default]
    Normal,
    Dialog,
    Splash,
    Utility,
}

/// ICCCM `WM_HINTS` fields the core consults while managing a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WmHints {
    pub urgent: bool,
    pub never_focus: bool,
}

/// Everything the core needs to know about a freshly mapped window, read
/// once in `manage()`.
#[derive(Debug, Clone, Default)]
pub struct WindowInfo {
    pub title: String,
    pub class: String,
    pub instance: String,
    pub size_hints: SizeHints,
    pub wm_hints: WmHints,
    pub transient_for: Option<WindowId>,
    pub window_type: WindowTypeHint,
    pub fixed_position: Option<Rect>,
}

/// The glyph metrics of the currently loaded bar font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub height: i32,
}

/// The pointer shape shown while a drag/resize grab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Normal,
    Move,
    Resize,
}

/// A backend connection to a display server.
///
/// Every mutating method returns `Result<()>` (or a value); per spec §7 the
/// dispatcher treats a routine failure (a bad-window race against a client
/// that just withdrew itself) by logging and continuing rather than
/// propagating it out of the event loop. Only the initial connect/scan in
/// `bootstrap.rs` treats a backend error as fatal.
pub trait DisplayBackend {
    // -- connection -----------------------------------------------------
    fn root(&self) -> WindowId;
    fn next_event(&mut self) -> Result<XEvent>;
    fn flush(&mut self) -> Result<()>;

    // -- multi-head -------------------------------------------------------
    fn screen_rects(&self) -> Result<Vec<Rect>>;
    fn cursor_position(&self) -> Result<(i32, i32)>;
    fn warp_pointer(&mut self, window: WindowId, x: i32, y: i32) -> Result<()>;

    // -- window lifecycle -------------------------------------------------
    fn create_window(&mut self, kind: WinKind, geometry: Rect) -> Result<WindowId>;
    fn destroy_window(&mut self, window: WindowId) -> Result<()>;
    fn map_window(&mut self, window: WindowId) -> Result<()>;
    fn unmap_window(&mut self, window: WindowId) -> Result<()>;
    fn existing_windows(&self) -> Result<Vec<WindowId>>;

    // -- geometry / stacking ----------------------------------------------
    fn move_resize(&mut self, window: WindowId, geometry: Rect) -> Result<()>;
    fn set_border_width(&mut self, window: WindowId, width: u32) -> Result<()>;
    fn set_border_color(&mut self, window: WindowId, color: Color) -> Result<()>;
    fn raise_window(&mut self, window: WindowId) -> Result<()>;
    fn stack_below(&mut self, window: WindowId, sibling: WindowId) -> Result<()>;
    fn send_configure_notify(&mut self, window: WindowId, geometry: Rect, border_width: i32) -> Result<()>;

    // -- client lifecycle ---------------------------------------------------
    fn kill_client(&mut self, window: WindowId) -> Result<()>;
    fn set_input_focus(&mut self, window: WindowId) -> Result<()>;
    fn clear_input_focus(&mut self) -> Result<()>;
    fn window_info(&self, window: WindowId) -> Result<WindowInfo>;

    // -- properties -----------------------------------------------------
    fn set_text_property(&mut self, window: WindowId, name: &str, value: &str) -> Result<()>;
    fn set_window_list_property(&mut self, window: WindowId, name: &str, windows: &[WindowId]) -> Result<()>;
    fn set_wm_state(&mut self, window: WindowId, iconic: bool) -> Result<()>;
    fn supports_protocol(&self, window: WindowId, protocol: &str) -> Result<bool>;
    fn send_protocol_message(&mut self, window: WindowId, protocol: &str) -> Result<()>;

    // -- grabs ------------------------------------------------------------
    fn grab_keys(&mut self, window: WindowId, keys: &[KeyCode]) -> Result<()>;
    fn grab_buttons(&mut self, window: WindowId, buttons: &[(ClickTarget, ModMask, MouseButton)]) -> Result<()>;
    fn ungrab_buttons(&mut self, window: WindowId) -> Result<()>;
    fn grab_pointer_for_drag(&mut self, cursor: CursorShape) -> Result<()>;
    fn ungrab_pointer(&mut self) -> Result<()>;
    fn grab_server(&mut self) -> Result<()>;
    fn ungrab_server(&mut self) -> Result<()>;

    // -- misc ---------------------------------------------------------------
    fn install_error_handler(&mut self, permissive: bool);

    // -- drawing --------------------------------------------------------
    fn font_metrics(&self) -> Result<FontMetrics>;
    fn text_width(&self, text: &str) -> Result<i32>;
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool);
    fn draw_text(&mut self, pos: (i32, i32), text: &str, fg: Color, bg: Color);
    fn clear(&mut self, rect: Rect, color: Color);
    fn present(&mut self, window: WindowId) -> Result<()>;
}

/// RAII guard around a server grab (`DisplayBackend::grab_server`), used to
/// bracket check-then-mutate sequences (unmanage, monitor reconcile) so a
/// client can't slip a request in between the check and the mutation.
pub struct ServerGrab<'a, B: DisplayBackend> {
    backend: &'a mut B,
}

impl<'a, B: DisplayBackend> ServerGrab<'a, B> {
    pub fn acquire(backend: &'a mut B) -> Result<Self> {
        backend.grab_server()?;
        Ok(Self { backend })
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<'a, B: DisplayBackend> Drop for ServerGrab<'a, B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.ungrab_server() {
            tracing::warn!(error = %e, "failed to ungrab server");
        }
    }
}

/// Backend-side cleanup run when the manager is shutting down gracefully
/// (component J's mirror image).
pub trait Cleanup {
    fn cleanup(&mut self) -> Result<()>;
}
