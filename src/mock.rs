//! An in-memory [`DisplayBackend`] for exercising the dispatcher, `arrange`
//! and focus logic without a real display server, grounded on the
//! teacher's `x::mock::MockXConn`. Unlike the teacher's trait-forwarding
//! shape (built for a `&self`-based `XConn`), `DisplayBackend` takes
//! `&mut self` throughout, so `MockBackend` just keeps its world in plain
//! fields instead of behind interior mutability.
use std::collections::{HashMap, VecDeque};

use crate::backend::{
    CursorShape, DisplayBackend, FontMetrics, WindowInfo, WinKind,
};
use crate::bindings::{ClickTarget, KeyCode, ModMask, MouseButton};
use crate::client::WindowId;
use crate::color::Color;
use crate::event::XEvent;
use crate::geometry::Rect;
use crate::{Error, Result};

/// A single mocked window's backend-visible attributes.
#[derive(Debug, Clone, Default)]
pub struct MockWindow {
    pub geometry: Rect,
    pub border_width: u32,
    pub border_color: Option<Color>,
    pub mapped: bool,
    pub info: WindowInfo,
}

/// A scripted, in-memory display connection.
///
/// Tests seed `screens`, `windows` and `events`, then drive a
/// [`crate::manager::WindowManager<MockBackend>`] through `bootstrap`/
/// `handle_event` and assert against `drawn`/`windows` afterward.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub root: WindowId,
    pub screens: Vec<Rect>,
    pub windows: HashMap<WindowId, MockWindow>,
    pub events: VecDeque<XEvent>,
    pub next_window_id: WindowId,
    pub cursor: (i32, i32),
    pub font_height: i32,
    /// Every `draw_text` call, in order, for assertions on bar content.
    pub drawn_text: Vec<String>,
    pub raised: Vec<WindowId>,
    pub focused: Option<WindowId>,
}

impl MockBackend {
    pub fn new(screens: Vec<Rect>) -> Self {
        Self {
            root: 0,
            screens,
            windows: HashMap::new(),
            events: VecDeque::new(),
            next_window_id: 1,
            cursor: (0, 0),
            font_height: 12,
            drawn_text: Vec::new(),
            raised: Vec::new(),
            focused: None,
        }
    }

    /// Register a pre-existing mapped window, as if it were present before
    /// the manager connected, returning its handle.
    pub fn add_existing_window(&mut self, info: WindowInfo, geometry: Rect) -> WindowId {
        let id = self.next_window_id;
        self.next_window_id += 1;
        self.windows.insert(
            id,
            MockWindow {
                geometry,
                mapped: true,
                info,
                ..Default::default()
            },
        );
        id
    }

    pub fn push_event(&mut self, event: XEvent) {
        self.events.push_back(event);
    }
}

impl DisplayBackend for MockBackend {
    fn root(&self) -> WindowId {
        self.root
    }

    fn next_event(&mut self) -> Result<XEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| Error::Backend("no scripted events remain".into()))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn screen_rects(&self) -> Result<Vec<Rect>> {
        Ok(self.screens.clone())
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        Ok(self.cursor)
    }

    fn warp_pointer(&mut self, _window: WindowId, x: i32, y: i32) -> Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn create_window(&mut self, _kind: WinKind, geometry: Rect) -> Result<WindowId> {
        let id = self.next_window_id;
        self.next_window_id += 1;
        self.windows.insert(
            id,
            MockWindow {
                geometry,
                ..Default::default()
            },
        );
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<()> {
        self.windows.remove(&window);
        Ok(())
    }

    fn map_window(&mut self, window: WindowId) -> Result<()> {
        if let Some(w) = self.windows.get_mut(&window) {
            w.mapped = true;
        }
        Ok(())
    }

    fn unmap_window(&mut self, window: WindowId) -> Result<()> {
        if let Some(w) = self.windows.get_mut(&window) {
            w.mapped = false;
        }
        Ok(())
    }

    fn existing_windows(&self) -> Result<Vec<WindowId>> {
        Ok(self
            .windows
            .iter()
            .filter(|(_, w)| w.mapped)
            .map(|(&id, _)| id)
            .collect())
    }

    fn move_resize(&mut self, window: WindowId, geometry: Rect) -> Result<()> {
        if let Some(w) = self.windows.get_mut(&window) {
            w.geometry = geometry;
        }
        Ok(())
    }

    fn set_border_width(&mut self, window: WindowId, width: u32) -> Result<()> {
        if let Some(w) = self.windows.get_mut(&window) {
            w.border_width = width;
        }
        Ok(())
    }

    fn set_border_color(&mut self, window: WindowId, color: Color) -> Result<()> {
        if let Some(w) = self.windows.get_mut(&window) {
            w.border_color = Some(color);
        }
        Ok(())
    }

    fn raise_window(&mut self, window: WindowId) -> Result<()> {
        self.raised.push(window);
        Ok(())
    }

    fn stack_below(&mut self, _window: WindowId, _sibling: WindowId) -> Result<()> {
        Ok(())
    }

    fn send_configure_notify(&mut self, _window: WindowId, _geometry: Rect, _border_width: i32) -> Result<()> {
        Ok(())
    }

    fn kill_client(&mut self, window: WindowId) -> Result<()> {
        self.windows.remove(&window);
        Ok(())
    }

    fn set_input_focus(&mut self, window: WindowId) -> Result<()> {
        self.focused = Some(window);
        Ok(())
    }

    fn clear_input_focus(&mut self) -> Result<()> {
        self.focused = None;
        Ok(())
    }

    fn window_info(&self, window: WindowId) -> Result<WindowInfo> {
        self.windows
            .get(&window)
            .map(|w| w.info.clone())
            .ok_or_else(|| Error::Backend(format!("no such window: {window}")))
    }

    fn set_text_property(&mut self, _window: WindowId, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn set_window_list_property(&mut self, _window: WindowId, _name: &str, _windows: &[WindowId]) -> Result<()> {
        Ok(())
    }

    fn set_wm_state(&mut self, _window: WindowId, _iconic: bool) -> Result<()> {
        Ok(())
    }

    fn supports_protocol(&self, _window: WindowId, _protocol: &str) -> Result<bool> {
        Ok(false)
    }

    fn send_protocol_message(&mut self, _window: WindowId, _protocol: &str) -> Result<()> {
        Ok(())
    }

    fn grab_keys(&mut self, _window: WindowId, _keys: &[KeyCode]) -> Result<()> {
        Ok(())
    }

    fn grab_buttons(&mut self, _window: WindowId, _buttons: &[(ClickTarget, ModMask, MouseButton)]) -> Result<()> {
        Ok(())
    }

    fn ungrab_buttons(&mut self, _window: WindowId) -> Result<()> {
        Ok(())
    }

    fn grab_pointer_for_drag(&mut self, _cursor: CursorShape) -> Result<()> {
        Ok(())
    }

    fn ungrab_pointer(&mut self) -> Result<()> {
        Ok(())
    }

    fn grab_server(&mut self) -> Result<()> {
        Ok(())
    }

    fn ungrab_server(&mut self) -> Result<()> {
        Ok(())
    }

    fn install_error_handler(&mut self, _permissive: bool) {}

    fn font_metrics(&self) -> Result<FontMetrics> {
        Ok(FontMetrics { height: self.font_height })
    }

    fn text_width(&self, text: &str) -> Result<i32> {
        Ok(text.chars().count() as i32 * 6)
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color, _filled: bool) {}

    fn draw_text(&mut self, _pos: (i32, i32), text: &str, _fg: Color, _bg: Color) {
        self.drawn_text.push(text.to_string());
    }

    fn clear(&mut self, _rect: Rect, _color: Color) {}

    fn present(&mut self, _window: WindowId) -> Result<()> {
        Ok(())
    }
}
