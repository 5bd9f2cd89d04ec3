//! Fixed color-scheme palette (spec §1 Non-goals: "theming beyond a fixed
//! color-scheme palette").

/// A backend-agnostic RGB color. Allocation into the backend's native pixel
/// format is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One of the two fixed palettes (normal / selected) dwm paints borders,
/// bar text and bar background with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorScheme {
    pub foreground: Color,
    pub background: Color,
    pub border: Color,
}

/// The complete set of color schemes a config must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub normal: ColorScheme,
    pub selected: ColorScheme,
    pub urgent: ColorScheme,
    /// Onscreen but neither selected nor urgent nor minimized — a tiled
    /// client the user isn't currently focused on, or a tab for one.
    pub visible: ColorScheme,
    /// Iconified (`Client::minimized`); still tag-visible so it still gets
    /// a client-bar tab, just painted to read as hidden.
    pub minimized: ColorScheme,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: ColorScheme {
                foreground: Color::rgb(0xbb, 0xbb, 0xbb),
                background: Color::rgb(0x22, 0x22, 0x22),
                border: Color::rgb(0x44, 0x44, 0x44),
            },
            selected: ColorScheme {
                foreground: Color::rgb(0xee, 0xee, 0xee),
                background: Color::rgb(0x00, 0x5f, 0x87),
                border: Color::rgb(0x00, 0x5f, 0x87),
            },
            urgent: ColorScheme {
                foreground: Color::rgb(0xee, 0xee, 0xee),
                background: Color::rgb(0x87, 0x00, 0x00),
                border: Color::rgb(0x87, 0x00, 0x00),
            },
            visible: ColorScheme {
                foreground: Color::rgb(0xcc, 0xcc, 0xcc),
                background: Color::rgb(0x2d, 0x2d, 0x2d),
                border: Color::rgb(0x5f, 0x5f, 0x5f),
            },
            minimized: ColorScheme {
                foreground: Color::rgb(0x77, 0x77, 0x77),
                background: Color::rgb(0x1a, 0x1a, 0x1a),
                border: Color::rgb(0x33, 0x33, 0x33),
            },
        }
    }
}
