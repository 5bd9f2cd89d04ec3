//! Screen-space rectangles and ICCCM size-hint solving (spec component 4.A).

/// An axis-aligned rectangle in root-window coordinates.
///
/// `x`/`y` may be negative (used to park windows off-screen); `w`/`h` are
/// always clamped to at least `1` by [`apply_size_hints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The total width including both sides of a border of the given width.
    pub fn total_width(&self, border_width: i32) -> i32 {
        self.w + 2 * border_width
    }

    /// The total height including both sides of a border of the given width.
    pub fn total_height(&self, border_width: i32) -> i32 {
        self.h + 2 * border_width
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Overlapping area between `self` and `other`, following dwm's
    /// `INTERSECT` macro: zero when the rectangles do not overlap.
    pub fn intersection_area(&self, other: &Rect) -> i64 {
        let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        if w <= 0 || h <= 0 {
            0
        } else {
            w as i64 * h as i64
        }
    }
}

/// ICCCM `WM_NORMAL_HINTS` fields relevant to size-hint solving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl Default for SizeHints {
    fn default() -> Self {
        Self {
            base_w: 0,
            base_h: 0,
            inc_w: 0,
            inc_h: 0,
            min_w: 0,
            min_h: 0,
            max_w: 0,
            max_h: 0,
            min_aspect: 0.0,
            max_aspect: 0.0,
        }
    }
}

impl SizeHints {
    /// A window is fixed-size when min and max dimensions agree and are set.
    pub fn is_fixed(&self) -> bool {
        self.max_w > 0 && self.max_w == self.min_w && self.max_h > 0 && self.max_h == self.min_h
    }
}

/// Solve a proposed geometry against containment bounds and (optionally)
/// ICCCM size hints, in the order laid out by spec component 4.A.
///
/// Returns `Some(rect)` with the adjusted geometry if it differs from
/// `proposed`, or `None` if `proposed` already satisfies every constraint.
#[allow(clippy::too_many_arguments)]
pub fn apply_size_hints(
    proposed: Rect,
    border_width: i32,
    hints: &SizeHints,
    bar_height: i32,
    bounds: Rect,
    interact: bool,
    apply_hints: bool,
) -> Option<Rect> {
    let mut x = proposed.x;
    let mut y = proposed.y;
    let mut w = proposed.w.max(1);
    let mut h = proposed.h.max(1);

    // 2. containment: clip against the full screen when dragging
    // interactively, otherwise against the monitor's work area.
    // `bounds` is the full screen when `interact` is true and the monitor's
    // work area otherwise; the caller picks which to pass.
    let _ = interact;
    let area = bounds;
    let total_w = w + 2 * border_width;
    let total_h = h + 2 * border_width;
    if x > area.x + area.w {
        x = area.x + area.w - total_w;
    }
    if y > area.y + area.h {
        y = area.y + area.h - total_h;
    }
    if x + total_w < area.x {
        x = area.x;
    }
    if y + total_h < area.y {
        y = area.y;
    }

    // 3. never shrink a window below the bar height.
    w = w.max(bar_height.max(1));
    h = h.max(bar_height.max(1));

    // 4. ICCCM size-hint solving.
    if apply_hints {
        let base_is_min = hints.base_w == hints.min_w && hints.base_h == hints.min_h;

        // (a) temporarily remove base dimensions when base == min.
        if base_is_min {
            w -= hints.base_w;
            h -= hints.base_h;
        }

        // (b) aspect-ratio clamp.
        if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 && h != 0 && w != 0 {
            let ratio = w as f32 / h as f32;
            if hints.max_aspect < ratio {
                w = (h as f32 * hints.max_aspect + 0.5) as i32;
            } else if hints.min_aspect < 1.0 / ratio {
                h = (w as f32 * hints.min_aspect + 0.5) as i32;
            }
        }

        // (c) quantize by the resize increment.
        if hints.inc_w > 0 {
            w -= w % hints.inc_w;
        }
        if hints.inc_h > 0 {
            h -= h % hints.inc_h;
        }

        // (d) restore base dimensions and clamp to [min, max].
        w = (w + hints.base_w).max(hints.min_w);
        h = (h + hints.base_h).max(hints.min_h);
        if hints.max_w > 0 {
            w = w.min(hints.max_w);
        }
        if hints.max_h > 0 {
            h = h.min(hints.max_h);
        }
    }

    w = w.max(1);
    h = h.max(1);

    if x == proposed.x && y == proposed.y && w == proposed.w && h == proposed.h {
        None
    } else {
        Some(Rect { x, y, w, h })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(min_w: i32, min_h: i32, max_w: i32, max_h: i32, inc_w: i32, inc_h: i32) -> SizeHints {
        SizeHints {
            base_w: min_w,
            base_h: min_h,
            inc_w,
            inc_h,
            min_w,
            min_h,
            max_w,
            max_h,
            min_aspect: 0.0,
            max_aspect: 0.0,
        }
    }

    #[test]
    fn unchanged_geometry_returns_none() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(10, 10, 400, 300);
        let h = hints(1, 1, 0, 0, 0, 0);
        assert_eq!(apply_size_hints(r, 1, &h, 0, bounds, false, true), None);
    }

    #[test]
    fn clamps_below_minimum() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(10, 10, 10, 10);
        let h = hints(100, 80, 0, 0, 0, 0);
        let out = apply_size_hints(r, 1, &h, 0, bounds, false, true).unwrap();
        assert_eq!(out.w, 100);
        assert_eq!(out.h, 80);
    }

    #[test]
    fn clamps_above_maximum() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(10, 10, 5000, 5000);
        let h = hints(1, 1, 800, 600, 0, 0);
        let out = apply_size_hints(r, 1, &h, 0, bounds, false, true).unwrap();
        assert_eq!(out.w, 800);
        assert_eq!(out.h, 600);
    }

    #[test]
    fn increment_quantizes_down() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(0, 0, 123, 123);
        let h = hints(0, 0, 0, 0, 10, 10);
        let out = apply_size_hints(r, 0, &h, 0, bounds, false, true).unwrap();
        assert_eq!(out.w, 120);
        assert_eq!(out.h, 120);
    }

    #[test]
    fn off_screen_geometry_is_pulled_back_into_bounds() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(5000, 5000, 400, 300);
        let h = hints(1, 1, 0, 0, 0, 0);
        let out = apply_size_hints(r, 0, &h, 0, bounds, false, true).unwrap();
        assert_eq!(out.x, bounds.x + bounds.w - 400);
        assert_eq!(out.y, bounds.y + bounds.h - 300);
    }

    #[test]
    fn hints_skipped_when_apply_hints_is_false() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let r = Rect::new(0, 0, 123, 123);
        let h = hints(0, 0, 0, 0, 10, 10);
        assert_eq!(apply_size_hints(r, 0, &h, 0, bounds, false, false), None);
    }

    #[quickcheck_macros::quickcheck]
    fn width_and_height_are_always_positive(x: i32, y: i32, w: i32, h: i32) -> bool {
        let bounds = Rect::new(0, 0, 1920, 1080);
        let hints = SizeHints::default();
        let r = Rect::new(x % 4000, y % 4000, w % 2000, h % 2000);
        let out = apply_size_hints(r, 1, &hints, 0, bounds, false, true).unwrap_or(r);
        out.w >= 1 && out.h >= 1
    }
}
