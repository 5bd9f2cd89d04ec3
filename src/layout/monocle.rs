use super::{Layout, LayoutContext, LayoutOutcome, OnscreenPolicy};
use crate::geometry::Rect;

/// Every tiled client occupies the full work area; only the onscreen one
/// (the selection) is actually visible.
#[derive(Debug, Default)]
pub struct Monocle;

impl Layout for Monocle {
    fn symbol(&self) -> &str {
        "[M]"
    }

    fn onscreen_policy(&self) -> OnscreenPolicy {
        OnscreenPolicy::SelectionOnly
    }

    fn arrange(&self, ctx: &LayoutContext) -> LayoutOutcome {
        if ctx.candidates.is_empty() {
            return LayoutOutcome::default();
        }

        let area = ctx.work_area;
        let rect = Rect::new(
            area.x,
            area.y,
            (area.w - 2 * ctx.border_width).max(1),
            (area.h - 2 * ctx.border_width).max(1),
        );
        let rects = ctx.candidates.iter().map(|&id| (id, rect)).collect();

        LayoutOutcome {
            rects,
            symbol_override: Some(format!("[{}]", ctx.candidates.len())),
        }
    }
}
