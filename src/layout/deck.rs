use super::{master_stack_split, stack_vertically, Layout, LayoutContext, LayoutOutcome, OnscreenPolicy};
use crate::geometry::Rect;

/// Like [`super::Tile`], but the stack column collapses onto a single
/// full-height rectangle shared by every stacked client; only the one that
/// is actually onscreen gets mapped there (see `arrange.rs`'s
/// `update_onscreen`).
#[derive(Debug, Default)]
pub struct Deck;

impl Layout for Deck {
    fn symbol(&self) -> &str {
        "D[]"
    }

    fn onscreen_policy(&self) -> OnscreenPolicy {
        OnscreenPolicy::MarkedOrSelection
    }

    fn arrange(&self, ctx: &LayoutContext) -> LayoutOutcome {
        if ctx.candidates.is_empty() {
            return LayoutOutcome::default();
        }

        let (master, stack) = master_stack_split(ctx.candidates, ctx.num_marked_win);
        let area = ctx.work_area;

        let master_w = if stack.is_empty() {
            area.w
        } else if !master.is_empty() {
            ((area.w as f32) * ctx.marked_width).round() as i32
        } else {
            0
        };

        let mut rects = stack_vertically(master, area, area.x, master_w, ctx.border_width);

        if !stack.is_empty() {
            let stack_rect = Rect::new(
                area.x + master_w,
                area.y,
                (area.w - master_w - 2 * ctx.border_width).max(1),
                (area.h - 2 * ctx.border_width).max(1),
            );
            rects.extend(stack.iter().map(|&id| (id, stack_rect)));
        }

        LayoutOutcome {
            rects,
            symbol_override: Some(format!("D {}", stack.len())),
        }
    }
}
