use super::{master_stack_split, stack_vertically, Layout, LayoutContext, LayoutOutcome};

/// The classic dwm master/stack tile: up to `num_marked_win` clients occupy
/// a master column on the left, the rest share a stack column on the right.
#[derive(Debug, Default)]
pub struct Tile;

impl Layout for Tile {
    fn symbol(&self) -> &str {
        "[]="
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
        rects.extend(stack_vertically(
            stack,
            area,
            area.x + master_w,
            area.w - master_w,
            ctx.border_width,
        ));

        LayoutOutcome {
            rects,
            symbol_override: None,
        }
    }
}
