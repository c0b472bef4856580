//! Full-surface bar styles.

use glam::Vec2;

use super::{bar_span, fraction};
use crate::dispatcher::RenderContext;
use crate::draw::{hsva, DrawList};

/// Height of the highlight strip on tall spectrum bars
const GLOW_HEIGHT: f32 = 3.0;

/// Vertical bars rising from the bottom edge, hue sweeping left to right
pub fn spectrum(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let (w, h) = (ctx.size.x, ctx.size.y);
    let n = ctx.values.len();
    let gain = h * 0.95 * (ctx.intensity * 1.1 + 0.3);

    for (i, &v) in ctx.values.iter().enumerate() {
        let (x, next) = bar_span(i, n, w);
        let bar_w = (next - x - 2.0).max(1.0);
        let bar_h = (v * gain).floor().min(h);
        let y = h - bar_h;

        let hue = fraction(i, n) * 360.0;
        let alpha = 120.0 + v * 135.0;
        out.rect(
            Vec2::new(x + 1.0, y),
            Vec2::new(bar_w, bar_h),
            hsva(hue, 255, 255, alpha),
        );

        if bar_h > 10.0 {
            out.rect(
                Vec2::new(x + 1.0, y),
                Vec2::new(bar_w, GLOW_HEIGHT),
                hsva(hue, 100, 255, alpha * 0.5),
            );
        }
    }
}

/// Bars mirrored around the horizontal midline, complementary hues below
pub fn dual_spectrum(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let (w, h) = (ctx.size.x, ctx.size.y);
    let n = ctx.values.len();
    let mid = (h * 0.5).floor();
    let gain = h * 0.45 * (0.6 + ctx.intensity * 0.6);
    // Both halves stay on the surface
    let limit = (h - mid - 1.0).min(mid).max(0.0);

    for (i, &v) in ctx.values.iter().enumerate() {
        let (x, next) = bar_span(i, n, w);
        let bar_w = (next - x - 2.0).max(1.0);
        let bar_h = (v * gain).floor().min(limit);

        let hue = fraction(i, n) * 360.0;
        let alpha = 140.0 + v * 115.0;
        out.rect(
            Vec2::new(x + 1.0, mid - bar_h),
            Vec2::new(bar_w, bar_h),
            hsva(hue, 220, 255, alpha),
        );
        out.rect(
            Vec2::new(x + 1.0, mid + 1.0),
            Vec2::new(bar_w, bar_h),
            hsva(hue + 180.0, 220, 255, alpha),
        );
    }
}
