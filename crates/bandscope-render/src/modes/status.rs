//! Compact status-bar style with peak caps.
//!
//! Bars stand on a 10% bottom margin and may reach 90% of the height. The
//! lowest 30% of the bands get a bass boost of up to 20%.

use bandscope_core::{BarColoring, StatusBarFill};
use ecolor::Color32;
use glam::Vec2;

use super::{bar_span, fraction};
use crate::dispatcher::RenderContext;
use crate::draw::{hsva, with_alpha, DrawList, Stroke};

const GAP: f32 = 2.0;
const MIN_BAR_HEIGHT: f32 = 3.0;
const BAR_ALPHA: f32 = 230.0;
const CAP_HEIGHT: f32 = 2.0;

/// Five-stop palette for [`BarColoring::Gradient`]
const GRADIENT: [Color32; 5] = [
    Color32::from_rgb(0x00, 0x66, 0xFF),
    Color32::from_rgb(0x00, 0xCC, 0xFF),
    Color32::from_rgb(0x00, 0xFF, 0x00),
    Color32::from_rgb(0xFF, 0xFF, 0x00),
    Color32::from_rgb(0xFF, 0x00, 0x66),
];

struct BarColors {
    bar: Color32,
    cap: Color32,
    /// Opaque base colour for the cap line
    solid: Color32,
}

fn bar_colors(ctx: &RenderContext<'_>, index: usize, count: usize) -> BarColors {
    match ctx.status.coloring {
        BarColoring::Rainbow => {
            let hue = fraction(index, count) * 360.0;
            let solid = hsva(hue, 255, 255, 255.0);
            BarColors {
                bar: with_alpha(solid, BAR_ALPHA),
                cap: solid,
                solid,
            }
        }
        BarColoring::Gradient => {
            let stop = gradient_stop(index, count);
            BarColors {
                bar: with_alpha(stop, BAR_ALPHA),
                cap: stop,
                solid: stop,
            }
        }
        BarColoring::Theme => BarColors {
            bar: ctx.theme.bar_color(),
            cap: ctx.theme.cap_color(),
            solid: ctx.theme.primary_with_alpha(u8::MAX),
        },
    }
}

/// Palette stop for bar `index`: `floor(index / count * 4)`
fn gradient_stop(index: usize, count: usize) -> Color32 {
    let idx = (fraction(index, count) * (GRADIENT.len() - 1) as f32) as usize;
    GRADIENT[idx.min(GRADIENT.len() - 1)]
}

/// Height multiplier favouring the bass end
fn bass_boost(index: usize, count: usize) -> f32 {
    let knee = count as f32 * 0.3;
    if knee <= 0.0 {
        return 1.0;
    }
    1.0 + (1.0 - (index as f32).min(knee) / knee) * 0.2
}

/// Bars with peak caps, filled and coloured per the status options
pub fn status_bars(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let (w, h) = (ctx.size.x, ctx.size.y);
    let n = ctx.values.len();
    let max_h = (h * 0.9).floor();
    let bottom = h * 0.1;
    let imul = ctx.intensity + 0.3;

    for (i, &v) in ctx.values.iter().enumerate() {
        let boost = bass_boost(i, n);
        let height = (v * max_h * imul * boost)
            .floor()
            .clamp(MIN_BAR_HEIGHT.min(max_h), max_h);
        let cap = ctx.caps.get(i).copied().unwrap_or(0.0);
        let cap_height = (cap * max_h * imul * boost).floor().clamp(0.0, max_h);

        let (x, next) = bar_span(i, n, w);
        let draw_w = (next - x - GAP).max(1.0);
        let x0 = x + 1.0;
        let y = (h - bottom - height).floor();
        let cap_y = (h - bottom - cap_height).floor();

        let colors = bar_colors(ctx, i, n);
        let bar = (Vec2::new(x0, y), Vec2::new(draw_w, height));
        fill_bar(ctx.status.fill, bar, colors.bar, out);

        if ctx.status.fill == StatusBarFill::SolidWithCap {
            out.line(
                Vec2::new(x0, cap_y),
                Vec2::new(x0 + draw_w, cap_y),
                Stroke::new(1.0, colors.solid).flat(),
            );
        } else if cap_height > height {
            out.rect(
                Vec2::new(x0, cap_y),
                Vec2::new(draw_w, CAP_HEIGHT),
                colors.cap,
            );
        }
    }
}

fn fill_bar(fill: StatusBarFill, (min, size): (Vec2, Vec2), color: Color32, out: &mut DrawList) {
    let (x, y, w, h) = (min.x, min.y, size.x, size.y);
    match fill {
        StatusBarFill::Solid | StatusBarFill::SolidWithCap => {
            out.rect(min, size, color);
        }
        StatusBarFill::Striped => {
            let mut sy = y;
            while sy < y + h {
                let stripe = (y + h - sy).min(2.0);
                out.rect(Vec2::new(x, sy), Vec2::new(w, stripe), color);
                sy += 4.0;
            }
        }
        StatusBarFill::Dotted => {
            let mut dy = y;
            while dy < y + h {
                let mut dx = x;
                while dx < x + w {
                    out.circle_filled(Vec2::new(dx + 1.5, dy + 1.5), 1.5, color);
                    dx += 5.0;
                }
                dy += 5.0;
            }
        }
    }
}
