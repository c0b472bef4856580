//! Sine-path dots across the surface.

use std::f32::consts::PI;

use glam::Vec2;

use crate::dispatcher::RenderContext;
use crate::draw::{hsva, DrawList, Stroke};

/// Vertical swing of the path in pixels
const AMPLITUDE: f32 = 30.0;

fn point(t: f32, phase: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        size.x * t,
        size.y * 0.5 + (t * 4.0 * PI + phase).sin() * AMPLITUDE,
    )
}

/// One dot per band along two periods of a sine, sized by the band value.
///
/// Every third dot is joined to its successor by a faint line.
pub fn waveform(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let n = ctx.values.len();
    let span = n.saturating_sub(1).max(1) as f32;
    let phase = ctx.phase * 0.05;

    for (i, &v) in ctx.values.iter().enumerate() {
        let t = i as f32 / span;
        let pos = point(t, phase, ctx.size);
        let hue = t * 360.0;
        out.circle_filled(pos, 4.0 + v * 20.0, hsva(hue, 255, 255, 100.0 + v * 155.0));

        if i % 3 == 0 && i + 1 < n {
            let next = point((i + 1) as f32 / span, phase, ctx.size);
            out.line(pos, next, Stroke::new(2.0, hsva(hue, 255, 255, 50.0)));
        }
    }
}
