//! Styles laid out around the surface centre.
//!
//! Angles are band fractions of a full turn, offset by the phase on the
//! rotating variants. Without vector math the styles that need trigonometry
//! draw rings only.

use ecolor::Color32;
use glam::Vec2;

use super::{center, fraction, half_extent, polar};
use crate::dispatcher::RenderContext;
use crate::draw::{hsva, with_alpha, DrawList, Stroke};

/// Outer radius used by the spiral and its concentric fallback
pub fn spiral_radius(size: Vec2) -> f32 {
    half_extent(size) * 0.85
}

/// Bass-driven ring with an orbit of band dots
pub fn circles(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_r = half_extent(ctx.size);
    let data = ctx.values;
    let n = data.len();

    let bass = data[0] * 0.8 + data.get(1).map_or(0.0, |v| v * 0.2);
    let ring_r = max_r * 0.15 + max_r * 0.7 * bass;
    out.circle(
        c,
        ring_r,
        Some(ctx.theme.primary_with_alpha(60)),
        Stroke::new(3.0, hsva(ctx.phase * 2.0, 255, 255, 255.0)),
    );

    if !ctx.capabilities.vector_math {
        return;
    }

    for (i, &v) in data.iter().enumerate() {
        let angle = fraction(i, n) * 360.0;
        let dist = max_r * 0.75 * (1.0 - fraction(i, n) * 0.5);
        let size = 12.0 + v * 40.0 * ctx.intensity;
        let color = hsva(angle + ctx.phase, 255, 255, 120.0 + v * 135.0);
        out.circle_filled(polar(c, dist, angle), size * 0.5, color);
    }
}

/// Concentric rings shrinking toward the high bands
pub fn energy_rings(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_r = half_extent(ctx.size) * 0.85;
    let n = ctx.values.len();

    for (i, &v) in ctx.values.iter().enumerate() {
        let base = max_r * (1.0 - fraction(i, n) * 0.7);
        let radius = base + max_r * 0.15 * v * ctx.intensity;
        let alpha = 70.0 + v * 185.0;
        let hue = fraction(i, n) * 360.0 + ctx.phase;

        out.circle(
            c,
            radius,
            None,
            Stroke::new(2.0 + v * 5.0, hsva(hue, 255, 255, alpha)),
        );
        out.circle(
            c,
            radius * 0.8,
            None,
            Stroke::new(1.0, hsva(hue, 255, 200, alpha * 0.3)),
        );
    }
}

/// Rays from the centre, one per band
pub fn pulsar(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_r = half_extent(ctx.size) * 0.8;
    let n = ctx.values.len();

    for (i, &v) in ctx.values.iter().enumerate() {
        let angle = fraction(i, n) * 360.0;
        let end = polar(c, max_r * (0.3 + v * 0.7), angle);
        let color = hsva(angle + ctx.phase, 255, 255, 150.0 + v * 105.0);
        out.line(c, end, Stroke::new(2.0 + v * 8.0, color));
    }
}

/// Dots along a two-turn spiral rotating with the phase
pub fn spiral(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_r = spiral_radius(ctx.size);
    let n = ctx.values.len();

    for (i, &v) in ctx.values.iter().enumerate() {
        let t = fraction(i, n);
        let radius = max_r * t * (0.4 + v * 0.6);
        let angle = t * 720.0 + ctx.phase;
        let size = 4.0 + v * 16.0;
        let color = hsva(angle, 255, 255, 120.0 + v * 135.0);
        out.circle_filled(polar(c, radius, angle), size * 0.5, color);
    }
}

/// Plumes of fading particles thrown upward from the centre
pub fn volcano(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_h = ctx.size.y * 0.45;
    let n = ctx.values.len();

    for (i, &v) in ctx.values.iter().enumerate() {
        let angle = fraction(i, n) * 360.0;
        let height = max_h * v * (0.5 + ctx.intensity * 0.5);
        let hue = angle + ctx.phase;

        for j in 0..5 {
            let step = j as f32 / 5.0;
            let spread = angle + (j as f32 - 2.0) * 15.0;
            let (sin, cos) = spread.to_radians().sin_cos();
            let dist = height * step;
            // Screen y points down; subtract so plumes rise
            let pos = Vec2::new(c.x + dist * cos, c.y - dist * sin);
            let color = hsva(hue, 255, 255, 200.0 * (1.0 - step));
            out.circle_filled(pos, 3.0 * (1.0 - step), color);
        }
    }
}

/// Thick beams meeting at the centre, with a glow where they collide
pub fn beam_collision(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let n = ctx.values.len();

    if ctx.capabilities.vector_math {
        let max_len = ctx.size.min_element() * 0.6;
        for (i, &v) in ctx.values.iter().enumerate() {
            let angle = fraction(i, n) * 360.0 + ctx.phase * 0.5;
            let end = polar(c, max_len * (0.2 + v * 0.8), angle);
            let color = hsva(angle, 200, 255, 120.0 + v * 135.0);
            out.line(c, end, Stroke::new(4.0 + v * 10.0, color).flat());
        }
    } else {
        concentric(ctx, half_extent(ctx.size) * 0.6, out);
    }

    for k in 0..3 {
        let t = (ctx.phase * 0.2 + k as f32).rem_euclid(1.0);
        let idx = ((t * n as f32) as usize).min(n - 1);
        let val = ctx.values[idx];
        let color = hsva(fraction(idx, n) * 360.0, 255, 255, 180.0 + val * 75.0);
        out.circle_filled(c, 6.0, color);
    }
}

/// Polar grid rings with band-length spokes
pub fn radial_grid(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let c = center(ctx.size);
    let max_r = half_extent(ctx.size) * 0.9;
    let n = ctx.values.len();

    const RINGS: usize = 6;
    for r in 1..=RINGS {
        let frac = r as f32 / RINGS as f32;
        let color = with_alpha(Color32::from_rgb(200, 200, 200), 30.0 + frac * 100.0);
        out.circle(c, frac * max_r, None, Stroke::new(1.0, color));
    }

    if !ctx.capabilities.vector_math {
        return;
    }

    for (i, &v) in ctx.values.iter().enumerate() {
        let angle = fraction(i, n) * 360.0 + ctx.phase;
        let end = polar(c, max_r * (0.15 + v * 0.85), angle);
        let color = hsva(fraction(i, n) * 360.0, 200, 255, 110.0 + v * 120.0);
        out.line(c, end, Stroke::new(2.0, color));
    }
}

/// Fallback: one outlined circle per band, radius growing with index and value
pub fn concentric(ctx: &RenderContext<'_>, max_r: f32, out: &mut DrawList) {
    let c = center(ctx.size);
    let n = ctx.values.len();

    for (i, &v) in ctx.values.iter().enumerate() {
        let radius = max_r * fraction(i, n) * (0.3 + v * 0.7);
        let color = hsva(fraction(i, n) * 360.0, 255, 255, 100.0 + v * 155.0);
        out.circle(c, radius, None, Stroke::new(2.0, color));
    }
}
