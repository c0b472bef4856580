//! Particle trails.

use crate::dispatcher::RenderContext;
use crate::draw::{hsva, DrawList, Stroke};

/// One short stroke per particle from its previous to its current position.
///
/// Draws nothing until the particle array has been initialised.
pub fn particle_lines(ctx: &RenderContext<'_>, out: &mut DrawList) {
    let particles = ctx.particles.particles();
    if particles.is_empty() {
        return;
    }

    let n = particles.len() as f32;
    let width = 1.0 + (ctx.intensity * 4.0).floor();
    let alpha = 80.0 + ctx.intensity * 150.0;

    for (i, p) in particles.iter().enumerate() {
        let hue = p.speed() * 100.0 + i as f32 * 360.0 / n;
        out.line(
            p.prev_pos * ctx.size,
            p.pos * ctx.size,
            Stroke::new(width, hsva(hue, 200, 255, alpha)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{RenderCapabilities, StatusBarOptions};
    use crate::draw::{DrawCommand, LineCap};
    use crate::particles::ParticleState;
    use bandscope_core::ColorTheme;
    use glam::Vec2;

    fn draw(particles: &ParticleState, intensity: f32) -> DrawList {
        let theme = ColorTheme::default();
        let values = [0.5; 4];
        let ctx = RenderContext {
            values: &values,
            caps: &values,
            intensity,
            phase: 0.0,
            size: Vec2::new(640.0, 480.0),
            theme: &theme,
            status: StatusBarOptions::default(),
            particles,
            capabilities: RenderCapabilities::default(),
        };
        let mut out = DrawList::new();
        particle_lines(&ctx, &mut out);
        out
    }

    #[test]
    fn test_no_particles_draws_nothing() {
        let particles = ParticleState::seeded(0);
        assert!(draw(&particles, 1.0).is_empty());
    }

    #[test]
    fn test_one_line_per_particle_scaled_to_surface() {
        let mut particles = ParticleState::seeded(4);
        particles.reset(25);
        let list = draw(&particles, 0.6);
        assert_eq!(list.len(), 25);

        for (cmd, p) in list.commands().iter().zip(particles.particles()) {
            match cmd {
                DrawCommand::Line { from, to, stroke } => {
                    assert_eq!(*from, p.prev_pos * Vec2::new(640.0, 480.0));
                    assert_eq!(*to, p.pos * Vec2::new(640.0, 480.0));
                    // 1 + floor(0.6 * 4)
                    assert_eq!(stroke.width, 3.0);
                    assert_eq!(stroke.cap, LineCap::Round);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
