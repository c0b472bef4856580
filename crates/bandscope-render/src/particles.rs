//! Particle system behind the "Lines" style.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Per-tick velocity retention
const DAMPING: f32 = 0.93;
/// Strength of the pull toward the centre at zero intensity
const CENTER_PULL: f32 = 0.001;
/// Time scale converting seconds into simulation steps
const SPEED_SCALE: f32 = 120.0;
/// Positions are kept inside [MIN_POS, MAX_POS] on both axes
const MIN_POS: f32 = 0.01;
const MAX_POS: f32 = 0.99;

/// A point in the unit square with its previous position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position
    pub pos: Vec2,
    /// Position before the last step
    pub prev_pos: Vec2,
    /// Velocity in unit-square units per step
    pub vel: Vec2,
}

impl Particle {
    /// Length of the velocity vector
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Persistent particle array owned by one surface
#[derive(Debug, Clone)]
pub struct ParticleState {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Default for ParticleState {
    fn default() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }
}

impl ParticleState {
    /// Empty state with a fixed seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    /// Particles in index order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles exist
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Scatter `count` particles over [0.1, 0.9]² at rest, replacing any existing ones
    pub fn reset(&mut self, count: usize) {
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                pos: Vec2::new(rng.random_range(0.1..=0.9), rng.random_range(0.1..=0.9)),
                prev_pos: Vec2::new(rng.random_range(0.1..=0.9), rng.random_range(0.1..=0.9)),
                vel: Vec2::ZERO,
            })
            .collect();
        debug!("Initialised {} particles", count);
    }

    /// Initialise only when empty; existing particles keep their motion
    pub fn ensure(&mut self, count: usize) {
        if self.particles.is_empty() {
            self.reset(count);
        }
    }

    /// Drop all particles
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance one tick of `dt` seconds at the given smoothed intensity.
    ///
    /// Non-positive `dt` leaves the state untouched.
    pub fn step(&mut self, dt: f32, intensity: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let center = Vec2::splat(0.5);
        let pull = CENTER_PULL * (1.0 - intensity);
        let advance = dt * SPEED_SCALE * (intensity * 0.7 + 0.3);

        for p in &mut self.particles {
            p.prev_pos = p.pos;
            p.vel *= DAMPING;
            p.vel += (center - p.pos) * pull;
            p.pos = (p.pos + p.vel * advance).clamp(Vec2::splat(MIN_POS), Vec2::splat(MAX_POS));
        }
    }

    /// Kick every particle in a random direction with the given magnitude
    pub fn apply_force(&mut self, magnitude: f32) {
        let rng = &mut self.rng;
        for p in &mut self.particles {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            p.vel += Vec2::from_angle(angle) * magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_places_particles_inside_margin() {
        let mut state = ParticleState::seeded(7);
        state.reset(60);
        assert_eq!(state.len(), 60);
        for p in state.particles() {
            assert!((0.1..=0.9).contains(&p.pos.x) && (0.1..=0.9).contains(&p.pos.y));
            assert!((0.1..=0.9).contains(&p.prev_pos.x));
            assert_eq!(p.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_ensure_keeps_existing_particles() {
        let mut state = ParticleState::seeded(1);
        state.ensure(10);
        state.apply_force(0.01);
        let before = state.particles().to_vec();
        state.ensure(60);
        assert_eq!(state.particles(), before.as_slice());
    }

    #[test]
    fn test_step_damps_and_pulls_to_center() {
        let mut state = ParticleState::seeded(3);
        state.particles = vec![Particle {
            pos: Vec2::new(0.2, 0.8),
            prev_pos: Vec2::new(0.2, 0.8),
            vel: Vec2::new(0.01, 0.0),
        }];
        state.step(1.0 / 60.0, 0.0);

        let p = state.particles()[0];
        let expected_vel = Vec2::new(0.01 * 0.93 + 0.3 * 0.001, -0.3 * 0.001);
        assert!((p.vel - expected_vel).length() < 1e-7);
        let expected_pos = Vec2::new(0.2, 0.8) + expected_vel * (2.0 * 0.3);
        assert!((p.pos - expected_pos).length() < 1e-6);
        assert_eq!(p.prev_pos, Vec2::new(0.2, 0.8));
    }

    #[test]
    fn test_positions_stay_clamped() {
        let mut state = ParticleState::seeded(11);
        state.reset(30);
        state.apply_force(5.0);
        for _ in 0..50 {
            state.step(1.0 / 15.0, 1.0);
        }
        for p in state.particles() {
            assert!((MIN_POS..=MAX_POS).contains(&p.pos.x));
            assert!((MIN_POS..=MAX_POS).contains(&p.pos.y));
        }
    }

    #[test]
    fn test_non_positive_dt_is_ignored() {
        let mut state = ParticleState::seeded(5);
        state.reset(5);
        state.apply_force(0.1);
        let before = state.particles().to_vec();
        state.step(0.0, 0.5);
        state.step(-0.2, 0.5);
        assert_eq!(state.particles(), before.as_slice());
    }

    #[test]
    fn test_apply_force_on_empty_is_noop() {
        let mut state = ParticleState::seeded(2);
        state.apply_force(1.0);
        assert!(state.is_empty());
    }
}
