//! One render surface: its mailbox, smoothing state and animation state.
//!
//! The strip and the popup each own a `Surface`. Neither shares dynamics,
//! phase or particles with the other, so a popup opened mid-playback starts
//! from rest while the strip carries on.

use std::sync::Arc;

use bandscope_core::{
    BandDynamics, BandSink, ColorTheme, SurfaceSlot, VisualStyle, VisualizerConfig,
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::dispatcher::{render, RenderCapabilities, RenderContext, StatusBarOptions};
use crate::draw::DrawList;
use crate::particles::ParticleState;

/// Phase advance per second of elapsed time
const PHASE_RATE: f64 = 3.0;

/// Render-lane state for one visible surface
#[derive(Debug)]
pub struct Surface {
    sink: Arc<SurfaceSlot>,
    seen: u64,
    dynamics: BandDynamics,
    phase: f64,
    particles: ParticleState,
    particle_count: usize,
    style: VisualStyle,
    theme: ColorTheme,
    status: StatusBarOptions,
    capabilities: RenderCapabilities,
    size: Vec2,
    frames: u64,
}

impl Surface {
    /// Visible surface named `name` drawing `style` at `size` pixels
    pub fn new(name: &str, style: VisualStyle, config: &VisualizerConfig, size: Vec2) -> Self {
        let mut surface = Self {
            sink: Arc::new(SurfaceSlot::new(name, true)),
            seen: 0,
            dynamics: BandDynamics::new(),
            phase: 0.0,
            particles: ParticleState::default(),
            particle_count: config.particle_count,
            style: VisualStyle::default(),
            theme: config.theme,
            status: StatusBarOptions {
                fill: config.status_fill,
                coloring: config.status_coloring,
            },
            capabilities: RenderCapabilities::default(),
            size,
            frames: 0,
        };
        surface.set_style(style);
        debug!("Created surface '{}' ({}, {}x{})", name, style, size.x, size.y);
        surface
    }

    /// Replace the particle state, e.g. with a seeded one
    pub fn with_particles(mut self, particles: ParticleState) -> Self {
        self.particles = particles;
        if self.style.uses_particles() {
            self.particles.ensure(self.particle_count);
        }
        self
    }

    /// Sink to register with the broadcaster
    pub fn sink(&self) -> Arc<SurfaceSlot> {
        Arc::clone(&self.sink)
    }

    /// Surface name
    pub fn name(&self) -> &str {
        self.sink.name()
    }

    /// Active style
    pub fn style(&self) -> VisualStyle {
        self.style
    }

    /// Switch style. Selecting the particle style initialises particles if
    /// none exist; switching away keeps them.
    pub fn set_style(&mut self, style: VisualStyle) {
        if style.uses_particles() {
            self.particles.ensure(self.particle_count);
        }
        if style != self.style {
            debug!("Surface '{}' style {} -> {}", self.name(), self.style, style);
            self.style = style;
        }
    }

    /// Change the colour pair
    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.theme = theme;
    }

    /// Change the status-bar appearance
    pub fn set_status_options(&mut self, status: StatusBarOptions) {
        self.status = status;
    }

    /// Change the host capabilities
    pub fn set_capabilities(&mut self, capabilities: RenderCapabilities) {
        self.capabilities = capabilities;
    }

    /// New surface size in pixels
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Current surface size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Random impulse for every particle
    pub fn apply_force(&mut self, magnitude: f32) {
        self.particles.apply_force(magnitude);
    }

    /// Smoothed band state
    pub fn dynamics(&self) -> &BandDynamics {
        &self.dynamics
    }

    /// Particle state
    pub fn particles(&self) -> &ParticleState {
        &self.particles
    }

    /// Animation phase accumulator
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame of `dt` seconds.
    ///
    /// Applies the newest published band frame (if any arrived since the last
    /// tick), advances the phase and particles, and renders. Hidden surfaces
    /// are left untouched and return `None`.
    pub fn tick(&mut self, dt: f32) -> Option<DrawList> {
        if !self.sink.is_visible() {
            // A shown surface only consumes frames published after it reappears
            self.seen = self.seen.max(self.sink.slot().sequence());
            return None;
        }

        if let Some(frame) = self.sink.slot().take_newer(&mut self.seen) {
            self.dynamics.update(&frame);
            trace!(
                "Surface '{}' applied frame #{} ({:?})",
                self.name(),
                self.seen,
                frame.origin()
            );
        }

        if dt > 0.0 && dt.is_finite() {
            self.phase += f64::from(dt) * PHASE_RATE;
            if self.style.uses_particles() && self.capabilities.vector_math {
                self.particles.step(dt, self.dynamics.intensity());
            }
        }

        let ctx = RenderContext {
            values: self.dynamics.values(),
            caps: self.dynamics.caps(),
            intensity: self.dynamics.intensity(),
            phase: self.phase as f32,
            size: self.size,
            theme: &self.theme,
            status: self.status,
            particles: &self.particles,
            capabilities: self.capabilities,
        };
        self.frames += 1;
        Some(render(self.style, &ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandscope_core::{BandFrame, BandVector, FrameOrigin};

    fn surface(style: VisualStyle) -> Surface {
        Surface::new(
            "test",
            style,
            &VisualizerConfig::default(),
            Vec2::new(320.0, 120.0),
        )
        .with_particles(ParticleState::seeded(3))
    }

    #[test]
    fn test_tick_applies_published_frame_once() {
        let mut s = surface(VisualStyle::Spectrum);
        let frame = BandFrame::new(BandVector::from_values([1.0; 96]), FrameOrigin::Analyzer);
        s.sink().publish(frame);

        s.tick(0.0).unwrap();
        assert_eq!(s.dynamics().updates(), 1);
        // No new frame: dynamics untouched
        s.tick(0.0).unwrap();
        assert_eq!(s.dynamics().updates(), 1);
        assert_eq!(s.frames(), 2);
    }

    #[test]
    fn test_phase_advances_with_dt_only() {
        let mut s = surface(VisualStyle::Spiral);
        s.tick(0.5);
        assert!((s.phase() - 1.5).abs() < 1e-9);
        s.tick(0.0);
        s.tick(-1.0);
        assert!((s.phase() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_hidden_surface_is_untouched() {
        let mut s = surface(VisualStyle::Spectrum);
        s.sink().set_visible(false);
        s.sink().publish(BandFrame::silence());
        assert!(s.tick(0.1).is_none());
        assert_eq!(s.dynamics().updates(), 0);
        assert_eq!(s.phase(), 0.0);

        s.sink().set_visible(true);
        assert!(s.tick(0.1).is_some());
        assert_eq!(s.dynamics().updates(), 0);
    }

    #[test]
    fn test_frame_left_in_slot_while_hidden_is_not_replayed() {
        let mut s = surface(VisualStyle::Spectrum);
        let loud = BandFrame::new(BandVector::from_values([0.9; 96]), FrameOrigin::Analyzer);

        // Published, then hidden before the lane consumed it
        s.sink().publish(loud);
        s.sink().set_visible(false);
        assert!(s.tick(0.1).is_none());

        s.sink().set_visible(true);
        s.tick(0.1);
        assert_eq!(s.dynamics().updates(), 0);
        assert_eq!(s.dynamics().values()[0], 0.0);

        s.sink().publish(loud);
        s.tick(0.1);
        assert_eq!(s.dynamics().updates(), 1);
        assert!(s.dynamics().values()[0] > 0.0);
    }

    #[test]
    fn test_particle_style_initialises_particles() {
        let mut s = surface(VisualStyle::Spectrum);
        assert!(s.particles().is_empty());

        s.set_style(VisualStyle::Lines);
        assert_eq!(s.particles().len(), 60);
        let before = s.particles().particles().to_vec();

        // Switching away and back keeps the existing particles
        s.set_style(VisualStyle::Circles);
        s.set_style(VisualStyle::Lines);
        assert_eq!(s.particles().particles(), before.as_slice());
    }

    #[test]
    fn test_particles_frozen_without_vector_math() {
        let mut s = surface(VisualStyle::Lines);
        s.apply_force(0.05);
        s.set_capabilities(RenderCapabilities::reduced());
        let before = s.particles().particles().to_vec();
        let list = s.tick(1.0 / 30.0).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(s.particles().particles(), before.as_slice());
    }
}
