//! Render Mode Dispatcher - picks the strategy for a [`VisualStyle`]
//!
//! Rendering is a pure function of the context: the same inputs always
//! produce the same draw list.

use bandscope_core::{BarColoring, ColorTheme, StatusBarFill, VisualStyle};
use glam::Vec2;

use crate::draw::DrawList;
use crate::modes::{bars, lines, radial, status, waveform};
use crate::particles::ParticleState;

/// Optional capabilities of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCapabilities {
    /// Trigonometry and particle physics are available.
    ///
    /// Without it every style falls back to bars or circles and the
    /// particle style draws nothing.
    pub vector_math: bool,
}

impl Default for RenderCapabilities {
    fn default() -> Self {
        Self { vector_math: true }
    }
}

impl RenderCapabilities {
    /// Host without vector math
    pub fn reduced() -> Self {
        Self { vector_math: false }
    }
}

/// Status-bar appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBarOptions {
    /// Fill pattern
    pub fill: StatusBarFill,
    /// Colouring scheme
    pub coloring: BarColoring,
}

/// Everything a strategy may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Smoothed band values in [0, 1]
    pub values: &'a [f32],
    /// Peak caps aligned with `values`
    pub caps: &'a [f32],
    /// Smoothed intensity
    pub intensity: f32,
    /// Animation phase accumulator
    pub phase: f32,
    /// Surface size in pixels
    pub size: Vec2,
    /// Colour pair
    pub theme: &'a ColorTheme,
    /// Status-bar appearance
    pub status: StatusBarOptions,
    /// Particle array (particle style only)
    pub particles: &'a ParticleState,
    /// Host capabilities
    pub capabilities: RenderCapabilities,
}

/// Render one frame of `style`.
///
/// The list always starts by clearing to the theme background. An empty band
/// array or a zero-sized surface yields only that clear.
pub fn render(style: VisualStyle, ctx: &RenderContext<'_>) -> DrawList {
    let mut out = DrawList::new();
    out.clear(ctx.theme.background);

    if ctx.values.is_empty() || ctx.size.x <= 0.0 || ctx.size.y <= 0.0 {
        return out;
    }

    let full = ctx.capabilities.vector_math;
    match style {
        VisualStyle::Lines => {
            if full {
                lines::particle_lines(ctx, &mut out);
            }
        }
        VisualStyle::Circles => radial::circles(ctx, &mut out),
        VisualStyle::Spectrum => bars::spectrum(ctx, &mut out),
        VisualStyle::EnergyRings => radial::energy_rings(ctx, &mut out),
        VisualStyle::Waveform if full => waveform::waveform(ctx, &mut out),
        VisualStyle::Pulsar if full => radial::pulsar(ctx, &mut out),
        VisualStyle::Spiral if full => radial::spiral(ctx, &mut out),
        VisualStyle::Volcano if full => radial::volcano(ctx, &mut out),
        VisualStyle::BeamCollision => radial::beam_collision(ctx, &mut out),
        VisualStyle::DualSpectrum => bars::dual_spectrum(ctx, &mut out),
        VisualStyle::RadialGrid => radial::radial_grid(ctx, &mut out),
        VisualStyle::StatusBars => status::status_bars(ctx, &mut out),
        // Reduced-capability fallbacks
        VisualStyle::Waveform | VisualStyle::Volcano => bars::spectrum(ctx, &mut out),
        VisualStyle::Pulsar | VisualStyle::Spiral => {
            radial::concentric(ctx, radial::spiral_radius(ctx.size), &mut out)
        }
    }
    out
}
