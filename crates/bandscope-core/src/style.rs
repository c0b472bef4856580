//! Visual style selection and status-bar appearance options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The twelve render strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisualStyle {
    /// Particle system drawn as motion streaks
    #[default]
    Lines,
    /// Bass-driven central circle with an orbit of dots
    Circles,
    /// Classic vertical spectrum bars
    Spectrum,
    /// Concentric rings wobbling with band energy
    EnergyRings,
    /// Dots riding a sine wave across the width
    Waveform,
    /// Rays bursting from the centre
    Pulsar,
    /// Dots laid out along a rotating spiral
    Spiral,
    /// Particle plumes rising from the bottom edge
    Volcano,
    /// Rotating beams meeting at the centre
    BeamCollision,
    /// Mirrored bars above and below the midline
    DualSpectrum,
    /// Polar grid with band-length spokes
    RadialGrid,
    /// Compact equalizer bars with peak caps
    StatusBars,
}

impl VisualStyle {
    /// Every style in menu order
    pub const ALL: [VisualStyle; 12] = [
        VisualStyle::Lines,
        VisualStyle::Circles,
        VisualStyle::Spectrum,
        VisualStyle::EnergyRings,
        VisualStyle::Waveform,
        VisualStyle::Pulsar,
        VisualStyle::Spiral,
        VisualStyle::Volcano,
        VisualStyle::BeamCollision,
        VisualStyle::DualSpectrum,
        VisualStyle::RadialGrid,
        VisualStyle::StatusBars,
    ];

    /// Stable display name, also accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lines => "Lines",
            Self::Circles => "Circles",
            Self::Spectrum => "Spectrum Bars",
            Self::EnergyRings => "Energy Rings",
            Self::Waveform => "Waveform",
            Self::Pulsar => "Pulsar",
            Self::Spiral => "Spiral",
            Self::Volcano => "Volcano",
            Self::BeamCollision => "Beam Collision",
            Self::DualSpectrum => "Dual Spectrum",
            Self::RadialGrid => "Radial Grid",
            Self::StatusBars => "Status Bars",
        }
    }

    /// Whether the style keeps a particle array between frames
    pub fn uses_particles(self) -> bool {
        matches!(self, Self::Lines)
    }

    /// Whether the style is drawn around the surface centre
    pub fn is_radial(self) -> bool {
        matches!(
            self,
            Self::Circles
                | Self::EnergyRings
                | Self::Pulsar
                | Self::Spiral
                | Self::Volcano
                | Self::BeamCollision
                | Self::RadialGrid
        )
    }
}

impl fmt::Display for VisualStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidConfig(format!("unknown visual style '{}'", s)))
    }
}

/// Fill pattern of the status-bar style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBarFill {
    /// Plain rectangle
    #[default]
    Solid,
    /// Horizontal 2 px stripes with 2 px gaps
    Striped,
    /// Grid of 3 px dots
    Dotted,
    /// Plain rectangle plus a 1 px peak-cap line
    SolidWithCap,
}

/// Colouring scheme of the status-bar style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColoring {
    /// The theme's bar and cap colours
    #[default]
    Theme,
    /// Hue sweeps across the bars
    Rainbow,
    /// Five-stop neon palette
    Gradient,
}
