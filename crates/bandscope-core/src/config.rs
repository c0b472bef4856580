//! Visualizer preferences supplied by the host's settings storage.

use serde::{Deserialize, Serialize};

use crate::idle::IdleDecayConfig;
use crate::logging::LogConfig;
use crate::scheduler::FrameRate;
use crate::style::{BarColoring, StatusBarFill, VisualStyle};
use crate::theme::ColorTheme;
use crate::{CoreError, Result};

/// Particle count used by the particle style
pub const DEFAULT_PARTICLE_COUNT: usize = 60;

/// Upper bound on the particle count
pub const MAX_PARTICLE_COUNT: usize = 4096;

/// Read-only preferences for one visualizer host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Full-surface render style
    pub style: VisualStyle,
    /// Tick rate of each surface
    pub frame_rate: FrameRate,
    /// Colour pair
    pub theme: ColorTheme,
    /// Status-bar fill pattern
    pub status_fill: StatusBarFill,
    /// Status-bar colouring scheme
    pub status_coloring: BarColoring,
    /// Number of particles for the particle style
    pub particle_count: usize,
    /// Idle decay timing
    pub idle: IdleDecayConfig,
    /// Logging setup
    pub log: LogConfig,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            style: VisualStyle::default(),
            frame_rate: FrameRate::default(),
            theme: ColorTheme::default(),
            status_fill: StatusBarFill::default(),
            status_coloring: BarColoring::default(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            idle: IdleDecayConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl VisualizerConfig {
    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(CoreError::InvalidConfig(format!(
                "particle count {} exceeds {}",
                self.particle_count, MAX_PARTICLE_COUNT
            )));
        }
        self.idle.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.style, VisualStyle::Lines);
        assert_eq!(config.frame_rate, FrameRate::Fps30);
        assert_eq!(config.particle_count, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config: VisualizerConfig =
            ron::from_str("(style: Spiral, frame_rate: 60, status_fill: striped)").unwrap();
        assert_eq!(config.style, VisualStyle::Spiral);
        assert_eq!(config.frame_rate, FrameRate::Fps60);
        assert_eq!(config.status_fill, StatusBarFill::Striped);
        assert_eq!(config.theme, ColorTheme::default());
    }

    #[test]
    fn test_rejects_unsupported_frame_rate() {
        let result: std::result::Result<VisualizerConfig, _> =
            serde_json::from_str(r#"{"frame_rate": 24}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = VisualizerConfig {
            style: VisualStyle::RadialGrid,
            status_coloring: BarColoring::Gradient,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: VisualizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_particle_limit() {
        let config = VisualizerConfig {
            particle_count: MAX_PARTICLE_COUNT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
