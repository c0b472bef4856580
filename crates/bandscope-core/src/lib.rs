//! Bandscope Core - Audio analysis and band dynamics
//!
//! This crate contains everything between a raw PCM buffer and the
//! per-surface smoothed band state consumed by the renderers:
//! - Spectrum analysis and log-scale band bucketing
//! - Per-band attack/release smoothing with peak caps
//! - Idle decay when analyzer output stalls
//! - Fixed-rate frame scheduling per render surface
//! - Fan-out of band frames to visible surfaces
//! - Visualizer preferences (style, theme, frame rate)

#![warn(missing_docs)]

use thiserror::Error;

pub mod audio;
pub mod bands;
pub mod broadcaster;
pub mod config;
pub mod dynamics;
pub mod idle;
pub mod logging;
pub mod scheduler;
pub mod snapshot;
pub mod style;
pub mod theme;

// --- Re-exports grouped by category ---

// Analysis
pub use audio::{
    AudioFormat, EqualizerGains, RawAudioFrame, SampleDepth, SpectrumAnalyzer,
    SpectrumAnalyzerConfig,
};
pub use bands::{intensity_of, BandFrame, BandVector, FrameOrigin, BAR_COUNT, INTENSITY_BANDS};

// Dynamics & timing
pub use dynamics::BandDynamics;
pub use idle::{IdleDecayConfig, IdleDecayController, PlaybackState};
pub use scheduler::{FrameRate, FrameScheduler, TickInfo};

// Distribution
pub use broadcaster::{BandSink, DualSinkBroadcaster, SurfaceSlot};
pub use snapshot::BandSlot;

// Preferences
pub use config::VisualizerConfig;
pub use logging::LogConfig;
pub use style::{BarColoring, StatusBarFill, VisualStyle};
pub use theme::ColorTheme;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// Sample bit depth outside {8, 16, 32}
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Channel count outside {1, 2}
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannelCount(u16),

    /// Buffer contained no complete sample frame
    #[error("Empty audio buffer")]
    EmptyBuffer,

    /// Buffer length is not a multiple of the frame size
    #[error("Malformed audio buffer: {len} bytes is not a multiple of the {frame_size}-byte frame")]
    MalformedBuffer {
        /// Buffer length in bytes
        len: usize,
        /// Bytes per interleaved frame
        frame_size: usize,
    },

    /// A configuration value was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The frame scheduler thread could not be started
    #[error("Failed to spawn scheduler thread: {0}")]
    SchedulerSpawn(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
