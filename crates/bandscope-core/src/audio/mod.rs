//! Audio analysis: PCM decoding, spectrum analysis and band bucketing.

pub mod analyzer;
pub mod buckets;
pub mod equalizer;
pub mod format;

pub use analyzer::{SpectrumAnalyzer, SpectrumAnalyzerConfig};
pub use buckets::{bucket_boundaries, bucket_means};
pub use equalizer::{EqualizerGains, EQ_BAND_COUNT};
pub use format::{AudioFormat, RawAudioFrame, SampleDepth};
