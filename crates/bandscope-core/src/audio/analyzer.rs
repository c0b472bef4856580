//! Spectrum Analyzer - raw PCM buffer to 96 normalized bands
//!
//! Each call is independent and covers a fixed window: the last `fft_size`
//! frames of the buffer are decoded, downmixed, DC-corrected and
//! peak-normalized, tapered with a Blackman-Harris window, zero-padded when
//! the buffer is shorter, transformed with rustfft, then compressed and
//! bucketed on a log scale.

use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tracing::{debug, trace};

use super::buckets::{bucket_boundaries, bucket_means};
use super::equalizer::EqualizerGains;
use super::format::RawAudioFrame;
use crate::bands::{BandFrame, BandVector, FrameOrigin, BAR_COUNT};
use crate::{CoreError, Result};

/// Guard added to the peak before amplitude normalization
const PEAK_EPSILON: f32 = 1e-9;

/// Smallest window whose spectrum still has a bin per bar
const MIN_FFT_SIZE: usize = 256;

/// Configuration for [`SpectrumAnalyzer`]
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzerConfig {
    /// Frames per transform (power of two); longer buffers keep their tail
    pub fft_size: usize,
    /// Amplitude below which a bin is treated as silence
    pub noise_floor: f32,
    /// Percentile (0-100) used to compress transient spikes
    pub compression_percentile: f32,
}

impl Default for SpectrumAnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            noise_floor: 1e-5,
            compression_percentile: 95.0,
        }
    }
}

impl SpectrumAnalyzerConfig {
    /// Reject odd window sizes, negative floors and percentiles outside 0-100
    pub fn validate(&self) -> Result<()> {
        if self.fft_size < MIN_FFT_SIZE || !self.fft_size.is_power_of_two() {
            return Err(CoreError::InvalidConfig(format!(
                "fft size must be a power of two of at least {}, got {}",
                MIN_FFT_SIZE, self.fft_size
            )));
        }
        if !self.noise_floor.is_finite() || self.noise_floor < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "noise floor must be a non-negative number, got {}",
                self.noise_floor
            )));
        }
        if !(0.0..=100.0).contains(&self.compression_percentile) {
            return Err(CoreError::InvalidConfig(format!(
                "compression percentile must be within 0-100, got {}",
                self.compression_percentile
            )));
        }
        Ok(())
    }
}

/// Four-term Blackman-Harris taper of `len` points
fn blackman_harris(len: usize) -> Vec<f32> {
    if len < 2 {
        return vec![1.0; len];
    }
    (0..len)
        .map(|i| {
            let t = 2.0 * std::f32::consts::PI * i as f32 / (len - 1) as f32;
            0.35875 - 0.48829 * t.cos() + 0.14128 * (2.0 * t).cos() - 0.01168 * (3.0 * t).cos()
        })
        .collect()
}

/// Turns raw audio buffers into [`BandFrame`]s.
///
/// Runs on the audio lane. The transform is planned once in [`new`](Self::new)
/// and every buffer is reused, so the cost of a call does not depend on how
/// many frames the caller hands in.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    config: SpectrumAnalyzerConfig,
    samples: Vec<f32>,
    /// Taper matching `samples.len()`; rebuilt only for short buffers
    window: Vec<f32>,
    window_gain: f32,
    fft_buffer: Vec<Complex<f32>>,
    scratch_buffer: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
    sorted: Vec<f32>,
    boundaries: Vec<usize>,
    analysis_count: u64,
}

impl SpectrumAnalyzer {
    /// Create an analyzer with the given configuration
    pub fn new(config: SpectrumAnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let fft_size = config.fft_size;
        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        let window = blackman_harris(fft_size);
        let window_gain = window.iter().sum::<f32>();
        let spectrum_len = fft_size / 2 + 1;

        debug!(
            "SpectrumAnalyzer created: fft_size={}, noise_floor={}, percentile={}",
            fft_size, config.noise_floor, config.compression_percentile
        );

        Ok(Self {
            scratch_buffer: vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()],
            fft,
            config,
            samples: Vec::with_capacity(fft_size),
            window,
            window_gain,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            magnitudes: Vec::with_capacity(spectrum_len),
            sorted: Vec::with_capacity(spectrum_len),
            boundaries: bucket_boundaries(spectrum_len, BAR_COUNT),
            analysis_count: 0,
        })
    }

    /// Analyze one buffer; any rejected buffer yields `None`.
    ///
    /// The audio lane calls this and lets the idle controller cover gaps.
    pub fn analyze(&mut self, frame: &RawAudioFrame<'_>, eq: &EqualizerGains) -> Option<BandFrame> {
        match self.try_analyze(frame, eq) {
            Ok(result) => Some(result),
            Err(e) => {
                debug!("Skipping audio buffer: {}", e);
                None
            }
        }
    }

    /// Analyze one buffer, reporting why it was rejected
    pub fn try_analyze(&mut self, frame: &RawAudioFrame<'_>, eq: &EqualizerGains) -> Result<BandFrame> {
        frame
            .tail(self.config.fft_size)
            .decode_mono_into(&mut self.samples)?;
        if self.samples.is_empty() {
            return Err(CoreError::EmptyBuffer);
        }

        self.normalize_samples();
        self.compute_magnitudes();
        self.compress_magnitudes();

        let mut bars = bucket_means(&self.magnitudes, &self.boundaries);
        eq.apply(&mut bars);

        self.analysis_count += 1;
        if self.analysis_count % 100 == 0 {
            trace!(
                "Analysis #{}: window={} low bands={:?}",
                self.analysis_count,
                self.samples.len(),
                &bars[..3]
            );
        }

        Ok(BandFrame::new(
            BandVector::from_values(bars),
            FrameOrigin::Analyzer,
        ))
    }

    /// Number of successful analyses so far
    pub fn analysis_count(&self) -> u64 {
        self.analysis_count
    }

    /// Frames covered by one transform
    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Remove DC offset and scale to unit peak amplitude
    fn normalize_samples(&mut self) {
        let mean = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
        let mut peak = 0.0f32;
        for s in &mut self.samples {
            *s -= mean;
            peak = peak.max(s.abs());
        }
        let scale = 1.0 / (peak + PEAK_EPSILON);
        for s in &mut self.samples {
            *s *= scale;
        }
    }

    /// Windowed real-input transform: one-sided amplitude spectrum of fft_size/2 + 1 bins
    fn compute_magnitudes(&mut self) {
        let n = self.samples.len();
        if self.window.len() != n {
            self.window = blackman_harris(n);
            self.window_gain = self.window.iter().sum::<f32>();
            trace!("Rebuilt analysis window for {} frames", n);
        }

        for (slot, (&s, &w)) in self
            .fft_buffer
            .iter_mut()
            .zip(self.samples.iter().zip(&self.window))
        {
            *slot = Complex::new(s * w, 0.0);
        }
        for slot in &mut self.fft_buffer[n..] {
            *slot = Complex::new(0.0, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.scratch_buffer);

        // Scale so a full-scale sinusoid reads 1.0; the noise floor is an amplitude
        let scale = 2.0 / self.window_gain.max(PEAK_EPSILON);
        let floor = self.config.noise_floor;
        let half = self.config.fft_size / 2 + 1;
        self.magnitudes.clear();
        self.magnitudes.extend(self.fft_buffer[..half].iter().map(|c| {
            let magnitude = c.norm() * scale;
            if magnitude < floor {
                0.0
            } else {
                magnitude
            }
        }));
    }

    /// Normalize by the maximum, divide by the configured percentile, clip to [0, 1]
    fn compress_magnitudes(&mut self) {
        let max = self.magnitudes.iter().copied().fold(0.0f32, f32::max);
        if max > 0.0 {
            for m in &mut self.magnitudes {
                *m /= max;
            }
        }

        let p = percentile(
            &self.magnitudes,
            self.config.compression_percentile,
            &mut self.sorted,
        );
        if p > 0.0 {
            for m in &mut self.magnitudes {
                *m /= p;
            }
        }

        for m in &mut self.magnitudes {
            *m = m.clamp(0.0, 1.0);
        }
    }
}

/// Linearly interpolated percentile, matching the common "linear" definition
fn percentile(values: &[f32], pct: f32, sorted: &mut Vec<f32>) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    sorted.clear();
    sorted.extend_from_slice(values);
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let rank = (sorted.len() - 1) as f32 * pct / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f32;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
