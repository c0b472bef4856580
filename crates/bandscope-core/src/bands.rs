//! Band vectors and the frames that carry them between lanes.

use std::ops::Index;

/// Number of frequency bands produced per analysis call
pub const BAR_COUNT: usize = 96;

/// Number of lowest bands averaged into the intensity scalar
pub const INTENSITY_BANDS: usize = 8;

/// Mean of the lowest [`INTENSITY_BANDS`] values, or of all values when fewer exist.
pub fn intensity_of(bands: &[f32]) -> f32 {
    if bands.is_empty() {
        return 0.0;
    }
    let take = bands.len().min(INTENSITY_BANDS);
    bands[..take].iter().sum::<f32>() / take as f32
}

/// Immutable set of [`BAR_COUNT`] band magnitudes in [0, 1], index 0 = lowest frequency.
///
/// A new vector is built for every update; existing vectors are never
/// mutated, so a published vector can be shared freely across lanes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandVector([f32; BAR_COUNT]);

impl BandVector {
    /// All-zero vector
    pub const fn zeros() -> Self {
        Self([0.0; BAR_COUNT])
    }

    /// Build a vector from arbitrary values.
    ///
    /// Values are clamped to [0, 1] (NaN becomes 0). Shorter inputs are
    /// zero-padded and longer inputs truncated.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut bands = [0.0; BAR_COUNT];
        for (slot, value) in bands.iter_mut().zip(values) {
            *slot = clamp_unit(value);
        }
        Self(bands)
    }

    /// Copy with every band multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_values(self.0.iter().map(|v| v * factor))
    }

    /// Band values as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Number of bands (always [`BAR_COUNT`])
    pub fn len(&self) -> usize {
        BAR_COUNT
    }

    /// Always false; present for slice-like symmetry
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether every band is exactly zero
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Mean of the lowest bands
    pub fn intensity(&self) -> f32 {
        intensity_of(&self.0)
    }
}

impl Default for BandVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<usize> for BandVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

/// Where a band frame came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    /// Fresh spectrum analysis of a PCM buffer
    Analyzer,
    /// Synthesised decay of the last analyzer output
    IdleDecay,
    /// Hard reset to silence
    Reset,
}

/// One update forwarded to render surfaces: band vector plus derived intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandFrame {
    intensity: f32,
    bands: BandVector,
    origin: FrameOrigin,
}

impl BandFrame {
    /// Create a frame; intensity is always derived from the bands
    pub fn new(bands: BandVector, origin: FrameOrigin) -> Self {
        Self {
            intensity: bands.intensity(),
            bands,
            origin,
        }
    }

    /// All-zero reset frame
    pub fn silence() -> Self {
        Self::new(BandVector::zeros(), FrameOrigin::Reset)
    }

    /// Scalar loudness summary (mean of the lowest bands)
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Band magnitudes
    pub fn bands(&self) -> &BandVector {
        &self.bands
    }

    /// Producer of this frame
    pub fn origin(&self) -> FrameOrigin {
        self.origin
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
