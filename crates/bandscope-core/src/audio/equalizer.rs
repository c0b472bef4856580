//! Equalizer gain coupling for band vectors.

use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Number of equalizer bands (31 Hz .. 16 kHz octaves)
pub const EQ_BAND_COUNT: usize = 10;

/// Externally owned equalizer gains, neutral = 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualizerGains([f32; EQ_BAND_COUNT]);

impl Default for EqualizerGains {
    fn default() -> Self {
        Self([1.0; EQ_BAND_COUNT])
    }
}

impl EqualizerGains {
    /// Create from ten gains; negative or non-finite gains become 0.0
    pub fn new(gains: [f32; EQ_BAND_COUNT]) -> Self {
        Self(gains.map(|g| if g.is_finite() { g.max(0.0) } else { 0.0 }))
    }

    /// Create from a slice that must hold exactly ten gains
    pub fn from_slice(gains: &[f32]) -> Result<Self> {
        let array: [f32; EQ_BAND_COUNT] = gains.try_into().map_err(|_| {
            CoreError::InvalidConfig(format!(
                "expected {} equalizer gains, got {}",
                EQ_BAND_COUNT,
                gains.len()
            ))
        })?;
        Ok(Self::new(array))
    }

    /// Raw gains
    pub fn gains(&self) -> &[f32; EQ_BAND_COUNT] {
        &self.0
    }

    /// Equalizer band index for bar `index` of `bar_count`
    pub fn band_for_bar(index: usize, bar_count: usize) -> usize {
        let frac = if bar_count > 1 {
            index as f32 / (bar_count - 1) as f32
        } else {
            0.0
        };
        ((frac * (EQ_BAND_COUNT - 1) as f32) as usize).min(EQ_BAND_COUNT - 1)
    }

    /// Multiply each bar by its band gain and re-clip to [0, 1]
    pub fn apply(&self, bars: &mut [f32]) {
        let count = bars.len();
        for (i, bar) in bars.iter_mut().enumerate() {
            *bar = (*bar * self.0[Self::band_for_bar(i, count)]).clamp(0.0, 1.0);
        }
    }
}
