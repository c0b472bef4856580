//! Band Dynamics - per-surface attack/release smoothing with peak caps
//!
//! Every render surface owns one [`BandDynamics`]. It is only ever touched
//! from that surface's own tick, so no synchronisation is needed here.

use crate::bands::{BandFrame, BAR_COUNT};

/// Weight kept from the previous value in the second smoothing pass
const EXTRA_SMOOTHING: f32 = 0.92;
/// Weight kept from the previous intensity per update
const INTENSITY_RETAIN: f32 = 0.95;

/// Smoothed band values and peak caps for a single surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BandDynamics {
    values: [f32; BAR_COUNT],
    caps: [f32; BAR_COUNT],
    intensity: f32,
    updates: u64,
}

impl Default for BandDynamics {
    fn default() -> Self {
        Self::new()
    }
}

impl BandDynamics {
    /// Fresh state: all values, caps and intensity at zero
    pub fn new() -> Self {
        Self {
            values: [0.0; BAR_COUNT],
            caps: [0.0; BAR_COUNT],
            intensity: 0.0,
            updates: 0,
        }
    }

    /// Smoothed band values
    pub fn values(&self) -> &[f32; BAR_COUNT] {
        &self.values
    }

    /// Peak-cap markers
    pub fn caps(&self) -> &[f32; BAR_COUNT] {
        &self.caps
    }

    /// Low-passed intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Number of frames applied so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Fold one incoming frame into the smoothed state.
    ///
    /// Caps fall at a rate scaled by the intensity held *before* this update.
    pub fn update(&mut self, frame: &BandFrame) {
        let incoming = frame.bands();
        let intensity = self.intensity;
        let last = (BAR_COUNT - 1) as f32;

        for i in 0..BAR_COUNT {
            let frac = i as f32 / last;
            let prev = self.values[i];
            let target = incoming[i];

            let rate = if target >= prev {
                0.40 - 0.15 * frac
            } else {
                0.02 + 0.08 * frac
            };
            let stepped = prev + (target - prev) * rate;
            let v = prev * EXTRA_SMOOTHING + stepped * (1.0 - EXTRA_SMOOTHING);
            self.values[i] = v;

            let cap = self.caps[i];
            self.caps[i] = if v > cap {
                let overshoot = 1.0 + 0.15 * (1.0 - frac);
                let cap_attack = 0.15 - 0.06 * frac;
                cap + (v * overshoot - cap) * cap_attack
            } else {
                let cap_fall = (0.003 + 0.006 * frac) * (0.5 + 0.3 * intensity);
                (cap - cap_fall).max(0.0)
            };
        }

        self.intensity =
            intensity * INTENSITY_RETAIN + frame.intensity() * (1.0 - INTENSITY_RETAIN);
        self.updates += 1;
    }

    /// Return to the freshly created state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::{BandVector, FrameOrigin};

    fn frame(value: f32) -> BandFrame {
        BandFrame::new(
            BandVector::from_values(std::iter::repeat(value)),
            FrameOrigin::Analyzer,
        )
    }

    #[test]
    fn test_single_attack_step_band_zero() {
        let mut dynamics = BandDynamics::new();
        dynamics.update(&frame(1.0));
        assert!((dynamics.values()[0] - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_attack_slows_toward_high_bands() {
        let mut dynamics = BandDynamics::new();
        dynamics.update(&frame(1.0));
        // (0.40 - 0.15) * 0.08
        assert!((dynamics.values()[95] - 0.02).abs() < 1e-6);
        assert!(dynamics.values()[0] > dynamics.values()[95]);
    }

    #[test]
    fn test_release_is_slower_than_attack() {
        let mut dynamics = BandDynamics::new();
        for _ in 0..200 {
            dynamics.update(&frame(1.0));
        }
        let peak = dynamics.values()[0];
        dynamics.update(&frame(0.0));
        let drop = peak - dynamics.values()[0];
        // release 0.02 * 0.08 of the gap
        assert!((drop - peak * 0.02 * 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_cap_rises_above_value_then_decays_monotonically() {
        let mut dynamics = BandDynamics::new();
        for _ in 0..300 {
            dynamics.update(&frame(1.0));
        }
        assert!(dynamics.caps()[0] > dynamics.values()[0] * 0.9);

        let mut previous = dynamics.caps().to_vec();
        for _ in 0..2000 {
            dynamics.update(&frame(0.0));
            for (i, cap) in dynamics.caps().iter().enumerate() {
                if dynamics.values()[i] <= previous[i] {
                    assert!(*cap <= previous[i], "cap rose on band {i}");
                }
                assert!(*cap >= 0.0);
            }
            previous = dynamics.caps().to_vec();
        }
    }

    #[test]
    fn test_cap_floors_at_zero() {
        let mut dynamics = BandDynamics::new();
        dynamics.caps[50] = 0.001;
        for _ in 0..10 {
            dynamics.update(&frame(0.0));
        }
        assert_eq!(dynamics.caps()[50], 0.0);
    }

    #[test]
    fn test_intensity_is_low_passed() {
        let mut dynamics = BandDynamics::new();
        dynamics.update(&frame(1.0));
        assert!((dynamics.intensity() - 0.05).abs() < 1e-6);
        dynamics.update(&frame(1.0));
        assert!((dynamics.intensity() - (0.05 * 0.95 + 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_cap_fall_uses_previous_intensity() {
        let mut dynamics = BandDynamics::new();
        dynamics.caps[10] = 0.5;
        dynamics.intensity = 1.0;
        dynamics.update(&frame(0.0));
        let frac = 10.0 / 95.0;
        let expected = 0.5 - (0.003 + 0.006 * frac) * 0.8;
        assert!((dynamics.caps()[10] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut dynamics = BandDynamics::new();
        dynamics.update(&frame(0.7));
        dynamics.reset();
        assert_eq!(dynamics, BandDynamics::new());
    }
}
