//! Synthetic PCM source standing in for a media player's audio tap.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample rate of the generated stream
pub const SAMPLE_RATE: u32 = 44_100;

/// Interleaved 16-bit stereo: a swept tone, a pulsing bass line and a little noise
pub struct ToneGenerator {
    sample_index: u64,
    sweep_phase: f32,
    rng: StdRng,
}

impl ToneGenerator {
    /// Generator with a fixed noise seed
    pub fn new(seed: u64) -> Self {
        Self {
            sample_index: 0,
            sweep_phase: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Append `frames` stereo frames to `out` as little-endian bytes
    pub fn fill(&mut self, frames: usize, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(frames * 4);
        let rate = SAMPLE_RATE as f32;

        for _ in 0..frames {
            let t = self.sample_index as f32 / rate;
            // Sweep 200 Hz -> 5 kHz every four seconds
            let sweep_hz = 200.0 * 25f32.powf((t / 4.0).fract());
            self.sweep_phase = (self.sweep_phase + TAU * sweep_hz / rate) % TAU;

            let beat = (t * 2.0).fract();
            let bass = (TAU * 60.0 * t).sin() * (1.0 - beat).powi(3);
            let noise = self.rng.random_range(-1.0f32..1.0);

            let left = 0.45 * self.sweep_phase.sin() + 0.4 * bass + 0.05 * noise;
            let right = 0.45 * self.sweep_phase.sin() + 0.4 * bass - 0.05 * noise;
            for sample in [left, right] {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                out.extend_from_slice(&value.to_le_bytes());
            }
            self.sample_index += 1;
        }
    }
}
