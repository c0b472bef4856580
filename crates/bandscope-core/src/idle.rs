//! Idle decay for stalled analyzer output.
//!
//! When no genuine analysis has arrived for a while the controller feeds
//! decaying copies of the last vector so bars fall instead of freezing, and
//! it forces silence once playback stops or the stall grows too long.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bands::{BandFrame, BandVector, FrameOrigin};
use crate::{CoreError, Result};

/// Timing and decay parameters for [`IdleDecayController`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleDecayConfig {
    /// Silence from the analyzer longer than this starts the decay
    pub stale_after: Duration,
    /// Silence longer than this forces an all-zero vector
    pub reset_after: Duration,
    /// Per-poll multiplier applied to the last vector while decaying
    pub decay_factor: f32,
}

impl Default for IdleDecayConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_millis(300),
            reset_after: Duration::from_secs(1),
            decay_factor: 0.95,
        }
    }
}

impl IdleDecayConfig {
    /// Check ordering of the thresholds and the decay range
    pub fn validate(&self) -> Result<()> {
        if self.stale_after > self.reset_after {
            return Err(CoreError::InvalidConfig(format!(
                "stale_after ({:?}) must not exceed reset_after ({:?})",
                self.stale_after, self.reset_after
            )));
        }
        if !(0.0..=1.0).contains(&self.decay_factor) {
            return Err(CoreError::InvalidConfig(format!(
                "decay factor must be within 0-1, got {}",
                self.decay_factor
            )));
        }
        Ok(())
    }
}

/// Externally owned playback flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Audio is being played
    Playing,
    /// Paused, stopped or no media
    #[default]
    Stopped,
}

impl PlaybackState {
    /// Whether the state is [`PlaybackState::Playing`]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Live,
    Decaying,
    Reset,
}

/// Synthesises frames while genuine analyzer output is missing.
///
/// Time is always passed in, so the controller can be driven from any tick
/// source and tested without sleeping.
#[derive(Debug)]
pub struct IdleDecayController {
    config: IdleDecayConfig,
    last_genuine_at: Option<Instant>,
    held: BandVector,
    phase: Phase,
}

impl IdleDecayController {
    /// Create a controller; nothing has been received yet
    pub fn new(config: IdleDecayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_genuine_at: None,
            held: BandVector::zeros(),
            phase: Phase::Reset,
        })
    }

    /// Note a genuine analyzer frame delivered at `now`
    pub fn record_genuine(&mut self, frame: &BandFrame, now: Instant) {
        self.last_genuine_at = Some(now);
        self.held = *frame.bands();
        if self.phase != Phase::Live {
            debug!("Idle decay: genuine analyzer output resumed");
            self.phase = Phase::Live;
        }
    }

    /// Time since the last genuine frame, if any was ever received
    pub fn since_genuine(&self, now: Instant) -> Option<Duration> {
        self.last_genuine_at
            .map(|at| now.saturating_duration_since(at))
    }

    /// Advance one tick; returns the frame to broadcast, if any.
    ///
    /// - not playing, never fed, or stale past `reset_after`: all-zero reset frame
    /// - stale past `stale_after`: last vector scaled by `decay_factor`
    /// - otherwise: `None`, genuine output is flowing
    pub fn poll(&mut self, now: Instant, state: PlaybackState) -> Option<BandFrame> {
        let since = self.since_genuine(now);
        let must_reset = !state.is_playing()
            || since.map_or(true, |elapsed| elapsed > self.config.reset_after);

        if must_reset {
            if self.phase != Phase::Reset {
                debug!(
                    "Idle decay: hard reset (playback={:?}, since_genuine={:?})",
                    state, since
                );
                self.phase = Phase::Reset;
            }
            self.held = BandVector::zeros();
            return Some(BandFrame::silence());
        }

        match since {
            Some(elapsed) if elapsed > self.config.stale_after => {
                if self.phase != Phase::Decaying {
                    debug!("Idle decay: analyzer stalled for {:?}, decaying", elapsed);
                    self.phase = Phase::Decaying;
                }
                self.held = self.held.scaled(self.config.decay_factor);
                Some(BandFrame::new(self.held, FrameOrigin::IdleDecay))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud() -> BandFrame {
        BandFrame::new(
            BandVector::from_values(std::iter::repeat(0.8)),
            FrameOrigin::Analyzer,
        )
    }

    #[test]
    fn test_fresh_output_needs_no_synthesis() {
        let mut idle = IdleDecayController::new(IdleDecayConfig::default()).unwrap();
        let t0 = Instant::now();
        idle.record_genuine(&loud(), t0);
        assert!(idle
            .poll(t0 + Duration::from_millis(100), PlaybackState::Playing)
            .is_none());
    }

    #[test]
    fn test_decays_once_stale() {
        let mut idle = IdleDecayController::new(IdleDecayConfig::default()).unwrap();
        let t0 = Instant::now();
        idle.record_genuine(&loud(), t0);

        let first = idle
            .poll(t0 + Duration::from_millis(310), PlaybackState::Playing)
            .unwrap();
        assert_eq!(first.origin(), FrameOrigin::IdleDecay);
        assert!((first.bands()[0] - 0.76).abs() < 1e-6);

        let second = idle
            .poll(t0 + Duration::from_millis(327), PlaybackState::Playing)
            .unwrap();
        assert!((second.bands()[0] - 0.722).abs() < 1e-6);
    }

    #[test]
    fn test_stopped_playback_resets_immediately() {
        let mut idle = IdleDecayController::new(IdleDecayConfig::default()).unwrap();
        let t0 = Instant::now();
        idle.record_genuine(&loud(), t0);
        let frame = idle
            .poll(t0 + Duration::from_millis(10), PlaybackState::Stopped)
            .unwrap();
        assert_eq!(frame.origin(), FrameOrigin::Reset);
        assert!(frame.bands().is_silent());
    }

    #[test]
    fn test_long_stall_resets_even_while_playing() {
        let mut idle = IdleDecayController::new(IdleDecayConfig::default()).unwrap();
        let t0 = Instant::now();
        idle.record_genuine(&loud(), t0);
        let frame = idle
            .poll(t0 + Duration::from_millis(1001), PlaybackState::Playing)
            .unwrap();
        assert!(frame.bands().is_silent());
        assert_eq!(frame.origin(), FrameOrigin::Reset);
    }

    #[test]
    fn test_never_fed_reports_silence() {
        let mut idle = IdleDecayController::new(IdleDecayConfig::default()).unwrap();
        let frame = idle.poll(Instant::now(), PlaybackState::Playing).unwrap();
        assert!(frame.bands().is_silent());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = IdleDecayConfig {
            stale_after: Duration::from_secs(2),
            ..Default::default()
        };
        assert!(IdleDecayController::new(config).is_err());
    }
}
