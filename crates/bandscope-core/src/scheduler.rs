//! Frame Scheduler - fixed-rate tick source for one render surface
//!
//! Each surface gets its own thread. The only suspension point is the wait
//! on the control channel, which doubles as the wait-for-next-tick.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{CoreError, Result};

/// Supported surface frame rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FrameRate {
    /// 15 frames per second
    Fps15,
    /// 30 frames per second
    #[default]
    Fps30,
    /// 60 frames per second
    Fps60,
}

impl FrameRate {
    /// All selectable rates, slowest first
    pub const ALL: [FrameRate; 3] = [FrameRate::Fps15, FrameRate::Fps30, FrameRate::Fps60];

    /// Frames per second
    pub fn fps(self) -> u32 {
        match self {
            Self::Fps15 => 15,
            Self::Fps30 => 30,
            Self::Fps60 => 60,
        }
    }

    /// Time between ticks
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps() as f64)
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = CoreError;

    fn try_from(fps: u32) -> Result<Self> {
        match fps {
            15 => Ok(Self::Fps15),
            30 => Ok(Self::Fps30),
            60 => Ok(Self::Fps60),
            other => Err(CoreError::InvalidConfig(format!(
                "frame rate must be 15, 30 or 60, got {}",
                other
            ))),
        }
    }
}

impl From<FrameRate> for u32 {
    fn from(rate: FrameRate) -> Self {
        rate.fps()
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FPS", self.fps())
    }
}

/// Information passed to the tick callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInfo {
    /// Wall time since the previous tick, in seconds
    pub dt: f32,
    /// Zero-based tick counter
    pub frame_index: u64,
    /// Rate in effect for this tick
    pub rate: FrameRate,
}

/// Tick statistics for one scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerStats {
    /// Ticks delivered
    pub ticks: u64,
    /// Ticks that started more than one interval late
    pub late_ticks: u64,
    /// Duration of the last callback in milliseconds
    pub last_tick_ms: f64,
}

enum SchedulerCommand {
    SetRate(FrameRate),
    Stop,
}

/// Periodic tick source owning one background thread.
///
/// Dropping the scheduler stops it and joins the thread, so no tick is
/// delivered after `stop()` or drop returns.
pub struct FrameScheduler {
    name: String,
    control_tx: Sender<SchedulerCommand>,
    thread: Option<JoinHandle<()>>,
    rate: Arc<RwLock<FrameRate>>,
    stats: Arc<RwLock<SchedulerStats>>,
}

impl FrameScheduler {
    /// Start ticking `on_tick` at `rate` on a thread named `name`
    pub fn spawn<F>(name: impl Into<String>, rate: FrameRate, mut on_tick: F) -> Result<Self>
    where
        F: FnMut(TickInfo) + Send + 'static,
    {
        let name = name.into();
        let (control_tx, control_rx) = unbounded();
        let shared_rate = Arc::new(RwLock::new(rate));
        let stats = Arc::new(RwLock::new(SchedulerStats::default()));

        let thread_rate = shared_rate.clone();
        let thread_stats = stats.clone();
        let thread_name = name.clone();

        let thread = thread::Builder::new()
            .name(format!("{}-frames", name))
            .spawn(move || {
                info!("Frame scheduler '{}' started at {}", thread_name, rate);
                let mut rate = rate;
                let mut interval = rate.interval();
                let mut last = Instant::now();
                let mut next = last + interval;
                let mut frame_index = 0u64;

                loop {
                    let timeout = next.saturating_duration_since(Instant::now());
                    match control_rx.recv_timeout(timeout) {
                        Ok(SchedulerCommand::SetRate(new_rate)) => {
                            if new_rate != rate {
                                debug!(
                                    "Frame scheduler '{}': {} -> {}",
                                    thread_name, rate, new_rate
                                );
                                rate = new_rate;
                                interval = rate.interval();
                                *thread_rate.write() = rate;
                                next = last + interval;
                            }
                            continue;
                        }
                        Ok(SchedulerCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }

                    let now = Instant::now();
                    let dt = now.saturating_duration_since(last).as_secs_f32();
                    last = now;

                    on_tick(TickInfo {
                        dt,
                        frame_index,
                        rate,
                    });
                    frame_index += 1;

                    let mut stats = thread_stats.write();
                    stats.ticks += 1;
                    stats.last_tick_ms = now.elapsed().as_secs_f64() * 1000.0;

                    next += interval;
                    let after = Instant::now();
                    if next < after {
                        stats.late_ticks += 1;
                        trace!("Frame scheduler '{}' fell behind", thread_name);
                        next = after + interval;
                    }
                }

                info!("Frame scheduler '{}' stopped", thread_name);
            })?;

        Ok(Self {
            name,
            control_tx,
            thread: Some(thread),
            rate: shared_rate,
            stats,
        })
    }

    /// Scheduler name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate currently applied by the tick thread
    pub fn rate(&self) -> FrameRate {
        *self.rate.read()
    }

    /// Switch rate; phase and surface state are untouched
    pub fn set_rate(&self, rate: FrameRate) {
        if self.control_tx.send(SchedulerCommand::SetRate(rate)).is_err() {
            warn!("Frame scheduler '{}' is not running", self.name);
        }
    }

    /// Snapshot of tick statistics
    pub fn stats(&self) -> SchedulerStats {
        *self.stats.read()
    }

    /// Whether the tick thread is still alive
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking and wait for the thread to exit
    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            debug!("Stopping frame scheduler '{}'", self.name);
            let _ = self.control_tx.send(SchedulerCommand::Stop);
            if thread.join().is_err() {
                warn!("Frame scheduler '{}' tick callback panicked", self.name);
            }
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("name", &self.name)
            .field("rate", &self.rate())
            .field("running", &self.is_running())
            .finish()
    }
}
