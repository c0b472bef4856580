//! Bandscope - headless driver for the audio-reactive visualizer
//!
//! Feeds a synthetic stream through the analyzer, fans band frames out to an
//! embedded strip and a popup surface, then stalls the stream so the idle
//! controller takes over.
//!
//! Usage: `bandscope [config.ron]`

#![warn(missing_docs)]

mod logging_setup;
mod signal;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bandscope_core::{
    AudioFormat, DualSinkBroadcaster, EqualizerGains, FrameRate, FrameScheduler,
    IdleDecayController, PlaybackState, RawAudioFrame, SpectrumAnalyzer, SpectrumAnalyzerConfig,
    VisualStyle, VisualizerConfig,
};
use bandscope_render::Surface;
use glam::Vec2;
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use signal::{ToneGenerator, SAMPLE_RATE};

/// Stereo frames per analyzer buffer
const CHUNK_FRAMES: usize = 1024;
/// How long the stream plays before it stalls
const PLAY_FOR: Duration = Duration::from_secs(3);
/// How long the popup stays open
const POPUP_OPEN_FOR: Duration = Duration::from_secs(2);
/// Time left for idle decay and reset after the stall
const LINGER: Duration = Duration::from_millis(1500);

const STRIP_SIZE: Vec2 = Vec2::new(480.0, 48.0);
const POPUP_SIZE: Vec2 = Vec2::new(800.0, 600.0);

fn load_config(path: Option<&Path>) -> Result<VisualizerConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            ron::from_str(&text).with_context(|| format!("Failed to parse config {:?}", path))?
        }
        None => VisualizerConfig::default(),
    };
    config.validate().context("Invalid visualizer config")?;
    Ok(config)
}

/// Drive `surface` from its own scheduler; the surface stays reachable for stats
fn spawn_surface_lane(
    surface: Surface,
    rate: FrameRate,
) -> Result<(Arc<Mutex<Surface>>, FrameScheduler)> {
    let name = surface.name().to_owned();
    let surface = Arc::new(Mutex::new(surface));
    let lane = Arc::clone(&surface);

    let scheduler = FrameScheduler::spawn(name, rate, move |tick| {
        let mut surface = lane.lock();
        if let Some(list) = surface.tick(tick.dt) {
            trace!(
                "{} frame {}: {} commands",
                surface.name(),
                tick.frame_index,
                list.len()
            );
        }
    })
    .context("Failed to start surface scheduler")?;

    Ok((surface, scheduler))
}

/// Analyze generated buffers in real time until `stop` is raised
fn spawn_audio_lane(
    broadcaster: Arc<DualSinkBroadcaster>,
    idle: Arc<Mutex<IdleDecayController>>,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<u64>> {
    let mut analyzer = SpectrumAnalyzer::new(SpectrumAnalyzerConfig::default())
        .context("Failed to create spectrum analyzer")?;
    let eq = EqualizerGains::default();
    let format = AudioFormat::stereo_16();
    let chunk = Duration::from_secs_f64(CHUNK_FRAMES as f64 / f64::from(SAMPLE_RATE));

    thread::Builder::new()
        .name("audio-lane".to_string())
        .spawn(move || {
            let mut generator = ToneGenerator::new(0x5eed);
            let mut buf = Vec::new();
            let mut next = Instant::now();
            let mut delivered = 0u64;

            while !stop.load(Ordering::Acquire) {
                generator.fill(CHUNK_FRAMES, &mut buf);
                if let Some(frame) = analyzer.analyze(&RawAudioFrame::new(&buf, format), &eq) {
                    idle.lock().record_genuine(&frame, Instant::now());
                    broadcaster.broadcast(&frame);
                    delivered += 1;
                }

                next += chunk;
                let now = Instant::now();
                if next > now {
                    thread::sleep(next - now);
                } else {
                    next = now;
                }
            }

            info!("Audio lane stopped after {} frames", delivered);
            delivered
        })
        .context("Failed to spawn audio lane")
}

/// Poll the idle controller at 60 Hz and broadcast whatever it emits
fn spawn_idle_lane(
    broadcaster: Arc<DualSinkBroadcaster>,
    idle: Arc<Mutex<IdleDecayController>>,
    playback: Arc<Mutex<PlaybackState>>,
) -> Result<FrameScheduler> {
    FrameScheduler::spawn("idle", FrameRate::Fps60, move |_| {
        let state = *playback.lock();
        let frame = idle.lock().poll(Instant::now(), state);
        if let Some(frame) = frame {
            broadcaster.broadcast(&frame);
        }
    })
    .context("Failed to start idle scheduler")
}

fn log_lane(label: &str, surface: &Mutex<Surface>, scheduler: &FrameScheduler) {
    let stats = scheduler.stats();
    let surface = surface.lock();
    info!(
        "{}: {} ticks ({} late), {} frames rendered, intensity {:.3}",
        label,
        stats.ticks,
        stats.late_ticks,
        surface.frames(),
        surface.dynamics().intensity()
    );
}

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    logging_setup::init(&config.log)?;

    info!("==========================================");
    info!("===      Bandscope Session Started     ===");
    info!("==========================================");
    info!(
        "Style: {}, frame rate: {}, particles: {}",
        config.style, config.frame_rate, config.particle_count
    );

    let strip = Surface::new("strip", VisualStyle::StatusBars, &config, STRIP_SIZE);
    let broadcaster = Arc::new(DualSinkBroadcaster::new(strip.sink()));
    let (strip, mut strip_lane) = spawn_surface_lane(strip, config.frame_rate)?;

    let popup = Surface::new("popup", config.style, &config, POPUP_SIZE);
    broadcaster.open_popup(popup.sink());
    let (popup, mut popup_lane) = spawn_surface_lane(popup, config.frame_rate)?;

    let idle = Arc::new(Mutex::new(
        IdleDecayController::new(config.idle).context("Invalid idle decay config")?,
    ));
    let playback = Arc::new(Mutex::new(PlaybackState::Playing));
    let mut idle_lane = spawn_idle_lane(
        Arc::clone(&broadcaster),
        Arc::clone(&idle),
        Arc::clone(&playback),
    )?;

    let stop_audio = Arc::new(AtomicBool::new(false));
    let audio_lane = spawn_audio_lane(
        Arc::clone(&broadcaster),
        Arc::clone(&idle),
        Arc::clone(&stop_audio),
    )?;

    thread::sleep(POPUP_OPEN_FOR);
    if let Some(closed) = broadcaster.close_popup() {
        debug!("Closing popup '{}'", closed.name());
    }
    popup_lane.stop();
    log_lane("popup", &popup, &popup_lane);
    drop(popup);

    thread::sleep(PLAY_FOR.saturating_sub(POPUP_OPEN_FOR));
    info!("Stream stalled; playback still reported as playing");
    stop_audio.store(true, Ordering::Release);
    match audio_lane.join() {
        Ok(frames) => debug!("Audio lane delivered {} frames", frames),
        Err(_) => warn!("Audio lane panicked"),
    }

    thread::sleep(LINGER);
    *playback.lock() = PlaybackState::Stopped;
    idle_lane.stop();
    strip_lane.stop();

    log_lane("strip", &strip, &strip_lane);
    let silent = strip.lock().dynamics().values().iter().all(|&v| v < 0.05);
    info!("Strip settled to silence: {}", silent);

    info!("Bandscope session finished");
    Ok(())
}
