//! Dual Sink Broadcaster - fan-out of band frames to visible surfaces
//!
//! The embedded strip is always attached; a popup may come and go. Hidden
//! sinks are skipped entirely and keep whatever state they had.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::bands::BandFrame;
use crate::snapshot::BandSlot;

/// A render surface able to receive band frames
pub trait BandSink: Send + Sync {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Whether the surface is currently shown
    fn is_visible(&self) -> bool;

    /// Hand a frame to the surface; must not block
    fn publish(&self, frame: BandFrame);
}

/// Standard sink: a [`BandSlot`] plus a visibility flag.
///
/// The render lane owning the surface reads the slot on its own tick.
#[derive(Debug)]
pub struct SurfaceSlot {
    name: String,
    slot: BandSlot,
    visible: AtomicBool,
}

impl SurfaceSlot {
    /// Create a sink with the given initial visibility
    pub fn new(name: impl Into<String>, visible: bool) -> Self {
        Self {
            name: name.into(),
            slot: BandSlot::new(),
            visible: AtomicBool::new(visible),
        }
    }

    /// Show or hide the surface
    pub fn set_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::AcqRel) != visible {
            debug!("Surface '{}' visible={}", self.name, visible);
        }
    }

    /// Mailbox read by the surface's render lane
    pub fn slot(&self) -> &BandSlot {
        &self.slot
    }
}

impl BandSink for SurfaceSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    fn publish(&self, frame: BandFrame) {
        self.slot.publish(frame);
    }
}

/// Forwards each analyzer or idle-decay frame to the strip and the popup.
pub struct DualSinkBroadcaster {
    strip: Arc<dyn BandSink>,
    popup: RwLock<Option<Arc<dyn BandSink>>>,
}

impl DualSinkBroadcaster {
    /// Broadcaster with the always-present embedded strip
    pub fn new(strip: Arc<dyn BandSink>) -> Self {
        debug!("Broadcaster created for strip '{}'", strip.name());
        Self {
            strip,
            popup: RwLock::new(None),
        }
    }

    /// Attach a popup surface, replacing any previous one
    pub fn open_popup(&self, popup: Arc<dyn BandSink>) {
        debug!("Popup '{}' attached", popup.name());
        *self.popup.write() = Some(popup);
    }

    /// Detach the popup; returns it so the caller can tear it down
    pub fn close_popup(&self) -> Option<Arc<dyn BandSink>> {
        let popup = self.popup.write().take();
        if let Some(popup) = &popup {
            debug!("Popup '{}' detached", popup.name());
        }
        popup
    }

    /// Whether a popup is attached
    pub fn has_popup(&self) -> bool {
        self.popup.read().is_some()
    }

    /// Number of attached surfaces (1 or 2)
    pub fn surface_count(&self) -> usize {
        1 + usize::from(self.has_popup())
    }

    /// Deliver `frame` to every visible surface; returns how many received it
    pub fn broadcast(&self, frame: &BandFrame) -> usize {
        let popup = self.popup.read().clone();
        let mut delivered = 0;
        for sink in std::iter::once(&self.strip).chain(popup.as_ref()) {
            if sink.is_visible() {
                sink.publish(*frame);
                delivered += 1;
            } else {
                trace!("Skipping hidden surface '{}'", sink.name());
            }
        }
        delivered
    }
}
