//! Last-value-wins handoff of band frames between lanes.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::bands::BandFrame;

#[derive(Debug)]
struct Stamped {
    sequence: u64,
    frame: BandFrame,
}

/// Single-slot mailbox holding the most recently published frame.
///
/// Publishing swaps a pointer, so a reader never observes a half-written
/// vector and the audio lane never waits on a render lane. There is no
/// queue: frames published between two reads are simply superseded.
/// Sequence numbers stay monotonic with several publishers.
#[derive(Debug, Default)]
pub struct BandSlot {
    latest: ArcSwapOption<Stamped>,
}

impl BandSlot {
    /// Empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held frame; returns its sequence number (starting at 1)
    pub fn publish(&self, frame: BandFrame) -> u64 {
        let previous = self.latest.rcu(|current| {
            let sequence = current.as_ref().map_or(0, |stamped| stamped.sequence) + 1;
            Some(Arc::new(Stamped { sequence, frame }))
        });
        previous.map_or(0, |stamped| stamped.sequence) + 1
    }

    /// Most recent frame, if anything was ever published
    pub fn latest(&self) -> Option<BandFrame> {
        self.latest.load_full().map(|stamped| stamped.frame)
    }

    /// Sequence number of the held frame (0 when empty)
    pub fn sequence(&self) -> u64 {
        self.latest
            .load_full()
            .map_or(0, |stamped| stamped.sequence)
    }

    /// Frame newer than `seen`, advancing `seen` to its sequence number
    pub fn take_newer(&self, seen: &mut u64) -> Option<BandFrame> {
        let guard = self.latest.load();
        let stamped = Option::as_ref(&*guard)?;
        if stamped.sequence > *seen {
            *seen = stamped.sequence;
            Some(stamped.frame)
        } else {
            None
        }
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
    fn test_empty_slot() {
        let slot = BandSlot::new();
        let mut seen = 0;
        assert!(slot.latest().is_none());
        assert_eq!(slot.sequence(), 0);
        assert!(slot.take_newer(&mut seen).is_none());
    }

    #[test]
    fn test_last_value_wins() {
        let slot = BandSlot::new();
        slot.publish(frame(0.1));
        slot.publish(frame(0.2));
        let third = slot.publish(frame(0.3));
        assert_eq!(third, 3);

        let mut seen = 0;
        let taken = slot.take_newer(&mut seen).unwrap();
        assert!((taken.bands()[0] - 0.3).abs() < 1e-6);
        assert_eq!(seen, 3);
        assert!(slot.take_newer(&mut seen).is_none());
        // latest() still returns the held frame for redraws
        assert!(slot.latest().is_some());
    }

    #[test]
    fn test_concurrent_publish_is_never_torn() {
        let slot = Arc::new(BandSlot::new());
        let writer = {
            let slot = slot.clone();
            std::thread::spawn(move || {
                for i in 0..2000 {
                    slot.publish(frame((i % 10) as f32 / 10.0));
                }
            })
        };
        let mut seen = 0;
        for _ in 0..2000 {
            if let Some(f) = slot.take_newer(&mut seen) {
                let first = f.bands()[0];
                assert!(f.bands().as_slice().iter().all(|v| *v == first));
            }
        }
        writer.join().unwrap();
    }
}
