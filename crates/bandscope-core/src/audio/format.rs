//! Raw PCM buffers and their format descriptors.

use crate::{CoreError, Result};

/// Bit depth of signed interleaved PCM samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// Signed 8-bit
    Bits8,
    /// Signed 16-bit little-endian
    Bits16,
    /// Signed 32-bit little-endian
    Bits32,
}

impl SampleDepth {
    /// Parse a bit count
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            32 => Ok(Self::Bits32),
            other => Err(CoreError::UnsupportedBitDepth(other)),
        }
    }

    /// Bytes per sample
    pub fn bytes(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
            Self::Bits32 => 4,
        }
    }

    fn decode(self, bytes: &[u8]) -> f32 {
        match self {
            Self::Bits8 => bytes[0] as i8 as f32,
            Self::Bits16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f32,
            Self::Bits32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f32,
        }
    }
}

/// Format descriptor delivered alongside each raw buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    depth: SampleDepth,
    channels: u16,
}

impl AudioFormat {
    /// Create a descriptor; bit depth must be 8/16/32 and channels 1 or 2
    pub fn new(bits: u16, channels: u16) -> Result<Self> {
        let depth = SampleDepth::from_bits(bits)?;
        if !(1..=2).contains(&channels) {
            return Err(CoreError::UnsupportedChannelCount(channels));
        }
        Ok(Self { depth, channels })
    }

    /// 16-bit mono, the common test format
    pub fn mono_16() -> Self {
        Self {
            depth: SampleDepth::Bits16,
            channels: 1,
        }
    }

    /// 16-bit interleaved stereo
    pub fn stereo_16() -> Self {
        Self {
            depth: SampleDepth::Bits16,
            channels: 2,
        }
    }

    /// Sample bit depth
    pub fn depth(&self) -> SampleDepth {
        self.depth
    }

    /// Interleaved channel count
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Bytes per interleaved frame (all channels)
    pub fn frame_size(&self) -> usize {
        self.depth.bytes() * self.channels as usize
    }
}

/// A borrowed raw PCM buffer, read-only for one analysis call
#[derive(Debug, Clone, Copy)]
pub struct RawAudioFrame<'a> {
    data: &'a [u8],
    format: AudioFormat,
}

impl<'a> RawAudioFrame<'a> {
    /// Wrap a byte buffer with its format
    pub fn new(data: &'a [u8], format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Buffer format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Raw bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The last `frames` whole frames; misaligned or shorter buffers are returned as-is
    pub fn tail(&self, frames: usize) -> Self {
        let frame_size = self.format.frame_size();
        let len = self.data.len();
        if len % frame_size != 0 || len / frame_size <= frames {
            return *self;
        }
        Self {
            data: &self.data[len - frames * frame_size..],
            format: self.format,
        }
    }

    /// Decode into mono floats (stereo pairs averaged), replacing `out`'s contents.
    ///
    /// Values keep their integer scale; normalisation happens in the analyzer.
    pub fn decode_mono_into(&self, out: &mut Vec<f32>) -> Result<()> {
        out.clear();
        let frame_size = self.format.frame_size();
        if self.data.is_empty() {
            return Err(CoreError::EmptyBuffer);
        }
        if self.data.len() % frame_size != 0 {
            return Err(CoreError::MalformedBuffer {
                len: self.data.len(),
                frame_size,
            });
        }

        let depth = self.format.depth;
        let width = depth.bytes();
        out.reserve(self.data.len() / frame_size);

        for frame in self.data.chunks_exact(frame_size) {
            let sum: f32 = frame.chunks_exact(width).map(|s| depth.decode(s)).sum();
            out.push(sum / self.format.channels as f32);
        }
        Ok(())
    }
}
