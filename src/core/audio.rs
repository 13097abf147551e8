use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
    /// Quad (4 channels)
    Quad = 4,
    /// 5.1 surround sound
    SurroundFivePointOne = 6,
    /// 7.1 surround sound
    SurroundSevenPointOne = 8,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> AudioResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Err(AudioError::InvalidChannels {
                expected: 1,
                got: n,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
        }
    }
}

/// Bit depth of the source stream, as reported by the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit
    I8,
    /// 16-bit signed
    I16,
    /// 24-bit signed
    I24,
    /// 32-bit (integer or float)
    I32,
}

impl BitDepth {
    /// Map a bits-per-sample value onto a known depth
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::I8),
            16 => Some(BitDepth::I16),
            24 => Some(BitDepth::I24),
            32 => Some(BitDepth::I32),
            _ => None,
        }
    }

    /// Number of bits per sample
    pub fn bits(&self) -> u32 {
        match self {
            BitDepth::I8 => 8,
            BitDepth::I16 => 16,
            BitDepth::I24 => 24,
            BitDepth::I32 => 32,
        }
    }
}

/// Decoded audio held in memory.
///
/// Samples are interleaved `f32` in `-1.0..=1.0`. Positions handed around the
/// crate (intervals, envelope points) are *frame* indices: one frame holds one
/// sample per channel. An empty buffer is a legal value (a fully removed
/// recording); [`SampleBuffer::validate_input`] is what rejects it as input.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: Channels,
}

impl SampleBuffer {
    /// Create a buffer from interleaved samples
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidBuffer("sample rate is zero".to_string()));
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::InvalidBuffer(format!(
                "{} samples cannot be split evenly across {} channels",
                samples.len(),
                channels.count()
            )));
        }

        Ok(SampleBuffer {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Create a buffer from one vector per channel
    pub fn from_planar(planes: Vec<Vec<f32>>, sample_rate: u32) -> AudioResult<Self> {
        let channels = Channels::from_count(planes.len() as u32)?;
        let frames = planes[0].len();

        if let Some((idx, plane)) = planes.iter().enumerate().find(|(_, p)| p.len() != frames) {
            return Err(AudioError::InvalidBuffer(format!(
                "channel {} has {} samples, channel 0 has {}",
                idx,
                plane.len(),
                frames
            )));
        }

        let mut samples = Vec::with_capacity(frames * planes.len());
        for frame in 0..frames {
            for plane in &planes {
                samples.push(plane[frame]);
            }
        }

        SampleBuffer::new(samples, sample_rate, channels)
    }

    /// An empty buffer with the given format
    pub fn empty(sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        SampleBuffer::new(Vec::new(), sample_rate, channels)
    }

    /// Reject buffers that cannot be analysed
    pub fn validate_input(&self) -> AudioResult<()> {
        if self.samples.is_empty() {
            return Err(AudioError::InvalidBuffer("input contains no samples".to_string()));
        }
        Ok(())
    }

    /// Append another buffer of the same format
    pub fn append(&mut self, other: &SampleBuffer) -> AudioResult<()> {
        if other.sample_rate != self.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: other.sample_rate,
            });
        }
        if other.channels != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: other.channels.count(),
            });
        }
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }

    /// Get reference to the interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Interleaved samples for the frame range `start..end`
    pub fn frames(&self, start: usize, end: usize) -> &[f32] {
        let n = self.channels.count() as usize;
        &self.samples[start * n..end * n]
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get duration of this buffer
    pub fn duration(&self) -> Duration {
        frames_to_duration(self.frame_count(), self.sample_rate)
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Convert a frame count to wall-clock time
pub fn frames_to_duration(frames: usize, sample_rate: u32) -> Duration {
    Duration::from_secs_f64(frames as f64 / sample_rate as f64)
}

/// Convert milliseconds to the nearest whole frame count
pub fn ms_to_frames(ms: f64, sample_rate: u32) -> usize {
    (ms * sample_rate as f64 / 1000.0).round() as usize
}

/// Audio metadata/information
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    /// Total duration of the audio
    pub duration: Option<Duration>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: Channels,
    /// Codec name (e.g., "mp3", "flac", "aac")
    pub codec: String,
    /// Bit depth if known
    pub bit_depth: Option<BitDepth>,
}

impl AudioMetadata {
    /// Create new metadata
    pub fn new(sample_rate: u32, channels: Channels, codec: String) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(AudioMetadata {
            duration: None,
            sample_rate,
            channels,
            codec,
            bit_depth: None,
        })
    }

    /// Set duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set bit depth
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}
