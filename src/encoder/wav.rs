use crate::core::{Channels, SampleBuffer};
use crate::error::{AudioError, AudioResult};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes spliced buffers as 32-bit float WAV.
///
/// Every buffer must match the rate and layout the file was opened with;
/// samples are written unchanged, so levels above full scale survive.
pub struct WavEncoder {
    writer: Option<WavWriter<BufWriter<File>>>,
    spec: WavSpec,
}

impl WavEncoder {
    /// Open `path` for a stream of `channels` at `sample_rate`
    pub fn new<P: AsRef<Path>>(path: P, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        let spec = WavSpec {
            channels: channels.count() as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        Ok(WavEncoder {
            writer: Some(WavWriter::create(path, spec)?),
            spec,
        })
    }

    /// Frames written so far; zero once finalized
    pub fn frames_written(&self) -> u32 {
        self.writer.as_ref().map_or(0, |w| w.duration())
    }

    fn check_format(&self, buffer: &SampleBuffer) -> AudioResult<()> {
        if buffer.sample_rate() != self.spec.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: buffer.sample_rate(),
            });
        }

        let got = buffer.channels().count();
        if got != u32::from(self.spec.channels) {
            return Err(AudioError::InvalidChannels {
                expected: u32::from(self.spec.channels),
                got,
            });
        }

        Ok(())
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, buffer: &SampleBuffer) -> AudioResult<()> {
        self.check_format(buffer)?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::EncodeError("WAV file already finalized".to_string()))?;

        buffer
            .samples()
            .iter()
            .try_for_each(|&sample| writer.write_sample(sample))?;
        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        match self.writer.take() {
            Some(writer) => Ok(writer.finalize()?),
            None => Ok(()),
        }
    }
}
