//! Audio encoder implementations

pub mod wav;

pub use wav::WavEncoder;

use crate::core::SampleBuffer;
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio encoders
pub trait Encoder {
    /// Encode a buffer to output
    fn encode(&mut self, buffer: &SampleBuffer) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Write `buffer` to `path` as a WAV file in one go
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer) -> AudioResult<()> {
    let mut encoder = WavEncoder::new(path, buffer.sample_rate(), buffer.channels())?;
    encoder.encode(buffer)?;
    encoder.finalize()
}
