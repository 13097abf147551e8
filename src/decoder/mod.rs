//! Audio decoder implementations

pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::SampleBuffer;
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Get the next chunk of decoded audio, or `None` at end of stream
    fn decode_frame(&mut self) -> AudioResult<Option<SampleBuffer>>;
}

/// Create a decoder from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    let path = path.as_ref();
    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Decode a whole file into memory
pub fn decode_file<P: AsRef<Path>>(path: P) -> AudioResult<SampleBuffer> {
    let mut decoder = SymphoniaDecoder::from_file(path)?;
    let mut buffer = SampleBuffer::empty(decoder.sample_rate(), decoder.channels())?;
    while let Some(frame) = decoder.decode_frame()? {
        buffer.append(&frame)?;
    }
    Ok(buffer)
}
