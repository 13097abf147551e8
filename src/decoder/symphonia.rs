use crate::core::{AudioMetadata, BitDepth, Channels, SampleBuffer, frames_to_duration};
use crate::error::{AudioError, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer as InterleavedBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Demuxer for the container
    reader: Box<dyn FormatReader>,
    /// Track being decoded
    track_id: u32,
    /// Sample rate
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Whether decoding is finished
    finished: bool,
    /// Codec decoder for the track
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Stream information gathered while probing
    metadata: AudioMetadata,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = Box::new(File::open(path)?);
        let mss = MediaSourceStream::new(file, Default::default());

        // Probe the file to detect format
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?
            .clone();

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        let channels = match codec_params.channels {
            Some(channels) => Channels::from_count(channels.count() as u32)?,
            None => {
                return Err(AudioError::InvalidMetadata(
                    "Unknown channel count".to_string(),
                ));
            }
        };

        let codec = symphonia::default::get_codecs()
            .get_codec(codec_params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut metadata = AudioMetadata::new(sample_rate, channels, codec)?;
        if let Some(frames) = codec_params.n_frames {
            metadata = metadata.with_duration(frames_to_duration(frames as usize, sample_rate));
        }
        if let Some(depth) = codec_params.bits_per_sample.and_then(BitDepth::from_bits) {
            metadata = metadata.with_bit_depth(depth);
        }

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        debug!(
            "opened {:?}: {} Hz, {}, codec {}",
            path,
            sample_rate,
            channels.name(),
            metadata.codec
        );

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            sample_rate,
            channels,
            finished: false,
            decoder,
            metadata,
        })
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channels
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Stream information gathered while probing
    pub fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn decode_frame(&mut self) -> AudioResult<Option<SampleBuffer>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    return Ok(None);
                }
                Err(SymphoniaError::DecodeError(msg)) => {
                    warn!("skipping corrupt packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            // Only process packets from our audio track
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    warn!("skipping undecodable packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            if spec.channels.count() as u32 != self.channels.count() {
                return Err(AudioError::InvalidChannels {
                    expected: self.channels.count(),
                    got: spec.channels.count() as u32,
                });
            }

            let mut interleaved = InterleavedBuffer::<f32>::new(decoded.capacity() as u64, spec);
            interleaved.copy_interleaved_ref(decoded);

            let frame =
                SampleBuffer::new(interleaved.samples().to_vec(), self.sample_rate, self.channels)?;
            return Ok(Some(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use crate::encoder::write_wav;
    use tempfile::Builder;

    #[test]
    fn test_invalid_file() {
        let result = SymphoniaDecoder::from_file("/nonexistent/file.mp3");
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn test_garbage_file_is_unsupported() {
        let temp = Builder::new().suffix(".wav").tempfile().unwrap();
        std::fs::write(temp.path(), b"definitely not a riff header").unwrap();
        assert!(SymphoniaDecoder::from_file(temp.path()).is_err());
    }

    #[test]
    fn test_wav_roundtrip() {
        let temp = Builder::new().suffix(".wav").tempfile().unwrap();
        let samples: Vec<f32> = (0..4000).map(|i| ((i as f32) * 0.01).sin() * 0.5).collect();
        let original = SampleBuffer::new(samples, 16000, Channels::Stereo).unwrap();
        write_wav(temp.path(), &original).unwrap();

        let mut decoder = SymphoniaDecoder::from_file(temp.path()).unwrap();
        assert_eq!(decoder.sample_rate(), 16000);
        assert_eq!(decoder.channels(), Channels::Stereo);
        assert_eq!(decoder.metadata().duration, Some(original.duration()));

        let mut decoded = SampleBuffer::empty(16000, Channels::Stereo).unwrap();
        while let Some(frame) = decoder.decode_frame().unwrap() {
            decoded.append(&frame).unwrap();
        }
        assert_eq!(decoded, original);
        assert!(decoder.decode_frame().unwrap().is_none());
    }
}
