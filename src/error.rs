use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types for silence detection, splicing and file I/O
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported audio format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio metadata
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Input buffer is unusable (empty, ragged channels)
    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Two inputs of a batch would be written to the same file
    #[error("Output {0:?} is claimed by more than one input")]
    OutputConflict(PathBuf),

    /// Operator-supplied parameters are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Interval bookkeeping produced an impossible result
    #[error("Consistency violation: expected {expected}, got {actual}")]
    ConsistencyViolation {
        /// What the invariant required
        expected: String,
        /// What was actually computed
        actual: String,
    },
}

impl AudioError {
    /// Whether the error only concerns a single input file.
    ///
    /// Batch runs skip such files and carry on; anything else is reported
    /// as a defect.
    pub fn is_per_file(&self) -> bool {
        !matches!(
            self,
            AudioError::InvalidConfiguration(_) | AudioError::ConsistencyViolation { .. }
        )
    }
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => AudioError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                AudioError::UnsupportedFormat(what.to_string())
            }
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            e => AudioError::EncodeError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_classification() {
        assert!(AudioError::InvalidBuffer("empty".to_string()).is_per_file());
        assert!(AudioError::DecodeError("bad packet".to_string()).is_per_file());
        assert!(AudioError::OutputConflict(PathBuf::from("out/talk.wav")).is_per_file());
        assert!(!AudioError::InvalidConfiguration("window".to_string()).is_per_file());
        assert!(
            !AudioError::ConsistencyViolation {
                expected: "1".to_string(),
                actual: "2".to_string(),
            }
            .is_per_file()
        );
    }

    #[test]
    fn test_display_messages() {
        let err = AudioError::InvalidSampleRate { rate: 0 };
        assert_eq!(err.to_string(), "Invalid sample rate: 0");

        let err = AudioError::ConsistencyViolation {
            expected: "10 frames".to_string(),
            actual: "9 frames".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Consistency violation: expected 10 frames, got 9 frames"
        );
    }
}
