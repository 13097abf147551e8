#![warn(missing_docs)]

//! # desilence: silence removal for audio recordings
//!
//! Finds every stretch of audio that stays at or below a loudness threshold
//! for at least a minimum duration, cuts it out, and joins the remaining
//! audio with short fades at each seam.
//!
//! ## Pipeline
//!
//! - **Envelope** - windowed RMS (or peak) loudness in dBFS
//! - **Classify** - per-window silent / non-silent labels
//! - **Runs** - maximal silent runs, filtered by minimum duration
//! - **Splice** - keep intervals concatenated with micro-fades
//! - **Report** - removed / remaining duration with a consistency check
//!
//! ## Quick Start
//!
//! ```ignore
//! use desilence::{SampleBuffer, Channels, SilenceConfig, SilenceRemover};
//!
//! let buffer = SampleBuffer::new(samples, 44100, Channels::Mono)?;
//! let remover = SilenceRemover::new(SilenceConfig::default().with_threshold_db(-35.0))?;
//! let (output, report) = remover.process(buffer)?;
//! println!("{}", report);
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Silence removal parameters
pub mod config;
/// Loudness envelope and silence run detection
pub mod detect;
/// Audio decoder implementations
pub mod decoder;
/// Audio encoder implementations
pub mod encoder;
/// Splicing, reporting and processing pipelines
pub mod processor;

pub use config::{LoudnessMeasure, SilenceConfig};
pub use crate::core::{AudioMetadata, BitDepth, Channels, Interval, SampleBuffer};
pub use error::{AudioError, AudioResult};
pub use processor::{BatchProcessor, FileOutcome, Report, SilenceRemover};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
