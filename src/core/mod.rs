//! Core audio types and structures

/// Sample buffer and metadata types
pub mod audio;
/// Frame ranges used for cuts and keeps
pub mod interval;

pub use audio::{
    AudioMetadata, BitDepth, Channels, SampleBuffer, frames_to_duration, ms_to_frames,
};
pub use interval::Interval;
