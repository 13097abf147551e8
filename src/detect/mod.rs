//! Silence detection: loudness envelope, per-window labels and cut intervals
//!
//! The stages run strictly downstream:
//! buffer → [`extract_envelope`] → [`classify`] → [`find_cut_intervals`].
//! [`ChunkedDetector`] performs the same three stages incrementally while a
//! stream is being decoded.

/// Incremental detection over decoded chunks
pub mod chunked;
/// Per-window silent / non-silent labels
pub mod classify;
/// Windowed loudness measurement
pub mod envelope;
/// Silent runs, minimum-duration filter and merging
pub mod runs;

pub use chunked::ChunkedDetector;
pub use classify::{classify, is_silent};
pub use envelope::{
    DB_FLOOR, Envelope, LoudnessPoint, extract_envelope, level_to_db, measure_window,
};
pub use runs::{RunPolicy, find_cut_intervals, find_silence_runs, merge_close_cuts};
