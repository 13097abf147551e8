//! Splicing, reporting and the per-file and batch pipelines

/// Directory processing on a worker pool
pub mod batch;
/// Per-file silence removal
pub mod pipeline;
/// Removed / remaining totals for one file
pub mod report;
/// Joining keep intervals with fades at the seams
pub mod splice;

pub use batch::{BatchProcessor, FileOutcome};
pub use pipeline::SilenceRemover;
pub use report::Report;
pub use splice::splice;
