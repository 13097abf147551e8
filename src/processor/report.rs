use crate::core::{Interval, frames_to_duration};
use crate::error::{AudioError, AudioResult};
use std::fmt;
use std::time::Duration;

/// Summary of one silence removal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Sample rate the frame counts refer to
    pub sample_rate: u32,
    /// Frames in the input buffer
    pub input_frames: usize,
    /// Frames removed by cuts
    pub removed_frames: usize,
    /// Frames in the spliced output
    pub output_frames: usize,
    /// Number of cut intervals
    pub cut_count: usize,
}

impl Report {
    /// Summarize a run and verify that `output = input - removed`
    pub fn build(
        input_frames: usize,
        cuts: &[Interval],
        output_frames: usize,
        sample_rate: u32,
    ) -> AudioResult<Self> {
        let removed_frames: usize = cuts.iter().map(Interval::len).sum();

        if input_frames.checked_sub(removed_frames) != Some(output_frames) {
            return Err(AudioError::ConsistencyViolation {
                expected: format!(
                    "{} output frames ({} input - {} removed)",
                    input_frames.saturating_sub(removed_frames),
                    input_frames,
                    removed_frames
                ),
                actual: format!("{} output frames", output_frames),
            });
        }

        Ok(Report {
            sample_rate,
            input_frames,
            removed_frames,
            output_frames,
            cut_count: cuts.len(),
        })
    }

    /// Duration of the input
    pub fn input_duration(&self) -> Duration {
        frames_to_duration(self.input_frames, self.sample_rate)
    }

    /// Total duration of all cuts
    pub fn removed_duration(&self) -> Duration {
        frames_to_duration(self.removed_frames, self.sample_rate)
    }

    /// Duration of the output
    pub fn output_duration(&self) -> Duration {
        frames_to_duration(self.output_frames, self.sample_rate)
    }

    /// Share of the input that was removed, 0.0 to 1.0
    pub fn removed_ratio(&self) -> f64 {
        if self.input_frames == 0 {
            return 0.0;
        }
        self.removed_frames as f64 / self.input_frames as f64
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}s -> {:.3}s, removed {:.3}s ({:.1}%) in {} cut(s)",
            self.input_duration().as_secs_f64(),
            self.output_duration().as_secs_f64(),
            self.removed_duration().as_secs_f64(),
            self.removed_ratio() * 100.0,
            self.cut_count
        )
    }
}
