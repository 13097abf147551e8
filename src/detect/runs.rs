use super::Envelope;
use crate::config::SilenceConfig;
use crate::core::Interval;
use crate::error::{AudioError, AudioResult};

/// Filtering and merging rules for silent runs, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Runs shorter than this stay in the output
    pub min_silence_frames: usize,
    /// Cuts separated by fewer frames than this are merged
    pub min_gap_frames: Option<usize>,
}

impl RunPolicy {
    /// Resolve the millisecond settings of `config` at `sample_rate`
    pub fn from_config(config: &SilenceConfig, sample_rate: u32) -> Self {
        RunPolicy {
            min_silence_frames: config.min_silence_frames(sample_rate),
            min_gap_frames: config.min_gap_frames(sample_rate),
        }
    }

    /// A run qualifies as a cut when it is at least the minimum length
    pub fn qualifies(&self, run: &Interval) -> bool {
        !run.is_empty() && run.len() >= self.min_silence_frames
    }

    /// Apply the optional merge step to already-filtered cuts
    pub fn merge(&self, cuts: Vec<Interval>) -> Vec<Interval> {
        match self.min_gap_frames {
            Some(gap) => merge_close_cuts(cuts, gap),
            None => cuts,
        }
    }
}

/// Maximal runs of consecutive silent points, in frames
pub fn find_silence_runs(envelope: &Envelope, labels: &[bool]) -> AudioResult<Vec<Interval>> {
    if labels.len() != envelope.len() {
        return Err(AudioError::ConsistencyViolation {
            expected: format!("{} labels", envelope.len()),
            actual: format!("{} labels", labels.len()),
        });
    }

    let (mut runs, open) = envelope.points().iter().zip(labels).fold(
        (Vec::new(), None),
        |(mut runs, open): (Vec<Interval>, Option<usize>), (point, &silent)| match (open, silent)
        {
            (None, true) => (runs, Some(point.start)),
            (Some(start), false) => {
                runs.push(Interval::new(start, point.start));
                (runs, None)
            }
            (open, _) => (runs, open),
        },
    );

    if let Some(start) = open {
        runs.push(Interval::new(start, envelope.total_frames()));
    }

    Ok(runs)
}

/// Silent runs long enough to remove, merged per `policy`
pub fn find_cut_intervals(
    envelope: &Envelope,
    labels: &[bool],
    policy: &RunPolicy,
) -> AudioResult<Vec<Interval>> {
    let cuts = find_silence_runs(envelope, labels)?
        .into_iter()
        .filter(|run| policy.qualifies(run))
        .collect();

    Ok(policy.merge(cuts))
}

/// Join consecutive cuts whose gap is shorter than `min_gap_frames`
pub fn merge_close_cuts(cuts: Vec<Interval>, min_gap_frames: usize) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::with_capacity(cuts.len());

    for cut in cuts {
        match merged.last_mut() {
            Some(prev) if cut.start - prev.end < min_gap_frames => prev.end = cut.end,
            _ => merged.push(cut),
        }
    }

    merged
}
