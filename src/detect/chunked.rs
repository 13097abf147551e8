use super::{RunPolicy, is_silent, measure_window};
use crate::config::{LoudnessMeasure, SilenceConfig};
use crate::core::{Channels, Interval};

/// Incremental silence detector fed one decoded chunk at a time.
///
/// Windows are aligned to frame 0 of the stream regardless of how the input
/// is chunked, and the open silent run is carried from chunk to chunk, so
/// [`ChunkedDetector::finish`] returns exactly what the whole-buffer stages
/// would on the concatenated input.
#[derive(Debug)]
pub struct ChunkedDetector {
    channels: usize,
    window_frames: usize,
    threshold_db: f32,
    measure: LoudnessMeasure,
    policy: RunPolicy,
    /// Samples of the window currently being filled
    pending: Vec<f32>,
    /// Frames covered by completed windows
    position: usize,
    /// Start frame of the silent run still in progress
    open_run: Option<usize>,
    cuts: Vec<Interval>,
}

impl ChunkedDetector {
    /// Create a detector for a stream of the given format
    pub fn new(sample_rate: u32, channels: Channels, config: &SilenceConfig) -> Self {
        let window_frames = config.window_frames(sample_rate);
        let channels = channels.count() as usize;

        ChunkedDetector {
            channels,
            window_frames,
            threshold_db: config.threshold_db,
            measure: config.measure,
            policy: RunPolicy::from_config(config, sample_rate),
            pending: Vec::with_capacity(window_frames * channels),
            position: 0,
            open_run: None,
            cuts: Vec::new(),
        }
    }

    /// Feed the next chunk of interleaved samples
    pub fn push(&mut self, samples: &[f32]) {
        let window_len = self.window_frames * self.channels;
        let mut rest = samples;

        if !self.pending.is_empty() {
            let take = (window_len - self.pending.len()).min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if self.pending.len() < window_len {
                return;
            }
            let window = std::mem::take(&mut self.pending);
            self.observe(&window);
        }

        let mut windows = rest.chunks_exact(window_len);
        for window in &mut windows {
            self.observe(window);
        }
        self.pending.extend_from_slice(windows.remainder());
    }

    /// Frames received so far
    pub fn frames_seen(&self) -> usize {
        self.position + self.pending.len() / self.channels
    }

    /// Cuts confirmed so far; runs still open are not included
    pub fn confirmed_cuts(&self) -> &[Interval] {
        &self.cuts
    }

    /// Flush the trailing partial window and close any open run
    pub fn finish(mut self) -> Vec<Interval> {
        if !self.pending.is_empty() {
            let window = std::mem::take(&mut self.pending);
            self.observe(&window);
        }

        if let Some(start) = self.open_run.take() {
            self.close_run(start, self.position);
        }

        self.policy.merge(self.cuts)
    }

    fn observe(&mut self, window: &[f32]) {
        let silent = is_silent(measure_window(window, self.measure), self.threshold_db);

        match (self.open_run, silent) {
            (None, true) => self.open_run = Some(self.position),
            (Some(start), false) => {
                self.open_run = None;
                self.close_run(start, self.position);
            }
            _ => {}
        }

        self.position += window.len() / self.channels;
    }

    fn close_run(&mut self, start: usize, end: usize) {
        let run = Interval::new(start, end);
        if self.policy.qualifies(&run) {
            self.cuts.push(run);
        }
    }
}
