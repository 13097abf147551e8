use crate::core::ms_to_frames;
use crate::detect::DB_FLOOR;
use crate::error::{AudioError, AudioResult};

/// How the loudness of one analysis window is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoudnessMeasure {
    /// Root-mean-square over every sample of every channel in the window
    #[default]
    Rms,
    /// Largest absolute sample across all channels in the window
    Peak,
}

/// Operator-supplied silence removal parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceConfig {
    /// Loudness (dBFS) at or below which a window counts as silent
    pub threshold_db: f32,
    /// Minimum run length, in milliseconds, for a silent run to be cut
    pub min_silence_duration_ms: f64,
    /// Analysis window length in milliseconds
    pub analysis_window_ms: f64,
    /// Fade span applied on each side of a splice seam, in milliseconds
    pub fade_ms: f64,
    /// Merge cuts separated by less than this much audio (off when `None`)
    pub min_gap_ms: Option<f64>,
    /// Window loudness measure
    pub measure: LoudnessMeasure,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        SilenceConfig {
            threshold_db: -20.0,
            min_silence_duration_ms: 500.0,
            analysis_window_ms: 10.0,
            fade_ms: 5.0,
            min_gap_ms: None,
            measure: LoudnessMeasure::Rms,
        }
    }
}

impl SilenceConfig {
    /// Set the silence threshold
    pub fn with_threshold_db(mut self, threshold_db: f32) -> Self {
        self.threshold_db = threshold_db;
        self
    }

    /// Set the minimum silence duration
    pub fn with_min_silence_ms(mut self, ms: f64) -> Self {
        self.min_silence_duration_ms = ms;
        self
    }

    /// Set the analysis window length
    pub fn with_window_ms(mut self, ms: f64) -> Self {
        self.analysis_window_ms = ms;
        self
    }

    /// Set the splice fade length
    pub fn with_fade_ms(mut self, ms: f64) -> Self {
        self.fade_ms = ms;
        self
    }

    /// Enable merging of cuts separated by short gaps
    pub fn with_min_gap_ms(mut self, ms: Option<f64>) -> Self {
        self.min_gap_ms = ms;
        self
    }

    /// Set the loudness measure
    pub fn with_measure(mut self, measure: LoudnessMeasure) -> Self {
        self.measure = measure;
        self
    }

    /// Check every parameter; called once before any file is touched
    pub fn validate(&self) -> AudioResult<()> {
        // Float sources can exceed full scale, so thresholds above 0 dB are allowed
        if !self.threshold_db.is_finite() || self.threshold_db <= DB_FLOOR {
            return Err(AudioError::InvalidConfiguration(format!(
                "threshold must be finite and above {} dB, got {}",
                DB_FLOOR, self.threshold_db
            )));
        }

        if !(self.min_silence_duration_ms.is_finite() && self.min_silence_duration_ms > 0.0) {
            return Err(AudioError::InvalidConfiguration(format!(
                "minimum silence duration must be positive, got {} ms",
                self.min_silence_duration_ms
            )));
        }

        if !(self.analysis_window_ms.is_finite() && self.analysis_window_ms > 0.0) {
            return Err(AudioError::InvalidConfiguration(format!(
                "analysis window must be positive, got {} ms",
                self.analysis_window_ms
            )));
        }

        if !(self.fade_ms.is_finite() && self.fade_ms >= 0.0) {
            return Err(AudioError::InvalidConfiguration(format!(
                "fade length must not be negative, got {} ms",
                self.fade_ms
            )));
        }

        if let Some(gap) = self.min_gap_ms {
            if !(gap.is_finite() && gap > 0.0) {
                return Err(AudioError::InvalidConfiguration(format!(
                    "minimum gap must be positive, got {} ms",
                    gap
                )));
            }
        }

        Ok(())
    }

    /// Analysis window in frames, never less than one
    pub fn window_frames(&self, sample_rate: u32) -> usize {
        ms_to_frames(self.analysis_window_ms, sample_rate).max(1)
    }

    /// Minimum silent run length in frames
    pub fn min_silence_frames(&self, sample_rate: u32) -> usize {
        ms_to_frames(self.min_silence_duration_ms, sample_rate)
    }

    /// Fade span in frames
    pub fn fade_frames(&self, sample_rate: u32) -> usize {
        ms_to_frames(self.fade_ms, sample_rate)
    }

    /// Merge gap in frames, if merging is enabled
    pub fn min_gap_frames(&self, sample_rate: u32) -> Option<usize> {
        self.min_gap_ms.map(|ms| ms_to_frames(ms, sample_rate))
    }
}
