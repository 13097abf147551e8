use crate::config::LoudnessMeasure;
use crate::core::SampleBuffer;
use crate::error::{AudioError, AudioResult};

/// Loudness assigned to digital silence instead of negative infinity
pub const DB_FLOOR: f32 = -240.0;

/// Loudness of one analysis window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessPoint {
    /// First frame of the window
    pub start: usize,
    /// Frames actually measured (the last window may be short)
    pub len: usize,
    /// Loudness in dBFS, never below [`DB_FLOOR`]
    pub db: f32,
}

impl LoudnessPoint {
    /// One past the last frame of the window
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Loudness over time, one point per analysis window
#[derive(Debug, Clone)]
pub struct Envelope {
    points: Vec<LoudnessPoint>,
    window_frames: usize,
    total_frames: usize,
}

impl Envelope {
    /// Points in increasing start order
    pub fn points(&self) -> &[LoudnessPoint] {
        &self.points
    }

    /// Nominal window size in frames
    pub fn window_frames(&self) -> usize {
        self.window_frames
    }

    /// Length of the analysed buffer in frames
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the envelope has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the loudness envelope of `buffer`.
///
/// Each window spans `window_frames` frames across all channels. A trailing
/// partial window is measured over the frames it has.
pub fn extract_envelope(
    buffer: &SampleBuffer,
    window_frames: usize,
    measure: LoudnessMeasure,
) -> AudioResult<Envelope> {
    if window_frames == 0 {
        return Err(AudioError::InvalidConfiguration(
            "analysis window must span at least one frame".to_string(),
        ));
    }

    let channels = buffer.channels().count() as usize;
    let points = buffer
        .samples()
        .chunks(window_frames * channels)
        .enumerate()
        .map(|(idx, window)| LoudnessPoint {
            start: idx * window_frames,
            len: window.len() / channels,
            db: measure_window(window, measure),
        })
        .collect();

    Ok(Envelope {
        points,
        window_frames,
        total_frames: buffer.frame_count(),
    })
}

/// Loudness in dBFS of one window of interleaved samples
pub fn measure_window(samples: &[f32], measure: LoudnessMeasure) -> f32 {
    let level = match measure {
        LoudnessMeasure::Rms => calculate_rms(samples),
        LoudnessMeasure::Peak => calculate_peak(samples),
    };
    level_to_db(level)
}

/// Convert a linear level (1.0 = full scale) to dBFS, clamped at [`DB_FLOOR`]
pub fn level_to_db(level: f32) -> f32 {
    if level <= 0.0 {
        return DB_FLOOR;
    }
    (20.0 * level.log10()).max(DB_FLOOR)
}

fn calculate_peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|&s| s.abs())
        .fold(0.0f32, |a, b| a.max(b))
}

fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
    (sum_squared / samples.len() as f32).sqrt()
}
