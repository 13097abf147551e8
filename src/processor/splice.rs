use crate::core::{Interval, SampleBuffer};
use crate::error::AudioResult;

/// Remove `cuts` from `buffer` and join what is left.
///
/// Copied audio that ends at a cut fades out, and audio that resumes after a
/// cut fades in, each over at most `fade_frames` frames (and never more than
/// half of the kept piece). With no cuts the input is returned untouched.
pub fn splice(
    buffer: SampleBuffer,
    cuts: &[Interval],
    fade_frames: usize,
) -> AudioResult<SampleBuffer> {
    let total = buffer.frame_count();
    Interval::check_sorted_disjoint(cuts, total)?;

    if cuts.is_empty() {
        return Ok(buffer);
    }

    let channels = buffer.channels().count() as usize;
    let keeps = Interval::complement(cuts, total);
    let kept_frames: usize = keeps.iter().map(Interval::len).sum();

    let mut samples = Vec::with_capacity(kept_frames * channels);
    for keep in &keeps {
        let offset = samples.len();
        samples.extend_from_slice(buffer.frames(keep.start, keep.end));

        let piece = &mut samples[offset..];
        let fade = fade_frames.min(keep.len() / 2);
        if keep.start > 0 {
            fade_in(piece, channels, fade);
        }
        if keep.end < total {
            fade_out(piece, channels, fade);
        }
    }

    SampleBuffer::new(samples, buffer.sample_rate(), buffer.channels())
}

/// Ramp the first `frames` frames of `piece` up from zero
fn fade_in(piece: &mut [f32], channels: usize, frames: usize) {
    for (i, frame) in piece.chunks_exact_mut(channels).take(frames).enumerate() {
        let gain = i as f32 / frames as f32;
        frame.iter_mut().for_each(|s| *s *= gain);
    }
}

/// Ramp the last `frames` frames of `piece` down to zero
fn fade_out(piece: &mut [f32], channels: usize, frames: usize) {
    for (i, frame) in piece.chunks_exact_mut(channels).rev().take(frames).enumerate() {
        let gain = i as f32 / frames as f32;
        frame.iter_mut().for_each(|s| *s *= gain);
    }
}
