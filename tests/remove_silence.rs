use desilence::decoder::decode_file;
use desilence::encoder::write_wav;
use desilence::{
    AudioError, Channels, Interval, LoudnessMeasure, SampleBuffer, SilenceConfig, SilenceRemover,
};
use std::f32::consts::PI;
use tempfile::TempDir;

const RATE: u32 = 44100;

fn secs(s: f64) -> usize {
    (s * RATE as f64).round() as usize
}

/// Stereo buffer: a 440/660 Hz tone pair where `loud(t)` holds, silence elsewhere
fn stereo_program(seconds: f64, loud: impl Fn(f64) -> bool) -> SampleBuffer {
    let frames = secs(seconds);
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for i in 0..frames {
        let t = i as f64 / RATE as f64;
        if loud(t) {
            left.push((2.0 * PI * 440.0 * t as f32).sin());
            right.push((2.0 * PI * 660.0 * t as f32).sin() * 0.5);
        } else {
            left.push(0.0);
            right.push(0.0);
        }
    }
    SampleBuffer::from_planar(vec![left, right], RATE).unwrap()
}

fn covers_exactly(cuts: &[Interval], total: usize) {
    let keeps = Interval::complement(cuts, total);
    let covered: usize = cuts.iter().chain(keeps.iter()).map(Interval::len).sum();
    assert_eq!(covered, total);
}

#[test]
fn removes_two_gaps_from_stereo_program() {
    let buffer = stereo_program(10.0, |t| !((2.0..4.0).contains(&t) || (6.0..8.0).contains(&t)));
    let total = buffer.frame_count();

    let remover = SilenceRemover::new(SilenceConfig::default()).unwrap();
    let cuts = remover.detect(&buffer).unwrap();
    assert_eq!(
        cuts,
        vec![Interval::new(secs(2.0), secs(4.0)), Interval::new(secs(6.0), secs(8.0))]
    );
    covers_exactly(&cuts, total);

    let (output, report) = remover.process(buffer).unwrap();
    assert_eq!(output.channels(), Channels::Stereo);
    assert_eq!(output.sample_rate(), RATE);
    assert_eq!(output.frame_count(), secs(6.0));
    assert_eq!(report.cut_count, 2);
    assert_eq!(report.input_frames - report.removed_frames, report.output_frames);
}

#[test]
fn non_silent_input_is_untouched() {
    let buffer = stereo_program(4.0, |t| !(1.0..1.3).contains(&t));
    let original = buffer.clone();

    for measure in [LoudnessMeasure::Rms, LoudnessMeasure::Peak] {
        let config = SilenceConfig::default().with_measure(measure);
        let remover = SilenceRemover::new(config).unwrap();
        let (output, report) = remover.process(buffer.clone()).unwrap();
        assert_eq!(report.cut_count, 0);
        assert_eq!(output, original);
    }
}

#[test]
fn merging_joins_cuts_across_blips() {
    // Two 600 ms silences separated by a 50 ms blip
    let buffer = stereo_program(3.0, |t| !((1.0..1.6).contains(&t) || (1.65..2.25).contains(&t)));

    let separate = SilenceRemover::new(SilenceConfig::default()).unwrap();
    assert_eq!(separate.detect(&buffer).unwrap().len(), 2);

    let merging =
        SilenceRemover::new(SilenceConfig::default().with_min_gap_ms(Some(100.0))).unwrap();
    let cuts = merging.detect(&buffer).unwrap();
    assert_eq!(cuts.len(), 1);
    assert_eq!(cuts[0].start, secs(1.0));
    assert_eq!(cuts[0].end, secs(2.25));
}

#[test]
fn wav_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("lecture.wav");
    let output = dir.path().join("lecture.trimmed.wav");

    let buffer = stereo_program(5.0, |t| !(1.0..3.0).contains(&t));
    write_wav(&input, &buffer).unwrap();

    let remover = SilenceRemover::new(SilenceConfig::default()).unwrap();
    let report = remover.process_file(&input, &output).unwrap();
    assert_eq!(report.cut_count, 1);
    assert_eq!(report.removed_frames, secs(2.0));

    let written = decode_file(&output).unwrap();
    assert_eq!(written.channels(), Channels::Stereo);
    assert_eq!(written.frame_count(), secs(3.0));
}

#[test]
fn invalid_configuration_is_reported_before_processing() {
    let config = SilenceConfig::default().with_min_silence_ms(-1.0);
    assert!(matches!(
        SilenceRemover::new(config),
        Err(AudioError::InvalidConfiguration(_))
    ));
}
