use super::{Report, splice};
use crate::config::SilenceConfig;
use crate::core::{Interval, SampleBuffer};
use crate::decoder::{self, Decoder};
use crate::detect::{ChunkedDetector, RunPolicy, classify, extract_envelope, find_cut_intervals};
use crate::encoder::write_wav;
use crate::error::{AudioError, AudioResult};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Silence removal for one buffer or file at a time.
///
/// Holds only the validated configuration; all per-file state lives inside
/// each call, so one remover can be shared by many worker threads.
#[derive(Debug, Clone)]
pub struct SilenceRemover {
    config: SilenceConfig,
}

impl SilenceRemover {
    /// Validate `config` and build a remover
    pub fn new(config: SilenceConfig) -> AudioResult<Self> {
        config.validate()?;
        Ok(SilenceRemover { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &SilenceConfig {
        &self.config
    }

    /// Find the cut intervals of `buffer` without modifying it
    pub fn detect(&self, buffer: &SampleBuffer) -> AudioResult<Vec<Interval>> {
        buffer.validate_input()?;
        let rate = buffer.sample_rate();

        let window = self.config.window_frames(rate);
        let policy = RunPolicy::from_config(&self.config, rate);

        let envelope = extract_envelope(buffer, window, self.config.measure)?;
        let labels = classify(&envelope, self.config.threshold_db);
        let cuts = find_cut_intervals(&envelope, &labels, &policy)?;

        debug!(
            "{} windows, {} silent, {} cut(s)",
            envelope.len(),
            labels.iter().filter(|&&silent| silent).count(),
            cuts.len()
        );
        Ok(cuts)
    }

    /// Remove silence from an in-memory buffer
    pub fn process(&self, buffer: SampleBuffer) -> AudioResult<(SampleBuffer, Report)> {
        let cuts = self.detect(&buffer)?;
        self.splice_and_report(buffer, &cuts)
    }

    /// Remove silence from a decoded stream, detecting while decoding
    pub fn process_stream(&self, decoder: &mut dyn Decoder) -> AudioResult<(SampleBuffer, Report)> {
        let mut buffer = decoder
            .decode_frame()?
            .ok_or_else(|| AudioError::InvalidBuffer("stream contains no audio".to_string()))?;

        let mut detector =
            ChunkedDetector::new(buffer.sample_rate(), buffer.channels(), &self.config);
        detector.push(buffer.samples());

        while let Some(frame) = decoder.decode_frame()? {
            buffer.append(&frame)?;
            detector.push(frame.samples());
        }

        buffer.validate_input()?;
        let cuts = detector.finish();
        self.splice_and_report(buffer, &cuts)
    }

    /// Decode `input`, remove silence and write the result to `output` as WAV.
    ///
    /// The result is written next to `output` with a `.part` suffix and
    /// renamed only once complete, so a failed run leaves no output behind.
    pub fn process_file(&self, input: &Path, output: &Path) -> AudioResult<Report> {
        info!("Processing {:?}", input);

        let mut decoder = decoder::from_file(input)?;
        let (spliced, report) = self.process_stream(decoder.as_mut())?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let partial = partial_path(output);
        if let Err(e) = write_wav(&partial, &spliced) {
            if let Err(cleanup) = fs::remove_file(&partial) {
                debug!("could not remove {:?}: {}", partial, cleanup);
            }
            return Err(e);
        }
        fs::rename(&partial, output)?;

        info!("Wrote {:?}: {}", output, report);
        Ok(report)
    }

    fn splice_and_report(
        &self,
        buffer: SampleBuffer,
        cuts: &[Interval],
    ) -> AudioResult<(SampleBuffer, Report)> {
        let rate = buffer.sample_rate();
        let input_frames = buffer.frame_count();

        let output = splice(buffer, cuts, self.config.fade_frames(rate))?;
        let report = Report::build(input_frames, cuts, output.frame_count(), rate)?;

        Ok((output, report))
    }
}

/// Temporary sibling used while `output` is being written
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
