use super::{Report, SilenceRemover};
use crate::config::SilenceConfig;
use crate::error::{AudioError, AudioResult};
use log::{error, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions picked up when processing a directory
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg", "aac"];

/// Result of processing one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    /// Source file
    pub input: PathBuf,
    /// Destination file
    pub output: PathBuf,
    /// Report on success, the reason for skipping otherwise
    pub result: AudioResult<Report>,
}

impl FileOutcome {
    /// Whether the file was processed
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs the silence remover over a directory on a fixed-size worker pool
#[derive(Debug)]
pub struct BatchProcessor {
    remover: SilenceRemover,
    jobs: usize,
}

impl BatchProcessor {
    /// Create a batch processor using `jobs` worker threads
    pub fn new(config: SilenceConfig, jobs: usize) -> AudioResult<Self> {
        if jobs == 0 {
            return Err(AudioError::InvalidConfiguration(
                "at least one worker is required".to_string(),
            ));
        }

        Ok(BatchProcessor {
            remover: SilenceRemover::new(config)?,
            jobs,
        })
    }

    /// Process every audio file directly inside `input_dir` into `output_dir`.
    ///
    /// A file that fails is logged and reported in its [`FileOutcome`]; the
    /// rest of the batch carries on.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> AudioResult<Vec<FileOutcome>> {
        let inputs = collect_inputs(input_dir)?;
        fs::create_dir_all(output_dir)?;
        info!("Found {} audio file(s) in {:?}", inputs.len(), input_dir);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| AudioError::InvalidConfiguration(e.to_string()))?;

        let planned: Vec<(PathBuf, AudioResult<PathBuf>)> = inputs
            .iter()
            .cloned()
            .zip(plan_outputs(&inputs, output_dir))
            .collect();

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            planned
                .into_par_iter()
                .map(|(input, destination)| {
                    let (output, result) = match destination {
                        Ok(output) => {
                            let result = self.remover.process_file(&input, &output);
                            (output, result)
                        }
                        Err(e) => (output_path_for(&input, output_dir), Err(e)),
                    };
                    match &result {
                        Err(e) if e.is_per_file() => warn!("Skipping {:?}: {}", input, e),
                        Err(e) => error!("Internal error while processing {:?}: {}", input, e),
                        Ok(_) => {}
                    }
                    FileOutcome {
                        input,
                        output,
                        result,
                    }
                })
                .collect()
        });

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!(
            "Batch finished: {} processed, {} failed",
            outcomes.len() - failed,
            failed
        );
        Ok(outcomes)
    }
}

/// Audio files directly inside `dir`, sorted by path
pub fn collect_inputs(dir: &Path) -> AudioResult<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_audio_file(&path) {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Whether `path` has one of [`AUDIO_EXTENSIONS`], ignoring case
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Output location for `input`: same stem, `.wav`, inside `output_dir`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_owned();
    name.push(".wav");
    output_dir.join(name)
}

/// Output location keeping the whole file name: `talk.mp3` -> `talk.mp3.wav`
fn output_path_keeping_extension(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_name().unwrap_or(input.as_os_str()).to_owned();
    name.push(".wav");
    output_dir.join(name)
}

/// Destination for each of `inputs`, in the same order.
///
/// Inputs whose `<stem>.wav` would clash keep their full file name instead.
/// A destination still claimed by more than one input is an
/// [`AudioError::OutputConflict`] for every input involved, so no two
/// workers ever write the same file.
pub fn plan_outputs(inputs: &[PathBuf], output_dir: &Path) -> Vec<AudioResult<PathBuf>> {
    let by_stem: Vec<PathBuf> = inputs
        .iter()
        .map(|input| output_path_for(input, output_dir))
        .collect();
    let stem_claims = claim_counts(&by_stem);

    let planned: Vec<PathBuf> = inputs
        .iter()
        .zip(&by_stem)
        .map(|(input, output)| match stem_claims.get(output) {
            Some(&n) if n > 1 => output_path_keeping_extension(input, output_dir),
            _ => output.clone(),
        })
        .collect();
    let claims = claim_counts(&planned);

    planned
        .iter()
        .map(|output| match claims.get(output) {
            Some(&n) if n > 1 => Err(AudioError::OutputConflict(output.clone())),
            _ => Ok(output.clone()),
        })
        .collect()
}

fn claim_counts(paths: &[PathBuf]) -> HashMap<&PathBuf, usize> {
    let mut counts = HashMap::new();
    for path in paths {
        *counts.entry(path).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channels, SampleBuffer};
    use crate::decoder;
    use crate::encoder::write_wav;
    use tempfile::TempDir;

    fn gapped_tone() -> SampleBuffer {
        // 1 s loud, 1 s silent, 1 s loud at 8 kHz
        let samples = (0..24000)
            .map(|i| if (8000..16000).contains(&i) { 0.0 } else { 0.5 })
            .collect();
        SampleBuffer::new(samples, 8000, Channels::Mono).unwrap()
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("a/b/talk.MP3")));
        assert!(is_audio_file(Path::new("take.flac")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("README")));
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("/in/episode.mp3"), Path::new("/out")),
            PathBuf::from("/out/episode.wav")
        );
        assert_eq!(
            output_path_for(Path::new("/in/ep.01.final.flac"), Path::new("/out")),
            PathBuf::from("/out/ep.01.final.wav")
        );
    }

    #[test]
    fn test_plan_outputs_disambiguates_shared_stems() {
        let inputs: Vec<PathBuf> = ["/in/intro.wav", "/in/talk.flac", "/in/talk.mp3"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let outputs: Vec<PathBuf> = plan_outputs(&inputs, Path::new("/out"))
            .into_iter()
            .map(|o| o.unwrap())
            .collect();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("/out/intro.wav"),
                PathBuf::from("/out/talk.flac.wav"),
                PathBuf::from("/out/talk.mp3.wav"),
            ]
        );
    }

    #[test]
    fn test_plan_outputs_reports_remaining_conflicts() {
        // a.wav and a.mp3 fall back to a.wav.wav and a.mp3.wav; a.wav.flac
        // already wants a.wav.wav
        let inputs: Vec<PathBuf> = ["/in/a.mp3", "/in/a.wav", "/in/a.wav.flac"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let outputs = plan_outputs(&inputs, Path::new("/out"));

        assert_eq!(outputs[0].as_ref().unwrap(), &PathBuf::from("/out/a.mp3.wav"));
        for conflicted in &outputs[1..] {
            assert!(matches!(
                conflicted,
                Err(AudioError::OutputConflict(path)) if path == Path::new("/out/a.wav.wav")
            ));
        }
    }

    #[test]
    fn test_batch_keeps_files_sharing_a_stem() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        let short = SampleBuffer::new(vec![0.5; 4000], 8000, Channels::Mono).unwrap();
        write_wav(input_dir.path().join("talk.wav"), &gapped_tone()).unwrap();
        write_wav(input_dir.path().join("talk.WAV"), &short).unwrap();

        let batch = BatchProcessor::new(SilenceConfig::default(), 2).unwrap();
        let outcomes = batch.run(input_dir.path(), output_dir.path()).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert_ne!(outcomes[0].output, outcomes[1].output);

        let written = fs::read_dir(output_dir.path()).unwrap().count();
        assert_eq!(written, 2);
        for outcome in &outcomes {
            let frames = decoder::decode_file(&outcome.output).unwrap().frame_count();
            assert_eq!(frames, outcome.result.as_ref().unwrap().output_frames);
        }
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(BatchProcessor::new(SilenceConfig::default(), 0).is_err());
    }

    #[test]
    fn test_batch_skips_bad_files() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        write_wav(input_dir.path().join("a.wav"), &gapped_tone()).unwrap();
        write_wav(input_dir.path().join("b.WAV"), &gapped_tone()).unwrap();
        fs::write(input_dir.path().join("corrupt.wav"), b"garbage").unwrap();
        fs::write(input_dir.path().join("notes.txt"), b"ignored").unwrap();

        let batch = BatchProcessor::new(SilenceConfig::default(), 2).unwrap();
        let outcomes = batch.run(input_dir.path(), output_dir.path()).unwrap();

        assert_eq!(outcomes.len(), 3);
        let ok: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.is_ok()).collect();
        assert_eq!(ok.len(), 2);
        for outcome in ok {
            assert!(outcome.output.exists());
            let report = outcome.result.as_ref().unwrap();
            assert_eq!(report.cut_count, 1);
            assert_eq!(report.output_frames, 16000);
        }

        let failed = outcomes.iter().find(|o| !o.is_ok()).unwrap();
        assert!(failed.input.ends_with("corrupt.wav"));
        assert!(!failed.output.exists());
    }

    #[test]
    fn test_missing_input_dir() {
        let output_dir = TempDir::new().unwrap();
        let batch = BatchProcessor::new(SilenceConfig::default(), 1).unwrap();
        let result = batch.run(Path::new("/definitely/not/here"), output_dir.path());
        assert!(matches!(result, Err(AudioError::Io(_))));
    }
}
