//! desilence command line interface
//!
//! Removes silent stretches from a single file or from every audio file in
//! a directory.

use clap::{Args, Parser, Subcommand};
use desilence::decoder::{self, SymphoniaDecoder};
use desilence::{BatchProcessor, LoudnessMeasure, SilenceConfig, SilenceRemover};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "desilence")]
#[command(about = "Cut silent passages out of audio recordings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove silence from a file or every audio file in a directory
    Remove {
        /// Input audio file or directory
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Output WAV file or directory
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Files processed in parallel when the input is a directory
        #[arg(short, long, default_value_t = 4)]
        jobs: usize,
    },

    /// Print the silent intervals that would be removed
    Detect {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        detection: DetectionArgs,
    },

    /// Print stream information for an audio file
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Args)]
struct DetectionArgs {
    /// Loudness in dBFS at or below which audio counts as silent
    #[arg(short, long, default_value_t = -20.0, allow_negative_numbers = true)]
    threshold: f32,

    /// Minimum silence length in milliseconds
    #[arg(short, long, default_value_t = 500.0)]
    duration: f64,

    /// Analysis window in milliseconds
    #[arg(long, default_value_t = 10.0)]
    window: f64,

    /// Fade length at each splice seam in milliseconds
    #[arg(long, default_value_t = 5.0)]
    fade: f64,

    /// Merge cuts separated by less than this many milliseconds of audio
    #[arg(long, value_name = "MS")]
    min_gap: Option<f64>,

    /// Measure window peaks instead of RMS
    #[arg(long)]
    peak: bool,
}

impl DetectionArgs {
    fn to_config(&self) -> SilenceConfig {
        let measure = if self.peak {
            LoudnessMeasure::Peak
        } else {
            LoudnessMeasure::Rms
        };

        SilenceConfig::default()
            .with_threshold_db(self.threshold)
            .with_min_silence_ms(self.duration)
            .with_window_ms(self.window)
            .with_fade_ms(self.fade)
            .with_min_gap_ms(self.min_gap)
            .with_measure(measure)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    info!("desilence {}", desilence::VERSION);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when some files in a batch failed
fn run(command: Commands) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Remove {
            input,
            output,
            detection,
            jobs,
        } => {
            let config = detection.to_config();

            if input.is_dir() {
                let batch = BatchProcessor::new(config, jobs)?;
                let outcomes = batch.run(&input, &output)?;
                Ok(outcomes.iter().all(|o| o.is_ok()))
            } else if input.is_file() {
                let remover = SilenceRemover::new(config)?;
                let report = remover.process_file(&input, &output)?;
                println!("{}", report);
                Ok(true)
            } else {
                Err(format!("input path does not exist: {}", input.display()).into())
            }
        }

        Commands::Detect { input, detection } => {
            let remover = SilenceRemover::new(detection.to_config())?;
            let buffer = decoder::decode_file(&input)?;
            let rate = buffer.sample_rate();
            let cuts = remover.detect(&buffer)?;

            for cut in &cuts {
                println!(
                    "{:>10.3}s - {:>10.3}s  ({:.3}s)",
                    cut.start as f64 / rate as f64,
                    cut.end as f64 / rate as f64,
                    cut.duration(rate).as_secs_f64()
                );
            }
            println!(
                "{} silent interval(s) in {:.3}s",
                cuts.len(),
                buffer.duration().as_secs_f64()
            );
            Ok(true)
        }

        Commands::Probe { input } => {
            let decoder = SymphoniaDecoder::from_file(&input)?;
            let metadata = decoder.metadata();

            println!("File:        {}", input.display());
            println!("Codec:       {}", metadata.codec);
            println!("Sample rate: {} Hz", metadata.sample_rate);
            println!("Channels:    {}", metadata.channels.name());
            if let Some(bits) = metadata.bit_depth {
                println!("Bit depth:   {}", bits.bits());
            }
            if let Some(secs) = metadata.duration_secs() {
                println!("Duration:    {:.3}s", secs);
            }
            Ok(true)
        }
    }
}
