//! Check command - judge images for stock-photo acceptance.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use stockshot_adapters::FsImageSource;
use stockshot_core::{
    AnalysisError, Analyzer, AnalyzerConfig, ImageDimensions, ImageReport, ImageSource,
    ProgressEvent, ProgressSink, ResultOutput,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a score threshold (0-100).
fn parse_score(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum composite score an image must exceed to be accepted (0-100)
    #[arg(long, value_parser = parse_score)]
    pub min_score: Option<f64>,

    /// Include EXIF metadata in output
    #[arg(long)]
    pub exif: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Analyzer settings from config files (populated by `with_config`, not from CLI).
    #[arg(skip)]
    analyzer: AnalyzerConfig,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Built-in analyzer defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.exif {
            args.exif = config.output.exif.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.analyzer = config.analyzer_config();

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Analyzer configuration with the CLI score threshold applied.
    fn analyzer_config(&self) -> AnalyzerConfig {
        let mut config = self.analyzer.clone();
        if let Some(min_score) = self.min_score {
            config.gate.min_score = min_score;
        }
        config
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of images analyzed.
    pub processed: usize,
    /// Number of images that could not be loaded.
    pub skipped: usize,
    /// Number of analyzed images that were not accepted.
    pub rejected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let config = args.analyzer_config();
    config.validate().context("Invalid analyzer settings")?;
    let analyzer = Analyzer::new(config);

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.pretty);

    process_images(&source, &analyzer, &output, &progress_bar, args)
}

/// Analyze every image from `source` and write one report per image.
fn process_images(
    source: &dyn ImageSource,
    analyzer: &Analyzer,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    args: &CheckArgs,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut rejected = 0usize;
    let mut all_reports: Vec<ImageReport> = Vec::new();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                let reason = if e
                    .downcast_ref::<AnalysisError>()
                    .is_some_and(AnalysisError::is_invalid_input)
                {
                    format!("unreadable image: {e:#}")
                } else {
                    format!("{e:#}")
                };
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason,
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let analysis = analyzer.analyze(&image.buffer);
        debug!(path = %image.path, score = analysis.score, is_good = analysis.is_good, "analyzed");

        if !analysis.is_good {
            rejected += 1;
        }

        let exif = if args.exif {
            extract_exif(&image.path)
        } else {
            None
        };

        let report = ImageReport {
            dimensions: ImageDimensions::new(image.width, image.height),
            path: image.path,
            timestamp: iso_timestamp(),
            analysis,
            exif,
        };

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => {
                output.write(&report)?;
            }
            OutputFormat::Json => {
                all_reports.push(report);
            }
        }

        processed += 1;
    }

    if args.format() == OutputFormat::Json {
        output.write_batch(&all_reports)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        processed,
        skipped,
        rejected,
    });

    let exit_code = if rejected > 0 {
        ExitCode::Rejected
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        rejected,
        exit_code,
    })
}

/// Extract EXIF metadata from an image file.
fn extract_exif(path: &str) -> Option<HashMap<String, String>> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    let map: HashMap<String, String> = exif
        .fields()
        .map(|field| {
            (
                field.tag.to_string(),
                field.display_value().with_unit(&exif).to_string(),
            )
        })
        .collect();

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        check: CheckArgs,
    }

    fn parse(args: &[&str]) -> CheckArgs {
        let mut argv = vec!["stockshot"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().check
    }

    #[test]
    fn test_parse_score_bounds() {
        assert!((parse_score("0").unwrap()).abs() < f64::EPSILON);
        assert!((parse_score("100").unwrap() - 100.0).abs() < f64::EPSILON);
        assert!(parse_score("100.5").is_err());
        assert!(parse_score("-1").is_err());
        assert!(parse_score("high").is_err());
    }

    #[test]
    fn test_cli_min_score_beats_config() {
        let config: AppConfig = toml::from_str("[gate]\nmin_score = 50.0\n").unwrap();
        let args = CheckArgs::with_config(parse(&["a.png", "--min-score", "80"]), &config);
        assert!((args.analyzer_config().gate.min_score - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_min_score_applies_without_flag() {
        let config: AppConfig = toml::from_str("[gate]\nmin_score = 50.0\n").unwrap();
        let args = CheckArgs::with_config(parse(&["a.png"]), &config);
        assert!((args.analyzer_config().gate.min_score - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_output_defaults() {
        let config: AppConfig =
            toml::from_str("[output]\nformat = 'json'\npretty = true\n").unwrap();
        let args = CheckArgs::with_config(parse(&["a.png"]), &config);
        assert_eq!(args.format(), OutputFormat::Json);
        assert!(args.pretty);

        let args = CheckArgs::with_config(parse(&["a.png", "--format", "jsonl"]), &config);
        assert_eq!(args.format(), OutputFormat::Jsonl);
    }

    #[test]
    fn test_iso_timestamp_is_rfc3339() {
        let ts = iso_timestamp();
        assert!(time::OffsetDateTime::parse(
            &ts,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok());
    }

    mod pipeline {
        use super::*;
        use stockshot_test_support::{
            MockImageSource, MockProgressSink, MockResultOutput, SyntheticImageBuilder,
        };

        fn source() -> MockImageSource {
            let flat = SyntheticImageBuilder::uniform_gray(32, 32, 128);
            let board = SyntheticImageBuilder::checkerboard(32, 32);
            MockImageSource::new(vec![
                SyntheticImageBuilder::info("flat", flat),
                SyntheticImageBuilder::info("board", board),
            ])
        }

        #[test]
        fn test_counts_and_finished_event() {
            let source = source().with_failure(AnalysisError::ZeroDimensions {
                width: 0,
                height: 4,
            });
            let output = MockResultOutput::new();
            let progress = MockProgressSink::new();
            let args = parse(&["unused"]);

            let result =
                process_images(&source, &Analyzer::default(), &output, &progress, &args).unwrap();

            assert_eq!(result.processed, 2);
            assert_eq!(result.skipped, 1);
            assert!(result.rejected >= 1);
            assert_eq!(result.rejected, progress.rejected_count());
            assert_eq!(
                progress.finished_counts(),
                Some((2, 1, result.rejected))
            );
            assert_eq!(progress.started_count(), 2);
            assert_eq!(output.reports().len(), 2);
            assert_eq!(output.batch_count(), 0);
            assert_eq!(output.flush_count(), 1);
            assert_eq!(result.exit_code, ExitCode::Rejected);
        }

        #[test]
        fn test_invalid_buffer_reported_as_unreadable() {
            let source =
                MockImageSource::empty().with_failure(AnalysisError::SampleLengthMismatch {
                    expected: 16,
                    actual: 3,
                });
            let progress = MockProgressSink::new();

            let result = process_images(
                &source,
                &Analyzer::default(),
                &MockResultOutput::new(),
                &progress,
                &parse(&["unused"]),
            )
            .unwrap();

            assert_eq!(result.skipped, 1);
            assert_eq!(result.exit_code, ExitCode::Success);
            let reason = progress.events().into_iter().find_map(|e| match e {
                ProgressEvent::Skipped { reason, .. } => Some(reason),
                _ => None,
            });
            assert!(reason.unwrap().starts_with("unreadable image:"));
        }

        #[test]
        fn test_json_format_writes_one_batch() {
            let output = MockResultOutput::new();
            let progress = MockProgressSink::new();
            let args = parse(&["unused", "--format", "json"]);

            process_images(&source(), &Analyzer::default(), &output, &progress, &args).unwrap();

            assert_eq!(output.batch_count(), 1);
            assert_eq!(output.reports().len(), 2);
            assert_eq!(output.reports()[0].path, "synthetic://flat");
        }

        #[test]
        fn test_all_accepted_exits_success() {
            let mut config = AnalyzerConfig::default();
            config.gate.min_score = 0.0;
            config.gate.min_sharpness = 0.0;
            config.gate.min_subject_sharpness = 0.0;
            config.gate.min_brightness = 0.0;
            config.gate.max_brightness = 100.0;
            config.gate.min_contrast = 0.0;
            config.gate.min_color_balance = 0.0;
            let source = MockImageSource::new(vec![SyntheticImageBuilder::info(
                "board",
                SyntheticImageBuilder::checkerboard(32, 32),
            )]);
            let progress = MockProgressSink::new();

            let result = process_images(
                &source,
                &Analyzer::new(config),
                &MockResultOutput::new(),
                &progress,
                &parse(&["unused"]),
            )
            .unwrap();

            assert_eq!(result.rejected, 0);
            assert_eq!(progress.rejected_count(), 0);
            assert_eq!(result.exit_code, ExitCode::Success);
        }
    }
}
