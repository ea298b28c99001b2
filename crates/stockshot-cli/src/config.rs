//! Configuration file support for stockshot.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/stockshot/config.toml` (lowest priority)
//! - Project-local: `.stockshot.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stockshot_core::config::MAX_FOCAL_POINTS;
use stockshot_core::AnalyzerConfig;
use tracing::{debug, info, warn};

const PROJECT_FILE: &str = ".stockshot.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Focal point detection settings.
    pub saliency: SaliencyConfig,
    /// Acceptance gate settings.
    pub gate: GateConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Focal point detection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SaliencyConfig {
    /// Gradient magnitude a pixel must exceed to become a focal point (0-255).
    pub gradient_threshold: Option<f64>,
    /// Maximum number of focal points kept.
    pub max_points: Option<usize>,
}

/// Acceptance gate configuration. Every value is on the 0-100 metric scale.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub min_score: Option<f64>,
    pub min_sharpness: Option<f64>,
    pub min_subject_sharpness: Option<f64>,
    pub min_brightness: Option<f64>,
    pub max_brightness: Option<f64>,
    pub min_contrast: Option<f64>,
    pub min_color_balance: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include EXIF metadata.
    pub exif: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/stockshot/config.toml`
    /// 2. Project-local: `.stockshot.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Out-of-range values are reported
    /// as warnings and dropped, so the built-in default applies instead.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            warn!("Ignoring config value: {problem}");
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Clears every out-of-range value and returns one message per field cleared.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        check_range(
            &mut self.saliency.gradient_threshold,
            "saliency.gradient_threshold",
            0.0..=255.0,
            &mut problems,
        );
        if let Some(v) = self
            .saliency
            .max_points
            .filter(|v| !(1..=MAX_FOCAL_POINTS).contains(v))
        {
            problems.push(format!(
                "saliency.max_points must be 1-{MAX_FOCAL_POINTS}, got {v}"
            ));
            self.saliency.max_points = None;
        }

        let gate = &mut self.gate;
        for (value, name) in [
            (&mut gate.min_score, "gate.min_score"),
            (&mut gate.min_sharpness, "gate.min_sharpness"),
            (&mut gate.min_subject_sharpness, "gate.min_subject_sharpness"),
            (&mut gate.min_brightness, "gate.min_brightness"),
            (&mut gate.max_brightness, "gate.max_brightness"),
            (&mut gate.min_contrast, "gate.min_contrast"),
            (&mut gate.min_color_balance, "gate.min_color_balance"),
        ] {
            check_range(value, name, 0.0..=100.0, &mut problems);
        }
        if let (Some(min), Some(max)) = (gate.min_brightness, gate.max_brightness) {
            if min > max {
                problems.push(format!(
                    "gate.min_brightness ({min}) must not exceed gate.max_brightness ({max})"
                ));
                gate.min_brightness = None;
                gate.max_brightness = None;
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
                self.output.format = None;
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Saliency
        self.saliency.gradient_threshold = other
            .saliency
            .gradient_threshold
            .or(self.saliency.gradient_threshold);
        self.saliency.max_points = other.saliency.max_points.or(self.saliency.max_points);

        // Gate
        self.gate.min_score = other.gate.min_score.or(self.gate.min_score);
        self.gate.min_sharpness = other.gate.min_sharpness.or(self.gate.min_sharpness);
        self.gate.min_subject_sharpness = other
            .gate
            .min_subject_sharpness
            .or(self.gate.min_subject_sharpness);
        self.gate.min_brightness = other.gate.min_brightness.or(self.gate.min_brightness);
        self.gate.max_brightness = other.gate.max_brightness.or(self.gate.max_brightness);
        self.gate.min_contrast = other.gate.min_contrast.or(self.gate.min_contrast);
        self.gate.min_color_balance = other
            .gate
            .min_color_balance
            .or(self.gate.min_color_balance);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.exif = other.output.exif.or(self.output.exif);
        self.output.progress = other.output.progress.or(self.output.progress);
    }

    /// Builds the analyzer configuration, starting from the built-in defaults.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let mut analyzer = AnalyzerConfig::default();

        let saliency = &mut analyzer.saliency;
        if let Some(v) = self.saliency.gradient_threshold {
            saliency.gradient_threshold = v;
        }
        if let Some(v) = self.saliency.max_points {
            saliency.max_points = v;
        }

        let gate = &mut analyzer.gate;
        for (target, value) in [
            (&mut gate.min_score, self.gate.min_score),
            (&mut gate.min_sharpness, self.gate.min_sharpness),
            (&mut gate.min_subject_sharpness, self.gate.min_subject_sharpness),
            (&mut gate.min_brightness, self.gate.min_brightness),
            (&mut gate.max_brightness, self.gate.max_brightness),
            (&mut gate.min_contrast, self.gate.min_contrast),
            (&mut gate.min_color_balance, self.gate.min_color_balance),
        ] {
            if let Some(v) = value {
                *target = v;
            }
        }

        analyzer
    }
}

fn check_range(
    value: &mut Option<f64>,
    name: &str,
    range: RangeInclusive<f64>,
    problems: &mut Vec<String>,
) {
    if let Some(v) = *value {
        if !range.contains(&v) {
            problems.push(format!(
                "{name} must be {}-{}, got {v}",
                range.start(),
                range.end()
            ));
            *value = None;
        }
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stockshot").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.stockshot.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
