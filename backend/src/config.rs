//! Analyser and run configuration.
//!
//! Settings are read from TOML files and can be overridden through
//! environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{lte_bands, BandSpec, FrequencyUnit};
use crate::services::analyser::GenerateOptions;

/// Settings that shape how the analyser renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyserConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Unit of the frequency axis; overwrites every network's display unit.
    #[serde(default = "default_freq_unit")]
    pub freq_unit: FrequencyUnit,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Figure size in inches (width, height)
    #[serde(default = "default_figure_size")]
    pub figure_size_in: (f64, f64),
    /// Fail on free-text band specs without a recognised unit instead of skipping them
    #[serde(default)]
    pub strict_band_spec: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_freq_unit() -> FrequencyUnit {
    FrequencyUnit::GHz
}

fn default_dpi() -> u32 {
    600
}

fn default_figure_size() -> (f64, f64) {
    (6.4, 4.8)
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            freq_unit: default_freq_unit(),
            dpi: default_dpi(),
            figure_size_in: default_figure_size(),
            strict_band_spec: false,
        }
    }
}

impl AnalyserConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_freq_unit(mut self, unit: FrequencyUnit) -> Self {
        self.freq_unit = unit;
        self
    }

    pub fn with_strict_band_spec(mut self, strict: bool) -> Self {
        self.strict_band_spec = strict;
        self
    }

    /// Apply environment overrides.
    ///
    /// # Environment Variables
    /// - `SPARAM_OUTPUT_DIR`: directory images are written to
    /// - `SPARAM_FREQ_UNIT`: `hz` | `khz` | `mhz` | `ghz`
    /// - `SPARAM_DPI`: image resolution
    /// - `SPARAM_STRICT_BANDS`: `true` | `false`
    pub fn with_env_overrides(mut self) -> AnalysisResult<Self> {
        if let Ok(dir) = env::var("SPARAM_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(unit) = env::var("SPARAM_FREQ_UNIT") {
            self.freq_unit = unit.parse().map_err(AnalysisError::Configuration)?;
        }
        if let Ok(dpi) = env::var("SPARAM_DPI") {
            self.dpi = dpi.trim().parse().map_err(|_| {
                AnalysisError::Configuration(format!("SPARAM_DPI must be a positive integer, got '{}'", dpi))
            })?;
        }
        if let Ok(strict) = env::var("SPARAM_STRICT_BANDS") {
            self.strict_band_spec = strict.trim().parse().map_err(|_| {
                AnalysisError::Configuration(format!(
                    "SPARAM_STRICT_BANDS must be true or false, got '{}'",
                    strict
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.dpi == 0 {
            return Err(AnalysisError::Configuration("dpi must be positive".to_string()));
        }
        let (w, h) = self.figure_size_in;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "figure_size_in must be positive, got ({}, {})",
                w, h
            )));
        }
        Ok(())
    }
}

/// A complete run for the command-line tool: analyser settings plus what to plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub analyser: AnalyserConfig,
    pub run: RunSettings,
}

/// What to plot and which modifiers to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSettings {
    /// Network JSON files; relative paths resolve against the config file.
    pub networks: Vec<PathBuf>,
    pub parameters: Vec<String>,
    /// MHz window `[start, stop]` applied to the plotted curve
    #[serde(default)]
    pub strip_frequency: Option<(f64, f64)>,
    /// Free-text or structured band to shade
    #[serde(default)]
    pub mark_band: Option<BandSpec>,
    /// LTE band whose downlink is shaded; exclusive with `mark_band`
    #[serde(default)]
    pub mark_lte_band: Option<i64>,
    #[serde(default)]
    pub marked_label: Option<String>,
    #[serde(default)]
    pub calc_avg_gain: bool,
    /// Frequencies in MHz to print exact values for
    #[serde(default)]
    pub point_queries: Vec<f64>,
    #[serde(default)]
    pub y_label: Option<String>,
}

impl RunSettings {
    /// Translate the settings into analyser options, resolving LTE bands.
    pub fn generate_options(&self) -> AnalysisResult<GenerateOptions> {
        let mark_frequencies = match (&self.mark_band, self.mark_lte_band) {
            (Some(_), Some(_)) => {
                return Err(AnalysisError::Configuration(
                    "mark_band and mark_lte_band are mutually exclusive".to_string(),
                ))
            }
            (Some(spec), None) => Some(spec.clone()),
            (None, Some(id)) => Some(BandSpec::from(&lte_bands::lookup(id)?)),
            (None, None) => None,
        };

        // An LTE band labels itself unless the run overrides it.
        let marked_label = self
            .marked_label
            .clone()
            .or_else(|| self.mark_lte_band.map(|id| format!("Band {}", id)));

        Ok(GenerateOptions {
            strip_frequency: self.strip_frequency,
            mark_frequencies,
            marked_label,
            calc_avg_gain: self.calc_avg_gain,
            point_queries: self.point_queries.clone(),
            y_label: self.y_label.clone(),
        })
    }
}

impl RunConfig {
    /// Load a run configuration from a TOML file.
    ///
    /// Relative network paths are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalysisError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            for network in &mut config.run.networks {
                if network.is_relative() {
                    *network = base.join(&*network);
                }
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> AnalysisResult<Self> {
        let config: RunConfig = toml::from_str(content).map_err(|e| {
            AnalysisError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.analyser.validate()?;
        Ok(config)
    }

    /// Load a run configuration from the default location.
    ///
    /// Searches for `analysis.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AnalysisResult<Self> {
        let search_paths = [
            PathBuf::from("analysis.toml"),
            PathBuf::from("backend/analysis.toml"),
            PathBuf::from("../analysis.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(AnalysisError::Configuration(
            "No analysis.toml found in standard locations".to_string(),
        ))
    }
}
