//! Measured network sweeps.
//!
//! A [`Network`] is an ordered frequency sweep of square S-matrices. It is the
//! dataset the analyser consumes: it answers inclusive range queries, exact
//! frequency lookups, and carries a display unit used only for presentation.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::frequency::FrequencyUnit;
use super::parameter::ParameterSelection;
use crate::error::{AnalysisError, AnalysisResult};

/// Relative tolerance for exact frequency lookups, absorbing MHz -> Hz scaling.
const FREQUENCY_MATCH_TOLERANCE: f64 = 1e-12;

/// One point of a sweep: a frequency in Hz and the S-matrix measured there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub frequency_hz: f64,
    /// S-matrix indexed `[row][col]`; complex values serialise as `[re, im]`.
    pub s: Vec<Vec<Complex64>>,
}

impl Sample {
    pub fn new(frequency_hz: f64, s: Vec<Vec<Complex64>>) -> Self {
        Self { frequency_hz, s }
    }

    pub fn ports(&self) -> usize {
        self.s.len()
    }

    /// Complex value of the selected parameter.
    pub fn s_param(&self, selection: ParameterSelection) -> AnalysisResult<Complex64> {
        self.s
            .get(selection.row)
            .and_then(|row| row.get(selection.col))
            .copied()
            .ok_or_else(|| AnalysisError::PortOutOfRange {
                label: selection.to_string(),
                ports: self.ports(),
            })
    }

    /// Magnitude of the selected parameter in dB (`20 log10 |s|`).
    pub fn s_db(&self, selection: ParameterSelection) -> AnalysisResult<f64> {
        Ok(to_db(self.s_param(selection)?))
    }
}

/// Convert a complex S-parameter to a dB magnitude.
pub fn to_db(value: Complex64) -> f64 {
    20.0 * value.norm().log10()
}

/// A measured N-port network sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    name: String,
    samples: Vec<Sample>,
    #[serde(default)]
    display_unit: FrequencyUnit,
}

impl Network {
    /// Build a network, checking that frequencies strictly increase and every
    /// sample carries a square matrix of the same size.
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> AnalysisResult<Self> {
        let network = Self {
            name: name.into(),
            samples,
            display_unit: FrequencyUnit::default(),
        };
        network.validate()?;
        Ok(network)
    }

    /// Load a network from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Dataset(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
            .map_err(|e| AnalysisError::Dataset(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate a network from a JSON string.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let network: Network = serde_json::from_str(json)
            .map_err(|e| AnalysisError::Dataset(format!("Invalid network JSON: {}", e)))?;
        network.validate()?;
        Ok(network)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.name.trim().is_empty() {
            return Err(AnalysisError::InvalidNetwork(
                "network name must not be empty".to_string(),
            ));
        }

        let ports = self.ports();
        for (i, sample) in self.samples.iter().enumerate() {
            if !sample.frequency_hz.is_finite() {
                return Err(AnalysisError::InvalidNetwork(format!(
                    "{}: sample {} has non-finite frequency",
                    self.name, i
                )));
            }
            if sample.ports() != ports || sample.s.iter().any(|row| row.len() != ports) {
                return Err(AnalysisError::InvalidNetwork(format!(
                    "{}: sample {} is not a {}x{} matrix",
                    self.name, i, ports, ports
                )));
            }
        }

        if let Some(pair) = self
            .samples
            .windows(2)
            .find(|w| w[1].frequency_hz <= w[0].frequency_hz)
        {
            return Err(AnalysisError::InvalidNetwork(format!(
                "{}: frequencies must strictly increase ({} Hz followed by {} Hz)",
                self.name, pair[0].frequency_hz, pair[1].frequency_hz
            )));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Port count, taken from the first sample (zero for an empty sweep).
    pub fn ports(&self) -> usize {
        self.samples.first().map(Sample::ports).unwrap_or(0)
    }

    pub fn display_unit(&self) -> FrequencyUnit {
        self.display_unit
    }

    /// Set the presentation unit. Sample frequencies are left untouched.
    pub fn set_display_unit(&mut self, unit: FrequencyUnit) {
        self.display_unit = unit;
    }

    pub fn start_hz(&self) -> Option<f64> {
        self.samples.first().map(|s| s.frequency_hz)
    }

    pub fn stop_hz(&self) -> Option<f64> {
        self.samples.last().map(|s| s.frequency_hz)
    }

    /// Inclusive range query between two MHz bounds, preserving sweep order.
    pub fn range_mhz(&self, start_mhz: f64, stop_mhz: f64) -> Network {
        let lo = FrequencyUnit::MHz.to_hz(start_mhz);
        let hi = FrequencyUnit::MHz.to_hz(stop_mhz);
        Network {
            name: self.name.clone(),
            samples: self
                .samples
                .iter()
                .filter(|s| s.frequency_hz >= lo && s.frequency_hz <= hi)
                .cloned()
                .collect(),
            display_unit: self.display_unit,
        }
    }

    /// Sample measured exactly at `hz`, if any.
    pub fn at_frequency_hz(&self, hz: f64) -> Option<&Sample> {
        let tolerance = hz.abs() * FREQUENCY_MATCH_TOLERANCE;
        self.samples
            .iter()
            .find(|s| (s.frequency_hz - hz).abs() <= tolerance)
    }

    /// dB magnitude of the selected parameter at every sample.
    pub fn s_db(&self, selection: ParameterSelection) -> AnalysisResult<Vec<f64>> {
        self.samples.iter().map(|s| s.s_db(selection)).collect()
    }

    /// `(frequency in display unit, dB)` pairs for plotting.
    pub fn trace_db(&self, selection: ParameterSelection) -> AnalysisResult<Vec<(f64, f64)>> {
        let unit = self.display_unit;
        self.samples
            .iter()
            .map(|s| Ok((unit.from_hz(s.frequency_hz), s.s_db(selection)?)))
            .collect()
    }
}
