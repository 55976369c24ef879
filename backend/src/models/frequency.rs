use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, AnalysisResult};

/// Unit tokens recognised inside free-text band specs, in lookup order.
///
/// The first token contained in a spec wins, so the order here is authoritative.
pub const FREQUENCY_UNITS: [(&str, FrequencyUnit); 3] = [
    ("khz", FrequencyUnit::KHz),
    ("mhz", FrequencyUnit::MHz),
    ("ghz", FrequencyUnit::GHz),
];

/// Frequency unit used for display and for scaling band bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    #[default]
    Hz,
    KHz,
    MHz,
    GHz,
}

impl FrequencyUnit {
    /// Multiplier converting a value in this unit to Hz.
    pub const fn multiplier(self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
        }
    }

    /// Express a frequency in Hz in this unit.
    pub fn from_hz(self, hz: f64) -> f64 {
        hz / self.multiplier()
    }

    /// Express a frequency in this unit in Hz.
    pub fn to_hz(self, value: f64) -> f64 {
        value * self.multiplier()
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FrequencyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hz" => Ok(FrequencyUnit::Hz),
            "khz" => Ok(FrequencyUnit::KHz),
            "mhz" => Ok(FrequencyUnit::MHz),
            "ghz" => Ok(FrequencyUnit::GHz),
            other => Err(format!(
                "Unknown frequency unit '{}'. Use hz, khz, mhz or ghz.",
                other
            )),
        }
    }
}

#[derive(Deserialize)]
struct RawSpan {
    start: f64,
    stop: f64,
    #[serde(default = "default_span_unit")]
    unit: String,
}

fn default_span_unit() -> String {
    "MHz".to_string()
}

/// Immutable `(start, stop, unit)` frequency range with `start <= stop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct FrequencySpan {
    start: f64,
    stop: f64,
    unit: String,
}

impl FrequencySpan {
    pub fn new(start: f64, stop: f64, unit: impl Into<String>) -> AnalysisResult<Self> {
        if start.is_nan() || stop.is_nan() || start > stop {
            return Err(AnalysisError::InvalidFrequencySpan { start, stop });
        }
        Ok(Self {
            start,
            stop,
            unit: unit.into(),
        })
    }

    /// Span in MHz, the unit every band table entry uses.
    pub fn mhz(start: f64, stop: f64) -> AnalysisResult<Self> {
        Self::new(start, stop, "MHz")
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn middle(&self) -> f64 {
        (self.start + self.stop) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.stop - self.start
    }
}

impl TryFrom<RawSpan> for FrequencySpan {
    type Error = AnalysisError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        FrequencySpan::new(raw.start, raw.stop, raw.unit)
    }
}

impl fmt::Display for FrequencySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.start, self.stop, self.unit)
    }
}

/// Band of interest to highlight on a chart.
///
/// Free text such as `"700MHz-900MHz"` carries its own unit; a structured
/// span is always scaled as MHz regardless of its `unit` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BandSpec {
    FreeText(String),
    Structured(FrequencySpan),
}

impl From<&str> for BandSpec {
    fn from(text: &str) -> Self {
        BandSpec::FreeText(text.to_string())
    }
}

impl From<String> for BandSpec {
    fn from(text: String) -> Self {
        BandSpec::FreeText(text)
    }
}

impl From<FrequencySpan> for BandSpec {
    fn from(span: FrequencySpan) -> Self {
        BandSpec::Structured(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_multipliers() {
        assert_eq!(FrequencyUnit::Hz.multiplier(), 1.0);
        assert_eq!(FrequencyUnit::KHz.multiplier(), 1e3);
        assert_eq!(FrequencyUnit::MHz.multiplier(), 1e6);
        assert_eq!(FrequencyUnit::GHz.multiplier(), 1e9);
    }

    #[test]
    fn test_unit_table_order() {
        let tokens: Vec<&str> = FREQUENCY_UNITS.iter().map(|(t, _)| *t).collect();
        assert_eq!(tokens, vec!["khz", "mhz", "ghz"]);
    }

    #[test]
    fn test_unit_from_str_case_insensitive() {
        assert_eq!("GHz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::GHz);
        assert_eq!(" mhz ".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::MHz);
        assert!("thz".parse::<FrequencyUnit>().is_err());
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(FrequencyUnit::MHz.from_hz(2.4e9), 2400.0);
        assert_eq!(FrequencyUnit::GHz.to_hz(2.4), 2.4e9);
    }

    #[test]
    fn test_span_rejects_inverted_bounds() {
        let err = FrequencySpan::mhz(900.0, 700.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidFrequencySpan { .. }));
        assert!(FrequencySpan::mhz(f64::NAN, 700.0).is_err());
    }

    #[test]
    fn test_span_accessors() {
        let span = FrequencySpan::mhz(1920.0, 1980.0).unwrap();
        assert_eq!(span.start(), 1920.0);
        assert_eq!(span.stop(), 1980.0);
        assert_eq!(span.unit(), "MHz");
        assert_eq!(span.middle(), 1950.0);
        assert_eq!(span.width(), 60.0);
        assert_eq!(span.to_string(), "1920-1980 MHz");
    }

    #[test]
    fn test_span_deserialize_validates() {
        let span: FrequencySpan =
            serde_json::from_str(r#"{"start": 700, "stop": 900}"#).unwrap();
        assert_eq!(span.unit(), "MHz");

        let bad = serde_json::from_str::<FrequencySpan>(r#"{"start": 900, "stop": 700}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_band_spec_untagged() {
        let text: BandSpec = serde_json::from_str(r#""700MHz-900MHz""#).unwrap();
        assert_eq!(text, BandSpec::FreeText("700MHz-900MHz".into()));

        let span: BandSpec =
            serde_json::from_str(r#"{"start": 2110, "stop": 2170, "unit": "MHz"}"#).unwrap();
        assert!(matches!(span, BandSpec::Structured(_)));
    }
}
