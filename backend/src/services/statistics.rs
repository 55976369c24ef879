//! Gain/attenuation statistics over a band-sliced sweep.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{FrequencyUnit, Network, ParameterSelection};
use crate::render::{ChartSpec, MarginNote, PaletteColor, ReferenceLine};

/// Whether a band shows net gain or net loss, decided by the sign of the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainLabel {
    Gain,
    Attenuation,
}

impl fmt::Display for GainLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GainLabel::Gain => write!(f, "Gain"),
            GainLabel::Attenuation => write!(f, "Attenuation"),
        }
    }
}

/// Summary of one parameter of one network over a band. dB values are
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub network: String,
    pub parameter: String,
    /// First and last sample frequency of the band, in `unit`.
    pub span_start: f64,
    pub span_stop: f64,
    pub unit: FrequencyUnit,
    pub average_db: f64,
    pub minimum_db: f64,
    pub start_edge_db: f64,
    pub stop_edge_db: f64,
}

impl BandStatistics {
    pub fn label(&self) -> GainLabel {
        if self.average_db < 0.0 {
            GainLabel::Attenuation
        } else {
            GainLabel::Gain
        }
    }

    /// Console summary, one line per figure.
    pub fn summary_lines(&self) -> Vec<String> {
        let label = self.label();
        let span = format!("{}-{} {}", self.span_start, self.span_stop, self.unit);
        vec![
            format!(
                "[{}] Average {} [{}] for frequency span [{}]",
                self.network, label, self.average_db, span
            ),
            format!(
                "[{}] Min {} [{}] for frequency span [{}]",
                self.network, label, self.minimum_db, span
            ),
            format!(
                "[{}] Edge {} [{}, {}] for frequency span [{}]",
                self.network, label, self.start_edge_db, self.stop_edge_db, span
            ),
        ]
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute statistics of `selection` over every sample of `band`.
///
/// `band` is expected to be already sliced to the band of interest; an empty
/// slice fails with [`AnalysisError::EmptySeries`].
pub fn compute(band: &Network, selection: ParameterSelection) -> AnalysisResult<BandStatistics> {
    let values = band.s_db(selection)?;
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return Err(AnalysisError::EmptySeries {
            network: band.name().to_string(),
            parameter: selection.to_string(),
        });
    };

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    let unit = band.display_unit();
    Ok(BandStatistics {
        network: band.name().to_string(),
        parameter: selection.to_string(),
        span_start: band.start_hz().map(|f| unit.from_hz(f)).unwrap_or_default(),
        span_stop: band.stop_hz().map(|f| unit.from_hz(f)).unwrap_or_default(),
        unit,
        average_db: round2(mean),
        minimum_db: round2(min),
        start_edge_db: round2(first),
        stop_edge_db: round2(last),
    })
}

/// Dashed reference line at the average plus a right-margin label, both in `color`.
pub fn annotate(chart: &mut ChartSpec, stats: &BandStatistics, color: PaletteColor) {
    chart.reference_lines.push(ReferenceLine {
        y: stats.average_db,
        color,
    });
    chart.notes.push(MarginNote {
        y: stats.average_db,
        text: format!("avg:\n{:.2}", stats.average_db),
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use crate::render::palette::TAB_GREEN;
    use num_complex::Complex64;

    fn s21_network(values_db: &[f64]) -> Network {
        let samples = values_db
            .iter()
            .enumerate()
            .map(|(i, db)| {
                let s21 = Complex64::from_polar(10f64.powf(db / 20.0), 0.3);
                let zero = Complex64::new(0.0, 0.0);
                Sample::new(1e9 + i as f64 * 1e6, vec![vec![zero, zero], vec![s21, zero]])
            })
            .collect();
        Network::new("dut", samples).unwrap()
    }

    fn s21() -> ParameterSelection {
        ParameterSelection::parse("S21").unwrap()
    }

    #[test]
    fn test_uniform_gain() {
        for g in [12.3456, 0.0, -0.25, -7.5] {
            let stats = compute(&s21_network(&[g; 8]), s21()).unwrap();
            let expected = round2(g);
            assert_eq!(stats.average_db, expected);
            assert_eq!(stats.minimum_db, expected);
            assert_eq!(stats.start_edge_db, expected);
            assert_eq!(stats.stop_edge_db, expected);
            let label = if g >= 0.0 { GainLabel::Gain } else { GainLabel::Attenuation };
            assert_eq!(stats.label(), label, "g = {}", g);
        }
    }

    #[test]
    fn test_mixed_attenuation() {
        let stats = compute(&s21_network(&[-3.0, -1.0, -5.0]), s21()).unwrap();
        assert_eq!(stats.average_db, -3.0);
        assert_eq!(stats.minimum_db, -5.0);
        assert_eq!(stats.start_edge_db, -3.0);
        assert_eq!(stats.stop_edge_db, -5.0);
        assert_eq!(stats.label(), GainLabel::Attenuation);
        assert_eq!(stats.label().to_string(), "Attenuation");
    }

    #[test]
    fn test_empty_series() {
        let empty = s21_network(&[1.0]).range_mhz(0.0, 1.0);
        let err = compute(&empty, s21()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::EmptySeries { ref network, ref parameter } if network == "dut" && parameter == "S21"
        ));
    }

    #[test]
    fn test_span_in_display_unit() {
        let mut network = s21_network(&[1.0, 2.0, 3.0]);
        network.set_display_unit(FrequencyUnit::MHz);
        let stats = compute(&network, s21()).unwrap();
        assert_eq!(stats.span_start, 1000.0);
        assert_eq!(stats.span_stop, 1002.0);
        assert_eq!(stats.unit, FrequencyUnit::MHz);
    }

    #[test]
    fn test_summary_lines() {
        let mut network = s21_network(&[10.0, 20.0]);
        network.set_display_unit(FrequencyUnit::MHz);
        let lines = compute(&network, s21()).unwrap().summary_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "[dut] Average Gain [15] for frequency span [1000-1001 MHz]"
        );
        assert!(lines[1].starts_with("[dut] Min Gain [10]"));
        assert!(lines[2].starts_with("[dut] Edge Gain [10, 20]"));
    }

    #[test]
    fn test_annotate_adds_line_and_note() {
        let stats = compute(&s21_network(&[-3.0, -1.0, -5.0]), s21()).unwrap();
        let mut chart = ChartSpec::new("S21");
        annotate(&mut chart, &stats, TAB_GREEN);

        assert_eq!(chart.reference_lines.len(), 1);
        assert_eq!(chart.reference_lines[0].y, -3.0);
        assert_eq!(chart.reference_lines[0].color, TAB_GREEN);
        assert_eq!(chart.notes[0].text, "avg:\n-3.00");
        assert_eq!(chart.notes[0].color, TAB_GREEN);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(-2.999999), -3.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
    }
}
