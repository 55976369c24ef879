//! Resolution of band specs into frequency ranges and their chart shading.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{BandSpec, FrequencyUnit, FREQUENCY_UNITS};
use crate::render::palette::{BAND_ALPHA, FREE_TEXT_BAND_COLOR, STRUCTURED_BAND_COLOR};
use crate::render::{ChartSpec, ShadedRegion};

/// A band resolved to Hz, `min_hz <= max_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBand {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl ResolvedBand {
    fn new(a: f64, b: f64) -> Self {
        Self {
            min_hz: a.min(b),
            max_hz: a.max(b),
        }
    }
}

/// Resolve a band spec to Hz bounds.
///
/// Free text is scanned for the unit tokens in table order and the first hit
/// is used to scale both halves of the `lo-hi` string. `None` means the text
/// did not match any unit or its numbers did not parse.
pub fn resolve(spec: &BandSpec) -> Option<ResolvedBand> {
    match spec {
        BandSpec::FreeText(text) => resolve_free_text(text),
        BandSpec::Structured(span) => Some(ResolvedBand::new(
            FrequencyUnit::MHz.to_hz(span.start()),
            FrequencyUnit::MHz.to_hz(span.stop()),
        )),
    }
}

fn resolve_free_text(text: &str) -> Option<ResolvedBand> {
    let lowered = text.to_lowercase();
    let (token, unit) = FREQUENCY_UNITS
        .iter()
        .find(|(token, _)| lowered.contains(token))?;

    let mut halves = lowered.split('-');
    let mut bound = || -> Option<f64> {
        let half = halves.next()?.trim();
        let number = half
            .strip_suffix(token)
            .or_else(|| half.strip_prefix(token))
            .unwrap_or(half)
            .trim();
        number.parse::<f64>().ok().map(|v| unit.to_hz(v))
    };
    let lo = bound()?;
    let hi = bound()?;
    Some(ResolvedBand::new(lo, hi))
}

/// Shade the band on the chart, in the chart's frequency unit.
///
/// Structured spans carry `label` into the legend; free-text bands never do.
/// Unrecognised free text adds nothing unless `strict` is set, in which case
/// it fails with [`AnalysisError::UnrecognizedBandSpec`].
pub fn mark(
    chart: &mut ChartSpec,
    spec: &BandSpec,
    label: Option<&str>,
    unit: FrequencyUnit,
    strict: bool,
) -> AnalysisResult<Option<ResolvedBand>> {
    let Some(band) = resolve(spec) else {
        if let BandSpec::FreeText(text) = spec {
            if strict {
                return Err(AnalysisError::UnrecognizedBandSpec(text.clone()));
            }
            log::debug!("Band spec '{}' has no recognised unit, not marking", text);
        }
        return Ok(None);
    };

    let (color, label) = match spec {
        BandSpec::FreeText(_) => (FREE_TEXT_BAND_COLOR, None),
        BandSpec::Structured(_) => (STRUCTURED_BAND_COLOR, label.map(str::to_string)),
    };

    chart.regions.push(ShadedRegion {
        start: unit.from_hz(band.min_hz),
        stop: unit.from_hz(band.max_hz),
        color,
        alpha: BAND_ALPHA,
        label,
    });
    Ok(Some(band))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencySpan;
    use crate::render::palette::{TAB_BLUE, TAB_GREY};

    fn free(text: &str) -> BandSpec {
        BandSpec::FreeText(text.to_string())
    }

    #[test]
    fn test_free_text_any_case() {
        for text in ["700mhz-900mhz", "700MHz-900MHz", "700Mhz - 900mHz"] {
            let band = resolve(&free(text)).unwrap();
            assert_eq!(band.min_hz, 700e6, "{}", text);
            assert_eq!(band.max_hz, 900e6, "{}", text);
        }
    }

    #[test]
    fn test_free_text_other_units() {
        let band = resolve(&free("2.4GHz-2.5GHz")).unwrap();
        assert_eq!(band.min_hz, 2.4e9);
        assert_eq!(band.max_hz, 2.5e9);

        let band = resolve(&free("455khz-465khz")).unwrap();
        assert_eq!(band.min_hz, 455e3);
    }

    #[test]
    fn test_free_text_table_order_wins() {
        // khz precedes mhz in the unit table, wherever they sit in the text.
        let band = resolve(&free("1khz-2khz-mhz")).unwrap();
        assert_eq!((band.min_hz, band.max_hz), (1e3, 2e3));
        assert!(resolve(&free("1mhz-2mhz-khz")).is_none());
    }

    #[test]
    fn test_free_text_without_unit() {
        assert!(resolve(&free("700-900")).is_none());
        assert!(resolve(&free("700mhz")).is_none());
        assert!(resolve(&free("abcmhz-900mhz")).is_none());
    }

    #[test]
    fn test_structured_scaled_as_mhz() {
        let span = FrequencySpan::new(2110.0, 2170.0, "GHz").unwrap();
        let band = resolve(&BandSpec::Structured(span)).unwrap();
        assert_eq!(band.min_hz, 2110e6);
        assert_eq!(band.max_hz, 2170e6);
    }

    #[test]
    fn test_mark_structured_with_label() {
        let mut chart = ChartSpec::new("S21");
        let spec = BandSpec::Structured(FrequencySpan::mhz(2110.0, 2170.0).unwrap());
        mark(&mut chart, &spec, Some("Band 1"), FrequencyUnit::GHz, false).unwrap();

        let region = &chart.regions[0];
        assert!((region.start - 2.11).abs() < 1e-12);
        assert!((region.stop - 2.17).abs() < 1e-12);
        assert_eq!(region.color, TAB_BLUE);
        assert_eq!(region.alpha, 0.2);
        assert_eq!(region.label.as_deref(), Some("Band 1"));
    }

    #[test]
    fn test_mark_free_text_is_grey_and_unlabelled() {
        let mut chart = ChartSpec::new("S21");
        mark(&mut chart, &free("700MHz-900MHz"), Some("ignored"), FrequencyUnit::MHz, false)
            .unwrap();
        let region = &chart.regions[0];
        assert_eq!((region.start, region.stop), (700.0, 900.0));
        assert_eq!(region.color, TAB_GREY);
        assert!(region.label.is_none());
    }

    #[test]
    fn test_mark_unrecognised_is_silent_by_default() {
        let mut chart = ChartSpec::new("S21");
        let band = mark(&mut chart, &free("somewhere"), None, FrequencyUnit::MHz, false).unwrap();
        assert!(band.is_none());
        assert!(chart.regions.is_empty());
    }

    #[test]
    fn test_mark_unrecognised_fails_when_strict() {
        let mut chart = ChartSpec::new("S21");
        let err = mark(&mut chart, &free("somewhere"), None, FrequencyUnit::MHz, true).unwrap_err();
        assert!(matches!(err, AnalysisError::UnrecognizedBandSpec(ref s) if s == "somewhere"));
        assert!(chart.regions.is_empty());
    }
}
