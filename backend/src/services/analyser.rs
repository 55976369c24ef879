//! Analysis orchestration.
//!
//! The [`Analyser`] owns a set of networks, each bound to a palette colour,
//! and renders one chart per (parameter, network) pair. Every pair gets a
//! fresh [`ChartSpec`]; optional modifiers are applied in a fixed order:
//!
//! 1. window slicing of the plotted curve (`strip_frequency`)
//! 2. band shading (`mark_frequencies`) and band statistics (`calc_avg_gain`)
//! 3. exact-frequency point queries
//! 4. y-axis label override
//!
//! A failing pair is logged and recorded in the [`GenerationReport`]; later
//! pairs still run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{band_marker, slicing, statistics};
use crate::config::AnalyserConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{BandSpec, FrequencyUnit, Network, ParameterSelection};
use crate::render::palette::DEFAULT_PALETTE;
use crate::render::{ChartSpec, Curve, PaletteColor, Renderer};
use statistics::BandStatistics;

/// A network paired with the colour it is drawn in.
#[derive(Debug, Clone)]
pub struct Trace {
    pub network: Network,
    pub color: PaletteColor,
}

/// Per-call modifiers for [`Analyser::generate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// MHz window `(start, stop)` the plotted curve is cut to.
    pub strip_frequency: Option<(f64, f64)>,
    pub mark_frequencies: Option<BandSpec>,
    /// Legend entry for a structured band.
    pub marked_label: Option<String>,
    /// Compute band statistics; needs a structured `mark_frequencies`.
    pub calc_avg_gain: bool,
    /// Frequencies in MHz to report exact values for.
    pub point_queries: Vec<f64>,
    pub y_label: Option<String>,
}

/// Value of one parameter at one queried frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub network: String,
    pub parameter: String,
    pub frequency_mhz: f64,
    /// `None` when the sweep has no sample at exactly this frequency.
    pub value_db: Option<f64>,
}

impl PointValue {
    pub fn summary_line(&self) -> String {
        match self.value_db {
            Some(db) => format!(
                "{} {} @ {} MHz: {:.2} dB",
                self.network, self.parameter, self.frequency_mhz, db
            ),
            None => format!(
                "{} {} @ {} MHz: no sample",
                self.network, self.parameter, self.frequency_mhz
            ),
        }
    }
}

/// A (parameter, network) pair that did not produce an image.
#[derive(Debug)]
pub struct PairFailure {
    pub network: String,
    pub parameter: String,
    pub error: AnalysisError,
}

/// What a [`Analyser::generate`] call produced.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub rendered: Vec<PathBuf>,
    pub statistics: Vec<BandStatistics>,
    pub point_values: Vec<PointValue>,
    pub failures: Vec<PairFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Everything one pair contributes to the report besides its image.
struct PairOutput {
    chart: ChartSpec,
    statistics: Vec<BandStatistics>,
    point_values: Vec<PointValue>,
}

/// Renders S-parameter charts for a fixed set of networks.
pub struct Analyser {
    traces: Vec<Trace>,
    config: AnalyserConfig,
    renderer: Box<dyn Renderer>,
    sink: Box<dyn Write>,
}

impl Analyser {
    /// Build an analyser drawing PNG files with the configured resolution.
    #[cfg(feature = "png")]
    pub fn new(networks: Vec<Network>, config: AnalyserConfig) -> AnalysisResult<Self> {
        let renderer = crate::render::PlottersRenderer::new(config.dpi, config.figure_size_in);
        Self::with_renderer(networks, config, Box::new(renderer))
    }

    /// Build an analyser on an explicit rendering backend.
    ///
    /// Fails with [`AnalysisError::NoDatasets`] on an empty list and with
    /// [`AnalysisError::TooManyDatasets`] when there are more networks than
    /// palette colours. Every network's display unit is set to
    /// `config.freq_unit`.
    pub fn with_renderer(
        networks: Vec<Network>,
        config: AnalyserConfig,
        renderer: Box<dyn Renderer>,
    ) -> AnalysisResult<Self> {
        if networks.is_empty() {
            return Err(AnalysisError::NoDatasets);
        }
        if networks.len() > DEFAULT_PALETTE.len() {
            return Err(AnalysisError::TooManyDatasets {
                count: networks.len(),
                capacity: DEFAULT_PALETTE.len(),
            });
        }
        config.validate()?;

        let traces: Vec<Trace> = networks
            .into_iter()
            .zip(DEFAULT_PALETTE)
            .map(|(mut network, color)| {
                network.set_display_unit(config.freq_unit);
                Trace { network, color }
            })
            .collect();

        log::info!(
            "Analyser ready: {} network(s), axis in {}, output to {}",
            traces.len(),
            config.freq_unit,
            config.output_dir.display()
        );

        Ok(Self {
            traces,
            config,
            renderer,
            sink: Box::new(io::stdout()),
        })
    }

    /// Redirect the console summary (statistics and point queries).
    pub fn with_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.traces.iter().map(|t| &t.network)
    }

    /// Give the networks back, keeping the display unit the analyser set.
    pub fn into_networks(self) -> Vec<Network> {
        self.traces.into_iter().map(|t| t.network).collect()
    }

    /// Render one image per (parameter, network) pair.
    ///
    /// Labels are parsed before anything is drawn; an invalid label fails the
    /// whole call. Failures inside a pair are recorded in the report.
    pub fn generate<S: AsRef<str>>(
        &mut self,
        parameters: &[S],
        options: &GenerateOptions,
    ) -> AnalysisResult<GenerationReport> {
        let selections = parameters
            .iter()
            .map(|label| ParameterSelection::parse(label.as_ref()))
            .collect::<AnalysisResult<Vec<_>>>()?;

        fs::create_dir_all(&self.config.output_dir)?;

        let mut report = GenerationReport::default();
        for selection in &selections {
            for trace in &self.traces {
                let name = trace.network.name();
                let path = self
                    .config
                    .output_dir
                    .join(format!("{}_{}.png", name, selection.file_label()));

                let outcome = self.build_chart(trace, *selection, options).and_then(|pair| {
                    self.renderer.render(&pair.chart, &path)?;
                    Ok(pair)
                });

                match outcome {
                    Ok(pair) => {
                        log::info!("Rendered {} for {} to {}", selection, name, path.display());
                        for stats in &pair.statistics {
                            for line in stats.summary_lines() {
                                writeln!(self.sink, "{}", line)?;
                            }
                        }
                        for point in &pair.point_values {
                            writeln!(self.sink, "{}", point.summary_line())?;
                        }
                        report.rendered.push(path);
                        report.statistics.extend(pair.statistics);
                        report.point_values.extend(pair.point_values);
                    }
                    Err(error) => {
                        log::error!("Failed to render {} for {}: {}", selection, name, error);
                        report.failures.push(PairFailure {
                            network: name.to_string(),
                            parameter: selection.to_string(),
                            error,
                        });
                    }
                }
            }
        }
        self.sink.flush()?;

        log::info!(
            "Generation finished: {} image(s), {} failure(s)",
            report.rendered.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn build_chart(
        &self,
        trace: &Trace,
        selection: ParameterSelection,
        options: &GenerateOptions,
    ) -> AnalysisResult<PairOutput> {
        let unit = self.config.freq_unit;
        let mut chart = ChartSpec::new(format!("|{}| Param", selection));
        chart.x_label = format!("Frequency ({})", unit);
        chart.y_label = "Magnitude (dB)".to_string();

        if selection.required_ports() > trace.network.ports() {
            return Err(AnalysisError::PortOutOfRange {
                label: selection.to_string(),
                ports: trace.network.ports(),
            });
        }

        let plotted = match options.strip_frequency {
            Some((start, stop)) => slicing::slice_mhz(&trace.network, start, stop),
            None => trace.network.clone(),
        };

        let mut band_stats = Vec::new();
        if let Some(spec) = &options.mark_frequencies {
            band_marker::mark(
                &mut chart,
                spec,
                options.marked_label.as_deref(),
                unit,
                self.config.strict_band_spec,
            )?;
            if options.calc_avg_gain {
                if let BandSpec::Structured(span) = spec {
                    // Every trace is annotated on every chart, each in its own colour.
                    // Only this chart's own trace must cover the band.
                    for other in &self.traces {
                        let band = slicing::slice_span(&other.network, span);
                        let stats = match statistics::compute(&band, selection) {
                            Ok(stats) => stats,
                            Err(e) if !std::ptr::eq(other, trace) => {
                                log::warn!(
                                    "Skipping {} average on the {} chart: {}",
                                    other.network.name(),
                                    trace.network.name(),
                                    e
                                );
                                continue;
                            }
                            Err(e) => return Err(e),
                        };
                        statistics::annotate(&mut chart, &stats, other.color);
                        band_stats.push(stats);
                    }
                }
            }
        }

        let point_values = options
            .point_queries
            .iter()
            .map(|&mhz| query_point(&plotted, selection, mhz))
            .collect::<AnalysisResult<Vec<_>>>()?;

        if let Some(y_label) = &options.y_label {
            chart.y_label = y_label.clone();
        }

        chart.curves.push(Curve {
            label: Some(trace.network.name().to_string()),
            color: trace.color,
            points: plotted.trace_db(selection)?,
        });

        Ok(PairOutput {
            chart,
            statistics: band_stats,
            point_values,
        })
    }
}

fn query_point(
    network: &Network,
    selection: ParameterSelection,
    frequency_mhz: f64,
) -> AnalysisResult<PointValue> {
    let value_db = match network.at_frequency_hz(FrequencyUnit::MHz.to_hz(frequency_mhz)) {
        Some(sample) => Some(sample.s_db(selection)?),
        None => {
            log::warn!(
                "{} has no sample at {} MHz for {}",
                network.name(),
                frequency_mhz,
                selection
            );
            None
        }
    };
    Ok(PointValue {
        network: network.name().to_string(),
        parameter: selection.to_string(),
        frequency_mhz,
        value_db,
    })
}
