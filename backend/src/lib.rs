//! # S-parameter sweep analysis
//!
//! Slices measured RF network sweeps to frequency windows, highlights bands of
//! interest, computes band statistics and renders one chart per requested
//! parameter per network.
//!
//! ## Features
//!
//! - **Parameter selection**: parse labels such as `S21` into matrix indices
//! - **Slicing**: inclusive MHz window queries over a sweep
//! - **Band marking**: free-text (`"700MHz-900MHz"`) or structured spans, LTE bands
//! - **Statistics**: average, minimum and edge gain or attenuation over a band
//! - **Rendering**: PNG output through `plotters` (feature `png`)
//!
//! ## Architecture
//!
//! - [`models`]: networks, frequency units and spans, LTE band table
//! - [`services`]: slicing, band marking, statistics and the [`Analyser`]
//! - [`render`]: chart description and rendering backends
//! - [`calculators`]: microstrip line-width formulas
//! - [`config`]: TOML and environment configuration
//!
//! ## Example
//!
//! ```no_run
//! use sparam_vis::{Analyser, AnalyserConfig, GenerateOptions, Network};
//!
//! # fn main() -> sparam_vis::AnalysisResult<()> {
//! let network = Network::from_json_file("amplifier.json")?;
//! let config = AnalyserConfig::default().with_output_dir("plots");
//! let mut analyser = Analyser::new(vec![network], config)?;
//! let report = analyser.generate(&["S21"], &GenerateOptions::default())?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

pub mod calculators;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;

pub use config::{AnalyserConfig, RunConfig, RunSettings};
pub use error::{AnalysisError, AnalysisResult};
pub use models::{BandSpec, FrequencySpan, FrequencyUnit, LteBand, Network, ParameterSelection, Sample};
pub use render::{ChartSpec, Renderer};
pub use services::{Analyser, BandStatistics, GenerateOptions, GenerationReport};
