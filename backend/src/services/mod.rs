//! Service layer for slicing, band marking, statistics and orchestration.
//!
//! The [`analyser`] drives the other services once per (parameter, network)
//! pair; each of them can also be used on its own.

pub mod analyser;
pub mod band_marker;
pub mod slicing;
pub mod statistics;

pub use analyser::{
    Analyser, GenerateOptions, GenerationReport, PairFailure, PointValue, Trace,
};
pub use band_marker::ResolvedBand;
pub use slicing::{slice_mhz, slice_span};
pub use statistics::{BandStatistics, GainLabel};
