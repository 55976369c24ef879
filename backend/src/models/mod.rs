//! Data model: frequency units and spans, network sweeps, parameter
//! selections and the LTE band table.

pub mod frequency;
pub mod lte_bands;
pub mod network;
pub mod parameter;

pub use frequency::{BandSpec, FrequencySpan, FrequencyUnit, FREQUENCY_UNITS};
pub use lte_bands::LteBand;
pub use network::{to_db, Network, Sample};
pub use parameter::ParameterSelection;
