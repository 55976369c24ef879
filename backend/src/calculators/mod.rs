//! Closed-form RF design helpers.

pub mod microstrip;

pub use microstrip::{calculate_width, calculate_width_alt, mils_to_mm, MicrostripInput};
