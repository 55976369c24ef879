use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, AnalysisResult};

/// Zero-based `(row, col)` index into the S-matrix, parsed from a label such as `"S21"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterSelection {
    pub row: usize,
    pub col: usize,
}

impl ParameterSelection {
    /// Parse a label of the form `S{row}{col}` (case-insensitive, digits 1-9).
    pub fn parse(label: &str) -> AnalysisResult<Self> {
        let invalid = || AnalysisError::InvalidParameterLabel(label.to_string());

        let lowered = label.to_ascii_lowercase();
        let bytes = lowered.as_bytes();
        if bytes.len() != 3 || bytes[0] != b's' {
            return Err(invalid());
        }

        let row = port_index(bytes[1]).ok_or_else(invalid)?;
        let col = port_index(bytes[2]).ok_or_else(invalid)?;
        Ok(Self { row, col })
    }

    /// Lower-case label used in output file names (`s21`).
    pub fn file_label(&self) -> String {
        format!("s{}{}", self.row + 1, self.col + 1)
    }

    /// Number of ports a network needs for this selection to exist.
    pub fn required_ports(&self) -> usize {
        self.row.max(self.col) + 1
    }
}

fn port_index(digit: u8) -> Option<usize> {
    match digit {
        b'1'..=b'9' => Some((digit - b'1') as usize),
        _ => None,
    }
}

impl FromStr for ParameterSelection {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParameterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}{}", self.row + 1, self.col + 1)
    }
}
