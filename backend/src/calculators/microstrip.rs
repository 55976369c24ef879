//! Microstrip trace width from target impedance, using two empirical formulas.
//!
//! Thicknesses and the returned width share one length unit (mils in practice).

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

const MM_PER_MIL: f64 = 0.0254;

/// Stack-up parameters for a microstrip width calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicrostripInput {
    /// Target characteristic impedance in ohms
    pub target_impedance: f64,
    /// Relative permittivity of the dielectric
    pub permittivity: f64,
    /// Dielectric height
    pub dielectric_thickness: f64,
    /// Copper thickness
    pub metal_thickness: f64,
}

impl MicrostripInput {
    pub fn new(
        target_impedance: f64,
        permittivity: f64,
        dielectric_thickness: f64,
        metal_thickness: f64,
    ) -> Self {
        Self {
            target_impedance,
            permittivity,
            dielectric_thickness,
            metal_thickness,
        }
    }

    fn validate(&self) -> AnalysisResult<()> {
        let fields = [
            ("target_impedance", self.target_impedance),
            ("permittivity", self.permittivity),
            ("dielectric_thickness", self.dielectric_thickness),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidCalculatorInput(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.metal_thickness.is_finite() || self.metal_thickness < 0.0 {
            return Err(AnalysisError::InvalidCalculatorInput(format!(
                "metal_thickness must be non-negative, got {}",
                self.metal_thickness
            )));
        }
        Ok(())
    }
}

/// `w = 7.48 h / e^(Z0 sqrt(er + sqrt 2) / 87) - 1.25 t`
pub fn calculate_width(input: &MicrostripInput) -> AnalysisResult<f64> {
    input.validate()?;
    let power =
        input.target_impedance * (input.permittivity + std::f64::consts::SQRT_2).sqrt() / 87.0;
    Ok(7.48 * input.dielectric_thickness / power.exp() - 1.25 * input.metal_thickness)
}

/// `w = (5.98 h / e^(Z0 sqrt(er + 1.41) / 87) - t) / 0.8`
pub fn calculate_width_alt(input: &MicrostripInput) -> AnalysisResult<f64> {
    input.validate()?;
    let power = input.target_impedance * (input.permittivity + 1.41).sqrt() / 87.0;
    Ok((5.98 * input.dielectric_thickness / power.exp() - input.metal_thickness) / 0.8)
}

pub fn mils_to_mm(mils: f64) -> f64 {
    mils * MM_PER_MIL
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_stackup() -> MicrostripInput {
        MicrostripInput::new(50.0, 3.4, 4.25, 1.0)
    }

    #[test]
    fn test_calculate_width() {
        let w = calculate_width(&reference_stackup()).unwrap();
        assert_relative_eq!(w, 7.758392, epsilon = 1e-5);
        assert_relative_eq!(mils_to_mm(w), 0.197, epsilon = 5e-4);
    }

    #[test]
    fn test_calculate_width_alt() {
        let w = calculate_width_alt(&reference_stackup()).unwrap();
        assert_relative_eq!(w, 7.757341, epsilon = 1e-5);
    }

    #[test]
    fn test_higher_impedance_narrows_trace() {
        let narrow = calculate_width(&MicrostripInput::new(75.0, 3.4, 4.25, 1.0)).unwrap();
        let wide = calculate_width(&reference_stackup()).unwrap();
        assert!(narrow < wide);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let bad = MicrostripInput::new(0.0, 3.4, 4.25, 1.0);
        assert!(matches!(
            calculate_width(&bad),
            Err(AnalysisError::InvalidCalculatorInput(_))
        ));
        let bad = MicrostripInput::new(50.0, f64::NAN, 4.25, 1.0);
        assert!(calculate_width_alt(&bad).is_err());
        let bad = MicrostripInput::new(50.0, 3.4, 4.25, -1.0);
        assert!(calculate_width(&bad).is_err());
    }
}
