use num_complex::Complex;

use crate::math::{CScalar, Scalar};

/// Trait implemented by lumped elements that provide a frequency-domain impedance.
///
/// Elements are domain-neutral in the impedance analogy: a mechanical mass and an
/// acoustic port mass behave like an inductor, a suspension or air-volume
/// compliance like a capacitor.
pub trait Component {
    /// Returns the element impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;

    /// Human-readable identifier (e.g. `Rms`).
    fn name(&self) -> &str;
}

/// Dissipative element: electrical, mechanical or acoustic resistance.
#[derive(Debug, Clone)]
pub struct Resistance {
    name: String,
    value: Scalar,
}

impl Resistance {
    /// Creates a resistance.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Component for Resistance {
    fn impedance(&self, _omega: Scalar) -> CScalar {
        Complex::new(self.value, 0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Inertive element `s·M`: inductance, moving mass or acoustic mass.
#[derive(Debug, Clone)]
pub struct Mass {
    name: String,
    value: Scalar,
}

impl Mass {
    /// Creates an inertive element.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Component for Mass {
    fn impedance(&self, omega: Scalar) -> CScalar {
        Complex::new(0.0, omega * self.value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Compliant element `1/(s·C)`: capacitance, suspension or air-volume compliance.
#[derive(Debug, Clone)]
pub struct Compliance {
    name: String,
    value: Scalar,
}

impl Compliance {
    /// Creates a compliant element.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Component for Compliance {
    fn impedance(&self, omega: Scalar) -> CScalar {
        let product = omega * self.value;
        if product == 0.0 {
            Complex::new(Scalar::INFINITY, 0.0)
        } else {
            Complex::new(0.0, -1.0 / product)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistance_is_real() {
        let r = Resistance::new("Re", 3.5);
        let z = r.impedance(100.0);
        assert_relative_eq!(z.re, 3.5);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn mass_is_positive_reactance() {
        let z = Mass::new("Mms", 0.1663).impedance(100.0);
        assert_relative_eq!(z.im, 16.63, epsilon = 1.0e-12);
    }

    #[test]
    fn compliance_is_negative_reactance() {
        let z = Compliance::new("Cms", 0.00046).impedance(100.0);
        assert_relative_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, -1.0 / 0.046, epsilon = 1.0e-12);
    }

    #[test]
    fn zero_compliance_is_open() {
        let z = Compliance::new("Cms", 0.0).impedance(100.0);
        assert!(!z.is_finite());
    }
}
