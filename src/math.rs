//! Shared numerical primitives.

use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors and impedances.
pub type CScalar = Complex<Scalar>;

/// Converts an RMS phasor magnitude into the peak value of the sinusoid.
#[must_use]
pub fn sinusoid_peak(rms: Scalar) -> Scalar {
    rms * Scalar::sqrt(2.0)
}

/// True when `z` can be used as a divisor: finite and not exactly zero.
#[must_use]
pub fn is_usable_divisor(z: CScalar) -> bool {
    z.is_finite() && (z.re != 0.0 || z.im != 0.0)
}

/// Complex infinity sentinel used for open circuits.
#[must_use]
pub fn open_circuit() -> CScalar {
    Complex::new(Scalar::INFINITY, 0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn peak_of_unit_rms() {
        assert_relative_eq!(sinusoid_peak(1.0), std::f64::consts::SQRT_2, epsilon = 1.0e-15);
    }

    #[test]
    fn divisor_checks() {
        assert!(is_usable_divisor(Complex::new(0.0, 1.0e-300)));
        assert!(!is_usable_divisor(Complex::new(0.0, 0.0)));
        assert!(!is_usable_divisor(open_circuit()));
        assert!(!is_usable_divisor(Complex::new(Scalar::NAN, 1.0)));
    }
}
