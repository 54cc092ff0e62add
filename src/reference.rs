//! Bundled reference driver and enclosure.
//!
//! A 15" class woofer in a 100 L box with a single 0.0079 m² port. Handy for
//! demos, tests and as a sanity baseline when entering new parameters.

use crate::math::Scalar;
use crate::params::{DriverParameters, EndCorrection, EnclosureParameters};

/// Tuning frequency recorded alongside the reference dataset, in Hz.
pub const REFERENCE_TUNING_HZ: Scalar = 25.1082;
/// Single-point analysis frequency recorded alongside the dataset, in Hz.
pub const REFERENCE_FREQUENCY_HZ: Scalar = 30.02;

/// Reference driver parameters.
#[must_use]
pub fn reference_driver() -> DriverParameters {
    DriverParameters {
        re: 3.5,
        le: 0.0042,
        cms: 0.00046,
        mms: 0.1663,
        rms: 5.12,
        bl: 17.6,
        sd: 0.04662,
        vg: 10.0,
    }
}

/// Reference enclosure (default air and leakage).
#[must_use]
pub fn reference_enclosure() -> EnclosureParameters {
    EnclosureParameters::new(0.1, 0.0079, 0.303, EndCorrection::OneFlangedEnd, 1)
}
