//! Port (Helmholtz) tuning frequency of a vented enclosure.
//!
//! Two empirical approximations are evaluated on the same SI geometry and
//! averaged. When one of them is non-finite (e.g. a negative effective port
//! length under a square root) the other is used alone; when neither is usable
//! the geometry is rejected.

use tracing::{debug, warn};

use crate::constants::{FORMULA_A_PREFACTOR, FORMULA_A_SI_K, FORMULA_B_SI_COEFF};
use crate::errors::{Result, VentedBoxError};
use crate::math::Scalar;
use crate::params::EnclosureParameters;

/// Tuning frequency together with the two approximations it was reconciled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningEstimate {
    /// Area/volume/length approximation, `None` when it was not finite.
    pub formula_a_hz: Option<Scalar>,
    /// Diameter/volume/length approximation, `None` when it was not finite.
    pub formula_b_hz: Option<Scalar>,
    /// Reconciled tuning frequency `fb` in Hz.
    pub fb_hz: Scalar,
}

impl TuningEstimate {
    /// Evaluates both approximations for `enclosure` and reconciles them.
    pub fn compute(enclosure: &EnclosureParameters) -> Result<Self> {
        check_geometry(enclosure)?;

        let a = usable(formula_a(enclosure));
        let b = usable(formula_b(enclosure));
        let fb_hz = match (a, b) {
            (Some(a), Some(b)) => 0.5 * (a + b),
            (Some(only), None) | (None, Some(only)) => {
                warn!(
                    formula_a = ?a,
                    formula_b = ?b,
                    "one tuning approximation is not finite, using the other alone"
                );
                only
            }
            (None, None) => {
                return Err(VentedBoxError::InvalidGeometry(format!(
                    "neither tuning approximation is finite (volume {} m^3, port area {} m^2, port length {} m)",
                    enclosure.volume, enclosure.port_area, enclosure.port_length
                )))
            }
        };
        debug!(formula_a = ?a, formula_b = ?b, fb_hz, "estimated port tuning");

        Ok(Self {
            formula_a_hz: a,
            formula_b_hz: b,
            fb_hz,
        })
    }
}

/// Estimates the port tuning frequency `fb` in Hz.
pub fn estimate_tuning(enclosure: &EnclosureParameters) -> Result<Scalar> {
    TuningEstimate::compute(enclosure).map(|estimate| estimate.fb_hz)
}

/// `0.159 · sqrt(A·K / (V·(L + k·√a)))` with total area `A` and single-port area `a`.
fn formula_a(enclosure: &EnclosureParameters) -> Scalar {
    let effective_length =
        enclosure.port_length + enclosure.end_correction * enclosure.single_port_area().sqrt();
    FORMULA_A_PREFACTOR
        * (enclosure.port_area * FORMULA_A_SI_K / (enclosure.volume * effective_length)).sqrt()
}

/// `C · d · √n / (√V · √(L + k·d))` with single-port diameter `d`.
fn formula_b(enclosure: &EnclosureParameters) -> Scalar {
    let diameter = enclosure.single_port_diameter();
    let ports = Scalar::from(enclosure.port_count);
    let effective_length = enclosure.port_length + enclosure.end_correction * diameter;
    FORMULA_B_SI_COEFF * diameter * ports.sqrt()
        / (enclosure.volume.sqrt() * effective_length.sqrt())
}

fn usable(hz: Scalar) -> Option<Scalar> {
    (hz.is_finite() && hz > 0.0).then_some(hz)
}

fn check_geometry(enclosure: &EnclosureParameters) -> Result<()> {
    if enclosure.volume.is_nan() || enclosure.volume <= 0.0 {
        return Err(VentedBoxError::InvalidGeometry(format!(
            "net volume must be > 0, got {} m^3",
            enclosure.volume
        )));
    }
    if enclosure.port_area.is_nan() || enclosure.port_area <= 0.0 {
        return Err(VentedBoxError::InvalidGeometry(format!(
            "port area must be > 0, got {} m^2",
            enclosure.port_area
        )));
    }
    if enclosure.port_count == 0 {
        return Err(VentedBoxError::InvalidGeometry(
            "number of ports must be at least 1".into(),
        ));
    }
    Ok(())
}
