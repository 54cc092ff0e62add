//! Closed-form solve of the vented-box equivalent circuit at one frequency.
//!
//! The circuit has three loops coupled by gyrators:
//!
//! - electrical: `Vg = (Re + s·Le)·I + Bl·U`
//! - mechanical: `Bl·I = (Rms + s·Mms + 1/(s·Cms))·U + Sd·Pd`
//! - acoustical: `Pd = Zb·Sd·U`, with `Zb` the parallel box/leak/port branch
//!
//! Eliminating `U` and `Pd` gives the input impedance
//! `Zin = Zelec + Bl² / (Zmech + Sd²·Zb)`; the unknowns then follow in the
//! order `I → Pd → U`. [`super::mesh`] solves the same system as a matrix.

use tracing::warn;

use crate::constants::angular_frequency;
use crate::errors::{NetworkTerm, Result, VentedBoxError};
use crate::math::{is_usable_divisor, open_circuit, sinusoid_peak, CScalar, Scalar};
use crate::params::{DriverParameters, EnclosureParameters};

use super::acoustics::BoxAcoustics;
use super::component::{Compliance, Component, Mass, Resistance};
use super::network::{ConnectionKind, Network};

/// Solved state of the circuit at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Analysis frequency in Hz.
    pub frequency_hz: Scalar,
    /// Input impedance `Zin` seen by the source, in Ω.
    pub zin: CScalar,
    /// Loop current `I` in A (RMS phasor).
    pub current: CScalar,
    /// Diaphragm velocity `U` in m/s (RMS phasor).
    pub velocity: CScalar,
    /// Box pressure `Pd` across the box/port branch in Pa (RMS phasor).
    pub box_pressure: CScalar,
    /// Peak air velocity in one port, m/s.
    pub port_velocity: Scalar,
    /// Peak cone excursion, mm.
    pub cone_excursion_mm: Scalar,
    /// `arg(Zin)` in radians.
    pub phase: Scalar,
    /// Set when the sample was replaced by a sentinel; names the failed term.
    pub degenerate: Option<NetworkTerm>,
}

impl FrequencyPoint {
    /// Sentinel for 0 Hz, where the circuit is undefined: open input, no motion.
    #[must_use]
    pub fn at_dc(frequency_hz: Scalar) -> Self {
        Self {
            frequency_hz,
            zin: open_circuit(),
            current: CScalar::default(),
            velocity: CScalar::default(),
            box_pressure: CScalar::default(),
            port_velocity: 0.0,
            cone_excursion_mm: 0.0,
            phase: 0.0,
            degenerate: None,
        }
    }

    /// Sentinel for a sample whose circuit could not be formed.
    #[must_use]
    pub fn degenerate(frequency_hz: Scalar, term: NetworkTerm) -> Self {
        Self {
            degenerate: Some(term),
            ..Self::at_dc(frequency_hz)
        }
    }

    /// `|Zin|` in Ω.
    #[must_use]
    pub fn impedance_magnitude(&self) -> Scalar {
        self.zin.norm()
    }

    /// True when the sample holds solved values rather than a sentinel.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.degenerate.is_none() && self.zin.is_finite()
    }
}

/// Branch impedances of the equivalent circuit at one angular frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitImpedances {
    /// `Re + s·Le`.
    pub electrical: CScalar,
    /// `Rms + s·Mms + 1/(s·Cms)`.
    pub mechanical: CScalar,
    /// Parallel box/leak/port branch `Zb`.
    pub box_branch: CScalar,
    /// `Zmech + Sd²·Zb`.
    pub motional: CScalar,
    /// `Zelec + Bl² / (Zmech + Sd²·Zb)`.
    pub input: CScalar,
}

impl CircuitImpedances {
    /// Builds every branch impedance, rejecting the first unusable one.
    pub fn at(
        omega: Scalar,
        driver: &DriverParameters,
        acoustics: &BoxAcoustics,
    ) -> std::result::Result<Self, NetworkTerm> {
        let electrical = Network::new("electrical", ConnectionKind::Series)
            .with(Resistance::new("Re", driver.re))
            .with(Mass::new("Le", driver.le))
            .impedance(omega);
        if !electrical.is_finite() {
            return Err(NetworkTerm::ElectricalImpedance);
        }

        let mechanical = Network::new("mechanical", ConnectionKind::Series)
            .with(Resistance::new("Rms", driver.rms))
            .with(Mass::new("Mms", driver.mms))
            .with(Compliance::new("Cms", driver.cms))
            .impedance(omega);
        if !is_usable_divisor(mechanical) {
            return Err(NetworkTerm::MechanicalImpedance);
        }

        let box_branch = acoustics.branch().impedance(omega);
        if !box_branch.is_finite() {
            return Err(NetworkTerm::BoxImpedance);
        }

        let motional = mechanical + driver.sd * driver.sd * box_branch;
        if !is_usable_divisor(motional) {
            return Err(NetworkTerm::MotionalImpedance);
        }

        let input = electrical + driver.bl * driver.bl / motional;
        if !is_usable_divisor(input) {
            return Err(NetworkTerm::InputImpedance);
        }

        Ok(Self {
            electrical,
            mechanical,
            box_branch,
            motional,
            input,
        })
    }
}

/// Solves the circuit at `frequency_hz`, reporting degenerate denominators as errors.
///
/// Frequencies at or below 0 Hz return [`FrequencyPoint::at_dc`].
pub fn try_solve(
    frequency_hz: Scalar,
    driver: &DriverParameters,
    enclosure: &EnclosureParameters,
    fb_hz: Scalar,
) -> Result<FrequencyPoint> {
    if frequency_hz <= 0.0 {
        return Ok(FrequencyPoint::at_dc(frequency_hz));
    }
    let acoustics = BoxAcoustics::new(enclosure, fb_hz)?;
    solve_with(frequency_hz, driver, enclosure, &acoustics)
}

/// Solves the circuit at `frequency_hz` with precomputed box acoustics.
pub fn solve_with(
    frequency_hz: Scalar,
    driver: &DriverParameters,
    enclosure: &EnclosureParameters,
    acoustics: &BoxAcoustics,
) -> Result<FrequencyPoint> {
    if frequency_hz <= 0.0 {
        return Ok(FrequencyPoint::at_dc(frequency_hz));
    }
    let degenerate = |term| VentedBoxError::DegenerateNetwork { frequency_hz, term };

    let w = angular_frequency(frequency_hz);
    let z = CircuitImpedances::at(w, driver, acoustics).map_err(degenerate)?;

    let current = driver.vg / z.input;
    let box_pressure = current * (driver.bl * driver.sd * z.box_branch) / z.motional;
    let velocity = (driver.bl * current - driver.sd * box_pressure) / z.mechanical;

    let port_flow = box_pressure / acoustics.port().impedance(w);
    let port_velocity = sinusoid_peak(port_flow.norm()) / enclosure.single_port_area();
    let cone_excursion_mm = 1000.0 * sinusoid_peak(velocity.norm()) / w;

    if !(current.is_finite() && velocity.is_finite() && box_pressure.is_finite())
        || !port_velocity.is_finite()
    {
        return Err(degenerate(NetworkTerm::InputImpedance));
    }

    Ok(FrequencyPoint {
        frequency_hz,
        zin: z.input,
        current,
        velocity,
        box_pressure,
        port_velocity,
        cone_excursion_mm,
        phase: z.input.arg(),
        degenerate: None,
    })
}

/// Solves the circuit at `frequency_hz`, substituting a sentinel for degenerate samples.
///
/// Never fails: a degenerate circuit yields [`FrequencyPoint::degenerate`] with
/// infinite impedance and zero motion, and logs a warning.
#[must_use]
pub fn solve(
    frequency_hz: Scalar,
    driver: &DriverParameters,
    enclosure: &EnclosureParameters,
    fb_hz: Scalar,
) -> FrequencyPoint {
    match try_solve(frequency_hz, driver, enclosure, fb_hz) {
        Ok(point) => point,
        Err(err) => sentinel_for(frequency_hz, &err),
    }
}

pub(crate) fn sentinel_for(frequency_hz: Scalar, err: &VentedBoxError) -> FrequencyPoint {
    warn!(frequency_hz, error = %err, "degenerate sample replaced by sentinel");
    let term = match err {
        VentedBoxError::DegenerateNetwork { term, .. }
        | VentedBoxError::DegenerateBox { term, .. } => *term,
        _ => NetworkTerm::InputImpedance,
    };
    FrequencyPoint::degenerate(frequency_hz, term)
}
