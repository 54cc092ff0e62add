//! Acoustic elements of the box/port branch.
//!
//! `Lmap` and `Ral` are derived from the tuning frequency rather than from the
//! port dimensions, so the branch resonates exactly at `fb` by construction.
//! [`BoxAcoustics::port_mass_check`] compares that value with the mass the port
//! geometry implies.

use std::f64::consts::PI;

use crate::constants::{air_compliance, angular_frequency};
use crate::errors::{NetworkTerm, Result, VentedBoxError};
use crate::math::Scalar;
use crate::params::EnclosureParameters;

use super::component::{Compliance, Mass, Resistance};
use super::network::{ConnectionKind, Network};

/// Lumped acoustic elements of a vented box tuned to `fb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxAcoustics {
    /// Box acoustic compliance `Ccab = Vb / (ρ₀·c²)` in m⁵/N.
    pub ccab: Scalar,
    /// Port acoustic mass `Lmap = 1 / (ωb²·Ccab)` in kg/m⁴.
    pub lmap: Scalar,
    /// Leakage resistance `Ral = Ql / (ωb·Ccab)` in N·s/m⁵.
    pub ral: Scalar,
}

impl BoxAcoustics {
    /// Derives the branch elements for `enclosure` tuned to `fb_hz`.
    ///
    /// Fails with [`VentedBoxError::DegenerateBox`] when any element comes
    /// out zero or non-finite (e.g. `fb_hz = 0`).
    pub fn new(enclosure: &EnclosureParameters, fb_hz: Scalar) -> Result<Self> {
        let degenerate = |term| VentedBoxError::DegenerateBox {
            tuning_hz: fb_hz,
            term,
        };
        let wb = angular_frequency(fb_hz);
        let ccab = air_compliance(
            enclosure.volume,
            enclosure.air_density,
            enclosure.speed_of_sound,
        );
        if !is_positive_finite(ccab) {
            return Err(degenerate(NetworkTerm::BoxCompliance));
        }
        let lmap = 1.0 / (wb * wb * ccab);
        if !is_positive_finite(lmap) {
            return Err(degenerate(NetworkTerm::PortMass));
        }
        let ral = enclosure.leakage_q / (wb * ccab);
        if !is_positive_finite(ral) {
            return Err(degenerate(NetworkTerm::LeakageResistance));
        }
        Ok(Self { ccab, lmap, ral })
    }

    /// Parallel box/port branch: compliance, leakage and port mass.
    #[must_use]
    pub fn branch(&self) -> Network {
        Network::new("box", ConnectionKind::Parallel)
            .with(Compliance::new("Ccab", self.ccab))
            .with(Resistance::new("Ral", self.ral))
            .with(Mass::new("Lmap", self.lmap))
    }

    /// Port acoustic mass element on its own.
    #[must_use]
    pub fn port(&self) -> Mass {
        Mass::new("Lmap", self.lmap)
    }

    /// Helmholtz frequency `1 / (2π·√(Lmap·Ccab))` of the branch, in Hz.
    #[must_use]
    pub fn resonance_hz(&self) -> Scalar {
        1.0 / (2.0 * PI * (self.lmap * self.ccab).sqrt())
    }

    /// Compares the tuning-derived `Lmap` with the geometric port mass.
    #[must_use]
    pub fn port_mass_check(&self, enclosure: &EnclosureParameters) -> PortMassCheck {
        let geometric = geometric_port_mass(enclosure);
        PortMassCheck {
            tuned: self.lmap,
            geometric,
            ratio: geometric / self.lmap,
        }
    }
}

/// Tuning-derived versus geometry-derived port acoustic mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortMassCheck {
    /// `Lmap` derived from the tuning frequency.
    pub tuned: Scalar,
    /// `ρ₀·(L + k·d) / A` from the port dimensions.
    pub geometric: Scalar,
    /// `geometric / tuned`; close to 1 when the tuning estimate and geometry agree.
    pub ratio: Scalar,
}

/// Acoustic mass `ρ₀·(L + k·d) / A` of all ports in parallel, in kg/m⁴.
#[must_use]
pub fn geometric_port_mass(enclosure: &EnclosureParameters) -> Scalar {
    let effective_length =
        enclosure.port_length + enclosure.end_correction * enclosure.single_port_diameter();
    enclosure.air_density * effective_length / enclosure.port_area
}

fn is_positive_finite(value: Scalar) -> bool {
    value.is_finite() && value > 0.0
}
