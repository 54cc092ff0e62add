//! Shared error types used across submodules.

use std::fmt;

use thiserror::Error;

use crate::math::Scalar;

/// Intermediate quantity of the equivalent circuit that could not be formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTerm {
    /// Box acoustic compliance `Ccab`.
    BoxCompliance,
    /// Port acoustic mass `Lmap`.
    PortMass,
    /// Leakage acoustic resistance `Ral`.
    LeakageResistance,
    /// Electrical branch `Re + s·Le`.
    ElectricalImpedance,
    /// Driver mechanical branch `Rms + s·Mms + 1/(s·Cms)`.
    MechanicalImpedance,
    /// Box/port parallel branch `Zb`.
    BoxImpedance,
    /// Mechanical branch plus reflected box load `Zmech + Sd²·Zb`.
    MotionalImpedance,
    /// Total input impedance `Zin`.
    InputImpedance,
}

impl fmt::Display for NetworkTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BoxCompliance => "box compliance Ccab",
            Self::PortMass => "port acoustic mass Lmap",
            Self::LeakageResistance => "leakage resistance Ral",
            Self::ElectricalImpedance => "electrical impedance Zelec",
            Self::MechanicalImpedance => "mechanical impedance Zmech",
            Self::BoxImpedance => "box/port impedance Zb",
            Self::MotionalImpedance => "motional impedance Zmech + Sd^2*Zb",
            Self::InputImpedance => "input impedance Zin",
        };
        f.write_str(label)
    }
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum VentedBoxError {
    /// Enclosure or port geometry yields a non-physical tuning estimate.
    #[error("invalid enclosure geometry: {0}")]
    InvalidGeometry(String),
    /// A circuit denominator vanished or overflowed for a pathological parameter set.
    #[error("degenerate network at {frequency_hz} Hz: {term} is zero or non-finite")]
    DegenerateNetwork {
        /// Frequency of the failed sample.
        frequency_hz: Scalar,
        /// Intermediate that could not be formed.
        term: NetworkTerm,
    },
    /// A box/port element derived from the tuning frequency is zero or non-finite.
    #[error("degenerate box tuned to {tuning_hz} Hz: {term} is zero or non-finite")]
    DegenerateBox {
        /// Tuning frequency the elements were derived from.
        tuning_hz: Scalar,
        /// Element that could not be formed.
        term: NetworkTerm,
    },
    /// A field is missing, non-finite, out of range or outside an enumerated set.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Parameter file could not be parsed.
    #[cfg(feature = "config")]
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    /// Parameter file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VentedBoxError {
    /// Shorthand for [`VentedBoxError::InvalidParameter`].
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VentedBoxError>;
