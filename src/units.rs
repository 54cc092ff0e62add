//! Unit conversion table for every physical quantity the model accepts.
//!
//! One table keyed by `(symbol, dimension)` replaces per-field conversion
//! helpers. Each entry stores the factor that takes a value in that unit to
//! the SI unit of its dimension, so any conversion is `value · from / to`.
//! Symbols are matched case-sensitively, as they are displayed.

use std::fmt;

use crate::errors::{Result, VentedBoxError};
use crate::math::Scalar;

/// Physical dimension a unit symbol belongs to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Length, SI unit m.
    Length,
    /// Area, SI unit m².
    Area,
    /// Volume, SI unit m³.
    Volume,
    /// Inductance, SI unit H.
    Inductance,
    /// Mass, SI unit kg.
    Mass,
    /// Mechanical compliance, SI unit m/N.
    Compliance,
    /// Mechanical resistance, SI unit kg/s.
    MechanicalResistance,
    /// Electrical resistance, SI unit Ω.
    Resistance,
    /// Voltage, SI unit V.
    Voltage,
    /// Motor force factor, SI unit T·m.
    ForceFactor,
    /// Frequency, SI unit Hz.
    Frequency,
}

impl Dimension {
    /// Symbol of the SI unit for this dimension.
    #[must_use]
    pub fn si_symbol(self) -> &'static str {
        match self {
            Self::Length => "m",
            Self::Area => "m^2",
            Self::Volume => "m^3",
            Self::Inductance => "H",
            Self::Mass => "Kg",
            Self::Compliance => "m/N",
            Self::MechanicalResistance => "Kg/s",
            Self::Resistance => "ohm",
            Self::Voltage => "V",
            Self::ForceFactor => "Tm",
            Self::Frequency => "Hz",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One row of the conversion table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Display symbol, e.g. `cm^2`.
    pub symbol: &'static str,
    /// Dimension the symbol measures.
    pub dimension: Dimension,
    /// Multiplier taking a value in this unit to SI.
    pub to_si: Scalar,
}

const IN: Scalar = 0.0254;
const FT: Scalar = 0.3048;

const fn unit(symbol: &'static str, dimension: Dimension, to_si: Scalar) -> UnitDef {
    UnitDef {
        symbol,
        dimension,
        to_si,
    }
}

/// Every supported unit.
pub const UNIT_TABLE: &[UnitDef] = &[
    unit("m", Dimension::Length, 1.0),
    unit("cm", Dimension::Length, 1.0e-2),
    unit("mm", Dimension::Length, 1.0e-3),
    unit("in", Dimension::Length, IN),
    unit("ft", Dimension::Length, FT),
    unit("m^2", Dimension::Area, 1.0),
    unit("cm^2", Dimension::Area, 1.0e-4),
    unit("mm^2", Dimension::Area, 1.0e-6),
    unit("in^2", Dimension::Area, IN * IN),
    unit("ft^2", Dimension::Area, FT * FT),
    unit("m^3", Dimension::Volume, 1.0),
    unit("L", Dimension::Volume, 1.0e-3),
    unit("cm^3", Dimension::Volume, 1.0e-6),
    unit("mm^3", Dimension::Volume, 1.0e-9),
    unit("in^3", Dimension::Volume, IN * IN * IN),
    unit("ft^3", Dimension::Volume, FT * FT * FT),
    unit("H", Dimension::Inductance, 1.0),
    unit("mH", Dimension::Inductance, 1.0e-3),
    unit("Kg", Dimension::Mass, 1.0),
    unit("g", Dimension::Mass, 1.0e-3),
    unit("m/N", Dimension::Compliance, 1.0),
    unit("mm/N", Dimension::Compliance, 1.0e-3),
    unit("um/N", Dimension::Compliance, 1.0e-6),
    unit("Kg/s", Dimension::MechanicalResistance, 1.0),
    unit("Ns/m", Dimension::MechanicalResistance, 1.0),
    unit("ohm", Dimension::Resistance, 1.0),
    unit("V", Dimension::Voltage, 1.0),
    unit("Tm", Dimension::ForceFactor, 1.0),
    unit("Hz", Dimension::Frequency, 1.0),
];

/// Finds the table row for `symbol` within `dimension`.
pub fn lookup(symbol: &str, dimension: Dimension) -> Result<&'static UnitDef> {
    UNIT_TABLE
        .iter()
        .find(|u| u.dimension == dimension && u.symbol == symbol)
        .ok_or_else(|| {
            VentedBoxError::invalid_parameter(
                "unit",
                format!("`{symbol}` is not a known {dimension} unit"),
            )
        })
}

/// Symbols available for `dimension`, in table order.
pub fn symbols(dimension: Dimension) -> impl Iterator<Item = &'static str> {
    UNIT_TABLE
        .iter()
        .filter(move |u| u.dimension == dimension)
        .map(|u| u.symbol)
}

/// Converts `value` from unit `from` to unit `to`, both of `dimension`.
pub fn convert(value: Scalar, from: &str, to: &str, dimension: Dimension) -> Result<Scalar> {
    let from = lookup(from, dimension)?;
    let to = lookup(to, dimension)?;
    if from.symbol == to.symbol {
        return Ok(value);
    }
    Ok(value * from.to_si / to.to_si)
}

/// Converts `value` expressed in `unit` into the SI unit of `dimension`.
pub fn to_si(value: Scalar, unit: &str, dimension: Dimension) -> Result<Scalar> {
    let def = lookup(unit, dimension)?;
    Ok(value * def.to_si)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn every_dimension_has_its_si_unit_at_factor_one() {
        for dim in [
            Dimension::Length,
            Dimension::Area,
            Dimension::Volume,
            Dimension::Inductance,
            Dimension::Mass,
            Dimension::Compliance,
            Dimension::MechanicalResistance,
            Dimension::Resistance,
            Dimension::Voltage,
            Dimension::ForceFactor,
            Dimension::Frequency,
        ] {
            let def = lookup(dim.si_symbol(), dim).expect("si unit present");
            assert_eq!(def.to_si, 1.0);
        }
    }

    #[test]
    fn imperial_factors_are_exact() {
        assert_relative_eq!(to_si(1.0, "in", Dimension::Length).unwrap(), 0.0254);
        assert_relative_eq!(
            convert(1.0, "m^2", "in^2", Dimension::Area).unwrap(),
            1550.003_100_006_2,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            convert(1.0, "ft^3", "L", Dimension::Volume).unwrap(),
            28.316_846_592,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn metric_prefixes() {
        assert_relative_eq!(
            to_si(7900.0, "mm^2", Dimension::Area).unwrap(),
            0.0079,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(to_si(4.2, "mH", Dimension::Inductance).unwrap(), 0.0042);
        assert_relative_eq!(to_si(460.0, "um/N", Dimension::Compliance).unwrap(), 0.00046);
        assert_relative_eq!(to_si(166.3, "g", Dimension::Mass).unwrap(), 0.1663);
    }

    #[test]
    fn symbols_are_scoped_by_dimension() {
        assert!(lookup("m", Dimension::Area).is_err());
        assert!(lookup("M^2", Dimension::Area).is_err());
        let areas: Vec<_> = symbols(Dimension::Area).collect();
        assert_eq!(areas, vec!["m^2", "cm^2", "mm^2", "in^2", "ft^2"]);
    }

    #[test]
    fn unknown_unit_is_invalid_parameter() {
        let err = convert(1.0, "furlong", "m", Dimension::Length).unwrap_err();
        assert!(matches!(err, VentedBoxError::InvalidParameter { .. }));
    }
}
