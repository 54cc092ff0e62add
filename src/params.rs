//! Driver and enclosure parameter records.
//!
//! All fields are SI scalars. Records are plain values: the solver never
//! mutates them and keeps nothing between calls.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::constants::{AIR_DENSITY, LEAKAGE_Q, SPEED_OF_SOUND};
use crate::errors::{Result, VentedBoxError};
use crate::math::Scalar;

/// Electro-mechanical (Thiele/Small) parameters of the driver.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverParameters {
    /// Voice-coil DC resistance `Re` in Ω.
    pub re: Scalar,
    /// Voice-coil inductance `Le` in H.
    pub le: Scalar,
    /// Suspension compliance `Cms` in m/N.
    pub cms: Scalar,
    /// Moving mass `Mms` in kg.
    pub mms: Scalar,
    /// Mechanical resistance `Rms` in kg/s.
    pub rms: Scalar,
    /// Motor force factor `Bl` in T·m.
    pub bl: Scalar,
    /// Effective diaphragm area `Sd` in m².
    pub sd: Scalar,
    /// Source voltage `Vg` in V.
    pub vg: Scalar,
}

impl DriverParameters {
    /// Checks the invariants the solver relies on.
    ///
    /// `re`, `cms` and `mms` must be strictly positive; `le`, `rms`, `sd` and `vg`
    /// non-negative; `bl` finite.
    pub fn validate(&self) -> Result<()> {
        positive("driver.re", self.re)?;
        positive("driver.cms", self.cms)?;
        positive("driver.mms", self.mms)?;
        non_negative("driver.le", self.le)?;
        non_negative("driver.rms", self.rms)?;
        non_negative("driver.sd", self.sd)?;
        non_negative("driver.vg", self.vg)?;
        finite("driver.bl", self.bl)?;
        Ok(())
    }

    /// Free-air resonance `1 / (2π·√(Mms·Cms))` in Hz.
    #[must_use]
    pub fn resonance_hz(&self) -> Scalar {
        1.0 / (2.0 * PI * (self.mms * self.cms).sqrt())
    }
}

/// Box and port geometry plus the air properties used to model them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosureParameters {
    /// Net internal volume `Vb` in m³.
    pub volume: Scalar,
    /// Cross-sectional area of all ports together in m².
    pub port_area: Scalar,
    /// Physical port length in m.
    pub port_length: Scalar,
    /// End-correction factor (dimensionless), see [`EndCorrection`].
    pub end_correction: Scalar,
    /// Number of identical ports sharing `port_area`.
    pub port_count: u32,
    /// Leakage quality factor `Ql`.
    pub leakage_q: Scalar,
    /// Air density ρ₀ in kg/m³.
    pub air_density: Scalar,
    /// Speed of sound `c` in m/s.
    pub speed_of_sound: Scalar,
}

impl EnclosureParameters {
    /// Creates an enclosure with default `Ql`, ρ₀ and `c`.
    #[must_use]
    pub fn new(
        volume: Scalar,
        port_area: Scalar,
        port_length: Scalar,
        end_correction: EndCorrection,
        port_count: u32,
    ) -> Self {
        Self {
            volume,
            port_area,
            port_length,
            end_correction: end_correction.factor(),
            port_count,
            leakage_q: LEAKAGE_Q,
            air_density: AIR_DENSITY,
            speed_of_sound: SPEED_OF_SOUND,
        }
    }

    /// Replaces the leakage quality factor.
    #[must_use]
    pub fn with_leakage_q(mut self, leakage_q: Scalar) -> Self {
        self.leakage_q = leakage_q;
        self
    }

    /// Replaces the air density and speed of sound.
    #[must_use]
    pub fn with_air(mut self, air_density: Scalar, speed_of_sound: Scalar) -> Self {
        self.air_density = air_density;
        self.speed_of_sound = speed_of_sound;
        self
    }

    /// Area of one port in m².
    #[must_use]
    pub fn single_port_area(&self) -> Scalar {
        self.port_area / Scalar::from(self.port_count.max(1))
    }

    /// Diameter of a round port with the area of one port, in m.
    #[must_use]
    pub fn single_port_diameter(&self) -> Scalar {
        2.0 * (self.single_port_area() / PI).sqrt()
    }

    /// Checks the invariants the solver relies on. Geometry problems specific
    /// to the tuning formulas are reported by the estimator itself.
    pub fn validate(&self) -> Result<()> {
        positive("enclosure.volume", self.volume)?;
        positive("enclosure.port_area", self.port_area)?;
        finite("enclosure.port_length", self.port_length)?;
        positive("enclosure.end_correction", self.end_correction)?;
        if self.port_count == 0 {
            return Err(VentedBoxError::invalid_parameter(
                "enclosure.port_count",
                "at least one port is required",
            ));
        }
        positive("enclosure.leakage_q", self.leakage_q)?;
        positive("enclosure.air_density", self.air_density)?;
        positive("enclosure.speed_of_sound", self.speed_of_sound)?;
        Ok(())
    }
}

/// Port mouth termination, which sets how far the moving air mass extends
/// beyond the physical port length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndCorrection {
    /// Port bounded by three enclosure walls.
    ThreeCommonWalls,
    /// Port bounded by two enclosure walls.
    TwoCommonWalls,
    /// Port bounded by one enclosure wall.
    OneCommonWall,
    /// One flanged end, one free end.
    OneFlangedEnd,
    /// Both ends flanged.
    BothFlangedEnds,
    /// Both ends free.
    BothFreeEnds,
}

impl EndCorrection {
    /// Factor applied to unrecognized labels by [`EndCorrection::factor_for_label`].
    pub const DEFAULT_FACTOR: Scalar = 0.823;

    /// All terminations in display order.
    pub const ALL: [Self; 6] = [
        Self::ThreeCommonWalls,
        Self::TwoCommonWalls,
        Self::OneCommonWall,
        Self::OneFlangedEnd,
        Self::BothFlangedEnds,
        Self::BothFreeEnds,
    ];

    /// End-correction factor for this termination.
    #[must_use]
    pub const fn factor(self) -> Scalar {
        match self {
            Self::ThreeCommonWalls => 2.227,
            Self::TwoCommonWalls => 1.728,
            Self::OneCommonWall => 1.23,
            Self::OneFlangedEnd => 0.732,
            Self::BothFlangedEnds => 0.85,
            Self::BothFreeEnds => 0.614,
        }
    }

    /// Display label, also the key accepted by [`FromStr`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeCommonWalls => "3 Common Walls",
            Self::TwoCommonWalls => "2 Common Walls",
            Self::OneCommonWall => "1 Common Wall",
            Self::OneFlangedEnd => "One Flanged End",
            Self::BothFlangedEnds => "Both Flanged Ends",
            Self::BothFreeEnds => "Both Free Ends",
        }
    }

    /// Lenient lookup: unrecognized labels map to [`Self::DEFAULT_FACTOR`].
    #[must_use]
    pub fn factor_for_label(label: &str) -> Scalar {
        match label.parse::<Self>() {
            Ok(kind) => kind.factor(),
            Err(_) => {
                warn!(label, default = Self::DEFAULT_FACTOR, "unknown end correction");
                Self::DEFAULT_FACTOR
            }
        }
    }
}

impl fmt::Display for EndCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EndCorrection {
    type Err = VentedBoxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| {
                VentedBoxError::invalid_parameter(
                    "enclosure.end_correction",
                    format!("`{s}` is not a known port termination"),
                )
            })
    }
}

fn finite(field: &str, value: Scalar) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VentedBoxError::invalid_parameter(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &str, value: Scalar) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(VentedBoxError::invalid_parameter(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &str, value: Scalar) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(VentedBoxError::invalid_parameter(field, format!("must be >= 0, got {value}")))
    }
}
