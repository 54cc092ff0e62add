//! TOML parameter files.
//!
//! Every dimensional field takes either a bare SI number or a
//! `{ value, unit }` table whose unit is looked up in [`crate::units`]:
//!
//! ```toml
//! [driver]
//! re = 3.5
//! le = { value = 4.2, unit = "mH" }
//! cms = { value = 0.46, unit = "mm/N" }
//! mms = { value = 166.3, unit = "g" }
//! rms = 5.12
//! bl = 17.6
//! sd = { value = 466.2, unit = "cm^2" }
//! vg = 10.0
//!
//! [enclosure]
//! volume = { value = 100.0, unit = "L" }
//! port_area = { value = 79.0, unit = "cm^2" }
//! port_length = { value = 30.3, unit = "cm" }
//! end_correction = "One Flanged End"
//! number_of_ports = 1
//!
//! [sweep]
//! start = 10.0
//! stop = 200.0
//! step = 0.5
//! curve = "Impedance"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{AIR_DENSITY, LEAKAGE_Q, SPEED_OF_SOUND};
use crate::errors::Result;
use crate::math::Scalar;
use crate::params::{DriverParameters, EnclosureParameters, EndCorrection};
use crate::sweep::CurveKind;
use crate::units::{to_si, Dimension};

/// A number in SI units, or a number with an explicit unit symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// Value already in the SI unit of its field.
    Si(Scalar),
    /// Value in the given unit.
    WithUnit {
        /// Numeric value.
        value: Scalar,
        /// Unit symbol from the conversion table.
        unit: String,
    },
}

impl Measurement {
    /// Resolves the measurement to SI for `dimension`.
    pub fn to_si(&self, dimension: Dimension) -> Result<Scalar> {
        match self {
            Self::Si(value) => Ok(*value),
            Self::WithUnit { value, unit } => to_si(*value, unit, dimension),
        }
    }
}

/// `[driver]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    /// Voice-coil resistance (ohm).
    pub re: Measurement,
    /// Voice-coil inductance (H).
    pub le: Measurement,
    /// Suspension compliance (m/N).
    pub cms: Measurement,
    /// Moving mass (Kg).
    pub mms: Measurement,
    /// Mechanical resistance (Kg/s).
    pub rms: Measurement,
    /// Force factor (Tm).
    pub bl: Measurement,
    /// Diaphragm area (m^2).
    pub sd: Measurement,
    /// Source voltage (V).
    pub vg: Measurement,
}

/// `[enclosure]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnclosureConfig {
    /// Net box volume (m^3).
    pub volume: Measurement,
    /// Total port area (m^2).
    pub port_area: Measurement,
    /// Port length (m).
    pub port_length: Measurement,
    /// Port termination label.
    #[serde(default = "default_end_correction")]
    pub end_correction: String,
    /// Number of identical ports.
    #[serde(default = "default_port_count")]
    pub number_of_ports: u32,
    /// Leakage quality factor override.
    pub leakage_q: Option<Scalar>,
    /// Air density override (Kg/m^3).
    pub air_density: Option<Scalar>,
    /// Speed of sound override (m/s).
    pub speed_of_sound: Option<Scalar>,
}

/// `[sweep]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// First frequency in Hz.
    pub start: Scalar,
    /// Last frequency in Hz.
    pub stop: Scalar,
    /// Spacing in Hz.
    pub step: Scalar,
    /// Curve to extract.
    pub curve: CurveKind,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: 10.0,
            stop: 200.0,
            step: 0.5,
            curve: CurveKind::Impedance,
        }
    }
}

/// A complete parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxConfig {
    /// Driver parameters.
    pub driver: DriverConfig,
    /// Box and port geometry.
    pub enclosure: EnclosureConfig,
    /// Optional sweep settings.
    pub sweep: Option<SweepConfig>,
}

impl BoxConfig {
    /// Loads a parameter file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading parameter file");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a parameter file from a string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Sweep settings, defaulted when the file has no `[sweep]` table.
    #[must_use]
    pub fn sweep(&self) -> SweepConfig {
        self.sweep.clone().unwrap_or_default()
    }

    /// Converts to validated SI parameter records.
    pub fn parameters(&self) -> Result<(DriverParameters, EnclosureParameters)> {
        let d = &self.driver;
        let driver = DriverParameters {
            re: d.re.to_si(Dimension::Resistance)?,
            le: d.le.to_si(Dimension::Inductance)?,
            cms: d.cms.to_si(Dimension::Compliance)?,
            mms: d.mms.to_si(Dimension::Mass)?,
            rms: d.rms.to_si(Dimension::MechanicalResistance)?,
            bl: d.bl.to_si(Dimension::ForceFactor)?,
            sd: d.sd.to_si(Dimension::Area)?,
            vg: d.vg.to_si(Dimension::Voltage)?,
        };
        driver.validate()?;

        let e = &self.enclosure;
        let end_correction: EndCorrection = e.end_correction.parse()?;
        let enclosure = EnclosureParameters::new(
            e.volume.to_si(Dimension::Volume)?,
            e.port_area.to_si(Dimension::Area)?,
            e.port_length.to_si(Dimension::Length)?,
            end_correction,
            e.number_of_ports,
        )
        .with_leakage_q(e.leakage_q.unwrap_or(LEAKAGE_Q))
        .with_air(
            e.air_density.unwrap_or(AIR_DENSITY),
            e.speed_of_sound.unwrap_or(SPEED_OF_SOUND),
        );
        enclosure.validate()?;

        Ok((driver, enclosure))
    }
}

fn default_end_correction() -> String {
    EndCorrection::OneFlangedEnd.label().to_string()
}

fn default_port_count() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::errors::VentedBoxError;
    use crate::reference::{reference_driver, reference_enclosure};
    use crate::tuning::estimate_tuning;

    const REFERENCE_TOML: &str = include_str!("../demos/reference.toml");

    const SI_TOML: &str = r#"
[driver]
re = 3.5
le = 0.0042
cms = 0.00046
mms = 0.1663
rms = 5.12
bl = 17.6
sd = 0.04662
vg = 10.0

[enclosure]
volume = 0.1
port_area = 0.0079
port_length = 0.303
"#;

    fn assert_matches_reference(driver: &DriverParameters, enclosure: &EnclosureParameters) {
        let expected = reference_driver();
        for (got, want) in [
            (driver.re, expected.re),
            (driver.le, expected.le),
            (driver.cms, expected.cms),
            (driver.mms, expected.mms),
            (driver.rms, expected.rms),
            (driver.bl, expected.bl),
            (driver.sd, expected.sd),
            (driver.vg, expected.vg),
        ] {
            assert_relative_eq!(got, want, max_relative = 1.0e-12);
        }
        let expected = reference_enclosure();
        assert_relative_eq!(enclosure.volume, expected.volume, max_relative = 1.0e-12);
        assert_relative_eq!(enclosure.port_area, expected.port_area, max_relative = 1.0e-12);
        assert_relative_eq!(enclosure.port_length, expected.port_length, max_relative = 1.0e-12);
        assert_eq!(enclosure.end_correction, expected.end_correction);
        assert_eq!(enclosure.port_count, expected.port_count);
    }

    #[test]
    fn si_file_uses_defaults() {
        let config = BoxConfig::from_toml_str(SI_TOML).unwrap();
        let (driver, enclosure) = config.parameters().unwrap();
        assert_matches_reference(&driver, &enclosure);
        assert_eq!(enclosure.leakage_q, LEAKAGE_Q);
        assert_eq!(enclosure.air_density, AIR_DENSITY);
        assert_eq!(config.sweep(), SweepConfig::default());
    }

    #[test]
    fn display_units_resolve_to_the_same_tuning() {
        let config = BoxConfig::from_toml_str(REFERENCE_TOML).unwrap();
        let (driver, enclosure) = config.parameters().unwrap();
        assert_matches_reference(&driver, &enclosure);
        assert_relative_eq!(
            estimate_tuning(&enclosure).unwrap(),
            estimate_tuning(&reference_enclosure()).unwrap(),
            max_relative = 1.0e-9
        );
        assert_eq!(config.sweep().curve, CurveKind::Impedance);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(REFERENCE_TOML.as_bytes()).unwrap();
        let config = BoxConfig::load(file.path()).unwrap();
        assert!(config.parameters().is_ok());

        let missing = BoxConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(VentedBoxError::Io(_))));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let content = SI_TOML.replace("re = 3.5", r#"re = { value = 3.5, unit = "kohm" }"#);
        let err = BoxConfig::from_toml_str(&content)
            .unwrap()
            .parameters()
            .unwrap_err();
        assert!(err.to_string().contains("kohm"));
    }

    #[test]
    fn unknown_end_correction_is_rejected() {
        let content = format!("{SI_TOML}end_correction = \"Slot Port\"\n");
        let err = BoxConfig::from_toml_str(&content)
            .unwrap()
            .parameters()
            .unwrap_err();
        assert!(matches!(err, VentedBoxError::InvalidParameter { .. }));
    }

    #[test]
    fn sweep_table_parses_curve_labels() {
        let content = format!(
            "{SI_TOML}\n[sweep]\nstart = 5.0\nstop = 50.0\ncurve = \"Group Delay\"\n"
        );
        let sweep = BoxConfig::from_toml_str(&content).unwrap().sweep();
        assert_eq!(sweep.curve, CurveKind::GroupDelay);
        assert_eq!(sweep.start, 5.0);
        assert_eq!(sweep.step, 0.5);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = BoxConfig::from_toml_str("[driver]\nre = \"three\"").unwrap_err();
        assert!(matches!(err, VentedBoxError::Config(_)));
    }
}
