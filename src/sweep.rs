//! Frequency sweeps over the vented-box circuit and curve post-processing.
//!
//! Tuning and box acoustics are computed once per sweep; every sample then
//! runs through the closed-form solver. Degenerate samples are kept as
//! sentinels and their indices reported in [`SweepResult::degenerate`].

use std::f64::consts::PI;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use num_complex::Complex;
use tracing::{debug, info, warn};

use crate::circuits::acoustics::BoxAcoustics;
use crate::circuits::solver::{sentinel_for, solve, solve_with, FrequencyPoint};
use crate::constants::angular_frequency;
use crate::errors::{Result, VentedBoxError};
use crate::math::Scalar;
use crate::params::{DriverParameters, EnclosureParameters};
use crate::tuning::TuningEstimate;

/// Tolerance added before flooring the sample count so `stop` survives rounding.
const GRID_EPSILON: Scalar = 1.0e-9;
/// Largest grid [`frequency_grid`] will allocate.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Curve extracted from a sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveKind {
    /// `|Zin|` in Ω.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Impedance", alias = "impedance"))]
    Impedance,
    /// Peak cone excursion in mm.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Cone Excursion", alias = "cone-excursion", alias = "excursion")
    )]
    ConeExcursion,
    /// Peak port air velocity in m/s.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Port Velocity", alias = "port-velocity", alias = "velocity")
    )]
    PortVelocity,
    /// `-dφ/dω` of the input impedance in ms.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Group Delay", alias = "group-delay")
    )]
    GroupDelay,
}

impl CurveKind {
    /// All curves in display order.
    pub const ALL: [Self; 4] = [
        Self::Impedance,
        Self::ConeExcursion,
        Self::PortVelocity,
        Self::GroupDelay,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Impedance => "Impedance",
            Self::ConeExcursion => "Cone Excursion",
            Self::PortVelocity => "Port Velocity",
            Self::GroupDelay => "Group Delay",
        }
    }

    /// Snake-case column name used in CSV headers.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Impedance => "impedance_ohm",
            Self::ConeExcursion => "cone_excursion_mm",
            Self::PortVelocity => "port_velocity_m_s",
            Self::GroupDelay => "group_delay_ms",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CurveKind {
    type Err = VentedBoxError;

    /// Accepts the display label or a lower-case, dash/underscore separated form.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match key.as_str() {
            "impedance" => Ok(Self::Impedance),
            "cone excursion" | "excursion" => Ok(Self::ConeExcursion),
            "port velocity" | "velocity" => Ok(Self::PortVelocity),
            "group delay" => Ok(Self::GroupDelay),
            _ => Err(VentedBoxError::invalid_parameter(
                "curve",
                format!("`{s}` is not one of Impedance, Cone Excursion, Port Velocity, Group Delay"),
            )),
        }
    }
}

/// Evenly spaced ascending frequencies from `start_hz` to `stop_hz` inclusive.
///
/// The count is `floor((stop - start) / step) + 1`; the last sample is
/// `start + (count - 1)·step` and may fall short of `stop`. Grids longer than
/// [`MAX_SAMPLES`] are rejected.
pub fn frequency_grid(start_hz: Scalar, stop_hz: Scalar, step_hz: Scalar) -> Result<Vec<Scalar>> {
    if !(start_hz.is_finite() && stop_hz.is_finite() && step_hz.is_finite()) {
        return Err(VentedBoxError::invalid_parameter(
            "sweep",
            format!("range must be finite, got {start_hz}..{stop_hz} step {step_hz}"),
        ));
    }
    if start_hz < 0.0 {
        return Err(VentedBoxError::invalid_parameter(
            "sweep.start",
            format!("must be >= 0, got {start_hz}"),
        ));
    }
    if stop_hz <= start_hz {
        return Err(VentedBoxError::invalid_parameter(
            "sweep.stop",
            format!("must exceed start ({start_hz}), got {stop_hz}"),
        ));
    }
    if step_hz <= 0.0 {
        return Err(VentedBoxError::invalid_parameter(
            "sweep.step",
            format!("must be > 0, got {step_hz}"),
        ));
    }

    let intervals = ((stop_hz - start_hz) / step_hz + GRID_EPSILON).floor();
    let count = (intervals.is_finite() && intervals < MAX_SAMPLES as Scalar)
        .then(|| (intervals as usize).checked_add(1))
        .flatten()
        .filter(|&count| count <= MAX_SAMPLES)
        .ok_or_else(|| {
            VentedBoxError::invalid_parameter(
                "sweep.step",
                format!(
                    "{start_hz}..{stop_hz} Hz in steps of {step_hz} Hz exceeds {MAX_SAMPLES} samples"
                ),
            )
        })?;
    Ok((0..count)
        .map(|i| start_hz + step_hz * i as Scalar)
        .collect())
}

/// Magnitude of complex sequence.
#[must_use]
pub fn mag(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Removes ±2π jumps so consecutive samples differ by at most π.
#[must_use]
pub fn unwrap_phase(phase: &[Scalar]) -> Vec<Scalar> {
    let mut unwrapped = Vec::with_capacity(phase.len());
    let Some(&first) = phase.first() else {
        return unwrapped;
    };

    unwrapped.push(first);
    let mut offset = 0.0;
    let mut prev = first;
    for &p in &phase[1..] {
        let diff = p - prev;
        if diff > PI {
            offset -= 2.0 * PI;
        } else if diff < -PI {
            offset += 2.0 * PI;
        }
        unwrapped.push(p + offset);
        prev = p;
    }
    unwrapped
}

/// Group delay `-1000·dφ/dω` in ms of a phase sequence sampled at `frequencies_hz`.
///
/// The phase is unwrapped first. Interior samples use a central difference,
/// the two ends a one-sided one. A single sample has zero delay.
#[must_use]
pub fn group_delay_ms(frequencies_hz: &[Scalar], phase: &[Scalar]) -> Vec<Scalar> {
    let n = frequencies_hz.len().min(phase.len());
    if n < 2 {
        return vec![0.0; n];
    }

    let unwrapped = unwrap_phase(&phase[..n]);
    let omega: Vec<Scalar> = frequencies_hz[..n].iter().copied().map(angular_frequency).collect();
    (0..n)
        .map(|i| {
            let (lo, hi) = match i {
                0 => (0, 1),
                i if i == n - 1 => (n - 2, n - 1),
                i => (i - 1, i + 1),
            };
            let dw = omega[hi] - omega[lo];
            if dw == 0.0 {
                0.0
            } else {
                -1000.0 * (unwrapped[hi] - unwrapped[lo]) / dw
            }
        })
        .collect()
}

/// Extracts `kind` from solved points, index-aligned with `points`.
#[must_use]
pub fn curve_values(kind: CurveKind, points: &[FrequencyPoint]) -> Vec<Scalar> {
    match kind {
        CurveKind::Impedance => mag(points.iter().map(|p| p.zin)),
        CurveKind::ConeExcursion => points.iter().map(|p| p.cone_excursion_mm).collect(),
        CurveKind::PortVelocity => points.iter().map(|p| p.port_velocity).collect(),
        CurveKind::GroupDelay => {
            let freqs: Vec<Scalar> = points.iter().map(|p| p.frequency_hz).collect();
            let phase: Vec<Scalar> = points.iter().map(|p| p.phase).collect();
            group_delay_ms(&freqs, &phase)
        }
    }
}

/// Every solved point of a sweep, before curve selection.
#[derive(Debug, Clone)]
pub struct SweepPoints {
    /// Tuning breakdown shared by all samples.
    pub tuning: TuningEstimate,
    /// One record per grid frequency, ascending.
    pub points: Vec<FrequencyPoint>,
}

impl SweepPoints {
    /// Indices of samples replaced by sentinels.
    #[must_use]
    pub fn degenerate_indices(&self) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.degenerate.map(|_| i))
            .collect()
    }
}

/// One curve over a frequency range.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// Selected curve.
    pub kind: CurveKind,
    /// Tuning frequency used for the whole sweep, in Hz.
    pub tuning_hz: Scalar,
    /// Sample frequencies in Hz, ascending.
    pub frequencies: Vec<Scalar>,
    /// Curve values, index-aligned with `frequencies`.
    pub values: Vec<Scalar>,
    /// Indices of samples whose circuit was degenerate.
    pub degenerate: Vec<usize>,
}

impl SweepResult {
    /// Iterates `(frequency, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Scalar, Scalar)> + '_ {
        self.frequencies.iter().copied().zip(self.values.iter().copied())
    }
}

/// Solves the circuit at every grid frequency.
///
/// Tuning and the box acoustics are evaluated once. Geometry that yields no
/// tuning estimate fails the whole sweep. A box whose elements cannot be
/// formed, or a degenerate driver circuit, only marks the affected samples,
/// exactly as [`solve`] would for each of them.
pub fn sweep_points(
    start_hz: Scalar,
    stop_hz: Scalar,
    step_hz: Scalar,
    driver: &DriverParameters,
    enclosure: &EnclosureParameters,
) -> Result<SweepPoints> {
    let frequencies = frequency_grid(start_hz, stop_hz, step_hz)?;
    let tuning = TuningEstimate::compute(enclosure)?;
    let acoustics = match BoxAcoustics::new(enclosure, tuning.fb_hz) {
        Ok(acoustics) => acoustics,
        Err(err) => {
            warn!(error = %err, "box elements cannot be formed, every sample is degenerate");
            let points = frequencies
                .iter()
                .map(|&f| solve(f, driver, enclosure, tuning.fb_hz))
                .collect();
            return Ok(SweepPoints { tuning, points });
        }
    };

    let check = acoustics.port_mass_check(enclosure);
    debug!(
        tuned = check.tuned,
        geometric = check.geometric,
        ratio = check.ratio,
        "port acoustic mass"
    );

    let points = frequencies
        .iter()
        .map(|&f| {
            solve_with(f, driver, enclosure, &acoustics).unwrap_or_else(|err| sentinel_for(f, &err))
        })
        .collect();
    Ok(SweepPoints { tuning, points })
}

/// Produces one curve over `start_hz..=stop_hz`.
pub fn run_sweep(
    start_hz: Scalar,
    stop_hz: Scalar,
    step_hz: Scalar,
    driver: &DriverParameters,
    enclosure: &EnclosureParameters,
    kind: CurveKind,
) -> Result<SweepResult> {
    let sweep = sweep_points(start_hz, stop_hz, step_hz, driver, enclosure)?;
    let degenerate = sweep.degenerate_indices();
    let values = curve_values(kind, &sweep.points);
    let frequencies: Vec<Scalar> = sweep.points.iter().map(|p| p.frequency_hz).collect();

    info!(
        curve = %kind,
        samples = frequencies.len(),
        degenerate = degenerate.len(),
        fb_hz = sweep.tuning.fb_hz,
        "sweep complete"
    );

    Ok(SweepResult {
        kind,
        tuning_hz: sweep.tuning.fb_hz,
        frequencies,
        values,
        degenerate,
    })
}

/// Writes `frequency_hz,<curve column>` rows.
pub fn write_curve_csv<W: Write>(mut w: W, result: &SweepResult) -> io::Result<()> {
    writeln!(w, "frequency_hz,{}", result.kind.column())?;
    for (f, v) in result.pairs() {
        writeln!(w, "{f:.6},{v:.16e}")?;
    }
    Ok(())
}

/// Writes every field of each point, one row per frequency.
pub fn write_frequency_points_csv<W: Write>(mut w: W, points: &[FrequencyPoint]) -> io::Result<()> {
    writeln!(
        w,
        "frequency_hz,zin_re,zin_im,zin_mag,phase_rad,current_re,current_im,\
         velocity_re,velocity_im,pressure_re,pressure_im,port_velocity_m_s,cone_excursion_mm,degenerate"
    )?;
    for p in points {
        let degenerate = p.degenerate.map(|t| t.to_string()).unwrap_or_default();
        writeln!(
            w,
            "{:.6},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{}",
            p.frequency_hz,
            p.zin.re,
            p.zin.im,
            p.impedance_magnitude(),
            p.phase,
            p.current.re,
            p.current.im,
            p.velocity.re,
            p.velocity.im,
            p.box_pressure.re,
            p.box_pressure.im,
            p.port_velocity,
            p.cone_excursion_mm,
            degenerate,
        )?;
    }
    Ok(())
}
