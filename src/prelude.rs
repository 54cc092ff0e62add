//! Convenience re-exports for simulating vented enclosures.

pub use crate::circuits::{
    acoustics::{geometric_port_mass, BoxAcoustics, PortMassCheck},
    component::{Compliance, Component, Mass, Resistance},
    mesh::{MeshSolution, MeshSystem},
    network::{ConnectionKind, Network},
    solver::{solve, solve_with, try_solve, CircuitImpedances, FrequencyPoint},
};
#[cfg(feature = "config")]
pub use crate::config::{BoxConfig, Measurement, SweepConfig};
pub use crate::constants::{angular_frequency, AIR_DENSITY, LEAKAGE_Q, SPEED_OF_SOUND};
pub use crate::errors::{NetworkTerm, Result, VentedBoxError};
pub use crate::math::{CScalar, Scalar};
pub use crate::params::{DriverParameters, EnclosureParameters, EndCorrection};
pub use crate::reference::{reference_driver, reference_enclosure};
pub use crate::sweep::{
    curve_values, frequency_grid, group_delay_ms, run_sweep, sweep_points, unwrap_phase,
    write_curve_csv, write_frequency_points_csv, CurveKind, SweepPoints, SweepResult,
};
pub use crate::tuning::{estimate_tuning, TuningEstimate};
pub use crate::units::{convert, to_si, Dimension};
