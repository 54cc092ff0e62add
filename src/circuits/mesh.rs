//! Mesh (loop) formulation of the vented-box circuit.
//!
//! Unknowns `x = [I, U, Pd]`:
//!
//! ```text
//! | Zelec   Bl      0     | |I |   |Vg|
//! | Bl     -Zmech  -Sd    | |U | = | 0|
//! | 0       Sd     -1/Zb  | |Pd|   | 0|
//! ```
//!
//! Solved by LU factorization. This is slower than the closed form in
//! [`super::solver`] but makes no elimination assumptions, so it is used to
//! cross-check that path.

use nalgebra::{Matrix3, Vector3};
use num_complex::Complex;

use crate::math::{CScalar, Scalar};
use crate::params::DriverParameters;

use super::acoustics::BoxAcoustics;
use super::solver::CircuitImpedances;

/// Assembled 3×3 loop system at one angular frequency.
#[derive(Debug, Clone)]
pub struct MeshSystem {
    /// Loop impedance matrix.
    pub matrix: Matrix3<CScalar>,
    /// Source vector.
    pub sources: Vector3<CScalar>,
}

/// Loop unknowns solved from a [`MeshSystem`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSolution {
    /// Loop current `I`.
    pub current: CScalar,
    /// Diaphragm velocity `U`.
    pub velocity: CScalar,
    /// Box pressure `Pd`.
    pub box_pressure: CScalar,
}

impl MeshSolution {
    /// Input impedance `Vg / I`.
    #[must_use]
    pub fn input_impedance(&self, vg: Scalar) -> CScalar {
        Complex::new(vg, 0.0) / self.current
    }
}

impl MeshSystem {
    /// Assembles the loop system; `None` when a branch impedance is unusable.
    #[must_use]
    pub fn assemble(omega: Scalar, driver: &DriverParameters, acoustics: &BoxAcoustics) -> Option<Self> {
        let z = CircuitImpedances::at(omega, driver, acoustics).ok()?;
        let zero = CScalar::default();
        let bl = Complex::new(driver.bl, 0.0);
        let sd = Complex::new(driver.sd, 0.0);
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            z.electrical, bl, zero,
            bl, -z.mechanical, -sd,
            zero, sd, -z.box_branch.inv(),
        );
        let sources = Vector3::new(Complex::new(driver.vg, 0.0), zero, zero);
        Some(Self { matrix, sources })
    }

    /// Solves by LU factorization; `None` when the matrix is singular.
    #[must_use]
    pub fn solve(&self) -> Option<MeshSolution> {
        let x = self.matrix.lu().solve(&self.sources)?;
        if !x.iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(MeshSolution {
            current: x[0],
            velocity: x[1],
            box_pressure: x[2],
        })
    }
}
