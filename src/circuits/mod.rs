//! Equivalent-circuit model of a driver loaded by a vented box.

/// Lumped component definitions and traits.
pub mod component;
/// Aggregate network composition helpers.
pub mod network;
/// Box compliance, port mass and leakage elements.
pub mod acoustics;
/// Closed-form per-frequency solve.
pub mod solver;
/// Matrix (loop) formulation of the same circuit.
pub mod mesh;

pub use acoustics::{geometric_port_mass, BoxAcoustics, PortMassCheck};
pub use component::{Compliance, Component, Mass, Resistance};
pub use mesh::{MeshSolution, MeshSystem};
pub use network::{ConnectionKind, Network};
pub use solver::{solve, solve_with, try_solve, CircuitImpedances, FrequencyPoint};
