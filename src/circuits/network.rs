use std::sync::Arc;

use num_complex::Complex;

use crate::math::{open_circuit, CScalar, Scalar};

use super::component::Component;

/// Connection topology for a collection of components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Series connection (impedances add linearly).
    Series,
    /// Parallel connection (admittances add linearly).
    Parallel,
}

/// Aggregate branch that groups components with a shared connection style.
///
/// Non-finite member impedances are treated as open circuits: they make a
/// series branch open and drop out of a parallel branch. A zero-impedance
/// member shorts a parallel branch.
pub struct Network {
    name: String,
    connection: ConnectionKind,
    members: Vec<Arc<dyn Component + Send + Sync>>,
}

impl Network {
    /// Creates an empty branch.
    #[must_use]
    pub fn new(name: impl Into<String>, connection: ConnectionKind) -> Self {
        Self {
            name: name.into(),
            connection,
            members: Vec::new(),
        }
    }

    /// Adds a component to the branch.
    pub fn add_component<C>(&mut self, component: C)
    where
        C: Component + Send + Sync + 'static,
    {
        self.members.push(Arc::new(component));
    }

    /// Builder form of [`Network::add_component`].
    #[must_use]
    pub fn with<C>(mut self, component: C) -> Self
    where
        C: Component + Send + Sync + 'static,
    {
        self.add_component(component);
        self
    }

    /// Returns the aggregate impedance at angular frequency `omega`.
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> CScalar {
        match self.connection {
            ConnectionKind::Series => {
                let mut total = CScalar::default();
                for component in &self.members {
                    let z = component.impedance(omega);
                    if !z.is_finite() {
                        return open_circuit();
                    }
                    total += z;
                }
                total
            }
            ConnectionKind::Parallel => {
                let mut admittance = CScalar::default();
                for component in &self.members {
                    let z = component.impedance(omega);
                    if !z.is_finite() {
                        continue;
                    }
                    if z.re == 0.0 && z.im == 0.0 {
                        return Complex::new(0.0, 0.0);
                    }
                    admittance += z.inv();
                }

                if admittance.re == 0.0 && admittance.im == 0.0 {
                    open_circuit()
                } else {
                    admittance.inv()
                }
            }
        }
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.members.iter().map(|m| m.name()).collect();
        f.debug_struct("Network")
            .field("name", &self.name)
            .field("connection", &self.connection)
            .field("members", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::component::{Compliance, Mass, Resistance};

    #[test]
    fn series_branch_adds_impedances() {
        let network = Network::new("electrical", ConnectionKind::Series)
            .with(Resistance::new("Re", 3.5))
            .with(Mass::new("Le", 0.0042));
        let z = network.impedance(1000.0);
        assert_relative_eq!(z.re, 3.5);
        assert_relative_eq!(z.im, 4.2, epsilon = 1.0e-12);
    }

    #[test]
    fn parallel_branch_combines_admittance() {
        let network = Network::new("parallel", ConnectionKind::Parallel)
            .with(Resistance::new("R1", 100.0))
            .with(Resistance::new("R2", 100.0));
        assert_relative_eq!(network.impedance(1.0).re, 50.0);
    }

    #[test]
    fn parallel_mass_and_compliance_resonate_open() {
        // 1/(ω²·M·C) = 1 at ω = 10 for M = 0.1, C = 0.1.
        let network = Network::new("tank", ConnectionKind::Parallel)
            .with(Mass::new("M", 0.1))
            .with(Compliance::new("C", 0.1))
            .with(Resistance::new("R", 7.0));
        let z = network.impedance(10.0);
        assert_relative_eq!(z.re, 7.0, epsilon = 1.0e-9);
        assert_relative_eq!(z.im, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn open_member_drops_out_of_parallel_and_opens_series() {
        let parallel = Network::new("p", ConnectionKind::Parallel)
            .with(Resistance::new("R", 5.0))
            .with(Compliance::new("C", 0.0));
        assert_relative_eq!(parallel.impedance(1.0).re, 5.0);

        let series = Network::new("s", ConnectionKind::Series)
            .with(Resistance::new("R", 5.0))
            .with(Compliance::new("C", 0.0));
        assert!(!series.impedance(1.0).is_finite());
    }

    #[test]
    fn shorted_parallel_branch_is_zero() {
        let network = Network::new("p", ConnectionKind::Parallel)
            .with(Resistance::new("R", 5.0))
            .with(Resistance::new("short", 0.0));
        assert_eq!(network.impedance(1.0), Complex::new(0.0, 0.0));
    }
}
