#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Air defaults, empirical tuning coefficients and frequency helpers.
pub mod constants;
/// Unit conversion table for every accepted physical quantity.
pub mod units;
/// Scalar aliases and numeric helpers.
pub mod math;
/// Driver and enclosure parameter records.
pub mod params;
/// Port tuning frequency estimation.
pub mod tuning;
/// Equivalent-circuit elements and solvers.
pub mod circuits;
/// Frequency sweep builders and curve post-processing.
pub mod sweep;
/// Bundled reference driver and enclosure.
pub mod reference;
/// TOML parameter files (feature = "config").
#[cfg(feature = "config")]
pub mod config;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
