//! Air properties and empirical coefficients used by the enclosure model.
//!
//! ## Defaults
//!
//! The air defaults describe dry air at roughly room temperature and match the
//! values the reference driver dataset was measured against. Callers that model
//! other conditions override them per enclosure.
//!
//! ## Tuning coefficients
//!
//! Both port-tuning approximations were published in mixed, non-SI units
//! (inches/cubic inches for one, centimetres/litres for the other). The
//! coefficients below are those formulas rewritten for SI inputs:
//!
//! - Formula A: `0.159 · sqrt(A·K / (V·(L + k·√a)))` with `K = 1.84×10⁸` for
//!   in², in³ and in. Substituting `A = A_si/0.0254²`, `V = V_si/0.0254³`,
//!   `L = L_si/0.0254` leaves a single factor of `0.0254²` on `K`, giving
//!   `K_si = 118 709.44`. As a sanity check `0.159·√K_si ≈ 54.78`, close to the
//!   Helmholtz prefactor `c/2π ≈ 54.70`.
//! - Formula B: `153.501 · d · √n / (√V · √(L + k·d))` with d, L in cm and V in
//!   litres. Substituting SI values scales the coefficient by
//!   `100 / (√1000 · √100)`.

use std::f64::consts::PI;

/// Default air density ρ₀ in kilograms per cubic metre (kg/m³).
pub const AIR_DENSITY: f64 = 1.18;
/// Default speed of sound _c_ in metres per second (m/s).
pub const SPEED_OF_SOUND: f64 = 343.68;
/// Default enclosure leakage quality factor Ql (dimensionless).
pub const LEAKAGE_Q: f64 = 10.0;

/// Leading factor of the area/volume tuning approximation (≈ 1/2π).
pub const FORMULA_A_PREFACTOR: f64 = 0.159;
/// Empirical constant of the area/volume approximation in its native in²/in³/in units.
pub const FORMULA_A_IMPERIAL_K: f64 = 1.84e8;
/// Metres per inch (exact by definition).
pub const METERS_PER_INCH: f64 = 0.0254;
/// `FORMULA_A_IMPERIAL_K` rescaled for m², m³ and m inputs.
pub const FORMULA_A_SI_K: f64 = FORMULA_A_IMPERIAL_K * METERS_PER_INCH * METERS_PER_INCH;

/// Coefficient of the diameter/volume approximation in its native cm/L units.
pub const FORMULA_B_METRIC_COEFF: f64 = 153.501;
/// `FORMULA_B_METRIC_COEFF` rescaled for m and m³ inputs: `153.501 · 100 / (√1000 · 10)`.
pub const FORMULA_B_SI_COEFF: f64 = 48.541_278_311_350_645;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Acoustic compliance `V / (ρ₀·c²)` of a sealed air volume in m⁵/N.
#[inline]
#[must_use]
pub fn air_compliance(volume_m3: f64, air_density: f64, speed_of_sound: f64) -> f64 {
    volume_m3 / (air_density * speed_of_sound * speed_of_sound)
}
