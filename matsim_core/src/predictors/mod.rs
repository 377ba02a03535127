//! # Property Predictors
//!
//! One pure function per physical domain. Each takes a resolved
//! [`BaseMaterial`](crate::materials::BaseMaterial), the operating
//! [`SimulationConditions`](crate::conditions::SimulationConditions) and the
//! engine [`SimulationSettings`](crate::settings::SimulationSettings), and
//! returns that domain's property record or an `IncompleteMaterial` error.
//!
//! Predictors never call each other; anything two of them share lives in this
//! module as a plain helper.
//!
//! - [`mechanical`] - strength, stiffness, hardness, ductility, toughness, creep, fatigue
//! - [`thermal`] - conductivity, expansion, specific heat, diffusivity, shock, thermal stress
//! - [`electrical`] - resistivity/conductivity plus dielectric or band-gap profile
//! - [`chemical`] - corrosion, oxidation, chemical stability, pH window

pub mod chemical;
pub mod electrical;
pub mod mechanical;
pub mod thermal;

pub use chemical::ChemicalProperties;
pub use electrical::{ElectricalProfile, InsulatorProfile, MetalProfile, SemiconductorProfile};
pub use mechanical::MechanicalProperties;
pub use thermal::ThermalProperties;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conditions::STANDARD_TEMPERATURE_C;
use crate::materials::MaterialCategory;

/// Physical domain a predictor covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Mechanical,
    Thermal,
    Electrical,
    Chemical,
}

impl Domain {
    /// All domains, in dispatch order
    pub const ALL: [Domain; 4] = [
        Domain::Mechanical,
        Domain::Thermal,
        Domain::Electrical,
        Domain::Chemical,
    ];

    /// Lowercase key used in error messages and band names
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Mechanical => "mechanical",
            Domain::Thermal => "thermal",
            Domain::Electrical => "electrical",
            Domain::Chemical => "chemical",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Lowest multiplier applied to a baseline resistivity
pub const MIN_RESISTIVITY_FACTOR: f64 = 1.0e-3;

/// Lowest resistivity any predictor divides by (Ω·m)
pub const MIN_RESISTIVITY_OHM_M: f64 = 1.0e-12;

/// Linear temperature coefficient of resistivity (1/°C):
/// positive for metals, negative for everything else.
pub fn resistivity_temperature_coefficient(category: MaterialCategory) -> f64 {
    match category {
        MaterialCategory::Metal => 0.004,
        _ => -0.01,
    }
}

/// Resistivity multiplier `1 + α(T − 25)`, clamped to at least
/// [`MIN_RESISTIVITY_FACTOR`] so deep cryogenic metals or hot insulators
/// never reach zero or negative resistivity.
pub fn resistivity_temperature_factor(category: MaterialCategory, temperature_c: f64) -> f64 {
    let alpha = resistivity_temperature_coefficient(category);
    let factor = 1.0 + alpha * (temperature_c - STANDARD_TEMPERATURE_C);
    if factor < MIN_RESISTIVITY_FACTOR {
        debug!(factor, temperature_c, "resistivity factor clamped to floor");
        return MIN_RESISTIVITY_FACTOR;
    }
    factor
}

/// Baseline resistivity carried to the operating temperature, never below
/// [`MIN_RESISTIVITY_OHM_M`]. A zero baseline would
/// otherwise make conductivity infinite.
pub fn resistivity_at(category: MaterialCategory, rho0_ohm_m: f64, temperature_c: f64) -> f64 {
    let rho = rho0_ohm_m * resistivity_temperature_factor(category, temperature_c);
    if !(rho >= MIN_RESISTIVITY_OHM_M) {
        debug!(rho, "resistivity clamped to floor");
        return MIN_RESISTIVITY_OHM_M;
    }
    rho
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_keys() {
        let keys: Vec<&str> = Domain::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["mechanical", "thermal", "electrical", "chemical"]);
        assert_eq!(serde_json::to_string(&Domain::Thermal).unwrap(), "\"thermal\"");
    }

    #[test]
    fn test_resistivity_factor_unity_at_standard() {
        for cat in MaterialCategory::ALL {
            assert!((resistivity_temperature_factor(cat, 25.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_resistivity_factor_clamped() {
        assert_eq!(
            resistivity_temperature_factor(MaterialCategory::Ceramic, 500.0),
            MIN_RESISTIVITY_FACTOR
        );
        assert_eq!(
            resistivity_temperature_factor(MaterialCategory::Metal, -273.0),
            MIN_RESISTIVITY_FACTOR
        );
        assert!(resistivity_temperature_factor(MaterialCategory::Metal, 125.0) > 1.39);
    }

    #[test]
    fn test_resistivity_at_floors_zero_baseline() {
        assert_eq!(resistivity_at(MaterialCategory::Metal, 0.0, 25.0), MIN_RESISTIVITY_OHM_M);
        assert_eq!(resistivity_at(MaterialCategory::Metal, -1.0e-8, 25.0), MIN_RESISTIVITY_OHM_M);
        let copper = resistivity_at(MaterialCategory::Metal, 1.7e-8, 25.0);
        assert!((copper - 1.7e-8).abs() < 1e-20);
    }
}
