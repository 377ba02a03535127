//! # Thermal Predictor
//!
//! ## Conductivity regimes
//!
//! | Category | Model | Pressure uplift |
//! |----------|-------|-----------------|
//! | Metal    | Wiedemann–Franz, κ = L·T/ρₑ(T) | +5 %/GPa |
//! | Ceramic  | phonon 1/T scaling, clamped to [0.3, 2.0] | +10 %/GPa |
//! | Other    | mild linear decay above 25 °C | +2 %/GPa |
//!
//! Specific heat follows an Einstein-function ratio relative to 25 °C using
//! the category's characteristic temperature, so it rises toward the
//! Dulong–Petit limit when hot and falls when cold.
//!
//! Conductivity, specific heat and density are clamped to small positive
//! floors before any division.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{resistivity_at, Domain};
use crate::conditions::{SimulationConditions, STANDARD_TEMPERATURE_C};
use crate::errors::EngineResult;
use crate::materials::{BaseMaterial, MaterialCategory, Property};
use crate::settings::SimulationSettings;
use crate::units::{Celsius, Kelvin};

/// Conductivity floor (W/m·K)
pub const MIN_CONDUCTIVITY: f64 = 1.0e-3;

/// Specific heat floor (J/kg·K)
pub const MIN_SPECIFIC_HEAT: f64 = 1.0;

/// Density floor (kg/m³)
pub const MIN_DENSITY: f64 = 1.0;

/// Bulk modulus floor (GPa)
const MIN_BULK_MODULUS_GPA: f64 = 1.0e-3;

/// Condition-adjusted thermal properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalProperties {
    /// Thermal conductivity (W/m·K)
    pub thermal_conductivity_w_mk: f64,
    /// Linear expansion coefficient (1/K)
    pub thermal_expansion_per_k: f64,
    /// Specific heat capacity (J/kg·K)
    pub specific_heat_j_kgk: f64,
    /// Thermal diffusivity (m²/s)
    pub thermal_diffusivity_m2_s: f64,
    /// First thermal shock parameter R' (W/m)
    pub thermal_shock_resistance_w_m: f64,
    /// Fully constrained thermal stress relative to 25 °C (MPa)
    pub thermal_stress_mpa: f64,
}

impl ThermalProperties {
    /// Named scalar outputs, for uncertainty bands
    pub fn scalar_fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("thermal_conductivity_w_mk", self.thermal_conductivity_w_mk),
            ("thermal_expansion_per_k", self.thermal_expansion_per_k),
            ("specific_heat_j_kgk", self.specific_heat_j_kgk),
            ("thermal_diffusivity_m2_s", self.thermal_diffusivity_m2_s),
            ("thermal_shock_resistance_w_m", self.thermal_shock_resistance_w_m),
            ("thermal_stress_mpa", self.thermal_stress_mpa),
        ]
    }
}

/// Einstein heat-capacity function `x²eˣ/(eˣ − 1)²`, normalized to 1 as x → 0.
pub fn einstein_function(x: f64) -> f64 {
    if x < 1.0e-6 {
        return 1.0;
    }
    if x > 50.0 {
        // eˣ/(eˣ−1)² ≈ e⁻ˣ once eˣ ≫ 1
        return x * x * (-x).exp();
    }
    let ex = x.exp();
    x * x * ex / ((ex - 1.0) * (ex - 1.0))
}

/// Bulk modulus from Young's modulus and Poisson's ratio (GPa)
pub fn bulk_modulus_gpa(elastic_modulus_gpa: f64, poisson_ratio: f64) -> f64 {
    (elastic_modulus_gpa / (3.0 * (1.0 - 2.0 * poisson_ratio))).max(MIN_BULK_MODULUS_GPA)
}

fn conductivity(
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
    t_abs: f64,
    p_gpa: f64,
) -> EngineResult<f64> {
    let t_ref = Kelvin::from(Celsius(STANDARD_TEMPERATURE_C)).0;
    let kappa = match material.category {
        MaterialCategory::Metal => {
            let rho0 = material.require(Domain::Thermal, Property::ElectricalResistivity)?;
            let rho = resistivity_at(material.category, rho0, conditions.temperature_c);
            settings.lorenz_number * t_abs / rho * (1.0 + 0.05 * p_gpa)
        }
        MaterialCategory::Ceramic => {
            let k0 = material.require(Domain::Thermal, Property::ThermalConductivity)?;
            k0 * (t_ref / t_abs).clamp(0.3, 2.0) * (1.0 + 0.10 * p_gpa)
        }
        _ => {
            let k0 = material.require(Domain::Thermal, Property::ThermalConductivity)?;
            let decay = (1.0 - 0.0005 * (conditions.temperature_c - STANDARD_TEMPERATURE_C)).max(0.5);
            k0 * decay * (1.0 + 0.02 * p_gpa)
        }
    };
    if !(kappa >= MIN_CONDUCTIVITY) {
        debug!(kappa, "conductivity clamped to floor");
        return Ok(MIN_CONDUCTIVITY);
    }
    Ok(kappa)
}

/// Predict thermal properties under the given conditions.
pub fn predict(
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
) -> EngineResult<ThermalProperties> {
    let alpha0 = material.require(Domain::Thermal, Property::ThermalExpansion)?;
    let cp0 = material.require(Domain::Thermal, Property::SpecificHeat)?;
    let density = material.require(Domain::Thermal, Property::Density)?;
    let modulus = material.require(Domain::Thermal, Property::ElasticModulus)?;
    let strength = material.require(Domain::Thermal, Property::TensileStrength)?;

    let t_c = conditions.temperature_c;
    let t_abs = conditions.absolute_temperature().0;
    let t_ref = Kelvin::from(Celsius(STANDARD_TEMPERATURE_C)).0;
    let p_gpa = conditions.pressure_gpa().0;
    let nu = material.category.poisson_ratio();
    let bulk = bulk_modulus_gpa(modulus, nu);

    let kappa = conductivity(material, conditions, settings, t_abs, p_gpa)?;

    let expansion = alpha0
        * (1.0 + 0.0002 * (t_c - STANDARD_TEMPERATURE_C)).max(0.5)
        * (1.0 - 2.0 * p_gpa / bulk).max(0.5);

    let theta = material.category.debye_temperature_k();
    let debye_ratio = einstein_function(theta / t_abs) / einstein_function(theta / t_ref);
    let mut cp = cp0 * debye_ratio * (1.0 - 0.01 * p_gpa);
    if material.category == MaterialCategory::Metal {
        cp += cp0 * 1.0e-4 * (t_abs - t_ref);
    }
    if !(cp >= MIN_SPECIFIC_HEAT) {
        debug!(cp, "specific heat clamped to floor");
        cp = MIN_SPECIFIC_HEAT;
    }

    let rho = (density * (1.0 + p_gpa / bulk)).max(MIN_DENSITY);
    let diffusivity = kappa / (rho * cp);

    // MPa / (GPa·1000) keeps the strength-to-modulus ratio dimensionless
    let shock = strength * kappa * (1.0 - nu) / (modulus * 1000.0 * expansion.max(f64::MIN_POSITIVE))
        * (1.0 - 0.1 * p_gpa).max(0.5);

    let stress = modulus * 1000.0 * expansion * (t_c - STANDARD_TEMPERATURE_C).abs();

    trace!(kappa, cp, debye_ratio, bulk, "thermal factors");

    Ok(ThermalProperties {
        thermal_conductivity_w_mk: kappa,
        thermal_expansion_per_k: expansion,
        specific_heat_j_kgk: cp,
        thermal_diffusivity_m2_s: diffusivity,
        thermal_shock_resistance_w_m: shock,
        thermal_stress_mpa: stress,
    })
}
