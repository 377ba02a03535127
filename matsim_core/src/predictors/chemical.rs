//! # Chemical Predictor
//!
//! Corrosion uses a simplified Butler–Volmer style scaling: a 0.1 mm/yr
//! baseline that grows exponentially with temperature (e-folding every 30 °C)
//! and is multiplied by an environment severity factor. Oxidation resistance
//! and the stability index are dimensionless scores in [0, 1].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::conditions::{Environment, SimulationConditions, STANDARD_TEMPERATURE_C};
use crate::errors::EngineResult;
use crate::materials::{BaseMaterial, MaterialCategory};
use crate::settings::SimulationSettings;

/// Corrosion rate at 25 °C in air (mm/yr)
pub const BASE_CORROSION_RATE_MM_YR: f64 = 0.1;

/// Exponent cap for the corrosion temperature term
const MAX_CORROSION_EXPONENT: f64 = 50.0;

/// Oxidation resistance at 25 °C
pub const BASE_OXIDATION_RESISTANCE: f64 = 0.8;

/// Chemical stability index at benign conditions
pub const BASE_STABILITY: f64 = 0.8;

/// Condition-adjusted chemical properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalProperties {
    /// Uniform corrosion rate (mm/yr)
    pub corrosion_rate_mm_yr: f64,
    /// Oxidation resistance score in [0, 1]
    pub oxidation_resistance: f64,
    /// Chemical stability index in [0, 1]
    pub chemical_stability: f64,
    /// Lowest pH the material tolerates
    pub ph_min: f64,
    /// Highest pH the material tolerates
    pub ph_max: f64,
}

impl ChemicalProperties {
    /// Named scalar outputs, for uncertainty bands.
    ///
    /// The pH window is a fixed category range, not an estimate, so it has no band.
    pub fn scalar_fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("corrosion_rate_mm_yr", self.corrosion_rate_mm_yr),
            ("oxidation_resistance", self.oxidation_resistance),
            ("chemical_stability", self.chemical_stability),
        ]
    }

    /// Whether a pH lies inside the stability window
    pub fn tolerates_ph(&self, ph: f64) -> bool {
        (self.ph_min..=self.ph_max).contains(&ph)
    }
}

/// Corrosion severity relative to air
pub fn corrosion_multiplier(environment: Environment) -> f64 {
    match environment {
        Environment::Air => 1.0,
        Environment::Vacuum => 0.1,
        Environment::Seawater => 3.0,
        Environment::Acidic => 5.0,
        Environment::Basic => 2.0,
    }
}

/// pH range over which the category is chemically stable
pub fn ph_window(category: MaterialCategory) -> (f64, f64) {
    match category {
        MaterialCategory::Ceramic => (2.0, 12.0),
        MaterialCategory::Polymer => (5.0, 9.0),
        _ => (4.0, 10.0),
    }
}

/// Predict chemical properties under the given conditions.
///
/// Needs only the category, so it never fails for a resolved material.
pub fn predict(
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    _settings: &SimulationSettings,
) -> EngineResult<ChemicalProperties> {
    let environment = conditions.environment();
    let t = conditions.temperature_c;

    let exponent = ((t - STANDARD_TEMPERATURE_C) / 30.0).min(MAX_CORROSION_EXPONENT);
    let corrosion = BASE_CORROSION_RATE_MM_YR * exponent.exp() * corrosion_multiplier(environment);

    let oxidation = BASE_OXIDATION_RESISTANCE * (-conditions.excess_temperature() / 200.0).exp();

    let mut stability = BASE_STABILITY;
    match environment {
        Environment::Acidic => stability *= 0.7,
        Environment::Basic => stability *= 0.8,
        _ => {}
    }
    if t > 200.0 {
        stability *= 0.9;
    }

    let (ph_min, ph_max) = ph_window(material.category);
    trace!(corrosion, oxidation, stability, "chemical factors");

    Ok(ChemicalProperties {
        corrosion_rate_mm_yr: corrosion,
        oxidation_resistance: oxidation.clamp(0.0, 1.0),
        chemical_stability: stability.clamp(0.0, 1.0),
        ph_min,
        ph_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(category: MaterialCategory, cond: &SimulationConditions) -> ChemicalProperties {
        let mat = BaseMaterial::new("c", "C", category);
        predict(&mat, cond, &SimulationSettings::default()).unwrap()
    }

    #[test]
    fn test_baseline_in_air() {
        let props = run(MaterialCategory::Metal, &SimulationConditions::default());
        assert!((props.corrosion_rate_mm_yr - 0.1).abs() < 1e-12);
        assert!((props.oxidation_resistance - 0.8).abs() < 1e-12);
        assert!((props.chemical_stability - 0.8).abs() < 1e-12);
        assert_eq!((props.ph_min, props.ph_max), (4.0, 10.0));
    }

    #[test]
    fn test_seawater_triples_corrosion() {
        let air = run(MaterialCategory::Metal, &SimulationConditions::default());
        let sea = run(
            MaterialCategory::Metal,
            &SimulationConditions::default().with_environment(Environment::Seawater),
        );
        assert!(sea.corrosion_rate_mm_yr >= 3.0 * air.corrosion_rate_mm_yr - 1e-12);
    }

    #[test]
    fn test_corrosion_grows_with_temperature() {
        let warm = run(MaterialCategory::Metal, &SimulationConditions::at_temperature(55.0));
        assert!((warm.corrosion_rate_mm_yr - 0.1 * std::f64::consts::E).abs() < 1e-9);
        let extreme = run(MaterialCategory::Metal, &SimulationConditions::at_temperature(1.0e6));
        assert!(extreme.corrosion_rate_mm_yr.is_finite());
    }

    #[test]
    fn test_stability_penalties_stack() {
        let cond = SimulationConditions::at_temperature(250.0).with_environment(Environment::Acidic);
        let props = run(MaterialCategory::Metal, &cond);
        assert!((props.chemical_stability - 0.8 * 0.7 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_oxidation_not_boosted_by_cold() {
        let props = run(MaterialCategory::Metal, &SimulationConditions::at_temperature(-100.0));
        assert!((props.oxidation_resistance - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_ph_windows_by_category() {
        let ceramic = run(MaterialCategory::Ceramic, &SimulationConditions::default());
        let polymer = run(MaterialCategory::Polymer, &SimulationConditions::default());
        assert!(ceramic.ph_max - ceramic.ph_min > polymer.ph_max - polymer.ph_min);
        assert!(ceramic.tolerates_ph(2.0));
        assert!(!polymer.tolerates_ph(2.0));
    }
}
