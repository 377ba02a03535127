//! # Mechanical Predictor
//!
//! Condition-adjusted strength, stiffness and damage properties.
//!
//! ## Strength
//!
//! ```text
//! σ = σ₀ × f_T(T_h) × f_P × f_ε × f_env
//! ```
//!
//! | Factor | Form |
//! |--------|------|
//! | f_T    | regime switch on homologous temperature T_h (see [`temperature_factor`]) |
//! | f_P    | 1 + P[GPa] × k (k = 0.10 ceramics, 0.05 otherwise) |
//! | f_ε    | ε[%]^0.1 when strain is given, else 1 |
//! | f_env  | air 1.0, vacuum 1.05, seawater 0.9, acidic 0.85, basic 0.95 |
//!
//! ## Damage
//!
//! - Creep: Norton–Bailey `A·σⁿ·exp(−Q/RT)` above the onset homologous temperature
//! - Fatigue: Basquin life at a fixed stress amplitude, only for cyclic loading
//!   with a known frequency, knocked down for corrosive environments

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Domain;
use crate::conditions::{homologous_temperature, Environment, SimulationConditions};
use crate::errors::EngineResult;
use crate::materials::estimator::YIELD_RATIO;
use crate::materials::{BaseMaterial, MaterialCategory, Property};
use crate::settings::{SimulationSettings, GAS_CONSTANT, SECONDS_PER_YEAR};

/// Baseline elongation at fracture (25%)
pub const BASE_DUCTILITY: f64 = 0.25;

/// Strength at which the ductility strength-penalty bottoms out (MPa)
const DUCTILITY_STRENGTH_SCALE_MPA: f64 = 2000.0;

/// Reference absolute temperature for the ductility ratio (K)
const DUCTILITY_REFERENCE_K: f64 = 298.0;

/// Strain floor for the strain-rate factor (%); 0 would zero the strength
const MIN_STRAIN_PCT: f64 = 1.0e-3;

/// Toughness retained below the ductile-to-brittle transition
const BRITTLE_TOUGHNESS_RETENTION: f64 = 0.3;

/// Hardness to tensile-strength correlation (HV per MPa)
const HARDNESS_CORRELATION: f64 = 3.0;

/// Condition-adjusted mechanical properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalProperties {
    /// Ultimate tensile strength (MPa)
    pub tensile_strength_mpa: f64,
    /// Yield strength (MPa)
    pub yield_strength_mpa: f64,
    /// Young's modulus (GPa)
    pub elastic_modulus_gpa: f64,
    /// Vickers-equivalent hardness (HV)
    pub hardness_hv: f64,
    /// Elongation at fracture (fraction)
    pub ductility: f64,
    /// Energy absorbed to fracture (MJ/m³)
    pub toughness_mj_m3: f64,
    /// Steady-state creep strain rate (1/year)
    pub creep_rate_per_year: f64,
    /// Cycles to failure, for cyclic loading with a known frequency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue_life_cycles: Option<f64>,
}

impl MechanicalProperties {
    /// Named scalar outputs, for uncertainty bands
    pub fn scalar_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("tensile_strength_mpa", self.tensile_strength_mpa),
            ("yield_strength_mpa", self.yield_strength_mpa),
            ("elastic_modulus_gpa", self.elastic_modulus_gpa),
            ("hardness_hv", self.hardness_hv),
            ("ductility", self.ductility),
            ("toughness_mj_m3", self.toughness_mj_m3),
            ("creep_rate_per_year", self.creep_rate_per_year),
        ];
        if let Some(n) = self.fatigue_life_cycles {
            fields.push(("fatigue_life_cycles", n));
        }
        fields
    }
}

/// Strength multiplier as a function of homologous temperature.
///
/// ```text
/// T_h < 0.3          1 + 0.1(0.3 − T_h)                         mild cold strengthening
/// 0.3 ≤ T_h < 0.6    1 − 0.8Δ − 1.5Δ²,  Δ = T_h − 0.3           floor 0.3
/// T_h ≥ 0.6          0.625 − 1.2Δ − 10Δ³, Δ = T_h − 0.6         floor 0.1
/// ```
///
/// Continuous at both regime boundaries and non-increasing in `T_h`.
pub fn temperature_factor(th: f64) -> f64 {
    if th < 0.3 {
        1.0 + 0.1 * (0.3 - th.max(0.0))
    } else if th < 0.6 {
        let d = th - 0.3;
        (1.0 - 0.8 * d - 1.5 * d * d).max(0.3)
    } else {
        let d = th - 0.6;
        (0.625 - 1.2 * d - 10.0 * d.powi(3)).max(0.1)
    }
}

/// Modulus multiplier: linear decay above T_h = 0.2, floor 0.2.
pub fn modulus_temperature_factor(th: f64) -> f64 {
    (1.0 - 0.5 * (th - 0.2).max(0.0)).max(0.2)
}

/// Hydrostatic pressure strengthening coefficient (per GPa)
pub fn pressure_coefficient(category: MaterialCategory) -> f64 {
    match category {
        MaterialCategory::Ceramic => 0.10,
        _ => 0.05,
    }
}

/// Strength multiplier for the chemical environment
pub fn environment_strength_factor(environment: Environment) -> f64 {
    match environment {
        Environment::Air => 1.0,
        Environment::Vacuum => 1.05,
        Environment::Seawater => 0.9,
        Environment::Acidic => 0.85,
        Environment::Basic => 0.95,
    }
}

/// Ductility multiplier for environmental embrittlement
pub fn embrittlement_factor(environment: Environment) -> f64 {
    match environment {
        Environment::Air => 1.0,
        Environment::Vacuum => 1.1,
        Environment::Seawater => 0.7,
        Environment::Acidic => 0.6,
        Environment::Basic => 0.9,
    }
}

/// Fatigue life multiplier; aqueous corrosive media cause corrosion fatigue
pub fn fatigue_environment_factor(environment: Environment) -> f64 {
    match environment {
        Environment::Air => 1.0,
        Environment::Vacuum => 1.2,
        Environment::Seawater => 0.3,
        Environment::Acidic => 0.2,
        Environment::Basic => 0.7,
    }
}

/// Fatigue life multiplier for load frequency, 1 at 10 Hz
pub fn frequency_factor(frequency_hz: f64) -> f64 {
    (frequency_hz / 10.0).powf(0.05).clamp(0.5, 1.5)
}

fn strain_rate_factor(strain_pct: Option<f64>) -> f64 {
    strain_pct.map_or(1.0, |s| s.max(MIN_STRAIN_PCT).powf(0.1))
}

/// Norton–Bailey creep rate (1/year), zero below the onset temperature.
pub fn creep_rate_per_year(
    tensile_strength_mpa: f64,
    th: f64,
    absolute_temperature_k: f64,
    settings: &SimulationSettings,
) -> f64 {
    let creep = &settings.creep;
    if th < creep.onset_homologous {
        return 0.0;
    }
    let stress = creep.stress_ratio * tensile_strength_mpa;
    let arrhenius = (-creep.activation_energy_j_mol / (GAS_CONSTANT * absolute_temperature_k)).exp();
    creep.coefficient * stress.powf(creep.stress_exponent) * arrhenius * SECONDS_PER_YEAR
}

/// Basquin cycles to failure at the configured stress amplitude.
///
/// `σ_a = σ_f'·N^b` ⇒ `N = (σ_a / σ_f')^(1/b)`; with σ_f' = 1.5σ_ts,
/// σ_a = 0.5σ_ts and b = −0.1 this is 3¹⁰ ≈ 59 000 cycles before the
/// temperature, environment and frequency knock-downs.
pub fn basquin_cycles(settings: &SimulationSettings) -> f64 {
    let fatigue = &settings.fatigue;
    let ratio = fatigue.amplitude_ratio / fatigue.strength_coefficient_ratio;
    ratio.powf(1.0 / fatigue.basquin_exponent)
}

/// Predict mechanical properties under the given conditions.
pub fn predict(
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
) -> EngineResult<MechanicalProperties> {
    let base_ts = material.require(Domain::Mechanical, Property::TensileStrength)?;
    let base_e = material.require(Domain::Mechanical, Property::ElasticModulus)?;
    let melting_point = material.require(Domain::Mechanical, Property::MeltingPoint)?;
    let base_ys = material
        .optional(Property::YieldStrength)
        .unwrap_or(YIELD_RATIO * base_ts);

    let environment = conditions.environment();
    let th = homologous_temperature(conditions.temperature_c, melting_point);
    let t_abs = conditions.absolute_temperature().0;
    let p_gpa = conditions.pressure_gpa().0;

    let f_t = temperature_factor(th);
    let f_p = 1.0 + p_gpa * pressure_coefficient(material.category);
    let f_strain = strain_rate_factor(conditions.strain_pct);
    let f_env = environment_strength_factor(environment);
    trace!(th, f_t, f_p, f_strain, f_env, "mechanical factors");

    let combined = f_t * f_p * f_strain * f_env;
    let tensile = base_ts * combined;
    let yield_strength = base_ys * combined;

    let modulus = base_e * modulus_temperature_factor(th) * (1.0 + 0.02 * p_gpa);

    let hardness = HARDNESS_CORRELATION * tensile * f_t * f_p;

    let strength_penalty = (1.0 - tensile / DUCTILITY_STRENGTH_SCALE_MPA).max(0.05);
    let thermal_ratio = (t_abs / DUCTILITY_REFERENCE_K).min(2.0);
    let pressure_penalty = (1.0 - 0.1 * p_gpa).max(0.3);
    let ductility =
        BASE_DUCTILITY * strength_penalty * thermal_ratio * pressure_penalty * embrittlement_factor(environment);

    let mut toughness = tensile * ductility * 0.5;
    if conditions.temperature_c < settings.dbtt_c {
        toughness *= BRITTLE_TOUGHNESS_RETENTION;
    }

    let creep = creep_rate_per_year(tensile, th, t_abs, settings);

    let fatigue_life_cycles = conditions.cyclic_frequency().map(|frequency| {
        basquin_cycles(settings)
            * f_t
            * fatigue_environment_factor(environment)
            * frequency_factor(frequency)
    });

    Ok(MechanicalProperties {
        tensile_strength_mpa: tensile,
        yield_strength_mpa: yield_strength,
        elastic_modulus_gpa: modulus,
        hardness_hv: hardness,
        ductility,
        toughness_mj_m3: toughness,
        creep_rate_per_year: creep,
        fatigue_life_cycles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::LoadingType;
    use crate::materials::BaseProperties;

    fn test_metal() -> BaseMaterial {
        BaseMaterial::new("test_metal", "Test Metal", MaterialCategory::Metal).with_properties(BaseProperties {
            tensile_strength_mpa: Some(500.0),
            yield_strength_mpa: Some(400.0),
            elastic_modulus_gpa: Some(200.0),
            melting_point_c: Some(1500.0),
            ..Default::default()
        })
    }

    fn run(cond: &SimulationConditions) -> MechanicalProperties {
        predict(&test_metal(), cond, &SimulationSettings::default()).unwrap()
    }

    #[test]
    fn test_standard_conditions_near_baseline() {
        let props = run(&SimulationConditions::default());
        assert!((props.tensile_strength_mpa - 500.0).abs() / 500.0 < 0.02);
        assert!((props.elastic_modulus_gpa - 200.0).abs() / 200.0 < 0.02);
        assert_eq!(props.creep_rate_per_year, 0.0);
        assert!(props.fatigue_life_cycles.is_none());
    }

    #[test]
    fn test_temperature_factor_continuous_and_monotonic() {
        assert!((temperature_factor(0.3) - 1.0).abs() < 1e-12);
        let below = temperature_factor(0.6 - 1e-9);
        assert!((below - temperature_factor(0.6)).abs() < 1e-6);
        let mut prev = temperature_factor(0.0);
        for i in 1..=120 {
            let f = temperature_factor(i as f64 * 0.01);
            assert!(f <= prev + 1e-12);
            assert!(f >= 0.1);
            prev = f;
        }
    }

    #[test]
    fn test_strength_non_increasing_above_0_6_th() {
        // 0.6 T_h for a 1500 °C melt is ~791 °C
        let temps = [800.0, 900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1450.0];
        let strengths: Vec<f64> = temps
            .iter()
            .map(|t| run(&SimulationConditions::at_temperature(*t)).tensile_strength_mpa)
            .collect();
        for pair in strengths.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(strengths[0] < 500.0 * 0.7);
    }

    #[test]
    fn test_pressure_strengthens_ceramics_more() {
        let mut ceramic = test_metal();
        ceramic.category = MaterialCategory::Ceramic;
        let cond = SimulationConditions::default().with_pressure(1000.0);
        let settings = SimulationSettings::default();

        let metal = predict(&test_metal(), &cond, &settings).unwrap();
        let cer = predict(&ceramic, &cond, &settings).unwrap();
        let ambient = run(&SimulationConditions::default());

        assert!(metal.tensile_strength_mpa > ambient.tensile_strength_mpa);
        assert!(cer.tensile_strength_mpa > metal.tensile_strength_mpa);
        assert!(metal.elastic_modulus_gpa > ambient.elastic_modulus_gpa);
    }

    #[test]
    fn test_environment_ordering() {
        let strength = |env| {
            run(&SimulationConditions::default().with_environment(env)).tensile_strength_mpa
        };
        assert!(strength(Environment::Vacuum) > strength(Environment::Air));
        assert!(strength(Environment::Acidic) < strength(Environment::Seawater));
        assert!(strength(Environment::Seawater) < strength(Environment::Basic));
    }

    #[test]
    fn test_strain_rate_factor() {
        assert_eq!(strain_rate_factor(None), 1.0);
        assert!((strain_rate_factor(Some(1.0)) - 1.0).abs() < 1e-12);
        assert!(strain_rate_factor(Some(0.0)) > 0.0);
        assert!(strain_rate_factor(Some(10.0)) > 1.0);
    }

    #[test]
    fn test_ductility_and_toughness() {
        let props = run(&SimulationConditions::default());
        // 0.25 × (1 − σ/2000) at roughly baseline strength
        assert!(props.ductility > 0.15 && props.ductility < 0.2);
        assert!((props.toughness_mj_m3 - props.tensile_strength_mpa * props.ductility * 0.5).abs() < 1e-9);

        let seawater = run(&SimulationConditions::default().with_environment(Environment::Seawater));
        assert!(seawater.ductility < props.ductility);
    }

    #[test]
    fn test_toughness_drops_below_dbtt() {
        let warm = run(&SimulationConditions::at_temperature(-40.0));
        let cold = run(&SimulationConditions::at_temperature(-60.0));
        let ratio = cold.toughness_mj_m3 / (cold.tensile_strength_mpa * cold.ductility * 0.5);
        assert!((ratio - 0.3).abs() < 1e-9);
        assert!(cold.toughness_mj_m3 < warm.toughness_mj_m3);
    }

    #[test]
    fn test_creep_onset() {
        // T_h = 0.4 at ~436 °C for a 1500 °C melt
        let below = run(&SimulationConditions::at_temperature(400.0));
        let above = run(&SimulationConditions::at_temperature(900.0));
        assert_eq!(below.creep_rate_per_year, 0.0);
        assert!(above.creep_rate_per_year > 0.0);
        let hotter = run(&SimulationConditions::at_temperature(1000.0));
        assert!(hotter.creep_rate_per_year > 0.0);
    }

    #[test]
    fn test_basquin_default_life() {
        let n = basquin_cycles(&SimulationSettings::default());
        assert!((n - 3f64.powi(10)).abs() / n < 1e-9);
    }

    #[test]
    fn test_fatigue_requires_cyclic_with_frequency() {
        let cyclic = SimulationConditions::default()
            .with_loading(LoadingType::Cyclic)
            .with_frequency(10.0);
        let air = run(&cyclic).fatigue_life_cycles.unwrap();
        let sea = run(&cyclic.clone().with_environment(Environment::Seawater))
            .fatigue_life_cycles
            .unwrap();
        assert!(sea < air * 0.5);

        let no_freq = SimulationConditions::default().with_loading(LoadingType::Cyclic);
        assert!(run(&no_freq).fatigue_life_cycles.is_none());
    }

    #[test]
    fn test_missing_melting_point_is_incomplete() {
        let mut mat = test_metal();
        mat.properties.melting_point_c = None;
        let err = predict(&mat, &SimulationConditions::default(), &SimulationSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_MATERIAL");
    }

    #[test]
    fn test_yield_falls_back_to_ratio() {
        let mut mat = test_metal();
        mat.properties.yield_strength_mpa = None;
        let props = predict(&mat, &SimulationConditions::default(), &SimulationSettings::default()).unwrap();
        assert!((props.yield_strength_mpa - 0.8 * props.tensile_strength_mpa).abs() < 1e-9);
    }

    #[test]
    fn test_scalar_fields_include_fatigue_only_when_present() {
        let props = run(&SimulationConditions::default());
        assert_eq!(props.scalar_fields().len(), 7);
        let cyclic = run(
            &SimulationConditions::default()
                .with_loading(LoadingType::Cyclic)
                .with_frequency(1.0),
        );
        assert_eq!(cyclic.scalar_fields().len(), 8);
    }
}
