//! Confidence and uncertainty model.
//!
//! Every domain starts from its calibrated baseline and is multiplied by one
//! penalty per unfavourable condition:
//!
//! | Condition | Multiplier |
//! |-----------|------------|
//! | homologous temperature > 0.6 | 0.7 |
//! | homologous temperature > 0.8 | additional 0.5 |
//! | temperature > 1000 °C or < −100 °C | 0.7 |
//! | pressure > 100 MPa | 0.9 |
//! | pressure > 500 MPa | additional 0.8 |
//! | environment other than air | 0.9 |
//! | cyclic or impact loading | 0.85 |
//! | estimated material | 0.8 |
//!
//! The result is clamped to `[floor, 1]`. Relative tolerance grows by the
//! inverse of the same product, capped at 100 %.

use super::request::SimulationType;
use crate::conditions::{homologous_temperature, Environment, SimulationConditions};
use crate::materials::{BaseMaterial, Property};
use crate::predictors::Domain;
use crate::settings::SimulationSettings;

/// Temperatures above this are treated as extreme (°C)
pub const EXTREME_HOT_C: f64 = 1000.0;

/// Temperatures below this are treated as extreme (°C)
pub const EXTREME_COLD_C: f64 = -100.0;

/// Largest relative tolerance reported
pub const MAX_RELATIVE_TOLERANCE: f64 = 1.0;

/// Confidence and band width for one domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainAssessment {
    pub domain: Domain,
    pub confidence: f64,
    pub relative_tolerance: f64,
}

/// Product of all condition penalties, in (0, 1].
pub fn condition_penalty(material: &BaseMaterial, conditions: &SimulationConditions) -> f64 {
    let mut penalty = 1.0;

    if let Some(melt) = material.optional(Property::MeltingPoint) {
        let th = homologous_temperature(conditions.temperature_c, melt);
        if th > 0.6 {
            penalty *= 0.7;
        }
        if th > 0.8 {
            penalty *= 0.5;
        }
    }

    if conditions.temperature_c > EXTREME_HOT_C || conditions.temperature_c < EXTREME_COLD_C {
        penalty *= 0.7;
    }

    if conditions.pressure_mpa > 100.0 {
        penalty *= 0.9;
    }
    if conditions.pressure_mpa > 500.0 {
        penalty *= 0.8;
    }

    if conditions.environment() != Environment::Air {
        penalty *= 0.9;
    }

    if conditions.loading.is_some_and(|l| l.is_dynamic()) {
        penalty *= 0.85;
    }

    if material.is_estimated() {
        penalty *= 0.8;
    }

    penalty
}

/// Confidence and tolerance for one domain.
pub fn assess(
    domain: Domain,
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
) -> DomainAssessment {
    let calibration = settings.confidence.for_domain(domain);
    let penalty = condition_penalty(material, conditions);
    let confidence = (calibration.baseline * penalty).clamp(calibration.floor, 1.0);
    let relative_tolerance = (calibration.base_tolerance / penalty).min(MAX_RELATIVE_TOLERANCE);
    DomainAssessment {
        domain,
        confidence,
        relative_tolerance,
    }
}

/// Aggregate confidence: the single domain directly, or the equal-weight mean
/// for a comprehensive request.
pub fn aggregate(simulation_type: SimulationType, assessments: &[DomainAssessment]) -> f64 {
    if assessments.is_empty() {
        return 0.0;
    }
    match simulation_type {
        SimulationType::Comprehensive => {
            assessments.iter().map(|a| a.confidence).sum::<f64>() / assessments.len() as f64
        }
        _ => assessments[0].confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::LoadingType;
    use crate::materials::{BaseProperties, MaterialCategory, MaterialOrigin};

    fn metal() -> BaseMaterial {
        BaseMaterial::new("m", "M", MaterialCategory::Metal).with_properties(BaseProperties {
            melting_point_c: Some(1500.0),
            ..Default::default()
        })
    }

    fn settings() -> SimulationSettings {
        SimulationSettings::default()
    }

    #[test]
    fn test_standard_conditions_use_baseline() {
        let a = assess(Domain::Mechanical, &metal(), &SimulationConditions::default(), &settings());
        assert_eq!(a.confidence, 0.8);
        assert_eq!(a.relative_tolerance, 0.15);
    }

    #[test]
    fn test_near_melting_hits_floor() {
        let cond = SimulationConditions::at_temperature(1400.0);
        let a = assess(Domain::Mechanical, &metal(), &cond, &settings());
        assert_eq!(a.confidence, 0.2);
        assert!(a.relative_tolerance > 0.15);
    }

    #[test]
    fn test_penalties_multiply() {
        let cond = SimulationConditions::default()
            .with_pressure(600.0)
            .with_environment(Environment::Seawater)
            .with_loading(LoadingType::Cyclic);
        let p = condition_penalty(&metal(), &cond);
        assert!((p - 0.9 * 0.8 * 0.9 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_estimated_origin_penalized() {
        let mut mat = metal();
        mat.origin = MaterialOrigin::Estimated;
        let p = condition_penalty(&mat, &SimulationConditions::default());
        assert!((p - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_missing_melting_point_skips_homologous_penalty() {
        let mat = BaseMaterial::new("c", "C", MaterialCategory::Composite);
        let p = condition_penalty(&mat, &SimulationConditions::at_temperature(500.0));
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_tolerance_capped() {
        let mut mat = metal();
        mat.origin = MaterialOrigin::Estimated;
        let cond = SimulationConditions::at_temperature(1450.0)
            .with_pressure(1000.0)
            .with_environment(Environment::Acidic)
            .with_loading(LoadingType::Impact);
        let a = assess(Domain::Chemical, &mat, &cond, &settings());
        assert_eq!(a.relative_tolerance, MAX_RELATIVE_TOLERANCE);
        assert_eq!(a.confidence, 0.4);
    }

    fn tolerance(cond: &SimulationConditions) -> f64 {
        assess(Domain::Mechanical, &metal(), cond, &settings()).relative_tolerance
    }

    fn assert_non_decreasing(label: &str, tolerances: &[f64]) {
        for pair in tolerances.windows(2) {
            assert!(pair[1] >= pair[0], "{} tolerance shrank: {:?}", label, tolerances);
        }
    }

    #[test]
    fn test_band_widens_away_from_standard() {
        let hotter: Vec<f64> = [25.0, 400.0, 800.0, 1100.0, 1300.0, 1500.0, 3000.0]
            .iter()
            .map(|t| tolerance(&SimulationConditions::at_temperature(*t)))
            .collect();
        assert_non_decreasing("heating", &hotter);
        assert!(hotter[hotter.len() - 1] > hotter[0]);

        let colder: Vec<f64> = [25.0, 0.0, -50.0, -150.0, -273.0]
            .iter()
            .map(|t| tolerance(&SimulationConditions::at_temperature(*t)))
            .collect();
        assert_non_decreasing("cooling", &colder);
        assert!(colder[colder.len() - 1] > colder[0]);

        let pressed: Vec<f64> = [0.1, 50.0, 200.0, 600.0, 5000.0]
            .iter()
            .map(|p| tolerance(&SimulationConditions::default().with_pressure(*p)))
            .collect();
        assert_non_decreasing("pressure", &pressed);
        assert!(pressed[pressed.len() - 1] > pressed[0]);

        let air = tolerance(&SimulationConditions::default());
        for env in Environment::ALL {
            assert!(tolerance(&SimulationConditions::default().with_environment(env)) >= air);
        }
    }

    #[test]
    fn test_aggregate_mean_for_comprehensive() {
        let cond = SimulationConditions::default();
        let all: Vec<DomainAssessment> = Domain::ALL
            .iter()
            .map(|d| assess(*d, &metal(), &cond, &settings()))
            .collect();
        let mean = aggregate(SimulationType::Comprehensive, &all);
        assert!((mean - (0.8 + 0.85 + 0.75 + 0.7) / 4.0).abs() < 1e-12);
        assert_eq!(aggregate(SimulationType::Thermal, &all[1..2]), 0.85);
    }
}
