//! # Electrical Predictor
//!
//! Resistivity scales linearly with temperature (see
//! [`resistivity_at`](super::resistivity_at)); the rest of the record depends on the
//! material category, and fields that do not apply are absent rather than
//! zeroed:
//!
//! | Category            | Profile | Extra fields |
//! |---------------------|---------|--------------|
//! | metal, composite    | `metal` | none |
//! | ceramic, polymer    | `insulator` | dielectric strength, dielectric constant |
//! | semiconductor       | `semiconductor` | band gap (Varshni) |
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "profile": "semiconductor",
//!   "resistivity_ohm_m": 641.0,
//!   "conductivity_s_m": 0.00156,
//!   "band_gap_ev": 1.12
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{resistivity_at, Domain};
use crate::conditions::{SimulationConditions, DEFAULT_HUMIDITY_PCT, STANDARD_TEMPERATURE_C};
use crate::errors::EngineResult;
use crate::materials::{BaseMaterial, MaterialCategory, Property};
use crate::settings::SimulationSettings;

/// Baseline dielectric strength for insulators (kV/mm)
pub const BASE_DIELECTRIC_STRENGTH_KV_MM: f64 = 20.0;

/// Relative permittivity assumed for ceramics with no catalog value
pub const CERAMIC_DIELECTRIC_CONSTANT: f64 = 9.0;

/// Relative permittivity assumed for polymers with no catalog value
pub const POLYMER_DIELECTRIC_CONSTANT: f64 = 3.0;

/// Conducting materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalProfile {
    /// Resistivity (Ω·m)
    pub resistivity_ohm_m: f64,
    /// Conductivity (S/m)
    pub conductivity_s_m: f64,
}

/// Ceramics and polymers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulatorProfile {
    pub resistivity_ohm_m: f64,
    pub conductivity_s_m: f64,
    /// Breakdown field (kV/mm)
    pub dielectric_strength_kv_mm: f64,
    /// Relative permittivity
    pub dielectric_constant: f64,
}

/// Semiconductors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemiconductorProfile {
    pub resistivity_ohm_m: f64,
    pub conductivity_s_m: f64,
    /// Band gap at the operating temperature (eV)
    pub band_gap_ev: f64,
}

/// Category-gated electrical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum ElectricalProfile {
    Metal(MetalProfile),
    Insulator(InsulatorProfile),
    Semiconductor(SemiconductorProfile),
}

impl ElectricalProfile {
    /// Resistivity (Ω·m), present for every profile
    pub fn resistivity_ohm_m(&self) -> f64 {
        match self {
            ElectricalProfile::Metal(p) => p.resistivity_ohm_m,
            ElectricalProfile::Insulator(p) => p.resistivity_ohm_m,
            ElectricalProfile::Semiconductor(p) => p.resistivity_ohm_m,
        }
    }

    /// Band gap, semiconductors only
    pub fn band_gap_ev(&self) -> Option<f64> {
        match self {
            ElectricalProfile::Semiconductor(p) => Some(p.band_gap_ev),
            _ => None,
        }
    }

    /// Dielectric strength, insulators only
    pub fn dielectric_strength_kv_mm(&self) -> Option<f64> {
        match self {
            ElectricalProfile::Insulator(p) => Some(p.dielectric_strength_kv_mm),
            _ => None,
        }
    }

    /// Dielectric constant, insulators only
    pub fn dielectric_constant(&self) -> Option<f64> {
        match self {
            ElectricalProfile::Insulator(p) => Some(p.dielectric_constant),
            _ => None,
        }
    }

    /// Named scalar outputs, for uncertainty bands
    pub fn scalar_fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            ElectricalProfile::Metal(p) => vec![
                ("resistivity_ohm_m", p.resistivity_ohm_m),
                ("conductivity_s_m", p.conductivity_s_m),
            ],
            ElectricalProfile::Insulator(p) => vec![
                ("resistivity_ohm_m", p.resistivity_ohm_m),
                ("conductivity_s_m", p.conductivity_s_m),
                ("dielectric_strength_kv_mm", p.dielectric_strength_kv_mm),
                ("dielectric_constant", p.dielectric_constant),
            ],
            ElectricalProfile::Semiconductor(p) => vec![
                ("resistivity_ohm_m", p.resistivity_ohm_m),
                ("conductivity_s_m", p.conductivity_s_m),
                ("band_gap_ev", p.band_gap_ev),
            ],
        }
    }
}

/// Varshni band gap `E_g0 − αT²/(T + β)` at absolute temperature T, never negative
pub fn varshni_band_gap(eg0_ev: f64, temperature_k: f64, settings: &SimulationSettings) -> f64 {
    let v = &settings.varshni;
    let t = temperature_k.max(0.0);
    (eg0_ev - v.alpha * t * t / (t + v.beta)).max(0.0)
}

/// Breakdown field degraded by heat above 25 °C and humidity above 50 %
pub fn dielectric_strength(temperature_c: f64, humidity_pct: f64) -> f64 {
    let heat = (1.0 - 0.002 * (temperature_c - STANDARD_TEMPERATURE_C).max(0.0)).max(0.1);
    let moisture = (1.0 - 0.005 * (humidity_pct - DEFAULT_HUMIDITY_PCT).max(0.0)).max(0.3);
    BASE_DIELECTRIC_STRENGTH_KV_MM * heat * moisture
}

fn default_dielectric_constant(category: MaterialCategory) -> f64 {
    match category {
        MaterialCategory::Polymer => POLYMER_DIELECTRIC_CONSTANT,
        _ => CERAMIC_DIELECTRIC_CONSTANT,
    }
}

/// Predict electrical properties under the given conditions.
pub fn predict(
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
) -> EngineResult<ElectricalProfile> {
    let rho0 = material.require(Domain::Electrical, Property::ElectricalResistivity)?;
    let resistivity = resistivity_at(material.category, rho0, conditions.temperature_c);
    let conductivity = 1.0 / resistivity;
    trace!(resistivity, "electrical factors");

    let profile = match material.category {
        MaterialCategory::Metal | MaterialCategory::Composite => ElectricalProfile::Metal(MetalProfile {
            resistivity_ohm_m: resistivity,
            conductivity_s_m: conductivity,
        }),
        MaterialCategory::Ceramic | MaterialCategory::Polymer => {
            let eps0 = material
                .optional(Property::DielectricConstant)
                .unwrap_or_else(|| default_dielectric_constant(material.category));
            let eps = (eps0 * (1.0 - 0.0005 * (conditions.temperature_c - STANDARD_TEMPERATURE_C))).max(1.0);
            ElectricalProfile::Insulator(InsulatorProfile {
                resistivity_ohm_m: resistivity,
                conductivity_s_m: conductivity,
                dielectric_strength_kv_mm: dielectric_strength(conditions.temperature_c, conditions.humidity()),
                dielectric_constant: eps,
            })
        }
        MaterialCategory::Semiconductor => {
            let eg0 = material
                .optional(Property::BandGap)
                .unwrap_or(settings.varshni.eg0_ev);
            ElectricalProfile::Semiconductor(SemiconductorProfile {
                resistivity_ohm_m: resistivity,
                conductivity_s_m: conductivity,
                band_gap_ev: varshni_band_gap(eg0, conditions.absolute_temperature().0, settings),
            })
        }
    };
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::BaseProperties;

    fn material(category: MaterialCategory, rho: f64) -> BaseMaterial {
        BaseMaterial::new("e", "E", category).with_properties(BaseProperties {
            electrical_resistivity_ohm_m: Some(rho),
            ..Default::default()
        })
    }

    fn run(mat: &BaseMaterial, cond: &SimulationConditions) -> ElectricalProfile {
        predict(mat, cond, &SimulationSettings::default()).unwrap()
    }

    #[test]
    fn test_metal_omits_gated_fields() {
        let profile = run(&material(MaterialCategory::Metal, 1.7e-8), &SimulationConditions::default());
        assert!(matches!(profile, ElectricalProfile::Metal(_)));
        assert_eq!(profile.band_gap_ev(), None);
        assert_eq!(profile.dielectric_constant(), None);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["profile"], "metal");
        assert!(json.get("band_gap_ev").is_none());
        assert!(json.get("dielectric_constant").is_none());
    }

    #[test]
    fn test_semiconductor_includes_band_gap() {
        let profile = run(&material(MaterialCategory::Semiconductor, 641.0), &SimulationConditions::default());
        let gap = profile.band_gap_ev().unwrap();
        // 1.5 − 5e-4 × 298.15² / 598.15
        assert!((gap - 1.4257).abs() < 1e-3);
        assert_eq!(profile.dielectric_strength_kv_mm(), None);
    }

    #[test]
    fn test_material_band_gap_overrides_default() {
        let mut mat = material(MaterialCategory::Semiconductor, 641.0);
        mat.properties.band_gap_ev = Some(1.17);
        let gap = run(&mat, &SimulationConditions::default()).band_gap_ev().unwrap();
        assert!(gap < 1.17 && gap > 1.0);
    }

    #[test]
    fn test_band_gap_never_negative() {
        let settings = SimulationSettings::default();
        assert_eq!(varshni_band_gap(0.1, 5000.0, &settings), 0.0);
        assert_eq!(varshni_band_gap(1.5, 0.0, &settings), 1.5);
    }

    #[test]
    fn test_metal_resistivity_rises_with_temperature() {
        let mat = material(MaterialCategory::Metal, 1.0e-7);
        let hot = run(&mat, &SimulationConditions::at_temperature(125.0));
        assert!((hot.resistivity_ohm_m() - 1.4e-7).abs() < 1e-12);
        let cold = run(&mat, &SimulationConditions::default());
        assert!(hot.resistivity_ohm_m() > cold.resistivity_ohm_m());
    }

    #[test]
    fn test_insulator_profile() {
        let profile = run(&material(MaterialCategory::Polymer, 1e14), &SimulationConditions::default());
        assert_eq!(profile.dielectric_strength_kv_mm(), Some(20.0));
        assert!((profile.dielectric_constant().unwrap() - 3.0).abs() < 1e-12);

        let humid = run(
            &material(MaterialCategory::Polymer, 1e14),
            &SimulationConditions::default().with_humidity(90.0),
        );
        assert!(humid.dielectric_strength_kv_mm().unwrap() < 20.0);
    }

    #[test]
    fn test_dielectric_strength_floors() {
        assert!((dielectric_strength(5000.0, 100.0) - 20.0 * 0.1 * 0.75).abs() < 1e-12);
        assert_eq!(dielectric_strength(-50.0, 10.0), 20.0);
    }

    #[test]
    fn test_resistivity_required() {
        let mat = BaseMaterial::new("bare", "Bare", MaterialCategory::Metal);
        let err = predict(&mat, &SimulationConditions::default(), &SimulationSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_MATERIAL");
    }
}
