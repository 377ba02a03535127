//! Composition-Based Property Estimation
//!
//! Synthesizes a [`BaseMaterial`] from an element composition, a structure
//! tag and a processing route when the material is not in a catalog.
//!
//! ```text
//! density   = Σ pᵢ·ρᵢ / Σ pᵢ            (g/cm³ → kg/m³)
//! T_melt    = Σ pᵢ·Tᵢ / Σ pᵢ
//! σ_ts      = (200 + strengthening bonuses) × processing multiplier
//! σ_y       = 0.8 σ_ts
//! E         = 500 σ_ts                   (MPa, reported in GPa)
//! ```
//!
//! This is a rule-of-thumb estimate, not a derivation. Every record produced
//! here is tagged [`MaterialOrigin::Estimated`] and the orchestrator lowers
//! its confidence accordingly.
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::materials::estimator::{estimate, CompositionSpec, ProcessingMethod};
//! use matsim_core::materials::MaterialCategory;
//!
//! let spec = CompositionSpec::new("bcc", ProcessingMethod::Forging)
//!     .with_element("Fe", 80.0)
//!     .with_element("C", 1.0);
//! let mat = estimate(&spec).unwrap();
//!
//! assert_eq!(mat.category, MaterialCategory::Metal);
//! assert!(mat.properties.tensile_strength_mpa.unwrap() > 200.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::elements::{self, ElementGroup};
use super::{BaseMaterial, BaseProperties, MaterialCategory, MaterialOrigin};
use crate::errors::{EngineError, EngineResult};
use crate::units::{GramsPerCm3, KgPerM3};

/// Starting tensile strength before strengthening rules (MPa)
pub const BASE_TENSILE_STRENGTH_MPA: f64 = 200.0;

/// Yield/tensile ratio for estimated materials
pub const YIELD_RATIO: f64 = 0.8;

/// Modulus/tensile-strength correlation (dimensionless, both in MPa)
pub const MODULUS_CORRELATION: f64 = 500.0;

/// Manufacturing route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMethod {
    Casting,
    Forging,
    Machining,
    Additive,
    Sintering,
}

impl ProcessingMethod {
    /// Lowercase key, as in JSON
    pub fn key(&self) -> &'static str {
        match self {
            ProcessingMethod::Casting => "casting",
            ProcessingMethod::Forging => "forging",
            ProcessingMethod::Machining => "machining",
            ProcessingMethod::Additive => "additive",
            ProcessingMethod::Sintering => "sintering",
        }
    }

    /// Tensile strength multiplier
    pub fn strength_multiplier(&self) -> f64 {
        match self {
            ProcessingMethod::Casting => 0.8,
            ProcessingMethod::Forging => 1.2,
            ProcessingMethod::Machining => 1.0,
            ProcessingMethod::Additive => 0.9,
            ProcessingMethod::Sintering => 0.7,
        }
    }
}

/// What an element is doing in the mix. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    Base,
    #[default]
    Alloying,
    Matrix,
    Reinforcement,
    Dopant,
}

/// One line of a composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    /// Element symbol or compound formula ("Fe", "Al2O3")
    pub element: String,
    /// Percentage (mass or atomic; the total need not be 100)
    pub percentage: f64,
    #[serde(default)]
    pub role: ElementRole,
}

/// An explicit material description used instead of a catalog id.
///
/// ## JSON Example
///
/// ```json
/// {
///   "elements": [
///     { "element": "Fe", "percentage": 80.0, "role": "base" },
///     { "element": "C", "percentage": 1.0 }
///   ],
///   "structure": "bcc",
///   "processing": "forging"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSpec {
    /// Optional display name for the resulting material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub elements: Vec<CompositionEntry>,
    /// Crystal/structure tag, carried through to the material record
    pub structure: String,
    pub processing: ProcessingMethod,
}

impl CompositionSpec {
    /// Empty composition with a structure tag and processing route
    pub fn new(structure: impl Into<String>, processing: ProcessingMethod) -> Self {
        CompositionSpec {
            name: None,
            elements: Vec::new(),
            structure: structure.into(),
            processing,
        }
    }

    /// Builder: add an alloying element
    pub fn with_element(self, element: impl Into<String>, percentage: f64) -> Self {
        self.with_entry(element, percentage, ElementRole::default())
    }

    /// Builder: add an element with an explicit role
    pub fn with_entry(mut self, element: impl Into<String>, percentage: f64, role: ElementRole) -> Self {
        self.elements.push(CompositionEntry {
            element: element.into(),
            percentage,
            role,
        });
        self
    }

    /// Builder: set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate and merge entries into symbol → percentage.
    ///
    /// Repeated symbols are summed.
    pub fn normalized(&self) -> EngineResult<BTreeMap<String, f64>> {
        if self.elements.is_empty() {
            return Err(EngineError::invalid_request(
                "composition.elements",
                "Composition must list at least one element",
            ));
        }
        let mut merged = BTreeMap::new();
        for entry in &self.elements {
            let symbol = entry.element.trim();
            if symbol.is_empty() {
                return Err(EngineError::invalid_request(
                    "composition.elements.element",
                    "Element symbol cannot be empty",
                ));
            }
            if !entry.percentage.is_finite() || entry.percentage < 0.0 {
                return Err(EngineError::invalid_request(
                    "composition.elements.percentage",
                    format!("Percentage for {} must be finite and non-negative", symbol),
                ));
            }
            *merged.entry(symbol.to_string()).or_insert(0.0) += entry.percentage;
        }
        if merged.values().sum::<f64>() <= 0.0 {
            return Err(EngineError::invalid_request(
                "composition.elements.percentage",
                "Composition percentages sum to zero",
            ));
        }
        Ok(merged)
    }
}

/// How a strengthening rule scales with content
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bonus {
    /// MPa per percent of the element
    PerPercent(f64),
    /// Flat MPa once the threshold is exceeded
    Flat(f64),
}

/// Solid-solution / precipitation strengthening heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrengtheningRule {
    symbol: &'static str,
    /// Rule applies when the content strictly exceeds this percentage
    threshold_pct: f64,
    bonus: Bonus,
}

const STRENGTHENING_RULES: &[StrengtheningRule] = &[
    // Carbon: interstitial hardening once past mild-steel levels
    StrengtheningRule {
        symbol: "C",
        threshold_pct: 0.3,
        bonus: Bonus::PerPercent(500.0),
    },
    // Chromium: stainless-grade content
    StrengtheningRule {
        symbol: "Cr",
        threshold_pct: 10.0,
        bonus: Bonus::Flat(100.0),
    },
    StrengtheningRule {
        symbol: "Ti",
        threshold_pct: 0.0,
        bonus: Bonus::PerPercent(5.0),
    },
    StrengtheningRule {
        symbol: "Mn",
        threshold_pct: 0.0,
        bonus: Bonus::PerPercent(20.0),
    },
];

fn strengthening_bonus(composition: &BTreeMap<String, f64>) -> f64 {
    STRENGTHENING_RULES
        .iter()
        .filter_map(|rule| {
            let pct = composition.get(rule.symbol).copied().unwrap_or(0.0);
            if pct <= rule.threshold_pct {
                return None;
            }
            Some(match rule.bonus {
                Bonus::PerPercent(per) => per * pct,
                Bonus::Flat(bonus) => bonus,
            })
        })
        .sum()
}

fn weighted_average(composition: &BTreeMap<String, f64>, value: impl Fn(&str) -> f64) -> f64 {
    let total: f64 = composition.values().sum();
    composition
        .iter()
        .map(|(symbol, pct)| pct * value(symbol))
        .sum::<f64>()
        / total
}

/// Category from the structural groups present, in priority order
/// metal → ceramic → polymer → composite.
pub fn infer_category(composition: &BTreeMap<String, f64>) -> MaterialCategory {
    let has = |group: ElementGroup| {
        composition
            .iter()
            .any(|(symbol, pct)| *pct > 0.0 && elements::group(symbol) == Some(group))
    };
    if has(ElementGroup::MetalForming) {
        MaterialCategory::Metal
    } else if has(ElementGroup::CeramicForming) {
        MaterialCategory::Ceramic
    } else if has(ElementGroup::Organic) {
        MaterialCategory::Polymer
    } else {
        MaterialCategory::Composite
    }
}

/// Category-typical baselines for the fields composition rules do not cover:
/// (conductivity W/m·K, expansion 1/K, specific heat J/kg·K, resistivity Ω·m, dielectric constant)
fn category_defaults(category: MaterialCategory) -> (f64, f64, f64, f64, Option<f64>) {
    match category {
        MaterialCategory::Metal => (40.0, 13.0e-6, 480.0, 2.0e-7, None),
        MaterialCategory::Ceramic => (20.0, 7.0e-6, 800.0, 1.0e12, Some(9.0)),
        MaterialCategory::Polymer => (0.25, 80.0e-6, 1500.0, 1.0e14, Some(3.0)),
        MaterialCategory::Composite => (5.0, 20.0e-6, 1000.0, 1.0e2, None),
        MaterialCategory::Semiconductor => (100.0, 3.0e-6, 700.0, 1.0e2, Some(11.7)),
    }
}

fn synthetic_id(composition: &BTreeMap<String, f64>, spec: &CompositionSpec) -> String {
    let formula: Vec<String> = composition
        .iter()
        .map(|(symbol, pct)| format!("{}{}", symbol, pct))
        .collect();
    format!(
        "estimated:{}:{}:{}",
        formula.join("-"),
        spec.structure,
        spec.processing.key()
    )
}

/// Synthesize a baseline material from a composition description.
pub fn estimate(spec: &CompositionSpec) -> EngineResult<BaseMaterial> {
    let composition = spec.normalized()?;
    let category = infer_category(&composition);

    let density: KgPerM3 = GramsPerCm3(weighted_average(&composition, elements::density_g_cm3)).into();
    let melting_point_c = weighted_average(&composition, elements::melting_point_c);

    let bonus = strengthening_bonus(&composition);
    let tensile = (BASE_TENSILE_STRENGTH_MPA + bonus) * spec.processing.strength_multiplier();
    let modulus_gpa = MODULUS_CORRELATION * tensile / 1000.0;

    let (conductivity, expansion, specific_heat, resistivity, dielectric) = category_defaults(category);

    let id = synthetic_id(&composition, spec);
    debug!(
        %id,
        %category,
        tensile_mpa = tensile,
        density_kg_m3 = density.0,
        melting_point_c,
        "estimated base properties from composition"
    );

    Ok(BaseMaterial {
        name: spec
            .name
            .clone()
            .unwrap_or_else(|| format!("Estimated {} ({})", category, spec.structure)),
        id,
        category,
        composition,
        structure: Some(spec.structure.clone()),
        processing: Some(spec.processing),
        origin: MaterialOrigin::Estimated,
        properties: BaseProperties {
            tensile_strength_mpa: Some(tensile),
            yield_strength_mpa: Some(YIELD_RATIO * tensile),
            elastic_modulus_gpa: Some(modulus_gpa),
            density_kg_m3: Some(density.0),
            melting_point_c: Some(melting_point_c),
            thermal_conductivity_w_mk: Some(conductivity),
            thermal_expansion_per_k: Some(expansion),
            specific_heat_j_kgk: Some(specific_heat),
            electrical_resistivity_ohm_m: Some(resistivity),
            dielectric_constant: dielectric,
            band_gap_ev: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe_c(processing: ProcessingMethod) -> CompositionSpec {
        CompositionSpec::new("bcc", processing)
            .with_entry("Fe", 80.0, ElementRole::Base)
            .with_element("C", 1.0)
    }

    #[test]
    fn test_forging_stronger_than_sintering() {
        let forged = estimate(&fe_c(ProcessingMethod::Forging)).unwrap();
        let sintered = estimate(&fe_c(ProcessingMethod::Sintering)).unwrap();
        let ts_forged = forged.properties.tensile_strength_mpa.unwrap();
        let ts_sintered = sintered.properties.tensile_strength_mpa.unwrap();
        assert!(ts_forged > ts_sintered);
        // (200 + 500×1.0) × 1.2 and × 0.7
        assert!((ts_forged - 840.0).abs() < 1e-9);
        assert!((ts_sintered - 490.0).abs() < 1e-9);
    }

    #[test]
    fn test_derived_strength_and_modulus() {
        let mat = estimate(&fe_c(ProcessingMethod::Machining)).unwrap();
        let props = &mat.properties;
        let ts = props.tensile_strength_mpa.unwrap();
        assert!((props.yield_strength_mpa.unwrap() - 0.8 * ts).abs() < 1e-9);
        assert!((props.elastic_modulus_gpa.unwrap() - 0.5 * ts).abs() < 1e-9);
        assert_eq!(mat.origin, MaterialOrigin::Estimated);
        assert_eq!(mat.structure.as_deref(), Some("bcc"));
    }

    #[test]
    fn test_weighted_density_and_melting_point() {
        let mat = estimate(&fe_c(ProcessingMethod::Machining)).unwrap();
        let expected_density = (80.0 * 7.87 + 1.0 * 2.26) / 81.0 * 1000.0;
        let expected_melt = (80.0 * 1538.0 + 1.0 * 3550.0) / 81.0;
        assert!((mat.properties.density_kg_m3.unwrap() - expected_density).abs() < 1e-6);
        assert!((mat.properties.melting_point_c.unwrap() - expected_melt).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_element_uses_defaults() {
        let spec = CompositionSpec::new("amorphous", ProcessingMethod::Casting).with_element("Xx", 100.0);
        let mat = estimate(&spec).unwrap();
        assert!((mat.properties.density_kg_m3.unwrap() - 5000.0).abs() < 1e-9);
        assert!((mat.properties.melting_point_c.unwrap() - 1000.0).abs() < 1e-9);
        assert_eq!(mat.category, MaterialCategory::Composite);
    }

    #[test]
    fn test_strengthening_rules() {
        let low_carbon = CompositionSpec::new("bcc", ProcessingMethod::Machining)
            .with_element("Fe", 99.0)
            .with_element("C", 0.2);
        let stainless = CompositionSpec::new("fcc", ProcessingMethod::Machining)
            .with_element("Fe", 70.0)
            .with_element("Cr", 18.0);
        let ts_low = estimate(&low_carbon).unwrap().properties.tensile_strength_mpa.unwrap();
        let ts_ss = estimate(&stainless).unwrap().properties.tensile_strength_mpa.unwrap();
        assert!((ts_low - 200.0).abs() < 1e-9);
        assert!((ts_ss - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_inference() {
        let ceramic = CompositionSpec::new("hex", ProcessingMethod::Sintering)
            .with_element("SiC", 90.0)
            .with_element("B", 10.0);
        assert_eq!(estimate(&ceramic).unwrap().category, MaterialCategory::Ceramic);

        let polymer = CompositionSpec::new("amorphous", ProcessingMethod::Casting)
            .with_element("C", 76.0)
            .with_element("H", 5.0)
            .with_element("O", 19.0);
        let mat = estimate(&polymer).unwrap();
        assert_eq!(mat.category, MaterialCategory::Polymer);
        assert_eq!(mat.properties.dielectric_constant, Some(3.0));
    }

    #[test]
    fn test_duplicate_entries_are_summed() {
        let spec = CompositionSpec::new("fcc", ProcessingMethod::Machining)
            .with_element("Al", 50.0)
            .with_element("Al", 45.0);
        let merged = spec.normalized().unwrap();
        assert_eq!(merged.get("Al"), Some(&95.0));
    }

    #[test]
    fn test_invalid_compositions() {
        let empty = CompositionSpec::new("fcc", ProcessingMethod::Casting);
        assert_eq!(estimate(&empty).unwrap_err().error_code(), "INVALID_REQUEST");

        let negative = CompositionSpec::new("fcc", ProcessingMethod::Casting).with_element("Fe", -5.0);
        assert!(estimate(&negative).is_err());

        let zero = CompositionSpec::new("fcc", ProcessingMethod::Casting).with_element("Fe", 0.0);
        assert!(estimate(&zero).is_err());
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate(&fe_c(ProcessingMethod::Additive)).unwrap();
        let b = estimate(&fe_c(ProcessingMethod::Additive)).unwrap();
        assert_eq!(a, b);
        assert!(a.id.starts_with("estimated:"));
    }
}
