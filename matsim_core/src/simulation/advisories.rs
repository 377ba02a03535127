//! Threshold rules that turn predicted values into advisory text.
//!
//! Each domain has its own rule set and rules never look at another domain's
//! record. Two rules may produce the same sentence (both the mechanical and
//! the thermal rules flag operation near the melting point); [`Advisories`]
//! keeps only the first occurrence of any exact text.

use crate::conditions::{homologous_temperature, Environment, SimulationConditions};
use crate::materials::{BaseMaterial, Property};
use crate::predictors::{ChemicalProperties, ElectricalProfile, MechanicalProperties, ThermalProperties};
use crate::settings::SimulationSettings;

/// Shared critical warning for T_h > 0.8
pub const NEAR_MELTING_WARNING: &str =
    "CRITICAL: Operating near melting point - homologous temperature exceeds 0.8";

/// Homologous temperature above which the near-melting warning fires
pub const NEAR_MELTING_HOMOLOGOUS: f64 = 0.8;

/// Aggregate confidence below which physical testing is recommended
pub const LOW_CONFIDENCE: f64 = 0.5;

/// Ordered, de-duplicated recommendation and warning lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advisories {
    recommendations: Vec<String>,
    warnings: Vec<String>,
}

impl Advisories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recommendation unless the exact text is already present
    pub fn recommend(&mut self, text: impl Into<String>) {
        push_unique(&mut self.recommendations, text.into());
    }

    /// Add a warning unless the exact text is already present
    pub fn warn(&mut self, text: impl Into<String>) {
        push_unique(&mut self.warnings, text.into());
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume into (recommendations, warnings)
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.recommendations, self.warnings)
    }
}

fn push_unique(list: &mut Vec<String>, text: String) {
    if !list.contains(&text) {
        list.push(text);
    }
}

fn homologous(material: &BaseMaterial, conditions: &SimulationConditions) -> Option<f64> {
    material
        .optional(Property::MeltingPoint)
        .map(|melt| homologous_temperature(conditions.temperature_c, melt))
}

/// Rules over the mechanical record
pub fn mechanical(
    out: &mut Advisories,
    props: &MechanicalProperties,
    material: &BaseMaterial,
    conditions: &SimulationConditions,
    settings: &SimulationSettings,
) {
    if let Some(th) = homologous(material, conditions) {
        if th > NEAR_MELTING_HOMOLOGOUS {
            out.warn(NEAR_MELTING_WARNING);
        } else if th > 0.6 {
            out.warn("High homologous temperature - significant strength loss expected");
        }
    }
    if props.ductility < 0.03 {
        out.recommend("Low ductility - brittle failure risk; consider a tougher material or design margins");
    }
    if props.creep_rate_per_year > 0.0 {
        out.recommend("Creep is active at this temperature - evaluate long-term deformation");
    }
    if props.creep_rate_per_year > 0.01 {
        out.warn("High creep rate - dimensional stability at risk over service life");
    }
    if props.fatigue_life_cycles.is_some_and(|n| n < 1.0e6) {
        out.recommend("Fatigue life below 10^6 cycles - reduce stress amplitude or improve surface finish");
    }
    if conditions.temperature_c < settings.dbtt_c {
        out.warn("Below ductile-to-brittle transition temperature - impact toughness severely reduced");
    }
    let corrosive = matches!(conditions.environment(), Environment::Seawater | Environment::Acidic);
    if corrosive && conditions.cyclic_frequency().is_some() {
        out.warn("Corrosion fatigue risk - cyclic loading in a corrosive environment");
    }
}

/// Rules over the thermal record
pub fn thermal(
    out: &mut Advisories,
    props: &ThermalProperties,
    material: &BaseMaterial,
    conditions: &SimulationConditions,
) {
    if homologous(material, conditions).is_some_and(|th| th > NEAR_MELTING_HOMOLOGOUS) {
        out.warn(NEAR_MELTING_WARNING);
    }
    if let Some(strength) = material.optional(Property::TensileStrength) {
        if props.thermal_stress_mpa > 0.5 * strength {
            out.warn("Constrained thermal stress exceeds half the tensile strength - allow for expansion");
        }
    }
    if props.thermal_shock_resistance_w_m < 100.0 {
        out.recommend("Low thermal shock resistance - avoid rapid temperature changes");
    }
}

/// Rules over the electrical record
pub fn electrical(out: &mut Advisories, props: &ElectricalProfile, conditions: &SimulationConditions) {
    if props.dielectric_strength_kv_mm().is_some_and(|e| e < 10.0) {
        out.warn("Dielectric strength below 10 kV/mm - insulation breakdown risk");
    }
    if props.dielectric_strength_kv_mm().is_some() && conditions.humidity() > 80.0 {
        out.recommend("High humidity degrades insulation - consider moisture protection");
    }
    if props.band_gap_ev().is_some_and(|g| g < 1.0) {
        out.recommend("Narrow band gap at this temperature - expect increased leakage current");
    }
}

/// Rules over the chemical record
pub fn chemical(out: &mut Advisories, props: &ChemicalProperties, conditions: &SimulationConditions) {
    if props.corrosion_rate_mm_yr > 1.0 {
        out.warn("Severe corrosion rate - material unsuitable without protection");
    } else if props.corrosion_rate_mm_yr > 0.25 {
        out.recommend("Elevated corrosion rate - consider protective coating or cathodic protection");
    }
    if props.oxidation_resistance < 0.3 {
        out.recommend("Poor oxidation resistance - use protective atmosphere or coating");
    }
    if props.chemical_stability < 0.5 {
        out.warn("Low chemical stability in this environment");
    }
    if let Some(ph) = conditions.environment().nominal_ph() {
        if !props.tolerates_ph(ph) {
            out.warn(format!(
                "Environment pH {:.1} is outside the stability window [{:.0}, {:.0}]",
                ph, props.ph_min, props.ph_max
            ));
        }
    }
}

/// Rules that depend on the whole result rather than one domain
pub fn general(out: &mut Advisories, material: &BaseMaterial, confidence: f64) {
    if material.is_estimated() {
        out.recommend("Properties were estimated from composition - validate experimentally");
    }
    if confidence < LOW_CONFIDENCE {
        out.recommend("Low prediction confidence - validate with physical testing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{BaseProperties, MaterialCategory};

    fn metal() -> BaseMaterial {
        BaseMaterial::new("m", "M", MaterialCategory::Metal).with_properties(BaseProperties {
            tensile_strength_mpa: Some(500.0),
            melting_point_c: Some(1500.0),
            ..Default::default()
        })
    }

    fn mech(ductility: f64) -> MechanicalProperties {
        MechanicalProperties {
            tensile_strength_mpa: 500.0,
            yield_strength_mpa: 400.0,
            elastic_modulus_gpa: 200.0,
            hardness_hv: 1500.0,
            ductility,
            toughness_mj_m3: 40.0,
            creep_rate_per_year: 0.0,
            fatigue_life_cycles: None,
        }
    }

    fn thermal_props() -> ThermalProperties {
        ThermalProperties {
            thermal_conductivity_w_mk: 16.0,
            thermal_expansion_per_k: 16e-6,
            specific_heat_j_kgk: 500.0,
            thermal_diffusivity_m2_s: 4e-6,
            thermal_shock_resistance_w_m: 1800.0,
            thermal_stress_mpa: 0.0,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let mut adv = Advisories::new();
        adv.warn("a");
        adv.warn("b");
        adv.warn("a");
        assert_eq!(adv.warnings(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_near_melting_warning_emitted_once() {
        let cond = SimulationConditions::at_temperature(1400.0);
        let mut adv = Advisories::new();
        mechanical(&mut adv, &mech(0.2), &metal(), &cond, &SimulationSettings::default());
        thermal(&mut adv, &thermal_props(), &metal(), &cond);
        let hits = adv.warnings().iter().filter(|w| *w == NEAR_MELTING_WARNING).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_brittle_recommendation() {
        let mut adv = Advisories::new();
        mechanical(
            &mut adv,
            &mech(0.01),
            &metal(),
            &SimulationConditions::default(),
            &SimulationSettings::default(),
        );
        assert!(adv.recommendations().iter().any(|r| r.contains("brittle failure risk")));
        assert!(adv.warnings().is_empty());
    }

    #[test]
    fn test_ph_window_warning() {
        let props = ChemicalProperties {
            corrosion_rate_mm_yr: 0.1,
            oxidation_resistance: 0.8,
            chemical_stability: 0.56,
            ph_min: 5.0,
            ph_max: 9.0,
        };
        let mut adv = Advisories::new();
        chemical(&mut adv, &props, &SimulationConditions::default().with_environment(Environment::Acidic));
        assert!(adv.warnings().iter().any(|w| w.contains("pH 2.0")));
    }

    #[test]
    fn test_general_rules() {
        let mut adv = Advisories::new();
        general(&mut adv, &metal(), 0.45);
        let (recs, warns) = adv.into_parts();
        assert_eq!(recs.len(), 1);
        assert!(warns.is_empty());
    }
}
