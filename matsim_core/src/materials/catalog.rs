//! Material Catalog
//!
//! Read-only lookup of baseline material records by identifier. The engine
//! only ever reads through the [`MaterialCatalog`] trait, so a caller can plug
//! in its own data source; two implementations ship here:
//!
//! - [`ReferenceCatalog`]: a built-in table of common engineering materials,
//!   built once on first use and never mutated afterwards.
//! - [`InMemoryCatalog`]: a caller-populated map.
//!
//! Identifiers are matched case-insensitively, and `-` or spaces match `_`,
//! so `"Steel-316L"` resolves to `steel_316l`.
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::materials::{MaterialCatalog, MaterialCategory, ReferenceCatalog};
//!
//! let al = ReferenceCatalog.resolve_material("Aluminum-6061").unwrap();
//! assert_eq!(al.category, MaterialCategory::Metal);
//! assert!(ReferenceCatalog.resolve_material("unobtainium").is_err());
//! ```

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use super::{BaseMaterial, BaseProperties, MaterialCategory};
use crate::errors::{EngineError, EngineResult};

/// Read interface the engine resolves material identifiers through.
///
/// Implementations must behave as immutable for the engine's lifetime;
/// concurrent simulations share one catalog without coordination.
pub trait MaterialCatalog: Send + Sync {
    /// Resolve an identifier, failing with `NotFound` when absent
    fn resolve_material(&self, id: &str) -> EngineResult<BaseMaterial>;

    /// All identifiers in the catalog, sorted
    fn material_ids(&self) -> Vec<String>;
}

/// Canonical form of a material identifier
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase().replace(['-', ' '], "_")
}

// ============================================================================
// Reference catalog
// ============================================================================

fn entry(
    id: &str,
    name: &str,
    category: MaterialCategory,
    composition: &[(&str, f64)],
    properties: BaseProperties,
) -> BaseMaterial {
    BaseMaterial::new(id, name, category)
        .with_composition(composition.iter().copied())
        .with_properties(properties)
}

fn reference_materials() -> Vec<BaseMaterial> {
    use MaterialCategory::*;

    vec![
        entry(
            "steel_316l",
            "Stainless Steel 316L",
            Metal,
            &[("Fe", 68.0), ("Cr", 17.0), ("Ni", 10.0), ("Mo", 2.0), ("C", 0.03)],
            BaseProperties {
                tensile_strength_mpa: Some(580.0),
                yield_strength_mpa: Some(290.0),
                elastic_modulus_gpa: Some(200.0),
                density_kg_m3: Some(7980.0),
                melting_point_c: Some(1400.0),
                thermal_conductivity_w_mk: Some(16.2),
                thermal_expansion_per_k: Some(16.0e-6),
                specific_heat_j_kgk: Some(500.0),
                electrical_resistivity_ohm_m: Some(6.9e-7),
                ..Default::default()
            },
        ),
        entry(
            "steel_a36",
            "Carbon Steel A36",
            Metal,
            &[("Fe", 98.0), ("C", 0.26), ("Mn", 1.03), ("P", 0.04), ("S", 0.05)],
            BaseProperties {
                tensile_strength_mpa: Some(400.0),
                yield_strength_mpa: Some(250.0),
                elastic_modulus_gpa: Some(200.0),
                density_kg_m3: Some(7850.0),
                melting_point_c: Some(1425.0),
                thermal_conductivity_w_mk: Some(50.2),
                thermal_expansion_per_k: Some(11.7e-6),
                specific_heat_j_kgk: Some(486.0),
                electrical_resistivity_ohm_m: Some(1.0e-7),
                ..Default::default()
            },
        ),
        entry(
            "aluminum_6061",
            "Aluminum 6061-T6",
            Metal,
            &[("Al", 97.9), ("Mg", 1.0), ("Si", 0.6), ("Cu", 0.3), ("Cr", 0.2)],
            BaseProperties {
                tensile_strength_mpa: Some(310.0),
                yield_strength_mpa: Some(276.0),
                elastic_modulus_gpa: Some(69.0),
                density_kg_m3: Some(2700.0),
                melting_point_c: Some(652.0),
                thermal_conductivity_w_mk: Some(167.0),
                thermal_expansion_per_k: Some(23.6e-6),
                specific_heat_j_kgk: Some(896.0),
                electrical_resistivity_ohm_m: Some(4.07e-8),
                ..Default::default()
            },
        ),
        entry(
            "titanium_grade5",
            "Titanium Grade 5 (Ti-6Al-4V)",
            Metal,
            &[("Ti", 90.0), ("Al", 6.0), ("V", 4.0)],
            BaseProperties {
                tensile_strength_mpa: Some(950.0),
                yield_strength_mpa: Some(880.0),
                elastic_modulus_gpa: Some(114.0),
                density_kg_m3: Some(4430.0),
                melting_point_c: Some(1604.0),
                thermal_conductivity_w_mk: Some(6.7),
                thermal_expansion_per_k: Some(8.6e-6),
                specific_heat_j_kgk: Some(526.0),
                electrical_resistivity_ohm_m: Some(1.78e-6),
                ..Default::default()
            },
        ),
        entry(
            "copper_c101",
            "Oxygen-Free Copper C101",
            Metal,
            &[("Cu", 99.99), ("O", 0.001)],
            BaseProperties {
                tensile_strength_mpa: Some(220.0),
                yield_strength_mpa: Some(69.0),
                elastic_modulus_gpa: Some(110.0),
                density_kg_m3: Some(8960.0),
                melting_point_c: Some(1085.0),
                thermal_conductivity_w_mk: Some(401.0),
                thermal_expansion_per_k: Some(17.0e-6),
                specific_heat_j_kgk: Some(385.0),
                electrical_resistivity_ohm_m: Some(1.68e-8),
                ..Default::default()
            },
        ),
        entry(
            "peek",
            "PEEK (Polyetheretherketone)",
            Polymer,
            &[("C", 76.0), ("H", 5.0), ("O", 19.0)],
            BaseProperties {
                tensile_strength_mpa: Some(100.0),
                yield_strength_mpa: Some(90.0),
                elastic_modulus_gpa: Some(3.6),
                density_kg_m3: Some(1320.0),
                melting_point_c: Some(343.0),
                thermal_conductivity_w_mk: Some(0.25),
                thermal_expansion_per_k: Some(47.0e-6),
                specific_heat_j_kgk: Some(1340.0),
                electrical_resistivity_ohm_m: Some(1.0e15),
                dielectric_constant: Some(3.2),
                ..Default::default()
            },
        ),
        entry(
            "nylon_66",
            "Nylon 6,6",
            Polymer,
            &[("C", 63.7), ("H", 9.8), ("N", 12.4), ("O", 14.1)],
            BaseProperties {
                tensile_strength_mpa: Some(83.0),
                yield_strength_mpa: Some(79.0),
                elastic_modulus_gpa: Some(2.8),
                density_kg_m3: Some(1140.0),
                melting_point_c: Some(264.0),
                thermal_conductivity_w_mk: Some(0.23),
                thermal_expansion_per_k: Some(80.0e-6),
                specific_heat_j_kgk: Some(1670.0),
                electrical_resistivity_ohm_m: Some(1.0e14),
                dielectric_constant: Some(4.0),
                ..Default::default()
            },
        ),
        entry(
            "alumina_99",
            "Alumina 99%",
            Ceramic,
            &[("Al2O3", 99.0), ("SiO2", 0.5)],
            BaseProperties {
                tensile_strength_mpa: Some(300.0),
                elastic_modulus_gpa: Some(380.0),
                density_kg_m3: Some(3950.0),
                melting_point_c: Some(2054.0),
                thermal_conductivity_w_mk: Some(25.0),
                thermal_expansion_per_k: Some(8.1e-6),
                specific_heat_j_kgk: Some(880.0),
                electrical_resistivity_ohm_m: Some(1.0e12),
                dielectric_constant: Some(9.8),
                ..Default::default()
            },
        ),
        entry(
            "silicon_carbide",
            "Silicon Carbide",
            Ceramic,
            &[("SiC", 100.0)],
            BaseProperties {
                tensile_strength_mpa: Some(550.0),
                elastic_modulus_gpa: Some(410.0),
                density_kg_m3: Some(3210.0),
                melting_point_c: Some(2730.0),
                thermal_conductivity_w_mk: Some(120.0),
                thermal_expansion_per_k: Some(4.0e-6),
                specific_heat_j_kgk: Some(750.0),
                electrical_resistivity_ohm_m: Some(1.0e-2),
                dielectric_constant: Some(9.7),
                ..Default::default()
            },
        ),
        entry(
            "zirconia",
            "Yttria-Stabilized Zirconia",
            Ceramic,
            &[("ZrO2", 97.0), ("Y2O3", 3.0)],
            BaseProperties {
                tensile_strength_mpa: Some(900.0),
                elastic_modulus_gpa: Some(200.0),
                density_kg_m3: Some(6050.0),
                melting_point_c: Some(2715.0),
                thermal_conductivity_w_mk: Some(2.0),
                thermal_expansion_per_k: Some(10.5e-6),
                specific_heat_j_kgk: Some(450.0),
                electrical_resistivity_ohm_m: Some(1.0e14),
                dielectric_constant: Some(25.0),
                ..Default::default()
            },
        ),
        // No single melting point: mechanical and thermal requests fail.
        entry(
            "carbon_fiber_epoxy",
            "Carbon Fiber Reinforced Epoxy",
            Composite,
            &[("Carbon_Fiber", 60.0), ("Epoxy_Resin", 40.0)],
            BaseProperties {
                tensile_strength_mpa: Some(1500.0),
                elastic_modulus_gpa: Some(150.0),
                density_kg_m3: Some(1550.0),
                thermal_conductivity_w_mk: Some(1.0),
                thermal_expansion_per_k: Some(2.0e-6),
                specific_heat_j_kgk: Some(1100.0),
                electrical_resistivity_ohm_m: Some(1.0e-4),
                ..Default::default()
            },
        ),
        // Wafer-grade semiconductors: no tensile strength on record.
        entry(
            "silicon",
            "Monocrystalline Silicon",
            Semiconductor,
            &[("Si", 100.0)],
            BaseProperties {
                elastic_modulus_gpa: Some(130.0),
                density_kg_m3: Some(2330.0),
                melting_point_c: Some(1414.0),
                thermal_conductivity_w_mk: Some(149.0),
                thermal_expansion_per_k: Some(2.6e-6),
                specific_heat_j_kgk: Some(705.0),
                electrical_resistivity_ohm_m: Some(641.0),
                dielectric_constant: Some(11.7),
                band_gap_ev: Some(1.17),
                ..Default::default()
            },
        ),
        entry(
            "gallium_arsenide",
            "Gallium Arsenide",
            Semiconductor,
            &[("Ga", 48.2), ("As", 51.8)],
            BaseProperties {
                elastic_modulus_gpa: Some(85.0),
                density_kg_m3: Some(5320.0),
                melting_point_c: Some(1238.0),
                thermal_conductivity_w_mk: Some(55.0),
                thermal_expansion_per_k: Some(5.73e-6),
                specific_heat_j_kgk: Some(330.0),
                electrical_resistivity_ohm_m: Some(1.0e6),
                dielectric_constant: Some(12.9),
                band_gap_ev: Some(1.519),
                ..Default::default()
            },
        ),
    ]
}

static REFERENCE_MATERIALS: Lazy<BTreeMap<String, BaseMaterial>> = Lazy::new(|| {
    reference_materials()
        .into_iter()
        .map(|m| (normalize_id(&m.id), m))
        .collect()
});

/// Built-in catalog of common engineering materials.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceCatalog;

impl MaterialCatalog for ReferenceCatalog {
    fn resolve_material(&self, id: &str) -> EngineResult<BaseMaterial> {
        REFERENCE_MATERIALS
            .get(&normalize_id(id))
            .cloned()
            .ok_or_else(|| EngineError::not_found(id))
    }

    fn material_ids(&self) -> Vec<String> {
        REFERENCE_MATERIALS.keys().cloned().collect()
    }
}

// ============================================================================
// In-memory catalog
// ============================================================================

/// Caller-populated catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    materials: HashMap<String, BaseMaterial>,
}

impl InMemoryCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a material, keyed by its normalized id
    pub fn insert(&mut self, material: BaseMaterial) {
        self.materials.insert(normalize_id(&material.id), material);
    }

    /// Builder: add a material
    pub fn with_material(mut self, material: BaseMaterial) -> Self {
        self.insert(material);
        self
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<BaseMaterial> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = BaseMaterial>>(iter: I) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for material in iter {
            catalog.insert(material);
        }
        catalog
    }
}

impl MaterialCatalog for InMemoryCatalog {
    fn resolve_material(&self, id: &str) -> EngineResult<BaseMaterial> {
        self.materials
            .get(&normalize_id(id))
            .cloned()
            .ok_or_else(|| EngineError::not_found(id))
    }

    fn material_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.materials.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Property;

    #[test]
    fn test_reference_lookup() {
        let steel = ReferenceCatalog.resolve_material("steel_316l").unwrap();
        assert_eq!(steel.name, "Stainless Steel 316L");
        assert_eq!(steel.properties.tensile_strength_mpa, Some(580.0));
        assert_eq!(steel.composition.get("Cr"), Some(&17.0));
    }

    #[test]
    fn test_lookup_is_case_and_separator_insensitive() {
        let a = ReferenceCatalog.resolve_material("Steel-316L").unwrap();
        let b = ReferenceCatalog.resolve_material(" steel 316l ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_not_found() {
        let err = ReferenceCatalog.resolve_material("unobtainium").unwrap_err();
        assert_eq!(err, EngineError::not_found("unobtainium"));
    }

    #[test]
    fn test_reference_ids_sorted_and_complete() {
        let ids = ReferenceCatalog.material_ids();
        assert_eq!(ids.len(), 13);
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert!(ids.contains(&"silicon".to_string()));
    }

    #[test]
    fn test_every_reference_material_has_resistivity() {
        for id in ReferenceCatalog.material_ids() {
            let mat = ReferenceCatalog.resolve_material(&id).unwrap();
            assert!(mat.optional(Property::ElectricalResistivity).is_some(), "{}", id);
        }
    }

    #[test]
    fn test_semiconductors_carry_band_gap() {
        let si = ReferenceCatalog.resolve_material("silicon").unwrap();
        assert_eq!(si.category, MaterialCategory::Semiconductor);
        assert_eq!(si.properties.band_gap_ev, Some(1.17));
        assert_eq!(si.properties.tensile_strength_mpa, None);
    }

    #[test]
    fn test_in_memory_catalog() {
        let catalog: InMemoryCatalog = [BaseMaterial::new("Test-Alloy", "Test Alloy", MaterialCategory::Metal)]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.resolve_material("test_alloy").is_ok());
        assert_eq!(catalog.material_ids(), vec!["test_alloy".to_string()]);
        assert!(catalog.resolve_material("other").is_err());
    }
}
