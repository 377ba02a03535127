//! # Materials
//!
//! Baseline material records consumed by the predictors, and the two ways of
//! obtaining one: catalog lookup ([`catalog`]) or estimation from an element
//! composition ([`estimator`]).
//!
//! A [`BaseMaterial`] is an immutable snapshot. Its scalar properties are all
//! optional because catalog entries are incomplete in practice (a composite
//! has no single melting point, a wafer-grade semiconductor often has no
//! published tensile strength). Predictors ask for what they need through
//! [`BaseMaterial::require`], which turns a gap into
//! [`EngineError::IncompleteMaterial`] instead of a silent zero.
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::materials::{BaseMaterial, BaseProperties, MaterialCategory, Property};
//! use matsim_core::predictors::Domain;
//!
//! let mat = BaseMaterial::new("demo", "Demo Alloy", MaterialCategory::Metal).with_properties(
//!     BaseProperties {
//!         tensile_strength_mpa: Some(500.0),
//!         ..Default::default()
//!     },
//! );
//!
//! assert_eq!(mat.require(Domain::Mechanical, Property::TensileStrength).unwrap(), 500.0);
//! assert!(mat.require(Domain::Mechanical, Property::MeltingPoint).is_err());
//! ```

pub mod catalog;
pub mod elements;
pub mod estimator;

pub use catalog::{InMemoryCatalog, MaterialCatalog, ReferenceCatalog};
pub use estimator::{CompositionEntry, ElementRole, ProcessingMethod};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::predictors::Domain;

/// Broad material class; selects regime-specific formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Metal,
    Polymer,
    Ceramic,
    Composite,
    Semiconductor,
}

impl MaterialCategory {
    /// All categories for iteration
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Metal,
        MaterialCategory::Polymer,
        MaterialCategory::Ceramic,
        MaterialCategory::Composite,
        MaterialCategory::Semiconductor,
    ];

    /// Poisson's ratio typical of the class
    pub fn poisson_ratio(&self) -> f64 {
        match self {
            MaterialCategory::Metal => 0.30,
            MaterialCategory::Polymer => 0.40,
            MaterialCategory::Ceramic => 0.22,
            MaterialCategory::Composite => 0.30,
            MaterialCategory::Semiconductor => 0.28,
        }
    }

    /// Debye temperature typical of the class (K)
    pub fn debye_temperature_k(&self) -> f64 {
        match self {
            MaterialCategory::Metal => 400.0,
            MaterialCategory::Polymer => 300.0,
            MaterialCategory::Ceramic => 1000.0,
            MaterialCategory::Composite => 500.0,
            MaterialCategory::Semiconductor => 645.0,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Metal => "metal",
            MaterialCategory::Polymer => "polymer",
            MaterialCategory::Ceramic => "ceramic",
            MaterialCategory::Composite => "composite",
            MaterialCategory::Semiconductor => "semiconductor",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a base record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaterialOrigin {
    /// Curated catalog values
    #[default]
    Catalog,
    /// Synthesized from a composition (low confidence)
    Estimated,
}

/// Baseline scalar properties at standard conditions (25 °C, 0.1 MPa, air).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseProperties {
    /// Ultimate tensile strength (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength_mpa: Option<f64>,
    /// Yield strength (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_strength_mpa: Option<f64>,
    /// Young's modulus (GPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus_gpa: Option<f64>,
    /// Density (kg/m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    /// Melting or decomposition point (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melting_point_c: Option<f64>,
    /// Thermal conductivity (W/m·K)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_conductivity_w_mk: Option<f64>,
    /// Linear thermal expansion coefficient (1/K)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_expansion_per_k: Option<f64>,
    /// Specific heat capacity (J/kg·K)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_heat_j_kgk: Option<f64>,
    /// Electrical resistivity (Ω·m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_resistivity_ohm_m: Option<f64>,
    /// Relative permittivity (insulators)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dielectric_constant: Option<f64>,
    /// Band gap at 0 K (eV, semiconductors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_gap_ev: Option<f64>,
}

/// Named scalar fields of [`BaseProperties`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    TensileStrength,
    YieldStrength,
    ElasticModulus,
    Density,
    MeltingPoint,
    ThermalConductivity,
    ThermalExpansion,
    SpecificHeat,
    ElectricalResistivity,
    DielectricConstant,
    BandGap,
}

impl Property {
    /// Field name as it appears in JSON
    pub fn field_name(&self) -> &'static str {
        match self {
            Property::TensileStrength => "tensile_strength_mpa",
            Property::YieldStrength => "yield_strength_mpa",
            Property::ElasticModulus => "elastic_modulus_gpa",
            Property::Density => "density_kg_m3",
            Property::MeltingPoint => "melting_point_c",
            Property::ThermalConductivity => "thermal_conductivity_w_mk",
            Property::ThermalExpansion => "thermal_expansion_per_k",
            Property::SpecificHeat => "specific_heat_j_kgk",
            Property::ElectricalResistivity => "electrical_resistivity_ohm_m",
            Property::DielectricConstant => "dielectric_constant",
            Property::BandGap => "band_gap_ev",
        }
    }

    /// Read this field from a property record
    pub fn get(&self, props: &BaseProperties) -> Option<f64> {
        match self {
            Property::TensileStrength => props.tensile_strength_mpa,
            Property::YieldStrength => props.yield_strength_mpa,
            Property::ElasticModulus => props.elastic_modulus_gpa,
            Property::Density => props.density_kg_m3,
            Property::MeltingPoint => props.melting_point_c,
            Property::ThermalConductivity => props.thermal_conductivity_w_mk,
            Property::ThermalExpansion => props.thermal_expansion_per_k,
            Property::SpecificHeat => props.specific_heat_j_kgk,
            Property::ElectricalResistivity => props.electrical_resistivity_ohm_m,
            Property::DielectricConstant => props.dielectric_constant,
            Property::BandGap => props.band_gap_ev,
        }
    }
}

/// Baseline material record.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "aluminum_6061",
///   "name": "Aluminum 6061-T6",
///   "category": "metal",
///   "composition": { "Al": 97.9, "Mg": 1.0, "Si": 0.6, "Cu": 0.3, "Cr": 0.2 },
///   "origin": "catalog",
///   "properties": { "tensile_strength_mpa": 310.0, "melting_point_c": 652.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMaterial {
    /// Catalog identifier (or a synthetic id for estimated materials)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Material class
    pub category: MaterialCategory,

    /// Element symbol (or compound formula) → percentage; need not sum to 100
    #[serde(default)]
    pub composition: BTreeMap<String, f64>,

    /// Crystal/structure tag (e.g. "fcc", "bcc", "amorphous")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,

    /// Processing route, for estimated materials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<ProcessingMethod>,

    /// Catalog or estimated
    #[serde(default)]
    pub origin: MaterialOrigin,

    /// Baseline scalar properties
    pub properties: BaseProperties,
}

impl BaseMaterial {
    /// Create a catalog-origin material with no properties set
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: MaterialCategory) -> Self {
        BaseMaterial {
            id: id.into(),
            name: name.into(),
            category,
            composition: BTreeMap::new(),
            structure: None,
            processing: None,
            origin: MaterialOrigin::Catalog,
            properties: BaseProperties::default(),
        }
    }

    /// Builder: set baseline properties
    pub fn with_properties(mut self, properties: BaseProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Builder: set composition from (symbol, percentage) pairs
    pub fn with_composition<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        self.composition = entries
            .into_iter()
            .map(|(symbol, pct)| (symbol.to_string(), pct))
            .collect();
        self
    }

    /// Fetch a property the given domain cannot do without.
    ///
    /// Missing or non-finite values fail with `IncompleteMaterial`.
    pub fn require(&self, domain: Domain, property: Property) -> EngineResult<f64> {
        match property.get(&self.properties) {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(EngineError::incomplete_material(
                &self.id,
                domain.key(),
                property.field_name(),
            )),
        }
    }

    /// Fetch an optional property (non-finite values count as absent)
    pub fn optional(&self, property: Property) -> Option<f64> {
        property.get(&self.properties).filter(|v| v.is_finite())
    }

    /// Whether this record was synthesized from a composition
    pub fn is_estimated(&self) -> bool {
        self.origin == MaterialOrigin::Estimated
    }
}
