//! Simulation results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::request::SimulationType;
use crate::conditions::SimulationConditions;
use crate::materials::MaterialOrigin;
use crate::predictors::{ChemicalProperties, Domain, ElectricalProfile, MechanicalProperties, ThermalProperties};

/// One optional record per domain; only requested domains are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictedProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanical: Option<MechanicalProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal: Option<ThermalProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical: Option<ElectricalProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical: Option<ChemicalProperties>,
}

impl PredictedProperties {
    /// Named scalar outputs of one domain (empty if the domain was not run)
    pub fn scalar_fields(&self, domain: Domain) -> Vec<(&'static str, f64)> {
        match domain {
            Domain::Mechanical => self.mechanical.as_ref().map(|p| p.scalar_fields()),
            Domain::Thermal => self.thermal.as_ref().map(|p| p.scalar_fields()),
            Domain::Electrical => self.electrical.as_ref().map(|p| p.scalar_fields()),
            Domain::Chemical => self.chemical.as_ref().map(|p| p.scalar_fields()),
        }
        .unwrap_or_default()
    }

    /// Domains with a record
    pub fn domains(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|d| !self.scalar_fields(*d).is_empty())
            .collect()
    }
}

/// Symmetric relative-tolerance interval around a point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyBand {
    pub estimate: f64,
    pub min: f64,
    pub max: f64,
    /// Half-width as a fraction of |estimate|
    pub relative_tolerance: f64,
}

impl UncertaintyBand {
    /// Band of ±|estimate|·tolerance
    pub fn around(estimate: f64, relative_tolerance: f64) -> Self {
        let half_width = estimate.abs() * relative_tolerance;
        UncertaintyBand {
            estimate,
            min: estimate - half_width,
            max: estimate + half_width,
            relative_tolerance,
        }
    }

    /// Whether a value lies inside the band (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Full outcome of one simulation.
///
/// Uncertainty bands are keyed `"<domain>.<field>"`, e.g.
/// `"mechanical.tensile_strength_mpa"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub material_id: String,
    pub material_name: String,
    pub origin: MaterialOrigin,
    pub simulation_type: SimulationType,

    /// Conditions with every default filled in
    pub conditions: SimulationConditions,

    pub properties: PredictedProperties,

    /// Aggregate confidence in [0, 1]
    pub confidence: f64,

    /// Confidence per evaluated domain
    pub domain_confidence: BTreeMap<Domain, f64>,

    pub uncertainty: BTreeMap<String, UncertaintyBand>,

    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

impl SimulationResult {
    /// Band for `"<domain>.<field>"`
    pub fn band(&self, domain: Domain, field: &str) -> Option<&UncertaintyBand> {
        self.uncertainty.get(&band_key(domain, field))
    }
}

/// Key under which a band is stored
pub fn band_key(domain: Domain, field: &str) -> String {
    format!("{}.{}", domain.key(), field)
}
