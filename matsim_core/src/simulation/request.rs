//! Simulation requests.
//!
//! A request names exactly one material source (a catalog id or an explicit
//! composition), which domains to predict, and optional conditions.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "material_id": "steel_316l",
//!   "simulation_type": "comprehensive",
//!   "conditions": { "temperature_c": 450.0, "environment": "seawater" }
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conditions::SimulationConditions;
use crate::errors::{EngineError, EngineResult};
use crate::predictors::Domain;

pub use crate::materials::estimator::CompositionSpec;

/// Which predictors a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SimulationType {
    Mechanical,
    Thermal,
    Electrical,
    Chemical,
    /// All four domains
    Comprehensive,
}

impl SimulationType {
    /// All simulation types, as listed in parse errors
    pub const ALL: [SimulationType; 5] = [
        SimulationType::Mechanical,
        SimulationType::Thermal,
        SimulationType::Electrical,
        SimulationType::Chemical,
        SimulationType::Comprehensive,
    ];

    /// Domains dispatched for this type, in dispatch order
    pub fn domains(&self) -> &'static [Domain] {
        match self {
            SimulationType::Mechanical => &[Domain::Mechanical],
            SimulationType::Thermal => &[Domain::Thermal],
            SimulationType::Electrical => &[Domain::Electrical],
            SimulationType::Chemical => &[Domain::Chemical],
            SimulationType::Comprehensive => &Domain::ALL,
        }
    }

    /// Parse from a loose string ("Mechanical", "full", "all", ...)
    pub fn from_str_flexible(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "mechanical" | "mech" => Ok(SimulationType::Mechanical),
            "thermal" => Ok(SimulationType::Thermal),
            "electrical" | "elec" => Ok(SimulationType::Electrical),
            "chemical" | "chem" => Ok(SimulationType::Chemical),
            "comprehensive" | "full" | "all" => Ok(SimulationType::Comprehensive),
            _ => {
                let expected: Vec<&str> = SimulationType::ALL.iter().map(|t| t.key()).collect();
                Err(EngineError::invalid_request(
                    "simulation_type",
                    format!("Unknown simulation type '{}', expected one of: {}", s, expected.join(", ")),
                ))
            }
        }
    }

    /// Lowercase key
    pub fn key(&self) -> &'static str {
        match self {
            SimulationType::Mechanical => "mechanical",
            SimulationType::Thermal => "thermal",
            SimulationType::Electrical => "electrical",
            SimulationType::Chemical => "chemical",
            SimulationType::Comprehensive => "comprehensive",
        }
    }
}

impl FromStr for SimulationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimulationType::from_str_flexible(s)
    }
}

impl TryFrom<String> for SimulationType {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        SimulationType::from_str_flexible(&s)
    }
}

impl std::fmt::Display for SimulationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Borrowed view of the single material source in a valid request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialSource<'a> {
    /// Resolve through the catalog
    Catalog(&'a str),
    /// Estimate from a composition
    Composition(&'a CompositionSpec),
}

/// One simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Catalog identifier; mutually exclusive with `composition`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,

    /// Explicit composition; mutually exclusive with `material_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<CompositionSpec>,

    pub simulation_type: SimulationType,

    /// Operating conditions; standard conditions when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<SimulationConditions>,
}

impl SimulationRequest {
    /// Request for a catalog material at standard conditions
    pub fn for_material(material_id: impl Into<String>, simulation_type: SimulationType) -> Self {
        SimulationRequest {
            material_id: Some(material_id.into()),
            composition: None,
            simulation_type,
            conditions: None,
        }
    }

    /// Request for an estimated material at standard conditions
    pub fn for_composition(composition: CompositionSpec, simulation_type: SimulationType) -> Self {
        SimulationRequest {
            material_id: None,
            composition: Some(composition),
            simulation_type,
            conditions: None,
        }
    }

    /// Builder: set conditions
    pub fn with_conditions(mut self, conditions: SimulationConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// The one material source, or `InvalidRequest` if zero or two are given
    pub fn material_source(&self) -> EngineResult<MaterialSource<'_>> {
        match (&self.material_id, &self.composition) {
            (Some(id), None) => {
                if id.trim().is_empty() {
                    return Err(EngineError::invalid_request(
                        "material_id",
                        "Material id cannot be empty",
                    ));
                }
                Ok(MaterialSource::Catalog(id))
            }
            (None, Some(spec)) => Ok(MaterialSource::Composition(spec)),
            (Some(_), Some(_)) => Err(EngineError::invalid_request(
                "material_id",
                "Provide either material_id or composition, not both",
            )),
            (None, None) => Err(EngineError::invalid_request(
                "material_id",
                "Either material_id or composition is required",
            )),
        }
    }

    /// Conditions as given, or standard conditions
    pub fn effective_conditions(&self) -> SimulationConditions {
        self.conditions.clone().unwrap_or_default()
    }

    /// Validate source and conditions without resolving anything
    pub fn validate(&self) -> EngineResult<()> {
        self.material_source()?;
        self.effective_conditions().validate()
    }
}
