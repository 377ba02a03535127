//! The orchestrator: resolve the material once, dispatch to the requested
//! predictors, then score, band and annotate the results.
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::simulation::{simulate, SimulationRequest, SimulationType};
//!
//! let request = SimulationRequest::for_material("aluminum_6061", SimulationType::Mechanical);
//! let result = simulate(&request).unwrap();
//!
//! let mech = result.properties.mechanical.as_ref().unwrap();
//! assert!(mech.tensile_strength_mpa > 300.0);
//! assert!(result.properties.thermal.is_none());
//! ```

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::advisories::{self, Advisories};
use super::confidence::{self, DomainAssessment};
use super::request::{MaterialSource, SimulationRequest};
use super::result::{band_key, PredictedProperties, SimulationResult, UncertaintyBand};
use crate::conditions::SimulationConditions;
use crate::errors::EngineResult;
use crate::materials::estimator;
use crate::materials::{BaseMaterial, MaterialCatalog, ReferenceCatalog};
use crate::predictors::{chemical, electrical, mechanical, thermal, Domain};
use crate::settings::SimulationSettings;

/// A simulation engine bound to one catalog and one set of settings.
///
/// Holds no mutable state; a single engine can serve any number of
/// concurrent `simulate` calls.
#[derive(Debug, Clone)]
pub struct Engine<C: MaterialCatalog = ReferenceCatalog> {
    catalog: C,
    settings: SimulationSettings,
}

impl Default for Engine<ReferenceCatalog> {
    fn default() -> Self {
        Engine::new(ReferenceCatalog)
    }
}

impl<C: MaterialCatalog> Engine<C> {
    /// Engine with default settings
    pub fn new(catalog: C) -> Self {
        Engine {
            catalog,
            settings: SimulationSettings::default(),
        }
    }

    /// Engine with custom settings, rejected if they are inconsistent
    pub fn with_settings(catalog: C, settings: SimulationSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Engine { catalog, settings })
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolve the request's material source into a base record
    pub fn resolve(&self, request: &SimulationRequest) -> EngineResult<BaseMaterial> {
        match request.material_source()? {
            MaterialSource::Catalog(id) => self.catalog.resolve_material(id),
            MaterialSource::Composition(spec) => estimator::estimate(spec),
        }
    }

    /// Run one simulation.
    ///
    /// Fails as a whole if any requested domain cannot be predicted; a result
    /// is never partially populated.
    #[instrument(skip(self, request), fields(simulation_type = %request.simulation_type))]
    pub fn simulate(&self, request: &SimulationRequest) -> EngineResult<SimulationResult> {
        request.validate()?;
        let material = self.resolve(request)?;
        let conditions = request.effective_conditions().resolved();

        debug!(
            material = %material.id,
            origin = ?material.origin,
            environment = %conditions.environment(),
            temperature_c = conditions.temperature_c,
            "dispatching simulation"
        );

        let mut properties = PredictedProperties::default();
        let mut advice = Advisories::new();
        for domain in request.simulation_type.domains() {
            self.predict_domain(*domain, &material, &conditions, &mut properties, &mut advice)?;
        }

        let assessments: Vec<DomainAssessment> = request
            .simulation_type
            .domains()
            .iter()
            .map(|d| confidence::assess(*d, &material, &conditions, &self.settings))
            .collect();
        let overall = confidence::aggregate(request.simulation_type, &assessments);

        let mut uncertainty = BTreeMap::new();
        for assessment in &assessments {
            for (field, value) in properties.scalar_fields(assessment.domain) {
                uncertainty.insert(
                    band_key(assessment.domain, field),
                    UncertaintyBand::around(value, assessment.relative_tolerance),
                );
            }
        }

        advisories::general(&mut advice, &material, overall);
        let (recommendations, warnings) = advice.into_parts();

        debug!(confidence = overall, warnings = warnings.len(), "simulation complete");

        Ok(SimulationResult {
            material_id: material.id.clone(),
            material_name: material.name.clone(),
            origin: material.origin,
            simulation_type: request.simulation_type,
            conditions,
            properties,
            confidence: overall,
            domain_confidence: assessments.iter().map(|a| (a.domain, a.confidence)).collect(),
            uncertainty,
            recommendations,
            warnings,
        })
    }

    fn predict_domain(
        &self,
        domain: Domain,
        material: &BaseMaterial,
        conditions: &SimulationConditions,
        properties: &mut PredictedProperties,
        advice: &mut Advisories,
    ) -> EngineResult<()> {
        let settings = &self.settings;
        match domain {
            Domain::Mechanical => {
                let props = mechanical::predict(material, conditions, settings)?;
                advisories::mechanical(advice, &props, material, conditions, settings);
                properties.mechanical = Some(props);
            }
            Domain::Thermal => {
                let props = thermal::predict(material, conditions, settings)?;
                advisories::thermal(advice, &props, material, conditions);
                properties.thermal = Some(props);
            }
            Domain::Electrical => {
                let props = electrical::predict(material, conditions, settings)?;
                advisories::electrical(advice, &props, conditions);
                properties.electrical = Some(props);
            }
            Domain::Chemical => {
                let props = chemical::predict(material, conditions, settings)?;
                advisories::chemical(advice, &props, conditions);
                properties.chemical = Some(props);
            }
        }
        Ok(())
    }
}

/// Simulate against the reference catalog with default settings.
pub fn simulate(request: &SimulationRequest) -> EngineResult<SimulationResult> {
    Engine::default().simulate(request)
}
