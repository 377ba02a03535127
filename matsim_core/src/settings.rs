//! # Engine Settings
//!
//! Heuristic constants used by the predictors and the confidence model.
//! These are calibration defaults, not per-material physical constants:
//! the Norton–Bailey exponent, the creep activation energy and the Varshni
//! coefficients are the same for every material unless a caller overrides
//! them here.
//!
//! Settings serialize to JSON and every field has a default, so a partial
//! document only overrides what it names:
//!
//! ```rust
//! use matsim_core::settings::SimulationSettings;
//!
//! let settings: SimulationSettings =
//!     serde_json::from_str(r#"{ "creep": { "stress_exponent": 4.0 } }"#).unwrap();
//! assert_eq!(settings.creep.stress_exponent, 4.0);
//! assert_eq!(settings.creep.activation_energy_j_mol, 300_000.0);
//! assert_eq!(settings.lorenz_number, 2.44e-8);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::predictors::Domain;

/// Universal gas constant R (J/mol·K)
pub const GAS_CONSTANT: f64 = 8.314;

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// All tunable constants for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Norton–Bailey creep model
    pub creep: CreepSettings,

    /// Basquin fatigue model
    pub fatigue: FatigueSettings,

    /// Varshni band-gap model
    pub varshni: VarshniSettings,

    /// Lorenz number L (W·Ω/K²) for the Wiedemann–Franz law
    pub lorenz_number: f64,

    /// Ductile-to-brittle transition temperature (°C)
    pub dbtt_c: f64,

    /// Per-domain confidence baselines, floors and base tolerances
    pub confidence: ConfidenceSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            creep: CreepSettings::default(),
            fatigue: FatigueSettings::default(),
            varshni: VarshniSettings::default(),
            lorenz_number: 2.44e-8,
            dbtt_c: -50.0,
            confidence: ConfidenceSettings::default(),
        }
    }
}

impl SimulationSettings {
    /// Reject settings that would make the formulas meaningless.
    pub fn validate(&self) -> EngineResult<()> {
        if self.fatigue.basquin_exponent >= 0.0 {
            return Err(EngineError::invalid_request(
                "settings.fatigue.basquin_exponent",
                "Basquin exponent must be negative",
            ));
        }
        if self.creep.activation_energy_j_mol <= 0.0 || self.creep.coefficient < 0.0 {
            return Err(EngineError::invalid_request(
                "settings.creep",
                "Activation energy must be positive and the creep coefficient non-negative",
            ));
        }
        if self.varshni.beta <= 0.0 {
            return Err(EngineError::invalid_request(
                "settings.varshni.beta",
                "Varshni beta must be positive",
            ));
        }
        for domain in Domain::ALL {
            let cal = self.confidence.for_domain(domain);
            let ordered = 0.0 <= cal.floor && cal.floor <= cal.baseline && cal.baseline <= 1.0;
            if !ordered || cal.base_tolerance < 0.0 {
                return Err(EngineError::invalid_request(
                    format!("settings.confidence.{}", domain.key()),
                    "Expected 0 <= floor <= baseline <= 1 and a non-negative tolerance",
                ));
            }
        }
        Ok(())
    }
}

/// Norton–Bailey power-law creep: ε̇ = A·σⁿ·exp(−Q/RT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreepSettings {
    /// Pre-exponential coefficient A (1/s per MPaⁿ)
    pub coefficient: f64,
    /// Stress exponent n
    pub stress_exponent: f64,
    /// Activation energy Q (J/mol)
    pub activation_energy_j_mol: f64,
    /// Creep stress as a fraction of the predicted tensile strength
    pub stress_ratio: f64,
    /// Homologous temperature below which creep is treated as zero
    pub onset_homologous: f64,
}

impl Default for CreepSettings {
    fn default() -> Self {
        CreepSettings {
            coefficient: 1.0e-10,
            stress_exponent: 5.0,
            activation_energy_j_mol: 300_000.0,
            stress_ratio: 0.5,
            onset_homologous: 0.4,
        }
    }
}

/// Basquin high-cycle fatigue: σ_a = σ_f'·N^b
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueSettings {
    /// Basquin exponent b (negative)
    pub basquin_exponent: f64,
    /// Fatigue strength coefficient σ_f' as a multiple of tensile strength
    pub strength_coefficient_ratio: f64,
    /// Stress amplitude as a fraction of tensile strength
    pub amplitude_ratio: f64,
}

impl Default for FatigueSettings {
    fn default() -> Self {
        FatigueSettings {
            basquin_exponent: -0.1,
            strength_coefficient_ratio: 1.5,
            amplitude_ratio: 0.5,
        }
    }
}

/// Varshni relation: E_g(T) = E_g0 − αT²/(T + β)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarshniSettings {
    /// Band gap at 0 K (eV), used when the material has none
    pub eg0_ev: f64,
    /// α (eV/K)
    pub alpha: f64,
    /// β (K)
    pub beta: f64,
}

impl Default for VarshniSettings {
    fn default() -> Self {
        VarshniSettings {
            eg0_ev: 1.5,
            alpha: 5.0e-4,
            beta: 300.0,
        }
    }
}

/// Confidence calibration for a single domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainCalibration {
    /// Confidence at standard conditions
    pub baseline: f64,
    /// Lowest confidence ever reported
    pub floor: f64,
    /// Relative uncertainty at standard conditions
    pub base_tolerance: f64,
}

/// Per-domain calibration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub mechanical: DomainCalibration,
    pub thermal: DomainCalibration,
    pub electrical: DomainCalibration,
    pub chemical: DomainCalibration,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        ConfidenceSettings {
            mechanical: DomainCalibration {
                baseline: 0.8,
                floor: 0.2,
                base_tolerance: 0.15,
            },
            thermal: DomainCalibration {
                baseline: 0.85,
                floor: 0.3,
                base_tolerance: 0.12,
            },
            electrical: DomainCalibration {
                baseline: 0.75,
                floor: 0.3,
                base_tolerance: 0.18,
            },
            chemical: DomainCalibration {
                baseline: 0.7,
                floor: 0.4,
                base_tolerance: 0.25,
            },
        }
    }
}

impl ConfidenceSettings {
    /// Calibration for one domain
    pub fn for_domain(&self, domain: Domain) -> DomainCalibration {
        match domain {
            Domain::Mechanical => self.mechanical,
            Domain::Thermal => self.thermal,
            Domain::Electrical => self.electrical,
            Domain::Chemical => self.chemical,
        }
    }
}
