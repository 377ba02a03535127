//! # matsim_core - Material Property Simulation Engine
//!
//! `matsim_core` predicts how a material's mechanical, thermal, electrical and
//! chemical properties shift under operating conditions (temperature,
//! pressure, chemical environment, loading), and reports each prediction with
//! a confidence score, uncertainty bands and rule-based advisories.
//!
//! Predictions are closed-form empirical correlations, not finite-element or
//! molecular simulation. Every output is a point estimate with heuristic
//! uncertainty.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `simulate` is a pure function of its request
//! - **JSON-First**: requests, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, never a partially filled result
//! - **Deterministic**: no randomness, identical inputs give identical outputs
//!
//! ## Quick Start
//!
//! ```rust
//! use matsim_core::conditions::{Environment, SimulationConditions};
//! use matsim_core::simulation::{simulate, SimulationRequest, SimulationType};
//!
//! let request = SimulationRequest::for_material("steel_316l", SimulationType::Comprehensive)
//!     .with_conditions(SimulationConditions::at_temperature(400.0).with_environment(Environment::Seawater));
//!
//! let result = simulate(&request).unwrap();
//! assert!(result.confidence > 0.0 && result.confidence <= 1.0);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("corrosion_rate_mm_yr"));
//! ```
//!
//! ## Modules
//!
//! - [`simulation`] - requests, results and the orchestrating [`Engine`]
//! - [`predictors`] - one pure predictor per physical domain
//! - [`materials`] - base material records, catalog lookup, composition estimation
//! - [`conditions`] - operating conditions and their defaults
//! - [`settings`] - tunable model constants
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod conditions;
pub mod errors;
pub mod materials;
pub mod predictors;
pub mod settings;
pub mod simulation;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use conditions::{Environment, LoadingType, SimulationConditions};
pub use errors::{EngineError, EngineResult};
pub use materials::{BaseMaterial, MaterialCatalog, MaterialCategory, ReferenceCatalog};
pub use settings::SimulationSettings;
pub use simulation::{simulate, Engine, SimulationRequest, SimulationResult, SimulationType};
