//! # Simulation
//!
//! Request in, result out. [`Engine::simulate`] is the only operation; the
//! free function [`simulate`] runs it against the built-in reference catalog.
//!
//! - [`request`] - `SimulationRequest`, `SimulationType`, `MaterialSource`
//! - [`result`] - `SimulationResult`, `PredictedProperties`, `UncertaintyBand`
//! - [`confidence`] - per-domain confidence and band tolerance
//! - [`advisories`] - threshold rules producing recommendations and warnings
//! - [`engine`] - the orchestrator

pub mod advisories;
pub mod confidence;
pub mod engine;
pub mod request;
pub mod result;

pub use engine::{simulate, Engine};
pub use request::{CompositionSpec, MaterialSource, SimulationRequest, SimulationType};
pub use result::{PredictedProperties, SimulationResult, UncertaintyBand};
