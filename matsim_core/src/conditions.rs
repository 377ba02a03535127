//! # Operating Conditions
//!
//! Environmental inputs to a simulation. Only temperature and pressure are
//! always present; the rest fall back to engine defaults:
//!
//! | Field        | Default |
//! |--------------|---------|
//! | temperature  | 25 °C   |
//! | pressure     | 0.1 MPa |
//! | humidity     | 50 %    |
//! | environment  | air     |
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "temperature_c": 600.0,
//!   "pressure_mpa": 50.0,
//!   "environment": "seawater",
//!   "loading": "cyclic",
//!   "frequency_hz": 10.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::units::{Celsius, GigaPascals, Kelvin, MegaPascals, KELVIN_OFFSET};

/// Standard temperature (°C)
pub const STANDARD_TEMPERATURE_C: f64 = 25.0;

/// Standard pressure (MPa)
pub const STANDARD_PRESSURE_MPA: f64 = 0.1;

/// Default relative humidity (%)
pub const DEFAULT_HUMIDITY_PCT: f64 = 50.0;

/// Hottest accepted operating temperature (°C), well above any solid's melting point
pub const MAX_TEMPERATURE_C: f64 = 10_000.0;

/// Highest accepted pressure (MPa), 100 GPa
pub const MAX_PRESSURE_MPA: f64 = 100_000.0;

/// Largest accepted applied strain (%)
pub const MAX_STRAIN_PCT: f64 = 1_000.0;

/// Chemical environment the material is exposed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Air,
    Vacuum,
    Seawater,
    Acidic,
    Basic,
}

impl Environment {
    /// All environments for iteration
    pub const ALL: [Environment; 5] = [
        Environment::Air,
        Environment::Vacuum,
        Environment::Seawater,
        Environment::Acidic,
        Environment::Basic,
    ];

    /// Representative pH of the environment, if it is aqueous
    pub fn nominal_ph(&self) -> Option<f64> {
        match self {
            Environment::Air | Environment::Vacuum => None,
            Environment::Seawater => Some(8.1),
            Environment::Acidic => Some(2.0),
            Environment::Basic => Some(12.0),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Air => "air",
            Environment::Vacuum => "vacuum",
            Environment::Seawater => "seawater",
            Environment::Acidic => "acidic",
            Environment::Basic => "basic",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the load is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingType {
    Tensile,
    Compressive,
    Shear,
    Cyclic,
    Impact,
}

impl LoadingType {
    /// Loads that vary in time (and so reduce prediction confidence)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, LoadingType::Cyclic | LoadingType::Impact)
    }
}

fn default_temperature() -> f64 {
    STANDARD_TEMPERATURE_C
}

fn default_pressure() -> f64 {
    STANDARD_PRESSURE_MPA
}

/// Operating conditions for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConditions {
    /// Operating temperature (°C)
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,

    /// Hydrostatic pressure (MPa)
    #[serde(default = "default_pressure")]
    pub pressure_mpa: f64,

    /// Relative humidity (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,

    /// Applied strain (%), drives the strain-rate factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain_pct: Option<f64>,

    /// Load frequency (Hz), used for fatigue under cyclic loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<f64>,

    /// Chemical environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,

    /// Loading mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<LoadingType>,
}

impl Default for SimulationConditions {
    fn default() -> Self {
        SimulationConditions {
            temperature_c: STANDARD_TEMPERATURE_C,
            pressure_mpa: STANDARD_PRESSURE_MPA,
            humidity_pct: None,
            strain_pct: None,
            frequency_hz: None,
            environment: None,
            loading: None,
        }
    }
}

impl SimulationConditions {
    /// Conditions at a given temperature, everything else standard
    pub fn at_temperature(temperature_c: f64) -> Self {
        SimulationConditions {
            temperature_c,
            ..Default::default()
        }
    }

    /// Builder: set pressure (MPa)
    pub fn with_pressure(mut self, pressure_mpa: f64) -> Self {
        self.pressure_mpa = pressure_mpa;
        self
    }

    /// Builder: set environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Builder: set loading mode
    pub fn with_loading(mut self, loading: LoadingType) -> Self {
        self.loading = Some(loading);
        self
    }

    /// Builder: set load frequency (Hz)
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = Some(frequency_hz);
        self
    }

    /// Builder: set humidity (%)
    pub fn with_humidity(mut self, humidity_pct: f64) -> Self {
        self.humidity_pct = Some(humidity_pct);
        self
    }

    /// Builder: set strain (%)
    pub fn with_strain(mut self, strain_pct: f64) -> Self {
        self.strain_pct = Some(strain_pct);
        self
    }

    /// Validate physical ranges.
    ///
    /// Temperature must lie in `[-273.15, MAX_TEMPERATURE_C]`, pressure in
    /// `[0, MAX_PRESSURE_MPA]` and strain in `[0, MAX_STRAIN_PCT]`; every
    /// prediction stays finite inside these bounds.
    pub fn validate(&self) -> EngineResult<()> {
        if !(-KELVIN_OFFSET..=MAX_TEMPERATURE_C).contains(&self.temperature_c) {
            return Err(EngineError::invalid_request(
                "conditions.temperature_c",
                format!(
                    "Temperature {} must be between absolute zero and {} °C",
                    self.temperature_c, MAX_TEMPERATURE_C
                ),
            ));
        }
        if !(0.0..=MAX_PRESSURE_MPA).contains(&self.pressure_mpa) {
            return Err(EngineError::invalid_request(
                "conditions.pressure_mpa",
                format!("Pressure {} must be between 0 and {} MPa", self.pressure_mpa, MAX_PRESSURE_MPA),
            ));
        }
        if let Some(h) = self.humidity_pct {
            if !(0.0..=100.0).contains(&h) {
                return Err(EngineError::invalid_request(
                    "conditions.humidity_pct",
                    format!("Humidity {} must be between 0 and 100", h),
                ));
            }
        }
        if let Some(s) = self.strain_pct {
            if !(0.0..=MAX_STRAIN_PCT).contains(&s) {
                return Err(EngineError::invalid_request(
                    "conditions.strain_pct",
                    format!("Strain {} must be between 0 and {} %", s, MAX_STRAIN_PCT),
                ));
            }
        }
        if let Some(f) = self.frequency_hz {
            if !f.is_finite() || f <= 0.0 {
                return Err(EngineError::invalid_request(
                    "conditions.frequency_hz",
                    format!("Frequency {} must be positive", f),
                ));
            }
        }
        Ok(())
    }

    /// Copy with every optional default made explicit.
    pub fn resolved(&self) -> Self {
        SimulationConditions {
            humidity_pct: Some(self.humidity()),
            environment: Some(self.environment()),
            ..self.clone()
        }
    }

    /// Humidity (%), defaulted
    pub fn humidity(&self) -> f64 {
        self.humidity_pct.unwrap_or(DEFAULT_HUMIDITY_PCT)
    }

    /// Environment, defaulted to air
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Operating temperature as a typed value
    pub fn temperature(&self) -> Celsius {
        Celsius(self.temperature_c)
    }

    /// Absolute operating temperature, never below 1 K
    pub fn absolute_temperature(&self) -> Kelvin {
        let k: Kelvin = self.temperature().into();
        Kelvin(k.0.max(1.0))
    }

    /// Pressure in GPa
    pub fn pressure_gpa(&self) -> GigaPascals {
        MegaPascals(self.pressure_mpa).into()
    }

    /// Temperature excess over standard conditions (°C), never negative
    pub fn excess_temperature(&self) -> f64 {
        (self.temperature_c - STANDARD_TEMPERATURE_C).max(0.0)
    }

    /// Cyclic loading with a known frequency
    pub fn cyclic_frequency(&self) -> Option<f64> {
        match (self.loading, self.frequency_hz) {
            (Some(LoadingType::Cyclic), Some(f)) => Some(f),
            _ => None,
        }
    }
}

/// Homologous temperature T/T_melt, both absolute.
///
/// The melting point is clamped to at least 1 K so an estimated composition
/// dominated by gaseous elements cannot divide by zero.
pub fn homologous_temperature(temperature_c: f64, melting_point_c: f64) -> f64 {
    let t: Kelvin = Celsius(temperature_c).into();
    let t_melt: Kelvin = Celsius(melting_point_c).into();
    t.0.max(0.0) / t_melt.0.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cond = SimulationConditions::default();
        assert_eq!(cond.temperature_c, 25.0);
        assert_eq!(cond.pressure_mpa, 0.1);
        assert_eq!(cond.humidity(), 50.0);
        assert_eq!(cond.environment(), Environment::Air);
        assert!(cond.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let cond: SimulationConditions = serde_json::from_str("{}").unwrap();
        assert_eq!(cond, SimulationConditions::default());
    }

    #[test]
    fn test_json_environment_names() {
        let cond: SimulationConditions =
            serde_json::from_str(r#"{ "environment": "seawater", "loading": "cyclic" }"#).unwrap();
        assert_eq!(cond.environment(), Environment::Seawater);
        assert_eq!(cond.loading, Some(LoadingType::Cyclic));
    }

    #[test]
    fn test_resolved_fills_defaults() {
        let cond = SimulationConditions::at_temperature(300.0).resolved();
        assert_eq!(cond.humidity_pct, Some(50.0));
        assert_eq!(cond.environment, Some(Environment::Air));
        assert_eq!(cond.temperature_c, 300.0);
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        assert!(SimulationConditions::at_temperature(-300.0).validate().is_err());
        assert!(SimulationConditions::default().with_pressure(-1.0).validate().is_err());
        assert!(SimulationConditions::default().with_humidity(120.0).validate().is_err());
        assert!(SimulationConditions::default().with_strain(-0.5).validate().is_err());
        assert!(SimulationConditions::default().with_frequency(0.0).validate().is_err());
        assert!(SimulationConditions::at_temperature(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validation_caps_magnitudes() {
        assert!(SimulationConditions::at_temperature(MAX_TEMPERATURE_C).validate().is_ok());
        assert!(SimulationConditions::at_temperature(1.0e200).validate().is_err());
        assert!(SimulationConditions::default().with_pressure(MAX_PRESSURE_MPA).validate().is_ok());
        assert!(SimulationConditions::default().with_pressure(1.0e308).validate().is_err());
        assert!(SimulationConditions::default().with_strain(1.0e6).validate().is_err());
        assert!(SimulationConditions::default().with_pressure(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_homologous_temperature() {
        let th = homologous_temperature(1400.0, 1500.0);
        assert!((th - 1673.15 / 1773.15).abs() < 1e-12);
        assert!(th > 0.9);
    }

    #[test]
    fn test_cyclic_frequency_requires_both() {
        let cond = SimulationConditions::default().with_loading(LoadingType::Cyclic);
        assert_eq!(cond.cyclic_frequency(), None);
        let cond = cond.with_frequency(5.0);
        assert_eq!(cond.cyclic_frequency(), Some(5.0));
        let tensile = SimulationConditions::default()
            .with_loading(LoadingType::Tensile)
            .with_frequency(5.0);
        assert_eq!(tensile.cyclic_frequency(), None);
    }

    #[test]
    fn test_pressure_gpa() {
        let cond = SimulationConditions::default().with_pressure(500.0);
        assert_eq!(cond.pressure_gpa().0, 0.5);
    }
}
