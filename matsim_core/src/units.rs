//! # Unit Types
//!
//! Type-safe wrappers for the physical units the predictors mix. These keep
//! Celsius/Kelvin and MPa/GPa from being confused inside formulas while
//! staying plain `f64` on the wire.
//!
//! ## Conventions
//!
//! - Temperature: inputs in °C, formulas that need absolute temperature in K
//! - Pressure and stress: MPa at the API, GPa inside pressure-sensitivity terms
//! - Elastic modulus: GPa
//! - Density: kg/m³ internally, g/cm³ in element reference data
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::units::{Celsius, GigaPascals, Kelvin, MegaPascals};
//!
//! let t: Kelvin = Celsius(25.0).into();
//! assert!((t.0 - 298.15).abs() < 1e-9);
//!
//! let p: GigaPascals = MegaPascals(500.0).into();
//! assert_eq!(p.0, 0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + KELVIN_OFFSET)
    }
}

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Pressure, stress or modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GigaPascals(pub f64);

impl From<MegaPascals> for GigaPascals {
    fn from(mpa: MegaPascals) -> Self {
        GigaPascals(mpa.0 / 1000.0)
    }
}

// ============================================================================
// Density Units
// ============================================================================

/// Density in grams per cubic centimetre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GramsPerCm3(pub f64);

/// Density in kilograms per cubic metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

impl From<GramsPerCm3> for KgPerM3 {
    fn from(g: GramsPerCm3) -> Self {
        KgPerM3(g.0 * 1000.0)
    }
}
