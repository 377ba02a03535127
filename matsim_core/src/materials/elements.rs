//! Element Reference Data
//!
//! Room-temperature density and melting point for the elements (and a few
//! common ceramic compounds) that appear in compositions, plus the structural
//! group each one belongs to for category inference.
//!
//! Gaseous elements use their gas-phase density and sub-zero melting point.
//! That is physically honest but drags weighted averages down sharply, which
//! is one reason estimated materials carry low confidence.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Density assumed for symbols not in the table (g/cm³)
pub const DEFAULT_DENSITY_G_CM3: f64 = 5.0;

/// Melting point assumed for symbols not in the table (°C)
pub const DEFAULT_MELTING_POINT_C: f64 = 1000.0;

/// Structural role an element plays when inferring a material category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementGroup {
    /// Forms metallic bonding (Fe, Al, Ti, ...)
    MetalForming,
    /// Forms covalent/ionic ceramics (Si, B, oxides, carbides)
    CeramicForming,
    /// Backbone of organic polymers (C, H, O, N)
    Organic,
}

/// Reference values for one element or compound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub symbol: &'static str,
    pub density_g_cm3: f64,
    pub melting_point_c: f64,
    pub group: ElementGroup,
}

const fn el(symbol: &'static str, density_g_cm3: f64, melting_point_c: f64, group: ElementGroup) -> ElementData {
    ElementData {
        symbol,
        density_g_cm3,
        melting_point_c,
        group,
    }
}

use ElementGroup::{CeramicForming, MetalForming, Organic};

const ELEMENT_TABLE: &[ElementData] = &[
    // Metals
    el("Fe", 7.87, 1538.0, MetalForming),
    el("Al", 2.70, 660.0, MetalForming),
    el("Ti", 4.51, 1668.0, MetalForming),
    el("Cu", 8.96, 1085.0, MetalForming),
    el("Ni", 8.91, 1455.0, MetalForming),
    el("Cr", 7.19, 1907.0, MetalForming),
    el("Mg", 1.74, 650.0, MetalForming),
    el("Zn", 7.13, 420.0, MetalForming),
    el("Mo", 10.28, 2623.0, MetalForming),
    el("W", 19.25, 3422.0, MetalForming),
    el("V", 6.00, 1910.0, MetalForming),
    el("Mn", 7.21, 1246.0, MetalForming),
    el("Co", 8.90, 1495.0, MetalForming),
    el("Sn", 7.29, 232.0, MetalForming),
    el("Zr", 6.52, 1855.0, MetalForming),
    el("Nb", 8.57, 2477.0, MetalForming),
    el("Ag", 10.49, 962.0, MetalForming),
    el("Au", 19.30, 1064.0, MetalForming),
    el("Pt", 21.45, 1768.0, MetalForming),
    el("Pb", 11.34, 327.0, MetalForming),
    el("Ga", 5.91, 30.0, MetalForming),
    // Ceramic formers
    el("Si", 2.33, 1414.0, CeramicForming),
    el("B", 2.34, 2076.0, CeramicForming),
    el("SiC", 3.21, 2730.0, CeramicForming),
    el("SiO2", 2.65, 1713.0, CeramicForming),
    el("Al2O3", 3.95, 2072.0, CeramicForming),
    el("ZrO2", 5.68, 2715.0, CeramicForming),
    el("Si3N4", 3.17, 1900.0, CeramicForming),
    el("Y2O3", 5.01, 2425.0, CeramicForming),
    // Organic backbone
    el("C", 2.26, 3550.0, Organic),
    el("H", 0.00009, -259.0, Organic),
    el("O", 0.00143, -218.0, Organic),
    el("N", 0.00125, -210.0, Organic),
];

static ELEMENTS: Lazy<HashMap<&'static str, ElementData>> =
    Lazy::new(|| ELEMENT_TABLE.iter().map(|e| (e.symbol, *e)).collect());

/// Look up reference data for a symbol (case-sensitive, e.g. "Fe", "Al2O3")
pub fn lookup(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.get(symbol)
}

/// Density for a symbol, falling back to [`DEFAULT_DENSITY_G_CM3`]
pub fn density_g_cm3(symbol: &str) -> f64 {
    lookup(symbol).map_or(DEFAULT_DENSITY_G_CM3, |e| e.density_g_cm3)
}

/// Melting point for a symbol, falling back to [`DEFAULT_MELTING_POINT_C`]
pub fn melting_point_c(symbol: &str) -> f64 {
    lookup(symbol).map_or(DEFAULT_MELTING_POINT_C, |e| e.melting_point_c)
}

/// Structural group, if the symbol is known
pub fn group(symbol: &str) -> Option<ElementGroup> {
    lookup(symbol).map(|e| e.group)
}
