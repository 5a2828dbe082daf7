//! # Units
//!
//! Conversion tables for the converters and the unit selects used by other
//! calculators. Every linear quantity converts through one canonical unit:
//!
//! | Quantity  | Canonical unit |
//! |-----------|----------------|
//! | Length    | metre          |
//! | Area      | square metre   |
//! | Mass      | gram           |
//! | Data size | bit            |
//! | Bit rate  | bit per second |
//!
//! Temperature is affine and converts through degrees Celsius.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{LENGTH, TemperatureScale};
//!
//! let cm = LENGTH.convert(1.0, "meter", "centimeter").unwrap();
//! assert!((cm - 100.0).abs() < 1e-9);
//!
//! let f = TemperatureScale::Celsius.convert(100.0, TemperatureScale::Fahrenheit);
//! assert!((f - 212.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::{to_exponential, to_locale, to_precision, trim_decimals};

// ============================================================================
// Linear unit tables
// ============================================================================

/// A unit that is a fixed multiple of its table's canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearUnit {
    /// Option value in unit selects.
    pub key: &'static str,
    pub name: &'static str,
    pub abbrev: &'static str,
    /// Canonical units per one of this unit.
    pub factor: f64,
}

impl LinearUnit {
    /// Option label, e.g. `Meter (m)`.
    pub fn label(&self) -> String {
        if self.name == self.abbrev {
            self.name.to_string()
        } else {
            format!("{} ({})", self.name, self.abbrev)
        }
    }
}

const fn unit(key: &'static str, name: &'static str, abbrev: &'static str, factor: f64) -> LinearUnit {
    LinearUnit {
        key,
        name,
        abbrev,
        factor,
    }
}

/// An ordered set of units sharing a canonical unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitTable {
    pub quantity: &'static str,
    pub units: &'static [LinearUnit],
}

impl UnitTable {
    pub fn find(&self, key: &str) -> Option<&'static LinearUnit> {
        self.units.iter().find(|u| u.key == key)
    }

    pub fn to_canonical(&self, value: f64, key: &str) -> Option<f64> {
        self.find(key).map(|u| value * u.factor)
    }

    pub fn from_canonical(&self, value: f64, key: &str) -> Option<f64> {
        self.find(key).map(|u| value / u.factor)
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> Option<f64> {
        self.from_canonical(self.to_canonical(value, from)?, to)
    }
}

pub const LENGTH: UnitTable = UnitTable {
    quantity: "length",
    units: &[
        unit("meter", "Meter", "m", 1.0),
        unit("kilometer", "Kilometer", "km", 1000.0),
        unit("centimeter", "Centimeter", "cm", 0.01),
        unit("millimeter", "Millimeter", "mm", 0.001),
        unit("micrometer", "Micrometer", "µm", 1e-6),
        unit("nanometer", "Nanometer", "nm", 1e-9),
        unit("mile", "Mile", "mi", 1609.344),
        unit("yard", "Yard", "yd", 0.9144),
        unit("foot", "Foot", "ft", 0.3048),
        unit("inch", "Inch", "in", 0.0254),
        unit("light_year", "Light Year", "ly", 9.4607e15),
    ],
};

pub const AREA: UnitTable = UnitTable {
    quantity: "area",
    units: &[
        unit("sq_m", "Square Meter", "m²", 1.0),
        unit("sq_km", "Square Kilometer", "km²", 1e6),
        unit("sq_cm", "Square Centimeter", "cm²", 1e-4),
        unit("sq_mm", "Square Millimeter", "mm²", 1e-6),
        unit("hectare", "Hectare", "ha", 10_000.0),
        unit("are", "Are", "a", 100.0),
        unit("decare", "Decare", "da", 1000.0),
        unit("acre", "Acre", "ac", 4046.8564224),
        unit("sq_mi", "Square Mile", "mi²", 2_589_988.110336),
        unit("sq_yd", "Square Yard", "yd²", 0.83612736),
        unit("sq_ft", "Square Foot", "ft²", 0.09290304),
        unit("sq_in", "Square Inch", "in²", 0.00064516),
        unit("sq_dm", "Square Decimeter", "dm²", 1e-2),
        unit("sq_um", "Square Micrometer", "µm²", 1e-12),
        unit("sq_nm", "Square Nanometer", "nm²", 1e-18),
        unit("sq_pm", "Square Picometer", "pm²", 1e-24),
        unit("sq_angstrom", "Square Ångström", "Å²", 1e-20),
        unit("sq_mil", "Square Mil", "mil²", 6.4516e-10),
        unit("cmil", "Circular Mil", "cmil", 5.06707479e-10),
        unit("kcmil", "Kilo Circular Mil", "kcmil", 5.06707479e-7),
        unit("soccer_field", "Soccer Field", "field", 7140.0),
    ],
};

/// Mass units; the option value doubles as the label.
pub const MASS: UnitTable = UnitTable {
    quantity: "mass",
    units: &[
        unit("ug", "micrograms", "μg", 1e-6),
        unit("mg", "milligrams", "mg", 1e-3),
        unit("g", "grams", "g", 1.0),
        unit("dag", "decagrams", "dag", 10.0),
        unit("kg", "kilograms", "kg", 1000.0),
        unit("t", "metric tons", "t", 1e6),
        unit("oz", "ounces", "oz", 28.3495),
        unit("lb", "pounds", "lb", 453.592),
    ],
};

/// File sizes in decimal (SI) multiples, canonical unit bits.
pub const DATA_SIZE: UnitTable = UnitTable {
    quantity: "data size",
    units: &[
        unit("B", "Bytes", "B", 8.0),
        unit("KB", "Kilobytes", "KB", 8e3),
        unit("MB", "Megabytes", "MB", 8e6),
        unit("GB", "Gigabytes", "GB", 8e9),
        unit("TB", "Terabytes", "TB", 8e12),
    ],
};

pub const BIT_RATE: UnitTable = UnitTable {
    quantity: "bit rate",
    units: &[
        unit("bps", "bits/sec", "bps", 1.0),
        unit("Kbps", "Kbps", "Kbps", 1e3),
        unit("Mbps", "Mbps", "Mbps", 1e6),
        unit("Gbps", "Gbps", "Gbps", 1e9),
        unit("Tbps", "Tbps", "Tbps", 1e12),
    ],
};

// ============================================================================
// Temperature
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 4] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
        TemperatureScale::Rankine,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "celsius",
            TemperatureScale::Fahrenheit => "fahrenheit",
            TemperatureScale::Kelvin => "kelvin",
            TemperatureScale::Rankine => "rankine",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "Celsius",
            TemperatureScale::Fahrenheit => "Fahrenheit",
            TemperatureScale::Kelvin => "Kelvin",
            TemperatureScale::Rankine => "Rankine",
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
            TemperatureScale::Rankine => "°R",
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.abbrev())
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
            TemperatureScale::Rankine => (value - 491.67) * 5.0 / 9.0,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
            TemperatureScale::Rankine => (celsius + 273.15) * 9.0 / 5.0,
        }
    }

    pub fn convert(&self, value: f64, to: TemperatureScale) -> f64 {
        to.from_celsius(self.to_celsius(value))
    }
}

/// Select-keyed variant of [`TemperatureScale::to_celsius`].
pub fn temperature_to_celsius(value: f64, key: &str) -> Option<f64> {
    TemperatureScale::parse(key).map(|s| s.to_celsius(value))
}

/// Select-keyed variant of [`TemperatureScale::from_celsius`].
pub fn temperature_from_celsius(celsius: f64, key: &str) -> Option<f64> {
    TemperatureScale::parse(key).map(|s| s.from_celsius(celsius))
}

// ============================================================================
// Formatting
// ============================================================================

/// Length and area display: exponent form outside [1e-4, 1e9], otherwise
/// ten significant digits, grouped, at most eight decimals.
pub fn format_value(value: f64) -> String {
    match significant(value) {
        Ok(v) => to_locale(v, 8),
        Err(exp) => exp,
    }
}

/// [`format_value`] without grouping separators, for number inputs.
pub fn format_input_value(value: f64) -> String {
    match significant(value) {
        Ok(v) => trim_decimals(v, 8),
        Err(exp) => exp,
    }
}

fn significant(value: f64) -> Result<f64, String> {
    if value == 0.0 {
        return Ok(0.0);
    }
    if value.abs() < 1e-4 || value.abs() > 1e9 {
        return Err(to_exponential(value, 6));
    }
    Ok(to_precision(value, 10).parse::<f64>().unwrap_or(value))
}

/// Temperature display: exponent form for tiny non-zero values, otherwise
/// grouped with at most six decimals.
pub fn format_temperature(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        return to_exponential(value, 4);
    }
    to_locale(value, 6)
}

/// [`format_temperature`] without grouping separators.
pub fn format_temperature_input(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        return to_exponential(value, 4);
    }
    trim_decimals(value, 6)
}
