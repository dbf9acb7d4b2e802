//! Component value normalization
//!
//! Schematic value fields are free-form text: `10k`, `0.1uF`, `4k7`, `0R05`,
//! `3.3mOhm`. This module turns them into a [`ComponentValue`] so that two
//! spellings of the same part value can be recognized as equal.
//!
//! ```
//! use kibom::units::{compare_values, parse_value, Prefix, UnitClass};
//!
//! let v = parse_value("0.1uF").unwrap();
//! assert_eq!(v.prefix, Prefix::Micro);
//! assert_eq!(v.unit, Some(UnitClass::Farad));
//!
//! assert!(compare_values("100n", "0.1uF"));
//! assert!(!compare_values("1M", "1m"));
//! ```

pub mod locale;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Prefix alternatives, longest spelling first so `mega` wins over `m`.
const PREFIX_PATTERN: &str = "micro|milli|kilo|mega|meg|giga|p|n|u|μ|µ|m|k|g";
/// Unit alternatives, longest spelling first so `ohms` wins over `ohm`.
const UNIT_PATTERN: &str = "ohms|ohm|farad|henry|r|Ω|Ω|f|h";

static VALUE_RE: OnceLock<Regex> = OnceLock::new();

fn value_regex() -> &'static Regex {
    VALUE_RE.get_or_init(|| {
        let pattern = format!(
            r"(?i)^([0-9]+(?:\.[0-9]+)?)\s*({PREFIX_PATTERN})?({UNIT_PATTERN})?([0-9]*)$"
        );
        Regex::new(&pattern).expect("component value pattern is a valid regex")
    })
}

/// SI prefix of a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Pico,
    Nano,
    Micro,
    Milli,
    None,
    Kilo,
    Mega,
    Giga,
}

impl Prefix {
    pub fn multiplier(self) -> f64 {
        match self {
            Prefix::Pico => 1e-12,
            Prefix::Nano => 1e-9,
            Prefix::Micro => 1e-6,
            Prefix::Milli => 1e-3,
            Prefix::None => 1.0,
            Prefix::Kilo => 1e3,
            Prefix::Mega => 1e6,
            Prefix::Giga => 1e9,
        }
    }

    /// Interpret a captured prefix. A bare upper-case `M` is mega, every
    /// other spelling is matched case-insensitively.
    fn from_capture(raw: &str) -> Option<Self> {
        if raw == "M" {
            return Some(Prefix::Mega);
        }
        match raw.to_lowercase().as_str() {
            "p" => Some(Prefix::Pico),
            "n" => Some(Prefix::Nano),
            "u" | "μ" | "µ" | "micro" => Some(Prefix::Micro),
            "m" | "milli" => Some(Prefix::Milli),
            "k" | "kilo" => Some(Prefix::Kilo),
            "meg" | "mega" => Some(Prefix::Mega),
            "g" | "giga" => Some(Prefix::Giga),
            _ => None,
        }
    }
}

/// Physical unit class of a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    /// Resistance (`R`, `ohm`, `ohms`, `Ω`)
    Ohm,
    /// Capacitance (`F`, `farad`)
    Farad,
    /// Inductance (`H`, `henry`)
    Henry,
}

impl UnitClass {
    fn from_capture(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "r" | "ohm" | "ohms" | "ω" => Some(UnitClass::Ohm),
            "f" | "farad" => Some(UnitClass::Farad),
            "h" | "henry" => Some(UnitClass::Henry),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnitClass::Ohm => "R",
            UnitClass::Farad => "F",
            UnitClass::Henry => "H",
        }
    }
}

/// A normalized component value: `magnitude * prefix` in `unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentValue {
    pub magnitude: f64,
    pub prefix: Prefix,
    pub unit: Option<UnitClass>,
}

impl ComponentValue {
    pub fn multiplier(&self) -> f64 {
        self.prefix.multiplier()
    }

    /// Magnitude with the prefix applied.
    pub fn scaled(&self) -> f64 {
        self.magnitude * self.multiplier()
    }

    /// Scaled magnitude as a fixed-point string with 15 fractional digits.
    /// Two values with the same canonical string are numerically equal.
    pub fn canonical(&self) -> String {
        format!("{:.15}", self.scaled())
    }

    /// Whether `self` and `other` denote the same quantity. A missing unit
    /// on either side is compatible with any unit.
    pub fn same_quantity(&self, other: &ComponentValue) -> bool {
        if self.canonical() != other.canonical() {
            return false;
        }
        match (self.unit, other.unit) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())?;
        if let Some(unit) = self.unit {
            write!(f, " {}", unit.symbol())?;
        }
        Ok(())
    }
}

/// Component value parser bound to a decimal separator.
#[derive(Debug, Clone, Copy)]
pub struct ValueParser {
    decimal_point: char,
}

impl ValueParser {
    /// Parser using the decimal separator of the process locale.
    pub fn from_locale() -> Self {
        Self::with_decimal_point(locale::decimal_point())
    }

    pub fn with_decimal_point(decimal_point: char) -> Self {
        Self { decimal_point }
    }

    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    /// Parse a value string. Returns `None` for anything the grammar does
    /// not accept; never panics.
    pub fn parse(&self, text: &str) -> Option<ComponentValue> {
        let localized;
        let text = if self.decimal_point != '.' {
            localized = text.replace(self.decimal_point, ".");
            localized.as_str()
        } else {
            text
        };
        let cleaned = text.trim().replace(',', "");

        let Some(caps) = value_regex().captures(&cleaned) else {
            tracing::trace!("Unparseable component value {:?}", text);
            return None;
        };

        let value = caps.get(1)?.as_str();
        let prefix = match caps.get(2) {
            Some(m) => Prefix::from_capture(m.as_str())?,
            None => Prefix::None,
        };
        let unit = match caps.get(3) {
            Some(m) => Some(UnitClass::from_capture(m.as_str())?),
            None => None,
        };
        let post = caps.get(4).map(|m| m.as_str()).unwrap_or_default();

        // "0R05": the unit (or prefix) stands in for the decimal point
        let magnitude = if !post.is_empty() && !value.contains('.') {
            let whole = value.parse::<f64>().ok()?;
            let fraction = post.parse::<f64>().ok()? / 10f64.powi(post.len() as i32);
            whole + fraction
        } else {
            value.parse::<f64>().ok()?
        };

        if !magnitude.is_finite() {
            return None;
        }

        Some(ComponentValue {
            magnitude,
            prefix,
            unit,
        })
    }

    /// Whether two value strings denote the same quantity.
    pub fn compare(&self, a: &str, b: &str) -> bool {
        match (self.parse(a), self.parse(b)) {
            (Some(a), Some(b)) => a.same_quantity(&b),
            _ => false,
        }
    }
}

impl Default for ValueParser {
    fn default() -> Self {
        Self::from_locale()
    }
}

/// Parse a component value using the process locale's decimal separator.
pub fn parse_value(text: &str) -> Option<ComponentValue> {
    ValueParser::from_locale().parse(text)
}

/// Whether two component value strings denote the same physical quantity.
///
/// Both sides must parse. A unit missing on either side (`"10k"` against
/// `"10kOhm"`) does not prevent a match.
pub fn compare_values(a: &str, b: &str) -> bool {
    ValueParser::from_locale().compare(a, b)
}
