//! Length units and numeric attribute extraction
//!
//! SVG length attributes carry an optional unit suffix ("12.5cm", "50%").
//! A shape stores a single unit shared by all of its numeric fields; this
//! module splits a raw attribute value into magnitude and unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported SVG length unit suffix
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "ex")]
    Ex,
    #[serde(rename = "pt")]
    Pt,
    #[serde(rename = "pc")]
    Pc,
    #[serde(rename = "mm")]
    Mm,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "%")]
    Percent,
    /// No suffix present
    #[default]
    #[serde(rename = "")]
    None,
    /// A suffix was present but is not a recognized unit
    #[serde(rename = "invalid")]
    Invalid,
}

impl Unit {
    /// Recognized suffixes, in lookup order
    pub const RECOGNIZED: [Unit; 9] = [
        Unit::Cm,
        Unit::Px,
        Unit::Em,
        Unit::Ex,
        Unit::Pt,
        Unit::Pc,
        Unit::Mm,
        Unit::In,
        Unit::Percent,
    ];

    /// Textual suffix as written after a number
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cm => "cm",
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Mm => "mm",
            Unit::In => "in",
            Unit::Percent => "%",
            Unit::None => "",
            Unit::Invalid => "invalid",
        }
    }

    /// Map a bare suffix string back to a unit.
    ///
    /// Case-insensitive; the empty string is `Unit::None` and anything
    /// unrecognized is `Unit::Invalid`.
    pub fn from_suffix(suffix: &str) -> Unit {
        let suffix = suffix.trim();
        if suffix.is_empty() {
            return Unit::None;
        }
        Unit::RECOGNIZED
            .iter()
            .copied()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(suffix))
            .unwrap_or(Unit::Invalid)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Unit::None)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Unit::Invalid)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric attribute value split into magnitude and unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Measurement {
    /// Split a raw attribute value such as `"12.5cm"` or `" -3 PX "`.
    pub fn parse(raw: &str) -> Self {
        Self {
            magnitude: extract_magnitude(raw),
            unit: extract_unit(raw),
        }
    }
}

/// `-` counts as part of the number only when a digit or `.` follows it
fn is_sign_of_number(chars: &[char], i: usize) -> bool {
    chars[i] == '-'
        && chars
            .get(i + 1)
            .map_or(false, |c| c.is_ascii_digit() || *c == '.')
}

/// Determine the unit suffix of a raw numeric value.
///
/// The value is lower-cased and stripped of whitespace, then the numeric run
/// is removed. Whatever remains must be exactly one recognized unit, and the
/// unit must directly follow a digit. Nothing left means no unit.
pub fn extract_unit(raw: &str) -> Unit {
    let compact: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let remainder: String = compact
        .iter()
        .enumerate()
        .filter(|&(i, c)| !(c.is_ascii_digit() || *c == '.' || is_sign_of_number(&compact, i)))
        .map(|(_, c)| *c)
        .collect();

    if remainder.is_empty() {
        return Unit::None;
    }

    let unit = match Unit::RECOGNIZED.iter().find(|u| u.as_str() == remainder) {
        Some(unit) => *unit,
        None => return Unit::Invalid,
    };

    let compact: String = compact.into_iter().collect();
    let preceded_by_digit = compact
        .find(unit.as_str())
        .and_then(|pos| compact[..pos].chars().last())
        .map_or(false, |c| c.is_ascii_digit());

    if preceded_by_digit {
        unit
    } else {
        Unit::Invalid
    }
}

/// Determine the magnitude of a raw numeric value.
///
/// Only digits and decimal points are kept; the first `digits[.digits]` run
/// is parsed. A `-` immediately followed by a digit or `.` anywhere in the
/// value makes the result negative. No digits at all yields `0.0`.
pub fn extract_magnitude(raw: &str) -> f64 {
    let chars: Vec<char> = raw.chars().collect();
    let negative = (0..chars.len()).any(|i| is_sign_of_number(&chars, i));

    let run: String = chars
        .iter()
        .filter(|c| c.is_ascii_digit() || **c == '.')
        .collect();

    let mut parts = run.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    if whole.is_empty() && fraction.is_empty() {
        return 0.0;
    }

    let literal = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    let magnitude = literal.parse::<f64>().unwrap_or(0.0);

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
