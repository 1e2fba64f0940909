//! Display units and conversion between normalized and displayed frequencies.
//!
//! Frequency specs are always stored normalized to the sampling frequency.
//! Conversion happens only when a value is shown or parsed, so switching units
//! never touches stored values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreqSpecError;

/// Unit in which frequency specs are displayed and edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreqUnit {
    /// Relative to the sampling frequency.
    #[serde(rename = "f_S")]
    #[default]
    Fs,
    /// Relative to the Nyquist frequency `f_S / 2`.
    #[serde(rename = "f_Ny")]
    Nyquist,
    /// Hertz.
    #[serde(rename = "Hz")]
    Hz,
    /// Kilohertz.
    #[serde(rename = "kHz")]
    KHz,
    /// Megahertz.
    #[serde(rename = "MHz")]
    MHz,
    /// Gigahertz.
    #[serde(rename = "GHz")]
    GHz,
}

impl FreqUnit {
    /// All units in menu order.
    pub const ALL: [FreqUnit; 6] = [
        FreqUnit::Fs,
        FreqUnit::Nyquist,
        FreqUnit::Hz,
        FreqUnit::KHz,
        FreqUnit::MHz,
        FreqUnit::GHz,
    ];

    /// Returns true for the units tied to `f_S` or `f_S / 2`.
    pub fn is_relative(&self) -> bool {
        matches!(self, FreqUnit::Fs | FreqUnit::Nyquist)
    }

    /// Hz per display unit for absolute units, `None` for relative ones.
    pub fn scale(&self) -> Option<f64> {
        match self {
            FreqUnit::Fs | FreqUnit::Nyquist => None,
            FreqUnit::Hz => Some(1.0),
            FreqUnit::KHz => Some(1e3),
            FreqUnit::MHz => Some(1e6),
            FreqUnit::GHz => Some(1e9),
        }
    }

    /// Short tag used in captions and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FreqUnit::Fs => "f_S",
            FreqUnit::Nyquist => "f_Ny",
            FreqUnit::Hz => "Hz",
            FreqUnit::KHz => "kHz",
            FreqUnit::MHz => "MHz",
            FreqUnit::GHz => "GHz",
        }
    }

    /// Caption shown next to the widget title.
    pub fn caption(&self) -> String {
        format!("in {}", self.as_str())
    }
}

impl fmt::Display for FreqUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreqUnit {
    type Err = FreqSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f_s" | "fs" => Ok(FreqUnit::Fs),
            "f_ny" | "fny" => Ok(FreqUnit::Nyquist),
            "hz" => Ok(FreqUnit::Hz),
            "khz" => Ok(FreqUnit::KHz),
            "mhz" => Ok(FreqUnit::MHz),
            "ghz" => Ok(FreqUnit::GHz),
            _ => Err(FreqSpecError::UnknownUnit(s.to_string())),
        }
    }
}

/// Converts a normalized frequency to the value shown in `unit`.
///
/// `f_s` is the sampling frequency in Hz and must be positive. Relative units
/// show the normalized value unchanged.
pub fn to_display(normalized: f64, f_s: f64, unit: FreqUnit) -> f64 {
    match unit.scale() {
        None => normalized,
        Some(scale) => normalized * (f_s / scale),
    }
}

/// Converts a value entered in `unit` back to a normalized frequency.
pub fn from_display(value: f64, f_s: f64, unit: FreqUnit) -> f64 {
    match unit.scale() {
        None => value,
        Some(scale) => value / (f_s / scale),
    }
}

/// How a displayed value is rendered to text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayFormat {
    /// Shortest text that reads back to the same value; used while editing.
    FullPrecision,
    /// Rounded to a number of significant digits (`{:.3g}` style).
    Rounded { significant_digits: usize },
}

impl DisplayFormat {
    /// Picks full precision for a focused field, rounded otherwise.
    pub fn for_focus(has_focus: bool, significant_digits: usize) -> Self {
        if has_focus {
            DisplayFormat::FullPrecision
        } else {
            DisplayFormat::Rounded { significant_digits }
        }
    }

    /// Renders `value` in this format.
    pub fn format(&self, value: f64) -> String {
        match self {
            DisplayFormat::FullPrecision => value.to_string(),
            DisplayFormat::Rounded { significant_digits } => {
                format_significant(value, *significant_digits)
            }
        }
    }
}

/// Formats `value` with `digits` significant digits like C's `%g`.
///
/// Trailing zeros are removed. Scientific notation is used when the decimal
/// exponent is below -4 or at least `digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    // Round once in scientific form to learn the exponent after rounding
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_trailing_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
