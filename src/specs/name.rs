//! Typed names for frequency parameters.
//!
//! Frequency specs are identified by names such as `F_SB` or `F_PB2`. Names are
//! validated once on construction so lookups elsewhere can't fail on typos in
//! the identifier itself, only on names that were never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreqSpecError;
use super::unit::FreqUnit;

/// Which kind of band edge a frequency parameter describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandKind {
    /// Corner of a stop band (`F_SB`, `F_SB2`).
    StopBand,
    /// Corner of a pass band (`F_PB`, `F_PB2`).
    PassBand,
    /// Any other corner (`F_C`, `F_N`, ...).
    Corner,
}

impl BandKind {
    /// Returns the band description used in tooltips.
    pub fn description(&self) -> &'static str {
        match self {
            BandKind::StopBand => "stop band",
            BandKind::PassBand => "pass band",
            BandKind::Corner => "band",
        }
    }
}

/// Validated identifier of a frequency parameter.
///
/// The format is `F_<ID>` where `<ID>` is a non-empty run of ASCII
/// alphanumerics. A lowercase leading `f` is accepted and normalized to `F`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FreqSpecName(String);

impl FreqSpecName {
    /// Parses and validates a parameter name.
    pub fn new(name: &str) -> Result<Self, FreqSpecError> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();

        let valid = matches!(chars.next(), Some('F' | 'f'))
            && chars.next() == Some('_')
            && {
                let rest = chars.as_str();
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
            };

        if !valid {
            return Err(FreqSpecError::InvalidName(name.to_string()));
        }

        Ok(Self(format!("F{}", &trimmed[1..])))
    }

    /// Returns the canonical name (`F_SB`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after `F_` (`SB` for `F_SB`).
    pub fn id(&self) -> &str {
        &self.0[2..]
    }

    /// Classifies the parameter by its identifier.
    pub fn band_kind(&self) -> BandKind {
        let id = self.id().to_ascii_uppercase();
        if id.contains("SB") {
            BandKind::StopBand
        } else if id.contains("PB") {
            BandKind::PassBand
        } else {
            BandKind::Corner
        }
    }

    /// Label shown next to the input field.
    ///
    /// Relative units print an uppercase `F` (normalized frequency), absolute
    /// units a lowercase `f`.
    pub fn label(&self, unit: FreqUnit) -> String {
        let prefix = if unit.is_relative() { 'F' } else { 'f' };
        format!("{}_{}", prefix, self.id())
    }

    /// Tooltip text describing the valid range.
    pub fn tooltip(&self) -> String {
        format!(
            "Corner frequency for (this) {} (0 < f < f_S/2).",
            self.band_kind().description()
        )
    }
}

impl fmt::Display for FreqSpecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FreqSpecName {
    type Err = FreqSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FreqSpecName {
    type Error = FreqSpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<FreqSpecName> for String {
    fn from(name: FreqSpecName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(FreqSpecName::new("F_SB").unwrap().as_str(), "F_SB");
        assert_eq!(FreqSpecName::new("F_PB2").unwrap().id(), "PB2");
        assert_eq!(FreqSpecName::new(" f_c ").unwrap().as_str(), "F_c");
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "F", "F_", "SB", "G_SB", "F-SB", "F_S B", "F__"] {
            assert_eq!(
                FreqSpecName::new(bad),
                Err(FreqSpecError::InvalidName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_band_kind() {
        assert_eq!("F_SB2".parse::<FreqSpecName>().unwrap().band_kind(), BandKind::StopBand);
        assert_eq!("F_PB".parse::<FreqSpecName>().unwrap().band_kind(), BandKind::PassBand);
        assert_eq!("F_C".parse::<FreqSpecName>().unwrap().band_kind(), BandKind::Corner);
    }

    #[test]
    fn test_label_follows_unit() {
        let name = FreqSpecName::new("F_SB2").unwrap();
        assert_eq!(name.label(FreqUnit::Fs), "F_SB2");
        assert_eq!(name.label(FreqUnit::Nyquist), "F_SB2");
        assert_eq!(name.label(FreqUnit::KHz), "f_SB2");
    }

    #[test]
    fn test_tooltip() {
        let name = FreqSpecName::new("F_PB").unwrap();
        assert_eq!(
            name.tooltip(),
            "Corner frequency for (this) pass band (0 < f < f_S/2)."
        );
    }

    #[test]
    fn test_serde_validates() {
        let name: FreqSpecName = serde_json::from_str("\"F_SB\"").unwrap();
        assert_eq!(name.as_str(), "F_SB");
        assert!(serde_json::from_str::<FreqSpecName>("\"bogus\"").is_err());
    }
}
