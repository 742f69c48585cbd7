//! Built-in font family presets.

use crate::error::ControlError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selectable font families, each with a full fallback stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontPreset {
    /// IBM Plex Sans over the platform UI stack.
    #[default]
    IbmPlexSans,
    Inter,
    Poppins,
    Roboto,
    /// Whatever the platform UI font is.
    System,
}

impl FontPreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::IbmPlexSans => "ibm-plex-sans",
            Self::Inter => "inter",
            Self::Poppins => "poppins",
            Self::Roboto => "roboto",
            Self::System => "system",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::IbmPlexSans => "IBM Plex Sans",
            Self::Inter => "Inter",
            Self::Poppins => "Poppins",
            Self::Roboto => "Roboto",
            Self::System => "System",
        }
    }

    /// CSS `font-family` value.
    pub fn stack(self) -> &'static str {
        match self {
            Self::IbmPlexSans => {
                "\"IBM Plex Sans\", -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
            Self::Inter => {
                "\"Inter\", system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
            Self::Poppins => {
                "\"Poppins\", system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
            Self::Roboto => "\"Roboto\", \"Helvetica Neue\", Arial, sans-serif",
            Self::System => {
                "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [FontPreset] {
        const PRESETS: [FontPreset; 5] = [
            FontPreset::IbmPlexSans,
            FontPreset::Inter,
            FontPreset::Poppins,
            FontPreset::Roboto,
            FontPreset::System,
        ];
        &PRESETS
    }
}

impl Display for FontPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the id (`ibm-plex-sans`) or the display name (`IBM Plex Sans`).
impl FromStr for FontPreset {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FontPreset::all()
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(wanted) || p.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ControlError::UnknownFont(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stack_leads_with_its_family() {
        for preset in FontPreset::all() {
            let stack = preset.stack();
            match preset {
                FontPreset::System => assert!(stack.starts_with("system-ui")),
                _ => assert!(
                    stack.starts_with(&format!("\"{}\"", preset.display_name())),
                    "{preset:?}: {stack}"
                ),
            }
            assert!(stack.ends_with("sans-serif"));
        }
    }

    #[test]
    fn test_parse_by_id_or_name() {
        assert_eq!("ibm-plex-sans".parse::<FontPreset>(), Ok(FontPreset::IbmPlexSans));
        assert_eq!("IBM Plex Sans".parse::<FontPreset>(), Ok(FontPreset::IbmPlexSans));
        assert_eq!("poppins".parse::<FontPreset>(), Ok(FontPreset::Poppins));
        assert_eq!(
            "Comic Sans".parse::<FontPreset>(),
            Err(ControlError::UnknownFont("Comic Sans".into()))
        );
    }
}
