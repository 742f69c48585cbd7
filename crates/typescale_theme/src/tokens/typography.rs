//! Typography tokens for theming

use crate::error::ControlError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A font size with its unit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum FontSize {
    /// Relative to the root (html) font size
    Rem(f32),
    /// Absolute pixels
    Px(f32),
}

impl FontSize {
    /// Size in rem for a given root font size in px
    pub fn to_rem(self, root_px: f32) -> f32 {
        match self {
            FontSize::Rem(rem) => rem,
            FontSize::Px(px) => px / root_px,
        }
    }

    /// Size in px for a given root font size in px
    pub fn to_px(self, root_px: f32) -> f32 {
        match self {
            FontSize::Rem(rem) => rem * root_px,
            FontSize::Px(px) => px,
        }
    }
}

impl Display for FontSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSize::Rem(rem) => write!(f, "{rem}rem"),
            FontSize::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// Font weight restricted to the CSS palette 100..=900 in steps of 100
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontWeight(u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const EXTRA_LIGHT: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMI_BOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const EXTRA_BOLD: Self = Self(800);
    pub const BLACK: Self = Self(900);

    pub fn new(value: u16) -> Result<Self, ControlError> {
        if (100..=900).contains(&value) && value % 100 == 0 {
            Ok(Self(value))
        } else {
            Err(ControlError::InvalidWeight(value))
        }
    }

    /// Every selectable weight, lightest first
    pub fn palette() -> &'static [FontWeight] {
        const PALETTE: [FontWeight; 9] = [
            FontWeight::THIN,
            FontWeight::EXTRA_LIGHT,
            FontWeight::LIGHT,
            FontWeight::NORMAL,
            FontWeight::MEDIUM,
            FontWeight::SEMI_BOLD,
            FontWeight::BOLD,
            FontWeight::EXTRA_BOLD,
            FontWeight::BLACK,
        ];
        &PALETTE
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = ControlError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> u16 {
        weight.0
    }
}

impl Display for FontWeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
}

/// Complete style for one variant
///
/// `line_height` is a unitless multiplier of the font size. Grid alignment
/// in the responsive projector depends on that; there is no unit-bearing
/// line height in this model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    pub size: FontSize,
    pub weight: FontWeight,
    pub line_height: f32,
    /// Tracking in em
    pub letter_spacing: f32,
    pub text_transform: TextTransform,
}
