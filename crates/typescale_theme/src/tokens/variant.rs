//! Typographic variants and the complete per-variant map

use crate::error::ControlError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A typographic role. Declaration order is display order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Subtitle1,
    Subtitle2,
    Body1,
    Body2,
    Caption,
    Overline,
    Button,
    Label,
}

impl Variant {
    /// Number of variants in the closed set
    pub const COUNT: usize = 14;

    /// Full variant list in display order
    pub fn all() -> &'static [Variant] {
        const VARIANTS: [Variant; Variant::COUNT] = [
            Variant::H1,
            Variant::H2,
            Variant::H3,
            Variant::H4,
            Variant::H5,
            Variant::H6,
            Variant::Subtitle1,
            Variant::Subtitle2,
            Variant::Body1,
            Variant::Body2,
            Variant::Caption,
            Variant::Overline,
            Variant::Button,
            Variant::Label,
        ];
        &VARIANTS
    }

    /// Stable id for config/serialization
    pub fn id(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Subtitle1 => "subtitle1",
            Self::Subtitle2 => "subtitle2",
            Self::Body1 => "body1",
            Self::Body2 => "body2",
            Self::Caption => "caption",
            Self::Overline => "overline",
            Self::Button => "button",
            Self::Label => "label",
        }
    }

    /// Position in display order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Exponent on the modular scale, for heading-class variants.
    ///
    /// Heading-class sizes are `ratio^k` rem. Everything else has a fixed size.
    pub fn scale_step(self) -> Option<i32> {
        match self {
            Self::Subtitle1 => Some(0),
            Self::Subtitle2 | Self::H6 => Some(1),
            Self::H5 => Some(2),
            Self::H4 => Some(3),
            Self::H3 => Some(4),
            Self::H2 => Some(5),
            Self::H1 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.scale_step().is_some()
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Variant {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Variant::all()
            .iter()
            .copied()
            .find(|v| v.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ControlError::UnknownVariant(s.to_string()))
    }
}

/// One value for every variant.
///
/// Backed by a fixed array, so a map can never be missing a variant.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantMap<T> {
    values: [T; Variant::COUNT],
}

impl<T> VariantMap<T> {
    /// Build a map by evaluating `f` once per variant, in display order
    pub fn from_fn(mut f: impl FnMut(Variant) -> T) -> Self {
        let all = Variant::all();
        Self {
            values: std::array::from_fn(|i| f(all[i])),
        }
    }

    pub fn get(&self, variant: Variant) -> &T {
        &self.values[variant.index()]
    }

    /// Iterate `(variant, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &T)> {
        Variant::all().iter().copied().zip(self.values.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Variant, &T) -> U) -> VariantMap<U> {
        VariantMap::from_fn(|v| f(v, self.get(v)))
    }
}

impl<T> Index<Variant> for VariantMap<T> {
    type Output = T;

    fn index(&self, variant: Variant) -> &T {
        self.get(variant)
    }
}

impl<T> IndexMut<Variant> for VariantMap<T> {
    fn index_mut(&mut self, variant: Variant) -> &mut T {
        &mut self.values[variant.index()]
    }
}

impl<T: Serialize> Serialize for VariantMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Variant::COUNT))?;
        for (variant, value) in self.iter() {
            map.serialize_entry(variant.id(), value)?;
        }
        map.end()
    }
}
