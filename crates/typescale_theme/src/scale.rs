//! Modular type scale builder
//!
//! Turns a handful of parameters into a complete style declaration for every
//! variant. Heading-class variants sit on a geometric scale (`ratio^k` rem),
//! so each step is the same multiple of the one below it whatever ratio is
//! chosen. Body and label variants keep conventional fixed sizes.

use crate::breakpoints::BreakpointTable;
use crate::presets::FontPreset;
use crate::tokens::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Mutable input of the scale builder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleParameters {
    /// Root (html) font size in px
    pub base_font_size: f32,
    pub modular_ratio: f32,
    pub font_family: String,
    #[serde(default)]
    pub font_weight_overrides: FxHashMap<Variant, FontWeight>,
    /// Tracking overrides in em
    #[serde(default)]
    pub letter_spacing_overrides: FxHashMap<Variant, f32>,
}

impl Default for ScaleParameters {
    fn default() -> Self {
        Self {
            base_font_size: 12.0,
            modular_ratio: 1.2,
            font_family: FontPreset::default().stack().to_string(),
            font_weight_overrides: FxHashMap::default(),
            letter_spacing_overrides: FxHashMap::default(),
        }
    }
}

impl ScaleParameters {
    /// Override if present, else the variant default
    pub fn font_weight(&self, variant: Variant) -> FontWeight {
        self.font_weight_overrides
            .get(&variant)
            .copied()
            .unwrap_or_else(|| VariantDefaults::of(variant).weight)
    }

    /// Override if present, else the variant default (em)
    pub fn letter_spacing(&self, variant: Variant) -> f32 {
        self.letter_spacing_overrides
            .get(&variant)
            .copied()
            .unwrap_or_else(|| VariantDefaults::of(variant).letter_spacing)
    }
}

/// Fixed per-variant defaults
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantDefaults {
    pub weight: FontWeight,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub text_transform: TextTransform,
}

impl VariantDefaults {
    pub fn of(variant: Variant) -> Self {
        use FontWeight as W;
        let (weight, letter_spacing, line_height) = match variant {
            Variant::H1 => (W::SEMI_BOLD, -0.094, 1.05),
            Variant::H2 => (W::SEMI_BOLD, -0.031, 1.1),
            Variant::H3 => (W::BOLD, 0.0, 1.15),
            Variant::H4 => (W::SEMI_BOLD, 0.016, 1.2),
            Variant::H5 => (W::BOLD, 0.0, 1.25),
            Variant::H6 => (W::SEMI_BOLD, 0.009, 1.3),
            Variant::Subtitle1 => (W::MEDIUM, 0.009, 1.4),
            Variant::Subtitle2 => (W::MEDIUM, 0.006, 1.33),
            Variant::Body1 => (W::NORMAL, 0.0, 1.6),
            Variant::Body2 => (W::NORMAL, 0.0, 1.6),
            Variant::Caption => (W::NORMAL, 0.01, 1.4),
            Variant::Overline => (W::SEMI_BOLD, 0.08, 1.4),
            Variant::Button => (W::MEDIUM, 0.02, 1.2),
            Variant::Label => (W::MEDIUM, 0.00938, 1.4375),
        };
        let text_transform = match variant {
            Variant::Overline => TextTransform::Uppercase,
            _ => TextTransform::None,
        };
        Self {
            weight,
            letter_spacing,
            line_height,
            text_transform,
        }
    }
}

/// Size of a variant that is not on the modular scale
fn fixed_size(variant: Variant) -> FontSize {
    match variant {
        Variant::Body1 => FontSize::Px(14.0),
        Variant::Body2 => FontSize::Px(12.0),
        Variant::Caption | Variant::Overline => FontSize::Rem(0.75),
        _ => FontSize::Rem(1.0),
    }
}

/// Component-level style overrides carried alongside the variants
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComponentOverrides {
    /// Form input labels track the `label` variant
    pub input_label: StyleDeclaration,
}

/// Built typography: every variant's declaration plus the context needed to
/// resolve relative sizes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Typography {
    /// Root (html) font size in px that rem sizes are relative to
    pub root_font_size: f32,
    pub font_family: String,
    pub breakpoints: BreakpointTable,
    pub variants: VariantMap<StyleDeclaration>,
    pub components: ComponentOverrides,
}

impl Typography {
    pub fn style(&self, variant: Variant) -> &StyleDeclaration {
        self.variants.get(variant)
    }

    /// A variant's declared size in rem
    pub fn size_rem(&self, variant: Variant) -> f32 {
        self.style(variant).size.to_rem(self.root_font_size)
    }
}

/// Build the complete set of variant declarations.
///
/// Pure: the same parameters always produce the same output.
pub fn build(params: &ScaleParameters) -> Typography {
    let ratio = params.modular_ratio;
    let variants = VariantMap::from_fn(|variant| {
        let defaults = VariantDefaults::of(variant);
        let size = match variant.scale_step() {
            Some(step) => FontSize::Rem(ratio.powi(step)),
            None => fixed_size(variant),
        };
        StyleDeclaration {
            size,
            weight: params.font_weight(variant),
            line_height: defaults.line_height,
            letter_spacing: params.letter_spacing(variant),
            text_transform: defaults.text_transform,
        }
    });

    let label = variants[Variant::Label];
    let components = ComponentOverrides {
        input_label: StyleDeclaration {
            size: FontSize::Rem(1.0),
            ..label
        },
    };

    Typography {
        root_font_size: params.base_font_size,
        font_family: params.font_family.clone(),
        breakpoints: BreakpointTable::DEFAULT,
        variants,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_overrides() {
        let typography = build(&ScaleParameters::default());
        assert_eq!(typography.style(Variant::H3).weight, FontWeight::BOLD);
        assert_eq!(typography.style(Variant::Overline).letter_spacing, 0.08);
        assert_eq!(typography.style(Variant::Body1).letter_spacing, 0.0);
        assert_eq!(
            typography.style(Variant::Overline).text_transform,
            TextTransform::Uppercase
        );
        assert_eq!(
            typography.style(Variant::Button).text_transform,
            TextTransform::None
        );
    }

    #[test]
    fn test_fixed_sizes_ignore_ratio() {
        let mut params = ScaleParameters::default();
        let a = build(&params);
        params.modular_ratio = 1.9;
        let b = build(&params);

        for variant in Variant::all().iter().filter(|v| !v.is_heading()) {
            assert_eq!(a.style(*variant).size, b.style(*variant).size, "{variant}");
        }
        assert_eq!(a.style(Variant::Body1).size, FontSize::Px(14.0));
        assert_eq!(a.style(Variant::Caption).size, FontSize::Rem(0.75));
    }

    #[test]
    fn test_body_rem_size_depends_on_root() {
        let params = ScaleParameters {
            base_font_size: 10.0,
            ..ScaleParameters::default()
        };
        assert_eq!(build(&params).size_rem(Variant::Body1), 1.4);
    }

    #[test]
    fn test_input_label_mirrors_label_variant() {
        let mut params = ScaleParameters::default();
        params
            .font_weight_overrides
            .insert(Variant::Label, FontWeight::BOLD);
        params.letter_spacing_overrides.insert(Variant::Label, 0.05);
        let typography = build(&params);
        let input_label = typography.components.input_label;

        assert_eq!(input_label.weight, FontWeight::BOLD);
        assert_eq!(input_label.letter_spacing, 0.05);
        assert_eq!(input_label.line_height, 1.4375);
        assert_eq!(input_label.size, FontSize::Rem(1.0));
    }
}
