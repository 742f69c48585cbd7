use proptest::prelude::*;
use typescale_theme::controls::BASE_FONT_SIZES;
use typescale_theme::{build, FontPreset, FontSize, FontWeight, ScaleParameters, Variant};

fn params(base: f32, ratio: f32) -> ScaleParameters {
    ScaleParameters {
        base_font_size: base,
        modular_ratio: ratio,
        ..ScaleParameters::default()
    }
}

#[test]
fn largest_heading_follows_sixth_power_of_ratio() {
    let typography = build(&params(12.0, 1.25));
    assert_eq!(typography.style(Variant::H1).size, FontSize::Rem(1.25f32.powi(6)));
    assert!((typography.size_rem(Variant::H1) - 3.815).abs() < 1e-3);
}

#[test]
fn build_is_deterministic() {
    let mut p = params(14.0, 1.414);
    p.font_family = FontPreset::Poppins.stack().to_string();
    p.font_weight_overrides.insert(Variant::H4, FontWeight::BLACK);
    p.letter_spacing_overrides.insert(Variant::Caption, -0.05);

    assert_eq!(build(&p), build(&p));
}

#[test]
fn typography_serializes_every_variant() {
    let json = serde_json::to_value(build(&ScaleParameters::default())).unwrap();
    let variants = json["variants"].as_object().unwrap();
    assert_eq!(variants.len(), Variant::COUNT);
    assert_eq!(json["variants"]["h1"]["weight"], 600);
    assert_eq!(json["variants"]["overline"]["text_transform"], "uppercase");
    assert_eq!(json["variants"]["body1"]["size"]["unit"], "px");
}

fn weight_strategy() -> impl Strategy<Value = FontWeight> {
    prop::sample::select(FontWeight::palette().to_vec())
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::all().to_vec())
}

proptest! {
    /// Every variant has exactly one declaration, for any parameters
    #[test]
    fn build_covers_every_variant(
        base in prop::sample::select(BASE_FONT_SIZES.to_vec()),
        ratio in 1.0f32..=2.0,
    ) {
        let typography = build(&params(base, ratio));
        let listed: Vec<Variant> = typography.variants.iter().map(|(v, _)| v).collect();
        prop_assert_eq!(listed.as_slice(), Variant::all());
    }

    /// Adjacent heading sizes differ by ratio^(k2 - k1)
    #[test]
    fn headings_form_a_geometric_progression(
        base in prop::sample::select(BASE_FONT_SIZES.to_vec()),
        ratio in 1.0f32..=2.0,
    ) {
        let typography = build(&params(base, ratio));
        let headings: Vec<(Variant, i32)> = Variant::all()
            .iter()
            .filter_map(|v| v.scale_step().map(|k| (*v, k)))
            .collect();

        for &(v1, k1) in &headings {
            for &(v2, k2) in &headings {
                if k1 >= k2 {
                    continue;
                }
                let observed = typography.size_rem(v2) / typography.size_rem(v1);
                let expected = ratio.powi(k2 - k1);
                prop_assert!(
                    (observed - expected).abs() <= expected * 1e-5,
                    "{}/{}: {} vs {}", v2, v1, observed, expected
                );
            }
        }
    }

    /// Overrides always beat defaults
    #[test]
    fn overrides_win(
        variant in variant_strategy(),
        weight in weight_strategy(),
        spacing in -0.2f32..=0.2,
    ) {
        let mut p = ScaleParameters::default();
        p.font_weight_overrides.insert(variant, weight);
        p.letter_spacing_overrides.insert(variant, spacing);
        let typography = build(&p);

        prop_assert_eq!(typography.style(variant).weight, weight);
        prop_assert_eq!(typography.style(variant).letter_spacing, spacing);
    }
}
