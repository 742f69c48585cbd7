//! Plain-text rendering of the playground tables

use std::fmt::Write;
use typescale_core::probe::Measurement;
use typescale_theme::{Breakpoint, ResponsiveTypography, TextTransform, Variant};

/// Sample text rendered in every variant row
pub const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

/// Footer shown under the variant table
pub const NOTES: &str = "\
NOTES
Lower factor increases small-screen sizes more aggressively. Keep line-heights
unitless to allow alignment to the 4px grid when disable-align is off. Resize
the viewport to see font-size changes at sm, md, lg, and xl.";

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Status line: root size, ratio, responsive settings, and the active breakpoint
pub fn status_line(
    snapshot: &ResponsiveTypography,
    ratio: f32,
    breakpoint: Breakpoint,
    width: f32,
) -> String {
    let config = &snapshot.config;
    format!(
        "Base html FontSize: {}px \u{2022} Modular ratio: {ratio} \u{2022} Factor: {} \u{2022} Align: {} \u{2022} xl: {} \u{2022} Current breakpoint: {breakpoint} ({width}px)",
        snapshot.base.root_font_size,
        config.factor,
        on_off(!config.disable_align),
        on_off(config.includes_xl()),
    )
}

/// One row per variant with its measured size and adjustable values
pub fn variant_table(snapshot: &ResponsiveTypography, measured: &[(Variant, Measurement)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>8} {:>11} {:>7} {:>15} {:>9}  {}",
        "VARIANT", "SIZE", "DECLARED", "WEIGHT", "LETTER SPACING", "TRANSFORM", "PREVIEW"
    );
    for (variant, measurement) in measured {
        let style = snapshot.base.style(*variant);
        let (transform, preview) = match style.text_transform {
            TextTransform::None => ("none", SAMPLE_TEXT.to_string()),
            TextTransform::Uppercase => ("uppercase", SAMPLE_TEXT.to_uppercase()),
        };
        let _ = writeln!(
            out,
            "{:<10} {:>8} {:>11} {:>7} {:>13.3}em {:>9}  {}",
            variant.id().to_uppercase(),
            measurement.to_string(),
            style.size.to_string(),
            style.weight.to_string(),
            style.letter_spacing,
            transform,
            preview,
        );
    }
    out
}

/// Rem size of every variant at every projected breakpoint
pub fn breakpoint_table(snapshot: &ResponsiveTypography) -> String {
    let breakpoints: Vec<Breakpoint> = snapshot.breakpoints().collect();
    let table = &snapshot.base.breakpoints;

    let mut out = String::new();
    let _ = write!(out, "{:<10}", "VARIANT");
    for bp in &breakpoints {
        let _ = write!(out, " {:>12}", format!("{bp}\u{2265}{}", table.min_width(*bp)));
    }
    out.push('\n');

    for variant in Variant::all() {
        let _ = write!(out, "{:<10}", variant.id());
        for bp in &breakpoints {
            match snapshot.size_at(*bp, *variant) {
                Some(rem) => {
                    let _ = write!(out, " {:>9.4}rem", rem);
                }
                None => {
                    let _ = write!(out, " {:>12}", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}
