//! Bounded controls
//!
//! Every value entering the playground goes through one of these. Sliders
//! clamp and snap, selects reject anything outside their option list, so
//! the scale builder and projector never see out-of-domain input.

use crate::error::ControlError;
use crate::tokens::FontWeight;

/// A continuous control with a fixed range and step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const fn new(name: &'static str, min: f32, max: f32, step: f32) -> Self {
        Self {
            name,
            min,
            max,
            step,
        }
    }

    /// Clamp to the range and snap to the nearest step from `min`
    pub fn snap(&self, value: f32) -> Result<f32, ControlError> {
        if !value.is_finite() {
            return Err(ControlError::NonFinite { control: self.name });
        }
        let steps = ((value.clamp(self.min, self.max) - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);
        // Trim float noise left by the step arithmetic
        let decimals = self.decimals();
        let scale = 10f32.powi(decimals);
        Ok((snapped * scale).round() / scale)
    }

    fn decimals(&self) -> i32 {
        let mut decimals = 0;
        let mut step = self.step;
        while decimals < 6 && (step - step.round()).abs() > 1e-6 {
            step *= 10.0;
            decimals += 1;
        }
        decimals
    }
}

/// Responsive scaling intensity
pub const FACTOR: SliderRange = SliderRange::new("factor", 1.0, 8.0, 0.1);

/// Ratio between adjacent heading steps
pub const MODULAR_RATIO: SliderRange = SliderRange::new("modular ratio", 1.0, 2.0, 0.01);

/// Per-variant tracking in em
pub const LETTER_SPACING: SliderRange = SliderRange::new("letter spacing", -0.2, 0.2, 0.001);

/// Selectable root font sizes in px
pub const BASE_FONT_SIZES: [f32; 5] = [8.0, 10.0, 12.0, 14.0, 16.0];

pub const DEFAULT_FACTOR: f32 = 2.0;
pub const DEFAULT_MODULAR_RATIO: f32 = 1.2;
pub const DEFAULT_BASE_FONT_SIZE: f32 = 12.0;

/// Validate a base font size against the select options
pub fn base_font_size(px: f32) -> Result<f32, ControlError> {
    BASE_FONT_SIZES
        .iter()
        .copied()
        .find(|option| *option == px)
        .ok_or(ControlError::InvalidBaseSize(px))
}

/// Validate a weight against the select options
pub fn font_weight(value: u16) -> Result<FontWeight, ControlError> {
    FontWeight::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_clamps_to_range() {
        assert_eq!(FACTOR.snap(0.0), Ok(1.0));
        assert_eq!(FACTOR.snap(42.0), Ok(8.0));
        assert_eq!(MODULAR_RATIO.snap(2.5), Ok(2.0));
        assert_eq!(LETTER_SPACING.snap(-1.0), Ok(-0.2));
    }

    #[test]
    fn test_snap_rounds_to_step() {
        assert_eq!(FACTOR.snap(2.04), Ok(2.0));
        assert_eq!(FACTOR.snap(2.06), Ok(2.1));
        assert_eq!(MODULAR_RATIO.snap(1.333), Ok(1.33));
        assert_eq!(LETTER_SPACING.snap(0.0124), Ok(0.012));
    }

    #[test]
    fn test_snap_rejects_non_finite() {
        assert_eq!(
            FACTOR.snap(f32::NAN),
            Err(ControlError::NonFinite { control: "factor" })
        );
        assert!(MODULAR_RATIO.snap(f32::INFINITY).is_err());
    }

    #[test]
    fn test_base_font_size_options() {
        for px in BASE_FONT_SIZES {
            assert_eq!(base_font_size(px), Ok(px));
        }
        assert_eq!(base_font_size(13.0), Err(ControlError::InvalidBaseSize(13.0)));
    }
}
