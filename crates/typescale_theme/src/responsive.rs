//! Responsive font sizes
//!
//! Projects built typography onto a set of breakpoints. A projected variant
//! starts smaller at `xs` and grows linearly with the breakpoint width until
//! it reaches its declared size at the widest table breakpoint:
//!
//! ```text
//! min   = 1 + (declared - 1) / factor        (rem, the xs size)
//! slope = (declared - min) / table.xl
//! size  = min + slope * width(bp)
//! ```
//!
//! The slope is anchored to the table rather than to the selected set, so
//! dropping `xl` changes nothing at `sm`/`md`/`lg`; viewports above `lg`
//! simply keep the `lg` size.
//!
//! Unless alignment is disabled, every breakpoint size, `xs` included, is
//! snapped so that `size * line_height` lands on a [`GRID_PIXELS`] multiple.
//! Snapping and the 4-decimal rounding never decrease as their input grows,
//! so sizes stay non-decreasing from `xs` upwards. This relies on line
//! heights being unitless multipliers.

use crate::breakpoints::{resolve, Breakpoint, BreakpointTable};
use crate::scale::Typography;
use crate::tokens::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pixel grid that line boxes are aligned to
pub const GRID_PIXELS: f32 = 4.0;

/// Responsive scaling configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveConfig {
    /// Breakpoints that get their own size. `xs` is always the base size and
    /// is ignored here.
    pub breakpoints: Vec<Breakpoint>,
    /// Inverse intensity: larger means gentler growth across breakpoints.
    /// Values below 1 are treated as 1.
    pub factor: f32,
    /// Skip grid alignment
    pub disable_align: bool,
    /// Variants to scale; the rest keep their declared size everywhere
    pub variants: Vec<Variant>,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: vec![Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg, Breakpoint::Xl],
            factor: 2.0,
            disable_align: false,
            variants: Variant::all().to_vec(),
        }
    }
}

impl ResponsiveConfig {
    pub fn includes_xl(&self) -> bool {
        self.breakpoints.contains(&Breakpoint::Xl)
    }

    pub fn set_include_xl(&mut self, include: bool) {
        self.breakpoints.retain(|bp| *bp != Breakpoint::Xl);
        if include {
            self.breakpoints.push(Breakpoint::Xl);
        }
    }
}

/// Typography plus per-breakpoint sizes for every variant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponsiveTypography {
    pub base: Typography,
    pub config: ResponsiveConfig,
    /// Rem sizes keyed by breakpoint; always contains `xs`, the size below
    /// every media query
    sizes: BTreeMap<Breakpoint, VariantMap<f32>>,
}

impl ResponsiveTypography {
    /// Rem size at a projected breakpoint, `None` if that breakpoint has no entry
    pub fn size_at(&self, breakpoint: Breakpoint, variant: Variant) -> Option<f32> {
        self.sizes.get(&breakpoint).map(|sizes| sizes[variant])
    }

    /// Breakpoints with an entry, ascending (starts with `xs`)
    pub fn breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.sizes.keys().copied()
    }

    /// All sizes at one breakpoint
    pub fn sizes_at(&self, breakpoint: Breakpoint) -> Option<&VariantMap<f32>> {
        self.sizes.get(&breakpoint)
    }

    /// Breakpoint whose rule wins at `width`, like a min-width media query cascade
    pub fn active_breakpoint(&self, width: f32) -> Breakpoint {
        let reached = resolve(width, &self.base.breakpoints);
        self.sizes
            .keys()
            .copied()
            .filter(|bp| *bp <= reached)
            .last()
            .unwrap_or(Breakpoint::Xs)
    }

    /// Rem size in effect at a viewport width
    pub fn resolve_rem(&self, variant: Variant, width: f32) -> f32 {
        let breakpoint = self.active_breakpoint(width);
        self.size_at(breakpoint, variant)
            .unwrap_or_else(|| self.base.size_rem(variant))
    }

    /// Pixel size in effect at a viewport width
    pub fn resolve_px(&self, variant: Variant, width: f32) -> f32 {
        self.resolve_rem(variant, width) * self.base.root_font_size
    }
}

/// Project built typography onto the configured breakpoints.
///
/// Deterministic: identical inputs always yield identical output.
pub fn project(base: &Typography, cfg: &ResponsiveConfig) -> ResponsiveTypography {
    let table = &base.breakpoints;
    let factor = cfg.factor.max(1.0);
    let root = base.root_font_size;

    let curves = base.variants.map(|variant, style| {
        if !cfg.variants.contains(&variant) {
            return None;
        }
        let declared = style.size.to_rem(root);
        // Too small to shrink
        if declared <= 1.0 {
            return None;
        }
        Some(Curve::new(declared, factor, table, style.line_height, root, cfg.disable_align))
    });

    let mut sizes = BTreeMap::new();
    let emitted = std::iter::once(Breakpoint::Xs)
        .chain(cfg.breakpoints.iter().copied().filter(|bp| *bp != Breakpoint::Xs));

    for breakpoint in emitted {
        let width = table.min_width(breakpoint);
        sizes.insert(
            breakpoint,
            curves.map(|variant, curve| match curve {
                Some(curve) => curve.at(width),
                None => base.size_rem(variant),
            }),
        );
    }

    tracing::trace!(
        factor,
        disable_align = cfg.disable_align,
        breakpoints = sizes.len(),
        "projected responsive sizes"
    );

    ResponsiveTypography {
        base: base.clone(),
        config: cfg.clone(),
        sizes,
    }
}

/// Linear growth curve for one variant
#[derive(Clone, Copy, Debug)]
struct Curve {
    min: f32,
    slope: f32,
    /// Alignment step in rem, `None` when alignment is off
    grid: Option<f32>,
}

impl Curve {
    fn new(
        declared: f32,
        factor: f32,
        table: &BreakpointTable,
        line_height: f32,
        root: f32,
        disable_align: bool,
    ) -> Self {
        let min = 1.0 + (declared - 1.0) / factor;
        let slope = (declared - min) / table.widest();
        let grid = (!disable_align).then(|| font_grid(line_height, root));
        Self { min, slope, grid }
    }

    fn at(&self, width: f32) -> f32 {
        let value = self.min + self.slope * width;
        let value = match self.grid {
            Some(grid) => align_to_grid(value, grid),
            None => value,
        };
        round4(value)
    }
}

/// Rem step that keeps `size * line_height` on the pixel grid
fn font_grid(line_height: f32, root_font_size: f32) -> f32 {
    GRID_PIXELS / (line_height * root_font_size)
}

/// Nearest multiple of `grid`; ties round up
fn align_to_grid(size: f32, grid: f32) -> f32 {
    (size / grid + 0.5).floor() * grid
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
