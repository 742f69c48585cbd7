//! Typescale Theme System
//!
//! Typography scale computation for the Typescale playground.
//!
//! # Overview
//!
//! - **Scale builder**: font family, root size, modular ratio and per-variant
//!   overrides in; a complete style declaration per variant out
//! - **Responsive projector**: per-breakpoint sizes for the selected variants
//! - **Breakpoints**: the fixed threshold table and viewport resolution
//! - **Live state**: the current parameters, re-derived on every change
//!
//! # Quick Start
//!
//! ```rust
//! use typescale_theme::{build, project, ResponsiveConfig, ScaleParameters, Variant};
//!
//! let params = ScaleParameters {
//!     base_font_size: 12.0,
//!     modular_ratio: 1.25,
//!     ..ScaleParameters::default()
//! };
//! let typography = build(&params);
//! assert!((typography.size_rem(Variant::H1) - 3.8147).abs() < 1e-4);
//!
//! let responsive = project(&typography, &ResponsiveConfig::default());
//! let phone = responsive.resolve_px(Variant::H1, 375.0);
//! let desktop = responsive.resolve_px(Variant::H1, 1440.0);
//! assert!(phone < desktop);
//! ```
//!
//! # Live Parameters
//!
//! ```rust,ignore
//! use typescale_theme::{FontPreset, PlaygroundState};
//!
//! PlaygroundState::init_default();
//! let state = PlaygroundState::get();
//!
//! state.set_font(FontPreset::Inter);
//! state.set_modular_ratio(1.333)?;
//! let snapshot = state.snapshot();
//! ```

pub mod breakpoints;
pub mod controls;
pub mod error;
pub mod mirror;
pub mod presets;
pub mod responsive;
pub mod scale;
pub mod state;
pub mod tokens;

// Re-export commonly used types
pub use breakpoints::{resolve, Breakpoint, BreakpointTable, ViewportTracker};
pub use error::ControlError;
pub use mirror::{root_property, DocumentRoot, RootStyleMirror};
pub use presets::FontPreset;
pub use responsive::{project, ResponsiveConfig, ResponsiveTypography};
pub use scale::{build, ScaleParameters, Typography, VariantDefaults};
pub use state::{PlaygroundState, SubscriptionId};
pub use tokens::*;
