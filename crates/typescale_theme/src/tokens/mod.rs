//! Design tokens for typography
//!
//! - Variants (the closed set of typographic roles)
//! - Font sizes, weights, and text transforms
//! - Per-variant style declarations

mod typography;
mod variant;

pub use typography::*;
pub use variant::*;
