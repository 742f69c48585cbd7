//! Typescale configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use typescale_theme::{controls, FontPreset, PlaygroundState, Variant};

/// Default file name looked up in a directory
pub const CONFIG_FILE: &str = "typescale.toml";

/// Top-level playground configuration (typescale.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default)]
    pub responsive: ResponsiveSection,
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Per-variant weight overrides
    #[serde(default)]
    pub weights: BTreeMap<Variant, u16>,
    /// Per-variant tracking overrides in em
    #[serde(default)]
    pub letter_spacing: BTreeMap<Variant, f32>,
}

/// Scale builder parameters
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ScaleConfig {
    #[serde(default)]
    pub font: FontPreset,
    #[serde(default = "default_base_font_size")]
    pub base_font_size: f32,
    #[serde(default = "default_modular_ratio")]
    pub modular_ratio: f32,
}

fn default_base_font_size() -> f32 {
    controls::DEFAULT_BASE_FONT_SIZE
}

fn default_modular_ratio() -> f32 {
    controls::DEFAULT_MODULAR_RATIO
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            font: FontPreset::default(),
            base_font_size: default_base_font_size(),
            modular_ratio: default_modular_ratio(),
        }
    }
}

/// Responsive projection settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ResponsiveSection {
    #[serde(default = "default_factor")]
    pub factor: f32,
    #[serde(default)]
    pub disable_align: bool,
    #[serde(default = "default_true")]
    pub include_xl: bool,
}

fn default_factor() -> f32 {
    controls::DEFAULT_FACTOR
}

fn default_true() -> bool {
    true
}

impl Default for ResponsiveSection {
    fn default() -> Self {
        Self {
            factor: default_factor(),
            disable_align: false,
            include_xl: true,
        }
    }
}

/// Simulated viewport
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl PlaygroundConfig {
    /// Load configuration from a file, or from `typescale.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {CONFIG_FILE} found at {}. Run `typescale init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: PlaygroundConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Load from an explicit path, or fall back to `./typescale.toml` if present
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Push every configured value through the state's bounded setters
    pub fn apply(&self, state: &PlaygroundState) -> Result<()> {
        state.set_font(self.scale.font);
        state
            .set_base_font_size(self.scale.base_font_size)
            .context("[scale] base_font_size")?;
        state
            .set_modular_ratio(self.scale.modular_ratio)
            .context("[scale] modular_ratio")?;
        state
            .set_factor(self.responsive.factor)
            .context("[responsive] factor")?;
        state.set_disable_align(self.responsive.disable_align);
        state.set_include_xl(self.responsive.include_xl);

        for (variant, weight) in &self.weights {
            state
                .set_font_weight(*variant, *weight)
                .with_context(|| format!("[weights] {variant}"))?;
        }
        for (variant, em) in &self.letter_spacing {
            state
                .set_letter_spacing(*variant, *em)
                .with_context(|| format!("[letter_spacing] {variant}"))?;
        }
        Ok(())
    }
}
