//! Page configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site directory and describes the sections the page registers, their
//! status-bar colors, and (optionally) their layout for viewport simulation.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_color = "#fdfbf7"   # Bar color when no section is visible
//! night_mode = false          # Force a black, translucent bar
//!
//! [viewport]
//! height = 800.0              # Viewport height in page pixels
//! threshold = 0.5             # Default visible-fraction threshold
//!
//! [[sections]]
//! id = "hero"                 # Unique section key
//! color = "#1c1c1c"           # Bar color while this section wins
//! top = 0.0                   # Layout (optional, both or neither)
//! height = 900.0
//! threshold = 0.3             # Per-section override (optional)
//! ```
//!
//! ## Merging
//!
//! User values are merged on top of the stock defaults. Tables merge
//! key-by-key; everything else replaces. `sections` is an array, so a user
//! file that declares any `[[sections]]` replaces the stock list entirely.
//! List order is registration order, which is resolution priority.
//!
//! Unknown keys are rejected to catch typos early. Colors are never
//! rejected: the coordinator degrades on malformed colors, and
//! [`TintConfig::color_warnings`] reports them instead.

use crate::color;
use crate::coordinator::{CoordinatorConfig, StatusBarCoordinator};
use crate::sink::StatusBarSink;
use crate::viewport::{SectionBounds, Viewport, VisibilityObserver};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Page configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TintConfig {
    /// Bar color when no section is visible.
    pub default_color: String,
    /// Night-mode override at page load.
    pub night_mode: bool,
    /// Viewport used for scroll simulation.
    pub viewport: ViewportConfig,
    /// Sections in registration order.
    pub sections: Vec<SectionConfig>,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            default_color: "#fdfbf7".to_string(),
            night_mode: false,
            viewport: ViewportConfig::default(),
            sections: stock_sections(),
        }
    }
}

/// Viewport simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Viewport height in page pixels.
    pub height: f64,
    /// Visible fraction a section needs to count as visible.
    pub threshold: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: 800.0,
            threshold: 0.5,
        }
    }
}

/// One page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub id: String,
    pub color: String,
    /// Offset of the section's top edge from the top of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Overrides `viewport.threshold` for this section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl SectionConfig {
    /// Page placement, when both `top` and `height` are set.
    pub fn bounds(&self) -> Option<SectionBounds> {
        Some(SectionBounds {
            id: self.id.clone(),
            top: self.top?,
            height: self.height?,
        })
    }
}

fn section(id: &str, color: &str, top: f64, height: f64) -> SectionConfig {
    SectionConfig {
        id: id.to_string(),
        color: color.to_string(),
        top: Some(top),
        height: Some(height),
        threshold: None,
    }
}

/// The invitation page, top to bottom.
fn stock_sections() -> Vec<SectionConfig> {
    vec![
        section("hero", "#1c1c1c", 0.0, 900.0),
        section("gallery", "#f8f5f0", 900.0, 800.0),
        section("itinerary", "#f8f5f0", 1700.0, 1000.0),
        section("location", "#2f3e36", 2700.0, 700.0),
        section("dress-code", "#f3e9dc", 3400.0, 600.0),
        section("gifts", "#fdfbf7", 4000.0, 600.0),
        section("rsvp", "#3b2f2f", 4600.0, 900.0),
    ]
}

fn check_threshold(value: f64, key: &str) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{key} must be within 0-1")))
    }
}

impl TintConfig {
    /// Validate structure. Colors are not checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport.height.is_finite() && self.viewport.height > 0.0) {
            return Err(ConfigError::Validation(
                "viewport.height must be positive".into(),
            ));
        }
        check_threshold(self.viewport.threshold, "viewport.threshold")?;

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "sections.id must not be empty".into(),
                ));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if section.top.is_some() != section.height.is_some() {
                return Err(ConfigError::Validation(format!(
                    "section '{}' must set both top and height, or neither",
                    section.id
                )));
            }
            if section.height.is_some_and(|h| h < 0.0) {
                return Err(ConfigError::Validation(format!(
                    "section '{}' height must not be negative",
                    section.id
                )));
            }
            if let Some(t) = section.threshold {
                check_threshold(t, &format!("section '{}' threshold", section.id))?;
            }
        }
        Ok(())
    }

    /// Colors that will not decode as `#rrggbb`, as display lines.
    pub fn color_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !color::is_well_formed(&self.default_color) {
            warnings.push(format!("default_color {:?} is not #rrggbb", self.default_color));
        }
        for section in &self.sections {
            if !color::is_well_formed(&section.color) {
                warnings.push(format!(
                    "section '{}' color {:?} is not #rrggbb",
                    section.id, section.color
                ));
            }
        }
        warnings
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            default_color: self.default_color.clone(),
            night_mode: self.night_mode,
        }
    }

    /// Register every configured section, in list order.
    pub fn register_all<S: StatusBarSink>(&self, coordinator: &mut StatusBarCoordinator<S>) {
        for section in &self.sections {
            coordinator.register_section(&section.id, &section.color);
        }
    }

    /// A viewport observing every section that has layout.
    pub fn viewport(&self) -> Viewport {
        let mut viewport = Viewport::new(self.viewport.height);
        for section in &self.sections {
            if let Some(bounds) = section.bounds() {
                let threshold = section.threshold.unwrap_or(self.viewport.threshold);
                viewport.observe(VisibilityObserver::new(bounds, threshold));
            }
        }
        viewport
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`TintConfig::default`] as a TOML table, the bottom layer of every load.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(TintConfig::default()).expect("default config must serialize")
}

/// Layer `overlay` over `base`.
///
/// Only tables recurse. `default_color = ...` or `[viewport] height = ...`
/// override a single key and leave siblings alone, while `sections` is an
/// array, so any `[[sections]]` in the overlay replaces the stock page list
/// wholesale and its order becomes registration order.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    let (mut merged, layer) = match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(layer)) => (base, layer),
        (_, replacement) => return replacement,
    };
    for (key, value) in layer {
        let value = match merged.remove(&key) {
            Some(existing) => merge_toml(existing, value),
            None => value,
        };
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
}

/// Read the site's `config.toml` without applying defaults.
///
/// A site without the file is valid and yields `Ok(None)`. A file that
/// exists but is not TOML is an error.
pub fn load_raw_config(site: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = site.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let value = toml::from_str(&fs::read_to_string(&path)?)?;
    Ok(Some(value))
}

/// Apply the site layer (if any) over `base`, then type-check and validate.
///
/// Unknown keys fail here, during deserialization; structural problems
/// fail in [`TintConfig::validate`]. Colors never fail.
pub fn resolve_config(
    base: toml::Value,
    site_layer: Option<toml::Value>,
) -> Result<TintConfig, ConfigError> {
    let merged = match site_layer {
        Some(layer) => merge_toml(base, layer),
        None => base,
    };
    let config: TintConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock page definition overridden by `site/config.toml`.
pub fn load_config(site: &Path) -> Result<TintConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(site)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# status-tint configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Status-bar color while no section is visible.
default_color = "#fdfbf7"

# Force a black bar with light content, whatever is on screen.
night_mode = false

# ---------------------------------------------------------------------------
# Viewport simulation (used by `replay` scroll steps)
# ---------------------------------------------------------------------------
[viewport]
# Viewport height in page pixels.
height = 800.0

# Fraction of a section's height that must be on screen for it to count
# as visible. Sections can override this with their own `threshold`.
threshold = 0.5

# ---------------------------------------------------------------------------
# Sections, in registration order
# ---------------------------------------------------------------------------
# When several sections are visible at once, the one listed first wins.
# `top` and `height` are optional page-pixel layout; set both or neither.
# Declaring any [[sections]] replaces this whole list.

[[sections]]
id = "hero"
color = "#1c1c1c"
top = 0.0
height = 900.0

[[sections]]
id = "gallery"
color = "#f8f5f0"
top = 900.0
height = 800.0

[[sections]]
id = "itinerary"
color = "#f8f5f0"
top = 1700.0
height = 1000.0

[[sections]]
id = "location"
color = "#2f3e36"
top = 2700.0
height = 700.0

[[sections]]
id = "dress-code"
color = "#f3e9dc"
top = 3400.0
height = 600.0

[[sections]]
id = "gifts"
color = "#fdfbf7"
top = 4000.0
height = 600.0

[[sections]]
id = "rsvp"
color = "#3b2f2f"
top = 4600.0
height = 900.0
"##
}
