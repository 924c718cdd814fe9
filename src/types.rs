//! Shared types passed between the coordinator, sinks, and CLI output.
//!
//! Everything here serializes to JSON so `--json` output and replay traces
//! share one shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status-bar content style.
///
/// `Default` puts dark content on a light bar. `Translucent` puts light
/// content over a dark or overlay bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    Default,
    Translucent,
}

impl BarStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BarStyle::Default => "default",
            BarStyle::Translucent => "translucent",
        }
    }
}

impl fmt::Display for BarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed region of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable key for the section's lifetime.
    pub id: String,
    /// Status-bar color while this section is the resolution target.
    pub color: String,
    /// Last reported visibility.
    pub is_visible: bool,
}

/// Where a resolved color came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ColorSource {
    /// The first visible section, by registration order.
    Section(String),
    /// No section visible; the coordinator's default color.
    Default,
    /// Night mode override.
    Night,
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSource::Section(id) => write!(f, "section {id}"),
            ColorSource::Default => f.write_str("default color"),
            ColorSource::Night => f.write_str("night mode"),
        }
    }
}

/// The single color/style pair applied to the status bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub color: String,
    pub style: BarStyle,
    pub source: ColorSource,
}
