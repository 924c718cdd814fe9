//! Scripted event sequences replayed through a coordinator.
//!
//! A scenario is a TOML file of `[[step]]` entries, each tagged by `action`:
//!
//! ```toml
//! [[step]]
//! action = "show"
//! id = "hero"
//!
//! [[step]]
//! action = "scroll"
//! offset = 1200.0
//!
//! [[step]]
//! action = "night-mode"
//! enabled = true
//! ```
//!
//! | action | fields | coordinator call |
//! |--------|--------|------------------|
//! | `register` | `id`, `color` | `register_section` |
//! | `unregister` | `id` | `unregister_section` |
//! | `show` / `hide` | `id` | `set_visibility` |
//! | `default-color` | `color` | `set_default_color` |
//! | `night-mode` | `enabled` | `set_night_mode` |
//! | `scroll` | `offset` | viewport observers → `set_visibility` |
//!
//! Replay starts from the page config: the coordinator is built from it and
//! every configured section is registered before the first step. The trace
//! records the applied resolution after the setup (step 0) and after every
//! step. Registering or unregistering a section resets its observer, so the
//! next scroll reports it again. A non-finite scroll offset hides every
//! laid-out section.

use crate::config::TintConfig;
use crate::coordinator::{CoordinatorEvent, StatusBarCoordinator};
use crate::sink::StatusBarSink;
use crate::types::Resolution;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Register { id: String, color: String },
    Unregister { id: String },
    Show { id: String },
    Hide { id: String },
    DefaultColor { color: String },
    NightMode { enabled: bool },
    Scroll { offset: f64 },
}

impl Step {
    /// Short human-readable form, e.g. `show hero`.
    pub fn describe(&self) -> String {
        match self {
            Step::Register { id, color } => format!("register {id} {color}"),
            Step::Unregister { id } => format!("unregister {id}"),
            Step::Show { id } => format!("show {id}"),
            Step::Hide { id } => format!("hide {id}"),
            Step::DefaultColor { color } => format!("default-color {color}"),
            Step::NightMode { enabled } => {
                format!("night-mode {}", if *enabled { "on" } else { "off" })
            }
            Step::Scroll { offset } => format!("scroll {offset}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }
}

/// The applied resolution after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    /// 0 for setup, then 1-based step index.
    pub step: usize,
    pub description: String,
    pub resolution: Resolution,
}

/// Outcome of a replay: the trace plus the sink, for inspection.
pub struct Replay<S> {
    pub trace: Vec<TraceEntry>,
    pub sink: S,
}

/// Replay `scenario` against a coordinator built from `config`.
pub fn replay<S: StatusBarSink>(
    config: &TintConfig,
    scenario: &Scenario,
    sink: S,
    events: Option<Sender<CoordinatorEvent>>,
) -> Replay<S> {
    let mut coordinator = StatusBarCoordinator::new(sink, config.coordinator_config());
    if let Some(tx) = events {
        coordinator = coordinator.with_events(tx);
    }
    config.register_all(&mut coordinator);
    let mut viewport = config.viewport();

    let mut trace = vec![TraceEntry {
        step: 0,
        description: format!("setup ({} sections)", coordinator.len()),
        resolution: coordinator.last_resolution().clone(),
    }];

    for (i, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::Register { id, color } => {
                coordinator.register_section(id, color);
                viewport.reset(id);
            }
            Step::Unregister { id } => {
                coordinator.unregister_section(id);
                viewport.reset(id);
            }
            Step::Show { id } => coordinator.set_visibility(id, true),
            Step::Hide { id } => coordinator.set_visibility(id, false),
            Step::DefaultColor { color } => coordinator.set_default_color(color),
            Step::NightMode { enabled } => coordinator.set_night_mode(*enabled),
            Step::Scroll { offset } => {
                viewport.scroll_to(*offset, &mut coordinator);
            }
        }
        trace.push(TraceEntry {
            step: i + 1,
            description: step.describe(),
            resolution: coordinator.last_resolution().clone(),
        });
    }

    Replay {
        trace,
        sink: coordinator.into_sink(),
    }
}
