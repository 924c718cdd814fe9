//! Status-bar color coordination.
//!
//! A page is a vertical stack of sections (hero, gallery, itinerary, ...).
//! Each one registers with the coordinator when it mounts and reports
//! visibility as it scrolls in and out of view. After every change the
//! coordinator resolves exactly one `(color, style)` pair and hands it to
//! its [`StatusBarSink`].
//!
//! ## Resolution
//!
//! ```text
//! 1. Visible sections, in registration order
//! 2. First visible section's color, else the default color
//! 3. Night mode replaces the color with NIGHT_COLOR
//! 4. Style from luminance (> 0.5 → default, else translucent);
//!    night mode always forces translucent
//! 5. Apply to the sink, every time
//! ```
//!
//! Registration order is the tie-break when several sections are visible at
//! once. It is not DOM order and not z-order: whichever section registered
//! first wins.
//!
//! ## Failure Semantics
//!
//! Nothing here returns an error. Visibility reports for unknown ids are
//! dropped (an observer may fire after its section unmounted), and malformed
//! colors degrade through [`color::parse_hex`] instead of failing.
//!
//! ## Lifecycle
//!
//! One coordinator per page session. Callers construct it with the initial
//! [`CoordinatorConfig`], hold it for the session, and drop it at the end.
//! All operations take `&mut self` and run to completion, so observers can
//! call in any order without ever seeing a half-applied state.

use crate::color::{self, NIGHT_COLOR};
use crate::sink::StatusBarSink;
use crate::types::{BarStyle, ColorSource, Resolution, Section};
use std::sync::mpsc::Sender;

/// Initial configuration injected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    /// Fallback color when no section is visible.
    pub default_color: String,
    /// Global night-mode override.
    pub night_mode: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_color: "#ffffff".to_string(),
            night_mode: false,
        }
    }
}

/// Progress events, one or two per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    SectionRegistered {
        id: String,
        color: String,
        /// An entry with this id already existed and was reset.
        replaced: bool,
    },
    SectionUnregistered {
        id: String,
        /// False when the id was not registered.
        known: bool,
    },
    VisibilityChanged {
        id: String,
        visible: bool,
    },
    /// Visibility report for an id that is not registered.
    VisibilityIgnored {
        id: String,
    },
    DefaultColorChanged {
        color: String,
    },
    NightModeChanged {
        enabled: bool,
    },
    /// A resolution was applied to the sink.
    Applied(Resolution),
}

pub struct StatusBarCoordinator<S: StatusBarSink> {
    /// Registration order is resolution order.
    sections: Vec<Section>,
    default_color: String,
    night_mode: bool,
    sink: S,
    last: Resolution,
    events: Option<Sender<CoordinatorEvent>>,
}

impl<S: StatusBarSink> StatusBarCoordinator<S> {
    /// Create a coordinator and apply the initial resolution to `sink`.
    pub fn new(sink: S, config: CoordinatorConfig) -> Self {
        let mut coordinator = Self {
            sections: Vec::new(),
            default_color: config.default_color,
            night_mode: config.night_mode,
            sink,
            last: Resolution {
                color: String::new(),
                style: BarStyle::Default,
                source: ColorSource::Default,
            },
            events: None,
        };
        coordinator.apply();
        coordinator
    }

    /// Send progress events to `tx`. A dropped receiver is ignored.
    pub fn with_events(mut self, tx: Sender<CoordinatorEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn set_default_color(&mut self, color: &str) {
        self.default_color = color.to_string();
        self.emit(CoordinatorEvent::DefaultColorChanged {
            color: color.to_string(),
        });
        self.apply();
    }

    pub fn set_night_mode(&mut self, enabled: bool) {
        self.night_mode = enabled;
        self.emit(CoordinatorEvent::NightModeChanged { enabled });
        self.apply();
    }

    /// Insert a hidden section, or reset an existing one in place.
    ///
    /// A replaced section keeps its original registration position.
    pub fn register_section(&mut self, id: &str, color: &str) {
        let replaced = match self.sections.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                existing.color = color.to_string();
                existing.is_visible = false;
                true
            }
            None => {
                self.sections.push(Section {
                    id: id.to_string(),
                    color: color.to_string(),
                    is_visible: false,
                });
                false
            }
        };
        self.emit(CoordinatorEvent::SectionRegistered {
            id: id.to_string(),
            color: color.to_string(),
            replaced,
        });
        self.apply();
    }

    /// Remove a section. Resolution runs even if the id was unknown.
    pub fn unregister_section(&mut self, id: &str) {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        let known = self.sections.len() != before;
        self.emit(CoordinatorEvent::SectionUnregistered {
            id: id.to_string(),
            known,
        });
        self.apply();
    }

    /// Record an observer report. Unknown ids are a silent no-op.
    pub fn set_visibility(&mut self, id: &str, visible: bool) {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            self.emit(CoordinatorEvent::VisibilityIgnored { id: id.to_string() });
            return;
        };
        section.is_visible = visible;
        self.emit(CoordinatorEvent::VisibilityChanged {
            id: id.to_string(),
            visible,
        });
        self.apply();
    }

    /// Compute the current resolution without touching the sink.
    pub fn resolve(&self) -> Resolution {
        if self.night_mode {
            return Resolution {
                color: NIGHT_COLOR.to_string(),
                style: BarStyle::Translucent,
                source: ColorSource::Night,
            };
        }
        match self.sections.iter().find(|s| s.is_visible) {
            Some(section) => Resolution {
                color: section.color.clone(),
                style: color::style_for(&section.color),
                source: ColorSource::Section(section.id.clone()),
            },
            None => Resolution {
                color: self.default_color.clone(),
                style: color::style_for(&self.default_color),
                source: ColorSource::Default,
            },
        }
    }

    /// The pair most recently handed to the sink.
    pub fn last_resolution(&self) -> &Resolution {
        &self.last
    }

    /// Registered sections in registration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    pub fn night_mode(&self) -> bool {
        self.night_mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn apply(&mut self) {
        let resolution = self.resolve();
        self.sink.apply_color(&resolution.color, resolution.style);
        self.emit(CoordinatorEvent::Applied(resolution.clone()));
        self.last = resolution;
    }

    fn emit(&self, event: CoordinatorEvent) {
        if let Some(tx) = &self.events {
            tx.send(event).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::test_helpers::*;

    #[test]
    fn construction_applies_default_color() {
        let coord = coordinator_with_default("#ffffff");
        assert_eq!(coord.sink().len(), 1);
        assert_resolved(&coord, "#ffffff", BarStyle::Default);
        assert_eq!(coord.last_resolution().source, ColorSource::Default);
    }

    #[test]
    fn dark_default_color_uses_translucent_style() {
        let coord = coordinator_with_default("#101820");
        assert_resolved(&coord, "#101820", BarStyle::Translucent);
    }

    #[test]
    fn no_visible_section_falls_back_to_default() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("hero", "#000000");
        assert_resolved(&coord, "#ffffff", BarStyle::Default);
    }

    #[test]
    fn first_registered_visible_section_wins() {
        let mut coord = coordinator_with_default("#808080");
        coord.register_section("a", "#ffffff");
        coord.register_section("b", "#000000");
        coord.set_visibility("b", true);
        coord.set_visibility("a", true);
        assert_resolved(&coord, "#ffffff", BarStyle::Default);
        assert_eq!(
            coord.last_resolution().source,
            ColorSource::Section("a".to_string())
        );
    }

    #[test]
    fn hiding_the_source_falls_through_to_next_visible() {
        let mut coord = coordinator_with_default("#808080");
        coord.register_section("a", "#ffffff");
        coord.register_section("b", "#000000");
        coord.set_visibility("a", true);
        coord.set_visibility("b", true);
        coord.set_visibility("a", false);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
    }

    #[test]
    fn unregistering_the_source_falls_through_immediately() {
        let mut coord = coordinator_with_default("#eeeeee");
        coord.register_section("a", "#ffffff");
        coord.register_section("b", "#000000");
        coord.set_visibility("a", true);
        coord.set_visibility("b", true);

        let calls_before = coord.sink().len();
        coord.unregister_section("a");
        assert_eq!(coord.sink().len(), calls_before + 1);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);

        coord.unregister_section("b");
        assert_resolved(&coord, "#eeeeee", BarStyle::Default);
        assert!(coord.is_empty());
    }

    #[test]
    fn unregistering_unknown_id_keeps_registry() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#000000");
        coord.unregister_section("nope");
        assert_eq!(coord.len(), 1);
    }

    #[test]
    fn register_is_idempotent_and_resets_visibility() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("hero", "#000000");
        coord.set_visibility("hero", true);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);

        coord.register_section("hero", "#000000");
        assert_eq!(coord.len(), 1);
        assert!(!coord.section("hero").unwrap().is_visible);
        assert_resolved(&coord, "#ffffff", BarStyle::Default);
    }

    #[test]
    fn re_registering_keeps_position_and_takes_new_color() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#111111");
        coord.register_section("b", "#222222");
        coord.register_section("a", "#333333");
        let ids: Vec<&str> = coord.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(coord.section("a").unwrap().color, "#333333");
    }

    #[test]
    fn visibility_for_unknown_id_is_a_noop() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#000000");
        let before = coord.resolve();
        let calls = coord.sink().len();

        coord.set_visibility("ghost", true);

        assert_eq!(coord.resolve(), before);
        assert_eq!(coord.sink().len(), calls);
    }

    #[test]
    fn repeated_visibility_reapplies_same_pair() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#000000");
        coord.set_visibility("a", true);
        coord.set_visibility("a", true);
        coord.set_visibility("a", true);
        let tail: Vec<_> = coord.sink().calls.iter().rev().take(3).collect();
        assert!(tail.iter().all(|c| c.0 == "#000000" && c.1 == BarStyle::Translucent));
    }

    #[test]
    fn night_mode_overrides_color_and_style() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#ffffff");
        coord.set_visibility("a", true);
        coord.set_night_mode(true);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
        assert_eq!(coord.last_resolution().source, ColorSource::Night);

        // Section changes while in night mode do not leak through.
        coord.register_section("b", "#fafafa");
        coord.set_visibility("b", true);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
    }

    #[test]
    fn disabling_night_mode_restores_section_result() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.register_section("a", "#f5f0e6");
        coord.set_visibility("a", true);
        coord.set_night_mode(true);
        coord.set_night_mode(false);
        assert_resolved(&coord, "#f5f0e6", BarStyle::Default);
    }

    #[test]
    fn night_mode_from_initial_config() {
        let coord = StatusBarCoordinator::new(
            RecordingSink::new(),
            CoordinatorConfig {
                default_color: "#ffffff".to_string(),
                night_mode: true,
            },
        );
        assert_eq!(coord.sink().last(), Some(("#000000", BarStyle::Translucent)));
    }

    #[test]
    fn default_color_is_last_write_wins() {
        let mut coord = coordinator_with_default("#ffffff");
        coord.set_default_color("#000000");
        coord.set_default_color("#fefefe");
        assert_eq!(coord.default_color(), "#fefefe");
        assert_resolved(&coord, "#fefefe", BarStyle::Default);
    }

    #[test]
    fn malformed_colors_degrade_without_failing() {
        let mut coord = coordinator_with_default("not a color");
        assert_resolved(&coord, "not a color", BarStyle::Translucent);
        coord.register_section("a", "#zzzzzz");
        coord.set_visibility("a", true);
        assert_resolved(&coord, "#zzzzzz", BarStyle::Translucent);
    }

    #[test]
    fn resolve_does_not_touch_sink() {
        let coord = coordinator_with_default("#ffffff");
        let calls = coord.sink().len();
        let _ = coord.resolve();
        let _ = coord.resolve();
        assert_eq!(coord.sink().len(), calls);
    }

    #[test]
    fn events_follow_operations() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut coord = coordinator_with_default("#ffffff").with_events(tx);
        coord.register_section("a", "#000000");
        coord.set_visibility("ghost", true);
        coord.set_visibility("a", true);
        drop(coord);

        let events: Vec<CoordinatorEvent> = rx.iter().collect();
        assert_eq!(
            events[0],
            CoordinatorEvent::SectionRegistered {
                id: "a".to_string(),
                color: "#000000".to_string(),
                replaced: false,
            }
        );
        assert!(matches!(events[1], CoordinatorEvent::Applied(_)));
        assert_eq!(
            events[2],
            CoordinatorEvent::VisibilityIgnored {
                id: "ghost".to_string()
            }
        );
        assert!(matches!(
            &events[4],
            CoordinatorEvent::Applied(r) if r.color == "#000000"
        ));
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn dropped_event_receiver_is_ignored() {
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        let mut coord = coordinator_with_default("#ffffff").with_events(tx);
        coord.register_section("a", "#000000");
        coord.set_visibility("a", true);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
    }

    #[test]
    fn a_then_b_scenario() {
        let mut coord = coordinator_with_default("#808080");
        coord.register_section("A", "#ffffff");
        coord.register_section("B", "#000000");
        coord.set_visibility("A", true);
        coord.set_visibility("B", true);
        assert_resolved(&coord, "#ffffff", BarStyle::Default);

        coord.set_visibility("A", false);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);

        coord.set_night_mode(true);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
        assert_eq!(coord.last_resolution().source, ColorSource::Night);

        coord.set_night_mode(false);
        assert_resolved(&coord, "#000000", BarStyle::Translucent);
        assert_eq!(
            coord.last_resolution().source,
            ColorSource::Section("B".to_string())
        );
    }
}
