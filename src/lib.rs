//! # status-tint
//!
//! Keeps a mobile browser's status-bar tint in step with the part of a
//! single-page site that is on screen. The page is a stack of sections (a
//! wedding invitation: hero, gallery, itinerary, location, dress code,
//! gifts, RSVP), each with its own status-bar color.
//!
//! # How It Fits Together
//!
//! ```text
//! viewport observers ──set_visibility──▶ StatusBarCoordinator ──apply_color──▶ sink
//!  (one per section)                      (registry + resolution)             (meta tags)
//! ```
//!
//! Sections register when they mount and report visibility as they cross
//! their threshold. After every change the coordinator resolves one color
//! and one bar style and applies them to its sink.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`coordinator`] | Section registry and the resolution policy |
//! | [`color`] | Total hex decoding and the luminance heuristic |
//! | [`sink`] | `StatusBarSink` trait, meta-tag sink, recording sink |
//! | [`viewport`] | Scroll-driven visibility observers |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`scenario`] | Scripted event replays |
//! | [`render`] | Maud rendering of meta tags and replay reports |
//! | [`types`] | Shared serializable types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## An Instance, Not a Global
//!
//! The coordinator is constructed with its initial configuration and handed
//! to whoever drives it. There is no module-level registry, so two pages (or
//! two tests) never share state.
//!
//! ## Registration Order Breaks Ties
//!
//! When several sections are visible at once the one that registered first
//! supplies the color. There is no priority field and no geometry involved
//! in the decision.
//!
//! ## Nothing Fails
//!
//! Unknown section ids are ignored and malformed colors decode to zero
//! channels. The status bar may end up the wrong shade, but the page keeps
//! working. Only the file-facing layers ([`config`], [`scenario`]) return
//! errors.
//!
//! ## Apply Every Time
//!
//! The sink receives the resolved pair after every operation, even when it
//! did not change, so a sink whose state drifted is corrected on the next
//! event.

pub mod color;
pub mod config;
pub mod coordinator;
pub mod output;
pub mod render;
pub mod scenario;
pub mod sink;
pub mod types;
pub mod viewport;

pub use coordinator::{CoordinatorConfig, CoordinatorEvent, StatusBarCoordinator};
pub use sink::{MetaTagSink, RecordingSink, StatusBarSink};
pub use types::{BarStyle, ColorSource, Resolution, Section};

#[cfg(test)]
pub(crate) mod test_helpers;
