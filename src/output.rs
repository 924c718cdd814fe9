//! CLI output formatting.
//!
//! Every entity is shown with its positional index and identity first, with
//! details on indented context lines, so `check`, `resolve` and `replay`
//! read the same way.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 hero #1c1c1c (translucent)
//!     Layout: 0-900px, threshold 0.5
//! 002 gallery #f8f5f0 (default)
//!     Layout: 900-1700px, threshold 0.5
//!
//! Default color: #fdfbf7 (default)
//! Night mode: off
//! ```
//!
//! ## Replay
//!
//! ```text
//! 000 setup (7 sections) → #fdfbf7 default
//!     Source: default color
//! 001 scroll 0 → #1c1c1c translucent
//!     Source: section hero
//! ```
//!
//! ## Events
//!
//! ```text
//! + hero #1c1c1c
//! hero visible
//!     → #1c1c1c translucent
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O. `print_*`
//! wrappers write them to stdout.

use crate::color;
use crate::config::TintConfig;
use crate::coordinator::CoordinatorEvent;
use crate::scenario::TraceEntry;
use crate::types::Resolution;

/// Format a 0-based or 1-based index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// `#1c1c1c translucent`
fn pair(resolution: &Resolution) -> String {
    format!("{} {}", resolution.color, resolution.style)
}

// ============================================================================
// Check
// ============================================================================

/// Format the sections, defaults and color warnings of a config.
pub fn format_check_output(config: &TintConfig) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in config.sections.iter().enumerate() {
        lines.push(format!(
            "{} {} {} ({})",
            format_index(i + 1),
            section.id,
            section.color,
            color::style_for(&section.color)
        ));
        if let Some(bounds) = section.bounds() {
            let threshold = section.threshold.unwrap_or(config.viewport.threshold);
            lines.push(format!(
                "    Layout: {}-{}px, threshold {}",
                bounds.top,
                bounds.bottom(),
                threshold
            ));
        }
    }
    if config.sections.is_empty() {
        lines.push("    (none)".to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "Default color: {} ({})",
        config.default_color,
        color::style_for(&config.default_color)
    ));
    lines.push(format!("Night mode: {}", on_off(config.night_mode)));

    let warnings = config.color_warnings();
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in warnings {
            lines.push(format!("    {}", warning));
        }
    }

    lines
}

pub fn print_check_output(config: &TintConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolution(resolution: &Resolution) -> Vec<String> {
    vec![
        format!("Color: {}", resolution.color),
        format!("Style: {}", resolution.style),
        format!("Source: {}", resolution.source),
    ]
}

pub fn print_resolution(resolution: &Resolution) {
    for line in format_resolution(resolution) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Format a replay trace, one header line plus source per step.
pub fn format_trace(trace: &[TraceEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in trace {
        lines.push(format!(
            "{} {} → {}",
            format_index(entry.step),
            entry.description,
            pair(&entry.resolution)
        ));
        lines.push(format!("    Source: {}", entry.resolution.source));
    }
    lines
}

pub fn print_trace(trace: &[TraceEntry]) {
    for line in format_trace(trace) {
        println!("{}", line);
    }
}

// ============================================================================
// Coordinator events
// ============================================================================

/// Format a single coordinator event as display lines.
pub fn format_event(event: &CoordinatorEvent) -> Vec<String> {
    match event {
        CoordinatorEvent::SectionRegistered {
            id,
            color,
            replaced,
        } => {
            let marker = if *replaced { " (reset)" } else { "" };
            vec![format!("+ {} {}{}", id, color, marker)]
        }
        CoordinatorEvent::SectionUnregistered { id, known } => {
            let marker = if *known { "" } else { " (not registered)" };
            vec![format!("- {}{}", id, marker)]
        }
        CoordinatorEvent::VisibilityChanged { id, visible } => {
            let state = if *visible { "visible" } else { "hidden" };
            vec![format!("{} {}", id, state)]
        }
        CoordinatorEvent::VisibilityIgnored { id } => {
            vec![format!("{} ignored (not registered)", id)]
        }
        CoordinatorEvent::DefaultColorChanged { color } => {
            vec![format!("default color {}", color)]
        }
        CoordinatorEvent::NightModeChanged { enabled } => {
            vec![format!("night mode {}", on_off(*enabled))]
        }
        CoordinatorEvent::Applied(resolution) => {
            vec![format!("    → {}", pair(resolution))]
        }
    }
}
