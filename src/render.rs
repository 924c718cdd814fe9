//! HTML rendering.
//!
//! Two outputs, both built with [maud](https://maud.lambda.xyz/):
//!
//! - **Meta tags**: the `theme-color` and
//!   `apple-mobile-web-app-status-bar-style` tags a page carries for one
//!   resolution. [`MetaTagSink`](crate::sink::MetaTagSink) renders through
//!   this.
//! - **Replay report**: a standalone page with one row per trace entry and a
//!   swatch of the applied color, written by `replay --html`.

use crate::config::TintConfig;
use crate::scenario::TraceEntry;
use crate::sink::apple_status_bar_style;
use crate::types::{BarStyle, Resolution};
use maud::{DOCTYPE, Markup, html};

const REPORT_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; }
th, td { padding: 0.35rem 0.8rem; border-bottom: 1px solid #ddd; text-align: left; }
.swatch { display: inline-block; width: 1.4rem; height: 1.4rem; border: 1px solid #999; vertical-align: middle; }
code { font-size: 0.9em; }
"#;

/// Status-bar meta tags for a color and style.
pub fn meta_tags(color: &str, style: BarStyle) -> Markup {
    html! {
        meta name="theme-color" content=(color);
        meta name="apple-mobile-web-app-status-bar-style" content=(apple_status_bar_style(style));
    }
}

pub fn render_meta_tags(resolution: &Resolution) -> Markup {
    meta_tags(&resolution.color, resolution.style)
}

fn base_document(title: &str, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head)
                title { (title) }
                style { (REPORT_CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn swatch(color: &str) -> Markup {
    html! {
        span.swatch style=(format!("background: {color}")) {}
    }
}

/// Standalone HTML report of a replay trace.
///
/// The document's own meta tags carry the final resolution, so opening it on
/// a phone shows the end state in the real status bar.
pub fn render_report(config: &TintConfig, trace: &[TraceEntry]) -> Markup {
    let head = trace
        .last()
        .map(|entry| render_meta_tags(&entry.resolution))
        .unwrap_or_else(|| html! {});
    base_document(
        "Status bar replay",
        head,
        html! {
            h1 { "Status bar replay" }
            h2 { "Sections" }
            ol.sections {
                @for section in &config.sections {
                    li {
                        (swatch(&section.color)) " "
                        code { (section.id) } " " (section.color)
                    }
                }
            }
            p { "Default color: " (swatch(&config.default_color)) " " (config.default_color) }
            h2 { "Trace" }
            table.trace {
                thead {
                    tr { th { "Step" } th { "Action" } th { "Color" } th { "Style" } th { "Source" } }
                }
                tbody {
                    @for entry in trace {
                        tr {
                            td { (entry.step) }
                            td { (entry.description) }
                            td { (swatch(&entry.resolution.color)) " " (entry.resolution.color) }
                            td { (entry.resolution.style.as_str()) }
                            td { (entry.resolution.source.to_string()) }
                        }
                    }
                }
            }
        },
    )
}
