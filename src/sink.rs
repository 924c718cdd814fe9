//! Display sinks: where resolved status-bar values end up.
//!
//! The [`StatusBarSink`] trait is the only thing the coordinator knows about
//! the platform. On a mobile browser the mechanism is a pair of meta tags:
//!
//! ```html
//! <meta name="theme-color" content="#1a1a1a">
//! <meta name="apple-mobile-web-app-status-bar-style" content="black-translucent">
//! ```
//!
//! [`MetaTagSink`] models exactly that state and renders it with Maud.
//! [`RecordingSink`] keeps every call, in order, for tests and replay traces.
//!
//! Sinks must tolerate the same pair being applied repeatedly. The
//! coordinator never skips an application just because nothing changed.

use crate::render;
use crate::types::BarStyle;
use maud::Markup;

/// Receives every resolved `(color, style)` pair.
pub trait StatusBarSink {
    fn apply_color(&mut self, color: &str, style: BarStyle);
}

impl<S: StatusBarSink + ?Sized> StatusBarSink for &mut S {
    fn apply_color(&mut self, color: &str, style: BarStyle) {
        (**self).apply_color(color, style);
    }
}

/// Value of `apple-mobile-web-app-status-bar-style` for a bar style.
pub fn apple_status_bar_style(style: BarStyle) -> &'static str {
    match style {
        BarStyle::Default => "default",
        BarStyle::Translucent => "black-translucent",
    }
}

/// Current contents of the platform status-bar meta tags.
#[derive(Debug, Default, Clone)]
pub struct MetaTagSink {
    theme_color: Option<String>,
    style: Option<BarStyle>,
    applied: usize,
}

impl MetaTagSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `theme-color` value, if anything has been applied.
    pub fn theme_color(&self) -> Option<&str> {
        self.theme_color.as_deref()
    }

    pub fn style(&self) -> Option<BarStyle> {
        self.style
    }

    /// Number of applications, including repeats of the same pair.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Render the current tags. Empty until the first application.
    pub fn tags(&self) -> Markup {
        match (&self.theme_color, self.style) {
            (Some(color), Some(style)) => render::meta_tags(color, style),
            _ => maud::html! {},
        }
    }
}

impl StatusBarSink for MetaTagSink {
    fn apply_color(&mut self, color: &str, style: BarStyle) {
        self.theme_color = Some(color.to_string());
        self.style = Some(style);
        self.applied += 1;
    }
}

/// Records every application in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub calls: Vec<(String, BarStyle)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<(&str, BarStyle)> {
        self.calls.last().map(|(c, s)| (c.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl StatusBarSink for RecordingSink {
    fn apply_color(&mut self, color: &str, style: BarStyle) {
        self.calls.push((color.to_string(), style));
    }
}
