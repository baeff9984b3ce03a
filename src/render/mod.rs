//! HTML fragments for recipe cards, detail views and status messages.
//!
//! Every function here is pure: it takes a payload and returns markup. Text
//! coming from the server is always escaped before it is interpolated.

mod cards;
mod detail;
mod states;

pub use cards::{algorithm_badge, method_label, AlgorithmBadge};
pub use states::{EmptyKind, MessageLevel};

use crate::model::format_number;

/// Fallback shown when a recipe has no description
pub const DEFAULT_DESCRIPTION: &str = "Deliciosa receta para disfrutar";
/// Characters of the description kept on a card
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;
/// Missing ingredients listed on a card before eliding the rest
pub const MISSING_PREVIEW: usize = 3;

#[derive(Debug, Clone)]
pub struct Renderer {
    static_prefix: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("/static/")
    }
}

impl Renderer {
    pub fn new(static_prefix: impl Into<String>) -> Self {
        let mut static_prefix = static_prefix.into();
        if !static_prefix.ends_with('/') {
            static_prefix.push('/');
        }
        Self { static_prefix }
    }

    /// Resolves a recipe image path against the static prefix
    pub fn image_src(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}{}", self.static_prefix, path)
        }
    }
}

fn esc(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Non-empty, trimmed text or `None`
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Number with the given fallback for missing or zero values
fn number_or(value: Option<f64>, fallback: &str) -> String {
    match value {
        Some(v) if v != 0.0 => format_number(v),
        _ => fallback.to_string(),
    }
}
