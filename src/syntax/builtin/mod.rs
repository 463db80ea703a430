//! Built-in language definitions

mod rust;
mod swift;

pub use rust::rust_registry;
pub use swift::{keywords as swift_keywords, swift_registry, swift_registry_with, SwiftOptions};

use super::registry::Registry;
use crate::error::{HighlightError, Result};

/// Names of the built-in languages
pub fn names() -> &'static [&'static str] {
    &["rust", "swift"]
}

/// Build a built-in registry by (case-insensitive) language name
pub fn by_name(name: &str, size_limit: usize) -> Result<Registry> {
    match name.to_lowercase().as_str() {
        "rust" | "rs" => rust_registry(size_limit),
        "swift" => swift_registry_with(&SwiftOptions::default(), size_limit),
        _ => Err(HighlightError::UnknownLanguage(name.to_string())),
    }
}
