//! Language definition files
//!
//! A definition is a TOML document naming a language and listing its
//! categories in precedence order:
//!
//! ```toml
//! name = "mini"
//!
//! [[category]]
//! id = "keyword"
//! token = "Keyword"
//! words = ["func", "return"]
//!
//! [[category]]
//! id = "type"
//! color = "blue"
//! bold = true
//! pattern = '\b[A-Z]\w+\b'
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::category::{PatternSpec, DEFAULT_SIZE_LIMIT};
use super::registry::Registry;
use super::style::{Color, Style};
use super::tokens::TokenType;
use crate::error::{HighlightError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionFile {
    name: String,
    #[serde(default, rename = "category")]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryEntry {
    id: String,
    #[serde(default)]
    words: Option<Vec<String>>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underline: bool,
    #[serde(default)]
    priority: i32,
}

impl CategoryEntry {
    fn spec(&self) -> Result<PatternSpec> {
        match (&self.words, &self.pattern) {
            (Some(words), None) => Ok(PatternSpec::Words(words.clone())),
            (None, Some(pattern)) => Ok(PatternSpec::Regex(pattern.clone())),
            _ => Err(HighlightError::Definition(format!(
                "category `{}` needs exactly one of `words` or `pattern`",
                self.id
            ))),
        }
    }

    fn style(&self) -> Result<Style> {
        let mut style = match &self.token {
            Some(name) => TokenType::from_name(name)
                .map(|token| token.default_style())
                .ok_or_else(|| {
                    HighlightError::Definition(format!("category `{}`: unknown token `{}`", self.id, name))
                })?,
            None => Style::default(),
        };
        if let Some(name) = &self.color {
            style.fg = Color::from_name(name).ok_or_else(|| {
                HighlightError::Definition(format!("category `{}`: unknown color `{}`", self.id, name))
            })?;
        }
        if self.bold {
            style = style.with_bold();
        }
        if self.italic {
            style = style.with_italic();
        }
        if self.underline {
            style = style.with_underline();
        }
        Ok(style)
    }
}

/// Parse a definition from TOML source
pub fn parse(source: &str, size_limit: usize) -> Result<Registry> {
    let file: DefinitionFile = toml::from_str(source)?;
    if file.categories.is_empty() {
        return Err(HighlightError::Definition(format!(
            "language `{}` defines no categories",
            file.name
        )));
    }

    let mut builder = Registry::builder(&file.name).size_limit(size_limit);
    for entry in &file.categories {
        builder.push(&entry.id, entry.spec()?, entry.style()?, entry.priority);
    }
    builder.build()
}

/// Load a definition file from disk
pub fn load(path: &Path) -> Result<Registry> {
    load_with_limit(path, DEFAULT_SIZE_LIMIT)
}

pub fn load_with_limit(path: &Path, size_limit: usize) -> Result<Registry> {
    debug!(path = %path.display(), "loading language definition");
    let source = fs::read_to_string(path)?;
    parse(&source, size_limit)
}
