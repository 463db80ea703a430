//! Lexical categories
//!
//! A category pairs a match pattern with a paint descriptor. Patterns are
//! described by a `PatternSpec` and compiled once, when the registry that
//! owns them is built.
//!
//! Patterns are compiled in multi-line mode, so `^` and `$` anchor at line
//! breaks. A pattern must not match across a `'\n'`: that keeps a
//! single-block pass styled exactly like a line-by-line pass.

use regex::{Regex, RegexBuilder};

use super::style::Style;
use crate::error::{HighlightError, Result};

/// Default limit on the compiled size of a single category pattern
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// How a category's regular expression is produced
#[derive(Clone)]
pub enum PatternSpec {
    /// A fixed regular expression
    Regex(String),
    /// A word list, matched as whole words through a single alternation
    Words(Vec<String>),
    /// A word list where each word is turned into a pattern by `generator`
    Generated {
        words: Vec<String>,
        generator: fn(&str) -> String,
    },
}

impl PatternSpec {
    /// A fixed regular expression
    pub fn regex(pattern: impl Into<String>) -> Self {
        PatternSpec::Regex(pattern.into())
    }

    /// A word list matched as whole words
    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PatternSpec::Words(words.into_iter().map(Into::into).collect())
    }

    /// Produce the regular expression source.
    ///
    /// Fails with a reason when a word list has no usable words.
    pub fn source(&self) -> std::result::Result<String, String> {
        match self {
            PatternSpec::Regex(pattern) => Ok(pattern.clone()),
            PatternSpec::Words(words) => alternation(words, whole_word),
            PatternSpec::Generated { words, generator } => alternation(words, *generator),
        }
    }
}

impl std::fmt::Debug for PatternSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSpec::Regex(pattern) => f.debug_tuple("Regex").field(pattern).finish(),
            PatternSpec::Words(words) => f.debug_tuple("Words").field(words).finish(),
            PatternSpec::Generated { words, .. } => {
                f.debug_struct("Generated").field("words", words).finish_non_exhaustive()
            }
        }
    }
}

/// Escape `word` and anchor it on word boundaries.
///
/// A boundary is only asserted on a side where the word starts or ends with
/// a word character: `\b#if` could never match at the start of a line.
pub fn whole_word(word: &str) -> String {
    let lead = if word.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if word.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{}{}{}", lead, regex::escape(word), trail)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn alternation(words: &[String], generator: fn(&str) -> String) -> std::result::Result<String, String> {
    let mut words: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Err("word list is empty".to_string());
    }

    // Longest first, so a word is never shadowed by one of its prefixes
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.dedup();

    let alternatives: Vec<String> = words
        .iter()
        .map(|w| format!("(?:{})", generator(w)))
        .collect();
    Ok(alternatives.join("|"))
}

/// A compiled lexical category
#[derive(Debug, Clone)]
pub struct Category<P = Style> {
    id: String,
    regex: Regex,
    paint: P,
    priority: i32,
}

impl<P> Category<P> {
    /// Compile a category, failing with `PatternCompile` on a bad pattern
    pub fn compile(id: &str, spec: &PatternSpec, paint: P, priority: i32, size_limit: usize) -> Result<Self> {
        let pattern_error = |reason: String| HighlightError::PatternCompile {
            category: id.to_string(),
            reason,
        };

        let source = spec.source().map_err(pattern_error)?;
        let regex = RegexBuilder::new(&source)
            .multi_line(true)
            .size_limit(size_limit)
            .build()
            .map_err(|e| pattern_error(e.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            regex,
            paint,
            priority,
        })
    }

    /// Category name
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Compiled pattern
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Paint applied to this category's matches
    pub fn paint(&self) -> &P {
        &self.paint
    }

    /// Precedence (higher = painted first)
    pub fn priority(&self) -> i32 {
        self.priority
    }
}
