//! Syntax highlighting core
//!
//! - `registry`/`category`: compiled, ordered lexical categories
//! - `lines`: splitting a document into addressable lines
//! - `engine`: matching categories against a line and resolving overlaps
//! - `rows`: resolving background row highlight requests
//! - `highlighter`: whole-document passes with optional caching

mod category;
mod definition;
mod engine;
mod highlighter;
mod lines;
mod registry;
mod rows;
mod style;
mod tokens;

pub mod builtin;

pub use category::{whole_word, Category, PatternSpec, DEFAULT_SIZE_LIMIT};
pub use definition::{load as load_definition, load_with_limit as load_definition_with_limit, parse as parse_definition};
pub use engine::{highlight, matches, span_texts, Match, StyledSpan};
pub use highlighter::{HighlightedLine, Highlighter, LineCache, DEFAULT_CACHE_SIZE};
pub use lines::{split, Line, SplitMode};
pub use registry::{Registry, RegistryBuilder};
pub use rows::{parse_requests, resolve, resolve_within, HighlightRequest};
pub use style::{Color, Style};
pub use tokens::TokenType;
