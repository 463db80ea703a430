//! codetint - regex-driven source code highlighting
//!
//! Text is split into lines, each line is matched against an ordered list of
//! categories, and the matches are resolved into non-overlapping styled
//! spans. Earlier categories win where matches overlap.
//!
//! ```
//! use codetint::syntax::{builtin, Highlighter, SplitMode};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(builtin::swift_registry().unwrap());
//! let mut highlighter = Highlighter::new(registry);
//! let lines = highlighter.highlight_document("let a = 1\nreturn a", SplitMode::MultiLine);
//! assert_eq!(lines.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use error::{HighlightError, Result};
