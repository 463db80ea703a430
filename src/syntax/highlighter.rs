//! Whole-document highlighting
//!
//! `Highlighter` runs the line splitter and the engine over a document. It
//! can optionally remember per-line results, keyed by the line text and the
//! registry that produced them.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::panic;
use std::sync::Arc;
use std::thread;

use tracing::{debug, trace};

use super::engine::{highlight, StyledSpan};
use super::lines::{split, Line, SplitMode};
use super::registry::Registry;
use super::style::Style;

/// Default number of cached lines before the cache is flushed
pub const DEFAULT_CACHE_SIZE: usize = 4096;

/// A line together with its spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine<'a, P = Style> {
    pub line: Line<'a>,
    pub spans: Vec<StyledSpan<P>>,
}

struct CachedLine<P> {
    /// Source text, compared on lookup so hash collisions cannot leak
    text: String,
    spans: Vec<StyledSpan<P>>,
}

/// Per-line result cache
pub struct LineCache<P = Style> {
    lines: HashMap<(u64, u64), CachedLine<P>>,
    max_size: usize,
    hits: u64,
}

impl<P: Clone> LineCache<P> {
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            lines: HashMap::with_capacity(max_size.min(1024)),
            max_size: max_size.max(1),
            hits: 0,
        }
    }

    fn key(registry_id: u64, text: &str) -> (u64, u64) {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        (registry_id, hasher.finish())
    }

    fn get(&mut self, registry_id: u64, text: &str) -> Option<Vec<StyledSpan<P>>> {
        let cached = self
            .lines
            .get(&Self::key(registry_id, text))
            .filter(|cached| cached.text == text)?;
        self.hits += 1;
        Some(cached.spans.clone())
    }

    fn insert(&mut self, registry_id: u64, text: &str, spans: Vec<StyledSpan<P>>) {
        if self.lines.len() >= self.max_size {
            // Simple policy: start over rather than track recency
            self.lines.clear();
        }
        self.lines.insert(
            Self::key(registry_id, text),
            CachedLine {
                text: text.to_string(),
                spans,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lookups answered from the cache so far
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Highlights whole documents with one registry
pub struct Highlighter<P = Style> {
    registry: Arc<Registry<P>>,
    cache: Option<LineCache<P>>,
}

impl<P: Clone + PartialEq> Highlighter<P> {
    /// Highlighter without caching: every pass recomputes from scratch
    pub fn new(registry: Arc<Registry<P>>) -> Self {
        Self {
            registry,
            cache: None,
        }
    }

    /// Highlighter that caches up to `max_lines` line results
    pub fn with_cache(registry: Arc<Registry<P>>, max_lines: usize) -> Self {
        Self {
            registry,
            cache: Some(LineCache::with_capacity(max_lines)),
        }
    }

    pub fn registry(&self) -> &Registry<P> {
        &self.registry
    }

    pub fn cache(&self) -> Option<&LineCache<P>> {
        self.cache.as_ref()
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// Highlight one line, consulting the cache if enabled
    pub fn highlight_line(&mut self, line: &Line<'_>) -> Vec<StyledSpan<P>> {
        let registry_id = self.registry.id();
        let Some(cache) = self.cache.as_mut() else {
            return highlight(line, &self.registry);
        };

        if let Some(spans) = cache.get(registry_id, line.text) {
            trace!(line = line.index, "cache hit");
            return spans;
        }
        let spans = highlight(line, &self.registry);
        cache.insert(registry_id, line.text, spans.clone());
        spans
    }

    /// Split `text` and highlight every line, in document order
    pub fn highlight_document<'a>(&mut self, text: &'a str, mode: SplitMode) -> Vec<HighlightedLine<'a, P>> {
        let lines = split(text, mode);
        debug!(
            registry = self.registry.name(),
            lines = lines.len(),
            "highlighting document"
        );
        lines
            .into_iter()
            .map(|line| {
                let spans = self.highlight_line(&line);
                HighlightedLine { line, spans }
            })
            .collect()
    }
}

impl<P: Clone + PartialEq + Send + Sync> Highlighter<P> {
    /// Like `highlight_document`, spreading lines over `workers` threads.
    ///
    /// The cache is not consulted. Results come back in line order no matter
    /// which worker finishes first.
    pub fn highlight_document_parallel<'a>(
        &self,
        text: &'a str,
        mode: SplitMode,
        workers: usize,
    ) -> Vec<HighlightedLine<'a, P>> {
        let lines = split(text, mode);
        let workers = workers.clamp(1, lines.len());
        let chunk_size = lines.len().div_ceil(workers);
        let registry: &Registry<P> = &self.registry;

        let spans: Vec<Vec<StyledSpan<P>>> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|line| highlight(line, registry))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect()
        });

        lines
            .into_iter()
            .zip(spans)
            .map(|(line, spans)| HighlightedLine { line, spans })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::category::PatternSpec;

    fn registry() -> Arc<Registry<u8>> {
        Arc::new(
            Registry::builder("test")
                .category("kw", PatternSpec::words(["func", "return"]), 1)
                .category("num", PatternSpec::regex(r"\d+"), 2)
                .build()
                .unwrap(),
        )
    }

    const DOC: &str = "func f() {\n  return 1\n}\n\nfunc g() {\n  return 1\n}";

    #[test]
    fn test_document_in_line_order() {
        let mut highlighter = Highlighter::new(registry());
        let lines = highlighter.highlight_document(DOC, SplitMode::MultiLine);
        assert_eq!(lines.len(), 7);
        for (i, hl) in lines.iter().enumerate() {
            assert_eq!(hl.line.index, i);
        }
        assert!(lines[3].spans.is_empty());
    }

    #[test]
    fn test_single_block_document() {
        let mut highlighter = Highlighter::new(registry());
        let lines = highlighter.highlight_document(DOC, SplitMode::SingleBlock);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line.text, DOC);
    }

    #[test]
    fn test_cache_matches_uncached() {
        let mut plain = Highlighter::new(registry());
        let mut cached = Highlighter::with_cache(registry(), 16);
        let expected = plain.highlight_document(DOC, SplitMode::MultiLine);
        assert_eq!(cached.highlight_document(DOC, SplitMode::MultiLine), expected);
        assert_eq!(cached.highlight_document(DOC, SplitMode::MultiLine), expected);

        let cache = cached.cache().unwrap();
        // The last two lines repeat lines 1 and 2 within the first pass
        assert_eq!(cache.hits(), 2 + 7);
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_cache_keyed_by_registry() {
        let other = Arc::new(
            Registry::builder("other")
                .category("num", PatternSpec::regex(r"\d+"), 9)
                .build()
                .unwrap(),
        );
        let mut first = Highlighter::with_cache(registry(), 16);
        let mut second = Highlighter::with_cache(other, 16);
        let line = Line::new(0, "return 1");
        let a = first.highlight_line(&line);
        let b = second.highlight_line(&line);
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_capacity_bounded() {
        let mut highlighter = Highlighter::with_cache(registry(), 2);
        for text in ["a", "b", "c", "d", "e"] {
            highlighter.highlight_line(&Line::new(0, text));
        }
        assert!(highlighter.cache().unwrap().len() <= 2);
        highlighter.clear_cache();
        assert!(highlighter.cache().unwrap().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = Highlighter::new(registry());
        let expected = sequential.highlight_document(DOC, SplitMode::MultiLine);
        let parallel = Highlighter::new(registry());
        for workers in [1, 3, 64] {
            assert_eq!(parallel.highlight_document_parallel(DOC, SplitMode::MultiLine, workers), expected);
        }
    }
}
