//! Tokenizer/matcher engine
//!
//! Every category is scanned over the whole line on its own. The matches are
//! then laid onto a per-character paint table in registry order, where a
//! character keeps the first category that claims it. A later category whose
//! match partially overlaps already painted text is trimmed to the part that
//! is still plain. Finally the table is collapsed into spans.
//!
//! All offsets produced here are character offsets within the line.

use std::ops::Range;

use super::category::Category;
use super::lines::Line;
use super::registry::Registry;
use super::style::Style;

/// One match of a single category's pattern
#[derive(Debug, Clone)]
pub struct Match<'t, 'r, P = Style> {
    pub start: usize,
    pub end: usize,
    pub category: &'r Category<P>,
    pub text: &'t str,
}

/// A run of characters sharing one paint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan<P = Style> {
    /// Character offset where this span starts (inclusive)
    pub start: usize,
    /// Character offset where this span ends (exclusive)
    pub end: usize,
    /// Paint, or `None` for plain text
    pub paint: Option<P>,
    /// Registry index of the category that painted the first character
    pub category: Option<usize>,
}

impl<P> StyledSpan<P> {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn is_plain(&self) -> bool {
        self.paint.is_none()
    }

    /// Byte range of this span within `text`.
    ///
    /// Counts characters from the start of `text`; to slice every span of a
    /// line, walk them with `span_texts` instead.
    pub fn byte_range(&self, text: &str) -> Range<usize> {
        byte_offset(text, self.start)..byte_offset(text, self.end)
    }

    /// The text this span covers
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.byte_range(text)]
    }
}

/// Byte offset of the `char_idx`-th character (or `text.len()` past the end)
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Pair each span with the text it covers.
///
/// Walks `text` once for an ordered span list, so slicing a whole line stays
/// linear in its length. A span that starts before the previous one restarts
/// the walk.
pub fn span_texts<'a, 's, P>(
    text: &'a str,
    spans: &'s [StyledSpan<P>],
) -> impl Iterator<Item = (&'s StyledSpan<P>, &'a str)> {
    let mut cursor = (0, 0);
    spans.iter().map(move |span| {
        let start = advance(text, &mut cursor, span.start);
        let end = advance(text, &mut cursor, span.end.max(span.start));
        (span, &text[start..end])
    })
}

/// Move a `(char, byte)` cursor to `char_idx`, returning its byte offset
fn advance(text: &str, cursor: &mut (usize, usize), char_idx: usize) -> usize {
    if char_idx < cursor.0 {
        *cursor = (0, 0);
    }
    let (chars, bytes) = *cursor;
    let byte = text[bytes..]
        .char_indices()
        .nth(char_idx - chars)
        .map_or(text.len(), |(offset, _)| bytes + offset);
    *cursor = (char_idx, byte);
    byte
}

/// Byte offset to character offset table for one line
struct CharIndex {
    chars_at: Vec<usize>,
    len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut chars_at = vec![0; text.len() + 1];
        let mut len = 0;
        for (byte, _) in text.char_indices() {
            chars_at[byte] = len;
            len += 1;
        }
        chars_at[text.len()] = len;
        Self { chars_at, len }
    }

    /// Character offset for a byte offset on a char boundary
    fn at(&self, byte: usize) -> usize {
        self.chars_at[byte]
    }
}

fn scan<'t, 'r, P>(text: &'t str, index: &CharIndex, category: &'r Category<P>) -> Vec<Match<'t, 'r, P>> {
    category
        .regex()
        .find_iter(text)
        // Zero-length matches would paint nothing
        .filter(|m| !m.is_empty())
        .map(|m| Match {
            start: index.at(m.start()),
            end: index.at(m.end()),
            category,
            text: m.as_str(),
        })
        .collect()
}

/// All non-overlapping, non-empty matches of one category in a line
pub fn matches<'t, 'r, P>(line: &Line<'t>, category: &'r Category<P>) -> Vec<Match<'t, 'r, P>> {
    let index = CharIndex::new(line.text);
    scan(line.text, &index, category)
}

/// Highlight one line.
///
/// The result partitions `[0, line length)` into contiguous spans with no
/// two neighbours sharing a paint. An empty line yields no spans.
pub fn highlight<P: Clone + PartialEq>(line: &Line<'_>, registry: &Registry<P>) -> Vec<StyledSpan<P>> {
    let text = line.text;
    if text.is_empty() {
        return Vec::new();
    }

    let index = CharIndex::new(text);
    let mut painted: Vec<Option<usize>> = vec![None; index.len];

    for (cat_idx, category) in registry.categories().iter().enumerate() {
        for m in scan(text, &index, category) {
            for slot in &mut painted[m.start..m.end] {
                if slot.is_none() {
                    *slot = Some(cat_idx);
                }
            }
        }
    }

    collapse(&painted, registry.categories())
}

fn collapse<P: Clone + PartialEq>(painted: &[Option<usize>], categories: &[Category<P>]) -> Vec<StyledSpan<P>> {
    let paint_of = |slot: Option<usize>| slot.map(|i| categories[i].paint());

    let mut spans = Vec::new();
    let mut start = 0;
    for pos in 1..=painted.len() {
        let boundary = pos == painted.len() || paint_of(painted[pos]) != paint_of(painted[start]);
        if boundary {
            spans.push(StyledSpan {
                start,
                end: pos,
                paint: paint_of(painted[start]).cloned(),
                category: painted[start],
            });
            start = pos;
        }
    }
    spans
}
