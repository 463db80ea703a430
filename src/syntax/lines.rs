//! Line splitting

/// How the input is divided before highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// The whole input as one line
    SingleBlock,
    /// One line per `'\n'`-separated segment
    MultiLine,
}

impl SplitMode {
    /// Per-line addressing is only needed for line numbers or row highlights
    pub fn for_display(line_numbers: bool, highlighted_rows: usize) -> Self {
        if !line_numbers && highlighted_rows == 0 {
            SplitMode::SingleBlock
        } else {
            SplitMode::MultiLine
        }
    }
}

/// A line of the document, borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 0-based position in the document
    pub index: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }

    /// 1-based line number, as used by highlight requests
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split `text` into lines.
///
/// Every segment is kept, so `"a\n"` gives `["a", ""]` and the empty string
/// gives one empty line. Line indices always match document line numbers.
pub fn split(text: &str, mode: SplitMode) -> Vec<Line<'_>> {
    match mode {
        SplitMode::SingleBlock => vec![Line::new(0, text)],
        SplitMode::MultiLine => text
            .split('\n')
            .enumerate()
            .map(|(index, text)| Line::new(index, text))
            .collect(),
    }
}
