//! Terminal rendering of highlighted lines
//!
//! Writes ANSI sequences through crossterm to any `Write`. Line numbers go
//! in a dim gutter; highlighted rows get a background that is padded to the
//! widest line so the block reads as one band.

use std::collections::BTreeSet;
use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::syntax::{span_texts, Color, HighlightedLine, Style};

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show a line number gutter
    pub line_numbers: bool,
    /// Background for highlighted rows
    pub highlight_color: Color,
    /// Emit colors; when off, highlighted rows are marked with `>`
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            highlight_color: Color::Yellow,
            color: true,
        }
    }
}

/// Map a palette color onto crossterm's naming (which calls ANSI red "DarkRed")
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}

/// Width of the line number gutter, including the separator space
fn gutter_width(line_count: usize) -> usize {
    let digits = line_count.max(1).to_string().len();
    digits.max(3) + 1
}

fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn reset<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

/// Render highlighted lines. `rows` holds 1-based line numbers; numbers
/// past the end of the document are ignored.
pub fn render<W: Write>(
    out: &mut W,
    lines: &[HighlightedLine<'_>],
    rows: &BTreeSet<usize>,
    options: &RenderOptions,
) -> Result<()> {
    let out_of_range: Vec<usize> = rows.range(lines.len() + 1..).copied().collect();
    if !out_of_range.is_empty() {
        debug!(?out_of_range, "highlight rows past end of document");
    }

    let gutter = gutter_width(lines.len());
    let content_width = lines
        .iter()
        .map(|hl| hl.line.text.width())
        .max()
        .unwrap_or(0);
    let row_bg = Style::bg(options.highlight_color);

    for hl in lines {
        let highlighted = rows.contains(&hl.line.number());

        if options.line_numbers {
            let number = format!("{:>width$} ", hl.line.number(), width = gutter - 1);
            if options.color {
                queue!(out, SetAttribute(Attribute::Dim), Print(number))?;
                reset(out)?;
            } else {
                queue!(out, Print(number))?;
            }
        }

        if !options.color {
            let marker = match (rows.is_empty(), highlighted) {
                (true, _) => "",
                (false, true) => "> ",
                (false, false) => "  ",
            };
            queue!(out, Print(marker), Print(hl.line.text), Print("\n"))?;
            continue;
        }

        if highlighted {
            apply_style(out, &row_bg)?;
        }
        for (span, text) in span_texts(hl.line.text, &hl.spans) {
            match &span.paint {
                Some(style) => {
                    apply_style(out, style)?;
                    queue!(out, Print(text))?;
                    reset(out)?;
                    if highlighted {
                        apply_style(out, &row_bg)?;
                    }
                }
                None => queue!(out, Print(text))?,
            }
        }
        if highlighted {
            let pad = content_width.saturating_sub(hl.line.text.width());
            queue!(out, Print(" ".repeat(pad)))?;
        }
        reset(out)?;
        queue!(out, Print("\n"))?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Line, StyledSpan};

    fn line<'a>(index: usize, text: &'a str, spans: Vec<StyledSpan>) -> HighlightedLine<'a> {
        HighlightedLine {
            line: Line::new(index, text),
            spans,
        }
    }

    fn plain(len: usize) -> StyledSpan {
        StyledSpan {
            start: 0,
            end: len,
            paint: None,
            category: None,
        }
    }

    fn render_to_string(lines: &[HighlightedLine<'_>], rows: &[usize], options: &RenderOptions) -> String {
        let rows: BTreeSet<usize> = rows.iter().copied().collect();
        let mut out = Vec::new();
        render(&mut out, lines, &rows, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 4);
        assert_eq!(gutter_width(999), 4);
        assert_eq!(gutter_width(1000), 5);
    }

    #[test]
    fn test_plain_output_with_numbers() {
        let lines = [line(0, "a", vec![plain(1)]), line(1, "bb", vec![plain(2)])];
        let options = RenderOptions {
            line_numbers: true,
            color: false,
            ..Default::default()
        };
        assert_eq!(render_to_string(&lines, &[], &options), "  1 a\n  2 bb\n");
    }

    #[test]
    fn test_plain_output_marks_rows() {
        let lines = [line(0, "a", vec![plain(1)]), line(1, "b", vec![plain(1)])];
        let options = RenderOptions {
            color: false,
            ..Default::default()
        };
        assert_eq!(render_to_string(&lines, &[2, 40], &options), "  a\n> b\n");
    }

    #[test]
    fn test_colored_output() {
        let keyword = Style::fg(Color::Magenta).with_bold();
        let spans = vec![
            StyledSpan {
                start: 0,
                end: 3,
                paint: Some(keyword),
                category: Some(0),
            },
            StyledSpan {
                start: 3,
                end: 5,
                paint: None,
                category: None,
            },
        ];
        let lines = [line(0, "let x", spans), line(1, "", Vec::new())];
        let output = render_to_string(&lines, &[1], &RenderOptions::default());

        assert!(output.contains("let"));
        assert!(output.contains(" x"));
        assert!(output.contains("\x1b["));
        assert_eq!(output.matches('\n').count(), 2);
    }

    #[test]
    fn test_term_color_mapping() {
        assert_eq!(term_color(Color::Red), TermColor::DarkRed);
        assert_eq!(term_color(Color::BrightRed), TermColor::Red);
        assert_eq!(term_color(Color::Rgb(1, 2, 3)), TermColor::Rgb { r: 1, g: 2, b: 3 });
    }
}
