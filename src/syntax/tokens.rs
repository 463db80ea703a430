//! Named paints for categories
//!
//! Definition files and the Rust built-in refer to a token kind rather than
//! spelling out a style. The palette is anchored on the Swift reference
//! colors: purple keywords, blue type names and orange operators.

use super::style::{Color, Style};

/// Keyword purple
pub const KEYWORD_COLOR: Color = Color::Rgb(157, 50, 168);
/// Type-name blue
pub const CLASS_COLOR: Color = Color::Rgb(50, 100, 168);
/// Operator orange
pub const OPERATOR_COLOR: Color = Color::Rgb(255, 149, 0);

/// Token kinds a category can be painted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Comment,
    /// String and character literals
    String,
    Number,
    Keyword,
    /// Type names, lifetimes, `@`-attributes on types
    Type,
    /// Names being defined as functions
    Function,
    Operator,
    /// Compiler directives such as `#if` or `#available`
    Directive,
    Macro,
    /// Named constants (`true`, `nil`, enum cases)
    Constant,
    /// `#[derive]`-style annotations
    Attribute,
    /// Left as plain text
    Plain,
}

const ALL: [TokenType; 12] = [
    TokenType::Comment,
    TokenType::String,
    TokenType::Number,
    TokenType::Keyword,
    TokenType::Type,
    TokenType::Function,
    TokenType::Operator,
    TokenType::Directive,
    TokenType::Macro,
    TokenType::Constant,
    TokenType::Attribute,
    TokenType::Plain,
];

impl TokenType {
    /// Paint used when a definition names this kind without a color
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenType::String => Style::fg(Color::Rgb(196, 26, 22)),
            TokenType::Number => Style::fg(Color::Rgb(28, 0, 207)),
            TokenType::Keyword | TokenType::Directive => Style::fg(KEYWORD_COLOR),
            TokenType::Type => Style::fg(CLASS_COLOR),
            TokenType::Function => Style::fg(CLASS_COLOR).with_bold(),
            TokenType::Operator => Style::fg(OPERATOR_COLOR),
            TokenType::Macro => Style::fg(KEYWORD_COLOR).with_italic(),
            TokenType::Constant => Style::fg(KEYWORD_COLOR).with_bold(),
            TokenType::Attribute => Style::fg(Color::Cyan),
            TokenType::Plain => Style::default(),
        }
    }

    /// Name as written in definition files
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Comment => "Comment",
            TokenType::String => "String",
            TokenType::Number => "Number",
            TokenType::Keyword => "Keyword",
            TokenType::Type => "Type",
            TokenType::Function => "Function",
            TokenType::Operator => "Operator",
            TokenType::Directive => "Directive",
            TokenType::Macro => "Macro",
            TokenType::Constant => "Constant",
            TokenType::Attribute => "Attribute",
            TokenType::Plain => "Plain",
        }
    }

    /// Look a kind up by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL.into_iter().find(|token| token.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_plain_is_unstyled() {
        for token in ALL {
            assert_eq!(token.default_style().is_default(), token == TokenType::Plain, "{:?}", token);
        }
    }

    #[test]
    fn test_reference_palette() {
        assert_eq!(TokenType::Keyword.default_style().fg, KEYWORD_COLOR);
        assert_eq!(TokenType::Type.default_style().fg, CLASS_COLOR);
        assert_eq!(TokenType::Operator.default_style().fg, OPERATOR_COLOR);
    }

    #[test]
    fn test_from_name() {
        for token in ALL {
            assert_eq!(TokenType::from_name(token.name()), Some(token));
        }
        assert_eq!(TokenType::from_name("keyword"), Some(TokenType::Keyword));
        assert_eq!(TokenType::from_name(" DIRECTIVE "), Some(TokenType::Directive));
        assert_eq!(TokenType::from_name("Preprocessor"), None);
        assert_eq!(TokenType::from_name(""), None);
    }
}
