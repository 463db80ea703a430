//! Swift language definition

use crate::error::Result;
use crate::syntax::category::PatternSpec;
use crate::syntax::registry::Registry;
use crate::syntax::style::Style;
pub use crate::syntax::tokens::{CLASS_COLOR, KEYWORD_COLOR, OPERATOR_COLOR};

const DECLARATIONS: &[&str] = &[
    "associatedtype", "class", "deinit", "enum", "extension",
    "fileprivate", "func", "import", "init", "inout",
    "internal", "let", "open", "operator", "private",
    "precedencegroup", "protocol", "public", "rethrows", "static",
    "struct", "subscript", "typealias", "var",
];

const STATEMENTS: &[&str] = &[
    "break", "case", "catch", "continue", "default",
    "defer", "do", "else", "fallthrough", "for",
    "guard", "if", "in", "repeat", "return",
    "throw", "switch", "where", "while",
];

const EXPRESSIONS_AND_TYPES: &[&str] = &[
    "Any", "as", "catch", "false", "is",
    "nil", "rethrows", "self", "Self", "super",
    "throw", "throws", "true", "try",
];

const PATTERNS: &[&str] = &["_"];

const DIRECTIVES: &[&str] = &[
    "#available", "#colorLiteral", "#column", "#dsohandle", "#elseif",
    "#else", "#endif", "#error", "#fileID", "#fileLiteral",
    "#filePath", "#file", "#function", "#if", "#imageLiteral",
    "#keyPath", "#line", "#selector", "#sourceLocation", "#warning",
];

const CONTEXTUAL: &[&str] = &[
    "associativity", "convenience", "didSet", "dynamic", "final",
    "get", "indirect", "infix", "lazy", "left",
    "mutating", "none", "nonmutating", "optional", "override",
    "postfix", "precedence", "prefix", "Protocol", "required",
    "right", "set", "some", "Type", "unowned",
    "weak", "willSet",
];

/// Capitalized identifier, optionally an `@` attribute
const CLASS_PATTERN: &str = r"@?\b[A-Z]\w+\b";

/// Arithmetic operators and `->`, surrounded by blanks on the same line
const OPERATOR_PATTERN: &str = r"[ \t][+\-*/][ \t]|[ \t]->[ \t]";

/// Extra knobs on top of the standard Swift tables
#[derive(Debug, Clone, Default)]
pub struct SwiftOptions {
    /// Words colored like keywords
    pub additional_keywords: Vec<String>,
    /// Words colored like type names even when not capitalized
    pub additional_classes: Vec<String>,
    /// Also color a small set of arithmetic operators
    pub operators: bool,
}

impl SwiftOptions {
    pub fn with_operators(mut self) -> Self {
        self.operators = true;
        self
    }
}

/// Every built-in Swift keyword, in table order
pub fn keywords() -> impl Iterator<Item = &'static str> {
    [DECLARATIONS, STATEMENTS, EXPRESSIONS_AND_TYPES, PATTERNS, DIRECTIVES, CONTEXTUAL]
        .into_iter()
        .flatten()
        .copied()
}

/// Standard Swift registry
pub fn swift_registry() -> Result<Registry> {
    swift_registry_with(&SwiftOptions::default(), crate::syntax::category::DEFAULT_SIZE_LIMIT)
}

/// Swift registry with extra keywords, classes or operators.
///
/// Keywords come first so that capitalized keywords (`Any`, `Self`) keep
/// the keyword color over the generic type-name category.
pub fn swift_registry_with(options: &SwiftOptions, size_limit: usize) -> Result<Registry> {
    let mut builder = Registry::builder("swift").size_limit(size_limit);

    builder.push("keyword", PatternSpec::words(keywords()), Style::fg(KEYWORD_COLOR), 0);
    if !options.additional_keywords.is_empty() {
        builder.push(
            "additional_keyword",
            PatternSpec::words(options.additional_keywords.iter().cloned()),
            Style::fg(KEYWORD_COLOR),
            0,
        );
    }
    if !options.additional_classes.is_empty() {
        builder.push(
            "additional_class",
            PatternSpec::words(options.additional_classes.iter().cloned()),
            Style::fg(CLASS_COLOR),
            0,
        );
    }
    builder.push("class", PatternSpec::regex(CLASS_PATTERN), Style::fg(CLASS_COLOR), 0);
    if options.operators {
        builder.push("operator", PatternSpec::regex(OPERATOR_PATTERN), Style::fg(OPERATOR_COLOR), 0);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::engine::highlight;
    use crate::syntax::lines::Line;
    use crate::syntax::style::Color;

    fn colored(text: &str, registry: &Registry) -> Vec<(String, Color)> {
        highlight(&Line::new(0, text), registry)
            .iter()
            .filter_map(|s| s.paint.map(|p| (s.slice(text).to_string(), p.fg)))
            .collect()
    }

    #[test]
    fn test_keywords_and_classes() {
        let registry = swift_registry().unwrap();
        let spans = colored(r#"var a = String("Hello")"#, &registry);
        assert_eq!(
            spans,
            [
                ("var".to_string(), KEYWORD_COLOR),
                ("String".to_string(), CLASS_COLOR),
                ("Hello".to_string(), CLASS_COLOR),
            ]
        );
    }

    #[test]
    fn test_keyword_boundaries() {
        let registry = swift_registry().unwrap();
        let spans = colored("class Foo { var variable = 1 }", &registry);
        assert_eq!(
            spans,
            [
                ("class".to_string(), KEYWORD_COLOR),
                ("Foo".to_string(), CLASS_COLOR),
                ("var".to_string(), KEYWORD_COLOR),
            ]
        );
    }

    #[test]
    fn test_capitalized_keyword_stays_keyword() {
        let registry = swift_registry().unwrap();
        assert_eq!(colored("Self", &registry), [("Self".to_string(), KEYWORD_COLOR)]);
    }

    #[test]
    fn test_attribute_prefix() {
        let registry = swift_registry().unwrap();
        let spans = colored("@State private var height", &registry);
        assert_eq!(spans[0], ("@State".to_string(), CLASS_COLOR));
    }

    #[test]
    fn test_directive_at_line_start() {
        let registry = swift_registry().unwrap();
        assert_eq!(colored("#if DEBUG", &registry)[0], ("#if".to_string(), KEYWORD_COLOR));
        assert_eq!(colored("#elseif", &registry), [("#elseif".to_string(), KEYWORD_COLOR)]);
    }

    #[test]
    fn test_additional_words() {
        let options = SwiftOptions {
            additional_keywords: vec!["await".to_string()],
            additional_classes: vec!["sampleCode".to_string()],
            operators: false,
        };
        let registry = swift_registry_with(&options, crate::syntax::category::DEFAULT_SIZE_LIMIT).unwrap();
        let spans = colored("await sampleCode", &registry);
        assert_eq!(
            spans,
            [
                ("await".to_string(), KEYWORD_COLOR),
                ("sampleCode".to_string(), CLASS_COLOR),
            ]
        );
    }

    #[test]
    fn test_operators_opt_in() {
        let plain = swift_registry().unwrap();
        assert!(colored("a + b", &plain).is_empty());

        let options = SwiftOptions::default().with_operators();
        let registry = swift_registry_with(&options, crate::syntax::category::DEFAULT_SIZE_LIMIT).unwrap();
        assert_eq!(colored("a + b", &registry), [(" + ".to_string(), OPERATOR_COLOR)]);
    }
}
