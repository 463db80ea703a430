//! Rust language definition
//!
//! Single-line rules only: a block comment or string that spans lines is
//! highlighted piecewise, line by line. No rule matches a line break.

use crate::error::Result;
use crate::syntax::category::PatternSpec;
use crate::syntax::registry::Registry;
use crate::syntax::tokens::TokenType;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "union", "unsafe", "use", "where", "while",
];

const TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
    "i64", "i128", "isize", "f32", "f64", "String", "Vec", "Box", "Rc", "Arc", "Option",
    "Result", "Some", "None", "Ok", "Err",
];

/// Create the Rust registry
pub fn rust_registry(size_limit: usize) -> Result<Registry> {
    let mut builder = Registry::builder("rust").size_limit(size_limit);
    let mut rule = |id: &str, spec: PatternSpec, token: TokenType, priority: i32| {
        builder.push(id, spec, token.default_style(), priority);
    };

    // Comments (highest priority)
    rule("line_comment", PatternSpec::regex(r"//.*$"), TokenType::Comment, 100);
    rule("block_comment", PatternSpec::regex(r"/\*.*?(?:\*/|$)"), TokenType::Comment, 100);

    // Attributes
    rule("attribute", PatternSpec::regex(r"#!?\[[^\]\n]*\]"), TokenType::Attribute, 95);

    // Literals
    rule("string", PatternSpec::regex(r#"b?"(?:[^"\\\n]|\\.)*"?"#), TokenType::String, 92);
    rule("char", PatternSpec::regex(r"b?'(?:[^'\\\n]|\\.)'"), TokenType::String, 90);

    // Lifetimes, after char so 'a' is a char
    rule("lifetime", PatternSpec::regex(r"'\w+"), TokenType::Type, 89);

    // Macros (ending with !)
    rule("macro", PatternSpec::regex(r"\b\w+!"), TokenType::Macro, 85);

    rule("keyword", PatternSpec::words(KEYWORDS.iter().copied()), TokenType::Keyword, 80);
    rule("type", PatternSpec::words(TYPES.iter().copied()), TokenType::Type, 75);

    // Function definitions; `fn` itself is already a keyword
    rule("fn_def", PatternSpec::regex(r"\bfn[ \t]+\w+"), TokenType::Function, 70);

    // Numbers
    rule("hex", PatternSpec::regex(r"\b0x[0-9a-fA-F_]+\b"), TokenType::Number, 65);
    rule("binary", PatternSpec::regex(r"\b0b[01_]+\b"), TokenType::Number, 65);
    rule("octal", PatternSpec::regex(r"\b0o[0-7_]+\b"), TokenType::Number, 65);
    rule(
        "float",
        PatternSpec::regex(r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b"),
        TokenType::Number,
        64,
    );
    rule(
        "integer",
        PatternSpec::regex(r"\b\d[\d_]*(?:u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize)?\b"),
        TokenType::Number,
        63,
    );

    // Type names (capitalized identifiers)
    rule("type_name", PatternSpec::regex(r"\b[A-Z][a-zA-Z0-9_]*\b"), TokenType::Type, 60);

    rule("operator", PatternSpec::regex(r"[+\-*/%&|^!<>=@]+"), TokenType::Operator, 40);

    builder.build()
}
