//! codetint - syntax highlight source code in the terminal

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing::{debug, Level};

use codetint::config::Config;
use codetint::error::{HighlightError, Result};
use codetint::render::{render, RenderOptions};
use codetint::syntax::{
    builtin, load_definition_with_limit, parse_requests, resolve_within, HighlightRequest, Highlighter,
    SplitMode, DEFAULT_CACHE_SIZE,
};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    line_numbers: bool,
    highlight: Vec<HighlightRequest>,
    language: Option<String>,
    definition: Option<PathBuf>,
    color: Option<bool>,
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum Action {
    Highlight(Options),
    Help,
    Version,
    ListLanguages,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let action = match parse_args(&args) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'codetint --help' for more information.");
            process::exit(2);
        }
    };

    let result = match action {
        Action::Help => {
            print_usage();
            Ok(())
        }
        Action::Version => {
            print_version();
            Ok(())
        }
        Action::ListLanguages => {
            for name in builtin::names() {
                println!("{}", name);
            }
            Ok(())
        }
        Action::Highlight(options) => run(options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Action> {
    let mut options = Options::default();
    let mut iter = args.iter();

    fn value<'a>(flag: &str, iter: &mut impl Iterator<Item = &'a String>) -> Result<&'a String> {
        iter.next()
            .ok_or_else(|| HighlightError::Message(format!("option '{}' requires a value", flag)))
    }

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--list-languages" => return Ok(Action::ListLanguages),
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--highlight" | "-H" => {
                let list = value(arg, &mut iter)?;
                options.highlight.extend(parse_requests(list)?);
            }
            "--language" | "-l" => options.language = Some(value(arg, &mut iter)?.to_lowercase()),
            "--definition" | "-d" => options.definition = Some(PathBuf::from(value(arg, &mut iter)?)),
            "--plain" => options.color = Some(false),
            "--color" => options.color = Some(true),
            "--verbose" | "-v" => options.verbose = true,
            "-" => options.file = None,
            flag if flag.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option '{}'", flag)));
            }
            file => {
                if options.file.is_some() {
                    return Err(HighlightError::Message("only one file may be given".to_string()));
                }
                options.file = Some(PathBuf::from(file));
            }
        }
    }

    Ok(Action::Highlight(options))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(options: Options) -> Result<()> {
    init_logging(options.verbose);
    let config = Config::load();
    debug!(?config, "configuration");

    let source = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    // A definition file wins over a named built-in
    let registry = match &options.definition {
        Some(path) => load_definition_with_limit(path, config.regex_size_limit)?,
        None => {
            let language = options.language.as_deref().unwrap_or(&config.language);
            builtin::by_name(language, config.regex_size_limit)?
        }
    };
    let registry = Arc::new(registry);

    let mut highlighter = if config.cache {
        Highlighter::with_cache(registry, DEFAULT_CACHE_SIZE)
    } else {
        Highlighter::new(registry)
    };

    // A single trailing newline is a line terminator, not an empty last line
    let text = source.strip_suffix('\n').unwrap_or(&source);

    let rows = resolve_within(&options.highlight, line_count(text));
    let line_numbers = options.line_numbers || config.show_line_numbers;
    let mode = SplitMode::for_display(line_numbers, rows.len());
    let lines = highlighter.highlight_document(text, mode);

    let render_options = RenderOptions {
        line_numbers,
        highlight_color: config.highlight_color,
        color: options.color.unwrap_or_else(|| io::stdout().is_terminal()),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &lines, &rows, &render_options)
}

/// Number of lines `split` yields for `text` in multi-line mode
fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

fn print_usage() {
    println!("codetint {} - syntax highlight source code", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codetint [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or '-'.");
    println!();
    println!("Options:");
    println!("  -n, --line-numbers       Show line numbers");
    println!("  -H, --highlight LIST     Highlight rows, e.g. 5,11-14");
    println!("  -l, --language NAME      Built-in language (see --list-languages)");
    println!("  -d, --definition FILE    Load categories from a TOML definition");
    println!("      --plain              Never emit colors");
    println!("      --color              Emit colors even when not on a terminal");
    println!("      --list-languages     List built-in languages");
    println!("  -v, --verbose            Debug logging on stderr");
    println!("  -h, --help               Show this help message");
    println!("  -V, --version            Show version information");
    println!();
    println!("Settings are read from ~/.codetint.conf (key = value).");
}

fn print_version() {
    println!("codetint {}", env!("CARGO_PKG_VERSION"));
}
