//! Configuration file support
//!
//! Loads settings from ~/.codetint.conf (or %USERPROFILE%\.codetint.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # codetint configuration
//! line-numbers = true
//! language = rust
//! cache = on
//! regex-size-limit = 1048576
//! highlight-color = yellow
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::syntax::{Color, DEFAULT_SIZE_LIMIT};

const MIN_SIZE_LIMIT: usize = 64 * 1024;
const MAX_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Built-in language used when none is given
    pub language: String,
    /// Whether to cache per-line results
    pub cache: bool,
    /// Compiled size limit for each category pattern, in bytes
    pub regex_size_limit: usize,
    /// Background for highlighted rows
    pub highlight_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            language: "swift".to_string(),
            cache: false,
            regex_size_limit: DEFAULT_SIZE_LIMIT,
            highlight_color: Color::Yellow,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".codetint.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".codetint.conf"))
        }
    }

    /// Load configuration from the default file, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();
        if let Ok(contents) = fs::read_to_string(path) {
            debug!(path = %path.display(), "loaded config");
            let settings = Self::parse(&contents);
            config.apply(&settings);
        }
        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("line-numbers") {
            self.show_line_numbers = parse_bool(value);
        }

        if let Some(value) = settings.get("language") {
            if !value.is_empty() {
                self.language = value.to_lowercase();
            }
        }

        if let Some(value) = settings.get("cache") {
            self.cache = parse_bool(value);
        }

        if let Some(value) = settings.get("regex-size-limit") {
            if let Ok(n) = value.parse::<usize>() {
                self.regex_size_limit = n.clamp(MIN_SIZE_LIMIT, MAX_SIZE_LIMIT);
            }
        }

        if let Some(value) = settings.get("highlight-color") {
            match Color::from_name(value) {
                Some(color) => self.highlight_color = color,
                None => warn!("unknown highlight-color `{}` in config", value),
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
line-numbers = true
Language = Rust
regex-size-limit = 100000
        "#;

        let settings = Config::parse(contents);
        assert_eq!(settings.get("line-numbers"), Some(&"true".to_string()));
        assert_eq!(settings.get("language"), Some(&"Rust".to_string()));
        assert_eq!(settings.get("regex-size-limit"), Some(&"100000".to_string()));
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("line-numbers".to_string(), "yes".to_string());
        settings.insert("language".to_string(), "Rust".to_string());
        settings.insert("cache".to_string(), "on".to_string());
        settings.insert("regex-size-limit".to_string(), "1".to_string());
        settings.insert("highlight-color".to_string(), "bright-blue".to_string());

        config.apply(&settings);

        assert!(config.show_line_numbers);
        assert_eq!(config.language, "rust");
        assert!(config.cache);
        assert_eq!(config.regex_size_limit, MIN_SIZE_LIMIT);
        assert_eq!(config.highlight_color, Color::BrightBlue);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("regex-size-limit".to_string(), "lots".to_string());
        settings.insert("highlight-color".to_string(), "mauve".to_string());
        config.apply(&settings);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "line-numbers = on\nhighlight-color = #ffcc00").unwrap();
        let config = Config::load_from(file.path());
        assert!(config.show_line_numbers);
        assert_eq!(config.highlight_color, Color::Rgb(255, 204, 0));

        let missing = Config::load_from(Path::new("/nonexistent/.codetint.conf"));
        assert_eq!(missing, Config::default());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("anything"));
    }
}
