//! Compile options and their YAML loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Output markup flavour, only affects the doctype table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Xhtml,
    Html4,
}

/// Options shared read-only by one parse and render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Indent the generated HTML to mirror the template nesting
    #[serde(default = "default_true")]
    pub indent: bool,

    /// Emit trace comments into the generated source
    #[serde(default)]
    pub debug: bool,

    /// Infer the indent unit from the first indented line instead of
    /// requiring two spaces
    #[serde(default = "default_true")]
    pub auto_indent: bool,

    #[serde(default)]
    pub format: Format,
}

fn default_true() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: true,
            debug: false,
            auto_indent: true,
            format: Format::default(),
        }
    }
}

impl Options {
    /// Load options from a YAML file, missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let options = Options::default();

        assert!(options.indent);
        assert!(!options.debug);
        assert!(options.auto_indent);
        assert_eq!(options.format, Format::Xhtml);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options = Options::from_yaml("debug: true\nformat: html4\n").unwrap();

        assert!(options.debug);
        assert!(options.indent);
        assert_eq!(options.format, Format::Html4);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Options::from_yaml("\n").unwrap(), Options::default());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = Options::from_yaml("format: sgml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hamlc.yml");
        std::fs::write(&path, "indent: false\nauto_indent: false\n").unwrap();

        let options = Options::from_file(&path).unwrap();
        assert!(!options.indent);
        assert!(!options.auto_indent);
    }
}
