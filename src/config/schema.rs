//! KDL schema for config.kdl.

use crate::Result;
use kdl::KdlDocument;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log levels accepted by `log-level`, most verbose first.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// log-level "info"
/// submit-url "https://example.invalid/api/setState"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumbConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Log filter used when `PLUMB_LOG` is unset
    pub log_level: Option<String>,

    /// Endpoint that receives submitted dwelling state
    pub submit_url: Option<String>,
}

impl PlumbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref level) = self.log_level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(format!(
                    "log-level must be one of {}, got {}",
                    LOG_LEVELS.join(", "),
                    level
                ));
            }
        }
        if let Some(ref url) = self.submit_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("submit-url must be an http(s) URL, got {}", url));
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes are ignored; an unparseable `output-format` is treated
    /// as unset.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        Self {
            output_format: string_value(doc, "output-format").and_then(|s| OutputFormat::parse(&s)),
            log_level: string_value(doc, "log-level").map(|s| s.to_lowercase()),
            submit_url: string_value(doc, "submit-url"),
        }
    }

    /// Read a config file, returning an empty config if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let doc: KdlDocument = content.parse()?;
        let config = Self::from_kdl(&doc);
        config.validate().map_err(|e| {
            crate::Error::InvalidInput(format!("{}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

fn string_value(doc: &KdlDocument, name: &str) -> Option<String> {
    doc.get(name)
        .and_then(|node| node.entries().first())
        .and_then(|entry| entry.value().as_string())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::Human.to_string(), "human");
    }

    #[test]
    fn test_from_kdl() {
        let doc: KdlDocument = r#"
            output-format "human"
            log-level "Debug"
            submit-url "https://example.invalid/api/setState"
            unknown-node 42
        "#
        .parse()
        .unwrap();

        let config = PlumbConfig::from_kdl(&doc);
        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.submit_url.as_deref(),
            Some("https://example.invalid/api/setState")
        );
    }

    #[test]
    fn test_from_kdl_ignores_bad_format() {
        let doc: KdlDocument = r#"output-format "xml""#.parse().unwrap();
        assert_eq!(PlumbConfig::from_kdl(&doc).output_format, None);
    }

    #[test]
    fn test_validate() {
        assert!(PlumbConfig::new().validate().is_ok());

        let config = PlumbConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("log-level"));

        let config = PlumbConfig {
            submit_url: Some("ftp://example.invalid".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.kdl");
        assert_eq!(PlumbConfig::load(&path).unwrap(), PlumbConfig::new());

        std::fs::write(&path, "log-level \"trace\"\n").unwrap();
        let config = PlumbConfig::load(&path).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("trace"));

        std::fs::write(&path, "log-level \"shout\"\n").unwrap();
        assert!(PlumbConfig::load(&path).is_err());

        std::fs::write(&path, "output-format {").unwrap();
        assert!(matches!(PlumbConfig::load(&path), Err(crate::Error::Kdl(_))));
    }
}
