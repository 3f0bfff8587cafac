//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment (`PLUMB_SUBMIT_URL`, for the submit URL only)
//! 3. Project config.kdl (`./.plumbline/config.kdl`)
//! 4. System config.kdl (`~/.config/plumbline/config.kdl`)
//! 5. Built-in defaults

use super::schema::{OutputFormat, PlumbConfig};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the submit URL.
pub const SUBMIT_URL_ENV: &str = "PLUMB_SUBMIT_URL";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from the project's config.kdl
    Project,
    /// Value from the user's config.kdl
    System,
    /// Value from an explicit `--config` file
    File(PathBuf),
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Project => write!(f, "project"),
            ValueSource::System => write!(f, "system"),
            ValueSource::File(path) => write!(f, "file:{}", path.display()),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub output_format: Resolved<OutputFormat>,
    pub log_level: Resolved<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<Resolved<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            log_level: Resolved::new(DEFAULT_LOG_LEVEL.to_string(), ValueSource::Default),
            submit_url: None,
        }
    }
}

impl ResolvedConfig {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn log_level(&self) -> &str {
        &self.log_level.value
    }

    /// Get the submit URL, if configured anywhere.
    pub fn submit_url(&self) -> Option<&str> {
        self.submit_url.as_ref().map(|r| r.value.as_str())
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Output format override from CLI flag
    pub output_format: Option<OutputFormat>,
    /// Submit URL override from CLI flag
    pub submit_url: Option<String>,
    /// Explicit config file, replacing the project file
    pub config_path: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_submit_url(mut self, url: impl Into<String>) -> Self {
        self.submit_url = Some(url.into());
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Where config files are looked up.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config, relative to the working directory
    pub project: PathBuf,
    /// User config, if a config directory is known
    pub system: Option<PathBuf>,
}

impl ConfigPaths {
    /// Standard locations for the current directory and user.
    pub fn discover() -> Self {
        Self {
            project: Path::new(".plumbline").join("config.kdl"),
            system: dirs::config_dir().map(|dir| dir.join("plumbline").join("config.kdl")),
        }
    }
}

/// Resolve configuration from the standard locations and environment.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let env_url = std::env::var(SUBMIT_URL_ENV).ok().filter(|url| !url.is_empty());
    resolve_config_from(&ConfigPaths::discover(), env_url, overrides)
}

/// Resolve configuration with full precedence chain.
///
/// Precedence (highest to lowest):
/// 1. CLI flags (from `overrides`)
/// 2. `env_url` for the submit URL
/// 3. Project config.kdl, or the `--config` file if given
/// 4. System config.kdl
/// 5. Built-in defaults
pub fn resolve_config_from(
    paths: &ConfigPaths,
    env_url: Option<String>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let mut result = ResolvedConfig::default();

    // Load system config (lowest precedence among file-based)
    let system_config = match paths.system {
        Some(ref path) => PlumbConfig::load(path)?,
        None => PlumbConfig::new(),
    };

    // An explicit --config file takes the project file's place
    let (project_config, project_source) = match overrides.config_path {
        Some(ref path) => {
            if !path.exists() {
                return Err(crate::Error::InvalidInput(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            (PlumbConfig::load(path)?, ValueSource::File(path.clone()))
        }
        None => (PlumbConfig::load(&paths.project)?, ValueSource::Project),
    };

    // Resolve output_format
    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = project_config.output_format {
        result.output_format = Resolved::new(format, project_source.clone());
    } else if let Some(format) = system_config.output_format {
        result.output_format = Resolved::new(format, ValueSource::System);
    }
    // else: remains Default (Json)

    // Resolve log_level
    if let Some(ref level) = project_config.log_level {
        result.log_level = Resolved::new(level.clone(), project_source.clone());
    } else if let Some(ref level) = system_config.log_level {
        result.log_level = Resolved::new(level.clone(), ValueSource::System);
    }

    // Resolve submit_url
    if let Some(ref url) = overrides.submit_url {
        result.submit_url = Some(Resolved::new(url.clone(), ValueSource::CliFlag));
    } else if let Some(url) = env_url {
        result.submit_url = Some(Resolved::new(
            url,
            ValueSource::EnvVar(SUBMIT_URL_ENV.to_string()),
        ));
    } else if let Some(ref url) = project_config.submit_url {
        result.submit_url = Some(Resolved::new(url.clone(), project_source));
    } else if let Some(ref url) = system_config.submit_url {
        result.submit_url = Some(Resolved::new(url.clone(), ValueSource::System));
    }
    // else: remains None (no default endpoint)

    Ok(result)
}
