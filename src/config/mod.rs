//! Configuration for the `plumb` CLI.
//!
//! ## config.kdl - User preferences
//!
//! Located at:
//! - Project: `./.plumbline/config.kdl`
//! - System: `~/.config/plumbline/config.kdl`
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `log-level` - tracing filter used when `PLUMB_LOG` is unset
//! - `submit-url` - compliance API endpoint for `plumb submit`
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, ConfigPaths, DEFAULT_LOG_LEVEL, Resolved, ResolvedConfig, SUBMIT_URL_ENV,
    ValueSource, resolve_config, resolve_config_from,
};
pub use schema::{LOG_LEVELS, OutputFormat, PlumbConfig};
