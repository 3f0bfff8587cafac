//! Plumbline - completion tracking for multi-page dwelling survey wizards.
//!
//! This library provides the state/status engine behind the `plumb` CLI:
//! repeatable item collections with naming and invalidation rules, and a
//! recursive status derivation over a declarative task schema.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dwelling;
pub mod models;
pub mod ops;
pub mod revalidate;
pub mod status;
pub mod submit;

/// Library-level error type for Plumbline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Kdl(#[from] kdl::KdlError),

    #[error("Schema node not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Submission failed: {0}")]
    Submit(#[from] submit::SubmitError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Plumbline operations.
pub type Result<T> = std::result::Result<T, Error>;
