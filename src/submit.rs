//! Submission of dwelling state to the compliance API.
//!
//! Posting is best-effort: [`post_state`] never fails and never touches the
//! in-memory state. The outcome is returned as a [`Submission`] record so
//! callers can report it.

use crate::dwelling::DwellingState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// User-Agent header sent with every request
const USER_AGENT: &str = concat!("plumbline/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while posting state.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The API answered with a non-success status
    #[error("API rejected state: HTTP {code}: {body}")]
    Rejected { code: u16, body: String },

    /// Network or other transport error
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// State could not be encoded
    #[error("Failed to encode state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for serialized state.
pub trait StateSink {
    /// Where the state goes, for reporting.
    fn target(&self) -> Option<&str> {
        None
    }

    fn post(&self, body: &serde_json::Value) -> Result<(), SubmitError>;
}

/// Posts JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSink {
    url: String,
}

impl HttpSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl StateSink for HttpSink {
    fn target(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn post(&self, body: &serde_json::Value) -> Result<(), SubmitError> {
        let response = ureq::post(&self.url)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/json")
            .send_json(body);

        match response {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(SubmitError::Rejected { code, body })
            }
            Err(e) => Err(SubmitError::Http(e.to_string())),
        }
    }
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Post the full state tree, logging rather than returning failures.
pub fn post_state(sink: &dyn StateSink, state: &DwellingState) -> Submission {
    let url = sink.target().map(str::to_string);
    let submitted_at = Utc::now();

    let result = serde_json::to_value(state)
        .map_err(SubmitError::from)
        .and_then(|body| sink.post(&body));

    match result {
        Ok(()) => {
            tracing::info!(url = ?url, "Submitted dwelling state");
            Submission {
                url,
                submitted_at,
                success: true,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(url = ?url, error = %e, "Failed to submit dwelling state");
            Submission {
                url,
                submitted_at,
                success: false,
                error: Some(e.to_string()),
            }
        }
    }
}
