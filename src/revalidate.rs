//! Revalidation of previously completed state.
//!
//! Validation rules change between releases, so a saved state may carry
//! completion flags that the current rules would refuse. Revalidation
//! re-runs [`Record::validate`] on every flagged record and clears the
//! flags it can no longer vouch for. Records that were never completed are
//! left alone: they are still being edited.

use crate::models::{Collection, Form, Record};
use serde::Serialize;

/// A record that failed revalidation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Location of the form or collection in the state tree
    pub path: String,

    /// Item position, for collections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    pub messages: Vec<String>,
}

/// State that can re-check its own completion flags.
pub trait Revalidate {
    /// Clear flags on records that no longer validate, returning the issues.
    fn revalidate(&mut self, path: &str) -> Vec<ValidationIssue>;
}

impl<T: Record> Revalidate for Form<T> {
    fn revalidate(&mut self, path: &str) -> Vec<ValidationIssue> {
        if !self.complete {
            return Vec::new();
        }
        let messages = self.data.validate();
        if messages.is_empty() {
            return Vec::new();
        }
        self.complete = false;
        let issue = ValidationIssue {
            path: path.to_string(),
            index: None,
            messages,
        };
        log_issue(&issue);
        vec![issue]
    }
}

impl<T: Record> Revalidate for Collection<T> {
    fn revalidate(&mut self, path: &str) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, item) in self.data.iter_mut().enumerate() {
            if !item.complete {
                continue;
            }
            let messages = item.data.validate();
            if messages.is_empty() {
                continue;
            }
            item.complete = false;
            let issue = ValidationIssue {
                path: path.to_string(),
                index: Some(index),
                messages,
            };
            log_issue(&issue);
            issues.push(issue);
        }
        if !issues.is_empty() {
            self.complete = false;
        }
        issues
    }
}

fn log_issue(issue: &ValidationIssue) {
    tracing::warn!(
        path = %issue.path,
        index = ?issue.index,
        "Cleared completion: {}",
        issue.messages.join("; ")
    );
}
