//! Command implementations for the `plumb` CLI.
//!
//! Each command loads the state file it is given, runs one library
//! operation and returns a result implementing [`Output`].

use crate::config::ResolvedConfig;
use crate::dwelling::{DwellingState, standard_schema};
use crate::revalidate::ValidationIssue;
use crate::status::{self, NodeKind, SchemaNode, StatusReport};
use crate::submit::{self, HttpSink, Submission};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn to_json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

// === status ===

/// Status tree for the whole schema or one node.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct StatusOutput {
    pub report: StatusReport,
}

impl Output for StatusOutput {
    fn to_json(&self) -> String {
        to_json_string(&self.report)
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        write_report(&mut out, &self.report, 0);
        out.trim_end().to_string()
    }
}

fn write_report(out: &mut String, report: &StatusReport, depth: usize) {
    let _ = writeln!(
        out,
        "{}{} [{}]",
        "  ".repeat(depth),
        report.title,
        report.status.label()
    );
    for child in &report.children {
        write_report(out, child, depth + 1);
    }
}

/// Report status for the standard schema, or for one node of it.
pub fn status(state_path: &Path, node_id: Option<&str>) -> Result<StatusOutput> {
    let state = DwellingState::load(state_path)?;
    let schema = standard_schema();
    let node = match node_id {
        Some(id) => find_node(&schema, id)?,
        None => &schema,
    };
    Ok(StatusOutput {
        report: status::status_report(node, &state),
    })
}

fn find_node<'a>(
    schema: &'a SchemaNode<DwellingState>,
    id: &str,
) -> Result<&'a SchemaNode<DwellingState>> {
    status::find(schema, id).ok_or_else(|| Error::NotFound(id.to_string()))
}

// === tasks ===

#[derive(Debug, Serialize)]
pub struct TaskEntry {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub status: crate::models::Status,
}

/// The task-list page of one section.
#[derive(Debug, Serialize)]
pub struct TaskListOutput {
    pub section: String,
    pub title: String,
    pub tasks: Vec<TaskEntry>,
}

impl Output for TaskListOutput {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![self.title.clone()];
        if self.tasks.is_empty() {
            lines.push("  No tasks.".to_string());
        }
        let width = self.tasks.iter().map(|t| t.title.len()).max().unwrap_or(0);
        for task in &self.tasks {
            lines.push(format!(
                "  {:<width$}  {}",
                task.title,
                task.status.label(),
                width = width
            ));
        }
        lines.join("\n")
    }
}

/// List the applicable children of a section with their statuses.
pub fn tasks(state_path: &Path, section_id: &str) -> Result<TaskListOutput> {
    let state = DwellingState::load(state_path)?;
    let schema = standard_schema();
    let node = find_node(&schema, section_id)?;
    let SchemaNode::Section(section) = node else {
        return Err(Error::InvalidInput(format!(
            "{} is a {}, not a section",
            section_id,
            node.kind()
        )));
    };

    let tasks = section
        .children
        .iter()
        .filter(|child| child.is_applicable(&state))
        .map(|child| TaskEntry {
            id: child.id().to_string(),
            title: child.title().to_string(),
            kind: child.kind(),
            status: status::get_status(child, &state),
        })
        .collect();

    Ok(TaskListOutput {
        section: section.id.to_string(),
        title: section.title.to_string(),
        tasks,
    })
}

// === revalidate ===

#[derive(Debug, Serialize)]
pub struct RevalidateOutput {
    pub changed: bool,
    pub written: bool,
    pub issues: Vec<ValidationIssue>,
}

impl Output for RevalidateOutput {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        if self.issues.is_empty() {
            return "All completed forms are still valid.".to_string();
        }
        let mut lines = vec![format!(
            "{} record(s) no longer valid:",
            self.issues.len()
        )];
        for issue in &self.issues {
            let location = match issue.index {
                Some(index) => format!("{}/{}", issue.path, index),
                None => issue.path.clone(),
            };
            lines.push(format!("  {}: {}", location, issue.messages.join("; ")));
        }
        if self.written {
            lines.push("Completion flags cleared and state saved.".to_string());
        } else {
            lines.push("Run with --write to save the corrected state.".to_string());
        }
        lines.join("\n")
    }
}

/// Revalidate completed forms, optionally writing the result back.
pub fn revalidate(state_path: &Path, write: bool) -> Result<RevalidateOutput> {
    let mut state = DwellingState::load(state_path)?;
    let issues = state.revalidate();
    let changed = !issues.is_empty();
    let written = write && changed;
    if written {
        state.save(state_path)?;
    }
    Ok(RevalidateOutput {
        changed,
        written,
        issues,
    })
}

// === resolve ===

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ResolveOutput {
    pub resolved: serde_json::Value,
}

impl Output for ResolveOutput {
    fn to_json(&self) -> String {
        to_json_string(&self.resolved)
    }

    fn to_human(&self) -> String {
        serde_json::to_string_pretty(&self.resolved).unwrap_or_default()
    }
}

pub fn resolve(state_path: &Path) -> Result<ResolveOutput> {
    let state = DwellingState::load(state_path)?;
    Ok(ResolveOutput {
        resolved: state.resolve()?,
    })
}

// === submit ===

impl Output for Submission {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        let target = self.url.as_deref().unwrap_or("(unknown endpoint)");
        match (self.success, &self.error) {
            (true, _) => format!("Submitted to {}", target),
            (false, Some(error)) => format!("Submission to {} failed: {}", target, error),
            (false, None) => format!("Submission to {} failed", target),
        }
    }
}

/// Post the state to the configured endpoint.
///
/// A failed post is reported in the returned [`Submission`], not as an
/// error; only a missing endpoint or unreadable state file is an error.
pub fn submit(state_path: &Path, config: &ResolvedConfig) -> Result<Submission> {
    let url = config.submit_url().ok_or_else(|| {
        Error::InvalidInput(
            "No submit URL configured: pass --url, set PLUMB_SUBMIT_URL or add submit-url to config.kdl"
                .to_string(),
        )
    })?;
    let state = DwellingState::load(state_path)?;
    Ok(submit::post_state(&HttpSink::new(url), &state))
}

// === config ===

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigShowOutput {
    pub config: ResolvedConfig,
}

impl Output for ConfigShowOutput {
    fn to_json(&self) -> String {
        to_json_string(&self.config)
    }

    fn to_human(&self) -> String {
        let config = &self.config;
        let submit_url = match config.submit_url {
            Some(ref url) => format!("{} ({})", url.value, url.source),
            None => "(not set)".to_string(),
        };
        [
            format!(
                "output-format: {} ({})",
                config.output_format.value, config.output_format.source
            ),
            format!(
                "log-level: {} ({})",
                config.log_level.value, config.log_level.source
            ),
            format!("submit-url: {}", submit_url),
        ]
        .join("\n")
    }
}

pub fn config_show(config: &ResolvedConfig) -> ConfigShowOutput {
    ConfigShowOutput {
        config: config.clone(),
    }
}
