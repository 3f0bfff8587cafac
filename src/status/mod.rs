//! Status derivation over the task-list schema.
//!
//! The schema is a tree of [`SchemaNode`]s describing the wizard: leaf
//! tasks point at one form or collection in the state tree, groups
//! aggregate interchangeable tasks and sections aggregate everything
//! beneath them. Status is recomputed from live state on every call; no
//! node stores its own status.

pub mod relation;

use crate::models::{Collection, FormProgress, Status};
use relation::JoinView;
use serde::Serialize;
use std::fmt;

/// Typed accessor from the state tree to one task's backing store.
pub type FormLens<S> = fn(&S) -> &dyn FormProgress;

/// A leaf task backed by one form or collection.
pub struct Task<S> {
    pub id: &'static str,
    pub title: &'static str,
    pub lens: FormLens<S>,
}

impl<S> Task<S> {
    pub fn new(id: &'static str, title: &'static str, lens: FormLens<S>) -> Self {
        Self { id, title, lens }
    }
}

/// Interchangeable tasks where completing any one satisfies the group.
pub struct Group<S> {
    pub id: &'static str,
    pub title: &'static str,
    pub tasks: Vec<Task<S>>,
}

/// Tasks, groups and nested sections that must all be complete.
pub struct Section<S> {
    pub id: &'static str,
    pub title: &'static str,
    pub children: Vec<SchemaNode<S>>,
}

/// A task whose completion is a join between two collections.
pub struct RelationalTask<S> {
    pub id: &'static str,
    pub title: &'static str,
    pub join: Box<dyn JoinView<S>>,
}

/// One node of the task-list schema.
pub enum SchemaNode<S> {
    Task(Task<S>),
    Group(Group<S>),
    Section(Section<S>),
    Relational(RelationalTask<S>),
}

/// Kind of a schema node, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Task,
    Group,
    Section,
    Relational,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Task => "task",
            NodeKind::Group => "group",
            NodeKind::Section => "section",
            NodeKind::Relational => "relational",
        };
        write!(f, "{}", s)
    }
}

impl<S> SchemaNode<S> {
    pub fn id(&self) -> &'static str {
        match self {
            SchemaNode::Task(task) => task.id,
            SchemaNode::Group(group) => group.id,
            SchemaNode::Section(section) => section.id,
            SchemaNode::Relational(task) => task.id,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SchemaNode::Task(task) => task.title,
            SchemaNode::Group(group) => group.title,
            SchemaNode::Section(section) => section.title,
            SchemaNode::Relational(task) => task.title,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaNode::Task(_) => NodeKind::Task,
            SchemaNode::Group(_) => NodeKind::Group,
            SchemaNode::Section(_) => NodeKind::Section,
            SchemaNode::Relational(_) => NodeKind::Relational,
        }
    }

    /// Returns true if the node should be offered on a task-list page.
    ///
    /// Only relational tasks can be inapplicable: the ductwork page makes
    /// no sense until a unit that needs ductwork exists. Status derivation
    /// ignores this; it only decides what is listed.
    pub fn is_applicable(&self, state: &S) -> bool {
        match self {
            SchemaNode::Relational(task) => relation::is_applicable(task.join.as_ref(), state),
            _ => true,
        }
    }
}

impl<S> fmt::Debug for SchemaNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaNode::Task(task) => f.debug_struct("Task").field("id", &task.id).finish(),
            SchemaNode::Group(group) => f
                .debug_struct("Group")
                .field("id", &group.id)
                .field("tasks", &group.tasks.iter().map(|t| t.id).collect::<Vec<_>>())
                .finish(),
            SchemaNode::Section(section) => f
                .debug_struct("Section")
                .field("id", &section.id)
                .field("children", &section.children)
                .finish(),
            SchemaNode::Relational(task) => {
                f.debug_struct("Relational").field("id", &task.id).finish()
            }
        }
    }
}

/// Derive the status of `node` against the current state.
///
/// Every child of a section counts, applicable or not: an inapplicable
/// relational task is not started and holds its section at in progress.
pub fn get_status<S>(node: &SchemaNode<S>, state: &S) -> Status {
    match node {
        SchemaNode::Task(task) => task_status(task, state),
        SchemaNode::Group(group) => group_status(group, state),
        SchemaNode::Section(section) => {
            section_status(section.children.iter().map(|child| get_status(child, state)))
        }
        SchemaNode::Relational(task) => relation::relational_status(task.join.as_ref(), state),
    }
}

fn task_status<S>(task: &Task<S>, state: &S) -> Status {
    (task.lens)(state).status()
}

fn group_status<S>(group: &Group<S>, state: &S) -> Status {
    let statuses: Vec<Status> = group.tasks.iter().map(|t| task_status(t, state)).collect();
    if statuses.contains(&Status::Complete) {
        Status::Complete
    } else if statuses.contains(&Status::InProgress) {
        Status::InProgress
    } else {
        Status::NotStarted
    }
}

fn section_status(children: impl Iterator<Item = Status>) -> Status {
    let mut any_complete = false;
    let mut any_not_started = false;
    for status in children {
        match status {
            Status::InProgress => return Status::InProgress,
            Status::Complete => any_complete = true,
            Status::NotStarted => any_not_started = true,
        }
    }
    match (any_complete, any_not_started) {
        (true, false) => Status::Complete,
        (true, true) => Status::InProgress,
        // Every child not started, or no children at all
        (false, _) => Status::NotStarted,
    }
}

/// Status of one node and, for containers, of everything beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StatusReport>,
}

impl StatusReport {
    /// Count reports in this tree (including this one) with the given status.
    pub fn count(&self, status: Status) -> usize {
        let own = usize::from(self.status == status);
        own + self.children.iter().map(|c| c.count(status)).sum::<usize>()
    }
}

/// Build the status tree for `node`.
pub fn status_report<S>(node: &SchemaNode<S>, state: &S) -> StatusReport {
    let children = match node {
        SchemaNode::Task(_) | SchemaNode::Relational(_) => Vec::new(),
        SchemaNode::Group(group) => group
            .tasks
            .iter()
            .map(|task| StatusReport {
                id: task.id.to_string(),
                title: task.title.to_string(),
                kind: NodeKind::Task,
                status: task_status(task, state),
                children: Vec::new(),
            })
            .collect(),
        SchemaNode::Section(section) => section
            .children
            .iter()
            .map(|child| status_report(child, state))
            .collect(),
    };

    StatusReport {
        id: node.id().to_string(),
        title: node.title().to_string(),
        kind: node.kind(),
        status: get_status(node, state),
        children,
    }
}

/// Depth-first lookup of a section, group or relational task by id.
///
/// Tasks inside groups are not schema nodes of their own and are not
/// returned; look up the enclosing group instead.
pub fn find<'a, S>(node: &'a SchemaNode<S>, id: &str) -> Option<&'a SchemaNode<S>> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        SchemaNode::Section(section) => section.children.iter().find_map(|c| find(c, id)),
        _ => None,
    }
}

/// Per-entry status for a collection's summary list.
pub fn item_statuses<T>(collection: &Collection<T>) -> Vec<Status> {
    collection
        .data
        .iter()
        .map(|item| {
            if item.complete {
                Status::Complete
            } else {
                Status::InProgress
            }
        })
        .collect()
}
