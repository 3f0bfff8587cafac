//! Data models for wizard state.
//!
//! This module defines the core data structures:
//! - `Record` - Behaviour shared by every user-entered record type
//! - `Item` - A single record plus its own completion flag
//! - `Collection` - Ordered list of items with a section-level completion flag
//! - `Form` - A single-object task backed by one record
//! - `Status` - Derived completion status of a task, group or section

pub mod identity;
pub mod naming;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Completion status shown against every task, group and section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl Status {
    /// Label rendered in the status tag.
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not started",
            Status::InProgress => "In progress",
            Status::Complete => "Complete",
        }
    }

    /// Tag colour used by the task list.
    pub fn colour(&self) -> &'static str {
        match self {
            Status::NotStarted => "grey",
            Status::InProgress => "yellow",
            Status::Complete => "green",
        }
    }

    /// Get all statuses, in workflow order.
    pub fn all() -> &'static [Status] {
        &[Status::NotStarted, Status::InProgress, Status::Complete]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Complete => "complete",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Status::NotStarted),
            "in_progress" => Ok(Status::InProgress),
            "complete" => Ok(Status::Complete),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Whether a task is backed by one object or by a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskShape {
    Single,
    Collection,
}

/// A user-entered record.
///
/// Every field of a record is optional, since forms are saved as the user
/// types. Named records return `Some` from [`Record::default_name`]; the
/// list operations then guarantee a non-blank stored name.
pub trait Record: Clone {
    /// Returns true if no field has been populated.
    fn is_blank(&self) -> bool;

    /// Default label for this record type, or `None` for unnamed records.
    fn default_name(&self) -> Option<String> {
        None
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn set_name(&mut self, _name: String) {}

    /// Identity referenced by other collections, if the type carries one.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Returns true if the type carries an identity field.
    fn has_identity(&self) -> bool {
        false
    }

    fn set_id(&mut self, _id: String) {}

    /// Problems that would stop this record being submitted.
    ///
    /// Field-level validation belongs to the form layer; this is only
    /// consulted when previously completed state is revalidated.
    fn validate(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Returns true if an optional text field is unset or empty.
pub fn is_unset_text(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// A single record owned by a [`Collection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item<T> {
    /// Record data as entered
    pub data: T,

    /// Set only after the record's form passed validation
    pub complete: bool,
}

impl<T> Item<T> {
    /// Create a new, incomplete item.
    pub fn new(data: T) -> Self {
        Self {
            data,
            complete: false,
        }
    }

    /// Create an item already marked complete.
    pub fn completed(data: T) -> Self {
        Self {
            data,
            complete: true,
        }
    }
}

/// On-disk shapes an item may take.
///
/// Older saved states stored bare records inside collections; those are
/// imported as complete items.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRepr<T> {
    Wrapped {
        data: T,
        #[serde(default)]
        complete: bool,
    },
    Bare(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Item<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ItemRepr::deserialize(deserializer)? {
            ItemRepr::Wrapped { data, complete } => Item { data, complete },
            ItemRepr::Bare(data) => Item::completed(data),
        })
    }
}

/// An ordered list of items backing one repeatable task.
///
/// Positions are significant: they are the route parameters used to edit
/// an item, so removal shifts later items down by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<Item<T>>,

    /// Section-level flag, distinct from the items' own flags
    #[serde(default)]
    pub complete: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            complete: false,
        }
    }
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unflagged collection from existing items.
    pub fn from_items(data: Vec<Item<T>>) -> Self {
        Self {
            data,
            complete: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item<T>> {
        self.data.get(index)
    }

    /// Iterate over the records, ignoring completion flags.
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|item| &item.data)
    }

    /// Returns true if every item has been completed.
    pub fn all_items_complete(&self) -> bool {
        self.data.iter().all(|item| item.complete)
    }

    /// Records of a collection marked complete, or `None` otherwise.
    pub fn resolved(&self) -> Option<Vec<&T>> {
        self.complete.then(|| self.records().collect())
    }
}

impl<T: Record> Collection<T> {
    /// Names of the items, skipping unnamed ones.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.data.iter().filter_map(|item| item.data.name())
    }
}

/// A single-object task such as general specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form<T> {
    #[serde(default)]
    pub data: T,

    #[serde(default)]
    pub complete: bool,
}

impl<T> Form<T> {
    /// Create an incomplete form holding `data`.
    pub fn new(data: T) -> Self {
        Self {
            data,
            complete: false,
        }
    }

    /// Replace the data, clearing the completion flag.
    pub fn update(&self, data: T) -> Self {
        Self {
            data,
            complete: false,
        }
    }

    /// Data of a completed form, or `None` otherwise.
    pub fn resolved(&self) -> Option<&T> {
        self.complete.then_some(&self.data)
    }
}

impl<T: Clone> Form<T> {
    /// Mark the form complete after its validation passed.
    pub fn mark_complete(&self) -> Self {
        Self {
            data: self.data.clone(),
            complete: true,
        }
    }
}

/// Read-only view of a task's backing store location.
///
/// Implemented by [`Form`] and [`Collection`] so that the status engine can
/// walk typed state without knowing record types.
pub trait FormProgress {
    fn shape(&self) -> TaskShape;

    /// Returns true once any data has been entered.
    fn is_started(&self) -> bool;

    /// Returns true if the task-level completion flag is set.
    fn is_marked_complete(&self) -> bool;

    /// Status of this task alone.
    ///
    /// The explicit flag wins over emptiness: an empty collection marked
    /// complete records that the dwelling has none of that element.
    fn status(&self) -> Status {
        if self.is_marked_complete() {
            Status::Complete
        } else if self.is_started() {
            Status::InProgress
        } else {
            Status::NotStarted
        }
    }
}

impl<T: Record> FormProgress for Form<T> {
    fn shape(&self) -> TaskShape {
        TaskShape::Single
    }

    fn is_started(&self) -> bool {
        !self.data.is_blank()
    }

    fn is_marked_complete(&self) -> bool {
        self.complete
    }
}

impl<T: Record> FormProgress for Collection<T> {
    fn shape(&self) -> TaskShape {
        TaskShape::Collection
    }

    fn is_started(&self) -> bool {
        !self.data.is_empty()
    }

    fn is_marked_complete(&self) -> bool {
        self.complete
    }
}
