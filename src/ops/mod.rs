//! List operations over item collections.
//!
//! Every operation takes a collection by reference and returns a new
//! snapshot, so callers decide when to swap it into their state tree.
//! Operations never fail: an index outside the collection or an empty
//! create is a no-op, logged at debug level.
//!
//! Invalidation rules enforced here:
//! - Any stored edit clears the edited item's `complete` flag.
//! - Any add, edit, duplicate or removal clears the collection's flag.

use crate::models::identity::IdGenerator;
use crate::models::{Collection, Item, Record, naming};
use crate::{Error, Result};
use std::fmt;

/// Which item a form save targets, as named by the route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTarget {
    /// The `create` route: a new item is appended on first save
    Create,
    /// An existing item addressed by position
    Index(usize),
}

impl fmt::Display for ItemTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemTarget::Create => write!(f, "create"),
            ItemTarget::Index(index) => write!(f, "{}", index),
        }
    }
}

impl std::str::FromStr for ItemTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "create" {
            return Ok(ItemTarget::Create);
        }
        s.parse::<usize>()
            .map(ItemTarget::Index)
            .map_err(|_| Error::InvalidInput(format!("Invalid item route parameter: {}", s)))
    }
}

/// Save form data into a collection.
///
/// Creating with an entirely blank record is a no-op, so a stray blur on an
/// empty form never leaves a phantom item behind. A blank name on a named
/// record is replaced by the type's default label.
pub fn upsert<T: Record>(collection: &Collection<T>, target: ItemTarget, data: T) -> Collection<T> {
    match target {
        ItemTarget::Create => {
            if data.is_blank() {
                tracing::debug!("Ignoring create with no populated fields");
                return collection.clone();
            }
            let data = with_stored_name(data, collection, true);
            let mut next = collection.clone();
            next.data.push(Item::new(data));
            next.complete = false;
            next
        }
        ItemTarget::Index(index) => {
            if index >= collection.len() {
                tracing::debug!(index, len = collection.len(), "Ignoring update past end");
                return collection.clone();
            }
            let data = with_stored_name(data, collection, false);
            let mut next = collection.clone();
            next.data[index] = Item::new(data);
            next.complete = false;
            next
        }
    }
}

/// Apply the save-time naming rule to a record.
fn with_stored_name<T: Record>(mut data: T, collection: &Collection<T>, creating: bool) -> T {
    let Some(label) = data.default_name() else {
        return data;
    };
    let name = match naming::normalize(data.name()) {
        Some(name) => name,
        None if creating => naming::default_name(&label, collection.names()),
        None => label,
    };
    data.set_name(name);
    data
}

/// Remove the item at `index`; later items shift down by one.
pub fn remove<T: Record>(collection: &Collection<T>, index: usize) -> Collection<T> {
    if index >= collection.len() {
        tracing::debug!(index, len = collection.len(), "Ignoring removal past end");
        return collection.clone();
    }
    let mut next = collection.clone();
    next.data.remove(index);
    next.complete = false;
    next
}

/// Append a copy of the item at `index` under a unique duplicate name.
///
/// Records carrying an identity get a fresh id from `ids`, so references
/// into this collection keep pointing at the original.
pub fn duplicate<T: Record>(
    collection: &Collection<T>,
    index: usize,
    ids: &mut dyn IdGenerator,
) -> Collection<T> {
    let Some(source) = collection.get(index) else {
        tracing::debug!(index, len = collection.len(), "Ignoring duplicate past end");
        return collection.clone();
    };

    let mut copy = source.data.clone();
    // An unnamed source (e.g. a legacy import) is copied under its label
    let base = naming::normalize(source.data.name()).or_else(|| source.data.default_name());
    if let Some(base) = base {
        copy.set_name(naming::duplicate_name(&base, collection.names()));
    }
    if copy.has_identity() {
        copy.set_id(ids.generate());
    }

    let mut next = collection.clone();
    next.data.push(Item::new(copy));
    next.complete = false;
    next
}

/// Returns true if the "mark section as complete" action is available.
pub fn can_mark_complete<T>(collection: &Collection<T>) -> bool {
    collection.all_items_complete()
}

/// Set the collection's own flag, if every item is complete.
///
/// When any item is incomplete the action is disabled and this returns the
/// collection unchanged.
pub fn mark_complete<T: Record>(collection: &Collection<T>) -> Collection<T> {
    let mut next = collection.clone();
    if can_mark_complete(collection) {
        next.complete = true;
    } else {
        tracing::debug!("Mark complete refused: collection has incomplete items");
    }
    next
}

/// Flag one item complete once its form has passed validation.
pub fn mark_item_complete<T: Record>(collection: &Collection<T>, index: usize) -> Collection<T> {
    let mut next = collection.clone();
    match next.data.get_mut(index) {
        Some(item) => item.complete = true,
        None => tracing::debug!(index, "Ignoring completion past end"),
    }
    next
}

/// Remove a source item together with every dependent that references it.
///
/// Returns the new source and dependent collections. The dependent
/// collection is only invalidated when something was removed from it.
pub fn remove_with_dependents<S: Record, D: Record>(
    sources: &Collection<S>,
    index: usize,
    dependents: &Collection<D>,
    reference: fn(&D) -> Option<&str>,
) -> (Collection<S>, Collection<D>) {
    let removed_id = sources
        .get(index)
        .and_then(|item| item.data.id())
        .map(str::to_string);
    let next_sources = remove(sources, index);

    let Some(removed_id) = removed_id else {
        return (next_sources, dependents.clone());
    };

    let mut next_dependents = dependents.clone();
    next_dependents
        .data
        .retain(|item| reference(&item.data) != Some(removed_id.as_str()));
    let dropped = dependents.len() - next_dependents.len();
    if dropped > 0 {
        tracing::debug!(id = %removed_id, dropped, "Removed dependent items");
        next_dependents.complete = false;
    }
    (next_sources, next_dependents)
}

/// Detach every item that references `id`.
///
/// The reference is unset and both the item and the collection lose their
/// completion flags, since the item now needs a new target.
pub fn clear_references<T: Record>(
    collection: &Collection<T>,
    id: &str,
    reference: fn(&mut T) -> &mut Option<String>,
) -> Collection<T> {
    let mut next = collection.clone();
    let mut cleared = 0;
    for item in next.data.iter_mut() {
        let field = reference(&mut item.data);
        if field.as_deref() == Some(id) {
            *field = None;
            item.complete = false;
            cleared += 1;
        }
    }
    if cleared > 0 {
        tracing::debug!(id, cleared, "Cleared references");
        next.complete = false;
    }
    next
}
