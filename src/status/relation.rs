//! Relational tasks: completion defined by a join between two collections.
//!
//! The canonical case is ductwork. Every ventilation unit that needs
//! ductwork must be referenced by at least one ductwork entry before the
//! ductwork task counts as complete.

use super::RelationalTask;
use crate::models::{Collection, Record, Status};
use std::collections::HashSet;

/// Type-erased view of a join, so that schema nodes need not carry the
/// record types of both collections.
pub trait JoinView<S> {
    /// Ids of the source items that must be referenced.
    ///
    /// A qualifying item without an id is still listed, as `None`; it can
    /// never be referenced, so it keeps the task in progress.
    fn required<'a>(&self, state: &'a S) -> Vec<Option<&'a str>>;

    /// Ids referenced by the dependent items.
    fn references<'a>(&self, state: &'a S) -> Vec<&'a str>;
}

/// A join from qualifying source records to the dependents pointing at them.
pub struct Relation<S, Src, Dep> {
    pub source: fn(&S) -> &Collection<Src>,
    pub qualifies: fn(&Src) -> bool,
    pub dependent: fn(&S) -> &Collection<Dep>,
    pub reference: fn(&Dep) -> Option<&str>,
}

impl<S, Src: Record + 'static, Dep: 'static> JoinView<S> for Relation<S, Src, Dep> {
    fn required<'a>(&self, state: &'a S) -> Vec<Option<&'a str>> {
        (self.source)(state)
            .records()
            .filter(|record| (self.qualifies)(*record))
            .map(|record| record.id())
            .collect()
    }

    fn references<'a>(&self, state: &'a S) -> Vec<&'a str> {
        (self.dependent)(state)
            .records()
            .filter_map(|record| (self.reference)(record))
            .collect()
    }
}

impl<S> RelationalTask<S> {
    pub fn new(id: &'static str, title: &'static str, join: impl JoinView<S> + 'static) -> Self {
        Self {
            id,
            title,
            join: Box::new(join),
        }
    }
}

/// Status of a relational task.
///
/// With no qualifying source items the task has not started, whatever the
/// dependent collection holds: orphans left behind by a removed source do
/// not count. A source item is satisfied once any dependent references it;
/// the dependent's own completion flag is not consulted.
pub fn relational_status<S>(join: &dyn JoinView<S>, state: &S) -> Status {
    let required = join.required(state);
    if required.is_empty() {
        return Status::NotStarted;
    }

    let referenced: HashSet<&str> = join.references(state).into_iter().collect();
    let satisfied = required
        .iter()
        .flatten()
        .filter(|id| referenced.contains(*id))
        .count();
    tracing::trace!(required = required.len(), satisfied, "Relational join");

    if satisfied == required.len() {
        Status::Complete
    } else {
        Status::InProgress
    }
}

/// Returns true if there is at least one source item to satisfy.
pub fn is_applicable<S>(join: &dyn JoinView<S>, state: &S) -> bool {
    !join.required(state).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use crate::models::test_records::Panel;
    use crate::status::{SchemaNode, Section, Task, get_status};

    #[derive(Default)]
    struct Plant {
        units: Collection<Panel>,
        links: Collection<Panel>,
    }

    fn units(state: &Plant) -> &Collection<Panel> {
        &state.units
    }

    fn links(state: &Plant) -> &Collection<Panel> {
        &state.links
    }

    // Large panels stand in for units that need ductwork
    fn is_large(panel: &Panel) -> bool {
        panel.area.is_some_and(|area| area >= 10.0)
    }

    fn linked_unit(panel: &Panel) -> Option<&str> {
        panel.name.as_deref()
    }

    fn relation() -> Relation<Plant, Panel, Panel> {
        Relation {
            source: units,
            qualifies: is_large,
            dependent: links,
            reference: linked_unit,
        }
    }

    fn unit(id: &str, area: f64) -> Item<Panel> {
        Item::completed(Panel {
            id: Some(id.to_string()),
            name: Some(format!("Unit {}", id)),
            area: Some(area),
        })
    }

    fn link(target: &str) -> Item<Panel> {
        Item::new(Panel::named(target))
    }

    fn plant(units: Vec<Item<Panel>>, links: Vec<Item<Panel>>) -> Plant {
        Plant {
            units: Collection::from_items(units),
            links: Collection::from_items(links),
        }
    }

    #[test]
    fn test_no_sources_is_not_started() {
        let state = plant(Vec::new(), vec![link("a"), link("b")]);

        assert_eq!(relational_status(&relation(), &state), Status::NotStarted);
        assert!(!is_applicable(&relation(), &state));
    }

    #[test]
    fn test_non_qualifying_sources_are_ignored() {
        let state = plant(vec![unit("a", 2.0)], Vec::new());

        assert_eq!(relational_status(&relation(), &state), Status::NotStarted);
        assert!(!is_applicable(&relation(), &state));
    }

    #[test]
    fn test_partial_join_is_in_progress() {
        let state = plant(vec![unit("a", 12.0), unit("b", 12.0)], vec![link("a")]);

        assert_eq!(relational_status(&relation(), &state), Status::InProgress);
        assert!(is_applicable(&relation(), &state));
    }

    #[test]
    fn test_no_references_is_in_progress() {
        let state = plant(vec![unit("a", 12.0)], Vec::new());

        assert_eq!(relational_status(&relation(), &state), Status::InProgress);
    }

    #[test]
    fn test_full_join_is_complete() {
        let state = plant(
            vec![unit("a", 12.0), unit("b", 12.0), unit("c", 1.0)],
            vec![link("a"), link("b"), link("b")],
        );

        assert_eq!(relational_status(&relation(), &state), Status::Complete);
    }

    #[test]
    fn test_orphans_do_not_satisfy() {
        let state = plant(vec![unit("a", 12.0)], vec![link("gone"), link("c")]);

        assert_eq!(relational_status(&relation(), &state), Status::InProgress);
    }

    #[test]
    fn test_dependent_flag_not_consulted() {
        let state = plant(vec![unit("a", 12.0)], vec![link("a")]);
        assert!(!state.links.data[0].complete);

        assert_eq!(relational_status(&relation(), &state), Status::Complete);
    }

    #[test]
    fn test_relational_schema_node() {
        let node = SchemaNode::Relational(RelationalTask::new("links", "Links", relation()));

        let state = plant(Vec::new(), vec![link("a")]);
        assert!(!node.is_applicable(&state));
        assert_eq!(get_status(&node, &state), Status::NotStarted);

        let state = plant(vec![unit("a", 12.0)], vec![link("a")]);
        assert!(node.is_applicable(&state));
        assert_eq!(get_status(&node, &state), Status::Complete);
    }

    fn units_progress(state: &Plant) -> &dyn crate::models::FormProgress {
        &state.units
    }

    #[test]
    fn test_section_counts_inapplicable_join() {
        let section = SchemaNode::Section(Section {
            id: "plant",
            title: "Plant",
            children: vec![
                SchemaNode::Task(Task::new("units", "Units", units_progress)),
                SchemaNode::Relational(RelationalTask::new("links", "Links", relation())),
            ],
        });

        // Only small units: the join is not started and the section waits on it
        let mut state = plant(vec![unit("a", 2.0)], Vec::new());
        state.units.complete = true;
        assert_eq!(get_status(&section, &state), Status::InProgress);

        // A large unit without a link holds the section back too
        let mut state = plant(vec![unit("a", 12.0)], Vec::new());
        state.units.complete = true;
        assert_eq!(get_status(&section, &state), Status::InProgress);

        let mut state = plant(vec![unit("a", 12.0)], vec![link("a")]);
        state.units.complete = true;
        assert_eq!(get_status(&section, &state), Status::Complete);
    }

    #[test]
    fn test_source_without_id_is_unsatisfied() {
        let mut anonymous = unit("a", 12.0);
        anonymous.data.id = None;
        let state = plant(vec![anonymous], vec![link("a")]);

        assert!(is_applicable(&relation(), &state));
        assert_eq!(relational_status(&relation(), &state), Status::InProgress);

        let state = plant(vec![unit("a", 12.0), unit("b", 12.0)], vec![link("a"), link("b")]);
        assert_eq!(relational_status(&relation(), &state), Status::Complete);
    }
}
