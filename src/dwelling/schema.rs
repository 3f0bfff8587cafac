//! The standard task-list schema for a dwelling survey.

use super::{Ductwork, DwellingState, MechanicalVentilation};
use crate::models::{Collection, FormProgress};
use crate::status::relation::Relation;
use crate::status::{Group, RelationalTask, SchemaNode, Section, Task};

/// Id of the root section.
pub const ROOT_ID: &str = "taskList";

fn general_specifications(state: &DwellingState) -> &dyn FormProgress {
    &state.dwelling_details.general_specifications
}

fn shading(state: &DwellingState) -> &dyn FormProgress {
    &state.dwelling_details.shading
}

fn external_factors(state: &DwellingState) -> &dyn FormProgress {
    &state.dwelling_details.external_factors
}

fn ceilings(state: &DwellingState) -> &dyn FormProgress {
    &state.living_space_fabric.ceilings_and_roofs.ceilings
}

fn roofs(state: &DwellingState) -> &dyn FormProgress {
    &state.living_space_fabric.ceilings_and_roofs.roofs
}

fn windows(state: &DwellingState) -> &dyn FormProgress {
    &state.living_space_fabric.windows
}

fn mechanical_ventilation(state: &DwellingState) -> &dyn FormProgress {
    &state.infiltration_and_ventilation.mechanical_ventilation
}

fn vents(state: &DwellingState) -> &dyn FormProgress {
    &state.infiltration_and_ventilation.vents
}

fn open_fireplace(state: &DwellingState) -> &dyn FormProgress {
    &state.infiltration_and_ventilation.combustion_appliances.open_fireplace
}

fn closed_fireplace_with_fan(state: &DwellingState) -> &dyn FormProgress {
    &state
        .infiltration_and_ventilation
        .combustion_appliances
        .closed_fireplace_with_fan
}

fn hot_water_outlets(state: &DwellingState) -> &dyn FormProgress {
    &state.domestic_hot_water.hot_water_outlets
}

fn primary_pipework(state: &DwellingState) -> &dyn FormProgress {
    &state.domestic_hot_water.pipework.primary_pipework
}

fn secondary_pipework(state: &DwellingState) -> &dyn FormProgress {
    &state.domestic_hot_water.pipework.secondary_pipework
}

fn pv_arrays(state: &DwellingState) -> &dyn FormProgress {
    &state.pv_and_batteries.pv_arrays
}

fn electric_battery(state: &DwellingState) -> &dyn FormProgress {
    &state.pv_and_batteries.electric_battery
}

fn ventilation_units(state: &DwellingState) -> &Collection<MechanicalVentilation> {
    &state.infiltration_and_ventilation.mechanical_ventilation
}

fn ductwork(state: &DwellingState) -> &Collection<Ductwork> {
    &state.infiltration_and_ventilation.ductwork
}

/// Ductwork is complete once every MVHR unit has at least one entry.
fn ductwork_relation() -> Relation<DwellingState, MechanicalVentilation, Ductwork> {
    Relation {
        source: ventilation_units,
        qualifies: MechanicalVentilation::requires_ductwork,
        dependent: ductwork,
        reference: Ductwork::mvhr_unit,
    }
}

fn section(
    id: &'static str,
    title: &'static str,
    children: Vec<SchemaNode<DwellingState>>,
) -> SchemaNode<DwellingState> {
    SchemaNode::Section(Section {
        id,
        title,
        children,
    })
}

fn task(
    id: &'static str,
    title: &'static str,
    lens: fn(&DwellingState) -> &dyn FormProgress,
) -> SchemaNode<DwellingState> {
    SchemaNode::Task(Task::new(id, title, lens))
}

/// Build the task list shown on the survey overview page.
pub fn standard_schema() -> SchemaNode<DwellingState> {
    section(
        ROOT_ID,
        "Task list",
        vec![
            section(
                "dwellingDetails",
                "Dwelling details",
                vec![
                    task(
                        "generalSpecifications",
                        "General specifications",
                        general_specifications,
                    ),
                    task("shading", "Shading", shading),
                    task("externalFactors", "External factors", external_factors),
                ],
            ),
            section(
                "livingSpaceFabric",
                "Living space fabric",
                vec![
                    SchemaNode::Group(Group {
                        id: "ceilingsAndRoofs",
                        title: "Ceilings and roofs",
                        tasks: vec![
                            Task::new("ceilings", "Ceilings", ceilings),
                            Task::new("roofs", "Roofs", roofs),
                        ],
                    }),
                    task("windows", "Windows", windows),
                ],
            ),
            section(
                "infiltrationAndVentilation",
                "Infiltration and ventilation",
                vec![
                    task(
                        "mechanicalVentilation",
                        "Mechanical ventilation",
                        mechanical_ventilation,
                    ),
                    SchemaNode::Relational(RelationalTask::new(
                        "ductwork",
                        "Ductwork",
                        ductwork_relation(),
                    )),
                    task("vents", "Vents", vents),
                    SchemaNode::Group(Group {
                        id: "combustionAppliances",
                        title: "Combustion appliances",
                        tasks: vec![
                            Task::new("openFireplace", "Open fireplace", open_fireplace),
                            Task::new(
                                "closedFireplaceWithFan",
                                "Closed fireplace with fan",
                                closed_fireplace_with_fan,
                            ),
                        ],
                    }),
                ],
            ),
            section(
                "domesticHotWater",
                "Domestic hot water",
                vec![
                    task("hotWaterOutlets", "Hot water outlets", hot_water_outlets),
                    section(
                        "pipework",
                        "Pipework",
                        vec![
                            task("primaryPipework", "Primary pipework", primary_pipework),
                            task(
                                "secondaryPipework",
                                "Secondary pipework",
                                secondary_pipework,
                            ),
                        ],
                    ),
                ],
            ),
            section(
                "pvAndBatteries",
                "PV and electric batteries",
                vec![
                    task("pvArrays", "PV arrays", pv_arrays),
                    task("electricBattery", "Electric battery", electric_battery),
                ],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwelling::{CombustionAppliance, MvhrLocation, VentType};
    use crate::models::{Item, Status};
    use crate::ops::{self, ItemTarget};
    use crate::status::{find, get_status, status_report};

    fn mvhr(id: &str) -> MechanicalVentilation {
        MechanicalVentilation {
            id: Some(id.to_string()),
            name: Some("MVHR".to_string()),
            type_of_mechanical_ventilation_options: Some(VentType::Mvhr),
            air_flow_rate: Some(17.0),
            mvhr_location: Some(MvhrLocation::Inside),
            mvhr_efficiency: Some(0.9),
        }
    }

    fn status_of(state: &DwellingState, id: &str) -> Status {
        let schema = standard_schema();
        let node = find(&schema, id).unwrap();
        get_status(node, state)
    }

    fn complete<T>(items: Vec<T>) -> Collection<T> {
        Collection {
            data: items.into_iter().map(Item::completed).collect(),
            complete: true,
        }
    }

    #[test]
    fn test_empty_state_is_not_started() {
        let state = DwellingState::default();
        let report = status_report(&standard_schema(), &state);

        assert_eq!(report.id, ROOT_ID);
        assert_eq!(report.status, Status::NotStarted);
        assert_eq!(report.children.len(), 5);
        assert_eq!(report.count(Status::Complete), 0);
    }

    #[test]
    fn test_ductwork_join() {
        let mut state = DwellingState::default();
        assert_eq!(status_of(&state, "ductwork"), Status::NotStarted);

        let ventilation = &mut state.infiltration_and_ventilation;
        ventilation.mechanical_ventilation = complete(vec![mvhr("a"), mvhr("b")]);
        assert_eq!(status_of(&state, "ductwork"), Status::InProgress);

        let ductwork = ops::upsert(
            &state.infiltration_and_ventilation.ductwork,
            ItemTarget::Create,
            Ductwork {
                mvhr_unit: Some("a".to_string()),
                ..Default::default()
            },
        );
        state.infiltration_and_ventilation.ductwork = ductwork;
        assert_eq!(status_of(&state, "ductwork"), Status::InProgress);

        let ductwork = ops::upsert(
            &state.infiltration_and_ventilation.ductwork,
            ItemTarget::Create,
            Ductwork {
                mvhr_unit: Some("b".to_string()),
                ..Default::default()
            },
        );
        state.infiltration_and_ventilation.ductwork = ductwork;
        assert_eq!(status_of(&state, "ductwork"), Status::Complete);
        assert_eq!(
            state.infiltration_and_ventilation.ductwork.data[1].data.name.as_deref(),
            Some("Ductwork (1)")
        );
    }

    #[test]
    fn test_ventilation_section_without_mvhr() {
        let mut state = DwellingState::default();
        let mut extract = mvhr("a");
        extract.type_of_mechanical_ventilation_options = Some(VentType::IntermittentMev);

        let ventilation = &mut state.infiltration_and_ventilation;
        ventilation.mechanical_ventilation = complete(vec![extract]);
        ventilation.vents = complete(Vec::new());
        ventilation.combustion_appliances.open_fireplace =
            complete(vec![CombustionAppliance::default()]);

        // The ductwork task is not offered but still counts as not started
        assert!(!find(&standard_schema(), "ductwork").unwrap().is_applicable(&state));
        assert_eq!(status_of(&state, "ductwork"), Status::NotStarted);
        assert_eq!(
            status_of(&state, "infiltrationAndVentilation"),
            Status::InProgress
        );
    }

    #[test]
    fn test_unidentified_mvhr_needs_ductwork() {
        let mut state = DwellingState::default();
        let mut unit = mvhr("a");
        unit.id = None;
        state.infiltration_and_ventilation.mechanical_ventilation = complete(vec![unit]);

        assert!(find(&standard_schema(), "ductwork").unwrap().is_applicable(&state));
        assert_eq!(status_of(&state, "ductwork"), Status::InProgress);
    }

    #[test]
    fn test_combustion_group_any_complete() {
        let mut state = DwellingState::default();
        let appliances = &mut state.infiltration_and_ventilation.combustion_appliances;
        appliances.closed_fireplace_with_fan = complete(Vec::new());

        assert_eq!(status_of(&state, "combustionAppliances"), Status::Complete);
        assert_eq!(
            status_of(&state, "infiltrationAndVentilation"),
            Status::InProgress
        );
    }

    #[test]
    fn test_nested_pipework_section() {
        let mut state = DwellingState::default();
        state.domestic_hot_water.pipework.primary_pipework = complete(Vec::new());

        assert_eq!(status_of(&state, "pipework"), Status::InProgress);
        assert_eq!(status_of(&state, "domesticHotWater"), Status::InProgress);
    }

    #[test]
    fn test_find_unknown_id() {
        let schema = standard_schema();
        assert!(find(&schema, "cooling").is_none());
    }
}
