//! The dwelling survey: concrete state tree and task-list schema.
//!
//! `DwellingState` is the document saved between sessions. It is grouped by
//! wizard section, and each leaf is a [`Form`] or [`Collection`] that the
//! status engine can walk through the lenses in [`schema`].

pub mod records;
pub mod schema;

pub use records::*;
pub use schema::standard_schema;

use crate::Result;
use crate::models::{Collection, Form};
use crate::ops;
use crate::revalidate::{Revalidate, ValidationIssue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DwellingDetails {
    pub general_specifications: Form<GeneralSpecifications>,
    pub shading: Collection<ShadingObject>,
    pub external_factors: Form<ExternalFactors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CeilingsAndRoofs {
    pub ceilings: Collection<Ceiling>,
    pub roofs: Collection<Roof>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LivingSpaceFabric {
    pub ceilings_and_roofs: CeilingsAndRoofs,
    pub windows: Collection<Window>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombustionAppliances {
    pub open_fireplace: Collection<CombustionAppliance>,
    pub closed_fireplace_with_fan: Collection<CombustionAppliance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfiltrationAndVentilation {
    pub mechanical_ventilation: Collection<MechanicalVentilation>,
    pub ductwork: Collection<Ductwork>,
    pub vents: Collection<Vent>,
    pub combustion_appliances: CombustionAppliances,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipeworkSection {
    pub primary_pipework: Collection<PrimaryPipework>,
    pub secondary_pipework: Collection<Pipework>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomesticHotWater {
    pub hot_water_outlets: Collection<HotWaterOutlet>,
    pub pipework: PipeworkSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PvAndBatteries {
    pub pv_arrays: Collection<PvArray>,
    pub electric_battery: Collection<ElectricBattery>,
}

/// Everything entered in one dwelling survey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DwellingState {
    pub dwelling_details: DwellingDetails,
    pub living_space_fabric: LivingSpaceFabric,
    pub infiltration_and_ventilation: InfiltrationAndVentilation,
    pub domestic_hot_water: DomesticHotWater,
    pub pv_and_batteries: PvAndBatteries,
}

impl DwellingState {
    /// Load a saved state file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let state = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded dwelling state");
        Ok(state)
    }

    /// Save the state as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Saved dwelling state");
        Ok(())
    }

    /// Re-check every completed form against the current rules.
    ///
    /// Invalid records lose their completion flags in place.
    pub fn revalidate(&mut self) -> Vec<ValidationIssue> {
        let details = &mut self.dwelling_details;
        let fabric = &mut self.living_space_fabric;
        let ventilation = &mut self.infiltration_and_ventilation;
        let hot_water = &mut self.domestic_hot_water;
        let pv = &mut self.pv_and_batteries;

        let mut issues = Vec::new();
        issues.extend(
            details
                .general_specifications
                .revalidate("dwellingDetails/generalSpecifications"),
        );
        issues.extend(details.shading.revalidate("dwellingDetails/shading"));
        issues.extend(
            details
                .external_factors
                .revalidate("dwellingDetails/externalFactors"),
        );
        issues.extend(
            fabric
                .ceilings_and_roofs
                .ceilings
                .revalidate("livingSpaceFabric/ceilingsAndRoofs/ceilings"),
        );
        issues.extend(
            fabric
                .ceilings_and_roofs
                .roofs
                .revalidate("livingSpaceFabric/ceilingsAndRoofs/roofs"),
        );
        issues.extend(fabric.windows.revalidate("livingSpaceFabric/windows"));
        issues.extend(
            ventilation
                .mechanical_ventilation
                .revalidate("infiltrationAndVentilation/mechanicalVentilation"),
        );
        issues.extend(
            ventilation
                .ductwork
                .revalidate("infiltrationAndVentilation/ductwork"),
        );
        issues.extend(ventilation.vents.revalidate("infiltrationAndVentilation/vents"));
        issues.extend(
            ventilation
                .combustion_appliances
                .open_fireplace
                .revalidate("infiltrationAndVentilation/combustionAppliances/openFireplace"),
        );
        issues.extend(
            ventilation
                .combustion_appliances
                .closed_fireplace_with_fan
                .revalidate("infiltrationAndVentilation/combustionAppliances/closedFireplaceWithFan"),
        );
        issues.extend(
            hot_water
                .hot_water_outlets
                .revalidate("domesticHotWater/hotWaterOutlets"),
        );
        issues.extend(
            hot_water
                .pipework
                .primary_pipework
                .revalidate("domesticHotWater/pipework/primaryPipework"),
        );
        issues.extend(
            hot_water
                .pipework
                .secondary_pipework
                .revalidate("domesticHotWater/pipework/secondaryPipework"),
        );
        issues.extend(pv.pv_arrays.revalidate("pvAndBatteries/pvArrays"));
        issues.extend(pv.electric_battery.revalidate("pvAndBatteries/electricBattery"));

        if !issues.is_empty() {
            tracing::info!(count = issues.len(), "Revalidation cleared completion flags");
        }
        issues
    }

    /// The data of completed forms only, in the shape of the state tree.
    ///
    /// Incomplete forms and collections are omitted; section objects are
    /// always present, possibly empty.
    pub fn resolve(&self) -> Result<Value> {
        let details = &self.dwelling_details;
        let mut dwelling_details = Map::new();
        put(
            &mut dwelling_details,
            "generalSpecifications",
            details.general_specifications.resolved(),
        )?;
        put(&mut dwelling_details, "shading", details.shading.resolved())?;
        put(
            &mut dwelling_details,
            "externalFactors",
            details.external_factors.resolved(),
        )?;

        let fabric = &self.living_space_fabric;
        let mut ceilings_and_roofs = Map::new();
        put(
            &mut ceilings_and_roofs,
            "ceilings",
            fabric.ceilings_and_roofs.ceilings.resolved(),
        )?;
        put(
            &mut ceilings_and_roofs,
            "roofs",
            fabric.ceilings_and_roofs.roofs.resolved(),
        )?;
        let mut living_space_fabric = Map::new();
        living_space_fabric.insert(
            "ceilingsAndRoofs".to_string(),
            Value::Object(ceilings_and_roofs),
        );
        put(&mut living_space_fabric, "windows", fabric.windows.resolved())?;

        let ventilation = &self.infiltration_and_ventilation;
        let mut combustion = Map::new();
        put(
            &mut combustion,
            "openFireplace",
            ventilation.combustion_appliances.open_fireplace.resolved(),
        )?;
        put(
            &mut combustion,
            "closedFireplaceWithFan",
            ventilation
                .combustion_appliances
                .closed_fireplace_with_fan
                .resolved(),
        )?;
        let mut infiltration = Map::new();
        put(
            &mut infiltration,
            "mechanicalVentilation",
            ventilation.mechanical_ventilation.resolved(),
        )?;
        put(&mut infiltration, "ductwork", ventilation.ductwork.resolved())?;
        put(&mut infiltration, "vents", ventilation.vents.resolved())?;
        infiltration.insert("combustionAppliances".to_string(), Value::Object(combustion));

        let hot_water = &self.domestic_hot_water;
        let mut pipework = Map::new();
        put(
            &mut pipework,
            "primaryPipework",
            hot_water.pipework.primary_pipework.resolved(),
        )?;
        put(
            &mut pipework,
            "secondaryPipework",
            hot_water.pipework.secondary_pipework.resolved(),
        )?;
        let mut domestic_hot_water = Map::new();
        put(
            &mut domestic_hot_water,
            "hotWaterOutlets",
            hot_water.hot_water_outlets.resolved(),
        )?;
        domestic_hot_water.insert("pipework".to_string(), Value::Object(pipework));

        let pv = &self.pv_and_batteries;
        let mut pv_and_batteries = Map::new();
        put(&mut pv_and_batteries, "pvArrays", pv.pv_arrays.resolved())?;
        put(
            &mut pv_and_batteries,
            "electricBattery",
            pv.electric_battery.resolved(),
        )?;

        let mut root = Map::new();
        root.insert("dwellingDetails".to_string(), Value::Object(dwelling_details));
        root.insert(
            "livingSpaceFabric".to_string(),
            Value::Object(living_space_fabric),
        );
        root.insert(
            "infiltrationAndVentilation".to_string(),
            Value::Object(infiltration),
        );
        root.insert(
            "domesticHotWater".to_string(),
            Value::Object(domestic_hot_water),
        );
        root.insert("pvAndBatteries".to_string(), Value::Object(pv_and_batteries));
        Ok(Value::Object(root))
    }

    /// Remove a ventilation unit together with its ductwork.
    pub fn remove_ventilation_unit(&mut self, index: usize) {
        let ventilation = &mut self.infiltration_and_ventilation;
        let (units, ductwork) = ops::remove_with_dependents(
            &ventilation.mechanical_ventilation,
            index,
            &ventilation.ductwork,
            Ductwork::mvhr_unit,
        );
        ventilation.mechanical_ventilation = units;
        ventilation.ductwork = ductwork;
    }

    /// Remove a roof, detaching any windows tagged to it.
    pub fn remove_roof(&mut self, index: usize) {
        let fabric = &mut self.living_space_fabric;
        let removed_id = fabric
            .ceilings_and_roofs
            .roofs
            .get(index)
            .and_then(|item| item.data.id.clone());

        fabric.ceilings_and_roofs.roofs = ops::remove(&fabric.ceilings_and_roofs.roofs, index);
        if let Some(id) = removed_id {
            fabric.windows = ops::clear_references(&fabric.windows, &id, Window::associated_item_mut);
        }
    }
}

fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: Option<T>) -> Result<()> {
    if let Some(value) = value {
        map.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormProgress, Item, Status};
    use tempfile::TempDir;

    fn mvhr(id: &str) -> MechanicalVentilation {
        MechanicalVentilation {
            id: Some(id.to_string()),
            name: Some(format!("MVHR {}", id)),
            type_of_mechanical_ventilation_options: Some(VentType::Mvhr),
            air_flow_rate: Some(17.0),
            mvhr_location: Some(MvhrLocation::Inside),
            mvhr_efficiency: Some(0.9),
        }
    }

    fn duct(unit: &str) -> Ductwork {
        Ductwork {
            name: Some(format!("Duct for {}", unit)),
            mvhr_unit: Some(unit.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_sections_default() {
        let state: DwellingState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, DwellingState::default());

        let json = r#"{"dwellingDetails":{"shading":{"data":[],"complete":true}}}"#;
        let state: DwellingState = serde_json::from_str(json).unwrap();
        assert_eq!(state.dwelling_details.shading.status(), Status::Complete);
        assert_eq!(
            state.dwelling_details.general_specifications.status(),
            Status::NotStarted
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut state = DwellingState::default();
        state.infiltration_and_ventilation.mechanical_ventilation =
            Collection::from_items(vec![Item::completed(mvhr("a"))]);
        state.save(&path).unwrap();

        let loaded = DwellingState::load(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = DwellingState::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_remove_ventilation_unit_cascades() {
        let mut state = DwellingState::default();
        let ventilation = &mut state.infiltration_and_ventilation;
        ventilation.mechanical_ventilation =
            Collection::from_items(vec![Item::completed(mvhr("a")), Item::completed(mvhr("b"))]);
        ventilation.ductwork = Collection {
            data: vec![
                Item::completed(duct("a")),
                Item::completed(duct("b")),
                Item::completed(duct("a")),
            ],
            complete: true,
        };

        state.remove_ventilation_unit(0);

        let ventilation = &state.infiltration_and_ventilation;
        assert_eq!(ventilation.mechanical_ventilation.len(), 1);
        assert_eq!(ventilation.ductwork.len(), 1);
        assert_eq!(ventilation.ductwork.data[0].data.mvhr_unit(), Some("b"));
        assert!(!ventilation.ductwork.complete);
    }

    #[test]
    fn test_remove_roof_detaches_windows() {
        let mut state = DwellingState::default();
        let fabric = &mut state.living_space_fabric;
        fabric.ceilings_and_roofs.roofs = Collection::from_items(vec![Item::completed(Roof {
            id: Some("roof-1".to_string()),
            name: Some("Roof".to_string()),
            ..Default::default()
        })]);
        fabric.windows = Collection {
            data: vec![Item::completed(Window {
                name: Some("Skylight".to_string()),
                associated_item_id: Some("roof-1".to_string()),
                ..Default::default()
            })],
            complete: true,
        };

        state.remove_roof(0);

        let fabric = &state.living_space_fabric;
        assert!(fabric.ceilings_and_roofs.roofs.is_empty());
        assert_eq!(fabric.windows.len(), 1);
        assert_eq!(fabric.windows.data[0].data.associated_item_id, None);
        assert!(!fabric.windows.data[0].complete);
        assert_eq!(fabric.windows.status(), Status::InProgress);
    }

    #[test]
    fn test_revalidate_clears_invalid_flags() {
        let mut state = DwellingState::default();
        let mut broken = mvhr("a");
        broken.mvhr_efficiency = Some(4.0);
        state.infiltration_and_ventilation.mechanical_ventilation = Collection {
            data: vec![Item::completed(mvhr("b")), Item::completed(broken)],
            complete: true,
        };
        state.dwelling_details.general_specifications = Form::new(GeneralSpecifications {
            type_of_dwelling: Some("house".to_string()),
            storeys_in_dwelling: Some(2),
            ..Default::default()
        })
        .mark_complete();

        let issues = state.revalidate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "infiltrationAndVentilation/mechanicalVentilation");
        assert_eq!(issues[0].index, Some(1));
        let units = &state.infiltration_and_ventilation.mechanical_ventilation;
        assert!(units.data[0].complete);
        assert!(!units.data[1].complete);
        assert!(!units.complete);
        assert!(state.dwelling_details.general_specifications.complete);
    }

    #[test]
    fn test_resolve_keeps_completed_only() {
        let mut state = DwellingState::default();
        state.dwelling_details.external_factors = Form::new(ExternalFactors {
            altitude: Some(30.0),
            ..Default::default()
        })
        .mark_complete();
        state.dwelling_details.general_specifications = Form::new(GeneralSpecifications {
            storeys_in_dwelling: Some(2),
            ..Default::default()
        });
        state.pv_and_batteries.pv_arrays = Collection {
            data: Vec::new(),
            complete: true,
        };

        let resolved = state.resolve().unwrap();

        assert_eq!(resolved["dwellingDetails"]["externalFactors"]["altitude"], 30.0);
        assert!(resolved["dwellingDetails"].get("generalSpecifications").is_none());
        assert_eq!(resolved["pvAndBatteries"]["pvArrays"], serde_json::json!([]));
        assert!(resolved["livingSpaceFabric"]["ceilingsAndRoofs"].is_object());
        assert!(
            resolved["livingSpaceFabric"]["ceilingsAndRoofs"]
                .get("ceilings")
                .is_none()
        );
    }
}
