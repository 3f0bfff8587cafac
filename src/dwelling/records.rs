//! Record types entered on the dwelling survey pages.
//!
//! Every field is optional because forms are saved as the user types.
//! Serialized names are camelCase to match saved state files.

use crate::models::{Record, is_unset_text};
use serde::{Deserialize, Serialize};

/// Implements [`Record`] for a named record type.
///
/// The first list names the fields (besides `name`) that count towards
/// "has any field been populated". Extra trait items may follow in braces.
macro_rules! impl_record {
    ($T:ty, $label:expr, [$($field:ident),* $(,)?] $(, { $($extra:tt)* })?) => {
        impl Record for $T {
            fn is_blank(&self) -> bool {
                is_unset_text(&self.name) $(&& self.$field.is_none())*
            }

            fn default_name(&self) -> Option<String> {
                Some($label.to_string())
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            fn set_name(&mut self, name: String) {
                self.name = Some(name);
            }

            $($($extra)*)?
        }
    };
}

fn check_range(messages: &mut Vec<String>, field: &str, value: Option<f64>, min: f64, max: f64) {
    if let Some(value) = value {
        if !(min..=max).contains(&value) {
            messages.push(format!("{} must be between {} and {}", field, min, max));
        }
    }
}

fn check_required<T>(messages: &mut Vec<String>, field: &str, value: &Option<T>) {
    if value.is_none() {
        messages.push(format!("{} is required", field));
    }
}

// === Dwelling details ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSpecifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_dwelling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storeys_in_dwelling: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storey_of_flat: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_g_compliance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling_required: Option<bool>,
}

impl Record for GeneralSpecifications {
    fn is_blank(&self) -> bool {
        is_unset_text(&self.type_of_dwelling)
            && self.storeys_in_dwelling.is_none()
            && self.storey_of_flat.is_none()
            && self.number_of_bedrooms.is_none()
            && self.part_g_compliance.is_none()
            && self.cooling_required.is_none()
    }

    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();
        check_required(&mut messages, "typeOfDwelling", &self.type_of_dwelling);
        match self.storeys_in_dwelling {
            Some(storeys) if !(1..=250).contains(&storeys) => {
                messages.push("storeysInDwelling must be between 1 and 250".to_string())
            }
            Some(_) => {}
            None => messages.push("storeysInDwelling is required".to_string()),
        }
        if self.type_of_dwelling.as_deref() == Some("flat") {
            check_required(&mut messages, "storeyOfFlat", &self.storey_of_flat);
        }
        messages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalFactors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_exposure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_nuisance: Option<bool>,
}

impl Record for ExternalFactors {
    fn is_blank(&self) -> bool {
        self.altitude.is_none()
            && is_unset_text(&self.type_of_exposure)
            && is_unset_text(&self.terrain_type)
            && self.noise_nuisance.is_none()
    }

    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();
        check_range(&mut messages, "altitude", self.altitude, -150.0, 7200.0);
        messages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadingObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl_record!(
    ShadingObject,
    "Shading",
    [object_type, start_angle, end_angle, height, distance],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(&mut messages, "startAngle", self.start_angle, 0.0, 360.0);
            check_range(&mut messages, "endAngle", self.end_angle, 0.0, 360.0);
            messages
        }
    }
);

// === Living space fabric ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ceiling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_ceiling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kappa_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_distribution_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl_record!(
    Ceiling,
    "Ceiling",
    [type_of_ceiling, surface_area, u_value, kappa_value, mass_distribution_class, pitch],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(&mut messages, "surfaceArea", self.surface_area, 0.01, 10000.0);
            check_range(&mut messages, "uValue", self.u_value, 0.01, 10.0);
            check_range(&mut messages, "pitch", self.pitch, 0.0, 180.0);
            messages
        }
    }
);

/// A roof. Windows may be tagged to it by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Roof {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_roof: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_value: Option<f64>,
}

impl_record!(
    Roof,
    "Roof",
    [type_of_roof, pitch, orientation, length, width, surface_area, u_value],
    {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn has_identity(&self) -> bool {
            true
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }

        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(&mut messages, "pitch", self.pitch, 0.0, 180.0);
            check_range(&mut messages, "orientation", self.orientation, 0.0, 360.0);
            messages
        }
    }
);

/// A window, optionally tagged to the roof or wall it sits in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Window {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_value: Option<f64>,
}

impl Window {
    pub fn associated_item(&self) -> Option<&str> {
        self.associated_item_id.as_deref()
    }

    pub fn associated_item_mut(&mut self) -> &mut Option<String> {
        &mut self.associated_item_id
    }
}

impl_record!(
    Window,
    "Window",
    [associated_item_id, orientation, surface_area, u_value],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_required(&mut messages, "associatedItemId", &self.associated_item_id);
            check_range(&mut messages, "orientation", self.orientation, 0.0, 360.0);
            messages
        }
    }
);

// === Infiltration and ventilation ===

/// Kind of mechanical ventilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentType {
    #[serde(rename = "Intermittent MEV")]
    IntermittentMev,
    #[serde(rename = "Centralised continuous MEV")]
    CentralisedContinuousMev,
    #[serde(rename = "Decentralised continuous MEV")]
    DecentralisedContinuousMev,
    #[serde(rename = "MVHR", alias = "mvhr")]
    Mvhr,
    #[serde(rename = "PIV")]
    Piv,
}

impl VentType {
    /// Returns true if units of this type need ductwork entries.
    pub fn requires_ductwork(&self) -> bool {
        matches!(self, VentType::Mvhr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MvhrLocation {
    Inside,
    Outside,
}

/// A mechanical ventilation unit, referenced by ductwork.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MechanicalVentilation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_mechanical_ventilation_options: Option<VentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_flow_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvhr_location: Option<MvhrLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvhr_efficiency: Option<f64>,
}

impl MechanicalVentilation {
    pub fn requires_ductwork(&self) -> bool {
        self.type_of_mechanical_ventilation_options
            .is_some_and(|vent_type| vent_type.requires_ductwork())
    }
}

impl_record!(
    MechanicalVentilation,
    "Mechanical ventilation",
    [type_of_mechanical_ventilation_options, air_flow_rate, mvhr_location, mvhr_efficiency],
    {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn has_identity(&self) -> bool {
            true
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }

        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_required(
                &mut messages,
                "typeOfMechanicalVentilationOptions",
                &self.type_of_mechanical_ventilation_options,
            );
            check_range(&mut messages, "airFlowRate", self.air_flow_rate, 0.0, 1000.0);
            if self.requires_ductwork() {
                check_required(&mut messages, "mvhrLocation", &self.mvhr_location);
                check_required(&mut messages, "mvhrEfficiency", &self.mvhr_efficiency);
                check_range(&mut messages, "mvhrEfficiency", self.mvhr_efficiency, 0.0, 1.0);
            }
            messages
        }
    }
);

/// Ductwork attached to an MVHR unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ductwork {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvhr_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ductwork_cross_sectional_shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duct_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulation_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_of_ductwork: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal_insulation_conductivity_of_ductwork: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_reflectivity: Option<bool>,
}

impl Ductwork {
    /// Id of the ventilation unit this ductwork belongs to.
    pub fn mvhr_unit(&self) -> Option<&str> {
        self.mvhr_unit.as_deref()
    }
}

impl_record!(
    Ductwork,
    "Ductwork",
    [
        mvhr_unit,
        ductwork_cross_sectional_shape,
        duct_type,
        insulation_thickness,
        length_of_ductwork,
        thermal_insulation_conductivity_of_ductwork,
        surface_reflectivity,
    ],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_required(&mut messages, "mvhrUnit", &self.mvhr_unit);
            check_range(&mut messages, "insulationThickness", self.insulation_thickness, 0.0, 100.0);
            check_range(&mut messages, "lengthOfDuctwork", self.length_of_ductwork, 0.0, 1000.0);
            messages
        }
    }
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_vent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_ventilation_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_height_of_zone: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl_record!(
    Vent,
    "Vent",
    [type_of_vent, effective_ventilation_area, opening_ratio, mid_height_of_zone, orientation, pitch],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(
                &mut messages,
                "effectiveVentilationArea",
                self.effective_ventilation_area,
                1.0,
                999999.0,
            );
            check_range(&mut messages, "midHeightOfZone", self.mid_height_of_zone, 1.0, 60.0);
            check_range(&mut messages, "orientation", self.orientation, 0.0, 360.0);
            messages
        }
    }
);

/// An open fireplace, closed fireplace with fan, or similar appliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombustionAppliance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_supply_to_appliance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaust_method_from_appliance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_fuel: Option<String>,
}

impl_record!(
    CombustionAppliance,
    "Combustion appliance",
    [air_supply_to_appliance, exhaust_method_from_appliance, type_of_fuel]
);

// === Domestic hot water ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutletType {
    MixerShower,
    ElectricShower,
    Bath,
    Other,
}

impl OutletType {
    pub fn label(&self) -> &'static str {
        match self {
            OutletType::MixerShower => "Mixer shower",
            OutletType::ElectricShower => "Electric shower",
            OutletType::Bath => "Bath",
            OutletType::Other => "Hot water outlet",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotWaterOutlet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_hot_water_outlet: Option<OutletType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated_power: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

// Default label follows the outlet type, so not generated by impl_record
impl Record for HotWaterOutlet {
    fn is_blank(&self) -> bool {
        is_unset_text(&self.name)
            && self.type_of_hot_water_outlet.is_none()
            && self.flow_rate.is_none()
            && self.rated_power.is_none()
            && self.size.is_none()
    }

    fn default_name(&self) -> Option<String> {
        let outlet = self.type_of_hot_water_outlet.unwrap_or(OutletType::Other);
        Some(outlet.label().to_string())
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();
        match self.type_of_hot_water_outlet {
            Some(OutletType::ElectricShower) => {
                check_required(&mut messages, "ratedPower", &self.rated_power);
                check_range(&mut messages, "ratedPower", self.rated_power, 0.0, 30.0);
            }
            Some(OutletType::Bath) => {
                check_required(&mut messages, "size", &self.size);
                check_range(&mut messages, "flowRate", self.flow_rate, 0.0, 15.0);
            }
            Some(OutletType::MixerShower) | Some(OutletType::Other) => {
                check_required(&mut messages, "flowRate", &self.flow_rate);
                check_range(&mut messages, "flowRate", self.flow_rate, 0.0, 15.0);
            }
            None => messages.push("typeOfHotWaterOutlet is required".to_string()),
        }
        messages
    }
}

/// Secondary (distribution) pipework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pipework {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl_record!(
    Pipework,
    "Pipework",
    [internal_diameter, external_diameter, length, location],
    {
        fn validate(&self) -> Vec<String> {
            diameter_messages(self.internal_diameter, self.external_diameter)
        }
    }
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryPipework {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulation_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal_conductivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipe_contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl_record!(
    PrimaryPipework,
    "Primary pipework",
    [
        internal_diameter,
        external_diameter,
        length,
        insulation_thickness,
        thermal_conductivity,
        pipe_contents,
        location,
    ],
    {
        fn validate(&self) -> Vec<String> {
            diameter_messages(self.internal_diameter, self.external_diameter)
        }
    }
);

fn diameter_messages(internal: Option<f64>, external: Option<f64>) -> Vec<String> {
    match (internal, external) {
        (Some(internal), Some(external)) if internal >= external => {
            vec!["internalDiameter must be smaller than externalDiameter".to_string()]
        }
        _ => Vec::new(),
    }
}

// === PV and batteries ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PvArray {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_power: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventilation_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevational_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_of_pv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_of_pv: Option<f64>,
}

impl_record!(
    PvArray,
    "PV array",
    [
        peak_power,
        ventilation_strategy,
        pitch,
        orientation,
        elevational_height,
        length_of_pv,
        width_of_pv,
    ],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(&mut messages, "peakPower", self.peak_power, 0.001, 100.0);
            check_range(&mut messages, "pitch", self.pitch, 0.0, 90.0);
            check_range(&mut messages, "orientation", self.orientation, 0.0, 360.0);
            messages
        }
    }
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectricBattery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_charging_possible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_charge_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_charge_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_discharge_rate: Option<f64>,
}

impl_record!(
    ElectricBattery,
    "Electric battery",
    [
        capacity,
        battery_age,
        charge_efficiency,
        location,
        grid_charging_possible,
        maximum_charge_rate,
        minimum_charge_rate,
        maximum_discharge_rate,
    ],
    {
        fn validate(&self) -> Vec<String> {
            let mut messages = Vec::new();
            check_range(&mut messages, "chargeEfficiency", self.charge_efficiency, 0.0, 1.0);
            if let (Some(min), Some(max)) = (self.minimum_charge_rate, self.maximum_charge_rate) {
                if min > max {
                    messages.push(
                        "minimumChargeRate must not exceed maximumChargeRate".to_string(),
                    );
                }
            }
            messages
        }
    }
);
