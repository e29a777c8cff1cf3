// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building-level process load inventory

use crate::config::ProcessConfig;
use idf_lite_core::{
    contains_ignore_case, CompressorRack, ExteriorFuelEquipment, ExteriorLights, IdfType,
    LoadObject, ObjectStore, ObjectView, RefrigerationCase,
};
use serde::Serialize;

/// Zone label of loads outside any thermal zone
pub const BUILDING_LEVEL: &str = "Building-Level";

/// One process load of the building
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessLoadRecord {
    pub category: &'static str,
    pub name: String,
    pub power_w: f64,
    /// Zone name, heat rejection location, or [`BUILDING_LEVEL`]
    pub zone: String,
    pub subcategory: String,
    pub details: String,
}

/// Exterior lights, exterior fuel equipment, zone-assigned elevators,
/// refrigerated cases and compressor racks, in that order
///
/// Records whose power field is missing or unparsable are left out; a blank
/// power field counts as 0 W.
pub fn extract_building_process_loads(
    store: &ObjectStore,
    config: &ProcessConfig,
) -> Vec<ProcessLoadRecord> {
    let mut loads = Vec::new();

    for lights in store.objects::<ExteriorLights>() {
        let Some(power_w) = lights.design_level() else {
            skip!(lights.name(), "invalid design level");
            continue;
        };
        loads.push(ProcessLoadRecord {
            category: "Exterior Lighting",
            name: lights.name().to_string(),
            power_w,
            zone: BUILDING_LEVEL.to_string(),
            subcategory: lights.subcategory().unwrap_or("General").to_string(),
            details: lights
                .control_option()
                .map(|c| format!("Control: {c}"))
                .unwrap_or_default(),
        });
    }

    for equipment in store.objects::<ExteriorFuelEquipment>() {
        let Some(power_w) = equipment.design_level() else {
            skip!(equipment.name(), "invalid design level");
            continue;
        };
        loads.push(ProcessLoadRecord {
            category: "Exterior Equipment",
            name: equipment.name().to_string(),
            power_w,
            zone: BUILDING_LEVEL.to_string(),
            subcategory: equipment.subcategory().unwrap_or("General").to_string(),
            details: format!("Fuel: {}", equipment.fuel()),
        });
    }

    for record in store.of(IdfType::ElectricEquipment) {
        let equipment = LoadObject::new(record);
        let subcategory = equipment.subcategory();
        if !contains_ignore_case(subcategory, &config.elevator_marker) {
            continue;
        }
        let power_w = match record.field(4) {
            Some(level) if level.trim().is_empty() => Some(0.0),
            Some(_) => equipment.design_level(),
            None => None,
        };
        let Some(power_w) = power_w else {
            skip!(equipment.name(), "invalid design level");
            continue;
        };
        loads.push(ProcessLoadRecord {
            category: "Elevator",
            name: equipment.name().to_string(),
            power_w,
            zone: equipment.zone().to_string(),
            subcategory: subcategory.to_string(),
            details: "Zone-assigned equipment".to_string(),
        });
    }

    for case in store.objects::<RefrigerationCase>() {
        let (Some(capacity), Some(length)) = (case.capacity_per_length(), case.length()) else {
            skip!(case.name(), "invalid capacity or length");
            continue;
        };
        loads.push(ProcessLoadRecord {
            category: "Refrigeration Case",
            name: case.name().to_string(),
            power_w: capacity * length,
            zone: case.zone().to_string(),
            subcategory: "Refrigeration".to_string(),
            details: format!("Length: {length}m, Capacity/m: {capacity}W/m"),
        });
    }

    for rack in store.objects::<CompressorRack>() {
        let Some(power_w) = rack.fan_power() else {
            skip!(rack.name(), "invalid fan power");
            continue;
        };
        loads.push(ProcessLoadRecord {
            category: "Compressor Rack",
            name: rack.name().to_string(),
            power_w,
            zone: rack.location().to_string(),
            subcategory: rack.subcategory().unwrap_or("Refrigeration").to_string(),
            details: rack
                .design_cop()
                .map(|cop| format!("Design COP: {cop}"))
                .unwrap_or_default(),
        });
    }

    tracing::debug!(count = loads.len(), "Building process loads collected");
    loads
}

#[cfg(test)]
mod tests {
    use super::*;
    use idf_lite_core::parse;

    #[test]
    fn test_inventory() {
        let store = parse(
            "Exterior:Lights, Facade Lights, Sch, 1500, AstronomicalClock, Exterior Facade;\n\
             Exterior:Lights, Sign, Sch, ;\n\
             Exterior:FuelEquipment, Elevators, Electricity, Sch, 20000;\n\
             ElectricEquipment, Elev 1, Core, Sch, EquipmentLevel, 16000, , , 0, 0, 0, Elevators;\n\
             ElectricEquipment, Plugs, Core, Sch, EquipmentLevel, 500;\n\
             Refrigeration:Case, Dairy, Sch, Sales, 24, 0.55, 1500, CaseTemperatureMethod, , 3.5;\n\
             Refrigeration:CompressorRack, Rack A, Outdoors, 2.0, Curve, 350;",
        );
        let loads = extract_building_process_loads(&store, &ProcessConfig::default());
        let names: Vec<&str> = loads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Facade Lights", "Sign", "Elevators", "Elev 1", "Dairy", "Rack A"]
        );

        assert_eq!(loads[0].power_w, 1500.0);
        assert_eq!(loads[0].subcategory, "Exterior Facade");
        assert_eq!(loads[0].details, "Control: AstronomicalClock");
        assert_eq!(loads[1].power_w, 0.0);
        assert_eq!(loads[1].subcategory, "General");
        assert_eq!(loads[1].details, "");

        assert_eq!(loads[2].zone, BUILDING_LEVEL);
        assert_eq!(loads[2].details, "Fuel: Electricity");

        assert_eq!(loads[3].category, "Elevator");
        assert_eq!(loads[3].zone, "Core");
        assert_eq!(loads[3].power_w, 16000.0);

        assert_eq!(loads[4].power_w, 5250.0);
        assert_eq!(loads[4].zone, "Sales");

        assert_eq!(loads[5].zone, "Outdoors");
        assert_eq!(loads[5].subcategory, "Refrigeration");
        assert_eq!(loads[5].details, "Design COP: 2.0");
    }

    #[test]
    fn test_invalid_power_skipped() {
        let store = parse("Exterior:Lights, Broken, Sch, bright;");
        assert!(extract_building_process_loads(&store, &ProcessConfig::default()).is_empty());
    }

    #[test]
    fn test_truncated_records_skipped() {
        let store = parse(
            "Exterior:Lights, Short Sign;\n\
             Exterior:FuelEquipment, Short Fuel, Electricity;\n\
             ElectricEquipment, Lift, Core, Sch, EquipmentLevel, fast, , , 0, 0, 0, Elevators;\n\
             Refrigeration:Case, Short Case, Sch, Sales;\n\
             Refrigeration:CompressorRack, Short Rack, Outdoors, 2.0;",
        );
        let loads = extract_building_process_loads(&store, &ProcessConfig::default());
        assert!(loads.is_empty(), "{loads:?}");
    }
}
