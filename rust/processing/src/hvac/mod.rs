// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC system inference
//!
//! Classifies the delivery system of every zone in five stages:
//!
//! 1. building capability flags from plant and coil object presence
//! 2. template bases (VAV, PVAV, PSZ) derived from those flags
//! 3. joins from zones to equipment and air loops to controllers
//! 4. ordered equipment rules, then equipment-name rules
//! 5. economizer and DCV settings of the zone's air loop

mod capabilities;
mod classify;
mod templates;
mod topology;

pub use capabilities::BuildingCapabilities;
pub use classify::{Classifier, EquipmentRule, UNKNOWN};
pub use templates::TemplateBases;
pub use topology::{zone_from_node, EquipmentEntries, HvacTopology};

use crate::config::HvacConfig;
use idf_lite_core::ObjectStore;
use idf_lite_geometry::ZoneMap;
use serde::Serialize;
use std::time::Instant;

/// Label and controls for zones without HVAC
pub const UNCONDITIONED: &str = "Unconditioned";
pub const NOT_APPLICABLE: &str = "N/A";

/// Per-zone HVAC classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HvacClassification {
    pub template: String,
    pub dcv: String,
    pub economizer: String,
}

impl HvacClassification {
    pub fn unconditioned() -> Self {
        Self {
            template: UNCONDITIONED.to_string(),
            dcv: NOT_APPLICABLE.to_string(),
            economizer: NOT_APPLICABLE.to_string(),
        }
    }

    pub fn is_conditioned(&self) -> bool {
        self.template != UNCONDITIONED
    }
}

/// Classify every named zone, preserving the order of `zone_names`
pub fn infer_hvac<I, S>(
    store: &ObjectStore,
    zone_names: I,
    config: &HvacConfig,
) -> ZoneMap<HvacClassification>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let start = Instant::now();
    let capabilities = BuildingCapabilities::detect(store);
    let bases = TemplateBases::new(&capabilities);
    let topology = HvacTopology::build(store, config);
    let classifier = Classifier::new(store, &bases, config);

    let mut result = ZoneMap::default();
    for zone in zone_names {
        let zone = zone.as_ref();
        let classification = classify_zone(zone, &topology, &classifier, config);
        tracing::debug!(
            zone,
            template = %classification.template,
            dcv = %classification.dcv,
            economizer = %classification.economizer,
            "Classified zone"
        );
        result.insert(zone.to_string(), classification);
    }

    tracing::info!(
        zones = result.len(),
        conditioned = result.values().filter(|c| c.is_conditioned()).count(),
        vav = %bases.vav,
        pvav = %bases.pvav,
        psz = %bases.psz,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "HVAC inference complete"
    );
    result
}

fn classify_zone(
    zone: &str,
    topology: &HvacTopology,
    classifier: &Classifier,
    config: &HvacConfig,
) -> HvacClassification {
    if !topology.is_conditioned(zone) && !topology.is_connected(zone) {
        return HvacClassification::unconditioned();
    }
    let equipment = topology.equipment(zone);
    if equipment.is_empty() {
        return HvacClassification::unconditioned();
    }

    let template = classifier.classify(equipment);
    let air_loop = topology.air_loop(zone);
    let economizer = air_loop
        .and_then(|l| topology.economizer(l))
        .unwrap_or(config.default_economizer.as_str());
    let dcv = air_loop
        .and_then(|l| topology.demand_controlled(l))
        .unwrap_or(config.default_dcv.as_str());

    HvacClassification {
        template,
        dcv: dcv.to_string(),
        economizer: economizer.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idf_lite_core::parse;

    #[test]
    fn test_unconditioned_without_thermostat_or_equipment() {
        let store = parse("Zone, Attic;");
        let result = infer_hvac(&store, ["Attic"], &HvacConfig::default());
        assert_eq!(result["Attic"], HvacClassification::unconditioned());
        assert!(!result["Attic"].is_conditioned());
    }

    #[test]
    fn test_thermostat_without_equipment_list() {
        let store =
            parse("ZoneControl:Thermostat, T, Core, Sch, ThermostatSetpoint:DualSetpoint, D;");
        let result = infer_hvac(&store, ["Core"], &HvacConfig::default());
        assert_eq!(result["Core"].template, UNCONDITIONED);
    }

    #[test]
    fn test_defaults_without_air_loop() {
        let store = parse(
            "ZoneHVAC:EquipmentConnections, Room 1, Room 1 Eq, Room 1 Inlets, , Room 1 Node, Room 1 Return;\n\
             ZoneHVAC:EquipmentList, Room 1 Eq, SequentialLoad, ZoneHVAC:PackagedTerminalAirConditioner, Room 1 PTAC, 1, 1;",
        );
        let result = infer_hvac(&store, ["Room 1"], &HvacConfig::default());
        let room = &result["Room 1"];
        assert_eq!(room.template, "PTAC");
        assert_eq!(room.economizer, "NoEconomizer");
        assert_eq!(room.dcv, "No");
    }

    #[test]
    fn test_order_follows_zone_names() {
        let store = parse("");
        let zones = vec!["B".to_string(), "A".to_string()];
        let result = infer_hvac(&store, &zones, &HvacConfig::default());
        let names: Vec<&str> = result.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
