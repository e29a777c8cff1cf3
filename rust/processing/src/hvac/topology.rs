// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC object graph
//!
//! Lookup tables joining zones to their equipment and air loops, and air
//! loops to their outdoor air controllers. Zone, list and splitter keys are
//! uppercase; values borrow from the object store.

use crate::config::HvacConfig;
use idf_lite_core::{
    ends_with_ignore_case, EquipmentConnections, EquipmentList, MechanicalVentilationController,
    ObjectStore, ObjectView, OutdoorAirController, SupplyPath, ZoneSplitter, ZoneThermostat,
};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// `(equipment type, equipment name)` entries of one equipment list
pub type EquipmentEntries<'s> = SmallVec<[(&'s str, &'s str); 4]>;

/// Settings of the controller claimed by an air loop
#[derive(Debug, Clone, Copy, Default)]
struct LoopControls<'s> {
    economizer: Option<&'s str>,
    demand_controlled: Option<&'s str>,
}

#[derive(Debug, Default)]
pub struct HvacTopology<'s> {
    conditioned: FxHashSet<String>,
    zone_equipment: FxHashMap<String, &'s str>,
    equipment_lists: FxHashMap<String, EquipmentEntries<'s>>,
    zone_air_loops: FxHashMap<String, &'s str>,
    loop_controls: FxHashMap<&'s str, LoopControls<'s>>,
}

impl<'s> HvacTopology<'s> {
    pub fn build(store: &'s ObjectStore, config: &HvacConfig) -> Self {
        let conditioned: FxHashSet<String> = store
            .objects::<ZoneThermostat>()
            .filter(|t| t.record().len() >= 2)
            .map(|t| t.zone().to_ascii_uppercase())
            .collect();

        let zone_equipment: FxHashMap<String, &'s str> = store
            .objects::<EquipmentConnections>()
            .filter(|c| c.is_complete())
            .map(|c| (c.zone().to_ascii_uppercase(), c.equipment_list()))
            .collect();

        let equipment_lists: FxHashMap<String, EquipmentEntries<'s>> = store
            .objects::<EquipmentList>()
            .map(|list| {
                let entries: EquipmentEntries<'s> = list.equipment().into_iter().collect();
                (list.name().to_ascii_uppercase(), entries)
            })
            .collect();

        let zone_air_loops = zone_air_loops(store, config);
        let loop_controls = loop_controls(store, &zone_air_loops);

        let topology = Self {
            conditioned,
            zone_equipment,
            equipment_lists,
            zone_air_loops,
            loop_controls,
        };
        tracing::debug!(
            conditioned = topology.conditioned.len(),
            connected = topology.zone_equipment.len(),
            equipment_lists = topology.equipment_lists.len(),
            air_loop_zones = topology.zone_air_loops.len(),
            controlled_loops = topology.loop_controls.len(),
            "HVAC topology built"
        );
        topology
    }

    /// Zone has a thermostat
    pub fn is_conditioned(&self, zone: &str) -> bool {
        self.conditioned.contains(&zone.to_ascii_uppercase())
    }

    /// Zone has an equipment connection
    pub fn is_connected(&self, zone: &str) -> bool {
        self.zone_equipment.contains_key(&zone.to_ascii_uppercase())
    }

    /// Equipment serving a zone, empty when it has no (known) list
    pub fn equipment(&self, zone: &str) -> &[(&'s str, &'s str)] {
        self.zone_equipment
            .get(&zone.to_ascii_uppercase())
            .and_then(|list| self.equipment_lists.get(&list.to_ascii_uppercase()))
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Air loop feeding a zone through a zone splitter
    pub fn air_loop(&self, zone: &str) -> Option<&'s str> {
        self.zone_air_loops.get(&zone.to_ascii_uppercase()).copied()
    }

    /// Economizer type of the loop's outdoor air controller
    pub fn economizer(&self, air_loop: &str) -> Option<&'s str> {
        self.loop_controls.get(air_loop).and_then(|c| c.economizer)
    }

    /// DCV flag of the loop's mechanical ventilation controller
    pub fn demand_controlled(&self, air_loop: &str) -> Option<&'s str> {
        self.loop_controls.get(air_loop).and_then(|c| c.demand_controlled)
    }
}

/// Zone name encoded in a splitter outlet node name
pub fn zone_from_node<'a>(node: &'a str, suffixes: &[String]) -> &'a str {
    suffixes
        .iter()
        .find(|suffix| ends_with_ignore_case(node, suffix))
        .and_then(|suffix| node.get(..node.len() - suffix.len()))
        .map(str::trim_end)
        .unwrap_or(node)
}

/// Uppercase zone → air loop, via supply paths and zone splitters
fn zone_air_loops<'s>(store: &'s ObjectStore, config: &HvacConfig) -> FxHashMap<String, &'s str> {
    let mut splitter_loops: FxHashMap<String, &'s str> = FxHashMap::default();
    for path in store.objects::<SupplyPath>() {
        if path.record().len() < 4 {
            continue;
        }
        for (component_type, component) in path.components() {
            if component_type.to_ascii_uppercase().contains("ZONESPLITTER") {
                splitter_loops.insert(component.to_ascii_uppercase(), path.name());
            }
        }
    }

    let mut zone_loops = FxHashMap::default();
    for splitter in store.objects::<ZoneSplitter>() {
        if splitter.record().len() < 3 {
            continue;
        }
        let name = splitter.name();
        let air_loop = match splitter_loops.get(&name.to_ascii_uppercase()) {
            Some(air_loop) => *air_loop,
            None => strip_suffix_ignore_case(name, &config.splitter_suffix),
        };
        for node in splitter.outlet_nodes() {
            let zone = zone_from_node(node, &config.node_suffixes);
            zone_loops.insert(zone.to_ascii_uppercase(), air_loop);
        }
    }
    zone_loops
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> &'a str {
    if !suffix.is_empty() && ends_with_ignore_case(name, suffix) {
        name.get(..name.len() - suffix.len()).unwrap_or(name)
    } else {
        name
    }
}

/// Controller names embed the air loop name: `<loop>_OA_Controller`
fn normalize(name: &str) -> String {
    name.to_ascii_uppercase().replace(' ', "_")
}

/// First matching controller of each kind per air loop
///
/// Loops are tried in sorted order so a controller whose name contains two
/// loop names binds the same way on every run.
fn loop_controls<'s>(
    store: &'s ObjectStore,
    zone_air_loops: &FxHashMap<String, &'s str>,
) -> FxHashMap<&'s str, LoopControls<'s>> {
    let loops: Vec<(&'s str, String)> = zone_air_loops
        .values()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|l| (l, normalize(l)))
        .collect();
    let claim = |controller: &str| -> Option<&'s str> {
        let controller = normalize(controller);
        loops
            .iter()
            .find(|(_, normalized)| controller.contains(normalized.as_str()))
            .map(|(air_loop, _)| *air_loop)
    };

    let mut controls: FxHashMap<&'s str, LoopControls<'s>> = FxHashMap::default();
    let mut economizer_claimed: FxHashSet<&'s str> = FxHashSet::default();
    let mut dcv_claimed: FxHashSet<&'s str> = FxHashSet::default();

    for controller in store.objects::<OutdoorAirController>() {
        let Some(air_loop) = claim(controller.name()) else {
            continue;
        };
        if economizer_claimed.insert(air_loop) {
            controls.entry(air_loop).or_default().economizer =
                controller.economizer().filter(|e| !e.is_empty());
        }
    }

    for controller in store.objects::<MechanicalVentilationController>() {
        let Some(air_loop) = claim(controller.name()) else {
            continue;
        };
        if dcv_claimed.insert(air_loop) {
            controls.entry(air_loop).or_default().demand_controlled =
                controller.demand_controlled().filter(|d| !d.is_empty());
        }
    }

    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use idf_lite_core::parse;

    #[test]
    fn test_zone_from_node() {
        let suffixes = HvacConfig::default().node_suffixes;
        assert_eq!(zone_from_node("Core_ZN VAV Box Inlet Node", &suffixes), "Core_ZN");
        assert_eq!(zone_from_node("Perimeter 1 VAV Box", &suffixes), "Perimeter 1");
        assert_eq!(zone_from_node("Lobby Inlet Node", &suffixes), "Lobby");
        assert_eq!(zone_from_node("Lobby Supply", &suffixes), "Lobby Supply");
    }

    #[test]
    fn test_equipment_join() {
        let store = parse(
            "ZoneControl:Thermostat, T1, Core, Sch, ThermostatSetpoint:DualSetpoint, D;\n\
             ZoneHVAC:EquipmentConnections, Core, Core Eq, Core Inlets, , Core Air Node, Core Return;\n\
             ZoneHVAC:EquipmentConnections, Attic, Attic Eq;\n\
             ZoneHVAC:EquipmentList, core eq, SequentialLoad, ZoneHVAC:PackagedTerminalAirConditioner, PTAC 1, 1, 1, , ;",
        );
        let topology = HvacTopology::build(&store, &HvacConfig::default());
        assert!(topology.is_conditioned("CORE"));
        assert!(topology.is_connected("Core"));
        assert!(!topology.is_connected("Attic"));
        assert_eq!(
            topology.equipment("Core"),
            &[("ZoneHVAC:PackagedTerminalAirConditioner", "PTAC 1")]
        );
        assert!(topology.equipment("Attic").is_empty());
    }

    #[test]
    fn test_air_loop_and_controllers() {
        let store = parse(
            "AirLoopHVAC:SupplyPath, VAV_1 Supply Path, VAV_1 Zone Eq Inlet, AirLoopHVAC:ZoneSplitter, VAV_1 Splitter;\n\
             AirLoopHVAC:ZoneSplitter, VAV_1 Splitter, Inlet, Core_ZN VAV Box Inlet Node, Perimeter_ZN_1 VAV Box Inlet Node;\n\
             AirLoopHVAC:ZoneSplitter, PSZ_2 Supply Air Splitter, Inlet, Lobby Inlet Node;\n\
             Controller:OutdoorAir, VAV_1_Supply_Path_OA_Controller, Relief, Ret, Mixed, Outside, 0.5, 2.0, DifferentialDryBulb;\n\
             Controller:OutdoorAir, VAV_1 Supply Path OA Controller 2, Relief, Ret, Mixed, Outside, 0.5, 2.0, FixedDryBulb;\n\
             Controller:MechanicalVentilation, PSZ_2 Mech Vent, Avail, Yes;",
        );
        let topology = HvacTopology::build(&store, &HvacConfig::default());

        assert_eq!(topology.air_loop("core_zn"), Some("VAV_1 Supply Path"));
        assert_eq!(topology.air_loop("Perimeter_ZN_1"), Some("VAV_1 Supply Path"));
        assert_eq!(topology.air_loop("Lobby"), Some("PSZ_2"));
        assert_eq!(topology.air_loop("Nowhere"), None);

        assert_eq!(topology.economizer("VAV_1 Supply Path"), Some("DifferentialDryBulb"));
        assert_eq!(topology.demand_controlled("VAV_1 Supply Path"), None);
        assert_eq!(topology.demand_controlled("PSZ_2"), Some("Yes"));
        assert_eq!(topology.economizer("PSZ_2"), None);
    }
}
