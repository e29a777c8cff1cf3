// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infiltration per exterior envelope area (m³/s·m²)
//!
//! Flows are normalized by the zone's facade area, or by its floor area when
//! it has no exterior walls. Leakage areas are converted to a flow at 4 Pa.

use super::{ZoneAccumulator, ZoneSlot};
use crate::config::InfiltrationConfig;
use idf_lite_core::{
    contains_ignore_case, AfnLeakageComponent, AfnSurface, BuildingSurface,
    InfiltrationDesignFlow, InfiltrationLeakageArea, ObjectStore, ObjectView, Pattern, RuleTable,
};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Flow,
    PerFloorArea,
    PerExteriorArea,
    AirChanges,
}

fn methods() -> &'static RuleTable<Method> {
    static METHODS: OnceLock<RuleTable<Method>> = OnceLock::new();
    METHODS.get_or_init(|| {
        RuleTable::new()
            .with(Pattern::exact("flow/zone"), Method::Flow)
            .with(Pattern::exact("level"), Method::Flow)
            .with(Pattern::exact("flow/area"), Method::PerFloorArea)
            .with(Pattern::exact("flow/exteriorwallarea"), Method::PerExteriorArea)
            .with(Pattern::exact("flow/exteriorarea"), Method::PerExteriorArea)
            .with(Pattern::exact("airchanges/hour"), Method::AirChanges)
    })
}

/// Infiltration per zone from design flow rates, zone leakage areas and the
/// airflow network
pub fn extract_infiltration(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    config: &InfiltrationConfig,
) -> ZoneMap<f64> {
    let mut acc = ZoneAccumulator::new(geometry);
    design_flow_rates(store, &mut acc);
    leakage_areas(store, &mut acc, config);
    airflow_network(store, &mut acc, config);
    acc.finish()
}

fn design_flow_rates(store: &ObjectStore, acc: &mut ZoneAccumulator<f64>) {
    for infiltration in store.objects::<InfiltrationDesignFlow>() {
        if infiltration.record().len() < 3 {
            skip!(infiltration.name(), "too few fields");
            continue;
        }
        let Some(slot) = acc.lookup(infiltration.zone()) else {
            skip!(infiltration.name(), "unknown zone");
            continue;
        };
        let Some(norm) = slot.envelope_area() else {
            skip!(infiltration.name(), "zone has no envelope area");
            continue;
        };
        let zone = slot.geometry;

        let flow = match methods().first_match(infiltration.method()) {
            Some(Method::Flow) => infiltration.design_flow().map(|q| q / norm),
            Some(Method::PerFloorArea) => infiltration
                .flow_per_floor_area()
                .map(|q| q * zone.floor_area / norm),
            Some(Method::PerExteriorArea) => infiltration.flow_per_exterior_area(),
            Some(Method::AirChanges) if zone.volume > 0.0 => infiltration
                .air_changes_per_hour()
                .map(|ach| ach * zone.volume / 3600.0 / norm),
            Some(Method::AirChanges) => {
                skip!(infiltration.name(), "air changes without zone volume");
                continue;
            }
            None => {
                skip!(infiltration.name(), "unknown design flow rate method");
                continue;
            }
        };

        match flow {
            Some(flow) => acc.add(&slot, flow),
            None => skip!(infiltration.name(), "missing value"),
        }
    }
}

fn leakage_areas(store: &ObjectStore, acc: &mut ZoneAccumulator<f64>, config: &InfiltrationConfig) {
    for leakage in store.objects::<InfiltrationLeakageArea>() {
        if leakage.record().len() < 4 {
            skip!(leakage.name(), "too few fields");
            continue;
        }
        let Some(slot) = acc.lookup(leakage.zone()) else {
            skip!(leakage.name(), "unknown zone");
            continue;
        };
        let Some(norm) = slot.envelope_area() else {
            skip!(leakage.name(), "zone has no envelope area");
            continue;
        };
        match leakage.leakage_area() {
            Some(ela) => {
                let flow = config.leakage_m2(ela) * config.flow_coefficient;
                acc.add(&slot, flow / norm);
            }
            None => skip!(leakage.name(), "missing leakage area"),
        }
    }
}

fn airflow_network(store: &ObjectStore, acc: &mut ZoneAccumulator<f64>, config: &InfiltrationConfig) {
    if !store.has(AfnSurface::TYPE) {
        return;
    }

    let components: FxHashMap<String, f64> = store
        .objects::<AfnLeakageComponent>()
        .filter_map(|c| {
            let ela = c.leakage_area()?;
            Some((c.name().to_ascii_uppercase(), config.leakage_m2(ela)))
        })
        .collect();

    let surface_zones: FxHashMap<String, &str> = store
        .objects::<BuildingSurface>()
        .filter(|s| s.record().len() > 4)
        .map(|s| (s.name().to_ascii_uppercase(), s.zone()))
        .collect();

    for afn in store.objects::<AfnSurface>() {
        let surface = afn.surface().to_ascii_uppercase();
        let slot = surface_zones
            .get(&surface)
            .and_then(|zone| acc.lookup(zone))
            .or_else(|| zone_in_name(acc, &surface));
        let Some(slot) = slot else {
            skip!(afn.surface(), "no zone for airflow network surface");
            continue;
        };

        let ela = components
            .get(&afn.leakage_component().to_ascii_uppercase())
            .copied()
            .unwrap_or(0.0);
        if ela <= 0.0 {
            skip!(afn.surface(), "no effective leakage area component");
            continue;
        }
        let Some(norm) = slot.envelope_area() else {
            skip!(afn.surface(), "zone has no envelope area");
            continue;
        };

        acc.add(&slot, ela * config.flow_coefficient / norm);
    }
}

/// First zone, in declaration order, whose name occurs in the surface name
fn zone_in_name<'g>(acc: &ZoneAccumulator<'g, f64>, surface: &str) -> Option<ZoneSlot<'g>> {
    let zone = acc
        .zone_names()
        .find(|zone| contains_ignore_case(surface, zone))?;
    acc.lookup(zone)
}
