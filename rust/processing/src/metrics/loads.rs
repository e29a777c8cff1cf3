// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lighting and equipment power density (W/m²)

use super::ZoneAccumulator;
use idf_lite_core::{IdfType, LoadObject, ObjectStore, Pattern, RuleTable};
use idf_lite_geometry::{ZoneGeometryMap, ZoneLookup, ZoneMap};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Level,
    PerArea,
    PerPerson,
}

pub(crate) fn methods() -> &'static RuleTable<Method> {
    static METHODS: OnceLock<RuleTable<Method>> = OnceLock::new();
    METHODS.get_or_init(|| {
        RuleTable::new()
            .with(Pattern::exact("lightinglevel"), Method::Level)
            .with(Pattern::exact("equipmentlevel"), Method::Level)
            .with(Pattern::exact("level"), Method::Level)
            .with(Pattern::exact("watts/area"), Method::PerArea)
            .with(Pattern::exact("perarea"), Method::PerArea)
            .with(Pattern::exact("watts/person"), Method::PerPerson)
            .with(Pattern::exact("perperson"), Method::PerPerson)
    })
}

/// Power density per zone for one load type
///
/// `occupancy` (people/m², see [`super::extract_people`]) converts
/// Watts/Person inputs into W/m².
pub fn extract_loads(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    ty: IdfType,
    occupancy: &ZoneMap<f64>,
) -> ZoneMap<f64> {
    extract_loads_for(store, geometry, ty.as_str(), occupancy)
}

/// Power density for any keyword sharing the Lights/Equipment layout
pub fn extract_loads_for(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    keyword: &str,
    occupancy: &ZoneMap<f64>,
) -> ZoneMap<f64> {
    let mut acc = ZoneAccumulator::new(geometry);

    for record in store.get(keyword) {
        let load = LoadObject::new(record);
        if record.len() < 3 {
            skip!(load.name(), "too few fields");
            continue;
        }
        let Some(slot) = acc.lookup(load.zone()) else {
            skip!(load.name(), "unknown zone");
            continue;
        };
        let Some(area) = slot.floor_area() else {
            skip!(load.name(), "zone has no floor area");
            continue;
        };

        let density = match methods().first_match(load.method()) {
            Some(Method::Level) => load.design_level().map(|w| w / area),
            Some(Method::PerArea) => load.per_area(),
            Some(Method::PerPerson) => {
                let people = occupancy.zone(slot.name).copied().unwrap_or(0.0);
                load.per_person().map(|w| w * people)
            }
            None => {
                skip!(load.name(), "unknown design level method");
                continue;
            }
        };

        match density {
            Some(density) => acc.add(&slot, density),
            None => skip!(load.name(), "missing value"),
        }
    }

    acc.finish()
}
