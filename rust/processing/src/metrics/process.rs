// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone process load density (W/m²)

use super::loads::{methods, Method};
use super::ZoneAccumulator;
use crate::config::ProcessConfig;
use idf_lite_core::{IdfType, LoadObject, ObjectStore};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};

/// Process loads per zone: equipment objects that mention a process keyword
/// (elevators, refrigeration, kitchens, ...) in any field
pub fn extract_process_loads(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    config: &ProcessConfig,
) -> ZoneMap<f64> {
    let mut acc = ZoneAccumulator::new(geometry);

    let records = store
        .of(IdfType::ElectricEquipment)
        .iter()
        .chain(store.of(IdfType::OtherEquipment));

    for record in records {
        let load = LoadObject::new(record);
        if record.len() < 4 {
            continue;
        }
        let Some(slot) = acc.lookup(load.zone()) else {
            continue;
        };
        if !load.mentions_any(&config.keywords) {
            continue;
        }
        let Some(area) = slot.floor_area() else {
            skip!(load.name(), "zone has no floor area");
            continue;
        };

        let density = match methods().first_match(load.method()) {
            Some(Method::Level) => load.design_level().map(|w| w / area),
            Some(Method::PerArea) => load.per_area(),
            _ => {
                skip!(load.name(), "unsupported process load method");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::model;
    use approx::assert_relative_eq;

    #[test]
    fn test_keyword_filter() {
        let (store, geometry) = model(
            "Zone, Galley, 0, 0,0,0, 1, 1, , , 40;\n\
             ElectricEquipment, Kitchen Range, Galley, S, EquipmentLevel, 2000;\n\
             ElectricEquipment, Plug Loads, Galley, S, Watts/Area, , 5;\n\
             OtherEquipment, Walk-in, Galley, S, Watts/Area, , 3, , 0, 0, 0, Refrigeration;",
        );
        let process = extract_process_loads(&store, &geometry, &ProcessConfig::default());
        assert_relative_eq!(process["Galley"], 53.0);
    }

    #[test]
    fn test_per_person_not_counted() {
        let (store, geometry) = model(
            "Zone, Core, 0, 0,0,0, 1, 1, , , 40;\n\
             ElectricEquipment, Laundry, Core, S, Watts/Person, , , 100;",
        );
        let process = extract_process_loads(&store, &geometry, &ProcessConfig::default());
        assert_eq!(process["Core"], 0.0);
    }

    #[test]
    fn test_custom_keywords() {
        let (store, geometry) = model(
            "Zone, Lab, 0, 0,0,0, 1, 1, , , 10;\n\
             ElectricEquipment, Fume Hood, Lab, S, EquipmentLevel, 500;",
        );
        let config = ProcessConfig {
            keywords: vec!["fume".into()],
            ..ProcessConfig::default()
        };
        assert_relative_eq!(extract_process_loads(&store, &geometry, &config)["Lab"], 50.0);
        assert_eq!(
            extract_process_loads(&store, &geometry, &ProcessConfig::default())["Lab"],
            0.0
        );
    }
}
