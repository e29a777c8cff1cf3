// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service hot water peak flow density (L/h·m²)

use super::{ZoneAccumulator, ZoneSlot};
use crate::config::WaterConfig;
use idf_lite_core::{contains_ignore_case, ends_with_ignore_case, ObjectStore, ObjectView, WaterUseEquipment};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};

/// m³/s → L/h
const M3S_TO_LPH: f64 = 3_600_000.0;

/// Peak hot water flow per zone floor area
///
/// Equipment without a zone (or naming an unknown one) is attributed by the
/// residential naming convention: `<anything>_unitN` belongs to the living
/// zone of unit N, and a model with a single living zone gets everything.
pub fn extract_water_use(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    config: &WaterConfig,
) -> ZoneMap<f64> {
    let mut acc = ZoneAccumulator::new(geometry);

    for equipment in store.objects::<WaterUseEquipment>() {
        if equipment.record().len() < 3 {
            skip!(equipment.name(), "too few fields");
            continue;
        }

        let slot = equipment
            .zone()
            .and_then(|zone| acc.lookup(zone))
            .or_else(|| residential_zone(&acc, equipment.name(), config));
        let Some(slot) = slot else {
            skip!(equipment.name(), "no zone");
            continue;
        };
        let Some(area) = slot.floor_area() else {
            skip!(equipment.name(), "zone has no floor area");
            continue;
        };

        match equipment.peak_flow() {
            Some(flow) => acc.add(&slot, flow * M3S_TO_LPH / area),
            None => skip!(equipment.name(), "missing peak flow"),
        }
    }

    acc.finish()
}

fn residential_zone<'g>(
    acc: &ZoneAccumulator<'g, f64>,
    name: &str,
    config: &WaterConfig,
) -> Option<ZoneSlot<'g>> {
    let living = |zone: &&str| contains_ignore_case(zone, &config.living_marker);

    if let Some(suffix) = unit_suffix(name, &config.unit_marker) {
        let unit_zone = acc
            .zone_names()
            .filter(living)
            .find(|zone| ends_with_ignore_case(zone, suffix));
        if let Some(zone) = unit_zone {
            return acc.lookup(zone);
        }
    }

    let mut living_zones = acc.zone_names().filter(living);
    match (living_zones.next(), living_zones.next()) {
        (Some(only), None) => acc.lookup(only),
        _ => None,
    }
}

/// Trailing `<marker><digits>` of a name, matched case-insensitively
fn unit_suffix<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    // ASCII uppercasing keeps byte offsets
    let start = name
        .to_ascii_uppercase()
        .rfind(&marker.to_ascii_uppercase())?;
    let digits = name.get(start + marker.len()..)?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        name.get(start..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::model;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_suffix() {
        assert_eq!(unit_suffix("Shower_Unit12", "_unit"), Some("_Unit12"));
        assert_eq!(unit_suffix("Shower_unit", "_unit"), None);
        assert_eq!(unit_suffix("Shower_unit3a", "_unit"), None);
        assert_eq!(unit_suffix("Sink", "_unit"), None);
    }

    #[test]
    fn test_explicit_zone() {
        let (store, geometry) = model(
            "Zone, Kitchen, 0, 0,0,0, 1, 1, , , 36;\n\
             WaterUse:Equipment, Sink, DHW, 0.0001, Flow Sch, Temp Sch, , , Kitchen;",
        );
        let water = extract_water_use(&store, &geometry, &WaterConfig::default());
        assert_relative_eq!(water["Kitchen"], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unit_suffix_matches_living_zone() {
        let (store, geometry) = model(
            "Zone, living_unit1, 0, 0,0,0, 1, 1, , , 100;\n\
             Zone, attic_unit1, 0, 0,0,0, 1, 1, , , 100;\n\
             Zone, living_unit2, 0, 0,0,0, 1, 1, , , 50;\n\
             WaterUse:Equipment, Shower_unit2, DHW, 0.00001;\n\
             WaterUse:Equipment, Dishwasher_unit1, DHW, 0.00001, S, T, , , Nowhere;",
        );
        let water = extract_water_use(&store, &geometry, &WaterConfig::default());
        assert_relative_eq!(water["living_unit2"], 0.72, epsilon = 1e-9);
        assert_relative_eq!(water["living_unit1"], 0.36, epsilon = 1e-9);
        assert_eq!(water["attic_unit1"], 0.0);
    }

    #[test]
    fn test_single_living_zone_fallback() {
        let (store, geometry) = model(
            "Zone, Living, 0, 0,0,0, 1, 1, , , 120;\n\
             Zone, Garage, 0, 0,0,0, 1, 1, , , 40;\n\
             WaterUse:Equipment, Clothes Washer, DHW, 0.00002;",
        );
        let water = extract_water_use(&store, &geometry, &WaterConfig::default());
        assert_relative_eq!(water["Living"], 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_ambiguous_living_zones_skipped() {
        let (store, geometry) = model(
            "Zone, Living A, 0, 0,0,0, 1, 1, , , 100;\n\
             Zone, Living B, 0, 0,0,0, 1, 1, , , 100;\n\
             WaterUse:Equipment, Shower, DHW, 0.00002;",
        );
        let water = extract_water_use(&store, &geometry, &WaterConfig::default());
        assert!(water.values().all(|v| *v == 0.0));
    }
}
