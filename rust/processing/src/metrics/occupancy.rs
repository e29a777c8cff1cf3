// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Occupant density (people/m²)

use super::ZoneAccumulator;
use idf_lite_core::{ObjectStore, ObjectView, Pattern, PeopleObject, RuleTable};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Count,
    PerArea,
    AreaPerPerson,
}

fn methods() -> &'static RuleTable<Method> {
    static METHODS: OnceLock<RuleTable<Method>> = OnceLock::new();
    METHODS.get_or_init(|| {
        RuleTable::new()
            .with(Pattern::exact("people"), Method::Count)
            .with(Pattern::exact("people/area"), Method::PerArea)
            .with(Pattern::exact("perarea"), Method::PerArea)
            .with(Pattern::exact("area/person"), Method::AreaPerPerson)
            .with(Pattern::exact("perperson"), Method::AreaPerPerson)
    })
}

/// Occupant density per zone from `People` objects
pub fn extract_people(store: &ObjectStore, geometry: &ZoneGeometryMap) -> ZoneMap<f64> {
    let mut acc = ZoneAccumulator::new(geometry);

    for people in store.objects::<PeopleObject>() {
        if people.record().len() < 3 {
            skip!(people.name(), "too few fields");
            continue;
        }
        let Some(slot) = acc.lookup(people.zone()) else {
            skip!(people.name(), "unknown zone");
            continue;
        };
        let Some(area) = slot.floor_area() else {
            skip!(people.name(), "zone has no floor area");
            continue;
        };

        let density = match methods().first_match(people.method()) {
            Some(Method::Count) => people.number_of_people().map(|n| n / area),
            Some(Method::PerArea) => people.people_per_area(),
            Some(Method::AreaPerPerson) => people
                .area_per_person()
                .filter(|v| *v > 0.0)
                .map(|v| 1.0 / v),
            None => {
                skip!(people.name(), "unknown calculation method");
                continue;
            }
        };

        match density {
            Some(density) => acc.add(&slot, density),
            None => skip!(people.name(), "missing value"),
        }
    }

    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::model;
    use approx::assert_relative_eq;

    const ZONE: &str = "Zone, Office, 0, 0,0,0, 1, 1, , , 100;\n";

    #[test]
    fn test_people_per_area() {
        let (store, geometry) = model(&format!(
            "{ZONE}People, P1, Office, Occ Sch, People/Area, , 0.05;"
        ));
        assert_relative_eq!(extract_people(&store, &geometry)["Office"], 0.05);
    }

    #[test]
    fn test_methods_are_additive() {
        let (store, geometry) = model(&format!(
            "{ZONE}People, P1, Office, S, People, 10;\n\
             People, P2, Office, S, Area/Person, , , 20;\n\
             People, P3, office, S, PerArea, , 0.01;"
        ));
        // 10/100 + 1/20 + 0.01
        assert_relative_eq!(extract_people(&store, &geometry)["Office"], 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_skipped_records() {
        let (store, geometry) = model(&format!(
            "{ZONE}Zone, Plenum;\n\
             People, P1, Plenum, S, People, 3;\n\
             People, P2, Nowhere, S, People, 3;\n\
             People, P3, Office, S, People, many;\n\
             People, P4, Office, S, Area/Person, , , 0;\n\
             People, P5, Office, S, Bogus, 1, 1, 1;"
        ));
        let people = extract_people(&store, &geometry);
        assert_eq!(people.len(), 2);
        assert_eq!(people["Office"], 0.0);
        assert_eq!(people["Plenum"], 0.0);
    }
}
