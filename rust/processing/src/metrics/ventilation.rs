// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outdoor air requirements (m³/s per person and per m²)

use super::{ZoneAccumulator, ZoneSlot};
use crate::config::VentilationConfig;
use idf_lite_core::{
    contains_ignore_case, ObjectStore, ObjectView, OutdoorAirSpec, Pattern, RuleTable,
    ZoneVentilationDesignFlow,
};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};
use serde::Serialize;
use std::sync::OnceLock;

/// Outdoor air rates of one zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Ventilation {
    /// m³/s per person
    pub per_person: f64,
    /// m³/s per m² floor area
    pub per_area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Flow,
    PerArea,
    PerPerson,
}

fn methods() -> &'static RuleTable<Method> {
    static METHODS: OnceLock<RuleTable<Method>> = OnceLock::new();
    METHODS.get_or_init(|| {
        RuleTable::new()
            .with(Pattern::exact("flow/zone"), Method::Flow)
            .with(Pattern::exact("level"), Method::Flow)
            .with(Pattern::exact("flow/area"), Method::PerArea)
            .with(Pattern::exact("flow/person"), Method::PerPerson)
            .with(Pattern::exact("perperson"), Method::PerPerson)
    })
}

/// Ventilation per zone from outdoor air specifications and zone ventilation
/// objects
///
/// `DesignSpecification:OutdoorAir` objects carry no zone reference; each is
/// attributed to the zone with the longest name contained in the object name.
pub fn extract_ventilation(
    store: &ObjectStore,
    geometry: &ZoneGeometryMap,
    config: &VentilationConfig,
) -> ZoneMap<Ventilation> {
    let mut acc = ZoneAccumulator::new(geometry);

    for spec in store.objects::<OutdoorAirSpec>() {
        let Some(slot) = longest_zone_in_name(&acc, spec.name()) else {
            skip!(spec.name(), "no zone in outdoor air specification name");
            continue;
        };
        let (Some(per_person), Some(per_area), Some(per_zone)) =
            (spec.flow_per_person(), spec.flow_per_area(), spec.flow_per_zone())
        else {
            skip!(spec.name(), "invalid outdoor air flow");
            continue;
        };
        let per_zone = slot.floor_area().map_or(0.0, |area| per_zone / area);

        if let Some(v) = acc.value_mut(&slot) {
            v.per_person += per_person;
            v.per_area += per_area + per_zone;
        }
    }

    for vent in store.objects::<ZoneVentilationDesignFlow>() {
        if vent.record().len() < 5 {
            skip!(vent.name(), "too few fields");
            continue;
        }
        let Some(slot) = acc.lookup(vent.zone()) else {
            skip!(vent.name(), "unknown zone");
            continue;
        };
        let Some(area) = slot.floor_area() else {
            skip!(vent.name(), "zone has no floor area");
            continue;
        };

        let method = methods().first_match(vent.method()).copied();
        let Some(v) = acc.value_mut(&slot) else {
            continue;
        };
        match method {
            Some(Method::Flow) => match vent.design_flow() {
                Some(flow) => v.per_area += flow / area,
                None => skip!(vent.name(), "missing design flow"),
            },
            Some(Method::PerArea) => match vent.flow_per_area() {
                Some(flow) => v.per_area += flow,
                None => skip!(vent.name(), "missing flow per area"),
            },
            Some(Method::PerPerson) => match vent.flow_per_person() {
                Some(flow) if config.count_outdoor_air_per_person => v.per_person += flow,
                Some(flow) => tracing::warn!(
                    object = vent.name(),
                    flow,
                    "Ignoring Flow/Person zone ventilation"
                ),
                None => skip!(vent.name(), "missing flow per person"),
            },
            None => skip!(vent.name(), "unknown design flow rate method"),
        }
    }

    acc.finish()
}

fn longest_zone_in_name<'g>(
    acc: &ZoneAccumulator<'g, Ventilation>,
    name: &str,
) -> Option<ZoneSlot<'g>> {
    let mut best: Option<&str> = None;
    for zone in acc.zone_names() {
        if contains_ignore_case(name, zone) && best.map_or(true, |b| zone.len() > b.len()) {
            best = Some(zone);
        }
    }
    acc.lookup(best?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::model;
    use approx::assert_relative_eq;

    const ZONES: &str = "\
Zone, Core, 0, 0,0,0, 1, 1, , , 100;
Zone, Core_Annex, 0, 0,0,0, 1, 1, , , 50;
";

    #[test]
    fn test_outdoor_air_longest_zone_match() {
        let (store, geometry) = model(&format!(
            "{ZONES}DesignSpecification:OutdoorAir, SZ DSOA Core_Annex, Sum, 0.0025, 0.0003, 0.01;\n\
             DesignSpecification:OutdoorAir, SZ DSOA Core, Sum, 0.005, 0.0006;"
        ));
        let vent = extract_ventilation(&store, &geometry, &VentilationConfig::default());
        assert_relative_eq!(vent["Core_Annex"].per_person, 0.0025);
        assert_relative_eq!(vent["Core_Annex"].per_area, 0.0003 + 0.01 / 50.0, epsilon = 1e-12);
        assert_relative_eq!(vent["Core"].per_person, 0.005);
        assert_relative_eq!(vent["Core"].per_area, 0.0006);
    }

    #[test]
    fn test_outdoor_air_unparsable_flow_skipped() {
        let (store, geometry) = model(&format!(
            "{ZONES}DesignSpecification:OutdoorAir, SZ DSOA Core, Sum, 0.005, high;\n\
             DesignSpecification:OutdoorAir, SZ DSOA Core_Annex, Sum, , 0.0003;"
        ));
        let vent = extract_ventilation(&store, &geometry, &VentilationConfig::default());
        assert_eq!(vent["Core"], Ventilation::default());
        assert_eq!(vent["Core_Annex"].per_person, 0.0);
        assert_relative_eq!(vent["Core_Annex"].per_area, 0.0003);
    }

    #[test]
    fn test_zone_ventilation_methods() {
        let (store, geometry) = model(&format!(
            "{ZONES}ZoneVentilation:DesignFlowRate, V1, Core, S, Flow/Zone, 0.2;\n\
             ZoneVentilation:DesignFlowRate, V2, Core, S, Flow/Area, , 0.001;\n\
             ZoneVentilation:DesignFlowRate, V3, Core, S, Flow/Person, , , 0.008;"
        ));
        let vent = extract_ventilation(&store, &geometry, &VentilationConfig::default());
        assert_relative_eq!(vent["Core"].per_area, 0.003, epsilon = 1e-12);
        assert_relative_eq!(vent["Core"].per_person, 0.008);
        assert_eq!(vent["Core_Annex"], Ventilation::default());
    }

    #[test]
    fn test_flow_per_person_switch() {
        let (store, geometry) = model(&format!(
            "{ZONES}ZoneVentilation:DesignFlowRate, V3, Core, S, Flow/Person, , , 0.008;"
        ));
        let config = VentilationConfig {
            count_outdoor_air_per_person: false,
        };
        let vent = extract_ventilation(&store, &geometry, &config);
        assert_eq!(vent["Core"].per_person, 0.0);
    }

    #[test]
    fn test_short_zone_ventilation_skipped() {
        let (store, geometry) = model(&format!(
            "{ZONES}ZoneVentilation:DesignFlowRate, V1, Core, S, Flow/Zone;"
        ));
        let vent = extract_ventilation(&store, &geometry, &VentilationConfig::default());
        assert_eq!(vent["Core"], Ventilation::default());
    }
}
