// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat setpoints (°C)

use super::{resolve_schedule_value, ZoneAccumulator};
use idf_lite_core::{IdfType, ObjectStore, ObjectView, SetpointObject, ZoneThermostat};
use idf_lite_geometry::{ZoneGeometryMap, ZoneMap};
use serde::Serialize;

/// Heating and cooling setpoints of one zone, 0.0 when unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Setpoints {
    pub heating: f64,
    pub cooling: f64,
}

/// Which setpoints a control object's schedules feed
#[derive(Debug, Clone, Copy)]
enum Control {
    Dual,
    Heating,
    Cooling,
    HeatingOrCooling,
}

impl Control {
    fn from_type(ty: IdfType) -> Option<Self> {
        match ty {
            IdfType::DualSetpoint => Some(Control::Dual),
            IdfType::SingleHeatingSetpoint => Some(Control::Heating),
            IdfType::SingleCoolingSetpoint => Some(Control::Cooling),
            IdfType::SingleHeatingOrCoolingSetpoint => Some(Control::HeatingOrCooling),
            _ => None,
        }
    }
}

/// Setpoints per zone, following `ZoneControl:Thermostat` to its setpoint
/// objects and their schedules
///
/// A later control overrides values set by an earlier one.
pub fn extract_thermostats(store: &ObjectStore, geometry: &ZoneGeometryMap) -> ZoneMap<Setpoints> {
    let mut acc = ZoneAccumulator::<Setpoints>::new(geometry);

    for thermostat in store.objects::<ZoneThermostat>() {
        let Some(slot) = acc.lookup(thermostat.zone()) else {
            skip!(thermostat.name(), "unknown zone");
            continue;
        };

        for (control_type, control_name) in thermostat.controls() {
            let Some(ty) = IdfType::from_keyword(control_type) else {
                continue;
            };
            let Some(control) = Control::from_type(ty) else {
                continue;
            };
            let Some(setpoint) = store
                .of(ty)
                .iter()
                .map(SetpointObject::new)
                .find(|sp| sp.name() == control_name)
            else {
                skip!(control_name, "setpoint object not found");
                continue;
            };

            let value = |n: usize| {
                setpoint
                    .schedule(n)
                    .and_then(|schedule| resolve_schedule_value(store, schedule))
            };
            let (heating, cooling) = match control {
                Control::Dual => (value(0), value(1)),
                Control::Heating => (value(0), None),
                Control::Cooling => (None, value(0)),
                Control::HeatingOrCooling => (value(0), value(0)),
            };

            if let Some(sp) = acc.value_mut(&slot) {
                if let Some(h) = heating {
                    sp.heating = h;
                }
                if let Some(c) = cooling {
                    sp.cooling = c;
                }
            }
        }
    }

    acc.finish()
}
