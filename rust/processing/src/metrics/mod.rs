// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone metric normalizers
//!
//! Each extractor turns one family of objects into a per-zone quantity in
//! uniform units. Every zone starts at the default value; contributing
//! objects add to it. A record naming an unknown zone, a zone with no usable
//! area, or an unparsable number is skipped on its own.

// Log a skipped record
macro_rules! skip {
    ($object:expr, $reason:expr) => {
        tracing::trace!(object = %$object, reason = $reason, "Skipping record")
    };
}

mod building_loads;
mod infiltration;
mod loads;
mod occupancy;
mod process;
mod schedule;
mod thermostat;
mod ventilation;
mod water;

pub use building_loads::{extract_building_process_loads, ProcessLoadRecord};
pub use infiltration::extract_infiltration;
pub use loads::{extract_loads, extract_loads_for};
pub use occupancy::extract_people;
pub use process::extract_process_loads;
pub use schedule::resolve_schedule_value;
pub use thermostat::{extract_thermostats, Setpoints};
pub use ventilation::{extract_ventilation, Ventilation};
pub use water::extract_water_use;

use idf_lite_geometry::{ZoneGeometry, ZoneGeometryMap, ZoneLookup, ZoneMap};

/// Per-zone accumulator seeded with every zone of the geometry map
pub(crate) struct ZoneAccumulator<'g, T> {
    geometry: &'g ZoneGeometryMap,
    values: ZoneMap<T>,
}

impl<'g, T: Default> ZoneAccumulator<'g, T> {
    pub(crate) fn new(geometry: &'g ZoneGeometryMap) -> Self {
        let values = geometry
            .keys()
            .map(|name| (name.clone(), T::default()))
            .collect();
        Self { geometry, values }
    }
}

impl<'g, T> ZoneAccumulator<'g, T> {
    /// Resolve a zone reference to its slot and geometry
    pub(crate) fn lookup(&self, zone: &str) -> Option<ZoneSlot<'g>> {
        let index = self.geometry.zone_index(zone)?;
        let (name, geometry) = self.geometry.get_index(index)?;
        Some(ZoneSlot {
            index,
            name,
            geometry,
        })
    }

    /// Zone names in declaration order
    pub(crate) fn zone_names(&self) -> impl Iterator<Item = &'g str> {
        self.geometry.keys().map(String::as_str)
    }

    pub(crate) fn value_mut(&mut self, slot: &ZoneSlot) -> Option<&mut T> {
        self.values.get_index_mut(slot.index).map(|(_, v)| v)
    }

    pub(crate) fn finish(self) -> ZoneMap<T> {
        self.values
    }
}

impl<'g> ZoneAccumulator<'g, f64> {
    /// Add a contribution to a zone
    pub(crate) fn add(&mut self, slot: &ZoneSlot, value: f64) {
        if let Some(total) = self.value_mut(slot) {
            *total += value;
        }
    }
}

/// A resolved zone reference
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZoneSlot<'g> {
    index: usize,
    pub name: &'g str,
    pub geometry: &'g ZoneGeometry,
}

impl ZoneSlot<'_> {
    /// Floor area, `None` when not positive
    pub(crate) fn floor_area(&self) -> Option<f64> {
        Some(self.geometry.floor_area).filter(|a| *a > 0.0)
    }

    /// Facade area, falling back to floor area; `None` when neither is positive
    pub(crate) fn envelope_area(&self) -> Option<f64> {
        let g = self.geometry;
        let area = if g.facade_area > 0.0 {
            g.facade_area
        } else {
            g.floor_area
        };
        Some(area).filter(|a| *a > 0.0)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use idf_lite_core::{parse, ObjectStore};
    use idf_lite_geometry::{resolve_geometry, ZoneGeometryMap};

    /// Parse a model and resolve its geometry
    pub fn model(text: &str) -> (ObjectStore, ZoneGeometryMap) {
        let store = parse(text);
        let geometry = resolve_geometry(&store);
        (store, geometry)
    }
}
