// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone geometry resolution
//!
//! Floor area, exterior facade area, volume and multiplier per zone. Declared
//! zone values win; an unset or near-zero floor area is replaced by the sum
//! of the zone's floor polygons.

use crate::surface::surface_area;
use crate::Result;
use idf_lite_core::{parse_file, BuildingSurface, ObjectStore, ObjectView, ZoneObject};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-zone values in zone declaration order
pub type ZoneMap<T> = IndexMap<String, T>;

/// Name lookup on zone maps
///
/// Exact match first, then ASCII case-insensitive: IDF object names are not
/// case-sensitive but are usually spelled consistently.
pub trait ZoneLookup<T> {
    /// Position of the zone in declaration order
    fn zone_index(&self, name: &str) -> Option<usize>;
    fn zone(&self, name: &str) -> Option<&T>;
    fn zone_mut(&mut self, name: &str) -> Option<&mut T>;
}

impl<T> ZoneLookup<T> for ZoneMap<T> {
    fn zone_index(&self, name: &str) -> Option<usize> {
        self.get_index_of(name)
            .or_else(|| self.keys().position(|k| k.eq_ignore_ascii_case(name)))
    }

    fn zone(&self, name: &str) -> Option<&T> {
        let index = self.zone_index(name)?;
        self.get_index(index).map(|(_, v)| v)
    }

    fn zone_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = self.zone_index(name)?;
        self.get_index_mut(index).map(|(_, v)| v)
    }
}

/// Resolved geometry of one zone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ZoneGeometry {
    /// m²
    pub floor_area: f64,
    /// m², exterior walls only
    pub facade_area: f64,
    /// m³, 0.0 when not declared
    pub volume: f64,
    pub multiplier: f64,
}

impl Default for ZoneGeometry {
    fn default() -> Self {
        Self {
            floor_area: 0.0,
            facade_area: 0.0,
            volume: 0.0,
            multiplier: 1.0,
        }
    }
}

pub type ZoneGeometryMap = ZoneMap<ZoneGeometry>;

/// Tunables for geometry resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeometryOptions {
    /// Declared floor areas at or below this are treated as unset (m²)
    pub floor_area_epsilon: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            floor_area_epsilon: 0.001,
        }
    }
}

/// Resolve zone geometry with default options
pub fn resolve_geometry(store: &ObjectStore) -> ZoneGeometryMap {
    resolve_geometry_with(store, &GeometryOptions::default())
}

/// Resolve zone geometry
pub fn resolve_geometry_with(store: &ObjectStore, options: &GeometryOptions) -> ZoneGeometryMap {
    let mut zones = ZoneGeometryMap::with_capacity(store.of(ZoneObject::TYPE).len());

    for zone in store.objects::<ZoneObject>() {
        zones.insert(
            zone.name().to_string(),
            ZoneGeometry {
                floor_area: zone.declared_floor_area().unwrap_or(0.0),
                facade_area: 0.0,
                volume: zone.declared_volume().unwrap_or(0.0),
                multiplier: zone.multiplier(),
            },
        );
    }

    // Provisional floor sums, by zone index
    let mut floor_sums: FxHashMap<usize, f64> = FxHashMap::default();
    let mut unknown_zone = 0usize;
    let mut rejected = 0usize;

    for surface in store.objects::<BuildingSurface>() {
        if !(surface.is_floor() || surface.is_wall()) {
            continue;
        }
        let Some(index) = zones.zone_index(surface.zone()) else {
            unknown_zone += 1;
            continue;
        };
        let area = match surface_area(&surface) {
            Ok(area) => area,
            Err(e) => {
                tracing::trace!(error = %e, "Skipping surface");
                rejected += 1;
                continue;
            }
        };

        if surface.is_floor() {
            *floor_sums.entry(index).or_insert(0.0) += area;
        } else if surface.is_exterior() {
            if let Some((_, geometry)) = zones.get_index_mut(index) {
                geometry.facade_area += area;
            }
        }
    }

    for (index, sum) in floor_sums {
        if let Some((name, geometry)) = zones.get_index_mut(index) {
            if geometry.floor_area <= options.floor_area_epsilon {
                tracing::trace!(zone = %name, floor_area = sum, "Floor area from floor surfaces");
                geometry.floor_area = sum;
            }
        }
    }

    if unknown_zone > 0 || rejected > 0 {
        tracing::debug!(unknown_zone, rejected, "Surfaces skipped during geometry resolution");
    }
    tracing::debug!(zones = zones.len(), "Zone geometry resolved");

    zones
}

/// Read a file and resolve its zone geometry
pub fn resolve_geometry_file(path: impl AsRef<Path>) -> Result<ZoneGeometryMap> {
    let store = parse_file(path)?;
    Ok(resolve_geometry(&store))
}
