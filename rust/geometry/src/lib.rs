// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDF-Lite Geometry Processing
//!
//! Zone floor area, exterior facade area and volume from
//! `BuildingSurface:Detailed` polygons, using nalgebra for the vector math.

pub mod error;
pub mod polygon;
pub mod surface;
pub mod zone;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use polygon::{polygon_area, VertexRing};
pub use surface::{surface_area, surface_vertices};
pub use zone::{
    resolve_geometry, resolve_geometry_file, resolve_geometry_with, GeometryOptions, ZoneGeometry,
    ZoneGeometryMap, ZoneLookup, ZoneMap,
};
