// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface vertex extraction

use crate::polygon::{polygon_area, VertexRing};
use crate::{Error, Point3, Result};
use idf_lite_core::{parse_f64, BuildingSurface, ObjectView, VertexCount};

/// Read the vertex ring of a surface
///
/// With a declared vertex count at most `count * 3` fields are read; with a
/// blank or autocalculated count every field after the count is. Blank
/// fields are dropped, the rest are grouped in (x, y, z) triples and a
/// trailing partial triple is ignored. Any coordinate that fails to parse rejects the whole surface.
pub fn surface_vertices(surface: &BuildingSurface) -> Result<VertexRing> {
    if !surface.has_vertices() {
        return Err(Error::MissingVertices {
            surface: surface.name().to_string(),
        });
    }

    let fields = surface.coordinate_fields();
    let coords: Vec<&str> = match surface.vertex_count() {
        VertexCount::Declared(count) => fields
            .iter()
            .take(count.saturating_mul(3))
            .map(String::as_str)
            .filter(|f| !f.is_empty())
            .collect(),
        VertexCount::Auto => fields
            .iter()
            .map(String::as_str)
            .filter(|f| !f.is_empty())
            .collect(),
        VertexCount::Invalid => {
            return Err(Error::InvalidVertexCount {
                surface: surface.name().to_string(),
            })
        }
    };

    let mut values = Vec::with_capacity(coords.len());
    for (index, field) in coords.iter().enumerate() {
        match parse_f64(field) {
            Some(v) => values.push(v),
            None => {
                return Err(Error::InvalidCoordinate {
                    surface: surface.name().to_string(),
                    index,
                })
            }
        }
    }

    Ok(values
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Gross area of a surface
pub fn surface_area(surface: &BuildingSurface) -> Result<f64> {
    surface_vertices(surface).map(|ring| polygon_area(&ring))
}
