// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon measures

use crate::Point3;
use nalgebra::Vector3;
use smallvec::SmallVec;

/// Vertex ring of one surface; most surfaces have four corners
pub type VertexRing = SmallVec<[Point3<f64>; 8]>;

/// Area of a planar polygon in 3-D
///
/// Half the magnitude of the summed cross products of consecutive vertices,
/// wrapping around. Independent of winding direction and of the polygon's
/// position relative to the origin. Fewer than three vertices give 0.0.
/// Planarity is not checked.
pub fn polygon_area(vertices: &[Point3<f64>]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = Vector3::zeros();
    for i in 0..n {
        let a = &vertices[i].coords;
        let b = &vertices[(i + 1) % n].coords;
        sum += a.cross(b);
    }

    0.5 * sum.norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn test_square_area() {
        assert_relative_eq!(polygon_area(&square()), 100.0);
    }

    #[test]
    fn test_reversed_winding_same_area() {
        let mut reversed = square();
        reversed.reverse();
        assert_relative_eq!(polygon_area(&reversed), 100.0);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(
            polygon_area(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]),
            0.0
        );
    }

    #[test]
    fn test_vertical_wall_offset_from_origin() {
        // 10 m x 3 m wall in the y = 5 plane
        let wall = [
            Point3::new(0.0, 5.0, 3.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(10.0, 5.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
        ];
        assert_relative_eq!(polygon_area(&wall), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangle() {
        let tri = [
            Point3::new(1.0, 1.0, 2.0),
            Point3::new(5.0, 1.0, 2.0),
            Point3::new(1.0, 4.0, 2.0),
        ];
        assert_relative_eq!(polygon_area(&tri), 6.0, epsilon = 1e-12);
    }
}
