//! Linear extrusion of a closed cross-section into a right prism
use nalgebra::Point3;

use crate::geometry::Mesh;
use crate::section::CrossSection;

/// Sweep `section` along +Z from `z = 0` to `z = depth`, without bevel.
///
/// The result has a back cap at `z = 0`, a front cap at `z = depth` and one
/// quad per outline edge, every face wound outward. Caps are fan-triangulated,
/// which is valid for the convex outlines of the catalog.
pub fn extrude(section: &CrossSection, depth: f32) -> Mesh {
    let mut corners = section.perimeter().to_vec();
    if corners.len() < 3 {
        tracing::warn!(
            corners = corners.len(),
            "cross-section has fewer than three corners, nothing to extrude"
        );
        return Mesh::new();
    }
    if section.signed_area() < 0.0 {
        corners.reverse();
    }

    let n = corners.len();
    let mut mesh = Mesh::with_capacity(2 * n, 2 * (n - 2) + 2 * n);

    for corner in &corners {
        mesh.add_vertex(Point3::new(corner.x, corner.y, 0.0));
    }
    for corner in &corners {
        mesh.add_vertex(Point3::new(corner.x, corner.y, depth));
    }

    let back: Vec<u32> = (0..n as u32).rev().collect();
    let front: Vec<u32> = (n as u32..2 * n as u32).collect();
    mesh.add_face(&back);
    mesh.add_face(&front);

    for i in 0..n as u32 {
        let j = (i + 1) % n as u32;
        let (back_i, back_j) = (i, j);
        let (front_i, front_j) = (i + n as u32, j + n as u32);
        mesh.add_face(&[back_i, back_j, front_j, front_i]);
    }

    mesh
}
