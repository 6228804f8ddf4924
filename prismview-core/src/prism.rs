//! Prism mesh generator
//!
//! Maps a prism-type identifier to a closed triangulated right prism. The five
//! catalog kinds form a closed set, each providing its own cross-section;
//! anything outside the set falls back to the rectangular cuboid.
use std::fmt;
use std::str::FromStr;

use crate::catalog::{self, PrismTypeDescriptor};
use crate::error::PrismError;
use crate::extrude::extrude;
use crate::geometry::Mesh;
use crate::section::CrossSection;

/// Extrusion depth shared by every prism.
pub const PRISM_DEPTH: f32 = 3.0;
/// Circumradius of the regular polygon cross-sections.
pub const POLYGON_RADIUS: f32 = 1.5;
/// Width and height of the rectangular cross-section.
pub const CUBOID_SIDE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrismKind {
    Triangular,
    #[default]
    Rectangular,
    Pentagonal,
    Hexagonal,
    Octagonal,
}

impl PrismKind {
    /// Catalog order.
    pub const ALL: [PrismKind; 5] = [
        PrismKind::Triangular,
        PrismKind::Rectangular,
        PrismKind::Pentagonal,
        PrismKind::Hexagonal,
        PrismKind::Octagonal,
    ];

    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn descriptor(self) -> &'static PrismTypeDescriptor {
        match self {
            PrismKind::Triangular => &catalog::TRIANGULAR,
            PrismKind::Rectangular => &catalog::RECTANGULAR,
            PrismKind::Pentagonal => &catalog::PENTAGONAL,
            PrismKind::Hexagonal => &catalog::HEXAGONAL,
            PrismKind::Octagonal => &catalog::OCTAGONAL,
        }
    }

    /// Number of sides of the cross-section.
    pub fn sides(self) -> usize {
        match self {
            PrismKind::Triangular => 3,
            PrismKind::Rectangular => 4,
            PrismKind::Pentagonal => 5,
            PrismKind::Hexagonal => 6,
            PrismKind::Octagonal => 8,
        }
    }

    /// Resolve an identifier, falling back to [`PrismKind::Rectangular`].
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| {
            tracing::debug!(id, "unknown prism type, falling back to rectangular");
            PrismKind::default()
        })
    }

    /// The closed outline swept to build this prism.
    pub fn cross_section(self) -> CrossSection {
        match self {
            // Isosceles, not inscribed in the polygon circle
            PrismKind::Triangular => CrossSection::new()
                .move_to(-1.0, -1.0)
                .line_to(1.0, -1.0)
                .line_to(0.0, 1.0)
                .close(),
            PrismKind::Rectangular => {
                let half = CUBOID_SIDE / 2.0;
                CrossSection::new()
                    .move_to(-half, -half)
                    .line_to(half, -half)
                    .line_to(half, half)
                    .line_to(-half, half)
                    .close()
            }
            PrismKind::Pentagonal | PrismKind::Hexagonal | PrismKind::Octagonal => {
                CrossSection::regular(self.sides(), POLYGON_RADIUS)
            }
        }
    }

    pub fn build_mesh(self) -> Mesh {
        match self {
            // Centered on all three axes, unlike the extruded kinds
            PrismKind::Rectangular => Mesh::cuboid(CUBOID_SIDE, CUBOID_SIDE, PRISM_DEPTH),
            _ => extrude(&self.cross_section(), PRISM_DEPTH),
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }
}

impl FromStr for PrismKind {
    type Err = PrismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| PrismError::UnknownPrism(s.to_string()))
    }
}

impl fmt::Display for PrismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Build the mesh for a prism identifier. Unknown identifiers silently yield
/// the rectangular cuboid.
pub fn generate_mesh(id: &str) -> Mesh {
    PrismKind::from_id_or_default(id).build_mesh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_round_trip_ids() {
        for descriptor in &catalog::PRISM_TYPES {
            let kind: PrismKind = descriptor.id.parse().unwrap();
            assert_eq!(kind.descriptor(), descriptor);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "Hexagonal".parse::<PrismKind>(),
            Err(PrismError::UnknownPrism("Hexagonal".to_string()))
        );
    }

    #[test]
    fn test_fallback_is_rectangular() {
        assert_eq!(PrismKind::from_id_or_default("nope"), PrismKind::Rectangular);
        assert_eq!(PrismKind::from_id_or_default(""), PrismKind::Rectangular);
        assert_eq!(PrismKind::from_id_or_default("octagonal"), PrismKind::Octagonal);
    }

    #[test]
    fn test_all_matches_catalog_order() {
        for (kind, descriptor) in PrismKind::ALL.iter().zip(&catalog::PRISM_TYPES) {
            assert_eq!(kind.id(), descriptor.id);
        }
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(PrismKind::Octagonal.next(), PrismKind::Triangular);
        assert_eq!(PrismKind::Triangular.previous(), PrismKind::Octagonal);
        assert_eq!(PrismKind::Rectangular.next(), PrismKind::Pentagonal);
    }

    #[test]
    fn test_triangular_section_is_the_explicit_triangle() {
        let section = PrismKind::Triangular.cross_section();
        let corners: Vec<(f32, f32)> = section.perimeter().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(corners, vec![(-1.0, -1.0), (1.0, -1.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_octagonal_section() {
        let section = PrismKind::Octagonal.cross_section();
        assert!(section.is_closed());
        assert_eq!(section.perimeter().len(), 8);
        let centroid = section.centroid().unwrap();
        for corner in section.perimeter() {
            assert_relative_eq!((corner - centroid).norm(), 1.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_mesh_topology_matches_catalog() {
        for kind in PrismKind::ALL {
            let mesh = kind.build_mesh();
            let descriptor = kind.descriptor();
            assert_eq!(mesh.polygon_face_count() as u32, descriptor.faces, "{kind}");
            assert_eq!(mesh.polygon_edges().len() as u32, descriptor.edges, "{kind}");
            assert_eq!(mesh.distinct_vertex_count() as u32, descriptor.vertices, "{kind}");
            assert!(mesh.signed_volume() > 0.0, "{kind}");
        }
    }

    #[test]
    fn test_extruded_kinds_span_depth_from_zero() {
        let bounds = generate_mesh("pentagonal").bounding_box().unwrap();
        assert_relative_eq!(bounds.min.z, 0.0);
        assert_relative_eq!(bounds.max.z, PRISM_DEPTH);
    }

    #[test]
    fn test_rectangular_section_matches_cuboid_footprint() {
        let section = PrismKind::Rectangular.cross_section();
        assert_eq!(section.perimeter().len(), 4);
        assert_relative_eq!(section.signed_area(), CUBOID_SIDE * CUBOID_SIDE);

        let bounds = PrismKind::Rectangular.build_mesh().bounding_box().unwrap();
        for point in section.perimeter() {
            assert!(point.x >= bounds.min.x && point.x <= bounds.max.x);
            assert!(point.y >= bounds.min.y && point.y <= bounds.max.y);
        }
        let xs = section.perimeter().iter().map(|p| p.x);
        assert_relative_eq!(xs.clone().fold(f32::INFINITY, f32::min), bounds.min.x);
        assert_relative_eq!(xs.fold(f32::NEG_INFINITY, f32::max), bounds.max.x);
    }
}
