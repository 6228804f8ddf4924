//! Static catalog of the prism types the viewer knows about
use serde::Serialize;

/// Display record for one prism type.
///
/// The topological counts are precomputed and shown to the user as-is; they
/// are not derived from the generated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrismTypeDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub faces: u32,
    pub edges: u32,
    pub vertices: u32,
}

impl PrismTypeDescriptor {
    /// V - E + F
    pub fn euler_characteristic(&self) -> i32 {
        self.vertices as i32 - self.edges as i32 + self.faces as i32
    }

    /// Rows of the "Geometric Properties" panel, in display order.
    pub fn properties(&self) -> [(&'static str, i32); 4] {
        [
            ("Faces", self.faces as i32),
            ("Edges", self.edges as i32),
            ("Vertices", self.vertices as i32),
            ("Euler Characteristic", self.euler_characteristic()),
        ]
    }
}

pub const TRIANGULAR: PrismTypeDescriptor = PrismTypeDescriptor {
    id: "triangular",
    name: "Triangular Prism",
    description: "A prism with triangular cross-section",
    faces: 5,
    edges: 9,
    vertices: 6,
};

pub const RECTANGULAR: PrismTypeDescriptor = PrismTypeDescriptor {
    id: "rectangular",
    name: "Rectangular Prism",
    description: "A prism with rectangular cross-section (cuboid)",
    faces: 6,
    edges: 12,
    vertices: 8,
};

pub const PENTAGONAL: PrismTypeDescriptor = PrismTypeDescriptor {
    id: "pentagonal",
    name: "Pentagonal Prism",
    description: "A prism with pentagonal cross-section",
    faces: 7,
    edges: 15,
    vertices: 10,
};

pub const HEXAGONAL: PrismTypeDescriptor = PrismTypeDescriptor {
    id: "hexagonal",
    name: "Hexagonal Prism",
    description: "A prism with hexagonal cross-section",
    faces: 8,
    edges: 18,
    vertices: 12,
};

pub const OCTAGONAL: PrismTypeDescriptor = PrismTypeDescriptor {
    id: "octagonal",
    name: "Octagonal Prism",
    description: "A prism with octagonal cross-section",
    faces: 10,
    edges: 24,
    vertices: 16,
};

/// All catalog entries in declaration order.
pub const PRISM_TYPES: [PrismTypeDescriptor; 5] =
    [TRIANGULAR, RECTANGULAR, PENTAGONAL, HEXAGONAL, OCTAGONAL];

/// Look up a descriptor by identifier.
pub fn find(id: &str) -> Option<&'static PrismTypeDescriptor> {
    PRISM_TYPES.iter().find(|descriptor| descriptor.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_characteristic_holds_for_catalog() {
        for descriptor in &PRISM_TYPES {
            assert_eq!(
                descriptor.euler_characteristic(),
                2,
                "{} violates V - E + F = 2",
                descriptor.id
            );
        }
    }

    #[test]
    fn test_hexagonal_lookup() {
        let hexagonal = find("hexagonal").unwrap();
        assert_eq!(hexagonal.faces, 8);
        assert_eq!(hexagonal.edges, 18);
        assert_eq!(hexagonal.vertices, 12);
        assert_eq!(hexagonal.euler_characteristic(), 12 - 18 + 8);
    }

    #[test]
    fn test_identifiers_are_unique() {
        for (i, a) in PRISM_TYPES.iter().enumerate() {
            for b in &PRISM_TYPES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_unknown_lookup() {
        assert!(find("dodecahedral").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_properties_rows() {
        let rows = TRIANGULAR.properties();
        assert_eq!(rows[0], ("Faces", 5));
        assert_eq!(rows[3], ("Euler Characteristic", 2));
    }
}
