//! Indexed triangle meshes for the prism solids
use nalgebra::{Point3, Vector3};
use std::collections::{BTreeSet, HashMap};

/// Quantization used when comparing vertex positions for equality.
const POSITION_QUANTUM: f32 = 1e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A contiguous run of triangles that together form one planar polygon face
/// of the solid (a cap or a side quad).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGroup {
    pub start: usize,
    pub count: usize,
}

/// A closed triangulated surface.
///
/// Vertices are shared between the polygon faces that meet at them, so an
/// edge between two faces is the same index pair in both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub triangles: Vec<[u32; 3]>,
    pub groups: Vec<FaceGroup>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            groups: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, position: Point3<f32>) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Add a convex planar polygon face, fan-triangulated from its first corner.
    ///
    /// Corners must be given counter-clockwise as seen from outside the solid.
    pub fn add_face(&mut self, corners: &[u32]) {
        if corners.len() < 3 {
            return;
        }
        let start = self.triangles.len();
        for i in 1..corners.len() - 1 {
            self.triangles.push([corners[0], corners[i], corners[i + 1]]);
        }
        self.groups.push(FaceGroup {
            start,
            count: corners.len() - 2,
        });
    }

    /// A centered `width × height × depth` box along X, Y and Z.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(8, 12);

        // Corner i has +x when bit 0 is set, +y for bit 1, +z for bit 2
        for i in 0..8u32 {
            mesh.add_vertex(Point3::new(
                if i & 1 != 0 { hw } else { -hw },
                if i & 2 != 0 { hh } else { -hh },
                if i & 4 != 0 { hd } else { -hd },
            ));
        }

        mesh.add_face(&[1, 3, 7, 5]); // +X
        mesh.add_face(&[0, 4, 6, 2]); // -X
        mesh.add_face(&[2, 6, 7, 3]); // +Y
        mesh.add_face(&[0, 1, 5, 4]); // -Y
        mesh.add_face(&[4, 5, 7, 6]); // +Z
        mesh.add_face(&[0, 2, 3, 1]); // -Z

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Point3<f32>; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Unit normal of triangle `index`; zero for degenerate triangles.
    pub fn triangle_normal(&self, index: usize) -> Vector3<f32> {
        let [v0, v1, v2] = self.triangle(index);
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1
            .cross(&edge2)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some(Aabb { min, max })
    }

    /// Number of planar polygon faces (caps and sides), not triangles.
    pub fn polygon_face_count(&self) -> usize {
        self.groups.len()
    }

    /// Unique edges of the polygon faces. Triangulation diagonals, which are
    /// interior to a face, are excluded.
    pub fn polygon_edges(&self) -> BTreeSet<(u32, u32)> {
        let mut edges = BTreeSet::new();

        for group in &self.groups {
            let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
            for triangle in &self.triangles[group.start..group.start + group.count] {
                for k in 0..3 {
                    let (a, b) = (triangle[k], triangle[(k + 1) % 3]);
                    *uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
                }
            }
            edges.extend(
                uses.into_iter()
                    .filter(|(_, count)| *count == 1)
                    .map(|(edge, _)| edge),
            );
        }

        edges
    }

    /// Number of geometrically distinct vertex positions.
    pub fn distinct_vertex_count(&self) -> usize {
        self.positions
            .iter()
            .map(quantize)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// V - E + F measured on the mesh itself.
    pub fn euler_characteristic(&self) -> i64 {
        self.distinct_vertex_count() as i64 - self.polygon_edges().len() as i64
            + self.polygon_face_count() as i64
    }

    /// Enclosed volume; positive when every face winds outward.
    pub fn signed_volume(&self) -> f32 {
        (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<f32>()
            / 6.0
    }

    /// Positions as a flat `[x, y, z, ...]` buffer.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Triangle indices as a flat buffer.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// True when both meshes have the same topology and every position agrees
    /// within `epsilon`.
    pub fn is_congruent(&self, other: &Mesh, epsilon: f32) -> bool {
        self.triangles == other.triangles
            && self.groups == other.groups
            && self.positions.len() == other.positions.len()
            && self
                .positions
                .iter()
                .zip(&other.positions)
                .all(|(a, b)| (a - b).norm() <= epsilon)
    }
}

fn quantize(p: &Point3<f32>) -> (i64, i64, i64) {
    (
        (p.x / POSITION_QUANTUM).round() as i64,
        (p.y / POSITION_QUANTUM).round() as i64,
        (p.z / POSITION_QUANTUM).round() as i64,
    )
}
