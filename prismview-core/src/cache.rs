//! Single-slot memoization of generated meshes
use crate::geometry::Mesh;
use crate::prism::generate_mesh;

/// Remembers the mesh for the last requested identifier.
///
/// A request for a different identifier regenerates and replaces the slot;
/// there is never more than one mesh held.
#[derive(Debug, Default)]
pub struct MeshCache {
    slot: Option<(String, Mesh)>,
    generations: u64,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&mut self, id: &str) -> &Mesh {
        if !matches!(&self.slot, Some((key, _)) if key == id) {
            self.slot = None;
        }

        let (_, mesh) = self.slot.get_or_insert_with(|| {
            let mesh = generate_mesh(id);
            self.generations += 1;
            tracing::debug!(
                id,
                triangles = mesh.triangle_count(),
                generation = self.generations,
                "regenerated prism mesh"
            );
            (id.to_string(), mesh)
        });
        mesh
    }

    /// Identifier currently cached, if any.
    pub fn key(&self) -> Option<&str> {
        self.slot.as_ref().map(|(key, _)| key.as_str())
    }

    /// How many meshes have been built so far.
    pub fn generation_count(&self) -> u64 {
        self.generations
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
