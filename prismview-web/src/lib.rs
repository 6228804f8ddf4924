//! Prismview Web - WASM surface for browser rendering hosts
//!
//! The browser owns the canvas, lights and orbit controls; this crate owns the
//! viewer state, mesh generation and the rendering attributes. A host loop
//! typically looks like:
//!
//! ```text
//! const viewer = new WebViewer();
//! viewer.select("hexagonal");
//! requestAnimationFrame(function frame(t) {
//!     viewer.tick(dt);
//!     const mesh = viewer.mesh();      // positions + indices
//!     // upload buffers, apply viewer.rotation_x()/rotation_y()
//!     requestAnimationFrame(frame);
//! });
//! ```

use prismview_core::{
    MeshCache, RotationClock, RotationState, SceneConfig, ViewerAction, ViewerState, PRISM_TYPES,
};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console.
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Mesh buffers handed to the host for upload.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the vertex buffer as a Float32Array.
    pub fn vertices(&self) -> Vec<f32> {
        self.vertices.clone()
    }

    /// Returns the index buffer as a Uint32Array.
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    state: ViewerState,
    meshes: MeshCache,
    rotation: RotationState,
    clock: RotationClock,
}

impl Default for WebViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebViewer {
        WebViewer {
            state: ViewerState::default(),
            meshes: MeshCache::new(),
            rotation: RotationState::zero(),
            clock: RotationClock::default(),
        }
    }

    /// Select a prism by identifier; unknown identifiers select the cuboid.
    pub fn select(&mut self, id: &str) {
        self.dispatch(ViewerAction::Select(id.to_string()));
    }

    pub fn select_next(&mut self) {
        self.dispatch(ViewerAction::SelectNext);
    }

    pub fn select_previous(&mut self) {
        self.dispatch(ViewerAction::SelectPrevious);
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.dispatch(ViewerAction::SetWireframe(wireframe));
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.dispatch(ViewerAction::SetAutoRotate(auto_rotate));
    }

    pub fn set_show_stats(&mut self, show_stats: bool) {
        self.dispatch(ViewerAction::SetShowStats(show_stats));
    }

    /// Switch between `per-frame` and `elapsed` auto-rotation.
    pub fn set_rotation_clock(&mut self, name: &str) -> Result<(), JsValue> {
        self.clock = name
            .parse()
            .map_err(|err: prismview_core::PrismError| JsValue::from_str(&err.to_string()))?;
        Ok(())
    }

    pub fn selected_prism(&self) -> String {
        self.state.selected_prism.clone()
    }

    pub fn wireframe(&self) -> bool {
        self.state.wireframe
    }

    pub fn auto_rotate(&self) -> bool {
        self.state.auto_rotate
    }

    pub fn show_stats(&self) -> bool {
        self.state.show_stats
    }

    /// Advance one rendered frame; `dt_seconds` only matters for the
    /// `elapsed` clock.
    pub fn tick(&mut self, dt_seconds: f32) {
        if self.state.auto_rotate {
            let elapsed = Duration::try_from_secs_f32(dt_seconds).unwrap_or_default();
            self.rotation.advance(self.clock, elapsed);
        }
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation.x
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation.y
    }

    /// Current mesh; regenerated only when the selection changed.
    pub fn mesh(&mut self) -> MeshHandle {
        let mesh = self.meshes.get_or_generate(&self.state.selected_prism);
        MeshHandle {
            vertices: mesh.flat_positions(),
            indices: mesh.flat_indices(),
        }
    }

    /// Material color as `#rrggbb`.
    pub fn material_color(&self) -> String {
        self.state.material().color.to_hex_string()
    }

    pub fn material_opacity(&self) -> f32 {
        self.state.material().opacity
    }

    pub fn material_transparent(&self) -> bool {
        self.state.material().transparent
    }

    /// The five catalog records as a JSON array.
    pub fn catalog_json(&self) -> Result<String, JsValue> {
        to_json(&PRISM_TYPES)
    }

    /// Descriptor of the selected prism plus its Euler characteristic, or
    /// `null` when statistics are hidden.
    pub fn stats_json(&self) -> Result<String, JsValue> {
        if !self.state.show_stats {
            return Ok("null".to_string());
        }
        let descriptor = self.state.descriptor();
        to_json(&serde_json::json!({
            "id": descriptor.id,
            "faces": descriptor.faces,
            "edges": descriptor.edges,
            "vertices": descriptor.vertices,
            "eulerCharacteristic": descriptor.euler_characteristic(),
        }))
    }

    /// Camera, orbit limits, lights and grid the host should set up.
    pub fn scene_json(&self) -> Result<String, JsValue> {
        to_json(&SceneConfig::default())
    }

    /// Full viewer state as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(&self.state)
    }
}

impl WebViewer {
    fn dispatch(&mut self, action: ViewerAction) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_mesh() {
        let mut viewer = WebViewer::new();
        viewer.select("triangular");
        let mesh = viewer.mesh();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_unknown_selection_falls_back() {
        let mut viewer = WebViewer::new();
        viewer.select("sphere");
        assert_eq!(viewer.selected_prism(), "rectangular");
        assert_eq!(viewer.mesh().triangle_count(), 12);
    }

    #[test]
    fn test_material_follows_wireframe() {
        let mut viewer = WebViewer::new();
        assert_eq!(viewer.material_color(), "#d4d4d4");
        assert!(viewer.material_transparent());
        viewer.set_wireframe(true);
        assert_eq!(viewer.material_color(), "#000000");
        assert_eq!(viewer.material_opacity(), 1.0);
    }

    #[test]
    fn test_tick_respects_auto_rotate() {
        let mut viewer = WebViewer::new();
        viewer.tick(0.016);
        assert!(viewer.rotation_y() > 0.0);

        let y = viewer.rotation_y();
        viewer.set_auto_rotate(false);
        viewer.tick(0.016);
        assert_eq!(viewer.rotation_y(), y);
    }

    #[test]
    fn test_elapsed_clock_uses_dt() {
        let mut viewer = WebViewer::new();
        viewer.set_rotation_clock("elapsed").unwrap();
        viewer.tick(0.5);
        assert!((viewer.rotation_y() - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_stats_json() {
        let mut viewer = WebViewer::new();
        viewer.select("hexagonal");
        let stats: serde_json::Value = serde_json::from_str(&viewer.stats_json().unwrap()).unwrap();
        assert_eq!(stats["faces"], 8);
        assert_eq!(stats["eulerCharacteristic"], 2);

        viewer.set_show_stats(false);
        assert_eq!(viewer.stats_json().unwrap(), "null");
    }

    #[test]
    fn test_catalog_json_lists_all_entries() {
        let viewer = WebViewer::new();
        let catalog: serde_json::Value =
            serde_json::from_str(&viewer.catalog_json().unwrap()).unwrap();
        assert_eq!(catalog.as_array().map(Vec::len), Some(5));
        assert_eq!(catalog[0]["id"], "triangular");
    }
}
