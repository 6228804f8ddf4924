//! Prismview Core Library - Shared geometry and viewer logic
//!
//! This library provides the stateless core functionality for the prism viewer:
//! the prism catalog, cross-section construction and extrusion, the viewer state
//! reducer, mesh memoization, rotation, camera/orbit controls and the scene
//! description consumed by the rendering hosts.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod extrude;
pub mod geometry;
pub mod material;
pub mod prism;
pub mod projection;
pub mod scene;
pub mod section;
pub mod state;
pub mod transform;

// Re-export commonly used types
pub use cache::MeshCache;
pub use catalog::{PrismTypeDescriptor, PRISM_TYPES};
pub use error::{PrismError, Result};
pub use geometry::{Aabb, FaceGroup, Mesh};
pub use material::{Material, Rgb};
pub use prism::{generate_mesh, PrismKind};
pub use projection::{Camera, OrbitControls};
pub use scene::{Grid, Lighting, SceneConfig};
pub use section::CrossSection;
pub use state::{ViewerAction, ViewerState};
pub use transform::{RotationClock, RotationState, Transform};
