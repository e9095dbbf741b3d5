//! # Meshing Module
//!
//! Mesh generation for segments: the face emitter that accumulates quads
//! and the two-pass segment mesher that drives it.
//!
//! The mesher emits one quad per visible block face; suppression is purely
//! per-face (air neighbors, MERGE materials, the chunk edge policies). There
//! is no greedy merging, lighting, or level-of-detail here.

pub mod emitter;
pub mod mesher;

pub use emitter::{BuiltMesh, FaceEmitter};
pub use mesher::{mesh_segment, MeshTimings};
