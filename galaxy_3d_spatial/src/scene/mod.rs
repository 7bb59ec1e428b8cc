//! Scene module
//!
//! Provides models (per-mesh template bounding regions) and the
//! `SpatialIndex` façade that instantiates them into the octree.

mod model;
mod spatial_index;

pub use model::Model;
pub use spatial_index::SpatialIndex;
