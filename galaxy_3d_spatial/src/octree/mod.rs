//! Octree module - adaptive spatial index over bounding regions.
//!
//! Objects live at the shallowest node whose region fully contains them.
//! Structural work is deferred: regions are queued with `enqueue` and
//! absorbed by the next `update`, which also re-homes moved objects and
//! prunes empty branches once their lifespan runs out.

mod octant;
mod octree_config;
mod octree_node;
mod octree;

pub use octant::Octant;
pub use octree_config::{
    OctreeConfig,
    NO_CHILDREN, MIN_BOUNDS, DEFAULT_MAX_LIFESPAN, MAX_LIFESPAN_CEILING,
};
pub use octree_node::{OctreeNode, OctreeNodeKey, NodeState};
pub use octree::Octree;
