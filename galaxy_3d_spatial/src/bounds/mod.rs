//! Bounds module - bounding regions used by the octree.
//!
//! Provides axis-aligned boxes and spheres with containment and
//! intersection tests, and instance-relative transforms.

mod bounding_region;

pub use bounding_region::{BoundingRegion, BoundKind, Bounds, AABB, Sphere};
