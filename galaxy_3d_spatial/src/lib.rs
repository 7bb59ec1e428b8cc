/*!
# Galaxy 3D Spatial

Adaptive octree spatial index for the Galaxy 3D engine.

Rigid-body instances are indexed through the world-space bounding regions of
their model's meshes. Structural changes are deferred: new regions are queued
and absorbed by a single per-frame `step()`, which also re-homes moved
instances and prunes branches that have stayed empty for their lifespan.

## Architecture

- **BoundingRegion**: AABB or sphere, template plus world-space copy
- **Octree**: arena of nodes with lazy children and lifespan-based pruning
- **InstanceRegistry**: rigid bodies addressed by key or string id
- **SpatialIndex**: models, instances and octree behind one façade
- **Engine**: global singletons (spatial index, logger)
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod states;
pub mod bounds;
pub mod physics;
pub mod octree;
pub mod scene;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Bit flag sub-module
    pub mod states {
        pub use crate::states::*;
    }

    // Bounding volume sub-module
    pub mod bounds {
        pub use crate::bounds::*;
    }

    // Rigid body sub-module
    pub mod physics {
        pub use crate::physics::*;
    }

    // Octree sub-module
    pub mod octree {
        pub use crate::octree::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
