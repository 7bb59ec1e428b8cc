/// Octree tuning constants and their runtime bundle.

/// Children per node
pub const NO_CHILDREN: usize = 8;

/// Nodes with any dimension below this stop subdividing (world units)
pub const MIN_BOUNDS: f32 = 0.5;

/// Countdown a fresh empty leaf starts from
pub const DEFAULT_MAX_LIFESPAN: i16 = 8;

/// Upper limit reached by repeated hotspot extensions
pub const MAX_LIFESPAN_CEILING: i16 = 64;

/// Tuning values shared by every node of one octree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// Minimum node dimension before subdivision stops
    pub min_bounds: f32,
    /// Starting `max_lifespan` of every new node
    pub initial_lifespan: i16,
    /// Ceiling applied when a hotspot doubles its lifespan
    pub lifespan_ceiling: i16,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            min_bounds: MIN_BOUNDS,
            initial_lifespan: DEFAULT_MAX_LIFESPAN,
            lifespan_ceiling: MAX_LIFESPAN_CEILING,
        }
    }
}
