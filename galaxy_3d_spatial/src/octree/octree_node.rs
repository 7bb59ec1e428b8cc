/// A single node of the octree.
///
/// Nodes live in the octree's arena. A node refers to its children by key
/// (the octree owns them) and to its parent by a non-owning key.

use std::collections::VecDeque;
use slotmap::new_key_type;
use crate::bounds::BoundingRegion;
use crate::states::ActiveOctants;
use super::octree_config::NO_CHILDREN;

new_key_type! {
    /// Stable key for a node within an Octree.
    pub struct OctreeNodeKey;
}

/// Lifespan sentinel: countdown not started
pub(crate) const LIFESPAN_IDLE: i16 = -1;

/// Lifecycle state derived from a node's flags and contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not built, nothing queued
    EmptyUnbuilt,
    /// Not built, regions waiting in the pending queue
    Draining,
    /// Built, no children
    BuiltLeaf,
    /// Built, at least one child
    BuiltInternal,
}

/// Octree node: a region, the objects it holds directly, and up to eight children.
#[derive(Debug)]
pub struct OctreeNode {
    /// Volume governed by this node
    pub(crate) region: BoundingRegion,
    /// Objects held here (straddlers, or leaf contents)
    pub(crate) objects: Vec<BoundingRegion>,
    /// Regions awaiting insertion on the next update
    pub(crate) pending: VecDeque<BoundingRegion>,
    /// One slot per octant, in scan order
    pub(crate) children: [Option<OctreeNodeKey>; NO_CHILDREN],
    /// Bit per non-empty child slot
    pub(crate) active_octants: ActiveOctants,
    /// None at the root
    pub(crate) parent: Option<OctreeNodeKey>,
    pub(crate) tree_built: bool,
    pub(crate) tree_ready: bool,
    pub(crate) max_lifespan: i16,
    /// `LIFESPAN_IDLE` until the node is first seen empty
    pub(crate) current_lifespan: i16,
}

impl OctreeNode {
    pub(crate) fn new(
        region: BoundingRegion,
        objects: Vec<BoundingRegion>,
        parent: Option<OctreeNodeKey>,
        max_lifespan: i16,
    ) -> Self {
        Self {
            region,
            objects,
            pending: VecDeque::new(),
            children: [None; NO_CHILDREN],
            active_octants: ActiveOctants::empty(),
            parent,
            tree_built: false,
            tree_ready: false,
            max_lifespan,
            current_lifespan: LIFESPAN_IDLE,
        }
    }

    // ===== ACCESSORS =====

    pub fn region(&self) -> &BoundingRegion {
        &self.region
    }

    pub fn objects(&self) -> &[BoundingRegion] {
        &self.objects
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn parent(&self) -> Option<OctreeNodeKey> {
        self.parent
    }

    pub fn child(&self, index: usize) -> Option<OctreeNodeKey> {
        self.children.get(index).copied().flatten()
    }

    /// Keys of the existing children, in scan order
    pub fn children(&self) -> impl Iterator<Item = OctreeNodeKey> + '_ {
        self.active_octants
            .active_indices()
            .filter_map(move |i| self.children[i])
    }

    pub fn active_octants(&self) -> ActiveOctants {
        self.active_octants
    }

    pub fn has_children(&self) -> bool {
        !self.active_octants.is_empty()
    }

    pub fn is_built(&self) -> bool {
        self.tree_built
    }

    pub fn is_ready(&self) -> bool {
        self.tree_ready
    }

    pub fn max_lifespan(&self) -> i16 {
        self.max_lifespan
    }

    /// Remaining countdown, or `None` if it has not started
    pub fn current_lifespan(&self) -> Option<i16> {
        (self.current_lifespan != LIFESPAN_IDLE).then_some(self.current_lifespan)
    }

    pub fn state(&self) -> NodeState {
        match (self.tree_built, self.has_children()) {
            (false, _) if self.pending.is_empty() => NodeState::EmptyUnbuilt,
            (false, _) => NodeState::Draining,
            (true, false) => NodeState::BuiltLeaf,
            (true, true) => NodeState::BuiltInternal,
        }
    }

    /// Whether any dimension is under `min_bounds`
    pub(crate) fn below_min_bounds(&self, min_bounds: f32) -> bool {
        self.region.calculate_dimensions().min_element() < min_bounds
    }

    /// Empty and childless
    pub(crate) fn is_vacant(&self) -> bool {
        self.objects.is_empty() && !self.has_children()
    }
}
