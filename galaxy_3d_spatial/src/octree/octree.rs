/// Octree - adaptive spatial index over moving bounding regions.
///
/// Uses single-node placement: each object is stored in exactly one node,
/// the shallowest one that fully contains it at insertion time. Objects that
/// straddle an octant boundary stay in the parent.
///
/// Unlike a static octree, nodes are created lazily (only octants that
/// receive objects get a child) and retired again once they have been empty
/// for `max_lifespan` updates. Regions that frequently re-enter a node double
/// its lifespan up to `lifespan_ceiling`.
///
/// All nodes live in a slot map owned by the tree. Parents store child keys;
/// children store their parent key for the upward search done when a moved
/// object leaves its node.

use slotmap::SlotMap;
use glam::Vec3;
use crate::bounds::{BoundingRegion, BoundKind};
use crate::error::{Error, Result};
use crate::physics::{InstanceKey, InstanceRegistry};
use crate::{engine_bail, engine_debug, engine_trace, engine_warn};
use super::octant::Octant;
use super::octree_config::{OctreeConfig, NO_CHILDREN};
use super::octree_node::{OctreeNode, OctreeNodeKey, NodeState, LIFESPAN_IDLE};

const LOG_SOURCE: &str = "galaxy3d::Octree";

/// Dynamic octree with deferred insertion and lifespan-based pruning.
pub struct Octree {
    /// Arena of all live nodes
    nodes: SlotMap<OctreeNodeKey, OctreeNode>,
    root: OctreeNodeKey,
    config: OctreeConfig,
}

impl Octree {
    /// Create an empty, unbuilt octree over `region` with default tuning.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if `region` is not an AABB.
    pub fn new(region: BoundingRegion) -> Result<Self> {
        Self::with_config(region, OctreeConfig::default())
    }

    /// Create an empty, unbuilt octree over `region`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if `region` is not an AABB or the
    /// configuration is unusable (non-positive bounds or lifespans).
    pub fn with_config(region: BoundingRegion, config: OctreeConfig) -> Result<Self> {
        if region.kind() != BoundKind::Aabb {
            engine_bail!(Error::InvalidRegion, LOG_SOURCE,
                "octree root region must be an AABB, got {:?}", region.kind());
        }
        if !(config.min_bounds > 0.0) || config.initial_lifespan <= 0
            || config.lifespan_ceiling < config.initial_lifespan
        {
            engine_bail!(Error::InvalidRegion, LOG_SOURCE,
                "unusable octree configuration: {:?}", config);
        }

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(OctreeNode::new(
            BoundingRegion::from_aabb(region.bounding_box()),
            Vec::new(),
            None,
            config.initial_lifespan,
        ));

        Ok(Self { nodes, root, config })
    }

    // ===== ACCESSORS =====

    pub fn root(&self) -> OctreeNodeKey {
        self.root
    }

    pub fn root_node(&self) -> &OctreeNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, key: OctreeNodeKey) -> Option<&OctreeNode> {
        self.nodes.get(key)
    }

    /// World region governed by the root
    pub fn region(&self) -> &BoundingRegion {
        &self.nodes[self.root].region
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Whether the initial subdivision has happened
    pub fn is_built(&self) -> bool {
        self.nodes[self.root].tree_built
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Objects held by all nodes (pending regions not included)
    pub fn object_count(&self) -> usize {
        self.nodes.values().map(|node| node.objects.len()).sum()
    }

    pub fn pending_count(&self) -> usize {
        self.nodes[self.root].pending.len()
    }

    /// Number of levels below the root (0 for a lone root)
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, key: OctreeNodeKey) -> usize {
        self.nodes[key]
            .children()
            .map(|child| 1 + self.depth_of(child))
            .max()
            .unwrap_or(0)
    }

    /// Objects held directly by `key` (empty for stale keys)
    pub fn objects(&self, key: OctreeNodeKey) -> &[BoundingRegion] {
        self.nodes.get(key).map(|node| node.objects()).unwrap_or_default()
    }

    /// Child keys of `key` in scan order
    pub fn children(&self, key: OctreeNodeKey) -> Vec<OctreeNodeKey> {
        self.nodes
            .get(key)
            .map(|node| node.children().collect())
            .unwrap_or_default()
    }

    pub fn node_state(&self, key: OctreeNodeKey) -> Option<NodeState> {
        self.nodes.get(key).map(OctreeNode::state)
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (OctreeNodeKey, &OctreeNode)> {
        self.nodes.iter()
    }

    /// Nodes holding a region owned by `owner`
    pub fn locate(&self, owner: InstanceKey) -> Vec<OctreeNodeKey> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.objects.iter().any(|obj| obj.owner() == Some(owner)))
            .map(|(key, _)| key)
            .collect()
    }

    // ===== PENDING QUEUE =====

    /// Queue a region for insertion on the next update.
    ///
    /// No structural change happens here.
    pub fn enqueue(&mut self, region: BoundingRegion) {
        self.nodes[self.root].pending.push_back(region);
    }

    /// Drain the pending queue.
    ///
    /// Owned regions are first re-transformed from their owner, so moves made
    /// while a region was queued are honoured; regions of removed or DEAD
    /// owners are discarded. Before the first build, queued regions become
    /// the root's objects and the tree is built once. Afterwards each region
    /// is inserted on its own. Returns the regions that could not be placed.
    pub fn process_pending(&mut self, instances: &InstanceRegistry) -> Vec<BoundingRegion> {
        let root = self.root;
        let mut dropped = 0usize;
        let queued: Vec<BoundingRegion> = self.nodes[root]
            .pending
            .drain(..)
            .filter_map(|mut obj| {
                let Some(owner) = obj.owner() else {
                    return Some(obj);
                };
                match instances.get(owner) {
                    Some(body) if !body.is_dead() => {
                        obj.transform_with(body);
                        Some(obj)
                    }
                    _ => {
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();
        if dropped > 0 {
            engine_trace!(LOG_SOURCE, "Discarded {} queued region(s) of removed instances", dropped);
        }
        let mut rejected = Vec::new();

        if !self.nodes[root].tree_built {
            let root_region = self.nodes[root].region;
            let (inside, outside): (Vec<_>, Vec<_>) = queued
                .into_iter()
                .partition(|obj| root_region.contains_region(obj));
            rejected.extend(outside);
            self.nodes[root].objects.extend(inside);
            self.build();
        } else {
            for obj in queued {
                if !self.insert(obj) {
                    rejected.push(obj);
                }
            }
        }

        if !rejected.is_empty() {
            engine_warn!(LOG_SOURCE,
                "{} queued region(s) lie outside the octree bounds", rejected.len());
        }
        rejected
    }

    // ===== BUILD =====

    /// Subdivide the root around the objects it currently holds.
    pub fn build(&mut self) {
        self.build_node(self.root);
        engine_debug!(LOG_SOURCE, "Built octree: {} node(s), {} object(s), depth {}",
            self.node_count(), self.object_count(), self.depth());
    }

    fn build_node(&mut self, key: OctreeNodeKey) {
        let min_bounds = self.config.min_bounds;
        let lifespan = self.config.initial_lifespan;

        let node = &mut self.nodes[key];
        node.tree_built = true;
        node.tree_ready = true;

        if node.objects.len() <= 1 || node.below_min_bounds(min_bounds) {
            return;
        }

        // First fully-containing octant wins; straddlers stay here
        let octants = Octant::regions(&node.region);
        let mut lists: [Vec<BoundingRegion>; NO_CHILDREN] = Default::default();
        for obj in std::mem::take(&mut node.objects) {
            match octants.iter().position(|octant| octant.contains_region(&obj)) {
                Some(i) => lists[i].push(obj),
                None => node.objects.push(obj),
            }
        }

        for (i, list) in lists.into_iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let child = self.nodes.insert(OctreeNode::new(octants[i], list, Some(key), lifespan));
            let node = &mut self.nodes[key];
            node.children[i] = Some(child);
            node.active_octants.activate_octant(i);
            self.build_node(child);
        }
    }

    // ===== INSERT =====

    /// Insert a region below the root.
    ///
    /// Returns `false` if the root does not contain it; nothing is stored.
    pub fn insert(&mut self, obj: BoundingRegion) -> bool {
        self.insert_at(self.root, obj)
    }

    /// Insert starting at `key`, delegating upward while `key` does not contain `obj`.
    fn insert_at(&mut self, key: OctreeNodeKey, obj: BoundingRegion) -> bool {
        let node = &self.nodes[key];

        if !node.region.contains_region(&obj) {
            let parent = node.parent;
            return match parent {
                Some(parent) => self.insert_at(parent, obj),
                None => false,
            };
        }

        // Leaf absorption: empty nodes and minimum-size nodes keep the object
        if node.objects.is_empty() || node.below_min_bounds(self.config.min_bounds) {
            self.nodes[key].objects.push(obj);
            return true;
        }

        let octants = Octant::regions(&node.region);
        let Some(i) = octants.iter().position(|octant| octant.contains_region(&obj)) else {
            self.nodes[key].objects.push(obj);
            return true;
        };

        if let Some(child) = node.children[i] {
            return self.insert_at(child, obj);
        }

        let mut child_node = OctreeNode::new(octants[i], vec![obj], Some(key), self.config.initial_lifespan);
        child_node.tree_built = true;
        child_node.tree_ready = true;
        let child = self.nodes.insert(child_node);

        let node = &mut self.nodes[key];
        node.children[i] = Some(child);
        node.active_octants.activate_octant(i);
        true
    }

    // ===== UPDATE =====

    /// Per-frame maintenance.
    ///
    /// Drains the pending queue, then (once built) refreshes moved objects,
    /// prunes expired branches and relocates objects that left their node.
    /// Regions whose owner was removed or flagged DEAD are dropped.
    ///
    /// Returns the regions that could not be placed anywhere in the tree.
    pub fn update(&mut self, instances: &InstanceRegistry) -> Vec<BoundingRegion> {
        let root = &self.nodes[self.root];
        let has_pending = !root.pending.is_empty();

        if !(root.tree_built && root.tree_ready) {
            return if has_pending { self.process_pending(instances) } else { Vec::new() };
        }

        let mut rejected = if has_pending { self.process_pending(instances) } else { Vec::new() };
        self.update_node(self.root, instances, &mut rejected);
        rejected
    }

    fn update_node(
        &mut self,
        key: OctreeNodeKey,
        instances: &InstanceRegistry,
        rejected: &mut Vec<BoundingRegion>,
    ) {
        self.tick_lifespan(key);

        let moved = self.collect_moved(key, instances);

        self.prune_children(key);

        let children: Vec<OctreeNodeKey> = self.nodes[key].children().collect();
        for child in children {
            if self.nodes.contains_key(child) {
                self.update_node(child, instances, rejected);
            }
        }

        for obj in moved {
            let target = self.enclosing_ancestor(key, &obj);
            if !self.insert_at(target, obj) {
                engine_warn!(LOG_SOURCE, "Moved region left the octree bounds: {:?}", obj.bounds());
                rejected.push(obj);
            }
        }
    }

    /// Start, advance or cancel this node's retirement countdown
    fn tick_lifespan(&mut self, key: OctreeNodeKey) {
        let ceiling = self.config.lifespan_ceiling;
        let node = &mut self.nodes[key];

        if node.objects.is_empty() {
            if !node.has_children() {
                if node.current_lifespan == LIFESPAN_IDLE {
                    node.current_lifespan = node.max_lifespan;
                } else if node.current_lifespan > 0 {
                    node.current_lifespan -= 1;
                }
            }
        } else if node.current_lifespan != LIFESPAN_IDLE {
            // Hotspot: objects came back while the countdown was running
            node.max_lifespan = node.max_lifespan.saturating_mul(2).min(ceiling).max(node.max_lifespan);
            node.current_lifespan = LIFESPAN_IDLE;
        }
    }

    /// Remove moved and stale objects from `key`.
    ///
    /// Moved objects are transformed and returned for relocation. Objects whose
    /// owner is gone or DEAD are discarded.
    fn collect_moved(&mut self, key: OctreeNodeKey, instances: &InstanceRegistry) -> Vec<BoundingRegion> {
        let node = &mut self.nodes[key];
        let mut moved = Vec::new();
        let mut dropped = 0usize;

        node.objects.retain_mut(|obj| {
            let Some(owner) = obj.owner() else {
                return true;
            };
            match instances.get(owner) {
                Some(body) if body.is_dead() => {
                    dropped += 1;
                    false
                }
                Some(body) if body.is_moved() => {
                    obj.transform_with(body);
                    moved.push(*obj);
                    false
                }
                Some(_) => true,
                None => {
                    dropped += 1;
                    false
                }
            }
        });

        if dropped > 0 {
            engine_trace!(LOG_SOURCE, "Dropped {} region(s) of removed instances", dropped);
        }
        moved
    }

    /// Detach children whose countdown expired while vacant
    fn prune_children(&mut self, key: OctreeNodeKey) {
        let active: Vec<usize> = self.nodes[key].active_octants.active_indices().collect();

        for i in active {
            let Some(child) = self.nodes[key].children[i] else {
                // Mask bit without a child: repair the mask
                self.nodes[key].active_octants.deactivate_octant(i);
                continue;
            };

            let child_node = &mut self.nodes[child];
            if child_node.current_lifespan != 0 {
                continue;
            }
            if child_node.is_vacant() {
                self.destroy_subtree(child);
                let node = &mut self.nodes[key];
                node.children[i] = None;
                node.active_octants.deactivate_octant(i);
                engine_trace!(LOG_SOURCE, "Pruned expired branch at octant {}", i + 1);
            } else {
                child_node.current_lifespan = LIFESPAN_IDLE;
            }
        }
    }

    /// First node from `key` upward whose region contains `obj` (root as fallback)
    fn enclosing_ancestor(&self, key: OctreeNodeKey, obj: &BoundingRegion) -> OctreeNodeKey {
        let mut current = key;
        while !self.nodes[current].region.contains_region(obj) {
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    // ===== QUERIES =====

    /// Objects whose region intersects `query`
    pub fn query_intersecting(&self, query: &BoundingRegion) -> Vec<&BoundingRegion> {
        let mut results = Vec::new();
        self.collect_intersecting(self.root, query, &mut results);
        results
    }

    fn collect_intersecting<'a>(
        &'a self,
        key: OctreeNodeKey,
        query: &BoundingRegion,
        results: &mut Vec<&'a BoundingRegion>,
    ) {
        let node = &self.nodes[key];
        if !node.region.intersects_with(query) {
            return;
        }
        results.extend(node.objects.iter().filter(|obj| obj.intersects_with(query)));
        for child in node.children() {
            self.collect_intersecting(child, query, results);
        }
    }

    /// Objects whose region contains `point`
    pub fn query_point(&self, point: Vec3) -> Vec<&BoundingRegion> {
        let mut results = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if !node.region.contains_point(point) {
                continue;
            }
            results.extend(node.objects.iter().filter(|obj| obj.contains_point(point)));
            stack.extend(node.children());
        }
        results
    }

    // ===== DESTROY =====

    /// Drop every child, object and queued region, returning to the unbuilt state.
    pub fn destroy(&mut self) {
        let root = self.root;
        let children: Vec<OctreeNodeKey> = self.nodes[root].children().collect();
        for child in children {
            self.destroy_subtree(child);
        }

        let node = &mut self.nodes[root];
        node.children = [None; NO_CHILDREN];
        node.active_octants = Default::default();
        node.objects.clear();
        node.pending.clear();
        node.tree_built = false;
        node.tree_ready = false;
        node.max_lifespan = self.config.initial_lifespan;
        node.current_lifespan = LIFESPAN_IDLE;
    }

    /// Remove `key` and all of its descendants from the arena
    fn destroy_subtree(&mut self, key: OctreeNodeKey) {
        if let Some(node) = self.nodes.remove(key) {
            for child in node.children.into_iter().flatten() {
                self.destroy_subtree(child);
            }
        }
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
