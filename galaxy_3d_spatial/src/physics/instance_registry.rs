/// Registry owning every rigid-body instance.
///
/// Bounding regions refer to their owner through an `InstanceKey`. The key
/// is non-owning: once the instance is removed, lookups return `None` and
/// the region stops tracking it.

use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use super::rigid_body::RigidBody;

new_key_type! {
    /// Stable key for a RigidBody within an InstanceRegistry.
    pub struct InstanceKey;
}

/// Owner of all rigid-body instances, addressable by key or string id.
#[derive(Default)]
pub struct InstanceRegistry {
    instances: SlotMap<InstanceKey, RigidBody>,
    /// String id → key
    ids: FxHashMap<String, InstanceKey>,
    /// Counter backing `generate_id`
    next_id: u64,
    /// Instances flagged DEAD, removed by `clear_dead_instances`
    to_delete: Vec<InstanceKey>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequential instance id (zero-padded to 8 digits)
    fn generate_id(&mut self) -> String {
        let id = format!("{:08}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Create and register an instance of `model_id`.
    ///
    /// The new body starts without the MOVED flag; its regions are placed
    /// through the pending queue, not through relocation.
    pub fn generate_instance(
        &mut self,
        model_id: &str,
        size: Vec3,
        mass: f32,
        position: Vec3,
    ) -> InstanceKey {
        let id = self.generate_id();
        let mut body = RigidBody::new(model_id, size, mass, position);
        body.set_instance_id(id.clone());
        let key = self.instances.insert(body);
        self.ids.insert(id, key);
        key
    }

    pub fn get(&self, key: InstanceKey) -> Option<&RigidBody> {
        self.instances.get(key)
    }

    pub fn get_mut(&mut self, key: InstanceKey) -> Option<&mut RigidBody> {
        self.instances.get_mut(key)
    }

    /// Look up a key by its string id
    pub fn key_of(&self, instance_id: &str) -> Option<InstanceKey> {
        self.ids.get(instance_id).copied()
    }

    pub fn contains(&self, key: InstanceKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceKey, &RigidBody)> {
        self.instances.iter()
    }

    /// Flag an instance DEAD and queue it for removal.
    ///
    /// Returns `false` if the key is stale. Marking twice queues once.
    pub fn mark_for_deletion(&mut self, key: InstanceKey) -> bool {
        match self.instances.get_mut(key) {
            Some(body) => {
                if !body.is_dead() {
                    body.mark_dead();
                    self.to_delete.push(key);
                }
                true
            }
            None => false,
        }
    }

    /// Number of instances waiting in the deletion queue
    pub fn pending_deletions(&self) -> usize {
        self.to_delete.len()
    }

    /// Remove every instance queued by `mark_for_deletion`.
    ///
    /// Returns the removed bodies.
    pub fn clear_dead_instances(&mut self) -> Vec<RigidBody> {
        let mut removed = Vec::with_capacity(self.to_delete.len());
        for key in self.to_delete.drain(..) {
            if let Some(body) = self.instances.remove(key) {
                self.ids.remove(body.instance_id());
                removed.push(body);
            }
        }
        removed
    }

    /// Clear the MOVED flag on every instance
    pub fn clear_moved_flags(&mut self) {
        for (_, body) in self.instances.iter_mut() {
            body.clear_moved();
        }
    }
}

#[cfg(test)]
#[path = "instance_registry_tests.rs"]
mod tests;
