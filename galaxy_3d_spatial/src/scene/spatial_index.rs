/// SpatialIndex - per-scene façade over the octree.
///
/// Owns the models, the instance registry and the octree. Instances are
/// created through the façade so their model templates are instantiated
/// and queued in one place; `step()` is the whole per-frame cost.
///
/// Frame order:
/// 1. `integrate(dt)` (or any position/size mutation through `instance_mut`)
/// 2. `step()` (octree maintenance, then MOVED flags cleared)
/// 3. queries
/// 4. `clear_dead_instances()` whenever convenient

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::bounds::BoundingRegion;
use crate::error::{Error, Result};
use crate::octree::{Octree, OctreeConfig};
use crate::physics::{InstanceKey, InstanceRegistry, RigidBody};
use crate::{engine_bail, engine_debug, engine_info, engine_warn};
use super::model::Model;

const LOG_SOURCE: &str = "galaxy3d::SpatialIndex";

/// Models, instances and the octree indexing their bounding regions.
pub struct SpatialIndex {
    octree: Octree,
    /// Registered models by id
    models: FxHashMap<String, Model>,
    instances: InstanceRegistry,
}

impl SpatialIndex {
    /// Create an index covering `world_region` with default octree tuning.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if `world_region` is not an AABB.
    pub fn new(world_region: BoundingRegion) -> Result<Self> {
        Self::with_config(world_region, OctreeConfig::default())
    }

    /// Create an index covering `world_region`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if the octree rejects the region or config.
    pub fn with_config(world_region: BoundingRegion, config: OctreeConfig) -> Result<Self> {
        Ok(Self {
            octree: Octree::with_config(world_region, config)?,
            models: FxHashMap::default(),
            instances: InstanceRegistry::new(),
        })
    }

    // ===== ACCESSORS =====

    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    pub fn instance(&self, key: InstanceKey) -> Option<&RigidBody> {
        self.instances.get(key)
    }

    /// Mutable access to a body; position and size changes raise MOVED
    pub fn instance_mut(&mut self, key: InstanceKey) -> Option<&mut RigidBody> {
        self.instances.get_mut(key)
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    // ===== MODELS =====

    /// Register `model`, replacing any model with the same id.
    ///
    /// A replacement inherits the live instance count of the model it
    /// replaces. Returns the replaced model.
    pub fn register_model(&mut self, mut model: Model) -> Option<Model> {
        if let Some(previous) = self.models.get(model.id()) {
            engine_warn!(LOG_SOURCE, "Replacing model '{}' ({} live instance(s))",
                previous.id(), previous.instance_count());
            model.adopt_instances(previous);
        }

        engine_debug!(LOG_SOURCE, "Registered model '{}' ({} template region(s))",
            model.id(), model.bounding_regions().len());
        self.models.insert(model.id().to_string(), model)
    }

    // ===== INSTANCES =====

    /// Create an instance of `model_id` and queue its bounding regions.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownModel` if no such model is registered, or
    /// `Error::InstanceLimit` if the model already has `max_instances` live
    /// instances.
    pub fn generate_instance(
        &mut self,
        model_id: &str,
        size: Vec3,
        mass: f32,
        position: Vec3,
    ) -> Result<InstanceKey> {
        let Some(model) = self.models.get_mut(model_id) else {
            engine_bail!(Error::UnknownModel, LOG_SOURCE, "{}", model_id);
        };
        if model.is_full() {
            engine_bail!(Error::InstanceLimit, LOG_SOURCE,
                "model '{}' allows {} instance(s)", model_id, model.max_instances());
        }
        model.instance_added();

        let key = self.instances.generate_instance(model_id, size, mass, position);
        self.enqueue_instance(key)?;
        Ok(key)
    }

    /// Queue one world-space copy of each model template for `key`.
    ///
    /// Each template is cloned, bound to the instance, transformed once and
    /// enqueued; the octree places it on the next `step()`.
    /// Returns the number of regions queued.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownInstance` for a stale key, or
    /// `Error::UnknownModel` if the instance's model was never registered.
    pub fn enqueue_instance(&mut self, key: InstanceKey) -> Result<usize> {
        let Some(body) = self.instances.get(key) else {
            engine_bail!(Error::UnknownInstance, LOG_SOURCE, "{:?}", key);
        };
        let Some(model) = self.models.get(body.model_id()) else {
            engine_bail!(Error::UnknownModel, LOG_SOURCE, "{}", body.model_id());
        };

        for template in model.bounding_regions() {
            let mut region = template.with_owner(key);
            region.transform_with(body);
            self.octree.enqueue(region);
        }

        engine_debug!(LOG_SOURCE, "Queued {} region(s) for instance {}",
            model.bounding_regions().len(), body.instance_id());
        Ok(model.bounding_regions().len())
    }

    /// Look up an instance key by its string id
    pub fn instance_key(&self, instance_id: &str) -> Result<InstanceKey> {
        match self.instances.key_of(instance_id) {
            Some(key) => Ok(key),
            None => engine_bail!(Error::UnknownInstance, LOG_SOURCE, "{}", instance_id),
        }
    }

    /// Flag an instance DEAD; its regions leave the octree on the next `step()`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownInstance` for a stale key.
    pub fn mark_for_deletion(&mut self, key: InstanceKey) -> Result<()> {
        if !self.instances.mark_for_deletion(key) {
            engine_bail!(Error::UnknownInstance, LOG_SOURCE, "{:?}", key);
        }
        Ok(())
    }

    /// Remove every instance flagged by `mark_for_deletion`.
    ///
    /// Returns the number of instances removed.
    pub fn clear_dead_instances(&mut self) -> usize {
        let removed = self.instances.clear_dead_instances();
        for body in &removed {
            if let Some(model) = self.models.get_mut(body.model_id()) {
                model.instance_removed();
            }
        }
        removed.len()
    }

    // ===== FRAME =====

    /// Integrate the instances of every dynamic model by `dt` seconds.
    ///
    /// Integrated bodies are flagged MOVED.
    pub fn integrate(&mut self, dt: f32) {
        let dynamic: Vec<InstanceKey> = self
            .instances
            .iter()
            .filter(|(_, body)| !body.is_dead())
            .filter(|(_, body)| self.models.get(body.model_id()).is_some_and(Model::is_dynamic))
            .map(|(key, _)| key)
            .collect();

        for key in dynamic {
            if let Some(body) = self.instances.get_mut(key) {
                body.integrate(dt);
            }
        }
    }

    /// Run one octree update, then clear every MOVED flag.
    ///
    /// Returns the regions that left the world region this frame.
    pub fn step(&mut self) -> Vec<BoundingRegion> {
        let rejected = self.octree.update(&self.instances);
        self.instances.clear_moved_flags();
        rejected
    }

    // ===== QUERIES =====

    /// Instances with at least one region intersecting `region`
    pub fn query_intersecting(&self, region: &BoundingRegion) -> Vec<InstanceKey> {
        Self::owners(self.octree.query_intersecting(region))
    }

    /// Instances with at least one region containing `point`
    pub fn query_point(&self, point: Vec3) -> Vec<InstanceKey> {
        Self::owners(self.octree.query_point(point))
    }

    fn owners(regions: Vec<&BoundingRegion>) -> Vec<InstanceKey> {
        let mut keys: Vec<InstanceKey> = regions.into_iter().filter_map(|r| r.owner()).collect();
        keys.sort();
        keys.dedup();
        keys
    }

    // ===== TEARDOWN =====

    /// Tear down the octree. Models and instances are kept.
    pub fn destroy(&mut self) {
        self.octree.destroy();
        engine_info!(LOG_SOURCE, "Spatial index destroyed");
    }
}

#[cfg(test)]
#[path = "spatial_index_tests.rs"]
mod tests;
