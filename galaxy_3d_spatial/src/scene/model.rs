/// Models: named templates that instances are generated from.
///
/// A model carries one template bounding region per mesh, all of the same
/// kind. Instances are scaled and translated copies of these templates.

use glam::Vec3;
use crate::bounds::{BoundingRegion, BoundKind};
use crate::error::{Error, Result};
use crate::engine_bail;

/// Shape description shared by every instance of a model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Unique model identifier
    id: String,
    /// Kind of every template region
    bound_kind: BoundKind,
    /// One template per mesh, in model-local space
    bounding_regions: Vec<BoundingRegion>,
    /// Instances allowed at once
    max_instances: usize,
    /// Live instances currently generated from this model
    instance_count: usize,
    /// Whether `SpatialIndex::integrate` advances this model's instances
    dynamic: bool,
}

impl Model {
    /// Create a static model without templates
    pub fn new(id: &str, bound_kind: BoundKind, max_instances: usize) -> Self {
        Self {
            id: id.to_string(),
            bound_kind,
            bounding_regions: Vec::new(),
            max_instances,
            instance_count: 0,
            dynamic: false,
        }
    }

    /// Builder: mark instances as physically simulated
    pub fn with_dynamics(mut self) -> Self {
        self.dynamic = true;
        self
    }

    // ===== ACCESSORS =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bound_kind(&self) -> BoundKind {
        self.bound_kind
    }

    pub fn bounding_regions(&self) -> &[BoundingRegion] {
        &self.bounding_regions
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    // ===== TEMPLATES =====

    /// Fit a template region around one mesh's vertex positions.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if `points` is empty or not finite.
    pub fn add_mesh_bounds(&mut self, points: &[Vec3]) -> Result<()> {
        let region = BoundingRegion::fit_points(self.bound_kind, points)?;
        self.bounding_regions.push(region);
        Ok(())
    }

    /// Add a ready-made template region.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if its kind differs from the model's.
    pub fn add_bounding_region(&mut self, region: BoundingRegion) -> Result<()> {
        if region.kind() != self.bound_kind {
            engine_bail!(Error::InvalidRegion, "galaxy3d::Model",
                "model '{}' expects {:?} regions, got {:?}", self.id, self.bound_kind, region.kind());
        }
        self.bounding_regions.push(region);
        Ok(())
    }

    // ===== INSTANCE ACCOUNTING =====

    pub(crate) fn is_full(&self) -> bool {
        self.instance_count >= self.max_instances
    }

    pub(crate) fn instance_added(&mut self) {
        self.instance_count += 1;
    }

    /// Take over the live instance count of a model this one replaces
    pub(crate) fn adopt_instances(&mut self, previous: &Model) {
        self.instance_count = previous.instance_count;
    }

    pub(crate) fn instance_removed(&mut self) {
        self.instance_count = self.instance_count.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
