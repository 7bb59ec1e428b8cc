/// Bounding regions: axis-aligned boxes and spheres.
///
/// A region keeps two copies of its geometry: the model-local template it
/// was created with, and the world-space volume recomputed by `transform()`
/// from its owner's position and size. Regions without an owner are
/// templates and never transform.

use glam::Vec3;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::physics::{InstanceKey, InstanceRegistry, RigidBody};

// ===== PRIMITIVES =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Region type tag, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Aabb,
    Sphere,
}

/// World-space geometry of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Aabb(AABB),
    Sphere(Sphere),
}

/// World geometry paired with its template, always of the same kind
#[derive(Debug, Clone, Copy)]
enum Volume {
    Aabb { world: AABB, template: AABB },
    Sphere { world: Sphere, template: Sphere },
}

// ===== BOUNDING REGION =====

/// A bounding volume that can track a rigid-body instance.
#[derive(Debug, Clone, Copy)]
pub struct BoundingRegion {
    volume: Volume,
    /// Non-owning reference to the tracked instance
    owner: Option<InstanceKey>,
}

impl BoundingRegion {
    // ===== CONSTRUCTION =====

    /// Create a template AABB region.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if a coordinate is not finite or
    /// `min > max` on any axis.
    pub fn aabb(min: Vec3, max: Vec3) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            engine_bail!(Error::InvalidRegion, "galaxy3d::BoundingRegion",
                "AABB corners must be finite (min = {}, max = {})", min, max);
        }
        if !min.cmple(max).all() {
            engine_bail!(Error::InvalidRegion, "galaxy3d::BoundingRegion",
                "AABB min {} exceeds max {}", min, max);
        }
        Ok(Self::from_aabb(AABB { min, max }))
    }

    /// Create a template sphere region.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if a value is not finite or the radius
    /// is negative.
    pub fn sphere(center: Vec3, radius: f32) -> Result<Self> {
        if !center.is_finite() || !radius.is_finite() {
            engine_bail!(Error::InvalidRegion, "galaxy3d::BoundingRegion",
                "sphere must be finite (center = {}, radius = {})", center, radius);
        }
        if radius < 0.0 {
            engine_bail!(Error::InvalidRegion, "galaxy3d::BoundingRegion",
                "sphere radius {} is negative", radius);
        }
        Ok(Self::from_sphere(Sphere { center, radius }))
    }

    /// Fit a template region of `kind` around a point cloud (mesh vertices).
    ///
    /// AABB: component-wise min/max. Sphere: centered on the box center,
    /// radius reaching the farthest point.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegion` if `points` is empty or not finite.
    pub fn fit_points(kind: BoundKind, points: &[Vec3]) -> Result<Self> {
        let Some(first) = points.first() else {
            engine_bail!(Error::InvalidRegion, "galaxy3d::BoundingRegion",
                "cannot fit a region around zero points");
        };

        let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
            (min.min(*p), max.max(*p))
        });

        match kind {
            BoundKind::Aabb => Self::aabb(min, max),
            BoundKind::Sphere => {
                let center = (min + max) * 0.5;
                let radius_squared = points
                    .iter()
                    .map(|p| p.distance_squared(center))
                    .fold(0.0f32, f32::max);
                Self::sphere(center, radius_squared.sqrt())
            }
        }
    }

    /// Unvalidated AABB constructor for internally derived boxes
    pub(crate) fn from_aabb(aabb: AABB) -> Self {
        Self {
            volume: Volume::Aabb { world: aabb, template: aabb },
            owner: None,
        }
    }

    pub(crate) fn from_sphere(sphere: Sphere) -> Self {
        Self {
            volume: Volume::Sphere { world: sphere, template: sphere },
            owner: None,
        }
    }

    /// Clone this region with `owner` attached
    pub fn with_owner(&self, owner: InstanceKey) -> Self {
        Self { volume: self.volume, owner: Some(owner) }
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> BoundKind {
        match self.volume {
            Volume::Aabb { .. } => BoundKind::Aabb,
            Volume::Sphere { .. } => BoundKind::Sphere,
        }
    }

    /// World-space geometry
    pub fn bounds(&self) -> Bounds {
        match self.volume {
            Volume::Aabb { world, .. } => Bounds::Aabb(world),
            Volume::Sphere { world, .. } => Bounds::Sphere(world),
        }
    }

    /// Model-local template geometry
    pub fn template(&self) -> Bounds {
        match self.volume {
            Volume::Aabb { template, .. } => Bounds::Aabb(template),
            Volume::Sphere { template, .. } => Bounds::Sphere(template),
        }
    }

    pub fn owner(&self) -> Option<InstanceKey> {
        self.owner
    }

    /// Smallest world-space box enclosing this region
    pub fn bounding_box(&self) -> AABB {
        match self.volume {
            Volume::Aabb { world, .. } => world,
            Volume::Sphere { world, .. } => AABB {
                min: world.center - Vec3::splat(world.radius),
                max: world.center + Vec3::splat(world.radius),
            },
        }
    }

    // ===== DERIVED VALUES =====

    pub fn calculate_center(&self) -> Vec3 {
        match self.volume {
            Volume::Aabb { world, .. } => (world.min + world.max) * 0.5,
            Volume::Sphere { world, .. } => world.center,
        }
    }

    /// Extent per axis. Spheres report a cube of side `2 * radius`.
    pub fn calculate_dimensions(&self) -> Vec3 {
        match self.volume {
            Volume::Aabb { world, .. } => world.max - world.min,
            Volume::Sphere { world, .. } => Vec3::splat(2.0 * world.radius),
        }
    }

    // ===== TRANSFORM =====

    /// Recompute world geometry from the owner's current position and size.
    ///
    /// No-op for templates and for owners no longer in `instances`.
    pub fn transform(&mut self, instances: &InstanceRegistry) {
        if let Some(body) = self.owner.and_then(|key| instances.get(key)) {
            self.transform_with(body);
        }
    }

    /// Recompute world geometry from `body` (ignores the owner key).
    ///
    /// Spheres scale their radius by `size.x` only.
    pub fn transform_with(&mut self, body: &RigidBody) {
        let position = body.position();
        let size = body.size();

        match &mut self.volume {
            Volume::Aabb { world, template } => {
                world.min = template.min * size + position;
                world.max = template.max * size + position;
            }
            Volume::Sphere { world, template } => {
                world.center = template.center * size + position;
                world.radius = template.radius * size.x;
            }
        }
    }

    // ===== TESTS =====

    /// Whether `point` lies inside this region (boundary included)
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self.volume {
            Volume::Aabb { world, .. } => {
                point.cmpge(world.min).all() && point.cmple(world.max).all()
            }
            Volume::Sphere { world, .. } => {
                world.center.distance_squared(point) <= world.radius * world.radius
            }
        }
    }

    /// Whether `other` lies entirely inside this region
    pub fn contains_region(&self, other: &BoundingRegion) -> bool {
        match (self.bounds(), other.bounds()) {
            // A box is inside when both of its corners are
            (_, Bounds::Aabb(inner)) => {
                self.contains_point(inner.min) && self.contains_point(inner.max)
            }
            (Bounds::Sphere(outer), Bounds::Sphere(inner)) => {
                outer.center.distance(inner.center) + inner.radius < outer.radius
            }
            (Bounds::Aabb(outer), Bounds::Sphere(inner)) => {
                if !self.contains_point(inner.center) {
                    return false;
                }
                // The sphere must not cross any face
                (0..3).all(|i| {
                    (outer.max[i] - inner.center[i]).abs() >= inner.radius
                        && (inner.center[i] - outer.min[i]).abs() >= inner.radius
                })
            }
        }
    }

    /// Whether this region and `other` overlap at all
    pub fn intersects_with(&self, other: &BoundingRegion) -> bool {
        match (self.bounds(), other.bounds()) {
            (Bounds::Aabb(_), Bounds::Aabb(_)) => {
                let half = self.calculate_dimensions() * 0.5;
                let other_half = other.calculate_dimensions() * 0.5;
                let distance = (self.calculate_center() - other.calculate_center()).abs();

                // Separating axis on x, y, z
                distance.cmple(half + other_half).all()
            }
            (Bounds::Sphere(a), Bounds::Sphere(b)) => {
                a.center.distance(b.center) < a.radius + b.radius
            }
            (Bounds::Sphere(sphere), Bounds::Aabb(aabb)) => {
                let closest = sphere.center.clamp(aabb.min, aabb.max);
                // A center inside the box always overlaps, even at radius 0
                closest == sphere.center
                    || closest.distance_squared(sphere.center) < sphere.radius * sphere.radius
            }
            (Bounds::Aabb(_), Bounds::Sphere(_)) => other.intersects_with(self),
        }
    }
}

/// Same kind and same world geometry. Exact comparison, owner ignored.
impl PartialEq for BoundingRegion {
    fn eq(&self, other: &Self) -> bool {
        self.bounds() == other.bounds()
    }
}

impl From<AABB> for BoundingRegion {
    fn from(aabb: AABB) -> Self {
        Self::from_aabb(aabb)
    }
}

#[cfg(test)]
#[path = "bounding_region_tests.rs"]
mod tests;
