/// Rigid-body instance state consumed by the spatial index.

use glam::Vec3;
use crate::states::InstanceStates;

/// A placed instance of a model.
///
/// Every mutator of `position` or `size` raises the MOVED flag so the
/// octree re-homes the instance's regions on the next step.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Id of the model this instance was generated from
    model_id: String,
    /// Registry-assigned identifier (empty until registered)
    instance_id: String,
    /// World-space translation
    position: Vec3,
    /// Per-axis scale applied to the model's template regions
    size: Vec3,
    mass: f32,
    velocity: Vec3,
    acceleration: Vec3,
    /// Motion/life bits
    states: InstanceStates,
}

impl RigidBody {
    pub fn new(model_id: &str, size: Vec3, mass: f32, position: Vec3) -> Self {
        Self {
            model_id: model_id.to_string(),
            instance_id: String::new(),
            position,
            size,
            mass,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            states: InstanceStates::empty(),
        }
    }

    // ===== ACCESSORS =====

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn states(&self) -> InstanceStates {
        self.states
    }

    pub fn is_moved(&self) -> bool {
        self.states.is_moved()
    }

    pub fn is_dead(&self) -> bool {
        self.states.is_dead()
    }

    // ===== MUTATORS =====

    pub(crate) fn set_instance_id(&mut self, id: String) {
        self.instance_id = id;
    }

    /// Set the world position and flag the body as moved
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.states.set_moved(true);
    }

    /// Offset the world position and flag the body as moved
    pub fn translate(&mut self, offset: Vec3) {
        self.set_position(self.position + offset);
    }

    /// Set the scale and flag the body as moved
    pub fn set_size(&mut self, size: Vec3) {
        self.size = size;
        self.states.set_moved(true);
    }

    /// Store integrator output. Does not touch position or flags.
    pub fn set_motion(&mut self, velocity: Vec3, acceleration: Vec3) {
        self.velocity = velocity;
        self.acceleration = acceleration;
    }

    /// Clear the MOVED flag once the spatial index has consumed the move
    pub fn clear_moved(&mut self) {
        self.states.set_moved(false);
    }

    pub(crate) fn mark_dead(&mut self) {
        self.states.mark_dead();
    }

    // ===== INTEGRATION =====

    /// Add a constant acceleration (e.g. gravity)
    pub fn apply_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }

    /// Add the acceleration produced by `force`
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }

    /// Change velocity by `force` applied over `dt`
    pub fn apply_impulse(&mut self, force: Vec3, dt: f32) {
        self.velocity += force / self.mass * dt;
    }

    /// Convert kinetic energy into a velocity change along `direction`.
    ///
    /// Negative `joules` push against `direction`.
    pub fn transfer_energy(&mut self, joules: f32, direction: Vec3) {
        let delta_v = (2.0 * joules.abs() / self.mass).sqrt();
        self.velocity += direction * delta_v.copysign(joules);
    }

    /// Advance position and velocity by `dt` seconds and flag the body as moved
    pub fn integrate(&mut self, dt: f32) {
        let position = self.position + self.velocity * dt + 0.5 * self.acceleration * dt * dt;
        self.velocity += self.acceleration * dt;
        self.set_position(position);
    }
}

#[cfg(test)]
#[path = "rigid_body_tests.rs"]
mod tests;
