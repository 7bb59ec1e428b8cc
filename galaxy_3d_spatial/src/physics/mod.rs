//! Physics module - rigid-body instances and their registry.
//!
//! Bodies integrate their own motion with `RigidBody::integrate`.
//! The spatial index only reads the integrated result: position, size and
//! the MOVED flag.

mod rigid_body;
mod instance_registry;

pub use rigid_body::RigidBody;
pub use instance_registry::{InstanceKey, InstanceRegistry};
