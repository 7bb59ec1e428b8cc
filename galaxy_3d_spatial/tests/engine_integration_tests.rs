//! Integration tests for Engine lifecycle and management
//!
//! These tests verify the complete Engine workflow with the spatial index
//! singleton, as an application would drive it.
//!
//! Run with: cargo test --test engine_integration_tests

use galaxy_3d_spatial::galaxy3d::{Engine, Error};
use galaxy_3d_spatial::galaxy3d::bounds::{BoundingRegion, BoundKind};
use galaxy_3d_spatial::galaxy3d::octree::OctreeConfig;
use galaxy_3d_spatial::galaxy3d::scene::Model;
use galaxy_3d_spatial::glam::Vec3;
use std::sync::Arc;
use std::thread;
use serial_test::serial;

fn world() -> BoundingRegion {
    BoundingRegion::aabb(Vec3::splat(-100.0), Vec3::splat(100.0)).unwrap()
}

/// Start every test from an initialized engine without a spatial index
fn setup() {
    Engine::initialize().unwrap();
    Engine::destroy_spatial_index().unwrap();
}

// ============================================================================
// ENGINE LIFECYCLE TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_engine_full_lifecycle() {
    // Step 1: Initialize engine
    setup();

    // Step 2: Create the spatial index
    let result = Engine::create_spatial_index(world(), OctreeConfig::default());
    assert!(result.is_ok(), "SpatialIndex creation should succeed");

    // Step 3: Populate it through the shared handle
    let index = Engine::spatial_index().unwrap();
    {
        let mut index = index.lock().unwrap();
        let mut model = Model::new("crate", BoundKind::Aabb, 8);
        model.add_mesh_bounds(&[Vec3::splat(-1.0), Vec3::splat(1.0)]).unwrap();
        index.register_model(model);
        for i in 0..4 {
            index.generate_instance("crate", Vec3::ONE, 1.0, Vec3::splat(i as f32 * 20.0 - 30.0)).unwrap();
        }
    }

    // Step 4: Run a frame
    assert!(index.lock().unwrap().step().is_empty());
    assert_eq!(index.lock().unwrap().octree().object_count(), 4);

    // Step 5: Cleanup
    Engine::destroy_spatial_index().unwrap();
    assert!(Engine::spatial_index().is_err());

    // Step 6: Shutdown engine
    Engine::shutdown();
}

#[test]
#[serial]
fn test_integration_engine_recreate_after_shutdown() {
    setup();

    Engine::create_spatial_index(world(), OctreeConfig::default()).unwrap();
    Engine::shutdown();
    assert!(Engine::spatial_index().is_err());

    // A second index can be created once the first is gone
    let config = OctreeConfig { min_bounds: 4.0, ..Default::default() };
    Engine::create_spatial_index(world(), config).unwrap();
    let index = Engine::spatial_index().unwrap();
    assert_eq!(index.lock().unwrap().octree().config().min_bounds, 4.0);

    Engine::destroy_spatial_index().unwrap();
}

#[test]
#[serial]
fn test_integration_engine_duplicate_index_rejected() {
    setup();

    Engine::create_spatial_index(world(), OctreeConfig::default()).unwrap();
    let result = Engine::create_spatial_index(world(), OctreeConfig::default());
    assert!(matches!(result, Err(Error::InitializationFailed(_))));

    Engine::destroy_spatial_index().unwrap();
}

#[test]
#[serial]
fn test_integration_engine_index_shared_across_threads() {
    setup();

    Engine::create_spatial_index(world(), OctreeConfig::default()).unwrap();
    {
        let index = Engine::spatial_index().unwrap();
        let mut index = index.lock().unwrap();
        let mut model = Model::new("crate", BoundKind::Aabb, 16);
        model.add_mesh_bounds(&[Vec3::splat(-1.0), Vec3::splat(1.0)]).unwrap();
        index.register_model(model);
    }

    let workers: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let index = Engine::spatial_index().unwrap();
                let mut index = index.lock().unwrap();
                index.generate_instance("crate", Vec3::ONE, 1.0, Vec3::splat(i as f32 * 10.0)).unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let index = Engine::spatial_index().unwrap();
    assert!(Arc::ptr_eq(&index, &Engine::spatial_index().unwrap()));
    let mut index = index.lock().unwrap();
    assert_eq!(index.instance_count(), 4);
    index.step();
    assert_eq!(index.octree().object_count(), 4);
    drop(index);

    Engine::destroy_spatial_index().unwrap();
}
