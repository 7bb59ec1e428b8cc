use super::*;
use glam::Vec3;
use crate::bounds::Bounds;

fn parent() -> AABB {
    AABB { min: Vec3::new(-4.0, 0.0, 10.0), max: Vec3::new(4.0, 6.0, 12.0) }
}

fn volume(aabb: &AABB) -> f32 {
    let d = aabb.max - aabb.min;
    d.x * d.y * d.z
}

fn overlap_volume(a: &AABB, b: &AABB) -> f32 {
    let d = (a.max.min(b.max) - a.min.max(b.min)).max(Vec3::ZERO);
    d.x * d.y * d.z
}

#[test]
fn test_index_round_trip() {
    for (i, octant) in Octant::ALL.iter().enumerate() {
        assert_eq!(octant.index(), i);
        assert_eq!(Octant::from_index(i), Some(*octant));
    }
    assert_eq!(Octant::from_index(8), None);
}

#[test]
fn test_o1_is_max_corner_and_o7_is_min_corner() {
    let p = parent();
    let center = Vec3::new(0.0, 3.0, 11.0);

    let o1 = Octant::O1.aabb(&p);
    assert_eq!(o1.min, center);
    assert_eq!(o1.max, p.max);

    let o7 = Octant::O7.aabb(&p);
    assert_eq!(o7.min, p.min);
    assert_eq!(o7.max, center);
}

#[test]
fn test_mixed_octants() {
    let p = parent();
    assert_eq!(
        Octant::O2.aabb(&p),
        AABB { min: Vec3::new(-4.0, 3.0, 11.0), max: Vec3::new(0.0, 6.0, 12.0) }
    );
    assert_eq!(
        Octant::O8.aabb(&p),
        AABB { min: Vec3::new(0.0, 0.0, 10.0), max: Vec3::new(4.0, 3.0, 11.0) }
    );
}

#[test]
fn test_octants_tile_parent_without_overlap() {
    let p = parent();
    let octants: Vec<AABB> = Octant::ALL.iter().map(|o| o.aabb(&p)).collect();

    let total: f32 = octants.iter().map(volume).sum();
    assert!((total - volume(&p)).abs() < 1e-4);

    for (i, a) in octants.iter().enumerate() {
        // Inside the parent
        assert!(a.min.cmpge(p.min).all() && a.max.cmple(p.max).all());
        for b in octants.iter().skip(i + 1) {
            assert!(overlap_volume(a, b) < 1e-6);
        }
    }
}

#[test]
fn test_regions_match_aabbs() {
    let region = BoundingRegion::aabb(Vec3::ZERO, Vec3::splat(10.0)).unwrap();
    let regions = Octant::regions(&region);
    for (octant, r) in Octant::ALL.iter().zip(regions.iter()) {
        assert_eq!(r.bounds(), Bounds::Aabb(octant.aabb(&region.bounding_box())));
    }
}

#[test]
fn test_min_corner_octant_contains_small_box() {
    let region = BoundingRegion::aabb(Vec3::ZERO, Vec3::splat(10.0)).unwrap();
    let object = BoundingRegion::aabb(Vec3::ONE, Vec3::splat(2.0)).unwrap();

    let first = Octant::regions(&region)
        .iter()
        .position(|r| r.contains_region(&object));
    assert_eq!(first, Some(Octant::O7.index()));
}
