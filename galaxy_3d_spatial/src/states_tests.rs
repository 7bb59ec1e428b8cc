use super::*;

// ============================================================================
// InstanceStates
// ============================================================================

#[test]
fn test_instance_states_default_is_empty() {
    let states = InstanceStates::default();
    assert!(!states.is_moved());
    assert!(!states.is_dead());
    assert_eq!(states.bits(), 0);
}

#[test]
fn test_instance_states_set_moved() {
    let mut states = InstanceStates::default();
    states.set_moved(true);
    assert!(states.is_moved());
    assert_eq!(states.bits(), 0b01);

    states.set_moved(false);
    assert!(!states.is_moved());
}

#[test]
fn test_instance_states_dead_is_independent_of_moved() {
    let mut states = InstanceStates::MOVED;
    states.mark_dead();
    assert!(states.is_dead());
    assert!(states.is_moved());

    states.set_moved(false);
    assert!(states.is_dead());
}

// ============================================================================
// ActiveOctants
// ============================================================================

#[test]
fn test_octant_bits_match_indices() {
    assert_eq!(ActiveOctants::O1.bits(), 1 << 0);
    assert_eq!(ActiveOctants::O7.bits(), 1 << 6);
    assert_eq!(ActiveOctants::O8.bits(), 1 << 7);
}

#[test]
fn test_activate_and_deactivate_octant() {
    let mut mask = ActiveOctants::empty();
    mask.activate_octant(2);
    mask.activate_octant(6);

    assert!(mask.is_octant_active(2));
    assert!(mask.is_octant_active(6));
    assert!(!mask.is_octant_active(0));
    assert_eq!(mask, ActiveOctants::O3 | ActiveOctants::O7);

    mask.deactivate_octant(2);
    assert!(!mask.is_octant_active(2));
    assert_eq!(mask, ActiveOctants::O7);
}

#[test]
fn test_deactivate_inactive_octant_is_noop() {
    let mut mask = ActiveOctants::O1;
    mask.deactivate_octant(5);
    assert_eq!(mask, ActiveOctants::O1);
}

#[test]
fn test_uniquely_activate_octant_clears_others() {
    let mut mask = ActiveOctants::all();
    mask.uniquely_activate_octant(4);
    assert_eq!(mask, ActiveOctants::O5);
}

#[test]
fn test_toggle_octant() {
    let mut mask = ActiveOctants::empty();
    mask.toggle_octant(7);
    assert!(mask.is_octant_active(7));
    mask.toggle_octant(7);
    assert!(mask.is_empty());
}

#[test]
fn test_active_indices_ascending() {
    let mask = ActiveOctants::O8 | ActiveOctants::O2 | ActiveOctants::O5;
    let indices: Vec<usize> = mask.active_indices().collect();
    assert_eq!(indices, vec![1, 4, 7]);
}

#[test]
fn test_active_indices_empty() {
    assert_eq!(ActiveOctants::empty().active_indices().count(), 0);
}

#[test]
fn test_out_of_range_octant_index_is_ignored() {
    let mut mask = ActiveOctants::O1;
    for index in [8, 9, 64, usize::MAX] {
        assert!(!mask.is_octant_active(index));
        mask.activate_octant(index);
        mask.toggle_octant(index);
        mask.deactivate_octant(index);
        mask.uniquely_activate_octant(index);
    }
    assert_eq!(mask, ActiveOctants::O1);
    assert!(!ActiveOctants::all().is_octant_active(8));
}
