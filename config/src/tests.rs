//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_plane_epsilon_larger_than_epsilon() {
    assert!(
        PLANE_EPSILON > EPSILON,
        "PLANE_EPSILON should be coarser than EPSILON"
    );
}

#[test]
fn test_node_merge_quantum_is_small() {
    assert!(NODE_MERGE_QUANTUM < 1e-4);
    assert!(NODE_MERGE_QUANTUM > EPSILON);
}

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_circle_segments_at_least_triangle() {
    assert!(CIRCLE_SEGMENTS >= 3);
}

#[test]
fn test_arc_segments_not_above_circle() {
    assert!(MIN_ARC_SEGMENTS <= CIRCLE_SEGMENTS);
}

#[test]
fn test_sphere_has_rings() {
    assert!(SPHERE_RINGS >= 2);
}

// =============================================================================
// SIZING TESTS
// =============================================================================

#[test]
fn test_size_clamps_ordered() {
    assert!(DEFAULT_SIZE_MIN < DEFAULT_SIZE_MAX);
}

#[test]
fn test_size_factor_is_fraction() {
    assert!(DEFAULT_SIZE_FACTOR > 0.0 && DEFAULT_SIZE_FACTOR <= 1.0);
}

#[test]
fn test_grading_is_positive() {
    assert!(DEFAULT_GRADING > 0.0);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_octree_depth_bounded() {
    // 8^depth cells must stay below the element limit
    assert!(8usize.pow(MAX_OCTREE_DEPTH) <= MAX_ELEMENTS);
}

#[test]
fn test_msh_version() {
    assert_eq!(MSH_FILE_VERSION, 2.2);
}
