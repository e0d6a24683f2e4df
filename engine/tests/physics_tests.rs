//! Physics Tests - Octree and Capsule Collision
//!
//! Exercises the octree broad phase together with the capsule narrow phase
//! on level-like geometry.

use approx::assert_relative_eq;
use glam::Vec3;
use rstest::rstest;

use bear_park_engine::physics::{
    Aabb, Capsule, CollisionResolver, CollisionWorld, Contact, Octree, OctreeConfig, Triangle,
    box_triangles, triangle_capsule_intersect,
};

const RADIUS: f32 = 0.35;
const HEIGHT: f32 = 1.0;

/// Floor of `tiles` x `tiles` unit quads with its corner at the origin.
fn tiled_floor(tiles: i32) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    for x in 0..tiles {
        for z in 0..tiles {
            let a = Vec3::new(x as f32, 0.0, z as f32);
            let b = a + Vec3::new(0.0, 0.0, 1.0);
            let c = a + Vec3::new(1.0, 0.0, 1.0);
            let d = a + Vec3::new(1.0, 0.0, 0.0);
            triangles.push(Triangle::new(a, b, c));
            triangles.push(Triangle::new(a, c, d));
        }
    }
    triangles
}

/// Sequential probe resolution over every triangle, no broad phase.
fn brute_force(triangles: &[Triangle], capsule: &Capsule) -> Option<Contact> {
    let mut probe = *capsule;
    let mut hit = false;
    for triangle in triangles {
        if let Some(contact) = triangle_capsule_intersect(&probe, triangle) {
            hit = true;
            probe.translate(contact.push_out());
        }
    }
    hit.then(|| {
        let displacement = probe.center() - capsule.center();
        Contact::new(displacement.normalize_or_zero(), displacement.length())
    })
}

// ============================================================================
// Octree Structure Tests
// ============================================================================

#[test]
fn test_octree_splits_large_mesh() {
    let octree = Octree::from_triangles(tiled_floor(16));
    assert_eq!(octree.len(), 512);
    assert!(octree.depth() > 0);
    assert!(octree.node_count() > 1);
}

#[test]
fn test_octree_small_mesh_is_single_leaf() {
    let octree = Octree::from_triangles(tiled_floor(2));
    assert_eq!(octree.depth(), 0);
    assert_eq!(octree.node_count(), 1);
}

#[test]
fn test_octree_bounds_include_margin() {
    let octree = Octree::from_triangles(tiled_floor(4));
    let bounds = octree.bounds();
    assert!(bounds.min.x < 0.0 && bounds.max.x > 4.0);
    assert!(bounds.min.y < 0.0 && bounds.max.y > 0.0);
}

#[test]
fn test_query_never_misses_overlapping_triangles() {
    let triangles = tiled_floor(12);
    let octree = Octree::from_triangles(triangles.clone());
    let query = Aabb::new(Vec3::new(3.2, -0.5, 7.6), Vec3::new(5.1, 0.5, 9.4));

    let found = octree.query(&query);
    for (index, triangle) in triangles.iter().enumerate() {
        if triangle.bounds().intersects(&query) {
            assert!(found.contains(&(index as u32)), "missed triangle {index}");
        }
    }
}

#[test]
fn test_custom_leaf_size_changes_depth() {
    let coarse = Octree::with_config(
        tiled_floor(8),
        OctreeConfig {
            triangles_per_leaf: 256,
            ..OctreeConfig::default()
        },
    );
    let fine = Octree::from_triangles(tiled_floor(8));
    assert!(coarse.node_count() < fine.node_count());
}

// ============================================================================
// Capsule vs Octree Tests
// ============================================================================

#[rstest]
#[case(Vec3::new(2.5, -0.1, 2.5))]
#[case(Vec3::new(7.3, -0.05, 1.1))]
#[case(Vec3::new(4.0, -0.2, 4.0))]
#[case(Vec3::new(0.2, -0.3, 9.9))]
fn test_octree_matches_brute_force(#[case] foot: Vec3) {
    let triangles = tiled_floor(10);
    let octree = Octree::from_triangles(triangles.clone());
    let capsule = Capsule::standing_at(foot, RADIUS, HEIGHT);

    let fast = octree.capsule_intersect(&capsule).expect("octree contact");
    let slow = brute_force(&triangles, &capsule).expect("brute force contact");

    assert_relative_eq!(fast.depth, slow.depth, epsilon = 1e-4);
    assert!((fast.normal - slow.normal).length() < 1e-4);
}

#[rstest]
#[case(0.1)]
#[case(0.2)]
#[case(0.3)]
fn test_floor_penetration_resolves_upward(#[case] sink: f32) {
    let octree = Octree::from_triangles(tiled_floor(10));
    let mut capsule = Capsule::standing_at(Vec3::new(5.5, -sink, 5.5), RADIUS, HEIGHT);

    let resolution = CollisionResolver::resolve(&octree, &mut capsule);

    assert!(resolution.grounded);
    let contact = resolution.contact.expect("contact");
    assert!((contact.normal - Vec3::Y).length() < 1e-4);
    assert_relative_eq!(contact.depth, sink, epsilon = 1e-4);
    assert!(capsule.foot().y.abs() < 1e-4);
}

#[test]
fn test_capsule_above_floor_has_no_contact() {
    let octree = Octree::from_triangles(tiled_floor(10));
    let capsule = Capsule::standing_at(Vec3::new(5.0, 0.01, 5.0), RADIUS, HEIGHT);
    assert!(octree.capsule_intersect(&capsule).is_none());
}

#[test]
fn test_capsule_outside_mesh_bounds_has_no_contact() {
    let octree = Octree::from_triangles(tiled_floor(4));
    let capsule = Capsule::standing_at(Vec3::new(50.0, -0.2, 50.0), RADIUS, HEIGHT);
    assert!(octree.capsule_intersect(&capsule).is_none());
}

// ============================================================================
// Box Geometry Tests
// ============================================================================

#[test]
fn test_wall_push_is_not_floor() {
    // A tall thin wall from x = 1 to x = 2; the capsule overlaps its -X face
    let wall = Aabb::new(Vec3::new(1.0, 0.0, -5.0), Vec3::new(2.0, 5.0, 5.0));
    let octree = Octree::from_triangles(box_triangles(&wall).to_vec());
    let mut capsule = Capsule::standing_at(Vec3::new(0.8, 1.0, 0.0), RADIUS, HEIGHT);

    let resolution = CollisionResolver::resolve(&octree, &mut capsule);

    assert!(!resolution.grounded);
    let contact = resolution.contact.expect("contact");
    assert!(contact.normal.x < -0.99, "normal {:?}", contact.normal);
    assert!(capsule.start.x <= 1.0 - RADIUS + 1e-4);
}

#[test]
fn test_standing_on_box_top() {
    let step = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.5, 1.0));
    let octree = Octree::from_triangles(box_triangles(&step).to_vec());
    let mut capsule = Capsule::standing_at(Vec3::new(0.3, 1.4, 0.2), RADIUS, HEIGHT);

    let resolution = CollisionResolver::resolve(&octree, &mut capsule);

    assert!(resolution.grounded);
    assert!((capsule.foot().y - 1.5).abs() < 1e-4);
}
