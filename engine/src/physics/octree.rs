//! Static collision octree
//!
//! Built once from the level's collision triangles at load time and read-only
//! afterwards. Nodes split into eight octants while they hold more than
//! `triangles_per_leaf` triangles. A triangle is stored in every leaf whose box
//! overlaps the triangle's bounding box, so queries must deduplicate.

use glam::Vec3;
use serde::Deserialize;

use super::capsule::Capsule;
use super::collision::{Aabb, CollisionWorld, Contact, triangle_capsule_intersect};
use super::triangle::Triangle;

/// Default maximum triangles in a leaf before it splits
pub const TRIANGLES_PER_LEAF: usize = 8;

/// Default maximum subdivision depth
pub const MAX_DEPTH: u32 = 16;

/// Margin added around the mesh bounds so boundary triangles are inside
pub const BOUNDS_MARGIN: f32 = 0.01;

/// Build parameters for [`Octree`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    pub triangles_per_leaf: usize,
    pub max_depth: u32,
    pub bounds_margin: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            triangles_per_leaf: TRIANGLES_PER_LEAF,
            max_depth: MAX_DEPTH,
            bounds_margin: BOUNDS_MARGIN,
        }
    }
}

#[derive(Debug, Clone)]
struct OctreeNode {
    bounds: Aabb,
    /// Indices into `Octree::triangles`; empty for interior nodes
    triangles: Vec<u32>,
    children: Vec<OctreeNode>,
}

impl OctreeNode {
    fn leaf(bounds: Aabb, triangles: Vec<u32>) -> Self {
        Self {
            bounds,
            triangles,
            children: Vec::new(),
        }
    }

    fn split(&mut self, depth: u32, mesh: &[Triangle], config: &OctreeConfig) {
        if self.triangles.len() <= config.triangles_per_leaf || depth >= config.max_depth {
            return;
        }

        let mut children = Vec::with_capacity(8);
        for octant in self.bounds.octants() {
            let inside: Vec<u32> = self
                .triangles
                .iter()
                .copied()
                .filter(|&i| mesh[i as usize].bounds().intersects(&octant))
                .collect();
            if !inside.is_empty() {
                children.push(OctreeNode::leaf(octant, inside));
            }
        }

        // Splitting cannot separate triangles that all span every octant.
        if children.iter().all(|c| c.triangles.len() == self.triangles.len()) {
            return;
        }

        for child in &mut children {
            child.split(depth + 1, mesh, config);
        }
        self.children = children;
        self.triangles.clear();
    }

    fn collect(&self, query: &Aabb, out: &mut Vec<u32>) {
        if !self.bounds.intersects(query) {
            return;
        }
        if self.children.is_empty() {
            out.extend_from_slice(&self.triangles);
        } else {
            for child in &self.children {
                child.collect(query, out);
            }
        }
    }

    fn depth(&self) -> u32 {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(OctreeNode::node_count).sum::<usize>()
    }
}

/// Octree-backed static collision volume.
#[derive(Debug, Clone)]
pub struct Octree {
    triangles: Vec<Triangle>,
    root: OctreeNode,
}

impl Default for Octree {
    fn default() -> Self {
        Self::from_triangles(Vec::new())
    }
}

impl Octree {
    /// Build with the default configuration.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self::with_config(triangles, OctreeConfig::default())
    }

    pub fn with_config(triangles: Vec<Triangle>, config: OctreeConfig) -> Self {
        let bounds = triangles
            .iter()
            .fold(Aabb::empty(), |acc, t| acc.union(&t.bounds()));
        let bounds = if bounds.is_empty() {
            Aabb::new(Vec3::ZERO, Vec3::ZERO)
        } else {
            bounds.expand(config.bounds_margin)
        };

        let all: Vec<u32> = (0..triangles.len() as u32).collect();
        let mut root = OctreeNode::leaf(bounds, all);
        root.split(0, &triangles, &config);

        let tree = Self { triangles, root };
        log::debug!(
            "octree built: {} triangles, {} nodes, depth {}",
            tree.len(),
            tree.node_count(),
            tree.depth()
        );
        tree
    }

    /// Number of source triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Bounds of the whole mesh, including the build margin.
    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// Depth of the deepest leaf (0 when the root never split).
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Indices of triangles in leaves overlapping `query`, sorted and unique.
    pub fn query(&self, query: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        self.root.collect(query, &mut out);
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Triangles that may touch `capsule`.
    pub fn capsule_candidates(&self, capsule: &Capsule) -> Vec<u32> {
        self.query(&capsule.bounds())
    }
}

impl CollisionWorld for Octree {
    /// Resolves the capsule against each candidate triangle in turn on a
    /// scratch copy, then reports the scratch capsule's total displacement.
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let mut probe = *capsule;
        let mut hit = false;

        for index in self.capsule_candidates(capsule) {
            let triangle = &self.triangles[index as usize];
            if let Some(contact) = triangle_capsule_intersect(&probe, triangle) {
                hit = true;
                probe.translate(contact.push_out());
            }
        }

        if !hit {
            return None;
        }

        let displacement = probe.center() - capsule.center();
        Some(Contact::new(
            displacement.normalize_or_zero(),
            displacement.length(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square floor quad at height `y` made of two upward-facing triangles.
    fn floor_quad(min: Vec3, size: f32) -> [Triangle; 2] {
        let a = min;
        let b = min + Vec3::new(0.0, 0.0, size);
        let c = min + Vec3::new(size, 0.0, size);
        let d = min + Vec3::new(size, 0.0, 0.0);
        [Triangle::new(a, b, c), Triangle::new(a, c, d)]
    }

    fn tiled_floor(tiles: i32, size: f32) -> Vec<Triangle> {
        let mut out = Vec::new();
        for x in 0..tiles {
            for z in 0..tiles {
                let min = Vec3::new(x as f32 * size, 0.0, z as f32 * size);
                out.extend(floor_quad(min, size));
            }
        }
        out
    }

    #[test]
    fn test_empty_octree() {
        let tree = Octree::default();
        assert!(tree.is_empty());
        let capsule = Capsule::standing_at(Vec3::ZERO, 0.35, 1.0);
        assert!(tree.capsule_intersect(&capsule).is_none());
    }

    #[test]
    fn test_small_mesh_stays_single_leaf() {
        let tree = Octree::from_triangles(floor_quad(Vec3::ZERO, 4.0).to_vec());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_large_mesh_splits() {
        let tree = Octree::from_triangles(tiled_floor(8, 2.0));
        assert_eq!(tree.len(), 128);
        assert!(tree.depth() > 0);
        assert!(tree.node_count() > 1);
    }

    #[test]
    fn test_query_returns_local_triangles_only() {
        let tree = Octree::from_triangles(tiled_floor(8, 2.0));
        let capsule = Capsule::standing_at(Vec3::new(1.0, 0.0, 1.0), 0.35, 1.0);
        let candidates = tree.capsule_candidates(&capsule);
        assert!(!candidates.is_empty());
        assert!(candidates.len() < tree.len());

        let mut sorted = candidates.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), candidates.len());
    }

    #[test]
    fn test_bounds_include_margin() {
        let tree = Octree::from_triangles(floor_quad(Vec3::ZERO, 4.0).to_vec());
        let bounds = tree.bounds();
        assert!((bounds.min.x + BOUNDS_MARGIN).abs() < 1e-6);
        assert!((bounds.max.z - 4.0 - BOUNDS_MARGIN).abs() < 1e-6);
    }

    #[test]
    fn test_overlapping_giant_triangles_do_not_explode() {
        let mut mesh = Vec::new();
        for i in 0..12 {
            let y = i as f32 * 0.001;
            mesh.extend(floor_quad(Vec3::new(0.0, y, 0.0), 10.0));
        }
        let tree = Octree::from_triangles(mesh);
        assert!(tree.node_count() < 1000);
    }

    #[test]
    fn test_capsule_intersect_pushes_out_of_floor() {
        let tree = Octree::from_triangles(tiled_floor(8, 2.0));
        let capsule = Capsule::standing_at(Vec3::new(5.3, -0.1, 7.7), 0.35, 1.0);
        let contact = tree.capsule_intersect(&capsule).unwrap();
        assert!(contact.normal.y > 0.99, "normal {:?}", contact.normal);
        assert!((contact.depth - 0.1).abs() < 1e-4, "depth {}", contact.depth);
    }
}
