use super::bounding::BoundingVolume;
use nalgebra::Point3;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OctreeConfig {
    /// Depth at which subdivision stops; the root is depth 0.
    pub max_depth: usize,
    /// A node holding fewer points than this stays a leaf.
    pub min_atoms: usize,
    /// Padding added to every side of the root volume before subdivision.
    pub margin: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_atoms: 1,
            margin: 2.0,
        }
    }
}

impl OctreeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_atoms(mut self, min_atoms: usize) -> Self {
        self.min_atoms = min_atoms;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OctreeNode {
    bounds: BoundingVolume,
    depth: usize,
    point_count: usize,
    points: Vec<usize>,
    children: Option<[usize; 8]>,
}

impl OctreeNode {
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Indices into the input point slice. Only leaves hold indices.
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Node indices of the 8 children in octant order.
    pub fn children(&self) -> Option<&[usize; 8]> {
        self.children.as_ref()
    }
}

/// Occupancy-driven recursive subdivision of a bounding volume.
///
/// Nodes are stored flat; index 0 is the root. Every input point that lies
/// in the (padded) root volume belongs to exactly one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Octree {
    config: OctreeConfig,
    nodes: Vec<OctreeNode>,
}

impl Octree {
    /// Builds the tree over `points` inside `root`.
    ///
    /// `root` is first expanded by `config.margin`; points outside the
    /// expanded volume are left out. A NaN or infinite margin is ignored and
    /// the root keeps its unpadded bounds. A node is split while its depth is
    /// below `config.max_depth`, it holds at least `config.min_atoms` points
    /// (and at least one), and its bounds have non-zero size on some axis.
    /// Points on a splitting plane go to the lower octant.
    pub fn build(root: BoundingVolume, points: &[Point3<f64>], config: &OctreeConfig) -> Self {
        let mut bounds = root;
        bounds.expand(config.margin);

        let inside: Vec<usize> = (0..points.len())
            .filter(|&i| bounds.contains_point(&points[i]))
            .collect();

        let mut tree = Self {
            config: *config,
            nodes: vec![OctreeNode {
                bounds,
                depth: 0,
                point_count: inside.len(),
                points: Vec::new(),
                children: None,
            }],
        };

        let mut pending = vec![(0usize, inside)];
        while let Some((index, members)) = pending.pop() {
            let node = &tree.nodes[index];
            let split = node.depth < config.max_depth
                && members.len() >= config.min_atoms.max(1)
                && !node.bounds.is_empty()
                && node.bounds.min() != node.bounds.max();

            if !split {
                tree.nodes[index].points = members;
                continue;
            }

            let parent_bounds = node.bounds;
            let depth = node.depth + 1;
            let mut buckets: [Vec<usize>; 8] = Default::default();
            for i in members {
                // Bounds are non-empty here, so an octant always exists.
                let octant = parent_bounds.octant_index_of(&points[i]).unwrap_or(0);
                buckets[octant].push(i);
            }

            let first_child = tree.nodes.len();
            for (octant, (child_bounds, bucket)) in
                parent_bounds.subdivide().into_iter().zip(buckets).enumerate()
            {
                tree.nodes.push(OctreeNode {
                    bounds: child_bounds,
                    depth,
                    point_count: bucket.len(),
                    points: Vec::new(),
                    children: None,
                });
                pending.push((first_child + octant, bucket));
            }
            tree.nodes[index].children = Some(std::array::from_fn(|k| first_child + k));
        }

        debug!(
            points = points.len(),
            nodes = tree.node_count(),
            depth = tree.max_depth_reached(),
            "Built octree"
        );
        tree
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    pub fn root(&self) -> &OctreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> Option<&OctreeNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &OctreeNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    pub fn occupied_leaves(&self) -> impl Iterator<Item = &OctreeNode> {
        self.leaves().filter(|n| n.point_count > 0)
    }

    pub fn max_depth_reached(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Number of leaves at each depth, indexed by depth.
    pub fn leaf_counts_by_depth(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_depth_reached() + 1];
        for leaf in self.leaves() {
            counts[leaf.depth] += 1;
        }
        counts
    }

    /// The leaf that would hold `point`, or `None` if it lies outside the root.
    pub fn locate(&self, point: &Point3<f64>) -> Option<&OctreeNode> {
        let mut node = self.root();
        if !node.bounds.contains_point(point) {
            return None;
        }
        while let Some(children) = node.children {
            let octant = node.bounds.octant_index_of(point)?;
            node = &self.nodes[children[octant]];
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_root() -> BoundingVolume {
        BoundingVolume::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap()
    }

    fn octant_centers() -> Vec<Point3<f64>> {
        (0..8)
            .map(|k| {
                let coord = |bit: usize| if k & bit == 0 { 0.25 } else { 0.75 };
                Point3::new(coord(4), coord(2), coord(1))
            })
            .collect()
    }

    fn exact(max_depth: usize, min_atoms: usize) -> OctreeConfig {
        OctreeConfig::default()
            .with_margin(0.0)
            .with_max_depth(max_depth)
            .with_min_atoms(min_atoms)
    }

    #[test]
    fn one_level_places_each_point_in_its_octant() {
        let points = octant_centers();
        let tree = Octree::build(unit_root(), &points, &exact(1, 1));

        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.leaves().count(), 8);
        assert_eq!(tree.max_depth_reached(), 1);
        let children = tree.root().children().unwrap();
        for (octant, &child) in children.iter().enumerate() {
            let node = tree.node(child).unwrap();
            assert_eq!(node.points(), [octant]);
            assert_eq!(node.depth(), 1);
        }
    }

    #[test]
    fn zero_max_depth_keeps_a_single_leaf() {
        let points = octant_centers();
        let tree = Octree::build(unit_root(), &points, &exact(0, 1));
        assert_eq!(tree.node_count(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().points().len(), 8);
    }

    #[test]
    fn sparse_nodes_stop_below_min_atoms() {
        let mut points = vec![Point3::new(0.1, 0.1, 0.1); 4];
        points.push(Point3::new(0.9, 0.9, 0.9));
        let tree = Octree::build(unit_root(), &points, &exact(3, 2));

        let upper = tree.locate(&Point3::new(0.9, 0.9, 0.9)).unwrap();
        assert_eq!(upper.depth(), 1);
        assert_eq!(upper.point_count(), 1);

        let lower = tree.locate(&Point3::new(0.1, 0.1, 0.1)).unwrap();
        assert_eq!(lower.depth(), 3);
        assert_eq!(lower.point_count(), 4);
    }

    #[test]
    fn points_on_split_plane_go_to_lower_octant() {
        let points = [Point3::new(0.5, 0.5, 0.5)];
        let tree = Octree::build(unit_root(), &points, &exact(1, 1));
        let first = tree.root().children().unwrap()[0];
        assert_eq!(tree.node(first).unwrap().point_count(), 1);
        assert_eq!(tree.occupied_leaves().count(), 1);
    }

    #[test]
    fn leaves_partition_contained_points() {
        let points: Vec<_> = (0..50)
            .map(|i| {
                let t = i as f64 / 49.0;
                Point3::new(t, (t * 7.0).fract(), (t * 13.0).fract())
            })
            .collect();
        let tree = Octree::build(unit_root(), &points, &exact(4, 3));

        let mut seen: Vec<usize> = tree.leaves().flat_map(|l| l.points().iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        for leaf in tree.leaves() {
            for &i in leaf.points() {
                assert!(leaf.bounds().contains_point(&points[i]));
            }
        }
    }

    #[test]
    fn margin_expands_root_and_outside_points_are_dropped() {
        let points = [Point3::new(1.5, 0.5, 0.5), Point3::new(5.0, 0.5, 0.5)];
        let config = OctreeConfig::default().with_margin(1.0).with_max_depth(0);
        let tree = Octree::build(unit_root(), &points, &config);
        assert_eq!(tree.root().bounds().min(), Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(tree.root().point_count(), 1);
        assert!(tree.locate(&points[1]).is_none());
    }

    #[test]
    fn empty_root_is_a_single_empty_leaf() {
        let tree = Octree::build(BoundingVolume::empty(), &[], &OctreeConfig::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.occupied_leaves().count(), 0);
        assert_eq!(tree.leaf_counts_by_depth(), vec![1]);
    }

    #[test]
    fn leaf_counts_by_depth_sums_to_leaf_count() {
        let points = octant_centers();
        let tree = Octree::build(unit_root(), &points[..1], &exact(2, 1));
        let counts = tree.leaf_counts_by_depth();
        assert_eq!(counts, vec![0, 7, 8]);
        assert_eq!(counts.iter().sum::<usize>(), tree.leaves().count());
    }

    #[test]
    fn infinite_margin_from_config_keeps_root_bounds() {
        let config: OctreeConfig = toml::from_str("margin = inf\nmax-depth = 1").unwrap();
        assert!(config.margin.is_infinite());

        let points = [Point3::new(0.5, 0.5, 0.5)];
        let tree = Octree::build(unit_root(), &points, &config);
        assert_eq!(*tree.root().bounds(), unit_root());
        assert_eq!(tree.node_count(), 9);
        for leaf in tree.leaves() {
            assert!(leaf.bounds().is_valid());
            for &i in leaf.points() {
                assert!(leaf.bounds().contains_point(&points[i]));
            }
        }
        assert_eq!(tree.locate(&points[0]).unwrap().points(), [0]);
    }

    #[test]
    fn nan_margin_is_ignored() {
        let config = exact(1, 1).with_margin(f64::NAN);
        let tree = Octree::build(unit_root(), &octant_centers(), &config);
        assert_eq!(*tree.root().bounds(), unit_root());
        assert_eq!(tree.occupied_leaves().count(), 8);
    }

    #[test]
    fn point_sized_root_is_not_split() {
        let point = Point3::new(3.0, -2.0, 7.5);
        let root = BoundingVolume::from_point(&point);
        let tree = Octree::build(root, &[point], &exact(4, 1));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().points(), [0]);
    }

    #[test]
    fn coincident_points_stop_once_bounds_collapse() {
        let points = vec![Point3::new(1.0, 1.0, 1.0); 5];
        let root = BoundingVolume::from_point(&points[0]);
        let tree = Octree::build(root, &points, &exact(6, 2));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().point_count(), 5);
    }

    #[test]
    fn flat_root_still_splits_along_its_extent() {
        let points = [Point3::new(0.25, 0.0, 0.0), Point3::new(0.75, 0.0, 0.0)];
        let root =
            BoundingVolume::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let tree = Octree::build(root, &points, &exact(1, 1));
        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.occupied_leaves().count(), 2);
    }

    #[test]
    fn config_deserializes_from_kebab_case() {
        let config: OctreeConfig = toml::from_str("max-depth = 3\nmin-atoms = 4").unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.min_atoms, 4);
        assert_eq!(config.margin, OctreeConfig::default().margin);
    }
}
