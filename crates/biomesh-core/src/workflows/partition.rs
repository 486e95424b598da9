use crate::core::models::structure::Structure;
use crate::core::spatial::octree::{Octree, OctreeConfig};
use tracing::{info, instrument};

/// Builds the occupancy octree over a structure's atom positions, rooted at
/// the structure's bounding box.
#[instrument(skip_all, name = "partition_workflow")]
pub fn partition(structure: &Structure, config: &OctreeConfig) -> Octree {
    let points = structure.coordinates();
    let octree = Octree::build(structure.bounding_box(), &points, config);
    info!(
        "Partitioned {} atom(s) into {} node(s), {} occupied leaf(s), depth {}.",
        points.len(),
        octree.node_count(),
        octree.occupied_leaves().count(),
        octree.max_depth_reached()
    );
    octree
}
