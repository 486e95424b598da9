//! Axis-aligned bounding volumes and the octree built from them.

pub mod bounding;
pub mod octree;
