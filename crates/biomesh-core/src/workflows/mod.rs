//! # Workflows Module
//!
//! High-level entry points that tie the core components together.
//!
//! - **Loading** ([`load`]) - Parse PDB text or a PDB file into a [`Structure`](crate::core::models::structure::Structure)
//!   together with the diagnostics gathered along the way.
//! - **Partitioning** ([`partition`]) - Subdivide the space around a loaded structure
//!   into an occupancy octree for mesh generation.

pub mod load;
pub mod partition;
