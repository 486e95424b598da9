//! # BioMesh Core Library
//!
//! Ingestion of molecular structures from fixed-column PDB text into an atom
//! model annotated with element, radius and mass, plus the bounding-volume
//! and octree machinery used to partition space for volumetric meshing.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** Data models (`Atom`, `Chain`, `Structure`),
//!   the element table, the line-level record parser and the `StructureReader`,
//!   and the spatial types `BoundingVolume` and `Octree`.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie the pieces
//!   together: loading a structure from text or a file, and partitioning a
//!   loaded structure into an occupancy octree.
//!
//! ## Example
//!
//! ```ignore
//! use biomesh::core::io::pdb::config::ReaderConfig;
//! use biomesh::workflows::{load, partition};
//! use biomesh::core::spatial::octree::OctreeConfig;
//!
//! let loaded = load::parse_file("1abc.pdb", &ReaderConfig::default())?;
//! let octree = partition::partition(&loaded.structure, &OctreeConfig::default());
//! println!("{} occupied leaves", octree.occupied_leaves().count());
//! ```

pub mod core;
pub mod workflows;
