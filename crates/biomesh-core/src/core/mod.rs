//! # Core Module
//!
//! The building blocks of BioMesh: the atom model, the PDB reader and the
//! spatial primitives that downstream mesh generation starts from.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, element properties, chains and structures
//! - **File I/O** ([`io`]) - Fixed-column PDB decoding with configurable error containment
//! - **Spatial Queries** ([`spatial`]) - Bounding volumes, octant subdivision and the occupancy octree
//! - **Error Taxonomy** ([`error`]) - The [`ErrorKind`](error::ErrorKind) tag shared by every error type
//!
//! Everything here is synchronous and single-threaded. Element tables can be
//! shared between readers through an `Arc`.

pub mod error;
pub mod io;
pub mod models;
pub mod spatial;
