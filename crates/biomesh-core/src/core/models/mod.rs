//! # Core Models Module
//!
//! Data structures describing an ingested molecular structure.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom with coordinates, record metadata and element properties
//! - [`element`] - Element symbol to radius/mass lookup table
//! - [`builder`] - Field-by-field atom construction with element auto-detection
//! - [`chain`] - Atoms grouped by chain identifier, with a cached bounding box
//! - [`structure`] - The flat atom list and its chains, as produced by a parse
//!
//! ## Usage
//!
//! ```ignore
//! use biomesh::core::models::{builder::AtomBuilder, element::ElementTable};
//!
//! let table = ElementTable::new();
//! let atom = AtomBuilder::new(&table)
//!     .name("CA")
//!     .chain_id("A")
//!     .coordinates(1.0, 2.0, 3.0)
//!     .build();
//! assert_eq!(atom.element, "C");
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod element;
pub mod structure;
