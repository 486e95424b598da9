//! Reading of fixed-column Protein Data Bank files.
//!
//! [`record`] decodes single lines, [`reader`] drives it over a whole
//! document and aggregates the atoms into a
//! [`Structure`](crate::core::models::structure::Structure).

pub mod config;
pub mod reader;
pub mod record;
