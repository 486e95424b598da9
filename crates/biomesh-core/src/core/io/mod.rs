//! Provides input functionality for molecular structure files.
//!
//! Parsing failures are reported through the error types in [`error`]; the
//! PDB reader itself lives in [`pdb`].

pub mod error;
pub mod pdb;
