use crate::core::io::error::PdbError;
use crate::core::io::pdb::config::ReaderConfig;
use crate::core::io::pdb::reader::{Diagnostics, StructureReader};
use crate::core::models::element::ElementTable;
use crate::core::models::structure::Structure;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// The outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStructure {
    pub structure: Structure,
    pub diagnostics: Diagnostics,
    pub lines_processed: usize,
}

impl LoadedStructure {
    fn from_reader(reader: StructureReader) -> Self {
        let lines_processed = reader.lines_processed();
        let (structure, diagnostics) = reader.finish();
        Self {
            structure,
            diagnostics,
            lines_processed,
        }
    }
}

/// Parses PDB text using the default element table.
pub fn parse(text: &str, config: &ReaderConfig) -> Result<LoadedStructure, PdbError> {
    parse_with_table(text, config, Arc::new(ElementTable::new()))
}

#[instrument(skip_all, name = "load_workflow")]
pub fn parse_with_table(
    text: &str,
    config: &ReaderConfig,
    table: Arc<ElementTable>,
) -> Result<LoadedStructure, PdbError> {
    let mut reader = StructureReader::with_table(*config, table);
    let summary = reader.parse(text)?;
    info!(
        "Loaded {} atom(s) in {} chain(s) from {} line(s).",
        summary.atoms, summary.chains, summary.lines_processed
    );
    Ok(LoadedStructure::from_reader(reader))
}

/// Reads and parses a PDB file using the default element table.
///
/// # Errors
///
/// [`PdbError::FileAccess`] when the file cannot be read; parse failures are
/// only returned under a fail-fast policy.
pub fn parse_file(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<LoadedStructure, PdbError> {
    parse_file_with_table(path, config, Arc::new(ElementTable::new()))
}

#[instrument(skip_all, name = "load_file_workflow", fields(path = %path.as_ref().display()))]
pub fn parse_file_with_table(
    path: impl AsRef<Path>,
    config: &ReaderConfig,
    table: Arc<ElementTable>,
) -> Result<LoadedStructure, PdbError> {
    let mut reader = StructureReader::with_table(*config, table);
    let summary = reader.parse_file(path)?;
    info!(
        "Loaded {} atom(s) in {} chain(s) ({} warning(s), {} error(s)).",
        summary.atoms, summary.chains, summary.warnings, summary.errors
    );
    Ok(LoadedStructure::from_reader(reader))
}
