use super::config::{ParsePolicy, ReaderConfig};
use super::record::{self, AtomRecord, RecordType};
use crate::core::io::error::{PdbError, RecordError};
use crate::core::models::atom::Atom;
use crate::core::models::builder::AtomBuilder;
use crate::core::models::chain::Chain;
use crate::core::models::element::ElementTable;
use crate::core::models::structure::{Header, Structure};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A condition worth reporting that does not invalidate the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    /// A HETATM record was skipped because hetero atoms are not enabled.
    HetatmNotSupported,
    /// A second MODEL record was reached; ingestion stopped there.
    AdditionalModel,
    /// The input produced no atoms.
    NoAtomsFound,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Warning::HetatmNotSupported => "HETATM not supported",
            Warning::AdditionalModel => "Additional model ignored; only the first model is read",
            Warning::NoAtomsFound => "No atoms found",
        };
        f.write_str(msg)
    }
}

/// A warning or error tied to the 1-based line it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<K> {
    pub line: Option<usize>,
    pub kind: K,
}

impl<K> Diagnostic<K> {
    pub fn at_line(line: usize, kind: K) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    pub fn global(kind: K) -> Self {
        Self { line: None, kind }
    }
}

impl<K: fmt::Display> fmt::Display for Diagnostic<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<Diagnostic<Warning>>,
    pub errors: Vec<Diagnostic<RecordError>>,
}

impl Diagnostics {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
        self.errors.clear();
    }
}

/// Counts describing the outcome of one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub atoms: usize,
    pub chains: usize,
    pub lines_processed: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Line-by-line reader turning PDB text into a [`Structure`].
///
/// Only the first model is read. Reading stops at `END`, and a second
/// `MODEL` record stops it with [`Warning::AdditionalModel`]. Every call to
/// [`parse`](Self::parse) or [`parse_file`](Self::parse_file) starts from a
/// clean state.
pub struct StructureReader {
    config: ReaderConfig,
    table: Arc<ElementTable>,
    structure: Structure,
    diagnostics: Diagnostics,
    lines_processed: usize,
}

impl Default for StructureReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

impl StructureReader {
    /// Creates a reader backed by the default element table.
    pub fn new(config: ReaderConfig) -> Self {
        Self::with_table(config, Arc::new(ElementTable::new()))
    }

    pub fn with_table(config: ReaderConfig, table: Arc<ElementTable>) -> Self {
        Self {
            config,
            table,
            structure: Structure::new(),
            diagnostics: Diagnostics::default(),
            lines_processed: 0,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    /// Reads `path` fully and parses its contents.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::FileAccess`] if the file cannot be read, otherwise
    /// whatever [`parse`](Self::parse) returns.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<ParseSummary, PdbError> {
        let path = path.as_ref();
        self.clear();
        let text = fs::read_to_string(path).map_err(|source| PdbError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "Read structure file");
        self.parse(&text)
    }

    /// Parses a whole PDB document held in memory.
    ///
    /// Under [`ParsePolicy::Accumulate`] undecodable lines are recorded in
    /// [`errors`](Self::errors) and skipped, so this only fails under
    /// [`ParsePolicy::FailFast`]. Atoms read before the failing line remain
    /// available in either case.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::Parse`] for the first undecodable atom line when the
    /// policy is fail-fast.
    pub fn parse(&mut self, text: &str) -> Result<ParseSummary, PdbError> {
        self.clear();
        debug!(
            policy = ?self.config.policy,
            include_hetatm = self.config.include_hetatm,
            "Parsing structure"
        );

        let table = Arc::clone(&self.table);
        let mut builder = AtomBuilder::new(&table);
        let mut in_model = false;
        let mut model_closed = false;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            self.lines_processed = line_no;

            if line.trim().is_empty() {
                continue;
            }

            let record_type = RecordType::classify(line);
            trace!(line = line_no, ?record_type, "Classified line");

            match record_type {
                RecordType::Ignorable => {}
                RecordType::Header => {
                    if self.structure.header().is_none() {
                        self.structure.set_header(record::parse_header(line));
                    }
                }
                RecordType::Model => {
                    if in_model || model_closed {
                        warn!(line = line_no, "Additional model found; keeping only the first");
                        self.diagnostics
                            .warnings
                            .push(Diagnostic::at_line(line_no, Warning::AdditionalModel));
                        break;
                    }
                    in_model = true;
                }
                RecordType::EndModel => {
                    in_model = false;
                    model_closed = true;
                }
                RecordType::End => break,
                _ if model_closed => {
                    trace!(line = line_no, "Skipping atom record outside the first model");
                }
                RecordType::Hetatm if !self.config.include_hetatm => {
                    self.diagnostics
                        .warnings
                        .push(Diagnostic::at_line(line_no, Warning::HetatmNotSupported));
                }
                RecordType::Atom | RecordType::Hetatm => match AtomRecord::parse(line) {
                    Ok(record) => {
                        let atom = build_atom(&mut builder, &record);
                        self.structure.add_atom(atom);
                    }
                    Err(source) => {
                        warn!(line = line_no, error = %source, "Skipping undecodable atom record");
                        self.diagnostics
                            .errors
                            .push(Diagnostic::at_line(line_no, source.clone()));
                        if self.config.policy == ParsePolicy::FailFast {
                            return Err(PdbError::Parse {
                                line: line_no,
                                source,
                            });
                        }
                    }
                },
            }
        }

        if !self.structure.has_data() {
            warn!("No atoms found in input");
            self.diagnostics
                .warnings
                .push(Diagnostic::global(Warning::NoAtomsFound));
        }

        let summary = self.summary();
        debug!(
            atoms = summary.atoms,
            chains = summary.chains,
            lines = summary.lines_processed,
            warnings = summary.warnings,
            errors = summary.errors,
            "Finished parsing structure"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            atoms: self.structure.atom_count(),
            chains: self.structure.chain_count(),
            lines_processed: self.lines_processed,
            warnings: self.diagnostics.warnings.len(),
            errors: self.diagnostics.errors.len(),
        }
    }

    pub fn atom_count(&self) -> usize {
        self.structure.atom_count()
    }

    pub fn lines_processed(&self) -> usize {
        self.lines_processed
    }

    pub fn atoms(&self) -> &[Atom] {
        self.structure.atoms()
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.structure.chain_ids()
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.structure.chain(id)
    }

    pub fn header(&self) -> Option<&Header> {
        self.structure.header()
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn warnings(&self) -> &[Diagnostic<Warning>] {
        &self.diagnostics.warnings
    }

    pub fn errors(&self) -> &[Diagnostic<RecordError>] {
        &self.diagnostics.errors
    }

    pub fn had_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn clear(&mut self) {
        self.structure.clear();
        self.diagnostics.clear();
        self.lines_processed = 0;
    }

    /// Consumes the reader, handing out the parsed structure and its
    /// diagnostics.
    pub fn finish(self) -> (Structure, Diagnostics) {
        (self.structure, self.diagnostics)
    }
}

fn build_atom(builder: &mut AtomBuilder<'_>, record: &AtomRecord) -> Atom {
    builder
        .reset()
        .serial(record.serial)
        .name(&record.name)
        .alt_loc(record.alt_loc)
        .residue_name(&record.res_name)
        .chain_id(&record.chain_id)
        .residue_seq(record.res_seq)
        .insertion_code(record.insertion_code)
        .position(record.position)
        .occupancy(record.occupancy)
        .temp_factor(record.temp_factor)
        .element(&record.element)
        .charge(&record.charge)
        .hetero(record.hetero)
        .build()
}
