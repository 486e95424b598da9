//! Fixed-column decoding of individual PDB lines.
//!
//! Columns follow the legacy wwPDB layout. Every field is extracted with
//! bounds checking, so a line that ends early simply yields empty fields;
//! whether an empty field is acceptable is decided per field.

use crate::core::io::error::RecordError;
use crate::core::models::structure::Header;
use nalgebra::Point3;
use std::num::IntErrorKind;

/// Minimum length of an ATOM/HETATM line: everything up to the end of the
/// z coordinate.
pub const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    name: &'static str,
    start: usize,
    len: usize,
}

const fn column(name: &'static str, start: usize, len: usize) -> Column {
    Column { name, start, len }
}

const RECORD_NAME: Column = column("record name", 0, 6);
const SERIAL: Column = column("serial", 6, 5);
const ATOM_NAME: Column = column("atom name", 12, 4);
const ALT_LOC: Column = column("alt loc", 16, 1);
const RES_NAME: Column = column("residue name", 17, 3);
const CHAIN_ID: Column = column("chain id", 21, 1);
const RES_SEQ: Column = column("residue seq", 22, 4);
const INSERTION_CODE: Column = column("insertion code", 26, 1);
const X: Column = column("x", 30, 8);
const Y: Column = column("y", 38, 8);
const Z: Column = column("z", 46, 8);
const OCCUPANCY: Column = column("occupancy", 54, 6);
const TEMP_FACTOR: Column = column("temp factor", 60, 6);
const ELEMENT: Column = column("element", 76, 2);
const CHARGE: Column = column("charge", 78, 2);

const HEADER_CLASSIFICATION: Column = column("classification", 10, 40);
const HEADER_DATE: Column = column("deposition date", 50, 9);
const HEADER_ID_CODE: Column = column("id code", 62, 4);

/// Returns the trimmed content of `col`, or `""` when the line does not reach it.
fn field(line: &str, col: Column) -> &str {
    let end = (col.start + col.len).min(line.len());
    line.get(col.start..end).unwrap_or("").trim()
}

fn required_text(line: &str, col: Column) -> Result<&str, RecordError> {
    let value = field(line, col);
    if value.is_empty() {
        return Err(RecordError::EmptyField { field: col.name });
    }
    Ok(value)
}

fn optional_char(line: &str, col: Column) -> Option<char> {
    field(line, col).chars().next()
}

fn parse_int(line: &str, col: Column) -> Result<i32, RecordError> {
    let text = required_text(line, col)?;
    text.parse::<i32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RecordError::NumberOutOfRange {
            field: col.name,
            value: text.to_string(),
        },
        _ => RecordError::MalformedNumber {
            field: col.name,
            value: text.to_string(),
        },
    })
}

fn parse_float_text(text: &str, col: Column) -> Result<f64, RecordError> {
    let value: f64 = text.parse().map_err(|_| RecordError::MalformedNumber {
        field: col.name,
        value: text.to_string(),
    })?;
    if value.is_finite() {
        return Ok(value);
    }
    // "inf"/"nan" spellings are not numbers here; a digit string that
    // overflowed to infinity is.
    if text.bytes().any(|b| b.is_ascii_digit()) {
        Err(RecordError::NumberOutOfRange {
            field: col.name,
            value: text.to_string(),
        })
    } else {
        Err(RecordError::MalformedNumber {
            field: col.name,
            value: text.to_string(),
        })
    }
}

fn parse_float(line: &str, col: Column) -> Result<f64, RecordError> {
    parse_float_text(required_text(line, col)?, col)
}

fn parse_optional_float(line: &str, col: Column, default: f64) -> Result<f64, RecordError> {
    match field(line, col) {
        "" => Ok(default),
        text => parse_float_text(text, col),
    }
}

/// Classification of a line by its leading record-name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Atom,
    Hetatm,
    Header,
    Model,
    EndModel,
    End,
    Ignorable,
}

impl RecordType {
    /// Classifies a line by columns 1-6. Matching is case-sensitive.
    pub fn classify(line: &str) -> Self {
        match field(line, RECORD_NAME) {
            "ATOM" => RecordType::Atom,
            "HETATM" => RecordType::Hetatm,
            "HEADER" => RecordType::Header,
            "MODEL" => RecordType::Model,
            "ENDMDL" => RecordType::EndModel,
            "END" => RecordType::End,
            _ => RecordType::Ignorable,
        }
    }

    pub fn is_atom(self) -> bool {
        matches!(self, RecordType::Atom | RecordType::Hetatm)
    }
}

/// The decoded fields of one ATOM or HETATM line.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub hetero: bool,
    pub serial: i32,
    pub name: String,
    pub alt_loc: Option<char>,
    pub res_name: String,
    pub chain_id: String,
    pub res_seq: i32,
    pub insertion_code: Option<char>,
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub element: String,
    pub charge: String,
}

impl AtomRecord {
    /// Decodes an ATOM/HETATM line.
    ///
    /// # Errors
    ///
    /// - [`RecordError::LineTooShort`] if the line ends before the z coordinate.
    /// - [`RecordError::EmptyField`] if serial, atom name, residue name,
    ///   residue number or a coordinate is blank.
    /// - [`RecordError::MalformedNumber`] if a present numeric field is not a
    ///   number in its entirety.
    /// - [`RecordError::NumberOutOfRange`] if a numeric field overflows.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        if line.len() < MIN_ATOM_RECORD_LEN {
            return Err(RecordError::LineTooShort {
                length: line.len(),
                required: MIN_ATOM_RECORD_LEN,
            });
        }

        let serial = parse_int(line, SERIAL)?;
        let name = required_text(line, ATOM_NAME)?.to_string();
        let res_name = required_text(line, RES_NAME)?.to_string();
        let res_seq = parse_int(line, RES_SEQ)?;
        let x = parse_float(line, X)?;
        let y = parse_float(line, Y)?;
        let z = parse_float(line, Z)?;

        Ok(Self {
            hetero: field(line, RECORD_NAME) == "HETATM",
            serial,
            name,
            alt_loc: optional_char(line, ALT_LOC),
            res_name,
            chain_id: field(line, CHAIN_ID).to_string(),
            res_seq,
            insertion_code: optional_char(line, INSERTION_CODE),
            position: Point3::new(x, y, z),
            occupancy: parse_optional_float(line, OCCUPANCY, 1.0)?,
            temp_factor: parse_optional_float(line, TEMP_FACTOR, 0.0)?,
            element: field(line, ELEMENT).to_string(),
            charge: field(line, CHARGE).to_string(),
        })
    }
}

/// Decodes a HEADER line. Missing columns yield empty strings.
pub fn parse_header(line: &str) -> Header {
    Header {
        classification: field(line, HEADER_CLASSIFICATION).to_string(),
        deposition_date: field(line, HEADER_DATE).to_string(),
        id_code: field(line, HEADER_ID_CODE).to_string(),
    }
}
