use crate::core::error::ErrorKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode a single atom record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Line is too short for an ATOM/HETATM record ({length} chars, need at least {required})")]
    LineTooShort { length: usize, required: usize },
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("Invalid number in field '{field}' (value: '{value}')")]
    MalformedNumber { field: &'static str, value: String },
    #[error("Number out of range in field '{field}' (value: '{value}')")]
    NumberOutOfRange { field: &'static str, value: String },
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::LineTooShort { .. } => ErrorKind::LineTooShort,
            RecordError::EmptyField { .. } => ErrorKind::EmptyField,
            RecordError::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            RecordError::NumberOutOfRange { .. } => ErrorKind::NumberOutOfRange,
        }
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("Cannot read file '{path}': {source}", path = path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl PdbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PdbError::FileAccess { .. } => ErrorKind::FileAccess,
            PdbError::Parse { source, .. } => source.kind(),
        }
    }

    /// The 1-based line number of a parse failure.
    pub fn line(&self) -> Option<usize> {
        match self {
            PdbError::FileAccess { .. } => None,
            PdbError::Parse { line, .. } => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_map_to_their_kind() {
        assert_eq!(
            RecordError::LineTooShort {
                length: 40,
                required: 54
            }
            .kind(),
            ErrorKind::LineTooShort
        );
        assert_eq!(
            RecordError::EmptyField { field: "atom name" }.kind(),
            ErrorKind::EmptyField
        );
        assert_eq!(
            RecordError::MalformedNumber {
                field: "x",
                value: "1.2.3".into()
            }
            .kind(),
            ErrorKind::MalformedNumber
        );
    }

    #[test]
    fn parse_error_reports_line_and_inner_kind() {
        let err = PdbError::Parse {
            line: 12,
            source: RecordError::NumberOutOfRange {
                field: "serial",
                value: "99999999999".into(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::NumberOutOfRange);
        assert_eq!(err.line(), Some(12));
        assert!(err.to_string().starts_with("Parse error on line 12"));
    }

    #[test]
    fn file_access_error_has_no_line() {
        let err = PdbError::FileAccess {
            path: PathBuf::from("missing.pdb"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.kind(), ErrorKind::FileAccess);
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("missing.pdb"));
    }
}
