use std::fmt;

/// Tag shared by every error the library reports, so callers can branch on the
/// category of a failure without matching each module's error enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input file could not be opened or read.
    FileAccess,
    /// An atom record is shorter than its mandatory columns.
    LineTooShort,
    /// A numeric field did not parse as a whole.
    MalformedNumber,
    /// A numeric field parsed but does not fit its type.
    NumberOutOfRange,
    /// An element symbol has no entry in the element table.
    UnknownElement,
    /// A mandatory field is blank.
    EmptyField,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ErrorKind::FileAccess => "file access",
                ErrorKind::LineTooShort => "line too short",
                ErrorKind::MalformedNumber => "malformed number",
                ErrorKind::NumberOutOfRange => "number out of range",
                ErrorKind::UnknownElement => "unknown element",
                ErrorKind::EmptyField => "empty field",
            }
        )
    }
}
