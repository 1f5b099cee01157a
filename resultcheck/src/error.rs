use crate::types::Side;
use std::fmt;
use thiserror::Error;

/// A position inside a result file, rendered as `file:line`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    file: String,
    line: usize,
}

impl Location {
    pub fn new<S: Into<String>>(file: S, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        self.file.as_str()
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A malformed or out-of-contract value, before it is attributed to a file.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum FieldError {
    #[error("null not allowed")]
    NullNotAllowed,

    #[error("{kind} field exceeds length {length}")]
    ExceedsLength { kind: &'static str, length: u32 },

    #[error("invalid {kind} {value:?}")]
    InvalidNumber { kind: &'static str, value: String },

    #[error("invalid decimal {value:?}")]
    InvalidDecimal { value: String },

    #[error("decimal {value:?} out of range")]
    DecimalOverflow { value: String },
}

/// A [`FieldError`] tagged with the side that produced it.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{side}: {source}")]
pub struct Blamed {
    pub side: Side,
    pub source: FieldError,
}

impl Blamed {
    pub(crate) fn new(side: Side, source: FieldError) -> Self {
        Self { side, source }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureError {
    TooFewFields,
    TooFewResults,
    TooManyResults,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::TooFewFields => write!(f, "too few fields"),
            StructureError::TooFewResults => write!(f, "too few results"),
            StructureError::TooManyResults => write!(f, "too many results"),
        }
    }
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("schema line {line}: {message}")]
    SchemaDefinition { line: usize, message: String },

    #[error("{location}\t{column}: {source}")]
    Field {
        side: Side,
        location: Location,
        column: String,
        source: FieldError,
    },

    #[error("{location}\t{kind}")]
    RecordStructure {
        side: Side,
        location: Location,
        kind: StructureError,
    },

    #[error("{location}\t{column}: expected {expected} got {actual}")]
    ValueMismatch {
        location: Location,
        column: String,
        expected: String,
        actual: String,
    },

    #[error("tolerance must be a finite, non-negative percentage, got {value}")]
    InvalidTolerance { value: f64 },
}

impl VerifyError {
    /// The file the error is attributed to, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            VerifyError::Field { side, .. } | VerifyError::RecordStructure { side, .. } => {
                Some(*side)
            }
            VerifyError::ValueMismatch { .. } => Some(Side::Candidate),
            VerifyError::SchemaDefinition { .. } | VerifyError::InvalidTolerance { .. } => None,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            VerifyError::Field { location, .. }
            | VerifyError::RecordStructure { location, .. }
            | VerifyError::ValueMismatch { location, .. } => Some(location),
            VerifyError::SchemaDefinition { .. } | VerifyError::InvalidTolerance { .. } => None,
        }
    }
}

pub type Result<T, E = VerifyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_message() {
        let error = VerifyError::Field {
            side: Side::Reference,
            location: Location::new("reference/q1.tbl", 7),
            column: "l_comment".to_string(),
            source: FieldError::ExceedsLength {
                kind: "varchar",
                length: 44,
            },
        };
        assert_eq!(
            error.to_string(),
            "reference/q1.tbl:7\tl_comment: varchar field exceeds length 44"
        );
        assert_eq!(error.side(), Some(Side::Reference));
        assert_eq!(error.location().map(Location::line), Some(7));
    }

    #[test]
    fn test_mismatch_message() {
        let error = VerifyError::ValueMismatch {
            location: Location::new("out/q1.tbl", 3),
            column: "revenue".to_string(),
            expected: "10.50".to_string(),
            actual: "10.49".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "out/q1.tbl:3\trevenue: expected 10.50 got 10.49"
        );
    }

    #[test]
    fn test_structure_message() {
        let error = VerifyError::RecordStructure {
            side: Side::Candidate,
            location: Location::new("out/q1.tbl", 12),
            kind: StructureError::TooManyResults,
        };
        assert_eq!(error.to_string(), "out/q1.tbl:12\ttoo many results");
        assert!(VerifyError::SchemaDefinition {
            line: 1,
            message: "unknown type text".to_string()
        }
        .location()
        .is_none());
    }
}
