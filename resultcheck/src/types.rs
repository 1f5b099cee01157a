use std::borrow::Cow;
use std::fmt;

/// Which of the two files being compared a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Candidate,
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Candidate => write!(f, "candidate"),
            Side::Reference => write!(f, "reference"),
        }
    }
}

/// One step of a [`FieldReader`](crate::read::fields::FieldReader).
#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    Field(Cow<'a, str>),
    EndOfRecord,
    EndOfFile,
}
