use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata field overflow: field holds {capacity} bytes, got {got}")]
    FieldOverflow { capacity: usize, got: usize },

    #[error("invalid length: expected {expected} got {got}")]
    InvalidLength { expected: usize, got: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("wrong number of bases: expected {expected} got {got}")]
    WrongBaseCount { expected: usize, got: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("malformed document: expected root element {expected}, got {got}")]
    UnexpectedRoot { expected: &'static str, got: String },

    #[error("malformed document: expected namespace {expected}, got {got:?}")]
    WrongNamespace { expected: &'static str, got: Option<String> },

    #[error("malformed document: missing element {0}")]
    MissingElement(&'static str),

    #[error("malformed document: element {element} is not an unsigned integer: {value:?}")]
    InvalidInteger { element: &'static str, value: String },

    #[error("malformed document: expected {expected} bases, found {got}")]
    MissingBases { expected: usize, got: usize },

    #[error("malformed document: {element} does not match the value derived from {from}")]
    Inconsistent { element: &'static str, from: &'static str },

    #[error("malformed document: {0}")]
    Syntax(String),
}

impl From<quick_xml::Error> for DocumentError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Syntax(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocumentError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Syntax(e.to_string())
    }
}
