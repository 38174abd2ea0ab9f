use thiserror::Error;

use crate::models::TypeId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("Invalid span: begin {begin} is greater than end {end}")]
    InvalidSpan { begin: u32, end: u32 },

    #[error("Span {begin}..{end} is outside of the text (length {len})")]
    TextOutOfBounds { begin: u32, end: u32, len: usize },

    #[error("Span {begin}..{end} does not fall on character boundaries")]
    NotCharBoundary { begin: u32, end: u32 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TypeSystemError {
    #[error("Type is already defined: {0}")]
    DuplicateType(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Unknown type id: {0}")]
    UnknownTypeId(TypeId),
}
