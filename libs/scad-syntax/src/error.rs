//! # Syntax Errors
//!
//! Structured parse failures surfaced by the parse engine.

use crate::Rule;
use thiserror::Error;

/// A parse failure with the furthest-reached offset and the set of
/// grammar rules that could have matched there.
///
/// The offset is relative to the buffer handed to
/// [`parse_source`](crate::parse_source); callers that stitched several
/// origins together map it back through their [`SourceMap`](crate::SourceMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {offset}: {message}")]
pub struct SyntaxError {
    /// Byte offset of the furthest position the parser reached.
    pub offset: u32,
    /// Names of the productions that could have matched at the offset.
    pub expected: Vec<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn from_pest(err: pest::error::Error<Rule>) -> Self {
        let offset = match err.location {
            pest::error::InputLocation::Pos(pos) => pos,
            pest::error::InputLocation::Span((start, _)) => start,
        } as u32;

        let expected = match &err.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                positives.iter().map(|rule| format!("{rule:?}")).collect()
            }
            pest::error::ErrorVariant::CustomError { .. } => Vec::new(),
        };

        let message = err.variant.message().into_owned();

        Self { offset, expected, message }
    }
}
