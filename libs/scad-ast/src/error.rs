//! # Errors
//!
//! Error types surfaced by parsing, include expansion, path resolution,
//! and AST deserialization.

use scad_syntax::{OutOfRange, Position};
use std::path::PathBuf;
use thiserror::Error;

/// A syntax error with its location mapped back to the original origin.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    /// Furthest-reached location, reported against the original origin.
    pub position: Position,
    /// Names of the productions that could have matched there.
    pub expected: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

/// Errors that can occur while producing or rebuilding an AST.
///
/// A failed parse aborts; no partial AST is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The input violates the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A file passed to the file-level API does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Library lookup failed in every search location.
    #[error("library not found: {libfile}")]
    LibraryNotFound { libfile: String },

    /// An `include <path>` directive could not be resolved; the position
    /// names the directive in the including file.
    #[error("included file not found: {path} (at {position})")]
    IncludeNotFound { path: String, position: Position },

    /// Underlying read failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A literal in the parse tree could not be decoded.
    #[error("invalid literal: {0}")]
    InvalidLiteral(String),

    /// The parse tree had a shape the lowering visitor does not accept.
    #[error("malformed parse tree: {0}")]
    MalformedTree(String),

    /// An offset could not be mapped through the source map.
    #[error(transparent)]
    SourceMap(#[from] OutOfRange),

    /// Unknown node tag or missing field while rebuilding an AST.
    #[error("malformed serialized AST: {reason}")]
    Deserialization { reason: String },
}

impl Error {
    pub(crate) fn deserialization(reason: impl Into<String>) -> Self {
        Self::Deserialization { reason: reason.into() }
    }
}
