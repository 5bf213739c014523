//! # scad-ast
//!
//! Typed, position-annotated AST for OpenSCAD and the file-level parse
//! API around it.
//!
//! ## Architecture
//!
//! ```text
//! source text ── include pre-processor ──► combined buffer + source map
//!                                                   │
//!                                                   ▼
//!                              scad-syntax (pest) ──► parse tree
//!                                                   │
//!                                                   ▼
//!                         lowering visitor ──► AST (positions via map)
//! ```
//!
//! File-level parses are cached process-wide, keyed by canonical path and
//! options, and invalidated when the file's mtime changes.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::{parse_string, ParseOptions};
//!
//! let ast = parse_string("x = 10 + 5;", &ParseOptions::default()).unwrap();
//! assert_eq!(ast.statements.len(), 1);
//! ```

pub mod ast;
mod cache;
mod error;
mod includes;
mod resolver;
mod serialize;
mod visitor;

pub use ast::{
    Argument, Assignment, Ast, BinaryOp, Expression, ExpressionKind, Instantiation,
    InstantiationKind, ListCompElement, ListCompKind, Parameter, Statement, StatementKind,
    UnaryOp,
};
pub use error::{Error, ParseError};
pub use includes::expand_includes;
pub use resolver::find_library_file;
pub use scad_syntax::{OutOfRange, Position, SourceMap, SourceSegment, SyntaxError};
#[cfg(feature = "yaml")]
pub use serialize::{from_yaml_str, to_yaml_string};
pub use serialize::{from_dict, from_json_str, to_dict, to_json_string};
pub use visitor::tree_to_ast::transform;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Origin name used for anonymous string input.
pub const STRING_ORIGIN: &str = "<string>";

/// Options recognized by the parse entry points.
///
/// The defaults match OpenSCAD's behavior: includes are spliced before
/// parsing and comments are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit comment nodes into the AST.
    pub include_comments: bool,
    /// Splice `include <path>` files before parsing. When false,
    /// `include` survives as an AST node. `use` is unaffected either way.
    pub process_includes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { include_comments: false, process_includes: true }
    }
}

impl ParseOptions {
    /// Stable fingerprint used in the AST cache key.
    pub fn fingerprint(&self) -> u8 {
        (self.include_comments as u8) | ((self.process_includes as u8) << 1)
    }
}

/// Parses OpenSCAD source text into an AST. Never cached.
///
/// The origin is reported as `<string>` in positions. With
/// `process_includes` set, include paths resolve against `OPENSCADPATH`
/// and the platform default only, since anonymous input has no directory.
pub fn parse_string(code: &str, options: &ParseOptions) -> Result<Ast, Error> {
    let code = includes::strip_bom(code);
    parse_with_origin(code, STRING_ORIGIN, None, options)
}

/// Parses a file into an AST, consulting the process-wide cache.
///
/// The cache key is the canonical path plus the options fingerprint; an
/// entry is reused while the file's mtime is unchanged.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Arc<Ast>, Error> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound { path: path.to_path_buf() });
    }
    let canonical = path.canonicalize()?;
    let mtime = std::fs::metadata(&canonical)?.modified()?;
    let fingerprint = options.fingerprint();

    if let Some(ast) = cache::lookup(&canonical, fingerprint, mtime) {
        return Ok(ast);
    }

    log::debug!("parsing {}", canonical.display());
    let code = includes::read_source(&canonical)?;
    let origin = canonical.to_string_lossy().to_string();
    let ast = Arc::new(parse_with_origin(&code, &origin, canonical.parent(), options)?);
    cache::store(canonical, fingerprint, mtime, Arc::clone(&ast));
    Ok(ast)
}

/// Resolves a library file the way OpenSCAD would, then parses it.
///
/// Returns the AST together with the resolved path.
pub fn parse_library_file(
    current_file: Option<&Path>,
    libfile: &str,
    options: &ParseOptions,
) -> Result<(Arc<Ast>, PathBuf), Error> {
    let resolved = find_library_file(current_file, libfile)?;
    let ast = parse_file(&resolved, options)?;
    Ok((ast, resolved))
}

/// Empties the process-wide AST cache.
pub fn clear_ast_cache() {
    cache::clear();
}

fn parse_with_origin(
    code: &str,
    origin: &str,
    origin_dir: Option<&Path>,
    options: &ParseOptions,
) -> Result<Ast, Error> {
    let map = if options.process_includes {
        expand_includes(code, origin, origin_dir)?
    } else {
        let mut map = SourceMap::new();
        map.add_origin(origin, code, None);
        map
    };

    let combined = map.get_combined_string().to_string();
    let pairs = scad_syntax::parse_source(&combined)
        .map_err(|err| syntax_to_parse_error(err, &map, origin))?;
    let comments = if options.include_comments {
        scad_syntax::scan_comments(&combined)
    } else {
        Vec::new()
    };
    transform(pairs, &map, &comments)
}

fn syntax_to_parse_error(err: SyntaxError, map: &SourceMap, origin: &str) -> Error {
    // An error at end of input lands one past the last segment; clamp so
    // the reported position still names a real character.
    let combined_len = map.get_combined_string().len() as u32;
    let offset = err.offset.min(combined_len.saturating_sub(1));
    let position = map
        .get_location(offset)
        .unwrap_or_else(|_| Position::start_of(origin));
    Error::Parse(ParseError { position, expected: err.expected, message: err.message })
}
