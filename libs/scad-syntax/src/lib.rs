//! # OpenSCAD Syntax
//!
//! Grammar and parse engine for the OpenSCAD modeling language.
//!
//! ## Architecture
//!
//! ```text
//! source text → pest (grammar.pest) → parse tree → scad-ast (lowering)
//! ```
//!
//! The parse tree keeps byte offsets into the input buffer; the
//! [`SourceMap`] translates those offsets back to origin file, line, and
//! column even when several origins were stitched into one buffer by
//! include expansion.
//!
//! ## Example
//!
//! ```rust
//! let pairs = scad_syntax::parse_source("cube(10);").unwrap();
//! assert!(pairs.len() > 0);
//! ```

mod error;
mod scan;
mod source_map;

pub use error::SyntaxError;
pub use scan::{scan_comments, scan_includes, CommentToken, IncludeDirective};
pub use source_map::{OutOfRange, Position, SourceMap, SourceSegment};

use pest::iterators::Pairs;
use pest::Parser;

/// Pest-generated parser for the OpenSCAD surface grammar.
///
/// The grammar lives in `src/grammar.pest`. Each operator precedence level
/// is a distinct rule, so the pairs produced here mirror the precedence
/// table directly and the lowering visitor only has to fold chains.
#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
pub struct OpenScadParser;

/// Parses OpenSCAD source text and returns the parse tree.
///
/// The entry rule is `file`: zero or more top-level statements followed by
/// end of input. Memoization state is scoped to this single call, so
/// successive calls are fully independent.
///
/// # Arguments
///
/// * `source` - The OpenSCAD source text to parse
///
/// # Returns
///
/// * `Ok(Pairs)` - The parse tree on success
/// * `Err(SyntaxError)` - The furthest-reached offset and expected rules
///
/// # Example
///
/// ```rust
/// use scad_syntax::parse_source;
///
/// assert!(parse_source("x = 1 + 2;").is_ok());
/// assert!(parse_source("x = ;").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Pairs<'_, Rule>, SyntaxError> {
    OpenScadParser::parse(Rule::file, source).map_err(SyntaxError::from_pest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_cube() {
        assert!(parse_source("cube(10);").is_ok());
    }

    #[test]
    fn test_parse_cube_with_vector() {
        assert!(parse_source("cube([1, 2, 3]);").is_ok());
    }

    #[test]
    fn test_parse_multiple_statements() {
        assert!(parse_source("cube(10);\nsphere(r = 5);").is_ok());
    }

    #[test]
    fn test_parse_module_declaration() {
        assert!(parse_source("module box(size) { cube(size); }").is_ok());
    }

    #[test]
    fn test_parse_function_declaration() {
        assert!(parse_source("function twice(x) = x * 2;").is_ok());
    }

    #[test]
    fn test_parse_modifiers() {
        assert!(parse_source("#translate([0,0,1]) cube(1);").is_ok());
        assert!(parse_source("!cube(1);").is_ok());
        assert!(parse_source("%cube(1);").is_ok());
        assert!(parse_source("*cube(1);").is_ok());
        assert!(parse_source("!!cube(1);").is_ok());
    }

    #[test]
    fn test_parse_use_include() {
        assert!(parse_source("use <MCAD/gears.scad>").is_ok());
        assert!(parse_source("include <shapes.scad>").is_ok());
    }

    #[test]
    fn test_parse_list_comprehension() {
        assert!(parse_source("v = [for (i = [0:4]) if (i % 2 == 0) i * i];").is_ok());
    }

    #[test]
    fn test_parse_c_style_for() {
        assert!(parse_source("for (i = 0; i < 5; i = i + 1) cube(i);").is_ok());
    }

    #[test]
    fn test_parse_function_literal() {
        assert!(parse_source("f = function(x, y = 1) x + y;").is_ok());
    }

    #[test]
    fn test_parse_comments_are_skipped() {
        let src = "// line\nx = 1; /* block */ y = 2;";
        assert!(parse_source(src).is_ok());
    }

    #[test]
    fn test_keyword_is_not_identifier() {
        assert!(parse_source("module = 3;").is_err());
        // A keyword prefix is still a valid identifier.
        assert!(parse_source("modulex = 3;").is_ok());
        assert!(parse_source("formula = 1;").is_ok());
    }

    #[test]
    fn test_error_carries_offset() {
        let err = parse_source("x = (1 + ;").unwrap_err();
        assert!(err.offset > 0);
        assert!(!err.expected.is_empty());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_source("").is_ok());
        assert!(parse_source("  \n\t").is_ok());
    }
}
