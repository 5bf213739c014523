//! # Parse Tree to AST Transformation
//!
//! Lowers the pest parse tree into the typed AST.
//!
//! ## Module Structure
//!
//! - `statements` - top-level dispatch and `use`/`include`
//! - `declarations` - assignments, module and function declarations
//! - `control_flow` - modular instantiations, modifiers, child blocks
//! - `expressions` - expression dispatch, ternary, postfix, ranges
//! - `operators` - binary chain folding, unary, exponent
//! - `literals` - number, string, boolean, undef decoding
//! - `comprehensions` - vector literals and comprehension fragments
//! - `arguments` - argument, parameter, and binding lists (shared)
//!
//! Every emitted node's position is the node's start offset in the
//! combined buffer mapped back through the source map, so positions
//! always name a character of the original origin.

pub mod arguments;
pub mod comprehensions;
pub mod control_flow;
pub mod declarations;
pub mod expressions;
pub mod literals;
pub mod operators;
pub mod statements;

use crate::ast::{Ast, Statement, StatementKind};
use crate::error::Error;
use pest::iterators::{Pair, Pairs};
use scad_syntax::{CommentToken, Position, Rule, SourceMap};

/// Transforms a parse tree into an AST.
///
/// `comments` holds the comment spans collected by the lexical pre-scan
/// (empty unless comment nodes were requested); each becomes a sibling
/// statement interleaved by source offset.
///
/// Given the same inputs, the output is structurally identical.
pub fn transform(
    mut pairs: Pairs<'_, Rule>,
    map: &SourceMap,
    comments: &[CommentToken],
) -> Result<Ast, Error> {
    let file = pairs
        .next()
        .ok_or_else(|| Error::MalformedTree("empty parse result".to_string()))?;

    let mut keyed: Vec<(u32, Statement)> = Vec::new();
    for pair in file.into_inner() {
        if pair.as_rule() == Rule::EOI {
            continue;
        }
        let offset = pair.as_span().start() as u32;
        if let Some(stmt) = statements::transform_statement(pair, map)? {
            keyed.push((offset, stmt));
        }
    }

    let combined = map.get_combined_string();
    for token in comments {
        let position = map.get_location(token.start)?;
        let raw = &combined[token.start as usize..token.end as usize];
        let stmt = Statement::new(
            position,
            StatementKind::Comment { text: comment_text(raw, token.block), block: token.block },
        );
        keyed.push((token.start, stmt));
    }

    keyed.sort_by_key(|(offset, _)| *offset);

    Ok(Ast::with_statements(keyed.into_iter().map(|(_, stmt)| stmt).collect()))
}

/// Maps a pair's start offset through the source map.
pub(crate) fn position_of(map: &SourceMap, pair: &Pair<'_, Rule>) -> Result<Position, Error> {
    Ok(map.get_location(pair.as_span().start() as u32)?)
}

fn comment_text(raw: &str, block: bool) -> String {
    if block {
        let s = raw.strip_prefix("/*").unwrap_or(raw);
        s.strip_suffix("*/").unwrap_or(s).to_string()
    } else {
        raw.strip_prefix("//").unwrap_or(raw).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_syntax::{parse_source, scan_comments};

    fn build(source: &str) -> Ast {
        let mut map = SourceMap::new();
        map.add_origin("<test>", source, None);
        let pairs = parse_source(source).unwrap();
        transform(pairs, &map, &[]).unwrap()
    }

    #[test]
    fn test_transform_cube() {
        let ast = build("cube(10);");
        assert_eq!(ast.statements.len(), 1);
    }

    #[test]
    fn test_transform_multiple() {
        let ast = build("cube(10); sphere(5);");
        assert_eq!(ast.statements.len(), 2);
    }

    #[test]
    fn test_statements_keep_source_order() {
        let ast = build("a = 1; b = 2;");
        let names: Vec<_> = ast
            .statements
            .iter()
            .map(|s| match &s.kind {
                StatementKind::Assignment(a) => a.name.clone(),
                _ => panic!("expected assignment"),
            })
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_comments_interleave_with_statements() {
        let source = "a = 1; // first\nb = 2;";
        let mut map = SourceMap::new();
        map.add_origin("<test>", source, None);
        let pairs = parse_source(source).unwrap();
        let comments = scan_comments(source);
        let ast = transform(pairs, &map, &comments).unwrap();

        assert_eq!(ast.statements.len(), 3);
        match &ast.statements[1].kind {
            StatementKind::Comment { text, block } => {
                assert_eq!(text, " first");
                assert!(!block);
            }
            other => panic!("expected comment, got {other:?}"),
        }
    }

    #[test]
    fn test_determinism() {
        let source = "x = [for (i = [0:4]) i * i]; #cube(x);";
        assert_eq!(build(source), build(source));
    }
}
