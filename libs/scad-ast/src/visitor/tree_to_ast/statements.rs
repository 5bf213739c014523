//! # Statement Transformation
//!
//! Dispatch from parse-tree statement nodes to AST statements.

use crate::ast::{Statement, StatementKind};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::control_flow::transform_instantiation;
use super::declarations::{
    transform_assignment_statement, transform_function_declaration, transform_module_declaration,
};
use super::position_of;

/// Transforms a single parse-tree node into an AST statement.
///
/// Returns `None` for nodes that carry no statement of their own (the
/// end-of-input marker).
pub fn transform_statement(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Option<Statement>, Error> {
    match pair.as_rule() {
        Rule::use_statement => Ok(Some(transform_path_statement(pair, map, false)?)),
        Rule::include_statement => Ok(Some(transform_path_statement(pair, map, true)?)),

        Rule::module_declaration => Ok(Some(transform_module_declaration(pair, map)?)),
        Rule::function_declaration => Ok(Some(transform_function_declaration(pair, map)?)),
        Rule::assignment_statement => Ok(Some(transform_assignment_statement(pair, map)?)),

        Rule::modifier_show_only
        | Rule::modifier_highlight
        | Rule::modifier_background
        | Rule::modifier_disable
        | Rule::modular_if
        | Rule::modular_for
        | Rule::modular_intersection_for
        | Rule::modular_let
        | Rule::modular_echo
        | Rule::modular_assert
        | Rule::module_call => {
            let position = position_of(map, &pair)?;
            let inst = transform_instantiation(pair, map)?;
            Ok(Some(Statement::new(position, StatementKind::Instantiation(inst))))
        }

        Rule::EOI => Ok(None),

        other => Err(Error::MalformedTree(format!("unexpected statement node: {other:?}"))),
    }
}

/// Transforms `use <path>` or `include <path>`.
fn transform_path_statement(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
    include: bool,
) -> Result<Statement, Error> {
    let position = position_of(map, &pair)?;
    let path = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::path_spec)
        .and_then(|spec| spec.into_inner().find(|p| p.as_rule() == Rule::path_text))
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| Error::MalformedTree("path statement without path".to_string()))?;

    let kind = if include {
        StatementKind::Include { path }
    } else {
        StatementKind::Use { path }
    };
    Ok(Statement::new(position, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_syntax::parse_source;

    fn first_statement(source: &str) -> Statement {
        let mut map = SourceMap::new();
        map.add_origin("<test>", source, None);
        let mut pairs = parse_source(source).unwrap();
        let pair = pairs.next().unwrap().into_inner().next().unwrap();
        transform_statement(pair, &map).unwrap().unwrap()
    }

    #[test]
    fn test_use_statement() {
        let stmt = first_statement("use <MCAD/gears.scad>");
        match stmt.kind {
            StatementKind::Use { path } => assert_eq!(path, "MCAD/gears.scad"),
            other => panic!("expected use, got {other:?}"),
        }
    }

    #[test]
    fn test_include_statement() {
        let stmt = first_statement("include <shapes.scad>");
        match stmt.kind {
            StatementKind::Include { path } => assert_eq!(path, "shapes.scad"),
            other => panic!("expected include, got {other:?}"),
        }
    }

    #[test]
    fn test_instantiation_statement() {
        let stmt = first_statement("cube(1);");
        assert!(matches!(stmt.kind, StatementKind::Instantiation(_)));
        assert_eq!(stmt.position.offset, 0);
    }
}
