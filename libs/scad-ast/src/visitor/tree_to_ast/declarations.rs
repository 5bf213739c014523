//! # Declaration Transformation
//!
//! Assignments, module declarations, and function declarations.

use crate::ast::{Assignment, Statement, StatementKind};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::expressions::transform_expression;
use super::statements::transform_statement;
use super::{arguments::transform_parameter, position_of};

/// Transforms `name = expr ;` into an assignment statement.
pub fn transform_assignment_statement(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Statement, Error> {
    let inner = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::assignment)
        .ok_or_else(|| Error::MalformedTree("assignment statement without binding".to_string()))?;
    let assignment = transform_assignment(inner, map)?;
    Ok(Statement::new(assignment.position.clone(), StatementKind::Assignment(assignment)))
}

/// Transforms a `name = expr` binding.
///
/// Also used for `for`/`intersection_for`/`let` heads and the init and
/// update clauses of C-style `for`.
pub fn transform_assignment(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Assignment, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| Error::MalformedTree("binding without name".to_string()))?;
    let value = inner
        .next()
        .map(|p| transform_expression(p, map))
        .transpose()?
        .ok_or_else(|| Error::MalformedTree("binding without value".to_string()))?;
    Ok(Assignment { position, name, value })
}

/// Transforms a module declaration.
///
/// The body is either a `{ ... }` block or a single statement; both lower
/// to an ordered statement sequence. `module m();` has an empty body.
pub fn transform_module_declaration(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Statement, Error> {
    let position = position_of(map, &pair)?;
    let mut name = String::new();
    let mut parameters = Vec::new();
    let mut body = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_module => {}
            Rule::identifier => name = inner.as_str().to_string(),
            Rule::parameter => parameters.push(transform_parameter(inner, map)?),
            Rule::block => {
                for stmt_pair in inner.into_inner() {
                    if let Some(stmt) = transform_statement(stmt_pair, map)? {
                        body.push(stmt);
                    }
                }
            }
            _ => {
                if let Some(stmt) = transform_statement(inner, map)? {
                    body.push(stmt);
                }
            }
        }
    }

    if name.is_empty() {
        return Err(Error::MalformedTree("module declaration without name".to_string()));
    }
    Ok(Statement::new(position, StatementKind::ModuleDeclaration { name, parameters, body }))
}

/// Transforms a function declaration. The body is a single expression.
pub fn transform_function_declaration(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Statement, Error> {
    let position = position_of(map, &pair)?;
    let mut name = String::new();
    let mut parameters = Vec::new();
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_function => {}
            Rule::identifier => name = inner.as_str().to_string(),
            Rule::parameter => parameters.push(transform_parameter(inner, map)?),
            _ => body = Some(transform_expression(inner, map)?),
        }
    }

    let body = body
        .ok_or_else(|| Error::MalformedTree("function declaration without body".to_string()))?;
    if name.is_empty() {
        return Err(Error::MalformedTree("function declaration without name".to_string()));
    }
    Ok(Statement::new(position, StatementKind::FunctionDeclaration { name, parameters, body }))
}
