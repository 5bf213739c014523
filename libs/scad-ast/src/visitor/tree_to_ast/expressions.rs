//! # Expression Transformation
//!
//! Dispatch from parse-tree expression nodes to AST expressions.
//!
//! The grammar keeps one rule per precedence level, so most nodes here
//! are chains: a lone operand passes through untouched, anything longer
//! is folded by the operator helpers.

use crate::ast::{Expression, ExpressionKind};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::arguments::{transform_argument_group, transform_assignment_list, transform_parameter};
use super::comprehensions::transform_list;
use super::literals::{transform_number, transform_string};
use super::operators::{fold_binary_chain, transform_power, transform_unary};
use super::position_of;

/// Transforms a parse-tree node into an AST expression.
pub fn transform_expression(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    match pair.as_rule() {
        Rule::ternary_expr => transform_ternary(pair, map),

        Rule::or_expr
        | Rule::and_expr
        | Rule::equality_expr
        | Rule::relational_expr
        | Rule::bit_or_expr
        | Rule::bit_and_expr
        | Rule::shift_expr
        | Rule::additive_expr
        | Rule::multiplicative_expr => fold_binary_chain(pair, map),

        Rule::unary_expr => transform_unary(pair, map),
        Rule::power_expr => transform_power(pair, map),
        Rule::postfix_expr => transform_postfix(pair, map),

        Rule::paren_expr => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| Error::MalformedTree("empty parenthesized expression".to_string()))?;
            transform_expression(inner, map)
        }

        Rule::number => transform_number(pair, map),
        Rule::string => transform_string(pair, map),
        Rule::boolean => {
            let position = position_of(map, &pair)?;
            Ok(Expression::new(position, ExpressionKind::Boolean(pair.as_str() == "true")))
        }
        Rule::undef => {
            let position = position_of(map, &pair)?;
            Ok(Expression::new(position, ExpressionKind::Undef))
        }
        Rule::identifier => {
            let position = position_of(map, &pair)?;
            Ok(Expression::new(position, ExpressionKind::Identifier(pair.as_str().to_string())))
        }

        Rule::range_expr => transform_range(pair, map),
        Rule::list_expr => transform_list(pair, map),

        Rule::let_expr => transform_let_expr(pair, map),
        Rule::echo_expr => transform_echo_like(pair, map, false),
        Rule::assert_expr => transform_echo_like(pair, map, true),
        Rule::function_literal => transform_function_literal(pair, map),

        other => Err(Error::MalformedTree(format!("unexpected expression node: {other:?}"))),
    }
}

/// Folds `cond ? a : b`, right-associative.
fn transform_ternary(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| Error::MalformedTree("empty ternary".to_string()))?;
    let condition = transform_expression(first, map)?;

    match (inner.next(), inner.next()) {
        (Some(then_pair), Some(else_pair)) => Ok(Expression::new(
            position,
            ExpressionKind::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(transform_expression(then_pair, map)?),
                else_branch: Box::new(transform_expression(else_pair, map)?),
            },
        )),
        (None, _) => Ok(condition),
        _ => Err(Error::MalformedTree("ternary with a lone branch".to_string())),
    }
}

/// Folds a postfix chain into left-nested call, index, and member nodes
/// in source order.
fn transform_postfix(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let mut acc = transform_expression(
        inner
            .next()
            .ok_or_else(|| Error::MalformedTree("empty postfix chain".to_string()))?,
        map,
    )?;

    for tail in inner {
        let kind = match tail.as_rule() {
            Rule::argument_group => ExpressionKind::Call {
                callee: Box::new(acc),
                arguments: transform_argument_group(tail, map)?,
            },
            Rule::index_tail => {
                let index = tail
                    .into_inner()
                    .next()
                    .ok_or_else(|| Error::MalformedTree("index without expression".to_string()))?;
                ExpressionKind::Index {
                    object: Box::new(acc),
                    index: Box::new(transform_expression(index, map)?),
                }
            }
            Rule::member_tail => {
                let member = tail
                    .into_inner()
                    .next()
                    .ok_or_else(|| Error::MalformedTree("member access without name".to_string()))?;
                ExpressionKind::Member {
                    object: Box::new(acc),
                    member: member.as_str().to_string(),
                }
            }
            other => {
                return Err(Error::MalformedTree(format!("unexpected postfix tail: {other:?}")))
            }
        };
        acc = Expression::new(position.clone(), kind);
    }
    Ok(acc)
}

/// Transforms `[a : b]` and `[a : s : b]`. Two operands are start and
/// end; the middle of three is the step.
fn transform_range(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let parts: Vec<Expression> = pair
        .into_inner()
        .map(|p| transform_expression(p, map))
        .collect::<Result<_, _>>()?;

    let mut parts = parts.into_iter();
    let kind = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => ExpressionKind::Range {
            start: Box::new(start),
            step: None,
            end: Box::new(end),
        },
        (Some(start), Some(step), Some(end)) => ExpressionKind::Range {
            start: Box::new(start),
            step: Some(Box::new(step)),
            end: Box::new(end),
        },
        _ => return Err(Error::MalformedTree("range with fewer than two bounds".to_string())),
    };
    Ok(Expression::new(position, kind))
}

fn transform_let_expr(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut assignments = Vec::new();
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_let => {}
            Rule::assignment_list => assignments = transform_assignment_list(inner, map)?,
            _ => body = Some(transform_expression(inner, map)?),
        }
    }

    let body = body.ok_or_else(|| Error::MalformedTree("let without body".to_string()))?;
    Ok(Expression::new(position, ExpressionKind::Let { assignments, body: Box::new(body) }))
}

/// Transforms the value-bearing `echo(...) expr` and `assert(...) expr`
/// forms, which are distinct node families from their modular cousins.
fn transform_echo_like(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
    is_assert: bool,
) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut arguments = Vec::new();
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_echo | Rule::kw_assert => {}
            Rule::argument_group => arguments = transform_argument_group(inner, map)?,
            _ => body = Some(transform_expression(inner, map)?),
        }
    }

    let body = Box::new(
        body.ok_or_else(|| Error::MalformedTree("echo/assert expression without body".to_string()))?,
    );
    let kind = if is_assert {
        ExpressionKind::Assert { arguments, body }
    } else {
        ExpressionKind::Echo { arguments, body }
    };
    Ok(Expression::new(position, kind))
}

fn transform_function_literal(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut parameters = Vec::new();
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_function => {}
            Rule::parameter => parameters.push(transform_parameter(inner, map)?),
            _ => body = Some(transform_expression(inner, map)?),
        }
    }

    let body = Box::new(
        body.ok_or_else(|| Error::MalformedTree("function literal without body".to_string()))?,
    );
    Ok(Expression::new(position, ExpressionKind::FunctionLiteral { parameters, body }))
}
