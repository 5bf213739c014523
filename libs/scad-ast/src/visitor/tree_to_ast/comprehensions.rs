//! # Vector Literals and List Comprehensions
//!
//! A bracketed literal whose top-level elements are all plain expressions
//! lowers to a vector; one containing any `for`/`let`/`if`/`each`
//! fragment lowers to a list comprehension. Fragments chain through their
//! bodies and bottom out at plain expressions.

use crate::ast::{Expression, ExpressionKind, ListCompElement, ListCompKind};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::arguments::transform_assignment_list;
use super::control_flow::transform_c_style_head;
use super::expressions::transform_expression;
use super::position_of;

/// Transforms a bracketed literal into a vector or a list comprehension.
pub fn transform_list(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let elements: Vec<Pair<'_, Rule>> = pair.into_inner().collect();

    let has_fragment = elements.iter().any(|p| {
        matches!(p.as_rule(), Rule::lc_for | Rule::lc_let | Rule::lc_each | Rule::lc_if)
    });

    let kind = if has_fragment {
        let elements = elements
            .into_iter()
            .map(|p| transform_element(p, map))
            .collect::<Result<Vec<_>, _>>()?;
        ExpressionKind::ListComprehension(elements)
    } else {
        let elements = elements
            .into_iter()
            .map(|p| transform_expression(p, map))
            .collect::<Result<Vec<_>, _>>()?;
        ExpressionKind::Vector(elements)
    };
    Ok(Expression::new(position, kind))
}

/// Transforms one top-level element of a bracketed literal.
pub fn transform_element(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<ListCompElement, Error> {
    let position = position_of(map, &pair)?;

    match pair.as_rule() {
        Rule::lc_for => {
            let mut head = None;
            let mut body = None;
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_for => {}
                    Rule::c_style_for_head | Rule::assignment_list => head = Some(inner),
                    _ => body = Some(transform_element(inner, map)?),
                }
            }
            let head = head
                .ok_or_else(|| Error::MalformedTree("comprehension for without head".to_string()))?;
            let body = Box::new(body.ok_or_else(|| {
                Error::MalformedTree("comprehension for without body".to_string())
            })?);
            let kind = match head.as_rule() {
                Rule::c_style_for_head => {
                    let (init, condition, update) = transform_c_style_head(head, map)?;
                    ListCompKind::CFor { init, condition: Box::new(condition), update, body }
                }
                _ => ListCompKind::For { assignments: transform_assignment_list(head, map)?, body },
            };
            Ok(ListCompElement::new(position, kind))
        }

        Rule::lc_let => {
            let mut assignments = Vec::new();
            let mut body = None;
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_let => {}
                    Rule::assignment_list => assignments = transform_assignment_list(inner, map)?,
                    _ => body = Some(transform_element(inner, map)?),
                }
            }
            let body = Box::new(body.ok_or_else(|| {
                Error::MalformedTree("comprehension let without body".to_string())
            })?);
            Ok(ListCompElement::new(position, ListCompKind::Let { assignments, body }))
        }

        Rule::lc_each => {
            let inner = pair
                .into_inner()
                .find(|p| p.as_rule() != Rule::kw_each)
                .ok_or_else(|| Error::MalformedTree("each without body".to_string()))?;
            let body = Box::new(transform_element(inner, map)?);
            Ok(ListCompElement::new(position, ListCompKind::Each { body }))
        }

        Rule::lc_if => {
            let mut condition = None;
            let mut branches = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_if | Rule::kw_else => {}
                    _ if condition.is_none() => {
                        condition = Some(transform_expression(inner, map)?)
                    }
                    _ => branches.push(transform_element(inner, map)?),
                }
            }
            let condition = Box::new(condition.ok_or_else(|| {
                Error::MalformedTree("comprehension if without condition".to_string())
            })?);
            let mut branches = branches.into_iter();
            let body = Box::new(branches.next().ok_or_else(|| {
                Error::MalformedTree("comprehension if without body".to_string())
            })?);
            let kind = match branches.next() {
                Some(else_body) => {
                    ListCompKind::IfElse { condition, body, else_body: Box::new(else_body) }
                }
                None => ListCompKind::If { condition, body },
            };
            Ok(ListCompElement::new(position, kind))
        }

        // Anything else is a plain expression element.
        _ => {
            let expr = transform_expression(pair, map)?;
            Ok(ListCompElement::new(position, ListCompKind::Expr(expr)))
        }
    }
}
