//! # Modular Instantiation Transformation
//!
//! Statement-level constructs: module calls with children, `for` in both
//! head forms, `intersection_for`, `let`, `echo`, `assert`, `if`/`else`,
//! and the four modifier prefixes.

use crate::ast::{Assignment, Expression, Instantiation, InstantiationKind, Statement};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::arguments::{transform_argument_group, transform_assignment_list};
use super::expressions::transform_expression;
use super::statements::transform_statement;
use super::position_of;

/// Transforms a modular instantiation node.
pub fn transform_instantiation(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Instantiation, Error> {
    let position = position_of(map, &pair)?;
    let rule = pair.as_rule();

    match rule {
        // A modifier wraps exactly one instantiation; stacked modifiers
        // nest outer-over-inner in textual order.
        Rule::modifier_show_only
        | Rule::modifier_highlight
        | Rule::modifier_background
        | Rule::modifier_disable => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| Error::MalformedTree("modifier without target".to_string()))?;
            let wrapped = Box::new(transform_instantiation(inner, map)?);
            let kind = match rule {
                Rule::modifier_show_only => InstantiationKind::ShowOnly(wrapped),
                Rule::modifier_highlight => InstantiationKind::Highlight(wrapped),
                Rule::modifier_background => InstantiationKind::Background(wrapped),
                _ => InstantiationKind::Disable(wrapped),
            };
            Ok(Instantiation::new(position, kind))
        }

        Rule::module_call => {
            let mut name = String::new();
            let mut arguments = Vec::new();
            let mut children = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::identifier => name = inner.as_str().to_string(),
                    Rule::argument_group => arguments = transform_argument_group(inner, map)?,
                    Rule::child_statement => children = transform_children(inner, map)?,
                    other => {
                        return Err(Error::MalformedTree(format!(
                            "unexpected node in module call: {other:?}"
                        )))
                    }
                }
            }
            Ok(Instantiation::new(position, InstantiationKind::Call { name, arguments, children }))
        }

        Rule::modular_for => {
            let mut head = None;
            let mut children = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_for => {}
                    Rule::child_statement => children = transform_children(inner, map)?,
                    _ => head = Some(inner),
                }
            }
            let head =
                head.ok_or_else(|| Error::MalformedTree("for without head".to_string()))?;
            let kind = match head.as_rule() {
                Rule::c_style_for_head => {
                    let (init, condition, update) = transform_c_style_head(head, map)?;
                    InstantiationKind::CFor { init, condition, update, children }
                }
                Rule::assignment_list => InstantiationKind::For {
                    assignments: transform_assignment_list(head, map)?,
                    children,
                },
                other => {
                    return Err(Error::MalformedTree(format!("unexpected for head: {other:?}")))
                }
            };
            Ok(Instantiation::new(position, kind))
        }

        Rule::modular_intersection_for => {
            let mut assignments = Vec::new();
            let mut children = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_intersection_for => {}
                    Rule::assignment_list => assignments = transform_assignment_list(inner, map)?,
                    Rule::child_statement => children = transform_children(inner, map)?,
                    other => {
                        return Err(Error::MalformedTree(format!(
                            "unexpected node in intersection_for: {other:?}"
                        )))
                    }
                }
            }
            Ok(Instantiation::new(
                position,
                InstantiationKind::IntersectionFor { assignments, children },
            ))
        }

        Rule::modular_let => {
            let mut assignments = Vec::new();
            let mut children = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_let => {}
                    Rule::assignment_list => assignments = transform_assignment_list(inner, map)?,
                    Rule::child_statement => children = transform_children(inner, map)?,
                    other => {
                        return Err(Error::MalformedTree(format!(
                            "unexpected node in let: {other:?}"
                        )))
                    }
                }
            }
            Ok(Instantiation::new(position, InstantiationKind::Let { assignments, children }))
        }

        Rule::modular_echo | Rule::modular_assert => {
            let mut arguments = Vec::new();
            let mut children = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_echo | Rule::kw_assert => {}
                    Rule::argument_group => arguments = transform_argument_group(inner, map)?,
                    Rule::child_statement => children = transform_children(inner, map)?,
                    other => {
                        return Err(Error::MalformedTree(format!(
                            "unexpected node in echo/assert: {other:?}"
                        )))
                    }
                }
            }
            let kind = if rule == Rule::modular_echo {
                InstantiationKind::Echo { arguments, children }
            } else {
                InstantiationKind::Assert { arguments, children }
            };
            Ok(Instantiation::new(position, kind))
        }

        Rule::modular_if => {
            let mut condition = None;
            let mut branches = Vec::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::kw_if | Rule::kw_else => {}
                    Rule::child_statement => branches.push(transform_children(inner, map)?),
                    _ => condition = Some(transform_expression(inner, map)?),
                }
            }
            let condition =
                condition.ok_or_else(|| Error::MalformedTree("if without condition".to_string()))?;
            let mut branches = branches.into_iter();
            let children = branches.next().unwrap_or_default();
            let kind = match branches.next() {
                Some(else_children) => {
                    InstantiationKind::IfElse { condition, children, else_children }
                }
                None => InstantiationKind::If { condition, children },
            };
            Ok(Instantiation::new(position, kind))
        }

        other => Err(Error::MalformedTree(format!("unexpected instantiation node: {other:?}"))),
    }
}

/// Transforms a `child_statement` node into a statement sequence.
///
/// `;` yields no children, a block yields its statements, and a single
/// trailing instantiation yields one statement.
pub fn transform_children(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Vec<Statement>, Error> {
    let mut children = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::block {
            for stmt_pair in inner.into_inner() {
                if let Some(stmt) = transform_statement(stmt_pair, map)? {
                    children.push(stmt);
                }
            }
        } else if let Some(stmt) = transform_statement(inner, map)? {
            children.push(stmt);
        }
    }
    Ok(children)
}

/// Transforms a C-style `for` head into its init, condition, and update
/// parts. Binding lists before the condition are init, after it update.
pub fn transform_c_style_head(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<(Vec<Assignment>, Expression, Vec<Assignment>), Error> {
    let mut init = Vec::new();
    let mut update = Vec::new();
    let mut condition = None;

    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::assignment_list {
            let list = transform_assignment_list(inner, map)?;
            if condition.is_none() {
                init = list;
            } else {
                update = list;
            }
        } else {
            condition = Some(transform_expression(inner, map)?);
        }
    }

    let condition = condition
        .ok_or_else(|| Error::MalformedTree("C-style for without condition".to_string()))?;
    Ok((init, condition, update))
}
