//! # Operator Folding
//!
//! Binary operator chains at a single precedence level fold left to
//! right into a left-leaning tree; exponentiation folds right. Unary
//! operators nest around their operand.

use crate::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::expressions::transform_expression;
use super::position_of;

/// Folds an `operand (op operand)*` chain left to right.
pub fn fold_binary_chain(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let mut acc = transform_expression(
        inner
            .next()
            .ok_or_else(|| Error::MalformedTree("empty operator chain".to_string()))?,
        map,
    )?;

    while let Some(op_pair) = inner.next() {
        let op = binary_op(&op_pair)?;
        let rhs_pair = inner
            .next()
            .ok_or_else(|| Error::MalformedTree("operator without right operand".to_string()))?;
        let rhs = transform_expression(rhs_pair, map)?;
        acc = Expression::new(
            position.clone(),
            ExpressionKind::Binary { op, left: Box::new(acc), right: Box::new(rhs) },
        );
    }
    Ok(acc)
}

/// Transforms a unary node: either a pass-through operand or an operator
/// applied to another unary node.
pub fn transform_unary(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| Error::MalformedTree("empty unary expression".to_string()))?;

    if first.as_rule() == Rule::op_unary {
        let op = UnaryOp::from_str(first.as_str())
            .ok_or_else(|| Error::MalformedTree(format!("unknown unary operator: {}", first.as_str())))?;
        let operand = inner
            .next()
            .ok_or_else(|| Error::MalformedTree("unary operator without operand".to_string()))?;
        Ok(Expression::new(
            position,
            ExpressionKind::Unary { op, operand: Box::new(transform_expression(operand, map)?) },
        ))
    } else {
        transform_expression(first, map)
    }
}

/// Transforms an exponent node. `^` is right-associative: the right
/// operand of `a ^ b ^ c` is itself an exponent node.
pub fn transform_power(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let base = transform_expression(
        inner
            .next()
            .ok_or_else(|| Error::MalformedTree("empty exponent expression".to_string()))?,
        map,
    )?;

    match (inner.next(), inner.next()) {
        (Some(_op), Some(exponent)) => Ok(Expression::new(
            position,
            ExpressionKind::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(transform_expression(exponent, map)?),
            },
        )),
        (None, _) => Ok(base),
        _ => Err(Error::MalformedTree("exponent without right operand".to_string())),
    }
}

fn binary_op(pair: &Pair<'_, Rule>) -> Result<BinaryOp, Error> {
    BinaryOp::from_str(pair.as_str())
        .ok_or_else(|| Error::MalformedTree(format!("unknown binary operator: {}", pair.as_str())))
}
