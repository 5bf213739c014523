//! # Argument, Parameter, and Binding Lists
//!
//! Shared transformers for `(...)` argument groups, declared parameter
//! lists, and `name = expr` binding lists.

use crate::ast::{Argument, Assignment, Parameter};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::declarations::transform_assignment;
use super::expressions::transform_expression;
use super::position_of;

/// Transforms a `( arguments? )` group into an argument list.
///
/// Named and positional arguments keep their source order; OpenSCAD
/// permits them to interleave freely and duplicates are not rejected
/// here.
pub fn transform_argument_group(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Vec<Argument>, Error> {
    pair.into_inner().map(|p| transform_argument(p, map)).collect()
}

/// Transforms one argument, positional or named.
pub fn transform_argument(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Argument, Error> {
    let position = position_of(map, &pair)?;
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| Error::MalformedTree("empty argument".to_string()))?;

    if inner.as_rule() == Rule::named_argument {
        let mut parts = inner.into_inner();
        let name = parts
            .next()
            .filter(|p| p.as_rule() == Rule::identifier)
            .map(|p| p.as_str().to_string())
            .ok_or_else(|| Error::MalformedTree("named argument without name".to_string()))?;
        let value = parts
            .next()
            .map(|p| transform_expression(p, map))
            .transpose()?
            .ok_or_else(|| Error::MalformedTree("named argument without value".to_string()))?;
        Ok(Argument { position, name: Some(name), value })
    } else {
        let value = transform_expression(inner, map)?;
        Ok(Argument { position, name: None, value })
    }
}

/// Transforms a declared parameter; the default is `None` when absent.
pub fn transform_parameter(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Parameter, Error> {
    let position = position_of(map, &pair)?;
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| Error::MalformedTree("parameter without name".to_string()))?;
    let default = inner.next().map(|p| transform_expression(p, map)).transpose()?;
    Ok(Parameter { position, name, default })
}

/// Transforms a `name = expr, ...` binding list.
pub fn transform_assignment_list(
    pair: Pair<'_, Rule>,
    map: &SourceMap,
) -> Result<Vec<Assignment>, Error> {
    pair.into_inner().map(|p| transform_assignment(p, map)).collect()
}
