//! # Literal Decoding
//!
//! Numbers and strings arrive as raw source slices; this module turns
//! them into values.

use crate::ast::{Expression, ExpressionKind};
use crate::error::Error;
use pest::iterators::Pair;
use scad_syntax::{Rule, SourceMap};

use super::position_of;

/// Transforms a number literal. OpenSCAD numbers are decimal floats with
/// an optional exponent; `.5` and `2.` are accepted.
pub fn transform_number(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let text = pair.as_str();
    let value: f64 = text
        .parse()
        .map_err(|_| Error::InvalidLiteral(format!("not a number: {text}")))?;
    Ok(Expression::new(position, ExpressionKind::Number(value)))
}

/// Transforms a string literal, decoding the `\" \\ \n \t \r \u####`
/// escapes.
pub fn transform_string(pair: Pair<'_, Rule>, map: &SourceMap) -> Result<Expression, Error> {
    let position = position_of(map, &pair)?;
    let value = unescape(pair.as_str())?;
    Ok(Expression::new(position, ExpressionKind::Str(value)))
}

fn unescape(raw: &str) -> Result<String, Error> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| Error::InvalidLiteral(format!("unquoted string: {raw}")))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| Error::InvalidLiteral(format!("bad unicode escape: \\u{hex}")))?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| Error::InvalidLiteral(format!("bad unicode escape: \\u{hex}")))?;
                out.push(decoded);
            }
            other => {
                return Err(Error::InvalidLiteral(format!("unknown escape: \\{}", other.unwrap_or(' '))))
            }
        }
    }
    Ok(out)
}
