//! # AST Serialization
//!
//! A dict-tree representation of the AST: every node becomes a JSON
//! object with a `"type"` tag, and `from_dict` rebuilds the exact
//! structure. JSON and (behind the `yaml` feature) YAML encoders compose
//! on top.
//!
//! Round-trip guarantee: `from_dict(&to_dict(ast, true))` is structurally
//! equal to `ast`.

use crate::ast::{
    Argument, Assignment, Ast, BinaryOp, Expression, ExpressionKind, Instantiation,
    InstantiationKind, ListCompElement, ListCompKind, Parameter, Statement, StatementKind,
    UnaryOp,
};
use crate::error::Error;
use scad_syntax::Position;
use serde_json::{json, Map, Value};

// =============================================================================
// TO DICT
// =============================================================================

/// Serializes an AST into a dict tree.
///
/// With `include_position = false` the position objects are omitted;
/// rebuilding such a tree yields default positions.
pub fn to_dict(ast: &Ast, include_position: bool) -> Value {
    json!({
        "type": "ast",
        "statements": ast
            .statements
            .iter()
            .map(|s| statement_dict(s, include_position))
            .collect::<Vec<_>>(),
    })
}

/// Serializes an AST to a JSON string.
pub fn to_json_string(ast: &Ast, include_position: bool) -> Result<String, Error> {
    serde_json::to_string_pretty(&to_dict(ast, include_position))
        .map_err(|e| Error::deserialization(e.to_string()))
}

/// Rebuilds an AST from a JSON string.
pub fn from_json_str(json: &str) -> Result<Ast, Error> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::deserialization(e.to_string()))?;
    from_dict(&value)
}

/// Serializes an AST to a YAML string.
#[cfg(feature = "yaml")]
pub fn to_yaml_string(ast: &Ast, include_position: bool) -> Result<String, Error> {
    serde_yaml::to_string(&to_dict(ast, include_position))
        .map_err(|e| Error::deserialization(e.to_string()))
}

/// Rebuilds an AST from a YAML string.
#[cfg(feature = "yaml")]
pub fn from_yaml_str(yaml: &str) -> Result<Ast, Error> {
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| Error::deserialization(e.to_string()))?;
    from_dict(&value)
}

fn with_position(mut value: Value, position: &Position, include_position: bool) -> Value {
    if include_position {
        if let Value::Object(ref mut map) = value {
            map.insert(
                "position".to_string(),
                json!({
                    "file": position.file,
                    "offset": position.offset,
                    "line": position.line,
                    "column": position.column,
                }),
            );
        }
    }
    value
}

fn statement_dict(stmt: &Statement, ip: bool) -> Value {
    let value = match &stmt.kind {
        StatementKind::Assignment(a) => return assignment_dict(a, ip),
        StatementKind::ModuleDeclaration { name, parameters, body } => json!({
            "type": "module_declaration",
            "name": name,
            "parameters": parameters.iter().map(|p| parameter_dict(p, ip)).collect::<Vec<_>>(),
            "body": body.iter().map(|s| statement_dict(s, ip)).collect::<Vec<_>>(),
        }),
        StatementKind::FunctionDeclaration { name, parameters, body } => json!({
            "type": "function_declaration",
            "name": name,
            "parameters": parameters.iter().map(|p| parameter_dict(p, ip)).collect::<Vec<_>>(),
            "body": expression_dict(body, ip),
        }),
        StatementKind::Instantiation(inst) => return instantiation_dict(inst, ip),
        StatementKind::Use { path } => json!({ "type": "use", "path": path }),
        StatementKind::Include { path } => json!({ "type": "include", "path": path }),
        StatementKind::Comment { text, block } => {
            json!({ "type": "comment", "text": text, "block": block })
        }
    };
    with_position(value, &stmt.position, ip)
}

fn instantiation_dict(inst: &Instantiation, ip: bool) -> Value {
    let statements = |children: &[Statement]| -> Vec<Value> {
        children.iter().map(|s| statement_dict(s, ip)).collect()
    };
    let args = |arguments: &[Argument]| -> Vec<Value> {
        arguments.iter().map(|a| argument_dict(a, ip)).collect()
    };
    let binds = |assignments: &[Assignment]| -> Vec<Value> {
        assignments.iter().map(|a| assignment_dict(a, ip)).collect()
    };

    let value = match &inst.kind {
        InstantiationKind::Call { name, arguments, children } => json!({
            "type": "module_call",
            "name": name,
            "arguments": args(arguments),
            "children": statements(children),
        }),
        InstantiationKind::For { assignments, children } => json!({
            "type": "modular_for",
            "assignments": binds(assignments),
            "children": statements(children),
        }),
        InstantiationKind::CFor { init, condition, update, children } => json!({
            "type": "modular_c_for",
            "init": binds(init),
            "condition": expression_dict(condition, ip),
            "update": binds(update),
            "children": statements(children),
        }),
        InstantiationKind::IntersectionFor { assignments, children } => json!({
            "type": "intersection_for",
            "assignments": binds(assignments),
            "children": statements(children),
        }),
        InstantiationKind::Let { assignments, children } => json!({
            "type": "modular_let",
            "assignments": binds(assignments),
            "children": statements(children),
        }),
        InstantiationKind::Echo { arguments, children } => json!({
            "type": "modular_echo",
            "arguments": args(arguments),
            "children": statements(children),
        }),
        InstantiationKind::Assert { arguments, children } => json!({
            "type": "modular_assert",
            "arguments": args(arguments),
            "children": statements(children),
        }),
        InstantiationKind::If { condition, children } => json!({
            "type": "modular_if",
            "condition": expression_dict(condition, ip),
            "children": statements(children),
        }),
        InstantiationKind::IfElse { condition, children, else_children } => json!({
            "type": "modular_if_else",
            "condition": expression_dict(condition, ip),
            "children": statements(children),
            "else_children": statements(else_children),
        }),
        InstantiationKind::ShowOnly(target) => json!({
            "type": "show_only",
            "target": instantiation_dict(target, ip),
        }),
        InstantiationKind::Highlight(target) => json!({
            "type": "highlight",
            "target": instantiation_dict(target, ip),
        }),
        InstantiationKind::Background(target) => json!({
            "type": "background",
            "target": instantiation_dict(target, ip),
        }),
        InstantiationKind::Disable(target) => json!({
            "type": "disable",
            "target": instantiation_dict(target, ip),
        }),
    };
    with_position(value, &inst.position, ip)
}

fn expression_dict(expr: &Expression, ip: bool) -> Value {
    let value = match &expr.kind {
        ExpressionKind::Number(n) => json!({ "type": "number", "value": n }),
        ExpressionKind::Str(s) => json!({ "type": "string", "value": s }),
        ExpressionKind::Boolean(b) => json!({ "type": "boolean", "value": b }),
        ExpressionKind::Undef => json!({ "type": "undef" }),
        ExpressionKind::Identifier(name) => json!({ "type": "identifier", "name": name }),
        ExpressionKind::Range { start, step, end } => json!({
            "type": "range",
            "start": expression_dict(start, ip),
            "step": step.as_ref().map(|s| expression_dict(s, ip)).unwrap_or(Value::Null),
            "end": expression_dict(end, ip),
        }),
        ExpressionKind::Vector(elements) => json!({
            "type": "vector",
            "elements": elements.iter().map(|e| expression_dict(e, ip)).collect::<Vec<_>>(),
        }),
        ExpressionKind::ListComprehension(elements) => json!({
            "type": "list_comprehension",
            "elements": elements.iter().map(|e| element_dict(e, ip)).collect::<Vec<_>>(),
        }),
        ExpressionKind::Binary { op, left, right } => json!({
            "type": "binary_op",
            "op": op.as_str(),
            "left": expression_dict(left, ip),
            "right": expression_dict(right, ip),
        }),
        ExpressionKind::Unary { op, operand } => json!({
            "type": "unary_op",
            "op": op.as_str(),
            "operand": expression_dict(operand, ip),
        }),
        ExpressionKind::Ternary { condition, then_branch, else_branch } => json!({
            "type": "ternary",
            "condition": expression_dict(condition, ip),
            "then": expression_dict(then_branch, ip),
            "else": expression_dict(else_branch, ip),
        }),
        ExpressionKind::Let { assignments, body } => json!({
            "type": "let_expr",
            "assignments": assignments.iter().map(|a| assignment_dict(a, ip)).collect::<Vec<_>>(),
            "body": expression_dict(body, ip),
        }),
        ExpressionKind::Echo { arguments, body } => json!({
            "type": "echo_expr",
            "arguments": arguments.iter().map(|a| argument_dict(a, ip)).collect::<Vec<_>>(),
            "body": expression_dict(body, ip),
        }),
        ExpressionKind::Assert { arguments, body } => json!({
            "type": "assert_expr",
            "arguments": arguments.iter().map(|a| argument_dict(a, ip)).collect::<Vec<_>>(),
            "body": expression_dict(body, ip),
        }),
        ExpressionKind::FunctionLiteral { parameters, body } => json!({
            "type": "function_literal",
            "parameters": parameters.iter().map(|p| parameter_dict(p, ip)).collect::<Vec<_>>(),
            "body": expression_dict(body, ip),
        }),
        ExpressionKind::Call { callee, arguments } => json!({
            "type": "call",
            "callee": expression_dict(callee, ip),
            "arguments": arguments.iter().map(|a| argument_dict(a, ip)).collect::<Vec<_>>(),
        }),
        ExpressionKind::Index { object, index } => json!({
            "type": "index",
            "object": expression_dict(object, ip),
            "index": expression_dict(index, ip),
        }),
        ExpressionKind::Member { object, member } => json!({
            "type": "member",
            "object": expression_dict(object, ip),
            "member": member,
        }),
    };
    with_position(value, &expr.position, ip)
}

fn element_dict(element: &ListCompElement, ip: bool) -> Value {
    let binds = |assignments: &[Assignment]| -> Vec<Value> {
        assignments.iter().map(|a| assignment_dict(a, ip)).collect()
    };

    let value = match &element.kind {
        ListCompKind::For { assignments, body } => json!({
            "type": "lc_for",
            "assignments": binds(assignments),
            "body": element_dict(body, ip),
        }),
        ListCompKind::CFor { init, condition, update, body } => json!({
            "type": "lc_c_for",
            "init": binds(init),
            "condition": expression_dict(condition, ip),
            "update": binds(update),
            "body": element_dict(body, ip),
        }),
        ListCompKind::If { condition, body } => json!({
            "type": "lc_if",
            "condition": expression_dict(condition, ip),
            "body": element_dict(body, ip),
        }),
        ListCompKind::IfElse { condition, body, else_body } => json!({
            "type": "lc_if_else",
            "condition": expression_dict(condition, ip),
            "body": element_dict(body, ip),
            "else_body": element_dict(else_body, ip),
        }),
        ListCompKind::Let { assignments, body } => json!({
            "type": "lc_let",
            "assignments": binds(assignments),
            "body": element_dict(body, ip),
        }),
        ListCompKind::Each { body } => json!({
            "type": "lc_each",
            "body": element_dict(body, ip),
        }),
        // A plain expression element serializes as the expression itself.
        ListCompKind::Expr(expr) => return expression_dict(expr, ip),
    };
    with_position(value, &element.position, ip)
}

fn assignment_dict(assignment: &Assignment, ip: bool) -> Value {
    let value = json!({
        "type": "assignment",
        "name": assignment.name,
        "value": expression_dict(&assignment.value, ip),
    });
    with_position(value, &assignment.position, ip)
}

fn parameter_dict(parameter: &Parameter, ip: bool) -> Value {
    let value = json!({
        "type": "parameter",
        "name": parameter.name,
        "default": parameter.default.as_ref().map(|d| expression_dict(d, ip)).unwrap_or(Value::Null),
    });
    with_position(value, &parameter.position, ip)
}

fn argument_dict(argument: &Argument, ip: bool) -> Value {
    let value = json!({
        "type": "argument",
        "name": argument.name.as_deref().map(Value::from).unwrap_or(Value::Null),
        "value": expression_dict(&argument.value, ip),
    });
    with_position(value, &argument.position, ip)
}

// =============================================================================
// FROM DICT
// =============================================================================

/// Rebuilds an AST from a dict tree.
///
/// Unknown node tags and missing required fields yield
/// [`Error::Deserialization`]. Missing positions default to the start of
/// an unnamed origin.
pub fn from_dict(value: &Value) -> Result<Ast, Error> {
    let map = as_object(value)?;
    let tag = tag_of(map)?;
    if tag != "ast" {
        return Err(Error::deserialization(format!("expected ast root, found {tag}")));
    }
    let statements = array_field(map, "statements")?
        .iter()
        .map(statement_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Ast::with_statements(statements))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, Error> {
    value.as_object().ok_or_else(|| Error::deserialization("expected an object"))
}

fn tag_of(map: &Map<String, Value>) -> Result<&str, Error> {
    map.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::deserialization("node without type tag"))
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value, Error> {
    map.get(key).ok_or_else(|| Error::deserialization(format!("missing field: {key}")))
}

fn opt_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn str_field(map: &Map<String, Value>, key: &str) -> Result<String, Error> {
    field(map, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::deserialization(format!("field {key} is not a string")))
}

fn bool_field(map: &Map<String, Value>, key: &str) -> Result<bool, Error> {
    field(map, key)?
        .as_bool()
        .ok_or_else(|| Error::deserialization(format!("field {key} is not a boolean")))
}

fn f64_field(map: &Map<String, Value>, key: &str) -> Result<f64, Error> {
    field(map, key)?
        .as_f64()
        .ok_or_else(|| Error::deserialization(format!("field {key} is not a number")))
}

fn u32_field(map: &Map<String, Value>, key: &str) -> Result<u32, Error> {
    field(map, key)?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| Error::deserialization(format!("field {key} is not a u32")))
}

fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, Error> {
    field(map, key)?
        .as_array()
        .ok_or_else(|| Error::deserialization(format!("field {key} is not an array")))
}

fn position_from(map: &Map<String, Value>) -> Result<Position, Error> {
    match opt_field(map, "position") {
        None => Ok(Position::default()),
        Some(value) => {
            let map = as_object(value)?;
            Ok(Position {
                file: str_field(map, "file")?,
                offset: u32_field(map, "offset")?,
                line: u32_field(map, "line")?,
                column: u32_field(map, "column")?,
            })
        }
    }
}

fn statements_from(map: &Map<String, Value>, key: &str) -> Result<Vec<Statement>, Error> {
    array_field(map, key)?.iter().map(statement_from).collect()
}

fn arguments_from(map: &Map<String, Value>, key: &str) -> Result<Vec<Argument>, Error> {
    array_field(map, key)?.iter().map(argument_from).collect()
}

fn assignments_from(map: &Map<String, Value>, key: &str) -> Result<Vec<Assignment>, Error> {
    array_field(map, key)?.iter().map(assignment_from).collect()
}

fn parameters_from(map: &Map<String, Value>, key: &str) -> Result<Vec<Parameter>, Error> {
    array_field(map, key)?.iter().map(parameter_from).collect()
}

fn statement_from(value: &Value) -> Result<Statement, Error> {
    let map = as_object(value)?;
    let position = position_from(map)?;

    let kind = match tag_of(map)? {
        "assignment" => StatementKind::Assignment(assignment_from(value)?),
        "module_declaration" => StatementKind::ModuleDeclaration {
            name: str_field(map, "name")?,
            parameters: parameters_from(map, "parameters")?,
            body: statements_from(map, "body")?,
        },
        "function_declaration" => StatementKind::FunctionDeclaration {
            name: str_field(map, "name")?,
            parameters: parameters_from(map, "parameters")?,
            body: expression_from(field(map, "body")?)?,
        },
        "use" => StatementKind::Use { path: str_field(map, "path")? },
        "include" => StatementKind::Include { path: str_field(map, "path")? },
        "comment" => StatementKind::Comment {
            text: str_field(map, "text")?,
            block: bool_field(map, "block")?,
        },
        _ => StatementKind::Instantiation(instantiation_from(value)?),
    };
    Ok(Statement::new(position, kind))
}

fn instantiation_from(value: &Value) -> Result<Instantiation, Error> {
    let map = as_object(value)?;
    let position = position_from(map)?;

    let kind = match tag_of(map)? {
        "module_call" => InstantiationKind::Call {
            name: str_field(map, "name")?,
            arguments: arguments_from(map, "arguments")?,
            children: statements_from(map, "children")?,
        },
        "modular_for" => InstantiationKind::For {
            assignments: assignments_from(map, "assignments")?,
            children: statements_from(map, "children")?,
        },
        "modular_c_for" => InstantiationKind::CFor {
            init: assignments_from(map, "init")?,
            condition: expression_from(field(map, "condition")?)?,
            update: assignments_from(map, "update")?,
            children: statements_from(map, "children")?,
        },
        "intersection_for" => InstantiationKind::IntersectionFor {
            assignments: assignments_from(map, "assignments")?,
            children: statements_from(map, "children")?,
        },
        "modular_let" => InstantiationKind::Let {
            assignments: assignments_from(map, "assignments")?,
            children: statements_from(map, "children")?,
        },
        "modular_echo" => InstantiationKind::Echo {
            arguments: arguments_from(map, "arguments")?,
            children: statements_from(map, "children")?,
        },
        "modular_assert" => InstantiationKind::Assert {
            arguments: arguments_from(map, "arguments")?,
            children: statements_from(map, "children")?,
        },
        "modular_if" => InstantiationKind::If {
            condition: expression_from(field(map, "condition")?)?,
            children: statements_from(map, "children")?,
        },
        "modular_if_else" => InstantiationKind::IfElse {
            condition: expression_from(field(map, "condition")?)?,
            children: statements_from(map, "children")?,
            else_children: statements_from(map, "else_children")?,
        },
        "show_only" => {
            InstantiationKind::ShowOnly(Box::new(instantiation_from(field(map, "target")?)?))
        }
        "highlight" => {
            InstantiationKind::Highlight(Box::new(instantiation_from(field(map, "target")?)?))
        }
        "background" => {
            InstantiationKind::Background(Box::new(instantiation_from(field(map, "target")?)?))
        }
        "disable" => {
            InstantiationKind::Disable(Box::new(instantiation_from(field(map, "target")?)?))
        }
        other => return Err(Error::deserialization(format!("unknown node tag: {other}"))),
    };
    Ok(Instantiation::new(position, kind))
}

fn expression_from(value: &Value) -> Result<Expression, Error> {
    let map = as_object(value)?;
    let position = position_from(map)?;

    let kind = match tag_of(map)? {
        "number" => ExpressionKind::Number(f64_field(map, "value")?),
        "string" => ExpressionKind::Str(str_field(map, "value")?),
        "boolean" => ExpressionKind::Boolean(bool_field(map, "value")?),
        "undef" => ExpressionKind::Undef,
        "identifier" => ExpressionKind::Identifier(str_field(map, "name")?),
        "range" => ExpressionKind::Range {
            start: Box::new(expression_from(field(map, "start")?)?),
            step: opt_field(map, "step")
                .map(expression_from)
                .transpose()?
                .map(Box::new),
            end: Box::new(expression_from(field(map, "end")?)?),
        },
        "vector" => ExpressionKind::Vector(
            array_field(map, "elements")?
                .iter()
                .map(expression_from)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "list_comprehension" => ExpressionKind::ListComprehension(
            array_field(map, "elements")?
                .iter()
                .map(element_from)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "binary_op" => {
            let op = str_field(map, "op")?;
            ExpressionKind::Binary {
                op: BinaryOp::from_str(&op)
                    .ok_or_else(|| Error::deserialization(format!("unknown operator: {op}")))?,
                left: Box::new(expression_from(field(map, "left")?)?),
                right: Box::new(expression_from(field(map, "right")?)?),
            }
        }
        "unary_op" => {
            let op = str_field(map, "op")?;
            ExpressionKind::Unary {
                op: UnaryOp::from_str(&op)
                    .ok_or_else(|| Error::deserialization(format!("unknown operator: {op}")))?,
                operand: Box::new(expression_from(field(map, "operand")?)?),
            }
        }
        "ternary" => ExpressionKind::Ternary {
            condition: Box::new(expression_from(field(map, "condition")?)?),
            then_branch: Box::new(expression_from(field(map, "then")?)?),
            else_branch: Box::new(expression_from(field(map, "else")?)?),
        },
        "let_expr" => ExpressionKind::Let {
            assignments: assignments_from(map, "assignments")?,
            body: Box::new(expression_from(field(map, "body")?)?),
        },
        "echo_expr" => ExpressionKind::Echo {
            arguments: arguments_from(map, "arguments")?,
            body: Box::new(expression_from(field(map, "body")?)?),
        },
        "assert_expr" => ExpressionKind::Assert {
            arguments: arguments_from(map, "arguments")?,
            body: Box::new(expression_from(field(map, "body")?)?),
        },
        "function_literal" => ExpressionKind::FunctionLiteral {
            parameters: parameters_from(map, "parameters")?,
            body: Box::new(expression_from(field(map, "body")?)?),
        },
        "call" => ExpressionKind::Call {
            callee: Box::new(expression_from(field(map, "callee")?)?),
            arguments: arguments_from(map, "arguments")?,
        },
        "index" => ExpressionKind::Index {
            object: Box::new(expression_from(field(map, "object")?)?),
            index: Box::new(expression_from(field(map, "index")?)?),
        },
        "member" => ExpressionKind::Member {
            object: Box::new(expression_from(field(map, "object")?)?),
            member: str_field(map, "member")?,
        },
        other => return Err(Error::deserialization(format!("unknown node tag: {other}"))),
    };
    Ok(Expression::new(position, kind))
}

fn element_from(value: &Value) -> Result<ListCompElement, Error> {
    let map = as_object(value)?;
    let position = position_from(map)?;

    let kind = match tag_of(map)? {
        "lc_for" => ListCompKind::For {
            assignments: assignments_from(map, "assignments")?,
            body: Box::new(element_from(field(map, "body")?)?),
        },
        "lc_c_for" => ListCompKind::CFor {
            init: assignments_from(map, "init")?,
            condition: Box::new(expression_from(field(map, "condition")?)?),
            update: assignments_from(map, "update")?,
            body: Box::new(element_from(field(map, "body")?)?),
        },
        "lc_if" => ListCompKind::If {
            condition: Box::new(expression_from(field(map, "condition")?)?),
            body: Box::new(element_from(field(map, "body")?)?),
        },
        "lc_if_else" => ListCompKind::IfElse {
            condition: Box::new(expression_from(field(map, "condition")?)?),
            body: Box::new(element_from(field(map, "body")?)?),
            else_body: Box::new(element_from(field(map, "else_body")?)?),
        },
        "lc_let" => ListCompKind::Let {
            assignments: assignments_from(map, "assignments")?,
            body: Box::new(element_from(field(map, "body")?)?),
        },
        "lc_each" => ListCompKind::Each { body: Box::new(element_from(field(map, "body")?)?) },
        _ => {
            let expr = expression_from(value)?;
            return Ok(ListCompElement::new(expr.position.clone(), ListCompKind::Expr(expr)));
        }
    };
    Ok(ListCompElement::new(position, kind))
}

fn assignment_from(value: &Value) -> Result<Assignment, Error> {
    let map = as_object(value)?;
    Ok(Assignment {
        position: position_from(map)?,
        name: str_field(map, "name")?,
        value: expression_from(field(map, "value")?)?,
    })
}

fn parameter_from(value: &Value) -> Result<Parameter, Error> {
    let map = as_object(value)?;
    Ok(Parameter {
        position: position_from(map)?,
        name: str_field(map, "name")?,
        default: opt_field(map, "default").map(expression_from).transpose()?,
    })
}

fn argument_from(value: &Value) -> Result<Argument, Error> {
    let map = as_object(value)?;
    let name = match opt_field(map, "name") {
        None => None,
        Some(v) => Some(
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::deserialization("argument name is not a string"))?,
        ),
    };
    Ok(Argument {
        position: position_from(map)?,
        name,
        value: expression_from(field(map, "value")?)?,
    })
}
