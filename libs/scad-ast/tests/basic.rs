use scad_ast::{
    parse_string, Argument, ExpressionKind, InstantiationKind, ParseOptions, StatementKind,
};

fn parse(source: &str) -> scad_ast::Ast {
    parse_string(source, &ParseOptions::default()).unwrap()
}

#[test]
fn parses_assignment_with_addition() {
    let ast = parse("x = 10 + 5;");
    assert_eq!(ast.statements.len(), 1);

    let assignment = match &ast.statements[0].kind {
        StatementKind::Assignment(a) => a,
        other => panic!("expected assignment, got {other:?}"),
    };
    assert_eq!(assignment.name, "x");

    match &assignment.value.kind {
        ExpressionKind::Binary { op, left, right } => {
            assert_eq!(op.as_str(), "+");
            assert!(matches!(left.kind, ExpressionKind::Number(n) if n == 10.0));
            assert!(matches!(right.kind, ExpressionKind::Number(n) if n == 5.0));
        }
        other => panic!("expected addition, got {other:?}"),
    }
}

#[test]
fn parenthesized_addition_under_multiplication() {
    let ast = parse("result = (10 + 5) * 2;");
    let assignment = match &ast.statements[0].kind {
        StatementKind::Assignment(a) => a,
        other => panic!("expected assignment, got {other:?}"),
    };

    match &assignment.value.kind {
        ExpressionKind::Binary { op, left, right } => {
            assert_eq!(op.as_str(), "*");
            match &left.kind {
                ExpressionKind::Binary { op, .. } => assert_eq!(op.as_str(), "+"),
                other => panic!("expected addition on the left, got {other:?}"),
            }
            assert!(matches!(right.kind, ExpressionKind::Number(n) if n == 2.0));
        }
        other => panic!("expected multiplication, got {other:?}"),
    }
}

#[test]
fn parses_module_declaration_with_child_call() {
    let ast = parse("module box(size) { cube(size); }");
    match &ast.statements[0].kind {
        StatementKind::ModuleDeclaration { name, parameters, body } => {
            assert_eq!(name, "box");
            assert_eq!(parameters.len(), 1);
            assert_eq!(parameters[0].name, "size");
            assert!(parameters[0].default.is_none());
            assert_eq!(body.len(), 1);

            match &body[0].kind {
                StatementKind::Instantiation(inst) => match &inst.kind {
                    InstantiationKind::Call { name, arguments, children } => {
                        assert_eq!(name, "cube");
                        assert_eq!(arguments.len(), 1);
                        assert!(arguments[0].name.is_none());
                        assert!(matches!(
                            arguments[0].value.kind,
                            ExpressionKind::Identifier(ref id) if id == "size"
                        ));
                        assert!(children.is_empty());
                    }
                    other => panic!("expected call, got {other:?}"),
                },
                other => panic!("expected instantiation, got {other:?}"),
            }
        }
        other => panic!("expected module declaration, got {other:?}"),
    }
}

#[test]
fn call_keeps_positional_and_named_argument_order() {
    let ast = parse("x = foo(1, b = 2);");
    let assignment = match &ast.statements[0].kind {
        StatementKind::Assignment(a) => a,
        other => panic!("expected assignment, got {other:?}"),
    };

    let arguments: &[Argument] = match &assignment.value.kind {
        ExpressionKind::Call { callee, arguments } => {
            assert!(matches!(callee.kind, ExpressionKind::Identifier(ref n) if n == "foo"));
            arguments
        }
        other => panic!("expected call, got {other:?}"),
    };

    assert_eq!(arguments.len(), 2);
    assert!(arguments[0].name.is_none());
    assert!(matches!(arguments[0].value.kind, ExpressionKind::Number(n) if n == 1.0));
    assert_eq!(arguments[1].name.as_deref(), Some("b"));
    assert!(matches!(arguments[1].value.kind, ExpressionKind::Number(n) if n == 2.0));
}

#[test]
fn highlight_modifier_wraps_translate_with_child() {
    let ast = parse("#translate([0,0,1]) cube(1);");
    let inst = match &ast.statements[0].kind {
        StatementKind::Instantiation(inst) => inst,
        other => panic!("expected instantiation, got {other:?}"),
    };

    let inner = match &inst.kind {
        InstantiationKind::Highlight(inner) => inner,
        other => panic!("expected highlight, got {other:?}"),
    };

    match &inner.kind {
        InstantiationKind::Call { name, arguments, children } => {
            assert_eq!(name, "translate");
            assert_eq!(arguments.len(), 1);
            match &arguments[0].value.kind {
                ExpressionKind::Vector(elements) => assert_eq!(elements.len(), 3),
                other => panic!("expected vector argument, got {other:?}"),
            }
            assert_eq!(children.len(), 1);
            match &children[0].kind {
                StatementKind::Instantiation(child) => {
                    assert!(matches!(
                        &child.kind,
                        InstantiationKind::Call { name, .. } if name == "cube"
                    ));
                }
                other => panic!("expected child instantiation, got {other:?}"),
            }
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn use_statement_survives_parsing() {
    let ast = parse("use <MCAD/gears.scad>\ncube(1);");
    assert!(matches!(
        &ast.statements[0].kind,
        StatementKind::Use { path } if path == "MCAD/gears.scad"
    ));
}

#[test]
fn parsing_is_deterministic() {
    let source = "module m(a = 1) { if (a > 0) cube(a); else sphere(a); }\nm(2);";
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first, second);
}

#[test]
fn positions_point_into_the_original_source() {
    let source = "x = 10 + 5;\ny = 2;";
    let ast = parse(source);

    // The second assignment starts at line 2, column 1.
    let pos = &ast.statements[1].position;
    assert_eq!((pos.line, pos.column), (2, 1));
    assert_eq!(&source[pos.offset as usize..pos.offset as usize + 1], "y");

    // The right-hand side of the first assignment starts at the `1` of 10.
    match &ast.statements[0].kind {
        StatementKind::Assignment(a) => {
            assert_eq!(a.value.position.offset, 4);
            assert_eq!((a.value.position.line, a.value.position.column), (1, 5));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}
