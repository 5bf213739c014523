//! Cache coherence for the file-level parse API.

use scad_ast::{clear_ast_cache, parse_file, ParseOptions, StatementKind};
use std::fs;
use std::thread::sleep;
use std::time::Duration;

fn assignment_value(ast: &scad_ast::Ast) -> f64 {
    match &ast.statements[0].kind {
        StatementKind::Assignment(a) => match &a.value.kind {
            scad_ast::ExpressionKind::Number(n) => *n,
            other => panic!("expected number, got {other:?}"),
        },
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn repeated_parses_return_equal_asts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stable.scad");
    fs::write(&path, "x = 1;").unwrap();

    let first = parse_file(&path, &ParseOptions::default()).unwrap();
    let second = parse_file(&path, &ParseOptions::default()).unwrap();
    assert_eq!(*first, *second);
}

#[test]
fn modified_file_is_reparsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changing.scad");

    fs::write(&path, "x = 1;").unwrap();
    let before = parse_file(&path, &ParseOptions::default()).unwrap();
    assert_eq!(assignment_value(&before), 1.0);

    // Leave room for filesystems with coarse mtime resolution.
    sleep(Duration::from_millis(50));
    fs::write(&path, "x = 2;").unwrap();

    let after = parse_file(&path, &ParseOptions::default()).unwrap();
    assert_eq!(assignment_value(&after), 2.0);
}

#[test]
fn cleared_cache_still_parses_correctly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleared.scad");
    fs::write(&path, "x = 3;").unwrap();

    let before = parse_file(&path, &ParseOptions::default()).unwrap();
    clear_ast_cache();
    let after = parse_file(&path, &ParseOptions::default()).unwrap();
    assert_eq!(*before, *after);
}

#[test]
fn options_change_bypasses_stale_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.scad");
    fs::write(&path, "// note\nx = 4;").unwrap();

    let plain = parse_file(&path, &ParseOptions::default()).unwrap();
    assert!(!plain.statements.iter().any(|s| matches!(s.kind, StatementKind::Comment { .. })));

    let with_comments = ParseOptions { include_comments: true, ..ParseOptions::default() };
    let commented = parse_file(&path, &with_comments).unwrap();
    assert!(commented.statements.iter().any(|s| matches!(s.kind, StatementKind::Comment { .. })));
}
