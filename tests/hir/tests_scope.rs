//! Scope walking over whole files.

use thizer::base::Position;
use thizer::hir::{Binding, BindingKind, ScopeWalker};
use thizer::parser::{ParseOptions, parse};

use crate::helpers::source_fixtures::SCOPED_METHOD;

fn visible(source: &str, line: usize) -> Vec<String> {
    let unit = parse(source, &ParseOptions::default()).expect("parse");
    ScopeWalker::new(&[])
        .walk(&unit, Position::new(line, 0))
        .bindings
        .iter()
        .map(Binding::display_name)
        .collect()
}

#[test]
fn test_foreach_body() {
    assert_eq!(visible(SCOPED_METHOD, 6), vec!["$rows", "$title", "$total", "$row"]);
}

#[test]
fn test_try_body() {
    assert_eq!(visible(SCOPED_METHOD, 10), vec!["$rows", "$title", "$total", "$file"]);
}

#[test]
fn test_catch_body() {
    assert_eq!(
        visible(SCOPED_METHOD, 13),
        vec!["$rows", "$title", "$total", "$e", "$message"]
    );
}

#[test]
fn test_binding_on_cursor_line_is_excluded() {
    let names = visible(SCOPED_METHOD, 15);
    assert!(!names.contains(&"$late".to_string()));
    assert!(!names.contains(&"$file".to_string()));
}

#[test]
fn test_first_matching_method_wins() {
    let source = "<?php
class Two {
    function first($a) {

    }
    function second($b) {

    }
}";
    assert_eq!(visible(source, 3), vec!["$a"]);
    assert_eq!(visible(source, 6), vec!["$b"]);
    assert!(visible(source, 4).is_empty());
}

#[test]
fn test_top_level_function_and_globals() {
    let source = "<?php
$config = [];
function handler($request) {
    global $config;
    static $calls = 0;

}";
    let unit = parse(source, &ParseOptions::default()).expect("parse");
    let frame = ScopeWalker::new(&[]).walk(&unit, Position::new(5, 0));
    let kinds: Vec<_> = frame.bindings.iter().map(|b| (b.display_name(), b.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("$request".to_string(), BindingKind::Parameter),
            ("$config".to_string(), BindingKind::Global),
            ("$calls".to_string(), BindingKind::Static),
        ]
    );
}

#[test]
fn test_new_expression_records_type_hint() {
    let source = "<?php
$user = new App\\User();

";
    let unit = parse(source, &ParseOptions::default()).expect("parse");
    let frame = ScopeWalker::new(&[]).walk(&unit, Position::new(2, 0));
    assert_eq!(frame.bindings[0].type_hint.as_deref(), Some("App\\User"));
}
