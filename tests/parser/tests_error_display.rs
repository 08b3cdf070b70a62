//! Parse error reporting.

use rstest::rstest;
use thizer::parser::{ParseErrorKind, ParseOptions, parse};

#[rstest]
#[case("<?php class A {", ParseErrorKind::UnexpectedEof)]
#[case("<?php foo());", ParseErrorKind::UnexpectedToken)]
#[case("<?php class A { public function (); }", ParseErrorKind::UnexpectedToken)]
fn test_error_kinds(#[case] source: &str, #[case] kind: ParseErrorKind) {
    let error = parse(source, &ParseOptions::default()).expect_err("should fail");
    assert_eq!(error.kind, kind, "{error}");
}

#[test]
fn test_error_display_is_one_based() {
    let error = parse("<?php\n\nfoo());", &ParseOptions::default()).expect_err("should fail");
    assert!(error.to_string().starts_with("3:"), "{error}");
}
