//! Insertion planning against real completion results.

use thizer::base::Position;
use thizer::ide::{EditorState, InsertionPlan, TextBuffer};

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::USER_CLASS;

const CALLER: &str = "<?php
class Caller extends User {
    function show() {
        echo $this->get . PHP_EOL;
    }
}";

#[test]
fn test_round_trip_replaces_only_the_prefix() {
    let mut host = host_with_files(&[("/src/User.php", USER_CLASS), ("/src/Caller.php", CALLER)]);
    let line = "        echo $this->get . PHP_EOL;";
    let cursor = Position::new(3, 23);

    let file = file_id(&host, "/src/Caller.php");
    let analysis = host.analysis();
    let context = analysis.completion_context(line, cursor);
    let items = analysis.completions(file, &context);
    let candidate = items
        .iter()
        .find(|c| c.insert_text.as_ref() == "getName()")
        .expect("getName candidate");

    let plan = InsertionPlan::new(&context, line, candidate);
    assert_eq!(plan.end_column, 23);
    assert_eq!(plan.apply_to_line(line), "        echo $this->getName() . PHP_EOL;");

    let mut buffer = TextBuffer::new("/src/Caller.php", CALLER).with_cursor(3, 23);
    assert!(plan.apply(&mut buffer));
    let expected = CALLER.replace("$this->get .", "$this->getName() .");
    assert_eq!(buffer.text(), expected.as_str());
    assert_eq!(buffer.cursor(), Position::new(3, 29));
}

#[test]
fn test_partial_self_reference_round_trip() {
    let mut host = host_with_files(&[("/src/User.php", USER_CLASS), ("/src/Caller.php", CALLER)]);
    let line = "        echo $th";
    let file = file_id(&host, "/src/Caller.php");
    let analysis = host.analysis();
    let context = analysis.completion_context(line, Position::new(3, 16));
    let items = analysis.completions(file, &context);
    let candidate = items
        .iter()
        .find(|c| c.insert_text.as_ref() == "getName()")
        .expect("getName candidate");
    let plan = InsertionPlan::new(&context, line, candidate);
    assert_eq!(plan.apply_to_line(line), "        echo $this->getName()");
}

#[test]
fn test_variable_round_trip() {
    let source = "<?php\n$counter = 0;\necho $co + 1;";
    let mut host = host_with_files(&[("/src/a.php", source)]);
    let file = file_id(&host, "/src/a.php");
    let line = "echo $co + 1;";
    let analysis = host.analysis();
    let context = analysis.completion_context(line, Position::new(2, 8));
    let items = analysis.completions(file, &context);
    assert_eq!(items[0].insert_text.as_ref(), "$counter");

    let plan = InsertionPlan::new(&context, line, &items[0]);
    assert_eq!((plan.start_column, plan.end_column), (5, 8));
    assert_eq!(plan.apply_to_line(line), "echo $counter + 1;");
}

#[test]
fn test_other_lines_untouched() {
    let source = "<?php\n$counter = 0;\n$co;\n// tail";
    let mut host = host_with_files(&[("/src/a.php", source)]);
    let file = file_id(&host, "/src/a.php");
    let analysis = host.analysis();
    let context = analysis.completion_context("$co", Position::new(2, 3));
    let items = analysis.completions(file, &context);
    let plan = InsertionPlan::new(&context, "$co", &items[0]);

    let mut buffer = TextBuffer::new("/src/a.php", source).with_cursor(2, 3);
    assert!(plan.apply(&mut buffer));
    assert_eq!(buffer.text(), "<?php\n$counter = 0;\n$counter;\n// tail");
}
