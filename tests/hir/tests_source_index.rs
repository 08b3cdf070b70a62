//! Source index tests: registration, lazy parsing and the class table.

use std::path::Path;

use thizer::hir::SourceIndex;

#[test]
fn test_register_does_not_parse() {
    let mut index = SourceIndex::default();
    let id = index.register("/src/A.php");
    assert!(index.parsed(id).is_none());
    index.set_disk_text(id, "<?php class A {}");
    assert!(index.parsed(id).is_none());
    assert!(index.get_parsed(id).is_some());
    assert!(index.parsed(id).is_some());
}

#[test]
fn test_register_is_idempotent() {
    let mut index = SourceIndex::default();
    let first = index.register("/src/A.php");
    let second = index.register("/src/A.php");
    assert_eq!(first, second);
    assert_eq!(index.len(), 1);
}

#[test]
fn test_failed_parse_without_history_is_none() {
    let mut index = SourceIndex::default();
    let id = index.register("/src/A.php");
    index.set_disk_text(id, "<?php class A { public function ( }");
    assert!(index.get_parsed(id).is_none());
    assert!(index.file(id).and_then(|f| f.last_error()).is_some());
}

#[test]
fn test_stale_but_usable_after_failed_reparse() {
    let mut index = SourceIndex::default();
    let id = index.register("/src/A.php");
    index.set_disk_text(id, "<?php class A { public $ok; }");
    let first = index.get_parsed(id).expect("first parse");

    index.set_live_text(id, "<?php class A { public $ok; public function ( }");
    let second = index.get_parsed(id).expect("previous tree");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(index.file(id).is_some_and(|f| f.last_error().is_some()));
}

#[test]
fn test_find_by_name_fragment() {
    let mut index = SourceIndex::default();
    index.register("/src/Models/UserModel.php");
    index.register("/src/Models/Order.php");
    index.register("/src/UserController.php");
    let found = index.find_by_name_fragment("User");
    assert_eq!(found.len(), 2);
}

#[test]
fn test_class_table_is_qualified_and_case_insensitive() {
    let mut index = SourceIndex::default();
    let a = index.register("/src/Models/User.php");
    index.set_disk_text(a, "<?php namespace App\\Models; class User {}");
    let b = index.register("/legacy/User.php");
    index.set_disk_text(b, "<?php class User {}");
    index.refresh();

    assert_eq!(
        index.classes().get("app\\models\\USER").map(|c| c.file),
        Some(a)
    );
    assert_eq!(index.classes().get("\\User").map(|c| c.file), Some(b));
    assert_eq!(index.classes().by_short_name("user").len(), 2);
}

#[test]
fn test_remove_drops_classes() {
    let mut index = SourceIndex::default();
    let id = index.register("/src/A.php");
    index.set_disk_text(id, "<?php class A {}");
    index.refresh();
    assert_eq!(index.classes().len(), 1);

    assert_eq!(index.remove(Path::new("/src/A.php")), Some(id));
    index.refresh();
    assert!(index.classes().is_empty());
    assert!(index.file(id).is_none());
}
