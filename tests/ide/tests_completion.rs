//! Code completion through the analysis host.

use thizer::ide::{CandidateKind, CompletionMode, INHERITED_PRIORITY, OWN_PRIORITY};
use thizer::syntax::Visibility;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// SELF MEMBERS
// =============================================================================

#[test]
fn test_private_member_hidden_from_subclass() {
    let mut host = host_with_files(&[("/src/User.php", USER_CLASS), ("/src/Admin.php", ADMIN_CLASS)]);
    let items = complete_at(&mut host, "/src/Admin.php", 3, "        $this->");
    assert_eq!(insert_texts(&items), vec!["promote()", "getName()"]);

    let get_name = &items[1];
    assert_eq!(get_name.visibility, Visibility::Public);
    assert_eq!(get_name.origin.as_deref(), Some("User"));
    assert_eq!(get_name.kind, CandidateKind::Method);
}

/// Inside its own class `$this->` deliberately lists private members too.
/// Only a subclass gets the single public `getName()` candidate (see
/// `test_private_member_hidden_from_subclass`).
#[test]
fn test_own_class_offers_every_visibility() {
    let mut host = host_with_files(&[("/src/User.php", USER_CLASS)]);
    let items = complete_at(&mut host, "/src/User.php", 10, "        $this->");
    assert_eq!(insert_texts(&items), vec!["secret", "getName()"]);
    assert_eq!(items[0].visibility, Visibility::Private);
    assert!(items.iter().all(|c| c.origin.is_none()));
}

#[test]
fn test_doc_summary_attached() {
    let mut host = host_with_files(&[("/src/User.php", USER_CLASS)]);
    let items = complete_at(&mut host, "/src/User.php", 10, "        $this->getN");
    let doc = items[0].doc.as_ref().expect("doc");
    assert_eq!(doc.summary.as_deref(), Some("Display name of the user. [more...]"));
    assert_eq!(doc.returns.as_deref(), Some("@return string"));
}

#[test]
fn test_inherited_protected_member_with_origin() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS), ("/src/B.php", CHILD_CLASS)]);
    let items = complete_at(&mut host, "/src/B.php", 3, "$this->");
    let value = items
        .iter()
        .find(|c| c.insert_text.as_ref() == "value")
        .expect("inherited property");
    assert_eq!(value.origin.as_deref(), Some("A"));
    assert_eq!(value.visibility, Visibility::Protected);
    assert_eq!(value.sort_priority, INHERITED_PRIORITY);
    assert!(!items.iter().any(|c| c.insert_text.as_ref() == "hidden"));
}

#[test]
fn test_own_members_rank_before_inherited() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS), ("/src/B.php", CHILD_CLASS)]);
    let items = complete_at(&mut host, "/src/B.php", 3, "$this->");
    assert_eq!(items[0].insert_text.as_ref(), "run()");
    assert_eq!(items[0].sort_priority, OWN_PRIORITY);
}

#[test]
fn test_cyclic_inheritance_is_finite_and_deduplicated() {
    let mut host = host_with_files(&[
        ("/src/A.php", "<?php\nclass A extends B {\n    public $a;\n    function f() {\n\n    }\n}"),
        ("/src/B.php", "<?php\nclass B extends A {\n    public $b;\n    public $a;\n}"),
    ]);
    let items = complete_at(&mut host, "/src/A.php", 4, "$this->");
    assert_eq!(insert_texts(&items), vec!["a", "f()", "b"]);
}

#[test]
fn test_trait_members_offered() {
    let mut host = host_with_files(&[
        ("/src/Logs.php", "<?php trait Logs { protected function log($message) {} }"),
        (
            "/src/Job.php",
            "<?php\nclass Job {\n    use Logs;\n    function run() {\n\n    }\n}",
        ),
    ]);
    let items = complete_at(&mut host, "/src/Job.php", 4, "$this->lo");
    assert_eq!(insert_texts(&items), vec!["log($message)"]);
    assert_eq!(items[0].origin.as_deref(), Some("Logs"));
}

#[test]
fn test_self_member_outside_class_is_empty() {
    let mut host = host_with_files(&[("/src/a.php", "<?php\n$x = 1;\n\n")]);
    assert!(complete_at(&mut host, "/src/a.php", 2, "$this->").is_empty());
}

// =============================================================================
// FILTER, DEDUP AND IDEMPOTENCE
// =============================================================================

#[test]
fn test_every_candidate_contains_fragment() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS), ("/src/B.php", CHILD_CLASS)]);
    for fragment in ["", "r", "VAL", "des", "e", "zz"] {
        let line = format!("$this->{fragment}");
        let items = complete_at(&mut host, "/src/B.php", 3, &line);
        for item in &items {
            assert!(
                item.insert_text.to_lowercase().contains(&fragment.to_lowercase()),
                "{} does not contain {fragment}",
                item.insert_text
            );
        }
    }
}

#[test]
fn test_variable_candidates_contain_fragment() {
    let mut host = host_with_files(&[("/src/Report.php", SCOPED_METHOD)]);
    let items = complete_at(&mut host, "/src/Report.php", 6, "$R");
    assert!(insert_texts(&items).contains(&"$rows"));
    for item in &items {
        assert!(item.insert_text.to_lowercase().contains('r'));
    }
}

#[test]
fn test_no_duplicate_insert_texts() {
    let mut host = host_with_files(&[(
        "/src/a.php",
        "<?php\nfunction f($argv) {\n    $argv = [];\n    $x = 1;\n    $x = 2;\n\n}",
    )]);
    let items = complete_at(&mut host, "/src/a.php", 5, "$");
    let mut texts = insert_texts(&items);
    let total = texts.len();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), total);
}

#[test]
fn test_repeated_requests_are_identical() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS), ("/src/B.php", CHILD_CLASS)]);
    let first = complete_at(&mut host, "/src/B.php", 3, "$this->");
    let second = complete_at(&mut host, "/src/B.php", 3, "$this->");
    assert_eq!(first, second);
}

// =============================================================================
// VARIABLES
// =============================================================================

#[test]
fn test_parameter_visible_on_first_body_line() {
    let mut host = host_with_files(&[("/src/Report.php", SCOPED_METHOD)]);
    let items = complete_at(&mut host, "/src/Report.php", 3, "$ro");
    assert_eq!(insert_texts(&items)[0], "$rows");
}

#[test]
fn test_later_assignment_not_visible() {
    let mut host = host_with_files(&[("/src/Report.php", SCOPED_METHOD)]);
    let items = complete_at(&mut host, "/src/Report.php", 3, "$to");
    assert!(!insert_texts(&items).contains(&"$total"));
    let items = complete_at(&mut host, "/src/Report.php", 4, "$to");
    assert_eq!(insert_texts(&items), vec!["$total"]);
}

#[test]
fn test_predefined_variables_always_offered() {
    let mut host = host_with_files(&[("/src/a.php", "<?php\n\n")]);
    let items = complete_at(&mut host, "/src/a.php", 1, "$_SE");
    assert_eq!(insert_texts(&items), vec!["$_SESSION", "$_SERVER"]);
    assert!(items.iter().all(|c| c.visibility == Visibility::Unknown));
}

// =============================================================================
// OTHER MODES
// =============================================================================

#[test]
fn test_instance_member_is_classified_but_empty() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS), ("/src/B.php", CHILD_CLASS)]);
    let context = context_at(&mut host, 3, "$other->va");
    assert_eq!(context.mode, CompletionMode::InstanceMember);
    assert!(complete_at(&mut host, "/src/B.php", 3, "$other->va").is_empty());
}

#[test]
fn test_new_instance_lists_classes() {
    let mut host = host_with_files(&[
        ("/src/A.php", BASE_CLASS),
        ("/src/B.php", CHILD_CLASS),
        ("/src/main.php", "<?php\n\n"),
    ]);
    let items = complete_at(&mut host, "/src/main.php", 1, "$b = new ");
    assert!(items.is_empty());
    let items = complete_at(&mut host, "/src/main.php", 1, "$b = new b");
    assert_eq!(insert_texts(&items), vec!["B"]);
    assert_eq!(items[0].kind, CandidateKind::Class);
}

#[test]
fn test_unclassified_is_empty() {
    let mut host = host_with_files(&[("/src/A.php", BASE_CLASS)]);
    assert!(complete_at(&mut host, "/src/A.php", 2, "retur").is_empty());
}
