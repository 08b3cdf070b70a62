//! The host protocol: request, list, apply.

use thizer::base::Position;
use thizer::ide::{AnalysisHost, CompletionProvider, EditorState, TextBuffer};

use crate::helpers::source_fixtures::{BASE_CLASS, CHILD_CLASS};

fn provider_with_base() -> CompletionProvider {
    let mut host = AnalysisHost::new();
    host.set_file_content("/src/A.php", BASE_CLASS);
    CompletionProvider::new(host)
}

/// Types `text` as a complete statement and leaves the cursor before its `;`.
fn type_statement(buffer: &mut TextBuffer, text: &str) {
    buffer.insert(&format!("{text};"));
    let cursor = buffer.cursor();
    buffer.set_cursor(Position::new(cursor.line, cursor.column - 1));
}

#[test]
fn test_unsaved_buffer_is_used() {
    let mut provider = provider_with_base();
    provider.host_mut().set_file_content("/src/B.php", CHILD_CLASS);

    // The buffer adds a property that is not on disk yet
    let edited = CHILD_CLASS.replace("class B extends A {", "class B extends A {\n    public $draft;");
    let mut buffer = TextBuffer::new("/src/B.php", &edited).with_cursor(4, 0);
    type_statement(&mut buffer, "$this->dr");
    assert!(buffer.is_dirty());

    let request = provider.has_candidates(&buffer, Some('r')).expect("candidates");
    let texts: Vec<_> = request.candidates.iter().map(|c| c.insert_text.as_ref()).collect();
    assert_eq!(texts, vec!["draft"]);
}

#[test]
fn test_full_cycle_applies_candidate() {
    let mut provider = provider_with_base();
    let mut buffer = TextBuffer::new("/src/B.php", CHILD_CLASS).with_cursor(3, 0);
    type_statement(&mut buffer, "        $this->desc");

    let request = provider.has_candidates(&buffer, Some('c')).expect("candidates");
    let list = provider.get_candidates(&request).expect("latest request");
    assert_eq!(list.candidates.len(), 1);
    assert!(provider.apply_candidate(&mut buffer, &request, &list.candidates[0]));
    assert_eq!(buffer.line_text(3), Some("        $this->describe($verbose);"));
    assert_eq!(buffer.line_text(2), Some("    public function run() {"));
}

#[test]
fn test_stale_request_discarded() {
    let mut provider = provider_with_base();
    let mut buffer = TextBuffer::new("/src/B.php", CHILD_CLASS).with_cursor(3, 0);
    type_statement(&mut buffer, "$this->v");
    let old = provider.has_candidates(&buffer, Some('v')).expect("candidates");

    buffer.insert("a");
    let new = provider.has_candidates(&buffer, Some('a')).expect("candidates");
    assert!(provider.get_candidates(&old).is_none());
    assert!(provider.get_candidates(&new).is_some());
}

#[test]
fn test_request_without_candidates_still_supersedes() {
    let mut provider = provider_with_base();
    let mut buffer = TextBuffer::new("/src/B.php", CHILD_CLASS).with_cursor(3, 0);
    type_statement(&mut buffer, "$this->v");
    let old = provider.has_candidates(&buffer, Some('v')).expect("candidates");

    buffer.insert("zz");
    assert!(provider.has_candidates(&buffer, Some('z')).is_none());
    assert!(provider.get_candidates(&old).is_none());
}

#[test]
fn test_read_only_editor() {
    let mut provider = provider_with_base();
    let source = CHILD_CLASS.replace("    public function run() {\n\n", "    public function run() {\n$this->v;\n");
    let buffer = TextBuffer::new("/src/B.php", &source).with_cursor(3, 8).read_only();
    assert!(provider.has_candidates(&buffer, None).is_none());
}

#[test]
fn test_apply_in_other_file_rejected() {
    let mut provider = provider_with_base();
    let mut buffer = TextBuffer::new("/src/B.php", CHILD_CLASS).with_cursor(3, 0);
    type_statement(&mut buffer, "$this->v");
    let request = provider.has_candidates(&buffer, None).expect("candidates");

    let mut other = TextBuffer::new("/src/C.php", CHILD_CLASS).with_cursor(3, 0);
    other.insert("$this->v");
    assert!(!provider.apply_candidate(&mut other, &request, &request.candidates[0]));
    assert_eq!(other.cursor(), Position::new(3, 8));
}
