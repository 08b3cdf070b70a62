//! Analysis host helpers for setting up indexes and requesting completions.

use thizer::base::{FileId, Position};
use thizer::ide::{AnalysisHost, CompletionCandidate, CompletionContext};

/// Creates an AnalysisHost with the given `(path, source)` files.
pub fn host_with_files(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, source) in files {
        host.set_file_content(*path, source);
    }
    host
}

/// Classify `line_text` with the cursor at its end on `line`.
pub fn context_at(host: &mut AnalysisHost, line: usize, line_text: &str) -> CompletionContext {
    let cursor = Position::new(line, line_text.chars().count());
    host.analysis().completion_context(line_text, cursor)
}

/// Complete `line_text` with the cursor at its end on `line` of `path`.
pub fn complete_at(
    host: &mut AnalysisHost,
    path: &str,
    line: usize,
    line_text: &str,
) -> Vec<CompletionCandidate> {
    let file = file_id(host, path);
    let context = context_at(host, line, line_text);
    host.analysis().completions(file, &context)
}

pub fn file_id(host: &AnalysisHost, path: &str) -> FileId {
    host.get_file_id(std::path::Path::new(path))
        .unwrap_or_else(|| panic!("file '{path}' not loaded"))
}

/// Insertable texts, in order.
pub fn insert_texts(items: &[CompletionCandidate]) -> Vec<&str> {
    items.iter().map(|c| c.insert_text.as_ref()).collect()
}
