//! Host-facing completion provider.
//!
//! A host calls [`CompletionProvider::has_candidates`] on every keystroke,
//! shows the list from [`CompletionProvider::get_candidates`], and calls
//! [`CompletionProvider::apply_candidate`] when the user picks one. Each
//! request is an immutable value; only the most recent one is served.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::analysis::AnalysisHost;
use super::completion::CompletionCandidate;
use super::context::CompletionContext;
use super::editor::EditorState;
use super::insert::InsertionPlan;
use crate::base::FileId;

/// Identifies one `has_candidates` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A resolved completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub id: RequestId,
    pub path: PathBuf,
    pub file: FileId,
    /// Character that triggered the request, if typed.
    pub trigger: Option<char>,
    pub context: CompletionContext,
    pub candidates: Vec<CompletionCandidate>,
}

/// What the host displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateList {
    pub candidates: Vec<CompletionCandidate>,
    /// Text the host should highlight in each candidate; never set.
    pub match_hint: Option<String>,
    /// Select the first candidate initially.
    pub preselect: bool,
    /// Candidates may be wider than the popup.
    pub allow_wide_results: bool,
}

/// Completion provider bound to one analysis host.
#[derive(Debug, Default)]
pub struct CompletionProvider {
    host: AnalysisHost,
    next_id: u64,
    latest: Option<RequestId>,
}

impl CompletionProvider {
    pub fn new(host: AnalysisHost) -> Self {
        Self {
            host,
            next_id: 0,
            latest: None,
        }
    }

    pub fn host(&self) -> &AnalysisHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut AnalysisHost {
        &mut self.host
    }

    /// Sync the editor buffer into the index, classify the cursor context and
    /// resolve candidates. `None` when there is nothing to offer.
    ///
    /// Every call supersedes the previous request, including calls that
    /// return `None`.
    pub fn has_candidates(
        &mut self,
        editor: &dyn EditorState,
        trigger: Option<char>,
    ) -> Option<CompletionRequest> {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.latest = Some(id);

        if !editor.is_editable() {
            trace!("editor is read-only");
            return None;
        }

        let path = editor.path().to_path_buf();
        let text = editor.text();
        let file = if editor.is_dirty() {
            self.host.set_live_content(path.as_path(), &text)
        } else {
            // Unmodified buffer: it is the disk content
            let file = self.host.set_file_content(path.as_path(), &text);
            self.host.clear_live_content(&path);
            file
        };

        let cursor = editor.cursor();
        let line_text = editor.line_text(cursor.line)?;
        let analysis = self.host.analysis();
        let context = analysis.completion_context(line_text, cursor);
        if context.is_unclassified() {
            return None;
        }
        let candidates = analysis.completions(file, &context);
        trace!(
            request = id.raw(),
            mode = context.mode.as_str(),
            count = candidates.len(),
            "completion request"
        );
        if candidates.is_empty() {
            return None;
        }

        Some(CompletionRequest {
            id,
            path,
            file,
            trigger,
            context,
            candidates,
        })
    }

    /// Candidate list for `request`; `None` if a newer request superseded it.
    pub fn get_candidates(&self, request: &CompletionRequest) -> Option<CandidateList> {
        if self.latest != Some(request.id) {
            debug!(request = request.id.raw(), "discarding stale completion request");
            return None;
        }
        Some(CandidateList {
            candidates: request.candidates.clone(),
            match_hint: None,
            preselect: true,
            allow_wide_results: true,
        })
    }

    /// Replace the matched prefix with `candidate`. Returns `false` when the
    /// editor no longer matches the request (other file, moved cursor) or is
    /// read-only.
    pub fn apply_candidate(
        &self,
        editor: &mut dyn EditorState,
        request: &CompletionRequest,
        candidate: &CompletionCandidate,
    ) -> bool {
        if editor.path() != request.path || editor.cursor() != request.context.cursor {
            debug!(request = request.id.raw(), "editor moved since the request");
            return false;
        }
        let Some(line_text) = editor.line_text(request.context.cursor.line) else {
            return false;
        };
        let plan = InsertionPlan::new(&request.context, line_text, candidate);
        plan.apply(editor)
    }
}
