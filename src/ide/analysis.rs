//! AnalysisHost and Analysis: state management for completion queries.
//!
//! The `AnalysisHost` owns the source index and the configuration and hands
//! out `Analysis` snapshots for querying. Taking a snapshot first parses
//! whatever changed, so every query on one snapshot sees the same trees.
//!
//! ## Usage
//!
//! ```
//! use thizer::base::Position;
//! use thizer::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("/src/a.php", "<?php\n$count = 1;\n\n");
//!
//! let analysis = host.analysis();
//! let context = analysis.completion_context("$co", Position::new(2, 3));
//! let items = analysis.completions(file, &context);
//! assert_eq!(items[0].insert_text.as_ref(), "$count");
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::completion::{CompletionCandidate, completions};
use super::config::CompletionConfig;
use super::context::{CompletionContext, classify};
use super::text_utils::text_before_column;
use crate::base::{FileId, Position};
use crate::hir::{
    ClassSymbol, ResolvedMember, ScopeFrame, ScopeWalker, SourceIndex, enclosing_class,
    resolve_members,
};
use crate::parser::ParseError;
use crate::project::ReadQueue;

/// Owns all mutable state for the completion engine.
///
/// Apply changes via `set_file_content()`, `set_live_content()` and
/// `remove_file()`, then get a consistent snapshot via `analysis()`.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    index: SourceIndex,
    config: CompletionConfig,
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompletionConfig) -> Self {
        Self {
            index: SourceIndex::new(config.parse),
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Register a file without any text. Its members stay absent until a
    /// read completes.
    pub fn register_file(&mut self, path: impl Into<PathBuf>) -> FileId {
        self.index.register(path)
    }

    /// Set the on-disk content of a file, registering it if needed.
    pub fn set_file_content(&mut self, path: impl Into<PathBuf>, content: &str) -> FileId {
        let id = self.index.register(path);
        self.index.set_disk_text(id, content);
        id
    }

    /// Set the unsaved editor buffer of a file; it wins over the disk content.
    pub fn set_live_content(&mut self, path: impl Into<PathBuf>, content: &str) -> FileId {
        let id = self.index.register(path);
        self.index.set_live_text(id, content);
        id
    }

    /// Drop the editor buffer of a file, falling back to its disk content.
    pub fn clear_live_content(&mut self, path: &Path) {
        if let Some(id) = self.index.file_id(path) {
            self.index.clear_live_text(id);
        }
    }

    /// Remove a file. Returns `false` if it was not known.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        self.index.remove(path).is_some()
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.index.file_id(path).is_some()
    }

    /// Get the FileId for a path, if it exists.
    pub fn get_file_id(&self, path: &Path) -> Option<FileId> {
        self.index.file_id(path)
    }

    /// Get the number of files known.
    pub fn file_count(&self) -> usize {
        self.index.len()
    }

    /// Store every read that finished since the last call. Returns the
    /// number of files updated.
    pub fn apply_completed_reads(&mut self, queue: &ReadQueue) -> usize {
        let reads = queue.drain();
        let count = reads.len();
        for read in reads {
            self.set_file_content(read.path, &read.text);
        }
        if count > 0 {
            debug!(count, "applied completed reads");
        }
        count
    }

    /// Direct access to the source index.
    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    /// Get a consistent snapshot for querying, parsing changed files first.
    pub fn analysis(&mut self) -> Analysis<'_> {
        self.index.refresh();
        Analysis {
            index: &self.index,
            config: &self.config,
        }
    }
}

/// A read-only snapshot of the index.
pub struct Analysis<'a> {
    index: &'a SourceIndex,
    config: &'a CompletionConfig,
}

impl<'a> Analysis<'a> {
    pub fn index(&self) -> &'a SourceIndex {
        self.index
    }

    pub fn config(&self) -> &'a CompletionConfig {
        self.config
    }

    /// Classify the cursor context given the full text of the cursor line.
    pub fn completion_context(&self, line_text: &str, cursor: Position) -> CompletionContext {
        classify(text_before_column(line_text, cursor.column), cursor)
    }

    /// Candidates for a classified context in `file`.
    pub fn completions(&self, file: FileId, context: &CompletionContext) -> Vec<CompletionCandidate> {
        completions(self.index, self.config, file, context)
    }

    /// Bindings visible at `cursor`, predefined variables included.
    pub fn scope_at(&self, file: FileId, cursor: Position) -> Option<ScopeFrame> {
        let unit = self.index.parsed(file)?;
        Some(ScopeWalker::new(&self.config.predefined_variables).walk(unit, cursor))
    }

    /// Symbol of the class-like whose body encloses `line`.
    pub fn enclosing_class(&self, file: FileId, line: usize) -> Option<Arc<ClassSymbol>> {
        let unit = self.index.parsed(file)?;
        let (_, class) = enclosing_class(unit, line)?;
        self.index
            .file(file)?
            .classes()
            .iter()
            .find(|symbol| symbol.span == class.span && symbol.name == class.name)
            .cloned()
    }

    /// Own and inherited members of a class by qualified name.
    pub fn members_of(&self, fqn: &str) -> Vec<ResolvedMember> {
        self.index
            .classes()
            .get(fqn)
            .map(|class| resolve_members(self.index, class))
            .unwrap_or_default()
    }

    /// Error of the most recent parse of `file`, if it failed.
    pub fn parse_error(&self, file: FileId) -> Option<&'a ParseError> {
        self.index.file(file)?.last_error()
    }
}
