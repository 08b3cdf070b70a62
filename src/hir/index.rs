//! Source index: the files known to the engine and their parsed trees.
//!
//! Files are registered without being parsed. A file's tree is derived on
//! demand from its current text (the live editor buffer when present,
//! otherwise the last disk snapshot) and cached until that text changes.
//!
//! Parse failures never escape: the previous successful tree stays in use
//! (stale-but-usable) and the error is kept on the file for inspection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::symbols::{ClassSymbol, extract_classes};
use crate::base::FileId;
use crate::parser::{ParseError, ParseOptions, parse};
use crate::syntax::ParsedUnit;

// ============================================================================
// SOURCE FILE
// ============================================================================

#[derive(Debug, Clone)]
pub struct SourceFile {
    id: FileId,
    path: PathBuf,
    disk_text: Option<Arc<str>>,
    live_text: Option<Arc<str>>,
    /// Bumped whenever the effective text changes.
    version: u64,
    /// Version the cached tree (or error) was derived from.
    parsed_version: Option<u64>,
    parsed: Option<Arc<ParsedUnit>>,
    classes: Vec<Arc<ClassSymbol>>,
    last_error: Option<ParseError>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf) -> Self {
        Self {
            id,
            path,
            disk_text: None,
            live_text: None,
            version: 0,
            parsed_version: None,
            parsed: None,
            classes: Vec::new(),
            last_error: None,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used for name-fragment lookups.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Effective text: the live buffer takes precedence over the disk snapshot.
    pub fn text(&self) -> Option<&Arc<str>> {
        self.live_text.as_ref().or(self.disk_text.as_ref())
    }

    pub fn has_live_text(&self) -> bool {
        self.live_text.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Last successfully parsed tree, possibly older than the current text.
    pub fn parsed(&self) -> Option<&Arc<ParsedUnit>> {
        self.parsed.as_ref()
    }

    /// Error from the most recent parse attempt, if it failed.
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    pub fn classes(&self) -> &[Arc<ClassSymbol>] {
        &self.classes
    }

    /// True when there is text that has not been parsed yet.
    pub fn is_stale(&self) -> bool {
        self.text().is_some() && self.parsed_version != Some(self.version)
    }

    fn store_parse(&mut self, version: u64, result: Result<ParsedUnit, ParseError>) {
        match result {
            Ok(unit) => {
                self.classes = extract_classes(self.id, &unit)
                    .into_iter()
                    .map(Arc::new)
                    .collect();
                self.parsed = Some(Arc::new(unit));
                self.last_error = None;
            }
            Err(error) => {
                debug!(
                    path = %self.path.display(),
                    %error,
                    has_previous = self.parsed.is_some(),
                    "parse failed, keeping previous tree"
                );
                self.last_error = Some(error);
            }
        }
        self.parsed_version = Some(version);
    }
}

// ============================================================================
// CLASS TABLE
// ============================================================================

/// Namespace-qualified table of every class-like in the index.
///
/// Keys are lower-cased fully-qualified names. When two files declare the
/// same name the first registered file wins the qualified slot; both remain
/// reachable through the short-name index.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    by_fqn: IndexMap<String, Arc<ClassSymbol>>,
    /// Lower-cased short name → classes.
    by_short_name: FxHashMap<String, Vec<Arc<ClassSymbol>>>,
    by_file: FxHashMap<FileId, Vec<Arc<ClassSymbol>>>,
}

impl ClassTable {
    fn insert(&mut self, class: Arc<ClassSymbol>) {
        self.by_fqn.entry(class.key()).or_insert_with(|| class.clone());
        self.by_short_name
            .entry(class.name.to_lowercase())
            .or_default()
            .push(class.clone());
        self.by_file.entry(class.file).or_default().push(class);
    }

    /// Look up a class by fully-qualified name (case-insensitive, leading `\` allowed).
    pub fn get(&self, fqn: &str) -> Option<&Arc<ClassSymbol>> {
        self.by_fqn
            .get(&fqn.trim_start_matches('\\').to_lowercase())
    }

    pub fn by_short_name(&self, name: &str) -> &[Arc<ClassSymbol>] {
        self.by_short_name
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn in_file(&self, file: FileId) -> &[Arc<ClassSymbol>] {
        self.by_file
            .get(&file)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClassSymbol>> {
        self.by_fqn.values()
    }

    pub fn len(&self) -> usize {
        self.by_fqn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fqn.is_empty()
    }
}

// ============================================================================
// SOURCE INDEX
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    /// Indexed by `FileId`; removed files leave a hole so ids stay stable.
    files: Vec<Option<SourceFile>>,
    by_path: FxHashMap<PathBuf, FileId>,
    classes: ClassTable,
    classes_dirty: bool,
    options: ParseOptions,
}

impl SourceIndex {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Add a file without reading or parsing it. Registering a known path
    /// returns its existing id.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();
        if let Some(&id) = self.by_path.get(&path) {
            return id;
        }
        let id = FileId::new(self.files.len() as u32);
        self.files.push(Some(SourceFile::new(id, path.clone())));
        self.by_path.insert(path, id);
        id
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index()).and_then(Option::as_ref)
    }

    fn file_mut(&mut self, id: FileId) -> Option<&mut SourceFile> {
        self.files.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Record text read from disk.
    pub fn set_disk_text(&mut self, id: FileId, text: impl Into<Arc<str>>) {
        let text = text.into();
        if let Some(file) = self.file_mut(id) {
            if file.disk_text.as_deref() == Some(&*text) {
                return;
            }
            file.disk_text = Some(text);
            if file.live_text.is_none() {
                file.version += 1;
            }
        }
    }

    /// Record the editor's in-memory buffer; it overrides the disk snapshot.
    pub fn set_live_text(&mut self, id: FileId, text: impl Into<Arc<str>>) {
        let text = text.into();
        if let Some(file) = self.file_mut(id) {
            if file.text().map(|t| &**t) == Some(&*text) && file.live_text.is_some() {
                return;
            }
            file.live_text = Some(text);
            file.version += 1;
        }
    }

    /// Drop the live buffer and fall back to the disk snapshot.
    pub fn clear_live_text(&mut self, id: FileId) {
        if let Some(file) = self.file_mut(id) {
            if file.live_text.take().is_some() {
                file.version += 1;
            }
        }
    }

    pub fn remove(&mut self, path: &Path) -> Option<FileId> {
        let id = self.by_path.remove(path)?;
        if let Some(slot) = self.files.get_mut(id.index()) {
            *slot = None;
        }
        self.classes_dirty = true;
        Some(id)
    }

    /// Tree for `id`, parsing first if its text changed since the last parse.
    ///
    /// Returns the previous successful tree when the current text fails to
    /// parse, and `None` if no parse of this file ever succeeded.
    pub fn get_parsed(&mut self, id: FileId) -> Option<Arc<ParsedUnit>> {
        let options = self.options;
        let file = self.file_mut(id)?;
        if file.is_stale() {
            let version = file.version;
            let result = file
                .text()
                .map(|text| parse(text, &options))?;
            file.store_parse(version, result);
            self.classes_dirty = true;
        }
        self.file(id).and_then(|file| file.parsed.clone())
    }

    /// Cached tree without triggering a parse.
    pub fn parsed(&self, id: FileId) -> Option<&Arc<ParsedUnit>> {
        self.file(id).and_then(SourceFile::parsed)
    }

    /// Files whose name contains `fragment`.
    pub fn find_by_name_fragment(&self, fragment: &str) -> Vec<FileId> {
        self.files()
            .filter(|file| file.name().contains(fragment))
            .map(SourceFile::id)
            .collect()
    }

    /// Parse every stale file and rebuild the class table if anything changed.
    pub fn refresh(&mut self) {
        let options = self.options;
        let stale: Vec<(FileId, u64, Arc<str>)> = self
            .files()
            .filter(|file| file.is_stale())
            .filter_map(|file| Some((file.id, file.version, file.text()?.clone())))
            .collect();

        if !stale.is_empty() {
            debug!(count = stale.len(), "parsing stale files");
            let results: Vec<_> = stale
                .into_par_iter()
                .map(|(id, version, text)| (id, version, parse(&text, &options)))
                .collect();
            for (id, version, result) in results {
                if let Some(file) = self.file_mut(id) {
                    file.store_parse(version, result);
                }
            }
            self.classes_dirty = true;
        }

        if self.classes_dirty {
            self.rebuild_class_table();
        }
    }

    fn rebuild_class_table(&mut self) {
        let mut table = ClassTable::default();
        for file in self.files.iter().flatten() {
            for class in &file.classes {
                table.insert(class.clone());
            }
        }
        debug!(classes = table.len(), "rebuilt class table");
        self.classes = table;
        self.classes_dirty = false;
    }

    /// Class table as of the last [`refresh`](Self::refresh).
    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }
}
