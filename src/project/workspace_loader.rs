use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::read_queue::{CompletedRead, ReadQueue};
use crate::base::FileId;
use crate::base::constants::PHP_EXT;
use crate::ide::{AnalysisHost, CompletionConfig};

/// Errors from enumerating or reading project files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Loads project files into an [`AnalysisHost`].
#[derive(Debug, Clone)]
pub struct WorkspaceLoader {
    extensions: Vec<String>,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self {
            extensions: vec![PHP_EXT.to_string()],
        }
    }

    /// Loader picking up the extensions configured for `host`.
    pub fn for_host(host: &AnalysisHost) -> Self {
        Self::for_config(host.config())
    }

    pub fn for_config(config: &CompletionConfig) -> Self {
        Self {
            extensions: config.file_extensions.clone(),
        }
    }

    /// Check whether `path` has one of the loader's extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Source files under `dir`, recursively, sorted by path.
    pub fn collect_file_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::NotADirectory(dir.to_path_buf()));
        }
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.accepts(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    /// Read every source file under `path` into `host`. Unreadable files are
    /// skipped with a warning. Returns the number of files loaded.
    pub fn load_directory_into_host<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let paths = self.collect_file_paths(path.as_ref())?;
        let mut loaded = 0;
        for path in paths {
            match self.load_file_into_host(&path, host) {
                Ok(_) => loaded += 1,
                Err(error) => warn!(%error, "skipping unreadable file"),
            }
        }
        debug!(loaded, "loaded directory");
        Ok(loaded)
    }

    /// Read a single file into `host`.
    pub fn load_file_into_host<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<FileId, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(host.set_file_content(path, &text))
    }

    /// Register every source file under `path` and read them on the rayon
    /// pool. Results land in the returned queue; apply them with
    /// [`AnalysisHost::apply_completed_reads`].
    pub fn spawn_directory_reads<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<ReadQueue, LoadError> {
        let paths = self.collect_file_paths(path.as_ref())?;
        let queue = ReadQueue::new();
        queue.begin(paths.len());
        debug!(count = paths.len(), "spawning file reads");

        for path in paths {
            host.register_file(path.as_path());
            let queue = queue.clone();
            rayon::spawn(move || {
                let read = match std::fs::read_to_string(&path) {
                    Ok(text) => Some(CompletedRead { path, text }),
                    Err(error) => {
                        warn!(path = %path.display(), %error, "failed to read file");
                        None
                    }
                };
                queue.finish(read);
            });
        }
        Ok(queue)
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}
