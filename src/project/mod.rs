//! Project loading: enumerating source files and feeding them to the index.
//!
//! Reads may run synchronously ([`WorkspaceLoader::load_directory_into_host`])
//! or on the rayon pool ([`WorkspaceLoader::spawn_directory_reads`]). In the
//! second case the index is eventually consistent: a file whose read has not
//! completed is registered but contributes nothing.

mod read_queue;
mod workspace_loader;

pub use read_queue::{CompletedRead, ReadQueue};
pub use workspace_loader::{LoadError, WorkspaceLoader};
