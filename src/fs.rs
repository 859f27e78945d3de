use std::io;
use std::path::{Path, PathBuf};

/// Filesystem queries needed to resolve Java source paths.
///
/// Errors are returned as-is; callers do not retry.
pub trait SourceTree: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Directory that relative paths are anchored at.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl SourceTree for LocalFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}
