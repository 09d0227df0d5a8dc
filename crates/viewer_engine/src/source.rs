use std::path::{Path, PathBuf};

use crate::LoadError;

/// A snapshot bundle: a set of files addressed by their path relative to
/// the bundle root.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// All files in the bundle, sorted by relative path.
    async fn list(&self) -> Result<Vec<PathBuf>, LoadError>;

    async fn read(&self, relative: &Path) -> Result<Vec<u8>, LoadError>;

    /// Absolute location of a bundle file, used to build image handles.
    fn resolve(&self, relative: &Path) -> PathBuf;
}

/// First file whose relative path ends with `name`, compared component-wise
/// so `topic.json` does not match `old_topic.json`.
pub(crate) fn find_file<'a>(files: &'a [PathBuf], name: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|path| path.ends_with(name))
        .map(PathBuf::as_path)
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Canonicalizes `root` so image handles are absolute.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        let root = root.as_ref();
        let canonical = tokio::fs::canonicalize(root)
            .await
            .map_err(|err| LoadError::io(root, err))?;
        Ok(Self::new(canonical))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for DirectorySource {
    async fn list(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|err| LoadError::io(&dir, err))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|err| LoadError::io(&dir, err))?
            {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|err| LoadError::io(&path, err))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Ok(relative) = path.strip_prefix(&self.root) {
                    files.push(relative.to_path_buf());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read(&self, relative: &Path) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(relative);
        tokio::fs::read(&path)
            .await
            .map_err(|err| LoadError::io(path, err))
    }

    fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}
