//! On-disk file store backing the file routes.
//!
//! A thin capability over one configured directory: read a named file or
//! write one. Names are single path segments taken from the request
//! target; concurrent writes to the same name are last-write-wins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

/// File storage rooted at the configured directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the named file. A missing file is `Ok(None)`; any other IO
    /// failure is an error.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(name);

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    /// Writes the named file, creating the storage root on demand.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root).await.with_context(|| {
            format!("Failed to create storage directory {}", self.root.display())
        })?;

        let path = self.root.join(name);
        fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
