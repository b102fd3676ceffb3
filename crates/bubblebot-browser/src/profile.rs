use crate::Result;
use std::path::Path;
use tempfile::TempDir;

/// Throwaway Chrome user-data directory, removed when dropped
pub struct TempProfile {
    dir: TempDir,
}

impl TempProfile {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("bubblebot-chrome-")
            .tempdir()?;
        tracing::debug!("Created Chrome profile at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
