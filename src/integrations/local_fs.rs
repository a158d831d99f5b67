// src/integrations/local_fs.rs
//
// Local filesystem implementation of the platform file contract.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::infrastructure::TempArtifact;
use crate::integrations::platform::FileSystemPort;

/// `FileSystemPort` over `tokio::fs`.
///
/// Temp markers are resolved inside `temp_root`; a marker name can never
/// address a file outside it.
pub struct LocalFileSystem {
    temp_root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
        }
    }

    /// Markers in the OS temp directory.
    pub fn with_system_temp() -> Self {
        Self::new(std::env::temp_dir())
    }
}

#[async_trait]
impl FileSystemPort for LocalFileSystem {
    async fn stat_size(&self, path: &Path) -> AppResult<u64> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(AppError::Other(format!("Not a regular file: {:?}", path)));
        }
        Ok(metadata.len())
    }

    async fn read_all_bytes(&self, path: &Path) -> AppResult<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn delete_temp_artifact(&self, name: &str) -> AppResult<()> {
        TempArtifact::in_dir(&self.temp_root, name)?.remove().await
    }
}
