// src/infrastructure/temp_artifact.rs
//
// Launch Marker Management
//
// CRITICAL RULES:
// - The marker lives directly inside the temp root, never elsewhere
// - Marker names are bare file names (no separators, no parent refs)
// - Removal never touches anything outside the temp root
// - Reading the marker never deletes it; the intake core decides when

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default marker name used to hand a launch path to the running window.
pub const DEFAULT_MARKER_NAME: &str = "myhdf5_open_file.txt";

/// A transient marker file in the temp directory.
///
/// INVARIANTS:
/// - `path()` is always `root/name`
/// - `name` is a single path component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempArtifact {
    name: String,
    root: PathBuf,
}

impl TempArtifact {
    /// Marker in the OS temp directory.
    pub fn new(name: &str) -> AppResult<Self> {
        Self::in_dir(std::env::temp_dir(), name)
    }

    /// Marker in an explicit root (tests, portable installs).
    pub fn in_dir(root: impl Into<PathBuf>, name: &str) -> AppResult<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            root: root.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Record the path the application was asked to open.
    pub fn write(&self, target: &Path) -> AppResult<()> {
        fs::write(self.path(), target.to_string_lossy().as_bytes()).map_err(AppError::Io)
    }

    /// Path recorded in the marker, if the marker exists and is non-empty.
    pub async fn read(&self) -> AppResult<Option<PathBuf>> {
        match tokio::fs::read_to_string(self.path()).await {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(PathBuf::from(trimmed)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Remove the marker. A missing marker is not an error.
    pub async fn remove(&self) -> AppResult<()> {
        let path = self.path();
        if !path.starts_with(&self.root) {
            return Err(AppError::Other(
                "Marker is not in expected temp location".to_string(),
            ));
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if name.is_empty() || !single_normal || name.contains('/') || name.contains('\\') {
        return Err(AppError::Other(format!(
            "Invalid temp artifact name: {:?}",
            name
        )));
    }
    Ok(())
}
