// src/integrations/platform.rs
//
// Platform Collaborator Contracts
//
// CRITICAL RULES:
// - The intake core only talks to the platform through these traits
// - Every call that touches the disk or the user is async
// - Implementations never mutate intake state

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// Filesystem operations the intake core needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSystemPort: Send + Sync {
    /// Byte length of a regular file. Any failure means "unavailable".
    async fn stat_size(&self, path: &Path) -> AppResult<u64>;

    /// Full read into memory. Only called for files measured within the
    /// size threshold.
    async fn read_all_bytes(&self, path: &Path) -> AppResult<Vec<u8>>;

    /// Best-effort removal of a temp marker by name.
    async fn delete_temp_artifact(&self, name: &str) -> AppResult<()>;
}

/// Platform file-selection dialog.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Returns the chosen path, or `None` if the user cancelled.
    async fn open_native_file_picker(&self, hint: Option<&Path>) -> AppResult<Option<PathBuf>>;
}

/// A path the OS asked the application to open at launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFile {
    pub path: PathBuf,
    /// Name of the temp marker that carried the path, if any.
    pub artifact: Option<String>,
}

/// OS file-association hand-over.
#[async_trait]
pub trait StartupFileSource: Send + Sync {
    async fn get_startup_file(&self) -> AppResult<Option<StartupFile>>;
}

/// Intake sources a runtime can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeSourceKind {
    DragDrop,
    NativeDialog,
    Startup,
}

/// What the hosting runtime supports.
///
/// Outside the desktop shell (plain web view, headless host) only drag-drop
/// uploads exist; there is no launch hand-over and no temp marker to clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeCapabilities {
    desktop: bool,
}

impl RuntimeCapabilities {
    pub const fn desktop() -> Self {
        Self { desktop: true }
    }

    pub const fn browser() -> Self {
        Self { desktop: false }
    }

    pub fn is_desktop_runtime(&self) -> bool {
        self.desktop
    }

    pub fn active_sources(&self) -> Vec<IntakeSourceKind> {
        if self.desktop {
            vec![
                IntakeSourceKind::DragDrop,
                IntakeSourceKind::NativeDialog,
                IntakeSourceKind::Startup,
            ]
        } else {
            vec![IntakeSourceKind::DragDrop]
        }
    }

    pub fn supports(&self, kind: IntakeSourceKind) -> bool {
        self.active_sources().contains(&kind)
    }

    /// Whether temp markers exist and must be cleaned up.
    pub fn manages_temp_artifacts(&self) -> bool {
        self.desktop
    }
}
