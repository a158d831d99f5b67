// src/integrations/mod.rs
//
// Platform Integrations Module
//
// Concrete implementations of the collaborator contracts the intake
// core consumes. The dialog needs the Tauri runtime and only exists in
// desktop builds.

pub mod local_fs;
pub mod platform;
pub mod startup;

#[cfg(feature = "desktop")]
pub mod dialog;

pub use local_fs::LocalFileSystem;
pub use platform::{
    FilePicker, FileSystemPort, IntakeSourceKind, RuntimeCapabilities, StartupFile,
    StartupFileSource,
};
pub use startup::{capture_launch_argument, MarkerStartupSource};

#[cfg(feature = "desktop")]
pub use dialog::TauriFilePicker;
