// src/integrations/dialog.rs
//
// Native file picker over tauri-plugin-dialog.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

use crate::domain::RECOGNIZED_EXTENSIONS;
use crate::error::{AppError, AppResult};
use crate::integrations::platform::FilePicker;

const FILTER_NAME: &str = "HDF5 / NeXus";

pub struct TauriFilePicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriFilePicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> FilePicker for TauriFilePicker<R> {
    async fn open_native_file_picker(&self, hint: Option<&Path>) -> AppResult<Option<PathBuf>> {
        let (tx, rx) = oneshot::channel();

        let mut builder = self
            .app
            .dialog()
            .file()
            .set_title("Open HDF5 file")
            .add_filter(FILTER_NAME, &RECOGNIZED_EXTENSIONS);

        if let Some(hint) = hint {
            if let Some(dir) = hint.parent().filter(|dir| dir.is_dir()) {
                builder = builder.set_directory(dir);
            }
            if let Some(name) = hint.file_name() {
                builder = builder.set_file_name(name.to_string_lossy());
            }
        }

        builder.pick_file(move |picked| {
            let _ = tx.send(picked);
        });

        let picked = rx
            .await
            .map_err(|_| AppError::Platform("File dialog closed without a response".to_string()))?;

        match picked {
            Some(file_path) => file_path
                .into_path()
                .map(Some)
                .map_err(|e| AppError::Platform(format!("Unsupported dialog selection: {}", e))),
            None => Ok(None),
        }
    }
}
