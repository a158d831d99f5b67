// src/services/intake_sources.rs
//
// Intake Source Adapters
//
// CRITICAL RULES:
// - Adapters turn platform events into CandidateFiles and nothing more
// - Extension filtering happens here, before anything reaches the core
// - Adapters keep no state; duplicate suppression belongs to IntakeService
// - A hand-picked path is NOT assumed small: it goes through the loader

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{has_recognized_extension, CandidateFile, IntakeOrigin};
use crate::error::AppResult;
use crate::integrations::{
    FilePicker, IntakeSourceKind, RuntimeCapabilities, StartupFileSource,
};
use crate::services::intake_service::{IntakeOutcome, IntakeService};

// ============================================================================
// DRAG & DROP / WEB-VIEW PICKER
// ============================================================================

/// Window drops and web-view file inputs. Always yields `Handle`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragDropAdapter;

impl DragDropAdapter {
    /// First recognized file among dropped paths.
    pub fn candidate_from_paths<I>(&self, paths: I) -> Option<CandidateFile>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let found = paths.into_iter().find(|p| has_recognized_extension(p));
        if found.is_none() {
            log::info!("Drop contained no HDF5 file");
        }
        found.map(CandidateFile::from_dropped_file)
    }

    /// A named buffer uploaded by the web view.
    pub fn candidate_from_upload(&self, name: &str, bytes: Vec<u8>) -> Option<CandidateFile> {
        if has_recognized_extension(name) {
            Some(CandidateFile::from_buffer(name, bytes))
        } else {
            log::info!("Ignoring upload {:?}: not an HDF5 file", name);
            None
        }
    }

    pub async fn drop_paths<I>(&self, intake: &IntakeService, paths: I) -> AppResult<IntakeOutcome>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        match self.candidate_from_paths(paths) {
            Some(candidate) => intake.admit(candidate, IntakeOrigin::DragDrop).await,
            None => Ok(IntakeOutcome::Ignored),
        }
    }

    pub async fn upload(
        &self,
        intake: &IntakeService,
        name: &str,
        bytes: Vec<u8>,
    ) -> AppResult<IntakeOutcome> {
        match self.candidate_from_upload(name, bytes) {
            Some(candidate) => intake.admit(candidate, IntakeOrigin::DragDrop).await,
            None => Ok(IntakeOutcome::Ignored),
        }
    }
}

// ============================================================================
// NATIVE DIALOG
// ============================================================================

/// Platform file-selection dialog, opened on explicit user request.
pub struct NativeDialogAdapter {
    picker: Arc<dyn FilePicker>,
}

impl NativeDialogAdapter {
    pub fn new(picker: Arc<dyn FilePicker>) -> Self {
        Self { picker }
    }

    /// Open the picker at the pending file (if any) and admit the choice.
    pub async fn pick(&self, intake: &IntakeService) -> AppResult<IntakeOutcome> {
        let hint = intake.pending_path();
        let Some(path) = self.picker.open_native_file_picker(hint.as_deref()).await? else {
            log::debug!("File picker cancelled");
            return Ok(IntakeOutcome::Cancelled);
        };

        if !has_recognized_extension(&path) {
            log::info!("Ignoring picked file {:?}: not an HDF5 file", path);
            return Ok(IntakeOutcome::Ignored);
        }

        intake
            .admit(CandidateFile::from_path(path), IntakeOrigin::NativeDialog)
            .await
    }
}

// ============================================================================
// STARTUP FILE ASSOCIATION
// ============================================================================

/// The file the OS asked us to open at launch.
pub struct StartupAdapter {
    source: Arc<dyn StartupFileSource>,
}

impl StartupAdapter {
    pub fn new(source: Arc<dyn StartupFileSource>) -> Self {
        Self { source }
    }

    /// Query the launch file once and admit it.
    ///
    /// Safe to call from several places at startup: only the first call gets
    /// past the intake service's startup marker.
    pub async fn probe(&self, intake: &IntakeService) -> AppResult<IntakeOutcome> {
        let Some(probe) = intake.begin_startup_probe() else {
            return Ok(IntakeOutcome::Dropped);
        };

        let Some(file) = self.source.get_startup_file().await? else {
            log::debug!("No launch file to open");
            return Ok(IntakeOutcome::Ignored);
        };

        if !has_recognized_extension(&file.path) {
            log::info!("Ignoring launch file {:?}: not an HDF5 file", file.path);
            intake.abandon_startup(probe, file).await;
            return Ok(IntakeOutcome::Ignored);
        }

        intake.admit_startup(probe, file).await
    }
}

// ============================================================================
// RUNTIME SELECTION
// ============================================================================

/// The adapters active in the current runtime.
pub struct IntakeSources {
    pub drag_drop: DragDropAdapter,
    pub native_dialog: Option<NativeDialogAdapter>,
    pub startup: Option<StartupAdapter>,
}

impl IntakeSources {
    pub fn for_runtime(
        capabilities: RuntimeCapabilities,
        picker: Option<Arc<dyn FilePicker>>,
        startup: Option<Arc<dyn StartupFileSource>>,
    ) -> Self {
        Self {
            drag_drop: DragDropAdapter,
            native_dialog: picker
                .filter(|_| capabilities.supports(IntakeSourceKind::NativeDialog))
                .map(NativeDialogAdapter::new),
            startup: startup
                .filter(|_| capabilities.supports(IntakeSourceKind::Startup))
                .map(StartupAdapter::new),
        }
    }

    pub fn active(&self) -> Vec<IntakeSourceKind> {
        let mut kinds = vec![IntakeSourceKind::DragDrop];
        if self.native_dialog.is_some() {
            kinds.push(IntakeSourceKind::NativeDialog);
        }
        if self.startup.is_some() {
            kinds.push(IntakeSourceKind::Startup);
        }
        kinds
    }

    pub async fn pick(&self, intake: &IntakeService) -> AppResult<IntakeOutcome> {
        match &self.native_dialog {
            Some(adapter) => adapter.pick(intake).await,
            None => Ok(IntakeOutcome::Unavailable),
        }
    }

    pub async fn probe_startup(&self, intake: &IntakeService) -> AppResult<IntakeOutcome> {
        match &self.startup {
            Some(adapter) => adapter.probe(intake).await,
            None => Ok(IntakeOutcome::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_takes_first_recognized_path() {
        let candidate = DragDropAdapter
            .candidate_from_paths(vec![
                PathBuf::from("/data/notes.csv"),
                PathBuf::from("/data/run.NXS"),
                PathBuf::from("/data/other.h5"),
            ])
            .unwrap();

        match candidate {
            CandidateFile::Handle { name, .. } => assert_eq!(name, "run.NXS"),
            other => panic!("Drops must yield handles, got {:?}", other),
        }
    }

    #[test]
    fn test_drop_of_unrecognized_files_yields_nothing() {
        assert!(DragDropAdapter
            .candidate_from_paths(vec![PathBuf::from("/data/data.csv")])
            .is_none());
        assert!(DragDropAdapter.candidate_from_paths(Vec::new()).is_none());
    }

    #[test]
    fn test_upload_filters_by_name() {
        assert!(DragDropAdapter
            .candidate_from_upload("data.csv", vec![1, 2])
            .is_none());
        assert!(matches!(
            DragDropAdapter.candidate_from_upload("data.NXS", vec![1, 2]),
            Some(CandidateFile::Handle { .. })
        ));
    }
}
