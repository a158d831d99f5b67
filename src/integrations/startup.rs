// src/integrations/startup.rs
//
// OS File-Association Hand-over
//
// A double-click in the file manager launches the executable with the file
// path as an argument. The path is written to a temp marker before the
// window exists, and the window picks it up once its intake is ready.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::has_recognized_extension;
use crate::error::AppResult;
use crate::infrastructure::TempArtifact;
use crate::integrations::platform::{StartupFile, StartupFileSource};

/// Record the first recognized file among the launch arguments.
///
/// The first argument is the executable and is skipped. Returns the
/// recorded path, or `None` when no argument names an HDF5/NeXus file.
pub fn capture_launch_argument<I>(args: I, marker: &TempArtifact) -> AppResult<Option<PathBuf>>
where
    I: IntoIterator<Item = String>,
{
    let found = args
        .into_iter()
        .skip(1)
        .find(|arg| has_recognized_extension(arg));

    match found {
        Some(arg) => {
            let path = PathBuf::from(arg);
            marker.write(&path)?;
            log::info!("Launch argument {:?} recorded in {:?}", path, marker.path());
            Ok(Some(path))
        }
        None => {
            log::debug!("No HDF5 file among launch arguments");
            Ok(None)
        }
    }
}

/// Startup source backed by the temp marker.
pub struct MarkerStartupSource {
    marker: TempArtifact,
}

impl MarkerStartupSource {
    pub fn new(marker: TempArtifact) -> Self {
        Self { marker }
    }
}

#[async_trait]
impl StartupFileSource for MarkerStartupSource {
    async fn get_startup_file(&self) -> AppResult<Option<StartupFile>> {
        match self.marker.read().await {
            Ok(Some(path)) => Ok(Some(StartupFile {
                path,
                artifact: Some(self.marker.name().to_string()),
            })),
            Ok(None) => {
                // A blank marker names nothing to consume; drop it now.
                if self.marker.exists() {
                    let _ = self.marker.remove().await;
                }
                Ok(None)
            }
            Err(e) => {
                log::warn!("Unreadable launch marker {:?}: {}", self.marker.path(), e);
                let _ = self.marker.remove().await;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::DEFAULT_MARKER_NAME;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_capture_skips_executable_and_unrelated_args() {
        let dir = tempdir().unwrap();
        let marker = TempArtifact::in_dir(dir.path(), DEFAULT_MARKER_NAME).unwrap();

        let captured = capture_launch_argument(
            args(&["/opt/myhdf5/myhdf5.h5", "--verbose", "notes.txt", "/data/Run.NXS", "/data/b.h5"]),
            &marker,
        )
        .unwrap();

        assert_eq!(captured, Some(PathBuf::from("/data/Run.NXS")));
        assert_eq!(std::fs::read_to_string(marker.path()).unwrap(), "/data/Run.NXS");
    }

    #[test]
    fn test_capture_without_match_leaves_no_marker() {
        let dir = tempdir().unwrap();
        let marker = TempArtifact::in_dir(dir.path(), DEFAULT_MARKER_NAME).unwrap();

        let captured = capture_launch_argument(args(&["myhdf5", "data.csv"]), &marker).unwrap();

        assert_eq!(captured, None);
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_source_reports_marker_without_deleting_it() {
        let dir = tempdir().unwrap();
        let marker = TempArtifact::in_dir(dir.path(), DEFAULT_MARKER_NAME).unwrap();
        marker.write(std::path::Path::new("/data/a.h5")).unwrap();

        let source = MarkerStartupSource::new(marker.clone());
        let file = source.get_startup_file().await.unwrap().unwrap();

        assert_eq!(file.path, PathBuf::from("/data/a.h5"));
        assert_eq!(file.artifact.as_deref(), Some(DEFAULT_MARKER_NAME));
        assert!(marker.exists());
    }

    #[tokio::test]
    async fn test_blank_marker_is_removed() {
        let dir = tempdir().unwrap();
        let marker = TempArtifact::in_dir(dir.path(), DEFAULT_MARKER_NAME).unwrap();
        std::fs::write(marker.path(), "").unwrap();

        let source = MarkerStartupSource::new(marker.clone());
        assert_eq!(source.get_startup_file().await.unwrap(), None);
        assert!(!marker.exists());
    }
}
