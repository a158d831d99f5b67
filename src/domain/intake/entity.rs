use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const MIB: u64 = 1024 * 1024;

/// Where the bytes of a `Handle` candidate live.
///
/// Both variants are addressable without consulting the size policy: a
/// buffer was already uploaded by the web view, and a dropped file is handed
/// over by the window system as-is and read through the filesystem port.
pub enum ByteSource {
    Buffer(Vec<u8>),
    File(PathBuf),
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteSource::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            ByteSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// A file reference produced by one intake source, not yet confirmed
/// loadable. Consumed exactly once.
#[derive(Debug)]
pub enum CandidateFile {
    /// Content already addressable; accepted without a size check.
    Handle { name: String, source: ByteSource },

    /// Content must be fetched through the size-gated loader.
    PathRef { path: PathBuf },
}

impl CandidateFile {
    pub fn from_buffer(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        CandidateFile::Handle {
            name: name.into(),
            source: ByteSource::Buffer(bytes),
        }
    }

    pub fn from_dropped_file(path: PathBuf) -> Self {
        CandidateFile::Handle {
            name: file_name_of(&path),
            source: ByteSource::File(path),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        CandidateFile::PathRef { path: path.into() }
    }

    /// Name shown while loading and used to match a re-supplied file.
    pub fn display_name(&self) -> String {
        match self {
            CandidateFile::Handle { name, .. } => name.clone(),
            CandidateFile::PathRef { path } => file_name_of(path),
        }
    }

    /// Whether this candidate is the same logical file as a pending one.
    ///
    /// Paths compare exactly; handles only carry a name, so they compare
    /// by file name.
    pub fn refers_to(&self, file_name: &str, path: &Path) -> bool {
        match self {
            CandidateFile::PathRef { path: own } => own == path,
            CandidateFile::Handle { name, .. } => name == file_name,
        }
    }
}

/// File name component of a path, with the fallback the viewer expects.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "file.h5".to_string())
}

/// Why a path could not be loaded directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum AwaitingReason {
    TooLarge { size: u64, threshold: u64 },
    SizeUnknown,
    ReadFailed { message: String },
}

impl AwaitingReason {
    pub fn code(&self) -> &'static str {
        match self {
            AwaitingReason::TooLarge { .. } => "too_large",
            AwaitingReason::SizeUnknown => "size_unknown",
            AwaitingReason::ReadFailed { .. } => "read_failed",
        }
    }

    /// Actionable text for the presentation layer. Never phrased as an error.
    pub fn guidance(&self, file_name: &str) -> String {
        const NEXT_STEP: &str =
            "Drag the file onto the window or choose it with the file picker to open it.";
        match self {
            AwaitingReason::TooLarge { size, threshold } => format!(
                "{} is {:.1} MB, above the {:.1} MB limit for direct loading. {}",
                file_name,
                *size as f64 / MIB as f64,
                *threshold as f64 / MIB as f64,
                NEXT_STEP
            ),
            AwaitingReason::SizeUnknown => format!(
                "The size of {} could not be determined, so it was not loaded automatically. {}",
                file_name, NEXT_STEP
            ),
            AwaitingReason::ReadFailed { message } => format!(
                "{} could not be read ({}). {}",
                file_name, message, NEXT_STEP
            ),
        }
    }
}

/// The single piece of intake state, owned by the intake service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeState {
    #[default]
    Idle,
    Loading {
        label: String,
    },
    AwaitingUserAction {
        file_name: String,
        path: PathBuf,
        reason: AwaitingReason,
    },
}

impl IntakeState {
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeState::Idle => "idle",
            IntakeState::Loading { .. } => "loading",
            IntakeState::AwaitingUserAction { .. } => "awaiting_user_action",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, IntakeState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, IntakeState::Loading { .. })
    }

    pub fn awaiting_path(&self) -> Option<&Path> {
        match self {
            IntakeState::AwaitingUserAction { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn awaiting_reason(&self) -> Option<&AwaitingReason> {
        match self {
            IntakeState::AwaitingUserAction { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Byte count separating direct in-memory load from deferred acquisition.
/// Inclusive: a file exactly at the threshold is loaded directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeThreshold(u64);

impl SizeThreshold {
    pub const ONE_GIB: SizeThreshold = SizeThreshold(1024 * MIB);
    pub const FOUR_GIB: SizeThreshold = SizeThreshold(4 * 1024 * MIB);

    pub const fn new(bytes: u64) -> Self {
        SizeThreshold(bytes)
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    pub fn admits(&self, size: u64) -> bool {
        size <= self.0
    }
}

impl Default for SizeThreshold {
    fn default() -> Self {
        SizeThreshold::ONE_GIB
    }
}

impl fmt::Display for SizeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} MB", self.0 as f64 / MIB as f64)
    }
}

/// The intake source a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOrigin {
    /// Window drop or web-view file input.
    DragDrop,

    /// Platform file-selection dialog.
    NativeDialog,

    /// OS file association at process start.
    Startup,
}

impl fmt::Display for IntakeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeOrigin::DragDrop => write!(f, "drag_drop"),
            IntakeOrigin::NativeDialog => write!(f, "native_dialog"),
            IntakeOrigin::Startup => write!(f, "startup"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let threshold = SizeThreshold::new(100);
        assert!(threshold.admits(99));
        assert!(threshold.admits(100));
        assert!(!threshold.admits(101));
    }

    #[test]
    fn test_threshold_presets() {
        assert_eq!(SizeThreshold::ONE_GIB.bytes(), 1_073_741_824);
        assert_eq!(SizeThreshold::FOUR_GIB.bytes(), 4_294_967_296);
        assert_eq!(SizeThreshold::default(), SizeThreshold::ONE_GIB);
        assert_eq!(SizeThreshold::ONE_GIB.to_string(), "1024.0 MB");
    }

    #[test]
    fn test_display_name_uses_file_component() {
        let candidate = CandidateFile::from_path("/data/beamline/run_17.nxs");
        assert_eq!(candidate.display_name(), "run_17.nxs");

        let fallback = CandidateFile::from_path("/");
        assert_eq!(fallback.display_name(), "file.h5");
    }

    #[test]
    fn test_refers_to_matches_handles_by_name() {
        let pending = PathBuf::from("/data/big.h5");
        let handle = CandidateFile::from_buffer("big.h5", vec![1, 2, 3]);
        let other = CandidateFile::from_buffer("small.h5", vec![]);

        assert!(handle.refers_to("big.h5", &pending));
        assert!(!other.refers_to("big.h5", &pending));
        assert!(CandidateFile::from_path("/data/big.h5").refers_to("big.h5", &pending));
        assert!(!CandidateFile::from_path("/other/big.h5").refers_to("big.h5", &pending));
    }

    #[test]
    fn test_guidance_mentions_size_for_too_large() {
        let reason = AwaitingReason::TooLarge {
            size: 2 * SizeThreshold::ONE_GIB.bytes(),
            threshold: SizeThreshold::ONE_GIB.bytes(),
        };
        let text = reason.guidance("scan.h5");
        assert!(text.contains("scan.h5 is 2048.0 MB"));
        assert!(text.contains("1024.0 MB limit"));
        assert!(!text.to_lowercase().contains("error"));
    }

    #[test]
    fn test_state_serializes_with_kind_tag() {
        let state = IntakeState::AwaitingUserAction {
            file_name: "a.h5".to_string(),
            path: PathBuf::from("/tmp/a.h5"),
            reason: AwaitingReason::SizeUnknown,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["kind"], "awaiting_user_action");
        assert_eq!(json["reason"]["code"], "size_unknown");
    }

    #[test]
    fn test_byte_source_debug_hides_buffer_contents() {
        let buffer = ByteSource::Buffer(vec![0x89, b'H', b'D', b'F']);
        assert_eq!(format!("{:?}", buffer), "Buffer(4 bytes)");
    }
}
