// src/services/size_gated_loader.rs
//
// Size-Gated Loader - Memory Bound for Path Candidates
//
// CRITICAL RULES:
// - Metadata first: stat before anything else
// - Never read the bytes of a file above the threshold
// - Stat failure is "unknown", never "try reading anyway"
// - The threshold is fixed for the lifetime of the loader

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::SizeThreshold;
use crate::integrations::FileSystemPort;

/// Outcome of resolving a path against the size policy.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadDecision {
    Eligible(Vec<u8>),
    TooLarge { size: u64, threshold: u64 },
    Unknown,
    ReadFailed(String),
}

/// Outcome of the metadata step alone.
#[derive(Debug, PartialEq, Eq)]
pub enum SizeVerdict {
    Within(EligiblePath),
    TooLarge { size: u64, threshold: u64 },
    Unknown,
}

/// Proof that a path was measured within the threshold.
///
/// Only `SizeGatedLoader::measure` builds one, and `SizeGatedLoader::load`
/// only accepts one, so no code path can read an unmeasured file.
#[derive(Debug, PartialEq, Eq)]
pub struct EligiblePath {
    path: PathBuf,
    size: u64,
}

impl EligiblePath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

pub struct SizeGatedLoader {
    fs: Arc<dyn FileSystemPort>,
    threshold: SizeThreshold,
}

impl SizeGatedLoader {
    pub fn new(fs: Arc<dyn FileSystemPort>, threshold: SizeThreshold) -> Self {
        Self { fs, threshold }
    }

    pub fn threshold(&self) -> SizeThreshold {
        self.threshold
    }

    /// Stat the path and compare against the threshold. Reads no bytes.
    pub async fn measure(&self, path: &Path) -> SizeVerdict {
        if path.as_os_str().is_empty() {
            log::warn!("Refusing to measure an empty path");
            return SizeVerdict::Unknown;
        }

        let size = match self.fs.stat_size(path).await {
            Ok(size) => size,
            Err(e) => {
                log::info!("Size of {:?} unavailable: {}", path, e);
                return SizeVerdict::Unknown;
            }
        };

        if self.threshold.admits(size) {
            SizeVerdict::Within(EligiblePath {
                path: path.to_path_buf(),
                size,
            })
        } else {
            log::info!(
                "{:?} is {} bytes, above the {} direct-load limit",
                path,
                size,
                self.threshold
            );
            SizeVerdict::TooLarge {
                size,
                threshold: self.threshold.bytes(),
            }
        }
    }

    /// Read a measured file fully into memory. The error is the I/O message.
    pub async fn load(&self, eligible: EligiblePath) -> Result<Vec<u8>, String> {
        match self.fs.read_all_bytes(&eligible.path).await {
            Ok(bytes) => {
                log::debug!("Read {} bytes from {:?}", bytes.len(), eligible.path);
                Ok(bytes)
            }
            Err(e) => {
                log::warn!("Read of {:?} failed: {}", eligible.path, e);
                Err(e.to_string())
            }
        }
    }

    /// Measure, then load when eligible.
    pub async fn resolve(&self, path: &Path) -> LoadDecision {
        match self.measure(path).await {
            SizeVerdict::Within(eligible) => match self.load(eligible).await {
                Ok(bytes) => LoadDecision::Eligible(bytes),
                Err(message) => LoadDecision::ReadFailed(message),
            },
            SizeVerdict::TooLarge { size, threshold } => LoadDecision::TooLarge { size, threshold },
            SizeVerdict::Unknown => LoadDecision::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::integrations::platform::MockFileSystemPort;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn loader(fs: MockFileSystemPort) -> SizeGatedLoader {
        SizeGatedLoader::new(Arc::new(fs), SizeThreshold::ONE_GIB)
    }

    #[tokio::test]
    async fn test_within_threshold_reads_exactly_once() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().times(1).returning(|_| Ok(512));
        fs.expect_read_all_bytes()
            .withf(|path| path == Path::new("/data/small.h5"))
            .times(1)
            .returning(|_| Ok(vec![7; 512]));

        let decision = loader(fs).resolve(Path::new("/data/small.h5")).await;

        assert_eq!(decision, LoadDecision::Eligible(vec![7; 512]));
    }

    #[tokio::test]
    async fn test_exactly_at_threshold_is_eligible() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().returning(|_| Ok(GIB));
        fs.expect_read_all_bytes().times(1).returning(|_| Ok(vec![]));

        let decision = loader(fs).resolve(Path::new("/data/edge.h5")).await;

        assert_eq!(decision, LoadDecision::Eligible(vec![]));
    }

    #[tokio::test]
    async fn test_above_threshold_never_reads() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().returning(|_| Ok(2 * GIB));
        fs.expect_read_all_bytes().never();

        let decision = loader(fs).resolve(Path::new("/data/huge.h5")).await;

        assert_eq!(
            decision,
            LoadDecision::TooLarge {
                size: 2 * GIB,
                threshold: GIB
            }
        );
    }

    #[tokio::test]
    async fn test_stat_failure_is_unknown_and_never_reads() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size()
            .returning(|_| Err(AppError::Platform("permission denied".to_string())));
        fs.expect_read_all_bytes().never();

        let decision = loader(fs).resolve(Path::new("/data/locked.h5")).await;

        assert_eq!(decision, LoadDecision::Unknown);
    }

    #[tokio::test]
    async fn test_empty_path_is_unknown_without_stat() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().never();
        fs.expect_read_all_bytes().never();

        assert_eq!(loader(fs).resolve(Path::new("")).await, LoadDecision::Unknown);
    }

    #[tokio::test]
    async fn test_read_error_is_read_failed() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().returning(|_| Ok(10));
        fs.expect_read_all_bytes().times(1).returning(|_| {
            Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated",
            )))
        });

        match loader(fs).resolve(Path::new("/data/flaky.h5")).await {
            LoadDecision::ReadFailed(message) => assert!(message.contains("truncated")),
            other => panic!("Expected ReadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_threshold_is_policy_not_mechanism() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_stat_size().returning(|_| Ok(3 * GIB));
        fs.expect_read_all_bytes().times(1).returning(|_| Ok(vec![1]));

        let loader = SizeGatedLoader::new(Arc::new(fs), SizeThreshold::FOUR_GIB);
        match loader.measure(Path::new("/data/big.h5")).await {
            SizeVerdict::Within(eligible) => {
                assert_eq!(eligible.size(), 3 * GIB);
                assert_eq!(loader.load(eligible).await, Ok(vec![1]));
            }
            other => panic!("Expected Within, got {:?}", other),
        }
    }
}
