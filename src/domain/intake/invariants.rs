use super::entity::{ByteSource, CandidateFile};
use crate::domain::{DomainError, DomainResult};

/// Validates a candidate before it is admitted.
pub fn validate_candidate(candidate: &CandidateFile) -> DomainResult<()> {
    match candidate {
        CandidateFile::PathRef { path } => validate_path(path),
        CandidateFile::Handle { name, source } => {
            if name.trim().is_empty() {
                return Err(DomainError::InvariantViolation(
                    "Handle name cannot be empty".to_string(),
                ));
            }
            match source {
                ByteSource::File(path) => validate_path(path),
                ByteSource::Buffer(_) => Ok(()),
            }
        }
    }
}

/// Path must be absolute and non-empty
fn validate_path(path: &std::path::Path) -> DomainResult<()> {
    if path.as_os_str().is_empty() {
        return Err(DomainError::InvariantViolation(
            "File path cannot be empty".to_string(),
        ));
    }

    if !path.is_absolute() {
        return Err(DomainError::InvariantViolation(format!(
            "File path must be absolute: {:?}",
            path
        )));
    }

    Ok(())
}
