// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod intake;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use intake::{
    has_recognized_extension, validate_candidate, AwaitingReason, ByteSource, CandidateFile,
    IntakeOrigin, IntakeState, SizeThreshold, RECOGNIZED_EXTENSIONS,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of intake invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
