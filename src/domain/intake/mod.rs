pub mod entity;
pub mod extension;
pub mod invariants;

pub use entity::{
    AwaitingReason, ByteSource, CandidateFile, IntakeOrigin, IntakeState, SizeThreshold,
};
pub use extension::{has_recognized_extension, RECOGNIZED_EXTENSIONS};
pub use invariants::validate_candidate;
