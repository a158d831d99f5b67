// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain types only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::IntakeState;
use crate::events::FileDelivered;
use crate::services::IntakeOutcome;

// ============================================================================
// INTAKE STATE DTOs
// ============================================================================

/// What the window should render: idle, a loading label, or the
/// awaiting-action prompt with its guidance text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeStateDto {
    pub kind: String,
    pub label: Option<String>,
    pub file_name: Option<String>,
    pub path: Option<String>,
    pub reason: Option<String>,
    pub guidance: Option<String>,
}

impl From<IntakeState> for IntakeStateDto {
    fn from(state: IntakeState) -> Self {
        let kind = state.kind().to_string();
        match state {
            IntakeState::Idle => Self {
                kind,
                label: None,
                file_name: None,
                path: None,
                reason: None,
                guidance: None,
            },
            IntakeState::Loading { label } => Self {
                kind,
                label: Some(label),
                file_name: None,
                path: None,
                reason: None,
                guidance: None,
            },
            IntakeState::AwaitingUserAction {
                file_name,
                path,
                reason,
            } => Self {
                kind,
                label: None,
                guidance: Some(reason.guidance(&file_name)),
                reason: Some(reason.code().to_string()),
                path: Some(path.to_string_lossy().to_string()),
                file_name: Some(file_name),
            },
        }
    }
}

// ============================================================================
// INTAKE REQUEST DTOs
// ============================================================================

/// A file the web view read itself (file input or HTML drop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFileDto {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedPathsDto {
    pub paths: Vec<String>,
}

/// Result of one intake request plus the state it left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeOutcomeDto {
    pub outcome: String,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub state: IntakeStateDto,
}

impl IntakeOutcomeDto {
    pub fn new(outcome: IntakeOutcome, state: IntakeState) -> Self {
        let (name, size) = match &outcome {
            IntakeOutcome::Delivered { name, size } => (Some(name.clone()), Some(*size)),
            _ => (None, None),
        };
        let outcome = match outcome {
            IntakeOutcome::Delivered { .. } => "delivered",
            IntakeOutcome::AwaitingUserAction { .. } => "awaiting_user_action",
            IntakeOutcome::Dropped => "dropped",
            IntakeOutcome::Ignored => "ignored",
            IntakeOutcome::Cancelled => "cancelled",
            IntakeOutcome::Unavailable => "unavailable",
        };

        Self {
            outcome: outcome.to_string(),
            name,
            size,
            state: state.into(),
        }
    }
}

// ============================================================================
// VIEWER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedFileDto {
    pub id: String,
    pub name: String,
    pub size: u64,
}

/// Announcement sent to the viewer; the bytes are fetched separately by id.
impl From<&FileDelivered> for OpenedFileDto {
    fn from(event: &FileDelivered) -> Self {
        Self {
            id: event.file_id.to_string(),
            name: event.name.clone(),
            size: event.size,
        }
    }
}
