// src/events/types.rs
//
// All intake events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No intake logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::{IntakeOrigin, IntakeState};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// STATE MACHINE EVENTS
// ============================================================================

/// Emitted on every transition of the intake state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeStateChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub previous: IntakeState,
    pub current: IntakeState,
}

impl IntakeStateChanged {
    pub fn new(previous: IntakeState, current: IntakeState) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            previous,
            current,
        }
    }
}

impl DomainEvent for IntakeStateChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "IntakeStateChanged" }
}

/// Emitted when a candidate is refused because another load is in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDropped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub label: String,
    pub origin: IntakeOrigin,
    pub in_flight: Option<String>,
}

impl CandidateDropped {
    pub fn new(label: String, origin: IntakeOrigin, in_flight: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            label,
            origin,
            in_flight,
        }
    }
}

impl DomainEvent for CandidateDropped {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CandidateDropped" }
}

/// Emitted when a pending (awaiting) file is abandoned for a different one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCandidateDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub file_name: String,
    pub path: PathBuf,
    pub superseded_by: String,
}

impl PendingCandidateDiscarded {
    pub fn new(file_name: String, path: PathBuf, superseded_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            file_name,
            path,
            superseded_by,
        }
    }
}

impl DomainEvent for PendingCandidateDiscarded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PendingCandidateDiscarded" }
}

/// Emitted when reading an admitted file fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub label: String,
    pub message: String,
}

impl LoadFailed {
    pub fn new(label: String, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            label,
            message,
        }
    }
}

impl DomainEvent for LoadFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "LoadFailed" }
}

// ============================================================================
// HAND-OFF & PLATFORM EVENTS
// ============================================================================

/// Emitted when the viewer hand-off store receives a loaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDelivered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub file_id: Uuid,
    pub name: String,
    pub size: u64,
}

impl FileDelivered {
    pub fn new(file_id: Uuid, name: String, size: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            file_id,
            name,
            size,
        }
    }
}

impl DomainEvent for FileDelivered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FileDelivered" }
}

/// Emitted when a temp marker could not be removed. Never surfaced to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempArtifactCleanupFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub artifact: String,
    pub message: String,
}

impl TempArtifactCleanupFailed {
    pub fn new(artifact: String, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            artifact,
            message,
        }
    }
}

impl DomainEvent for TempArtifactCleanupFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TempArtifactCleanupFailed" }
}
