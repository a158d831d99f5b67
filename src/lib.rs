// src/lib.rs
// myhdf5 - HDF5/NeXus file intake for a local viewer
//
// Architecture:
// - Domain-centric: intake types and invariants live in the domain
// - Event-driven: every state transition is published on the event bus
// - Explicit: one state machine, one admission guard, no implicit flags
// - Ports: the filesystem, picker and launch hand-over sit behind traits
// - Application Layer: UI boundary (desktop builds only for commands)

// ============================================================================
// INTAKE CORE
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

#[cfg(feature = "desktop")]
pub mod app;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    has_recognized_extension, validate_candidate, AwaitingReason, ByteSource, CandidateFile,
    IntakeOrigin, IntakeState, SizeThreshold, RECOGNIZED_EXTENSIONS,
};

// ============================================================================
// PUBLIC API - Errors and Configuration
// ============================================================================

pub use config::IntakeConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, CandidateDropped, DomainEvent, EventBus, EventLogEntry, FileDelivered,
    IntakeStateChanged, LoadFailed, PendingCandidateDiscarded, TempArtifactCleanupFailed,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    DragDropAdapter, FileReadyConsumer, IntakeOutcome, IntakeService, IntakeSources,
    NativeDialogAdapter, OpenedFile, SizeGatedLoader, StartupAdapter, ViewerHandoff,
};

// ============================================================================
// PUBLIC API - Platform
// ============================================================================

pub use infrastructure::TempArtifact;
pub use integrations::{
    capture_launch_argument, FilePicker, FileSystemPort, IntakeSourceKind, LocalFileSystem,
    MarkerStartupSource, RuntimeCapabilities, StartupFile, StartupFileSource,
};

pub use application::AppState;
