// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod intake_service;
pub mod intake_sources;
pub mod load_guard;
pub mod size_gated_loader;
pub mod viewer_handoff;


// Re-export all services and their types
pub use intake_service::{FileReadyConsumer, IntakeOutcome, IntakeService, StartupProbe};

pub use intake_sources::{DragDropAdapter, IntakeSources, NativeDialogAdapter, StartupAdapter};

pub use load_guard::{LoadGuard, LoadTicket};

pub use size_gated_loader::{EligiblePath, LoadDecision, SizeGatedLoader, SizeVerdict};

pub use viewer_handoff::{OpenedFile, ViewerHandoff};
