// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - It provides the boundary between UI (Tauri) and the intake services
// - It never changes intake semantics
// - It translates between DTOs and domain types
// - Commands need the Tauri runtime and only exist in desktop builds

pub mod dto;
pub mod error_handling;
pub mod state;

#[cfg(feature = "desktop")]
pub mod commands;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

#[cfg(feature = "desktop")]
pub use commands::*;
