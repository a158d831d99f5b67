// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the intake core
// but are not part of it.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod temp_artifact;

pub use temp_artifact::{TempArtifact, DEFAULT_MARKER_NAME};
