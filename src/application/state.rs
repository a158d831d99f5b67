// src/application/state.rs

use std::sync::Arc;

use crate::config::IntakeConfig;
use crate::events::EventBus;
use crate::integrations::{FilePicker, FileSystemPort, RuntimeCapabilities, StartupFileSource};
use crate::services::{IntakeService, IntakeSources, ViewerHandoff};

/// Application state managed by Tauri.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub intake: Arc<IntakeService>,
    pub sources: Arc<IntakeSources>,
    pub viewer: Arc<ViewerHandoff>,
}

impl AppState {
    /// Wire the intake core to its platform collaborators.
    ///
    /// The picker and startup source are only kept when the runtime
    /// supports them.
    pub fn new(
        config: &IntakeConfig,
        capabilities: RuntimeCapabilities,
        fs: Arc<dyn FileSystemPort>,
        picker: Option<Arc<dyn FilePicker>>,
        startup: Option<Arc<dyn StartupFileSource>>,
    ) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let viewer = Arc::new(ViewerHandoff::new(event_bus.clone()));
        let intake = Arc::new(IntakeService::new(
            fs,
            viewer.clone(),
            event_bus.clone(),
            capabilities,
            config,
        ));
        let sources = Arc::new(IntakeSources::for_runtime(capabilities, picker, startup));

        log::info!(
            "Intake ready: threshold {}, sources {:?}",
            intake.threshold(),
            sources.active()
        );

        Self {
            event_bus,
            intake,
            sources,
            viewer,
        }
    }
}
