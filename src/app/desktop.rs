// src/app/desktop.rs
//
// Desktop Bootstrap
//
// Wires the intake core to Tauri: plugins, managed state, command
// handlers, window drag-drop and the events the web view listens to.
//
// CRITICAL RULES:
// - Platform events are forwarded to the intake sources, never handled here
// - The startup probe is run by the web view once its listeners are registered

use std::sync::Arc;
use tauri::{AppHandle, DragDropEvent, Emitter, Manager, Runtime, WindowEvent};

use crate::application::commands::*;
use crate::application::dto::{IntakeStateDto, OpenedFileDto};
use crate::application::state::AppState;
use crate::config::IntakeConfig;
use crate::events::{EventBus, FileDelivered, IntakeStateChanged};
use crate::infrastructure::TempArtifact;
use crate::integrations::{
    FilePicker, LocalFileSystem, MarkerStartupSource, RuntimeCapabilities, StartupFileSource,
    TauriFilePicker,
};

/// Web view event carrying an `IntakeStateDto`.
pub const STATE_EVENT: &str = "intake://state";

/// Web view event carrying an `OpenedFileDto`.
pub const FILE_READY_EVENT: &str = "viewer://file-ready";

pub fn run(config: IntakeConfig) -> anyhow::Result<()> {
    tauri::Builder::default()
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_shell::init())
        .setup(move |app| {
            let handle = app.handle().clone();

            // 1. PLATFORM COLLABORATORS
            let marker = TempArtifact::new(&config.marker_file_name)?;
            let picker: Arc<dyn FilePicker> = Arc::new(TauriFilePicker::new(handle.clone()));
            let startup: Arc<dyn StartupFileSource> = Arc::new(MarkerStartupSource::new(marker));

            // 2. APPLICATION STATE
            let state = AppState::new(
                &config,
                RuntimeCapabilities::desktop(),
                Arc::new(LocalFileSystem::with_system_temp()),
                Some(picker),
                Some(startup),
            );

            // 3. EVENT FORWARDING
            forward_events(&handle, &state.event_bus);
            app.manage(state);

            log::info!("Desktop shell ready");
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::DragDrop(DragDropEvent::Drop { paths, .. }) = event {
                let state = window.state::<AppState>();
                let intake = state.intake.clone();
                let sources = state.sources.clone();
                let paths = paths.clone();

                tauri::async_runtime::spawn(async move {
                    if let Err(e) = sources.drag_drop.drop_paths(&intake, paths).await {
                        log::warn!("Dropped file could not be opened: {}", e);
                    }
                });
            }
        })
        .invoke_handler(tauri::generate_handler![
            get_intake_state,
            get_active_sources,
            submit_dropped_file,
            open_dropped_paths,
            pick_file,
            probe_startup_file,
            take_opened_file,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}

/// Push state changes and delivered files to the web view.
fn forward_events<R: Runtime>(app: &AppHandle<R>, bus: &EventBus) {
    let handle = app.clone();
    bus.subscribe::<IntakeStateChanged, _>(move |event| {
        let dto = IntakeStateDto::from(event.current.clone());
        if let Err(e) = handle.emit(STATE_EVENT, dto) {
            log::warn!("Failed to forward intake state: {}", e);
        }
    });

    let handle = app.clone();
    bus.subscribe::<FileDelivered, _>(move |event| {
        if let Err(e) = handle.emit(FILE_READY_EVENT, OpenedFileDto::from(event)) {
            log::warn!("Failed to announce {:?} to the viewer: {}", event.name, e);
        }
    });
}
