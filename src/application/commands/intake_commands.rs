// src/application/commands/intake_commands.rs

use std::path::PathBuf;
use tauri::ipc::Response;
use tauri::State;
use uuid::Uuid;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::error::{AppError, AppResult};
use crate::integrations::IntakeSourceKind;
use crate::services::IntakeOutcome;

fn respond(state: &AppState, result: AppResult<IntakeOutcome>) -> Result<IntakeOutcomeDto, String> {
    result
        .map(|outcome| IntakeOutcomeDto::new(outcome, state.intake.current_state()))
        .to_error_response()
}

/// Current intake state for rendering
#[tauri::command]
pub fn get_intake_state(state: State<'_, AppState>) -> IntakeStateDto {
    state.intake.current_state().into()
}

/// Intake sources available in this runtime
#[tauri::command]
pub fn get_active_sources(state: State<'_, AppState>) -> Vec<IntakeSourceKind> {
    state.sources.active()
}

/// A file read by the web view (HTML drop or file input)
#[tauri::command]
pub async fn submit_dropped_file(
    dto: UploadedFileDto,
    state: State<'_, AppState>,
) -> Result<IntakeOutcomeDto, String> {
    let result = state
        .sources
        .drag_drop
        .upload(&state.intake, &dto.name, dto.bytes)
        .await;
    respond(&state, result)
}

/// Paths dropped onto the window by the OS
#[tauri::command]
pub async fn open_dropped_paths(
    dto: DroppedPathsDto,
    state: State<'_, AppState>,
) -> Result<IntakeOutcomeDto, String> {
    let paths = dto.paths.into_iter().map(PathBuf::from);
    let result = state.sources.drag_drop.drop_paths(&state.intake, paths).await;
    respond(&state, result)
}

/// Open the native picker, pre-navigated to the pending file if any
#[tauri::command]
pub async fn pick_file(state: State<'_, AppState>) -> Result<IntakeOutcomeDto, String> {
    let result = state.sources.pick(&state.intake).await;
    respond(&state, result)
}

/// Admit the launch file, if the OS handed one over
#[tauri::command]
pub async fn probe_startup_file(state: State<'_, AppState>) -> Result<IntakeOutcomeDto, String> {
    let result = state.sources.probe_startup(&state.intake).await;
    respond(&state, result)
}

/// Raw bytes of a delivered file; each id can be taken once
#[tauri::command]
pub fn take_opened_file(id: String, state: State<'_, AppState>) -> Result<Response, String> {
    let lookup = || -> AppResult<Response> {
        let id = Uuid::parse_str(&id)?;
        let file = state.viewer.take(id).ok_or(AppError::NotFound)?;
        Ok(Response::new(file.bytes))
    };
    lookup().to_error_response()
}
