// src/services/intake_service.rs
//
// Intake Service - The File-Intake State Machine
//
// CRITICAL RULES:
// - Single owner of IntakeState; every transition goes through set_state
// - At most one admitted candidate at a time (LoadGuard)
// - Locks are never held across an .await
// - Superseding is the only way to abandon a pending file; no queueing
// - Temp marker cleanup is best-effort and never surfaces to the user

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::IntakeConfig;
use crate::domain::intake::entity::file_name_of;
use crate::domain::{
    validate_candidate, AwaitingReason, ByteSource, CandidateFile, IntakeOrigin, IntakeState,
    SizeThreshold,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    CandidateDropped, EventBus, IntakeStateChanged, LoadFailed, PendingCandidateDiscarded,
    TempArtifactCleanupFailed,
};
use crate::integrations::{FileSystemPort, RuntimeCapabilities, StartupFile};
use crate::services::load_guard::LoadGuard;
use crate::services::size_gated_loader::{SizeGatedLoader, SizeVerdict};

/// Downstream consumer of loaded files (the viewer).
///
/// Called exactly once per successfully resolved candidate.
pub trait FileReadyConsumer: Send + Sync {
    fn on_file_ready(&self, name: &str, bytes: Vec<u8>);
}

/// What happened to one intake request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntakeOutcome {
    /// Bytes handed to the consumer; state is back to idle.
    Delivered { name: String, size: u64 },

    /// The file needs the user to supply it another way.
    AwaitingUserAction { reason: AwaitingReason },

    /// Refused because another load is in flight or startup was handled.
    Dropped,

    /// The source produced no recognized file.
    Ignored,

    /// The user dismissed the picker.
    Cancelled,

    /// The source is not active in this runtime.
    Unavailable,
}

/// Permission to run the one startup probe of this process.
///
/// Only `IntakeService::begin_startup_probe` hands one out, once.
#[derive(Debug)]
pub struct StartupProbe {
    _once: (),
}

pub struct IntakeService {
    loader: SizeGatedLoader,
    fs: Arc<dyn FileSystemPort>,
    consumer: Arc<dyn FileReadyConsumer>,
    event_bus: Arc<EventBus>,
    capabilities: RuntimeCapabilities,
    debounce: Duration,
    state: Mutex<IntakeState>,
    guard: Arc<LoadGuard>,
    startup_handled: AtomicBool,
    /// Marker naming the path currently being resolved or awaited.
    pending_artifact: Mutex<Option<String>>,
}

impl IntakeService {
    pub fn new(
        fs: Arc<dyn FileSystemPort>,
        consumer: Arc<dyn FileReadyConsumer>,
        event_bus: Arc<EventBus>,
        capabilities: RuntimeCapabilities,
        config: &IntakeConfig,
    ) -> Self {
        Self {
            loader: SizeGatedLoader::new(fs.clone(), config.threshold()),
            fs,
            consumer,
            event_bus,
            capabilities,
            debounce: config.debounce(),
            state: Mutex::new(IntakeState::Idle),
            guard: Arc::new(LoadGuard::new()),
            startup_handled: AtomicBool::new(false),
            pending_artifact: Mutex::new(None),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn current_state(&self) -> IntakeState {
        self.lock_state().clone()
    }

    /// Path of the file awaiting user action, if any.
    pub fn pending_path(&self) -> Option<PathBuf> {
        self.lock_state().awaiting_path().map(|p| p.to_path_buf())
    }

    /// Whether a candidate would currently be refused.
    pub fn is_busy(&self) -> bool {
        self.guard.is_held()
    }

    pub fn threshold(&self) -> SizeThreshold {
        self.loader.threshold()
    }

    pub fn capabilities(&self) -> RuntimeCapabilities {
        self.capabilities
    }

    // ========================================================================
    // ADMISSION
    // ========================================================================

    /// Admit a candidate from an interactive source.
    pub async fn admit(
        &self,
        candidate: CandidateFile,
        origin: IntakeOrigin,
    ) -> AppResult<IntakeOutcome> {
        self.admit_with_artifact(candidate, origin, None).await
    }

    /// Claim the startup probe. Returns `None` on every call after the first,
    /// including calls made before the first probe's async work finished.
    pub fn begin_startup_probe(&self) -> Option<StartupProbe> {
        if self.startup_handled.swap(true, Ordering::SeqCst) {
            log::debug!("Startup probe already handled, ignoring duplicate");
            None
        } else {
            Some(StartupProbe { _once: () })
        }
    }

    /// Admit the launch file found by the startup probe.
    pub async fn admit_startup(
        &self,
        _probe: StartupProbe,
        file: StartupFile,
    ) -> AppResult<IntakeOutcome> {
        self.admit_with_artifact(
            CandidateFile::from_path(file.path),
            IntakeOrigin::Startup,
            file.artifact,
        )
        .await
    }

    /// Give up on a launch file without loading it. Its marker goes with it,
    /// so the next launch does not reopen the same file.
    pub async fn abandon_startup(&self, _probe: StartupProbe, file: StartupFile) {
        log::info!("Abandoning launch file {:?}", file.path);
        if let Some(artifact) = file.artifact {
            self.cleanup_artifact(artifact).await;
        }
    }

    async fn admit_with_artifact(
        &self,
        candidate: CandidateFile,
        origin: IntakeOrigin,
        artifact: Option<String>,
    ) -> AppResult<IntakeOutcome> {
        if let Err(e) = validate_candidate(&candidate) {
            if let Some(name) = artifact {
                self.cleanup_artifact(name).await;
            }
            return Err(e.into());
        }
        let label = candidate.display_name();

        let Some(ticket) = self.guard.try_acquire(&label, origin) else {
            let in_flight = self.guard.in_flight().map(|t| t.label);
            log::info!(
                "Ignoring {} candidate {:?}, {:?} is still loading",
                origin,
                label,
                in_flight
            );
            self.event_bus
                .emit(CandidateDropped::new(label, origin, in_flight));
            if let Some(name) = artifact {
                self.cleanup_artifact(name).await;
            }
            return Ok(IntakeOutcome::Dropped);
        };
        log::info!("Admitted {} candidate {:?}", origin, label);

        if let Some(abandoned) = self.supersede_pending(&candidate) {
            self.cleanup_artifact(abandoned).await;
        }
        if let Some(name) = artifact {
            let previous = self.lock_artifact().replace(name.clone());
            if let Some(previous) = previous.filter(|p| *p != name) {
                self.cleanup_artifact(previous).await;
            }
        }

        let result = match candidate {
            CandidateFile::Handle { name, source } => self.load_handle(name, source).await,
            CandidateFile::PathRef { path } => self.load_path(path).await,
        };

        // Once the user is asked to act, their next file must not be refused.
        let awaiting = self.lock_state().awaiting_path().is_some();
        if awaiting {
            self.guard.release(ticket.id);
        } else {
            self.guard.release_after(ticket.id, self.debounce);
        }

        result
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Handle a candidate arriving while another file is awaiting action.
    ///
    /// The same file is a retry and keeps its marker. A different file wins:
    /// the pending one is discarded and its marker returned for cleanup.
    fn supersede_pending(&self, candidate: &CandidateFile) -> Option<String> {
        let (file_name, path) = match &*self.lock_state() {
            IntakeState::AwaitingUserAction {
                file_name, path, ..
            } => (file_name.clone(), path.clone()),
            _ => return None,
        };

        if candidate.refers_to(&file_name, &path) {
            log::info!("{:?} re-supplied, retrying", file_name);
            return None;
        }

        let incoming = candidate.display_name();
        log::info!("Discarding pending {:?} in favour of {:?}", path, incoming);
        self.event_bus.emit(PendingCandidateDiscarded::new(
            file_name,
            path,
            incoming.clone(),
        ));

        // A handle loads without a size check, so it can show as loading
        // straight away; a path is undecided until it has been measured.
        let next = match candidate {
            CandidateFile::Handle { .. } => IntakeState::Loading { label: incoming },
            CandidateFile::PathRef { .. } => IntakeState::Idle,
        };
        self.set_state(next);
        self.lock_artifact().take()
    }

    async fn load_handle(&self, name: String, source: ByteSource) -> AppResult<IntakeOutcome> {
        self.set_state(IntakeState::Loading {
            label: name.clone(),
        });

        let read = match source {
            ByteSource::Buffer(bytes) => Ok(bytes),
            ByteSource::File(path) => self.fs.read_all_bytes(&path).await,
        };

        match read {
            Ok(bytes) => Ok(self.deliver(name, bytes).await),
            Err(e) => {
                let message = e.to_string();
                log::warn!("Failed to load {:?}: {}", name, message);
                self.event_bus
                    .emit(LoadFailed::new(name.clone(), message.clone()));
                self.return_to_idle().await;
                Err(AppError::read_failed(name, message))
            }
        }
    }

    async fn load_path(&self, path: PathBuf) -> AppResult<IntakeOutcome> {
        let file_name = file_name_of(&path);

        let eligible = match self.loader.measure(&path).await {
            SizeVerdict::Within(eligible) => eligible,
            SizeVerdict::TooLarge { size, threshold } => {
                let reason = AwaitingReason::TooLarge { size, threshold };
                return Ok(self.await_user(file_name, path, reason));
            }
            SizeVerdict::Unknown => {
                return Ok(self.await_user(file_name, path, AwaitingReason::SizeUnknown));
            }
        };

        self.set_state(IntakeState::Loading {
            label: file_name.clone(),
        });

        match self.loader.load(eligible).await {
            Ok(bytes) => Ok(self.deliver(file_name, bytes).await),
            Err(message) => {
                self.event_bus
                    .emit(LoadFailed::new(file_name.clone(), message.clone()));
                self.await_user(
                    file_name.clone(),
                    path,
                    AwaitingReason::ReadFailed {
                        message: message.clone(),
                    },
                );
                Err(AppError::read_failed(file_name, message))
            }
        }
    }

    fn await_user(
        &self,
        file_name: String,
        path: PathBuf,
        reason: AwaitingReason,
    ) -> IntakeOutcome {
        self.set_state(IntakeState::AwaitingUserAction {
            file_name,
            path,
            reason: reason.clone(),
        });
        IntakeOutcome::AwaitingUserAction { reason }
    }

    async fn deliver(&self, name: String, bytes: Vec<u8>) -> IntakeOutcome {
        let size = bytes.len() as u64;
        self.consumer.on_file_ready(&name, bytes);
        log::info!("Delivered {:?} ({} bytes)", name, size);
        self.return_to_idle().await;
        IntakeOutcome::Delivered { name, size }
    }

    /// Back to idle; the pending marker (consumed or abandoned) goes with it.
    async fn return_to_idle(&self) {
        self.set_state(IntakeState::Idle);
        let artifact = self.lock_artifact().take();
        if let Some(artifact) = artifact {
            self.cleanup_artifact(artifact).await;
        }
    }

    async fn cleanup_artifact(&self, name: String) {
        if !self.capabilities.manages_temp_artifacts() {
            return;
        }
        match self.fs.delete_temp_artifact(&name).await {
            Ok(()) => log::debug!("Removed temp marker {:?}", name),
            Err(e) => {
                log::warn!("Could not remove temp marker {:?}: {}", name, e);
                self.event_bus
                    .emit(TempArtifactCleanupFailed::new(name, e.to_string()));
            }
        }
    }

    fn set_state(&self, next: IntakeState) {
        let previous = {
            let mut state = self.lock_state();
            if *state == next {
                return;
            }
            std::mem::replace(&mut *state, next.clone())
        };
        log::info!("Intake {} -> {}", previous.kind(), next.kind());
        self.event_bus
            .emit(IntakeStateChanged::new(previous, next));
    }

    fn lock_state(&self) -> MutexGuard<'_, IntakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_artifact(&self) -> MutexGuard<'_, Option<String>> {
        self.pending_artifact
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
