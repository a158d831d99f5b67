// src/services/viewer_handoff.rs
//
// Viewer Hand-off
//
// Holds delivered files until the viewer front-end fetches them.
// Each file is taken exactly once; only the latest unfetched file is kept.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::events::{EventBus, FileDelivered};
use crate::services::intake_service::FileReadyConsumer;

/// A delivered file waiting for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedFile {
    pub id: Uuid,
    pub name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl OpenedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub struct ViewerHandoff {
    files: Mutex<HashMap<Uuid, OpenedFile>>,
    event_bus: Arc<EventBus>,
}

impl ViewerHandoff {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            event_bus,
        }
    }

    /// Remove and return a delivered file.
    pub fn take(&self, id: Uuid) -> Option<OpenedFile> {
        let taken = self.lock().remove(&id);
        if taken.is_none() {
            log::debug!("No opened file with id {}", id);
        }
        taken
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, OpenedFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileReadyConsumer for ViewerHandoff {
    fn on_file_ready(&self, name: &str, bytes: Vec<u8>) {
        let file = OpenedFile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bytes,
        };
        let event = FileDelivered::new(file.id, file.name.clone(), file.size());

        // Stored before the event goes out so a listener can take it at once.
        {
            let mut files = self.lock();
            if !files.is_empty() {
                log::info!(
                    "Replacing {} unfetched file(s) with {:?}",
                    files.len(),
                    file.name
                );
                files.clear();
            }
            files.insert(file.id, file);
        }
        self.event_bus.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivered_file_is_taken_once() {
        let bus = Arc::new(EventBus::new());
        let handoff = ViewerHandoff::new(bus.clone());
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let seen = delivered.clone();
        bus.subscribe::<FileDelivered, _>(move |event| {
            seen.lock().unwrap().push(event.file_id);
        });

        handoff.on_file_ready("scan.nxs", vec![1, 2, 3]);

        let ids = delivered.lock().unwrap().clone();
        assert_eq!(ids.len(), 1);

        let file = handoff.take(ids[0]).unwrap();
        assert_eq!(file.name, "scan.nxs");
        assert_eq!(file.bytes, vec![1, 2, 3]);

        assert!(handoff.take(ids[0]).is_none());
        assert_eq!(handoff.pending_count(), 0);
    }

    #[test]
    fn test_newer_delivery_replaces_unfetched_file() {
        let bus = Arc::new(EventBus::new());
        let handoff = ViewerHandoff::new(bus.clone());
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let seen = delivered.clone();
        bus.subscribe::<FileDelivered, _>(move |event| {
            seen.lock().unwrap().push(event.file_id);
        });

        handoff.on_file_ready("launch.h5", vec![0; 64]);
        handoff.on_file_ready("dropped.nxs", vec![1; 8]);

        let ids = delivered.lock().unwrap().clone();
        assert_eq!(handoff.pending_count(), 1);
        assert!(handoff.take(ids[0]).is_none());
        assert_eq!(handoff.take(ids[1]).unwrap().name, "dropped.nxs");
    }

    #[test]
    fn test_unknown_id_yields_nothing() {
        let handoff = ViewerHandoff::new(Arc::new(EventBus::new()));
        assert!(handoff.take(Uuid::new_v4()).is_none());
    }
}
