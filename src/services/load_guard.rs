// src/services/load_guard.rs
//
// In-flight admission guard.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::IntakeOrigin;

/// Identity of the request currently holding the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: Uuid,
    pub label: String,
    pub origin: IntakeOrigin,
}

/// At most one admitted candidate at a time.
///
/// Acquisition is a single check-and-set under the lock, so two
/// continuations racing for it cannot both win. Only the ticket that
/// acquired the guard can release it.
#[derive(Debug, Default)]
pub struct LoadGuard {
    in_flight: Mutex<Option<LoadTicket>>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<LoadTicket>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_acquire(&self, label: &str, origin: IntakeOrigin) -> Option<LoadTicket> {
        let mut slot = self.slot();
        if slot.is_some() {
            return None;
        }
        let ticket = LoadTicket {
            id: Uuid::new_v4(),
            label: label.to_string(),
            origin,
        };
        *slot = Some(ticket.clone());
        Some(ticket)
    }

    /// Clear the guard if `ticket_id` still holds it.
    pub fn release(&self, ticket_id: Uuid) -> bool {
        let mut slot = self.slot();
        match slot.as_ref() {
            Some(ticket) if ticket.id == ticket_id => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Release after `delay`, absorbing trailing duplicate platform events.
    pub fn release_after(self: &Arc<Self>, ticket_id: Uuid, delay: Duration) {
        if delay.is_zero() {
            self.release(ticket_id);
            return;
        }
        let guard = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if guard.release(ticket_id) {
                log::trace!("Load guard released after {:?} debounce", delay);
            }
        });
    }

    pub fn is_held(&self) -> bool {
        self.slot().is_some()
    }

    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.slot().clone()
    }
}
