//! Per-transaction event buffer

use super::outgoing::SanctionEvent;

/// Collects events emitted during one transaction.
///
/// While muted, emitted events are dropped (genesis import).
#[derive(Debug, Default)]
pub struct EventManager {
    events: Vec<SanctionEvent>,
    muted: bool,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: SanctionEvent) {
        if !self.muted {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[SanctionEvent] {
        &self.events
    }

    /// Hand the buffered events to the caller, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<SanctionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}
