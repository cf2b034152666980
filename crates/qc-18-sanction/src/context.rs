//! Transaction-scoped context
//!
//! Carries everything one call into the subsystem may touch: the ambient
//! store, the event buffer and the send-restriction bypass flag.

use crate::events::{EventManager, SanctionEvent};
use crate::ports::KvStore;

/// One transaction's view of the subsystem state.
#[derive(Debug)]
pub struct TxContext<S: KvStore> {
    store: S,
    events: EventManager,
    bypass_sanction_restriction: bool,
}

impl<S: KvStore> TxContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            events: EventManager::new(),
            bypass_sanction_restriction: false,
        }
    }

    /// Same context with the send-restriction bypass set.
    ///
    /// Used by privileged internal transfers (module accounts, fee refunds).
    pub fn with_bypass_sanction_restriction(mut self, bypass: bool) -> Self {
        self.bypass_sanction_restriction = bypass;
        self
    }

    pub fn set_bypass_sanction_restriction(&mut self, bypass: bool) {
        self.bypass_sanction_restriction = bypass;
    }

    pub fn has_bypass_sanction_restriction(&self) -> bool {
        self.bypass_sanction_restriction
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn emit(&mut self, event: SanctionEvent) {
        self.events.emit(event);
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Release the store, discarding buffered events.
    pub fn into_store(self) -> S {
        self.store
    }
}
