//! Events module for the Sanction subsystem

pub mod manager;
pub mod outgoing;

pub use manager::EventManager;
pub use outgoing::SanctionEvent;
