//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports, used by tests and
//! local tooling. A host chain supplies its own store, governance and bank.

mod bank;
mod governance;
pub mod memory_store;

pub use bank::{BankError, InMemoryBank};
pub use governance::InMemoryGovernance;
pub use memory_store::{prefix_end, InMemoryKvStore};
