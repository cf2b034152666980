//! Ports module for the Sanction subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::{GovHooks, SendRestriction};
pub use outbound::{
    BankKeeper, BatchOperation, GovernanceReader, KvIter, KvPair, KvStore, ScanOrder,
};
