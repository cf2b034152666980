//! # QC-18 Sanction
//!
//! Sanction ledger for a governed chain: addresses that may not be the
//! source of a funds transfer.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure types and the key codec, no I/O
//!   - `Address`, `Coins`, `Params`, `TempStatus`, `TemporaryEntry`
//!   - `keys`: byte layout of every stored entry
//!   - `GenesisState`: import/export snapshot
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SendRestriction`, `GovHooks`: driving ports implemented by the service
//!   - `KvStore`, `GovernanceReader`, `BankKeeper`: driven ports
//!
//! - **Service Layer** (`service/`): `SanctionService`
//!
//! - **Events Layer** (`events/`): `SanctionEvent`, `EventManager`
//!
//! - **Adapters Layer** (`adapters/`): in-memory store, governance and bank
//!
//! ## Resolution
//!
//! An address is sanctioned when its temporary entry with the highest
//! proposal id is a sanction, or when it has no temporary entry and a
//! permanent entry exists. Addresses in the configured unsanctionable set
//! are never sanctioned.
//!
//! ## Invariants
//!
//! - Every temporary entry `(addr, id)` has a proposal index mirror `(id, addr)`
//!   with the same value, and vice versa.
//! - Iteration is byte-lexicographic over encoded keys.
//! - Corrupted stored state surfaces as a fatal [`SanctionError::Invariant`].
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_sanction::{InMemoryGovernance, InMemoryKvStore, SanctionConfig, SanctionService, TxContext};
//! use std::sync::Arc;
//!
//! let service = SanctionService::new(SanctionConfig::from_env(), Arc::new(InMemoryGovernance::new()));
//! let mut ctx = TxContext::new(InMemoryKvStore::new());
//!
//! service.sanction_addresses(&mut ctx, &[bad_actor.clone()])?;
//! assert!(service.is_sanctioned_addr(&ctx, &bad_actor)?);
//! ```

pub mod adapters;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::{BankError, InMemoryBank, InMemoryGovernance, InMemoryKvStore};
pub use config::{ConfigError, SanctionConfig, DEFAULT_AUTHORITY};
pub use context::TxContext;
pub use domain::{
    Address, AddressError, Coin, Coins, GenesisState, MsgSanction, MsgUnsanction,
    MsgUpdateParams, Params, Proposal, ProposalMessage, ProposalStatus, TempStatus,
    TemporaryEntry,
};
pub use error::{InvariantViolation, SanctionError, SanctionResult, StoreError};
pub use events::{EventManager, SanctionEvent};
pub use ports::{
    BankKeeper, BatchOperation, GovHooks, GovernanceReader, KvStore, ScanOrder, SendRestriction,
};
pub use service::queries::{PageRequest, PageResponse};
pub use service::SanctionService;
