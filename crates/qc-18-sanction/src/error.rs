//! Error types for the Sanction subsystem
//!
//! ## Error Families
//!
//! | Family | Examples | Handling |
//! |--------|----------|----------|
//! | Validation | malformed address, bad temp status, bad params | returned to caller |
//! | Policy | unsanctionable target, sanctioned sender | returned to caller |
//! | Invariant | short key, unknown stored byte, unknown proposal status | abort the transaction |
//!
//! Invariant violations are never masked: replicas that silently continue on
//! corrupted state would diverge. The host runtime checks
//! [`SanctionError::is_fatal`] and discards the whole transaction.

use crate::domain::{Address, AddressError, TempStatus};
use thiserror::Error;

/// Failure reported by the underlying ordered key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend I/O or consistency failure.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// State corruption or a missed case. Never recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A stored key is shorter than its structurally required length.
    #[error("expected key of length at least {expected}, got {actual}")]
    KeyTooShort { expected: usize, actual: usize },

    /// A stored temporary entry holds a value byte that is neither marker.
    #[error("unknown temp value byte: {0:x}")]
    UnknownTempValue(u8),

    /// A stored temporary entry value is not exactly one byte.
    #[error("temp value must be exactly 1 byte, got {0}")]
    InvalidTempValueLength(usize),

    /// The governance collaborator reported a status this subsystem does not handle.
    #[error("invalid governance proposal status: [{0}]")]
    UnknownProposalStatus(i32),

    /// The params table contains a name this subsystem never writes.
    #[error("unhandled param name: {0:?}")]
    UnknownParamName(String),

    /// A message inside an accepted proposal no longer decodes.
    #[error("invalid message in governance proposal {proposal_id}: {reason}")]
    InvalidProposalMessage { proposal_id: u64, reason: String },

    /// A genesis snapshot failed validation or could not be applied.
    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),
}

/// Sanction subsystem errors
#[derive(Debug, Error)]
pub enum SanctionError {
    /// Attempt to sanction an address from the unsanctionable set.
    #[error("address cannot be sanctioned: {address}")]
    UnsanctionableAddr { address: Address },

    /// Attempt to send funds from a sanctioned address.
    #[error("account is sanctioned: cannot send from {address}")]
    SanctionedAccount { address: Address },

    /// An address string failed to decode.
    #[error("invalid address: {field} {value:?}: {source}")]
    InvalidAddress {
        field: String,
        value: String,
        #[source]
        source: AddressError,
    },

    /// A temporary entry in untrusted input has no usable status.
    #[error("invalid temp status: {field}: {status}")]
    InvalidTempStatus { field: String, status: TempStatus },

    /// Parameter values failed validation.
    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },

    /// A governance-only message was signed by someone else.
    #[error(
        "expected gov account as only signer for proposal message; invalid authority: expected {expected:?}, got {actual:?}"
    )]
    InvalidAuthority { expected: String, actual: String },

    /// Malformed request (queries, pagination).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Fatal: abort the surrounding transaction.
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl SanctionError {
    /// Build an [`SanctionError::InvalidAddress`] for `field` holding `value`.
    pub fn invalid_address(
        field: impl Into<String>,
        value: impl Into<String>,
        source: AddressError,
    ) -> Self {
        Self::InvalidAddress {
            field: field.into(),
            value: value.into(),
            source,
        }
    }

    /// True when the error signals corrupted state rather than a rejected request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    /// The invariant violation carried by a fatal error.
    pub fn as_invariant(&self) -> Option<&InvariantViolation> {
        match self {
            Self::Invariant(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Result type for sanction operations
pub type SanctionResult<T> = Result<T, SanctionError>;
