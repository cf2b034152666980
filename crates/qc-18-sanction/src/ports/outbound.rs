//! Driven Ports (SPI - Outbound Dependencies)

use crate::context::TxContext;
use crate::domain::{Address, Coins, Proposal};
use crate::error::StoreError;
use crate::ports::inbound::SendRestriction;
use std::sync::Arc;

/// Key-value pair yielded by a scan.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Lazy scan over a key range.
pub type KvIter<'a> = Box<dyn Iterator<Item = KvPair> + 'a>;

/// One write in an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }

    /// Key this operation touches.
    pub fn key(&self) -> &[u8] {
        match self {
            BatchOperation::Put { key, .. } | BatchOperation::Delete { key } => key,
        }
    }
}

/// Direction of a prefix scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Ascending byte-lexicographic key order.
    #[default]
    Forward,
    /// Descending byte-lexicographic key order.
    Reverse,
}

/// Ordered byte store owned by the ambient transaction.
///
/// Production: the host chain's transactional store.
/// Testing: `InMemoryKvStore`.
///
/// Iteration order must be strictly byte-lexicographic: every replica has to
/// observe the same order.
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a single key-value pair.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    /// Apply `operations` in order.
    ///
    /// Either every operation is applied or none is.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Lazily iterate over all keys starting with `prefix`.
    ///
    /// A reverse scan must position on the last key of the range without
    /// walking the rest of it.
    fn prefix_scan<'a>(&'a self, prefix: &[u8], order: ScanOrder)
        -> Result<KvIter<'a>, StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        (**self).atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        (**self).exists(key)
    }

    fn prefix_scan<'a>(
        &'a self,
        prefix: &[u8],
        order: ScanOrder,
    ) -> Result<KvIter<'a>, StoreError> {
        (**self).prefix_scan(prefix, order)
    }
}

/// Read access to the governance module.
///
/// The proposal state machine itself lives elsewhere; the lifecycle hook
/// only ever reads the current snapshot of a proposal.
pub trait GovernanceReader: Send + Sync {
    /// Proposal by id, or `None` if governance does not know it (anymore).
    fn get_proposal(&self, proposal_id: u64) -> Option<Proposal>;
}

/// Funds-movement module consuming the send-restriction gate.
pub trait BankKeeper<S: KvStore>: Send + Sync {
    type Error: std::error::Error;

    /// Install the gate consulted for every input of every transfer.
    fn register_send_restriction(&self, restriction: Arc<dyn SendRestriction<S>>);

    /// Move `amount` from `from` to `to`.
    fn send_coins(
        &self,
        ctx: &TxContext<S>,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), Self::Error>;

    /// Multi-leg transfer. Every input is checked against the gate.
    fn input_output_coins(
        &self,
        ctx: &TxContext<S>,
        inputs: &[(Address, Coins)],
        outputs: &[(Address, Coins)],
    ) -> Result<(), Self::Error>;

    /// Coins `addr` can currently spend.
    fn spendable_coins(&self, addr: &Address) -> Coins;
}
