//! In-memory ordered store
//!
//! Implements the `KvStore` port on a `BTreeMap`, which gives the
//! byte-lexicographic ordering and O(log n) range seeks the ledger relies on.

use crate::error::StoreError;
use crate::ports::outbound::{BatchOperation, KvIter, KvStore, ScanOrder};
use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory key-value store for unit tests and local tooling.
#[derive(Clone, Debug, Default)]
pub struct InMemoryKvStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Smallest key strictly greater than every key starting with `prefix`,
/// or `None` when the prefix is empty or all `0xff`.
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan<'a>(
        &'a self,
        prefix: &[u8],
        order: ScanOrder,
    ) -> Result<KvIter<'a>, StoreError> {
        let end = prefix_end(prefix);
        let upper = match &end {
            Some(end) => Bound::Excluded(end.as_slice()),
            None => Bound::Unbounded,
        };
        let range = self
            .data
            .range::<[u8], _>((Bound::Included(prefix), upper))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(match order {
            ScanOrder::Forward => Box::new(range),
            ScanOrder::Reverse => Box::new(range.rev()),
        })
    }
}
