//! Read API
//!
//! List queries page through one key prefix. A page is addressed either by
//! `key` (the key suffix after the prefix, as returned in `next_key`) or by
//! `offset`, never both.

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::keys;
use crate::domain::{Address, Params, TemporaryEntry};
use crate::error::{SanctionError, SanctionResult};
use crate::ports::outbound::{GovernanceReader, KvStore, ScanOrder};
use serde::{Deserialize, Serialize};

/// Page size used when a request leaves `limit` at zero.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub key: Option<Vec<u8>>,
    pub offset: u64,
    pub limit: u64,
    /// Only honoured for offset-based requests.
    pub count_total: bool,
    pub reverse: bool,
}

impl PageRequest {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    fn effective_limit(&self) -> usize {
        let limit = if self.limit == 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit
        };
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Key to pass in the next request; `None` on the last page.
    pub next_key: Option<Vec<u8>>,
    pub total: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsSanctionedResponse {
    pub is_sanctioned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionedAddressesResponse {
    pub addresses: Vec<String>,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryEntriesResponse {
    pub entries: Vec<TemporaryEntry>,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsResponse {
    pub params: Params,
}

/// Collect one page of `prefix`, mapping each full key and value with `map`.
fn paginate<S, T, F>(
    store: &S,
    prefix: &[u8],
    page: &PageRequest,
    mut map: F,
) -> SanctionResult<(Vec<T>, PageResponse)>
where
    S: KvStore,
    F: FnMut(&[u8], &[u8]) -> SanctionResult<T>,
{
    if page.key.is_some() && page.offset > 0 {
        return Err(SanctionError::InvalidRequest(
            "either offset or key is expected, got both".to_string(),
        ));
    }

    let limit = page.effective_limit();
    let order = if page.reverse {
        ScanOrder::Reverse
    } else {
        ScanOrder::Forward
    };
    let iter = store.prefix_scan(prefix, order)?;
    let mut items = Vec::new();
    let mut next_key = None;

    if let Some(start) = &page.key {
        let start = [prefix, start.as_slice()].concat();
        let before_start = |k: &[u8]| {
            if page.reverse {
                k > start.as_slice()
            } else {
                k < start.as_slice()
            }
        };
        for (key, value) in iter.skip_while(|(k, _)| before_start(k.as_slice())) {
            if items.len() == limit {
                next_key = Some(key[prefix.len()..].to_vec());
                break;
            }
            items.push(map(&key, &value)?);
        }
        return Ok((
            items,
            PageResponse {
                next_key,
                total: None,
            },
        ));
    }

    let mut seen = 0u64;
    for (key, value) in iter {
        seen += 1;
        if seen <= page.offset {
            continue;
        }
        if items.len() < limit {
            items.push(map(&key, &value)?);
            continue;
        }
        if next_key.is_none() {
            next_key = Some(key[prefix.len()..].to_vec());
        }
        if !page.count_total {
            break;
        }
    }
    Ok((
        items,
        PageResponse {
            next_key,
            total: page.count_total.then_some(seen),
        },
    ))
}

fn parse_query_address(address: &str) -> SanctionResult<Address> {
    Address::parse(address).map_err(|e| SanctionError::invalid_address("address", address, e))
}

impl<G: GovernanceReader> SanctionService<G> {
    pub fn query_is_sanctioned<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        address: &str,
    ) -> SanctionResult<IsSanctionedResponse> {
        if address.is_empty() {
            return Err(SanctionError::InvalidRequest(
                "address cannot be empty".to_string(),
            ));
        }
        let addr = parse_query_address(address)?;
        Ok(IsSanctionedResponse {
            is_sanctioned: self.is_sanctioned_addr(ctx, &addr)?,
        })
    }

    /// Permanently sanctioned addresses. Temporary entries are not applied.
    pub fn query_sanctioned_addresses<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        page: Option<&PageRequest>,
    ) -> SanctionResult<SanctionedAddressesResponse> {
        let page = page.cloned().unwrap_or_default();
        let (addresses, pagination) = paginate(
            ctx.store(),
            &[keys::SANCTIONED_PREFIX],
            &page,
            |key, _| Ok(keys::parse_sanctioned_addr_key(key)?.to_string()),
        )?;
        Ok(SanctionedAddressesResponse {
            addresses,
            pagination,
        })
    }

    /// Temporary entries, optionally for a single address. An empty
    /// address string means all addresses.
    pub fn query_temporary_entries<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        address: Option<&str>,
        page: Option<&PageRequest>,
    ) -> SanctionResult<TemporaryEntriesResponse> {
        let addr = match address {
            Some(a) if !a.is_empty() => Some(parse_query_address(a)?),
            _ => None,
        };
        let prefix = keys::create_temporary_addr_prefix(addr.as_ref());
        let page = page.cloned().unwrap_or_default();
        let (entries, pagination) = paginate(ctx.store(), &prefix, &page, |key, value| {
            let (addr, proposal_id) = keys::parse_temporary_key(key)?;
            Ok(TemporaryEntry::new(&addr, proposal_id, keys::to_temp_status(value)))
        })?;
        Ok(TemporaryEntriesResponse {
            entries,
            pagination,
        })
    }

    pub fn query_params<S: KvStore>(&self, ctx: &TxContext<S>) -> SanctionResult<ParamsResponse> {
        Ok(ParamsResponse {
            params: self.get_params(ctx)?,
        })
    }
}
