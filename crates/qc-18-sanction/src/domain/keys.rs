//! Key codec
//!
//! Four single-byte prefixes partition the keyspace:
//!
//! | Family | Layout |
//! |--------|--------|
//! | Param | `0x00` + name |
//! | Permanent | `0x01` + len + addr |
//! | Temporary | `0x02` + len + addr + id (8 bytes, big-endian) |
//! | Proposal index | `0x03` + id (8 bytes, big-endian) + len + addr |
//!
//! Temporary keys are address-major so that one reverse seek inside an
//! address's prefix lands on its highest proposal id. Proposal index keys
//! are proposal-major so a forward scan enumerates one proposal's addresses.
//!
//! Decoding a key shorter than its layout requires is an invariant
//! violation: these keys are only ever read back from our own store.

use super::address::Address;
use super::entities::{TempStatus, SANCTION_B, UNSANCTION_B};
use crate::error::InvariantViolation;

pub const PARAMS_PREFIX: u8 = 0x00;
pub const SANCTIONED_PREFIX: u8 = 0x01;
pub const TEMPORARY_PREFIX: u8 = 0x02;
pub const PROPOSAL_INDEX_PREFIX: u8 = 0x03;

pub const PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT: &str = "immediate_sanction_min_deposit";
pub const PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT: &str = "immediate_unsanction_min_deposit";

const ID_LEN: usize = 8;

/// Capacity reserved for a proposal index prefix: prefix, id, length byte
/// and a 32-byte address.
const PROPOSAL_INDEX_KEY_CAP: usize = 1 + ID_LEN + 1 + 32;

/// Concatenate two byte slices into an exactly-sized buffer.
pub fn concat_bz(bz1: &[u8], bz2: &[u8]) -> Vec<u8> {
    concat_bz_plus_cap(bz1, bz2, 0)
}

/// Concatenate two byte slices, reserving `extra_cap` more bytes for a
/// suffix the caller is about to append.
pub fn concat_bz_plus_cap(bz1: &[u8], bz2: &[u8], extra_cap: usize) -> Vec<u8> {
    let mut rv = Vec::with_capacity(bz1.len() + bz2.len() + extra_cap);
    rv.extend_from_slice(bz1);
    rv.extend_from_slice(bz2);
    rv
}

fn length_prefixed(addr: &Address) -> Vec<u8> {
    let mut rv = Vec::with_capacity(1 + addr.len());
    // Address::new bounds the length to one byte.
    rv.push(addr.len() as u8);
    rv.extend_from_slice(addr.as_bytes());
    rv
}

/// Split a length-prefixed address off the front of `bz`.
///
/// Returns the address bytes and whatever follows them (possibly empty).
pub fn parse_length_prefixed_bz(bz: &[u8]) -> Result<(&[u8], &[u8]), InvariantViolation> {
    let Some((&len, rest)) = bz.split_first() else {
        return Err(InvariantViolation::KeyTooShort {
            expected: 1,
            actual: 0,
        });
    };
    let len = len as usize;
    if rest.len() < len {
        return Err(InvariantViolation::KeyTooShort {
            expected: 1 + len,
            actual: bz.len(),
        });
    }
    Ok(rest.split_at(len))
}

fn strip_family(key: &[u8]) -> Result<&[u8], InvariantViolation> {
    key.get(1..).ok_or(InvariantViolation::KeyTooShort {
        expected: 1,
        actual: 0,
    })
}

fn read_id(bz: &[u8]) -> Option<u64> {
    let id: [u8; ID_LEN] = bz.get(..ID_LEN)?.try_into().ok()?;
    Some(u64::from_be_bytes(id))
}

/// `0x00` + name
pub fn create_param_key(name: &str) -> Vec<u8> {
    concat_bz(&[PARAMS_PREFIX], name.as_bytes())
}

pub fn parse_param_key(key: &[u8]) -> Result<String, InvariantViolation> {
    let name = strip_family(key)?;
    Ok(String::from_utf8_lossy(name).into_owned())
}

/// `0x01` + len + addr
pub fn create_sanctioned_addr_key(addr: &Address) -> Vec<u8> {
    concat_bz(&[SANCTIONED_PREFIX], &length_prefixed(addr))
}

pub fn parse_sanctioned_addr_key(key: &[u8]) -> Result<Address, InvariantViolation> {
    let (addr, _) = parse_length_prefixed_bz(strip_family(key)?)?;
    Ok(Address::from_trusted(addr))
}

/// Prefix of every temporary entry, or of one address's entries.
///
/// With an address, 8 extra bytes are reserved for the id suffix.
pub fn create_temporary_addr_prefix(addr: Option<&Address>) -> Vec<u8> {
    match addr {
        Some(addr) => concat_bz_plus_cap(&[TEMPORARY_PREFIX], &length_prefixed(addr), ID_LEN),
        None => vec![TEMPORARY_PREFIX],
    }
}

/// `0x02` + len + addr + id
pub fn create_temporary_key(addr: &Address, proposal_id: u64) -> Vec<u8> {
    let mut key = create_temporary_addr_prefix(Some(addr));
    key.extend_from_slice(&proposal_id.to_be_bytes());
    key
}

pub fn parse_temporary_key(key: &[u8]) -> Result<(Address, u64), InvariantViolation> {
    let (addr, suffix) = parse_length_prefixed_bz(strip_family(key)?)?;
    let id = read_id(suffix).ok_or(InvariantViolation::KeyTooShort {
        expected: key.len() - suffix.len() + ID_LEN,
        actual: key.len(),
    })?;
    Ok((Address::from_trusted(addr), id))
}

/// Prefix of every index entry, or of one proposal's entries.
pub fn create_proposal_temp_index_prefix(proposal_id: Option<u64>) -> Vec<u8> {
    match proposal_id {
        Some(id) => {
            let mut rv = Vec::with_capacity(PROPOSAL_INDEX_KEY_CAP);
            rv.push(PROPOSAL_INDEX_PREFIX);
            rv.extend_from_slice(&id.to_be_bytes());
            rv
        }
        None => vec![PROPOSAL_INDEX_PREFIX],
    }
}

/// `0x03` + id + len + addr
pub fn create_proposal_temp_index_key(proposal_id: u64, addr: &Address) -> Vec<u8> {
    let mut key = create_proposal_temp_index_prefix(Some(proposal_id));
    key.extend_from_slice(&length_prefixed(addr));
    key
}

pub fn parse_proposal_temp_index_key(key: &[u8]) -> Result<(u64, Address), InvariantViolation> {
    let too_short = InvariantViolation::KeyTooShort {
        expected: 1 + ID_LEN,
        actual: key.len(),
    };
    let id = key.get(1..).and_then(read_id).ok_or(too_short)?;
    let (addr, _) = parse_length_prefixed_bz(&key[1 + ID_LEN..])?;
    Ok((id, Address::from_trusted(addr)))
}

/// True if `bz` is exactly the sanction marker.
pub fn is_sanction_bz(bz: &[u8]) -> bool {
    bz == [SANCTION_B]
}

/// True if `bz` is exactly the unsanction marker.
pub fn is_unsanction_bz(bz: &[u8]) -> bool {
    bz == [UNSANCTION_B]
}

pub fn to_temp_status(bz: &[u8]) -> TempStatus {
    TempStatus::from_value(bz)
}
