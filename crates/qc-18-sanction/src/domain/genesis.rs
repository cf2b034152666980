//! Genesis snapshot

use super::address::Address;
use super::entities::{Params, TemporaryEntry};
use crate::error::{SanctionError, SanctionResult};
use serde::{Deserialize, Serialize};

/// Import/export state of the subsystem.
///
/// `params: None` means the configured defaults apply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default)]
    pub params: Option<Params>,
    #[serde(default)]
    pub sanctioned_addresses: Vec<String>,
    #[serde(default)]
    pub temporary_entries: Vec<TemporaryEntry>,
}

impl GenesisState {
    pub fn new(
        params: Option<Params>,
        sanctioned_addresses: Vec<String>,
        temporary_entries: Vec<TemporaryEntry>,
    ) -> Self {
        Self {
            params,
            sanctioned_addresses,
            temporary_entries,
        }
    }

    /// Check every field without touching state.
    pub fn validate(&self) -> SanctionResult<()> {
        if let Some(params) = &self.params {
            params
                .validate()
                .map_err(|reason| SanctionError::InvalidParams { reason })?;
        }

        for (i, addr) in self.sanctioned_addresses.iter().enumerate() {
            Address::parse(addr).map_err(|e| {
                SanctionError::invalid_address(format!("sanctioned addresses[{i}]"), addr, e)
            })?;
        }

        for (i, entry) in self.temporary_entries.iter().enumerate() {
            let field = format!("temporary entries[{i}]");
            Address::parse(&entry.address)
                .map_err(|e| SanctionError::invalid_address(field.clone(), &entry.address, e))?;
            if !entry.status.is_specified() {
                return Err(SanctionError::InvalidTempStatus {
                    field,
                    status: entry.status,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coins::{Coin, Coins};
    use crate::domain::entities::TempStatus;

    fn addr_str(s: &str) -> String {
        Address::new(s.as_bytes().to_vec()).unwrap().to_string()
    }

    fn good_state() -> GenesisState {
        GenesisState::new(
            Some(Params::new(
                Coins::parse_normalized("5dolla").unwrap(),
                Coins::parse_normalized("50cent").unwrap(),
            )),
            (0..5).map(|i| addr_str(&format!("sanct_addr_{i}"))).collect(),
            (0..5)
                .map(|i| TemporaryEntry {
                    address: addr_str(&format!("temp_addr_{i}")),
                    proposal_id: i + 1,
                    status: if i % 2 == 0 {
                        TempStatus::Sanctioned
                    } else {
                        TempStatus::Unsanctioned
                    },
                })
                .collect(),
        )
    }

    fn assert_err_contains(err: SanctionError, parts: &[&str]) {
        let msg = err.to_string();
        for part in parts {
            assert!(msg.contains(part), "{msg:?} does not contain {part:?}");
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(GenesisState::default().validate().is_ok());
        assert!(good_state().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_params() {
        let mut state = good_state();
        state.params = Some(Params::new(
            Coins::from(vec![Coin::new("dcoin", 1), Coin::new("dcoin", 2)]),
            Coins::empty(),
        ));
        assert_err_contains(
            state.validate().unwrap_err(),
            &[
                "invalid params",
                "invalid immediate sanction min deposit",
                "duplicate denomination dcoin",
            ],
        );
    }

    #[test]
    fn test_validate_invalid_address() {
        let mut state = good_state();
        state.sanctioned_addresses[2] = "not1avalidaddr2".into();
        assert_err_contains(
            state.validate().unwrap_err(),
            &["invalid address", "sanctioned addresses[2]", "\"not1avalidaddr2\""],
        );
    }

    #[test]
    fn test_validate_invalid_temp_entry() {
        let mut state = good_state();
        state.temporary_entries[0].status = TempStatus::Unspecified;
        assert_err_contains(
            state.validate().unwrap_err(),
            &["temporary entries[0]", "TEMP_STATUS_UNSPECIFIED", "invalid temp status"],
        );

        let mut state = good_state();
        state.temporary_entries[4].address = "Woops. This isn't right.".into();
        assert_err_contains(
            state.validate().unwrap_err(),
            &["temporary entries[4]", "\"Woops. This isn't right.\"", "invalid address"],
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(good_state()).unwrap();
        assert_eq!(json["params"]["immediate_sanction_min_deposit"], "5dolla");
        assert_eq!(json["temporary_entries"][1]["status"], "TEMP_STATUS_UNSANCTIONED");

        let empty: GenesisState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GenesisState::default());
    }
}
