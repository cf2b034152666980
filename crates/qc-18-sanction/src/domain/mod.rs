//! Domain layer for the Sanction subsystem
//!
//! Value types, governance messages and the byte-exact key codec.

pub mod address;
pub mod coins;
pub mod entities;
pub mod genesis;
pub mod keys;
pub mod messages;
pub mod proposal;

pub use address::{Address, AddressError, MAX_ADDRESS_LEN};
pub use coins::{Coin, Coins, CoinsError};
pub use entities::{Params, TempStatus, TemporaryEntry, SANCTION_B, UNSANCTION_B};
pub use genesis::GenesisState;
pub use messages::{MsgSanction, MsgUnsanction, MsgUpdateParams};
pub use proposal::{Proposal, ProposalMessage, ProposalStatus};
