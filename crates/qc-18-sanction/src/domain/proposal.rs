//! Governance proposal view
//!
//! The governance state machine is owned elsewhere. This is the subset the
//! lifecycle hook reads.

use super::coins::Coins;
use super::messages::{MsgSanction, MsgUnsanction, MsgUpdateParams};
use serde::{Deserialize, Serialize};

/// Proposal status as reported by governance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    Unspecified,
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
}

impl ProposalStatus {
    /// Map the raw status value. Unknown values have no mapping.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Unspecified),
            1 => Some(Self::DepositPeriod),
            2 => Some(Self::VotingPeriod),
            3 => Some(Self::Passed),
            4 => Some(Self::Rejected),
            5 => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::DepositPeriod => 1,
            Self::VotingPeriod => 2,
            Self::Passed => 3,
            Self::Rejected => 4,
            Self::Failed => 5,
        }
    }
}

/// A message carried by a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalMessage {
    Sanction(MsgSanction),
    Unsanction(MsgUnsanction),
    UpdateParams(MsgUpdateParams),
    /// Legacy content envelope. Its payload is never inspected by the hook.
    ExecLegacyContent(Box<ProposalMessage>),
    /// Any message kind belonging to another module.
    Other { type_url: String },
}

/// Proposal snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    /// Raw status value; see [`ProposalStatus::from_raw`].
    pub status: i32,
    pub messages: Vec<ProposalMessage>,
    pub total_deposit: Coins,
}

impl Proposal {
    pub fn new(id: u64, status: ProposalStatus, messages: Vec<ProposalMessage>) -> Self {
        Self {
            id,
            status: status.as_raw(),
            messages,
            total_deposit: Coins::empty(),
        }
    }

    pub fn with_deposit(mut self, deposit: Coins) -> Self {
        self.total_deposit = deposit;
        self
    }
}
