// src/domain/teams.rs
use serde::{Deserialize, Serialize};
use super::core::{AmountValue, TeamId};

/// A team budget holds one fixed total balance against which both winning
/// bids and raise fees are committed. `committed_spend + committed_fees`
/// never exceeds `total_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "id")]
    pub team_id: TeamId,
    pub name: String,
    #[serde(rename = "totalBalance")]
    pub total_balance: AmountValue,
    #[serde(rename = "committedSpend")]
    pub committed_spend: AmountValue,
    #[serde(rename = "committedFees")]
    pub committed_fees: AmountValue,
}

impl Team {
    pub fn new(name: impl Into<String>, total_balance: AmountValue) -> Self {
        Team {
            team_id: TeamId::new_v4(),
            name: name.into(),
            total_balance,
            committed_spend: 0,
            committed_fees: 0,
        }
    }

    /// Funds already obligated: won bids plus non-refundable raise fees.
    pub fn committed(&self) -> AmountValue {
        self.committed_spend + self.committed_fees
    }

    /// Spendable balance.
    pub fn remaining(&self) -> AmountValue {
        self.total_balance - self.committed()
    }

    pub fn can_afford(&self, amount: AmountValue) -> bool {
        self.remaining() >= amount
    }
}
