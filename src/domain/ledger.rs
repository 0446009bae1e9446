// src/domain/ledger.rs
//
// Budget ledger rules. All mutations go through `apply_charge`, which a
// store must run as one atomic read-modify-write per team so concurrent
// raises cannot lose updates.
use serde::{Deserialize, Serialize};
use super::core::{AmountValue, Errors};
use super::teams::Team;

pub const RAISE_FEE_THRESHOLD: AmountValue = 20_000;
pub const RAISE_FEE_LOW: AmountValue = 2_000;
pub const RAISE_FEE_HIGH: AmountValue = 5_000;

/// Fee owed for one successful raise, evaluated against the team's committed
/// total at the moment of the raise.
pub fn raise_fee(committed: AmountValue) -> AmountValue {
    if committed >= RAISE_FEE_THRESHOLD {
        RAISE_FEE_HIGH
    } else {
        RAISE_FEE_LOW
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charge {
    /// Non-refundable fee for one successful raise. The amount is computed
    /// from the team's state inside the atomic charge, never from a cached
    /// value.
    RaiseFee,
    /// Settlement of the winning bid on confirmation. No additional fee.
    WinningBid(AmountValue),
    /// Rollback arm for a settlement whose player update failed after the
    /// team was already charged. Not a fee refund.
    ReleaseWinningBid(AmountValue),
}

/// Applies a charge to a team, returning the amount moved. Fails without
/// mutating when the team cannot cover it, so
/// `committed_spend + committed_fees <= total_balance` holds after every call.
pub fn apply_charge(team: &mut Team, charge: Charge) -> Result<AmountValue, Errors> {
    match charge {
        Charge::RaiseFee => {
            let fee = raise_fee(team.committed());
            if !team.can_afford(fee) {
                return Err(Errors::InsufficientFunds {
                    required: fee,
                    remaining: team.remaining(),
                });
            }
            team.committed_fees += fee;
            Ok(fee)
        }
        Charge::WinningBid(amount) => {
            if !team.can_afford(amount) {
                return Err(Errors::InsufficientFunds {
                    required: amount,
                    remaining: team.remaining(),
                });
            }
            team.committed_spend += amount;
            Ok(amount)
        }
        Charge::ReleaseWinningBid(amount) => {
            team.committed_spend -= amount.min(team.committed_spend);
            Ok(amount)
        }
    }
}
