// src/domain/bids.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::core::{AmountValue, Errors, PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(rename = "team")]
    pub team_id: TeamId,
    #[serde(rename = "player")]
    pub player_id: PlayerId,
    pub amount: AmountValue,
    pub at: DateTime<Utc>,
}

/// The smallest amount the next bid may carry: the category base price for
/// the first bid, strictly above the highest bid afterwards.
pub fn required_minimum(highest: Option<AmountValue>, base_price: AmountValue) -> AmountValue {
    match highest {
        Some(amount) => amount + 1,
        None => base_price,
    }
}

pub fn validate_amount(amount: AmountValue) -> Result<(), Errors> {
    if amount <= 0 {
        return Err(Errors::InvalidAmount(amount));
    }
    Ok(())
}

/// Checks the fixed validation order of a raise: amount format first, then
/// the floor / highest-bid comparison. Affordability is the ledger's concern
/// and is checked after these pass.
pub fn validate_raise(
    amount: AmountValue,
    highest: Option<AmountValue>,
    base_price: AmountValue,
) -> Result<(), Errors> {
    validate_amount(amount)?;

    let minimum = required_minimum(highest, base_price);
    if amount < minimum {
        return Err(Errors::BidTooLow { minimum });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bid_floor_is_the_base_price() {
        assert_eq!(required_minimum(None, 10_000), 10_000);
        assert!(validate_raise(10_000, None, 10_000).is_ok());
        assert_eq!(
            validate_raise(9_999, None, 10_000),
            Err(Errors::BidTooLow { minimum: 10_000 })
        );
    }

    #[test]
    fn later_bids_must_strictly_exceed_the_highest() {
        assert!(validate_raise(12_001, Some(12_000), 10_000).is_ok());
        // Equal raise is a tie, not an increase.
        assert_eq!(
            validate_raise(12_000, Some(12_000), 10_000),
            Err(Errors::BidTooLow { minimum: 12_001 })
        );
    }

    #[test]
    fn non_positive_amounts_are_rejected_before_any_comparison() {
        assert_eq!(validate_raise(0, None, 0), Err(Errors::InvalidAmount(0)));
        assert_eq!(
            validate_raise(-500, Some(12_000), 10_000),
            Err(Errors::InvalidAmount(-500))
        );
    }
}
