// src/web/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{
    AmountValue, AuctionEngine, Player, PlayerQueue, SessionOutcome, SessionState, Team, TeamId,
};
use crate::persistence::{InMemoryPlayers, InMemoryTeams};

pub type AppEngine = AuctionEngine<InMemoryTeams, InMemoryPlayers>;
pub type AppState = Arc<Mutex<AppEngine>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    pub team: TeamId,
    pub amount: AmountValue,
}

#[derive(Debug, Serialize)]
pub struct BidView {
    pub team: String,
    pub amount: AmountValue,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SaleView {
    pub player: String,
    pub team: Option<String>,
    pub amount: Option<AmountValue>,
    #[serde(rename = "type")]
    pub resolution: String,
}

#[derive(Debug, Serialize)]
pub struct AuctionStats {
    #[serde(rename = "playersResolved")]
    pub players_resolved: usize,
    #[serde(rename = "playersSold")]
    pub players_sold: usize,
    #[serde(rename = "highestSale")]
    pub highest_sale: AmountValue,
    #[serde(rename = "queueRemaining")]
    pub queue_remaining: usize,
}

/// Everything the live auction page renders: current player, bid list,
/// clock, recent sales and the aggregate stats block.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: String,
    pub category: Option<String>,
    pub player: Option<Player>,
    pub bids: Vec<BidView>,
    #[serde(rename = "highestBid")]
    pub highest_bid: AmountValue,
    #[serde(rename = "highestBidder")]
    pub highest_bidder: Option<String>,
    #[serde(rename = "clockRemaining")]
    pub clock_remaining: u32,
    pub expired: bool,
    pub upcoming: Vec<Player>,
    pub history: Vec<SaleView>,
    pub stats: AuctionStats,
}

impl SessionView {
    pub fn build(
        state: &SessionState,
        queue: &PlayerQueue,
        history: &[SessionOutcome],
        teams: &[Team],
    ) -> Self {
        let names: HashMap<TeamId, &str> =
            teams.iter().map(|t| (t.team_id, t.name.as_str())).collect();
        let team_name = |id: &TeamId| names.get(id).map(|n| n.to_string());

        let bids = state
            .bids()
            .iter()
            .map(|bid| BidView {
                team: team_name(&bid.team_id).unwrap_or_else(|| bid.team_id.to_string()),
                amount: bid.amount,
                at: bid.at,
            })
            .collect();

        let history_views = history
            .iter()
            .rev()
            .map(|outcome| match outcome {
                SessionOutcome::Sold {
                    player,
                    team,
                    amount,
                } => SaleView {
                    player: player.name.clone(),
                    team: team_name(team),
                    amount: Some(*amount),
                    resolution: "sold".to_string(),
                },
                SessionOutcome::Skipped { player, .. } => SaleView {
                    player: player.name.clone(),
                    team: None,
                    amount: None,
                    resolution: "skipped".to_string(),
                },
            })
            .collect();

        let highest = state.highest_bid();
        let stats = AuctionStats {
            players_resolved: history.len(),
            players_sold: history
                .iter()
                .filter(|o| matches!(o, SessionOutcome::Sold { .. }))
                .count(),
            highest_sale: history
                .iter()
                .filter_map(|o| match o {
                    SessionOutcome::Sold { amount, .. } => Some(*amount),
                    SessionOutcome::Skipped { .. } => None,
                })
                .max()
                .unwrap_or(0),
            queue_remaining: queue.remaining(),
        };

        SessionView {
            state: state.name().to_string(),
            category: queue.category().map(str::to_string),
            player: state.player().cloned(),
            bids,
            highest_bid: highest.map(|b| b.amount).unwrap_or(0),
            highest_bidder: highest.and_then(|b| team_name(&b.team_id)),
            clock_remaining: state.clock_remaining(),
            expired: state.is_expired(),
            upcoming: queue.upcoming().cloned().collect(),
            history: history_views,
            stats,
        }
    }
}
