// src/domain/session.rs
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rand::Rng;
use serde::Serialize;
use std::mem;

use super::bids::{self, Bid};
use super::clock::AuctionClock;
use super::core::{AmountValue, Errors, TeamId, User};
use super::ledger::Charge;
use super::players::{CategoryPricing, Player};
use super::queue::PlayerQueue;
use super::repositories::{PlayerRepository, TeamRepository};

/// Lifecycle of bidding on one player. Exactly one session exists at a time;
/// the variant data is the session, there are no side flags to fall out of
/// sync with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No player loaded.
    Idle,
    /// Player offered, clock not running.
    Loaded { player: Player },
    /// Clock running, bids accepted.
    Active {
        player: Player,
        bids: Vec<Bid>,
        clock: AuctionClock,
    },
    /// Clock ran out. Bidding stays open so a slow confirmation cannot void
    /// a legitimate final bid; only the administrator resolves the session.
    Expired { player: Player, bids: Vec<Bid> },
    /// Settlement in flight; every other operation is rejected until it
    /// resolves. Holds the pre-confirm snapshot for restore on failure.
    Confirming {
        player: Player,
        bids: Vec<Bid>,
        clock: Option<AuctionClock>,
    },
    /// Player resolved; `advance` moves on to the next one.
    Closed { outcome: SessionOutcome },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loaded { .. } => "loaded",
            SessionState::Active { .. } => "active",
            SessionState::Expired { .. } => "expired",
            SessionState::Confirming { .. } => "confirming",
            SessionState::Closed { .. } => "closed",
        }
    }

    pub fn player(&self) -> Option<&Player> {
        match self {
            SessionState::Loaded { player }
            | SessionState::Active { player, .. }
            | SessionState::Expired { player, .. }
            | SessionState::Confirming { player, .. } => Some(player),
            _ => None,
        }
    }

    /// Session bids, most recent first.
    pub fn bids(&self) -> &[Bid] {
        match self {
            SessionState::Active { bids, .. }
            | SessionState::Expired { bids, .. }
            | SessionState::Confirming { bids, .. } => bids,
            _ => &[],
        }
    }

    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids().first()
    }

    pub fn clock_remaining(&self) -> u32 {
        match self {
            SessionState::Active { clock, .. } => clock.remaining(),
            SessionState::Confirming {
                clock: Some(clock), ..
            } => clock.remaining(),
            _ => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            SessionState::Expired { .. } | SessionState::Confirming { clock: None, .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    Sold {
        player: Player,
        team: TeamId,
        amount: AmountValue,
    },
    Skipped {
        player: Player,
        #[serde(rename = "bidsPlaced")]
        bids_placed: usize,
    },
}

impl SessionOutcome {
    pub fn player(&self) -> &Player {
        match self {
            SessionOutcome::Sold { player, .. } => player,
            SessionOutcome::Skipped { player, .. } => player,
        }
    }
}

/// Orchestrates queue, validator, ledger and clock for one player at a time.
/// All storage access goes through the injected repositories; the engine
/// itself never blocks.
pub struct AuctionEngine<T, P> {
    teams: T,
    players: P,
    pricing: CategoryPricing,
    queue: PlayerQueue,
    state: SessionState,
    history: Vec<SessionOutcome>,
}

impl<T: TeamRepository, P: PlayerRepository> AuctionEngine<T, P> {
    pub fn new(teams: T, players: P, pricing: CategoryPricing) -> Self {
        AuctionEngine {
            teams,
            players,
            pricing,
            queue: PlayerQueue::empty(),
            state: SessionState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn queue(&self) -> &PlayerQueue {
        &self.queue
    }

    pub fn history(&self) -> &[SessionOutcome] {
        &self.history
    }

    pub fn teams(&self) -> &T {
        &self.teams
    }

    pub fn players(&self) -> &P {
        &self.players
    }

    /// Rebuilds the queue for a category from the unassigned pool, shuffled,
    /// and loads the first player. Selecting a category again reshuffles and
    /// re-includes previously skipped players.
    pub async fn select_category<R: Rng>(
        &mut self,
        category: &str,
        rng: &mut R,
    ) -> Result<Option<&Player>, Errors> {
        match self.state {
            SessionState::Idle | SessionState::Loaded { .. } | SessionState::Closed { .. } => {}
            ref other => {
                return Err(Errors::InvalidState {
                    operation: "select_category",
                    state: other.name(),
                })
            }
        }

        let pool = self.players.get_all().await?;
        self.queue = PlayerQueue::shuffled(category, pool, rng);
        info!(
            "category {} selected, {} unassigned players queued",
            category,
            self.queue.remaining()
        );

        self.state = match self.queue.next() {
            Some(player) => SessionState::Loaded { player },
            None => SessionState::Idle,
        };
        Ok(self.state.player())
    }

    /// Opens bidding on the loaded player: fresh bid list, highest bid 0,
    /// clock at the full duration.
    pub fn start(&mut self, caller: &User) -> Result<(), Errors> {
        if !caller.is_admin() {
            return Err(Errors::Unauthorized(caller.user_id().clone()));
        }

        let state = mem::replace(&mut self.state, SessionState::Idle);
        match state {
            SessionState::Loaded { player } => {
                info!(
                    "bidding opened on {} (category {})",
                    player.name, player.category
                );
                self.state = SessionState::Active {
                    player,
                    bids: Vec::new(),
                    clock: AuctionClock::start(),
                };
                Ok(())
            }
            other => {
                let name = other.name();
                self.state = other;
                Err(Errors::InvalidState {
                    operation: "start",
                    state: name,
                })
            }
        }
    }

    /// One clock tick. Only an active session counts down; at zero the
    /// session expires but keeps its bids and keeps accepting new ones.
    pub fn tick(&mut self) {
        let expired_now = match &mut self.state {
            SessionState::Active { clock, .. } => clock.tick(),
            _ => return,
        };

        if expired_now {
            let state = mem::replace(&mut self.state, SessionState::Idle);
            if let SessionState::Active { player, bids, .. } = state {
                info!(
                    "bidding time expired on {} with {} bid(s); awaiting administrator",
                    player.name,
                    bids.len()
                );
                self.state = SessionState::Expired { player, bids };
            }
        }
    }

    /// Accepts a raise for a team. Validation order is fixed: amount format,
    /// then floor / highest-bid comparison, then affordability of the raise
    /// fee. The fee is charged atomically with acceptance and is never
    /// refunded.
    pub async fn place_bid(
        &mut self,
        caller: &User,
        team_id: TeamId,
        amount: AmountValue,
        at: DateTime<Utc>,
    ) -> Result<Bid, Errors> {
        if !caller.is_admin() {
            return Err(Errors::Unauthorized(caller.user_id().clone()));
        }

        let (player, session_bids, clock) = match &mut self.state {
            SessionState::Active {
                player,
                bids,
                clock,
            } => (player, bids, Some(clock)),
            SessionState::Expired { player, bids } => (player, bids, None),
            other => {
                return Err(Errors::InvalidState {
                    operation: "place_bid",
                    state: other.name(),
                })
            }
        };

        let base_price = self.pricing.base_price(&player.category);
        let highest = session_bids.first().map(|b| b.amount);
        bids::validate_raise(amount, highest, base_price)?;

        let team = self.teams.charge(team_id, Charge::RaiseFee).await?;

        // Late raises buy time, but only while the clock is authoritative.
        if let Some(clock) = clock {
            clock.extend_on_bid();
        }

        let bid = Bid {
            team_id,
            player_id: player.player_id,
            amount,
            at,
        };
        session_bids.insert(0, bid.clone());
        info!(
            "bid of {} on {} by {} accepted, {} remaining in budget",
            amount,
            player.name,
            team.name,
            team.remaining()
        );
        Ok(bid)
    }

    /// Settles the session on its highest bidder. Affordability is
    /// re-validated against the team's current committed totals, which may
    /// have moved since the bid was placed. Player assignment and ledger
    /// update land both-or-neither; on failure the session returns to its
    /// pre-confirm state for retry or skip. With no bids the player resolves
    /// as skipped.
    pub async fn confirm(&mut self, caller: &User) -> Result<SessionOutcome, Errors> {
        if !caller.is_admin() {
            return Err(Errors::Unauthorized(caller.user_id().clone()));
        }

        let state = mem::replace(&mut self.state, SessionState::Idle);
        let (player, session_bids, clock) = match state {
            SessionState::Active {
                player,
                bids,
                clock,
            } => (player, bids, Some(clock)),
            SessionState::Expired { player, bids } => (player, bids, None),
            other => {
                let name = other.name();
                self.state = other;
                return Err(Errors::InvalidState {
                    operation: "confirm",
                    state: name,
                });
            }
        };

        let winning = match session_bids.first().cloned() {
            Some(bid) => bid,
            None => {
                info!("no bids on {}; resolved as skipped", player.name);
                return Ok(self.close(SessionOutcome::Skipped {
                    player,
                    bids_placed: 0,
                }));
            }
        };

        self.state = SessionState::Confirming {
            player: player.clone(),
            bids: session_bids.clone(),
            clock,
        };

        match self.settle(&player, &winning).await {
            Ok(()) => Ok(self.close(SessionOutcome::Sold {
                player,
                team: winning.team_id,
                amount: winning.amount,
            })),
            Err(err) => {
                self.state = match clock {
                    Some(clock) => SessionState::Active {
                        player,
                        bids: session_bids,
                        clock,
                    },
                    None => SessionState::Expired {
                        player,
                        bids: session_bids,
                    },
                };
                Err(err)
            }
        }
    }

    async fn settle(&self, player: &Player, winning: &Bid) -> Result<(), Errors> {
        let team = self
            .teams
            .charge(winning.team_id, Charge::WinningBid(winning.amount))
            .await
            .map_err(|err| match err {
                Errors::InsufficientFunds {
                    required,
                    remaining,
                } => Errors::SettlementFailed {
                    required,
                    remaining,
                },
                other => other,
            })?;

        if let Err(err) = self
            .players
            .assign(player.player_id, winning.team_id, winning.amount)
            .await
        {
            warn!(
                "player update for {} failed after charging {}; releasing {}: {}",
                player.name, team.name, winning.amount, err
            );
            if let Err(rollback) = self
                .teams
                .charge(winning.team_id, Charge::ReleaseWinningBid(winning.amount))
                .await
            {
                error!(
                    "release of {} for {} failed, ledger needs attention: {}",
                    winning.amount, team.name, rollback
                );
            }
            return Err(err);
        }

        info!("{} sold to {} for {}", player.name, team.name, winning.amount);
        Ok(())
    }

    /// Abandons the current player. Raise fees already charged are
    /// forfeited; the player stays unassigned and is not re-offered until
    /// the category is selected again.
    pub fn skip(&mut self) -> Result<SessionOutcome, Errors> {
        let state = mem::replace(&mut self.state, SessionState::Idle);
        let (player, bids_placed) = match state {
            SessionState::Loaded { player } => (player, 0),
            SessionState::Active { player, bids, .. } => {
                let placed = bids.len();
                (player, placed)
            }
            SessionState::Expired { player, bids } => {
                let placed = bids.len();
                (player, placed)
            }
            other => {
                let name = other.name();
                self.state = other;
                return Err(Errors::InvalidState {
                    operation: "skip",
                    state: name,
                });
            }
        };

        info!(
            "{} skipped after {} bid(s); charged fees are forfeited",
            player.name, bids_placed
        );
        Ok(self.close(SessionOutcome::Skipped {
            player,
            bids_placed,
        }))
    }

    /// Moves from a closed session to the next queued player, or to idle
    /// when the category is exhausted.
    pub fn advance(&mut self) -> Result<Option<&Player>, Errors> {
        if !matches!(self.state, SessionState::Closed { .. }) {
            return Err(Errors::InvalidState {
                operation: "advance",
                state: self.state.name(),
            });
        }

        self.state = match self.queue.next() {
            Some(player) => SessionState::Loaded { player },
            None => SessionState::Idle,
        };
        Ok(self.state.player())
    }

    fn close(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        self.history.push(outcome.clone());
        self.state = SessionState::Closed {
            outcome: outcome.clone(),
        };
        outcome
    }
}
