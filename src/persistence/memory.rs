// src/persistence/memory.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ledger::{apply_charge, Charge};
use crate::domain::repositories::{PlayerRepository, TeamRepository};
use crate::domain::{AmountValue, Errors, Player, PlayerId, RepositoryError, Team, TeamId};

/// Thread-safe in-memory team store. `charge` runs the whole
/// read-compute-write under one write lock, so a team's committed totals
/// can never interleave two charges.
#[derive(Clone, Default)]
pub struct InMemoryTeams {
    inner: Arc<RwLock<HashMap<TeamId, Team>>>,
}

impl InMemoryTeams {
    pub fn new(teams: Vec<Team>) -> Self {
        let map = teams.into_iter().map(|t| (t.team_id, t)).collect();
        InMemoryTeams {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn snapshot(&self) -> Vec<Team> {
        self.inner.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeams {
    async fn get_all(&self) -> Result<Vec<Team>, RepositoryError> {
        let mut teams: Vec<Team> = self.inner.read().await.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, RepositoryError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn charge(&self, id: TeamId, charge: Charge) -> Result<Team, Errors> {
        let mut map = self.inner.write().await;
        let team = map.get_mut(&id).ok_or(Errors::UnknownTeam(id))?;
        apply_charge(team, charge)?;
        Ok(team.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPlayers {
    inner: Arc<RwLock<HashMap<PlayerId, Player>>>,
}

impl InMemoryPlayers {
    pub fn new(players: Vec<Player>) -> Self {
        let map = players.into_iter().map(|p| (p.player_id, p)).collect();
        InMemoryPlayers {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn snapshot(&self) -> Vec<Player> {
        self.inner.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayers {
    async fn get_all(&self) -> Result<Vec<Player>, RepositoryError> {
        let mut players: Vec<Player> = self.inner.read().await.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn assign(
        &self,
        id: PlayerId,
        team: TeamId,
        price: AmountValue,
    ) -> Result<Player, Errors> {
        let mut map = self.inner.write().await;
        let player = map.get_mut(&id).ok_or(Errors::UnknownPlayer(id))?;
        if player.team.is_some() {
            return Err(Errors::Repository(RepositoryError::Conflict(format!(
                "player {} is already assigned",
                player.name
            ))));
        }
        player.team = Some(team);
        player.sold_price = Some(price);
        Ok(player.clone())
    }
}
