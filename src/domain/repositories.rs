// src/domain/repositories.rs
//
// Storage contracts the engine is driven against. Teams and players live in
// an external store and persist across sessions; the engine never assumes
// exclusive in-memory ownership of them.
use async_trait::async_trait;
use super::core::{AmountValue, Errors, PlayerId, RepositoryError, TeamId};
use super::ledger::Charge;
use super::players::Player;
use super::teams::Team;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Team>, RepositoryError>;

    async fn get(&self, id: TeamId) -> Result<Option<Team>, RepositoryError>;

    /// Applies one ledger charge as a single atomic read-modify-write and
    /// returns the post-charge team. Implementations must not interleave two
    /// charges against the same team.
    async fn charge(&self, id: TeamId, charge: Charge) -> Result<Team, Errors>;
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Player>, RepositoryError>;

    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError>;

    /// Records a confirmed sale: sets the team assignment and sold price.
    async fn assign(
        &self,
        id: PlayerId,
        team: TeamId,
        price: AmountValue,
    ) -> Result<Player, Errors>;
}
