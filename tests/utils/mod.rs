use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use player_auction::domain::{
    AmountValue, AuctionEngine, CategoryPricing, Errors, Player, PlayerId, PlayerRepository,
    Position, RepositoryError, Team, TeamId, TeamRepository, User,
};
use player_auction::persistence::{InMemoryPlayers, InMemoryTeams};
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

pub type TestEngine = AuctionEngine<InMemoryTeams, InMemoryPlayers>;

pub fn admin() -> User {
    User::Admin {
        user_id: "Admin_1".to_string(),
    }
}

pub fn team_owner() -> User {
    User::TeamOwner {
        user_id: "Owner_1".to_string(),
        team: "Fire Cats".to_string(),
    }
}

pub fn sample_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn bid_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
}

pub fn sample_teams() -> Vec<Team> {
    vec![
        Team::new("Fire Cats", 500_000),
        Team::new("Thunder", 500_000),
        Team::new("Storm", 500_000),
    ]
}

pub fn sample_players() -> Vec<Player> {
    vec![
        Player::new("Alisson Becker", Position::Goalkeeper, "A"),
        Player::new("Kevin De Bruyne", Position::Midfielder, "A"),
        Player::new("Andrew Robertson", Position::Defender, "B"),
        Player::new("Harry Kane", Position::Forward, "B"),
    ]
}

pub struct Fixture {
    pub engine: TestEngine,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

pub fn fixture() -> Fixture {
    fixture_with(sample_teams(), sample_players())
}

pub fn fixture_with(teams: Vec<Team>, players: Vec<Player>) -> Fixture {
    let engine = AuctionEngine::new(
        InMemoryTeams::new(teams.clone()),
        InMemoryPlayers::new(players.clone()),
        CategoryPricing::default(),
    );
    Fixture {
        engine,
        teams,
        players,
    }
}

impl Fixture {
    pub fn team_id(&self, name: &str) -> TeamId {
        self.teams
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.team_id)
            .unwrap_or_else(|| panic!("no sample team named {}", name))
    }

    pub async fn team(&self, name: &str) -> Team {
        let id = self.team_id(name);
        self.engine
            .teams()
            .get(id)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("team {} missing from store", name))
    }

    /// Selects a category and opens bidding on the first queued player.
    pub async fn start_on(&mut self, category: &str) -> Player {
        self.engine
            .select_category(category, &mut sample_rng())
            .await
            .unwrap();
        self.engine.start(&admin()).unwrap();
        self.engine
            .state()
            .player()
            .cloned()
            .unwrap_or_else(|| panic!("no player loaded for category {}", category))
    }

    /// Ticks the clock down to the given remaining count.
    pub fn tick_down_to(&mut self, remaining: u32) {
        while self.engine.state().clock_remaining() > remaining {
            self.engine.tick();
        }
    }
}

/// Player store whose writes always fail, for settlement-atomicity tests.
#[derive(Clone)]
pub struct FailingPlayers {
    pub inner: InMemoryPlayers,
}

impl FailingPlayers {
    pub fn new(players: Vec<Player>) -> Self {
        FailingPlayers {
            inner: InMemoryPlayers::new(players),
        }
    }
}

#[async_trait]
impl PlayerRepository for FailingPlayers {
    async fn get_all(&self) -> Result<Vec<Player>, RepositoryError> {
        self.inner.get_all().await
    }

    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError> {
        self.inner.get(id).await
    }

    async fn assign(
        &self,
        _id: PlayerId,
        _team: TeamId,
        _price: AmountValue,
    ) -> Result<Player, Errors> {
        Err(Errors::Repository(RepositoryError::Io(
            "player store unavailable".to_string(),
        )))
    }
}
