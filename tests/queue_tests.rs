mod utils;

use player_auction::domain::{Player, PlayerQueue, Position, Team};
use utils::*;

fn category_b_pool() -> Vec<Player> {
    vec![
        Player::new("Andrew Robertson", Position::Defender, "B"),
        Player::new("Harry Kane", Position::Forward, "B"),
        Player::new("Sadio Mane", Position::Forward, "B"),
        Player::new("Kevin De Bruyne", Position::Midfielder, "A"),
    ]
}

#[test]
fn queue_holds_only_unassigned_players_of_the_category() {
    let mut pool = category_b_pool();
    // One category B player is already on a team.
    pool[0].team = Some(Team::new("Fire Cats", 500_000).team_id);

    let queue = PlayerQueue::shuffled("B", pool, &mut sample_rng());
    assert_eq!(queue.remaining(), 2);
    assert!(queue
        .upcoming()
        .all(|p| p.category == "B" && p.is_unassigned()));
}

#[test]
fn same_seed_gives_the_same_offer_order() {
    let pool = category_b_pool();

    let mut first = PlayerQueue::shuffled("B", pool.clone(), &mut sample_rng());
    let mut second = PlayerQueue::shuffled("B", pool, &mut sample_rng());

    while let Some(expected) = first.next() {
        assert_eq!(second.next(), Some(expected));
    }
    assert!(second.is_empty());
}

#[test]
fn offered_players_leave_the_queue() {
    let mut queue = PlayerQueue::shuffled("B", category_b_pool(), &mut sample_rng());
    assert_eq!(queue.remaining(), 3);

    let offered = queue.next().unwrap();
    assert_eq!(queue.remaining(), 2);
    assert!(queue.upcoming().all(|p| p.player_id != offered.player_id));
}

#[tokio::test]
async fn resolved_players_are_not_re_offered() {
    let teams = sample_teams();
    let players = vec![
        Player::new("Andrew Robertson", Position::Defender, "B"),
        Player::new("Harry Kane", Position::Forward, "B"),
    ];
    let mut fixture = fixture_with(teams, players);

    let first = fixture.start_on("B").await;
    let team = fixture.team_id("Fire Cats");
    fixture
        .engine
        .place_bid(&admin(), team, 5_000, bid_time())
        .await
        .unwrap();
    fixture.engine.confirm(&admin()).await.unwrap();

    let second = fixture.engine.advance().unwrap().cloned().unwrap();
    assert_ne!(second.player_id, first.player_id);
    assert_eq!(fixture.engine.queue().remaining(), 0);
}

#[tokio::test]
async fn reselecting_the_category_re_includes_skipped_players() {
    let teams = sample_teams();
    let players = vec![Player::new("Harry Kane", Position::Forward, "B")];
    let mut fixture = fixture_with(teams, players);

    let skipped = fixture.start_on("B").await;
    fixture.engine.skip().unwrap();

    // Skipped players are gone until the administrator reshuffles...
    assert_eq!(fixture.engine.advance().unwrap(), None);

    // ...at which point they are offered again, still unassigned.
    let offered = fixture
        .engine
        .select_category("B", &mut sample_rng())
        .await
        .unwrap()
        .cloned()
        .unwrap();
    assert_eq!(offered.player_id, skipped.player_id);
}

#[tokio::test]
async fn empty_category_leaves_the_session_idle() {
    let mut fixture = fixture();
    let offered = fixture
        .engine
        .select_category("Z", &mut sample_rng())
        .await
        .unwrap();
    assert!(offered.is_none());
    assert_eq!(fixture.engine.state().name(), "idle");
    assert!(fixture.engine.queue().is_empty());
}

#[tokio::test]
async fn sold_players_never_return_on_reselect() {
    let teams = sample_teams();
    let players = vec![
        Player::new("Andrew Robertson", Position::Defender, "B"),
        Player::new("Harry Kane", Position::Forward, "B"),
    ];
    let mut fixture = fixture_with(teams, players);

    let sold = fixture.start_on("B").await;
    let team = fixture.team_id("Storm");
    fixture
        .engine
        .place_bid(&admin(), team, 5_000, bid_time())
        .await
        .unwrap();
    fixture.engine.confirm(&admin()).await.unwrap();

    let mut rng = sample_rng();
    fixture.engine.select_category("B", &mut rng).await.unwrap();
    assert!(fixture
        .engine
        .state()
        .player()
        .map(|p| p.player_id != sold.player_id)
        .unwrap_or(true));
    assert!(fixture
        .engine
        .queue()
        .upcoming()
        .all(|p| p.player_id != sold.player_id));
}
