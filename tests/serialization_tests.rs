mod utils;

use std::str::FromStr;

use player_auction::domain::{Player, Position, Team, User};
use player_auction::persistence::Roster;
use utils::*;

#[test]
fn user_round_trips_through_its_string_form() {
    let users = vec![
        admin(),
        team_owner(),
        User::Viewer {
            user_id: "Visitor_1".to_string(),
        },
    ];

    for user in users {
        let text = user.to_string();
        assert_eq!(User::from_str(&text).unwrap(), user);

        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}

#[test]
fn position_round_trips_as_a_plain_string() {
    for position in [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ] {
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, format!("\"{}\"", position));
        let parsed: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, position);
    }

    assert!(Position::from_str("Striker").is_err());
}

#[test]
fn team_serializes_with_camel_case_budget_fields() {
    let mut team = Team::new("Fire Cats", 500_000);
    team.committed_spend = 12_000;
    team.committed_fees = 2_000;

    let json = serde_json::to_value(&team).unwrap();
    assert_eq!(json["totalBalance"], 500_000);
    assert_eq!(json["committedSpend"], 12_000);
    assert_eq!(json["committedFees"], 2_000);
    assert!(json.get("id").is_some());
}

#[test]
fn unsold_player_has_null_assignment_fields() {
    let player = Player::new("Alisson Becker", Position::Goalkeeper, "A");

    let json = serde_json::to_value(&player).unwrap();
    assert_eq!(json["team"], serde_json::Value::Null);
    assert_eq!(json["soldPrice"], serde_json::Value::Null);
    assert_eq!(json["position"], "Goalkeeper");
    assert_eq!(json["category"], "A");
}

#[test]
fn roster_round_trips_through_json() {
    let roster = Roster {
        teams: sample_teams(),
        players: sample_players(),
    };

    let json = serde_json::to_string_pretty(&roster).unwrap();
    let parsed: Roster = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.teams, roster.teams);
    assert_eq!(parsed.players, roster.players);
}
