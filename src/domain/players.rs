// src/domain/players.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use super::core::{AmountValue, PlayerId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Goalkeeper => write!(f, "Goalkeeper"),
            Position::Defender => write!(f, "Defender"),
            Position::Midfielder => write!(f, "Midfielder"),
            Position::Forward => write!(f, "Forward"),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Goalkeeper" => Ok(Position::Goalkeeper),
            "Defender" => Ok(Position::Defender),
            "Midfielder" => Ok(Position::Midfielder),
            "Forward" => Ok(Position::Forward),
            _ => Err(format!("Unknown position: {}", s)),
        }
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Position::from_str(&text).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "id")]
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Performance tier label ("A", "B", ...) that determines the base price.
    pub category: String,
    #[serde(rename = "team")]
    pub team: Option<TeamId>,
    #[serde(rename = "soldPrice")]
    pub sold_price: Option<AmountValue>,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, category: impl Into<String>) -> Self {
        Player {
            player_id: PlayerId::new_v4(),
            name: name.into(),
            position,
            category: category.into(),
            team: None,
            sold_price: None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.team.is_none()
    }
}

/// Category base-price table. Externally configurable, treated as constant
/// within a session. Unlisted categories have no floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPricing {
    prices: HashMap<String, AmountValue>,
}

impl Default for CategoryPricing {
    fn default() -> Self {
        let mut prices = HashMap::new();
        prices.insert("A".to_string(), 10_000);
        prices.insert("B".to_string(), 5_000);
        CategoryPricing { prices }
    }
}

impl CategoryPricing {
    pub fn new(prices: HashMap<String, AmountValue>) -> Self {
        CategoryPricing { prices }
    }

    pub fn base_price(&self, category: &str) -> AmountValue {
        self.prices.get(category).copied().unwrap_or(0)
    }
}
