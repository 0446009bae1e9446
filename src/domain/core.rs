// src/domain/core.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub type UserId = String;
pub type TeamId = Uuid;
pub type PlayerId = Uuid;
pub type AmountValue = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum User {
    Admin {
        user_id: UserId,
    },
    TeamOwner {
        user_id: UserId,
        team: String,
    },
    Viewer {
        user_id: UserId,
    },
}

impl User {
    pub fn user_id(&self) -> &UserId {
        match self {
            User::Admin { user_id } => user_id,
            User::TeamOwner { user_id, .. } => user_id,
            User::Viewer { user_id } => user_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, User::Admin { .. })
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        User::from_str(&text).map_err(serde::de::Error::custom)
    }
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_str(&self.to_string())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            User::Admin { user_id } => write!(f, "Admin|{}", user_id),
            User::TeamOwner { user_id, team } => write!(f, "TeamOwner|{}|{}", user_id, team),
            User::Viewer { user_id } => write!(f, "Viewer|{}", user_id),
        }
    }
}

impl FromStr for User {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').collect();

        match parts.as_slice() {
            ["Admin", user_id] => Ok(User::Admin {
                user_id: user_id.to_string(),
            }),
            ["TeamOwner", user_id, team] => Ok(User::TeamOwner {
                user_id: user_id.to_string(),
                team: team.to_string(),
            }),
            ["Viewer", user_id] => Ok(User::Viewer {
                user_id: user_id.to_string(),
            }),
            _ => Err(format!(
                "parsing User failed, could not interpret values: {:?}",
                parts
            )),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage conflict: {0}")]
    Conflict(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("administrator privileges required, denied for {0}")]
    Unauthorized(UserId),

    #[error("{operation} is not valid while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("bid amount must be a positive integer, got {0}")]
    InvalidAmount(AmountValue),

    #[error("bid must be at least {minimum}")]
    BidTooLow { minimum: AmountValue },

    #[error("insufficient funds: {required} required, {remaining} remaining")]
    InsufficientFunds {
        required: AmountValue,
        remaining: AmountValue,
    },

    #[error("settlement failed: winning bid of {required} exceeds remaining balance {remaining}")]
    SettlementFailed {
        required: AmountValue,
        remaining: AmountValue,
    },

    #[error("unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
