// src/domain/queue.rs
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use super::players::Player;

/// The unassigned players of one selected category, in a shuffled offer
/// order. `next()` removes the offered player, so a resolved player is never
/// re-offered until the administrator selects the category again.
#[derive(Debug, Clone, Default)]
pub struct PlayerQueue {
    category: Option<String>,
    players: VecDeque<Player>,
}

impl PlayerQueue {
    pub fn empty() -> Self {
        PlayerQueue::default()
    }

    /// Builds the queue for a category from the full player pool: keeps the
    /// unassigned players of that category and shuffles them so the offer
    /// order carries no bias from the stored list order.
    pub fn shuffled<R: Rng>(category: &str, pool: Vec<Player>, rng: &mut R) -> Self {
        let mut players: Vec<Player> = pool
            .into_iter()
            .filter(|p| p.is_unassigned() && p.category == category)
            .collect();
        players.shuffle(rng);

        PlayerQueue {
            category: Some(category.to_string()),
            players: players.into(),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn next(&mut self) -> Option<Player> {
        self.players.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players still waiting to be offered, in offer order.
    pub fn upcoming(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
