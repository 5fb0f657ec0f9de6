use std::collections::HashMap;

use crate::domain::GameId;

pub type RatingValue = f64;
pub type RatingMap = HashMap<GameId, RatingValue>;
pub type NameMap = HashMap<GameId, String>;

/// Result of one full replay of the preference history
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSnapshot {
    /// Only games that received at least one rating update
    pub ratings: RatingMap,
    /// Every game seen in the replay, excluded or not
    pub game_names: NameMap,
    pub initial_rating: RatingValue,
}

impl RatingSnapshot {
    pub fn new(initial_rating: RatingValue) -> Self {
        Self {
            ratings: RatingMap::new(),
            game_names: NameMap::new(),
            initial_rating,
        }
    }

    pub fn get(&self, game_id: &str) -> Option<RatingValue> {
        self.ratings.get(game_id).copied()
    }

    pub fn rating_or_default(&self, game_id: &str) -> RatingValue {
        get_rating(&self.ratings, game_id, self.initial_rating)
    }

    pub fn display_name<'a>(&'a self, game_id: &'a str) -> &'a str {
        self.game_names
            .get(game_id)
            .map(String::as_str)
            .unwrap_or(game_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

pub fn get_rating(ratings: &RatingMap, game_id: &str, initial_rating: RatingValue) -> RatingValue {
    ratings.get(game_id).copied().unwrap_or(initial_rating)
}

/// Authoritative and hypothetical replays computed with the same settings
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub actual: RatingSnapshot,
    pub simulated: RatingSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub game_id: GameId,
    pub game_name: String,
    pub simulated_elo: RatingValue,
    pub actual_elo: Option<RatingValue>,
    pub delta: Option<RatingValue>,
    /// The game belongs to the team of an excluded author
    pub owned_by_excluded: bool,
}

impl LeaderboardEntry {
    /// Rating moved under the exclusion
    pub fn is_affected(&self) -> bool {
        self.delta.is_some_and(|d| d != 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardOptions {
    /// List games whose every comparison was excluded at the initial rating
    pub include_unrated: bool,
}
