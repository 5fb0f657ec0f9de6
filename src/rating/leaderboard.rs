use std::collections::{BTreeSet, HashSet};

use super::elo::simulate;
use super::types::{LeaderboardEntry, LeaderboardOptions, RatingSnapshot, Simulation};
use crate::config::EloSettings;
use crate::domain::PreferenceEvent;

/// What-if leaderboard for a set of excluded authors
#[derive(Debug, Clone, PartialEq)]
pub struct HypotheticalLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub excluded_count: usize,
}

impl HypotheticalLeaderboard {
    pub fn compute(
        preferences: &[&PreferenceEvent],
        excluded_authors: &BTreeSet<String>,
        settings: &EloSettings,
        options: LeaderboardOptions,
    ) -> Self {
        let simulation = simulate(preferences, excluded_authors, settings);
        let teams = excluded_teams(preferences, excluded_authors);

        Self {
            entries: build_leaderboard(&simulation, &teams, options),
            excluded_count: excluded_authors.len(),
        }
    }

    pub fn affected(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter().filter(|e| e.is_affected())
    }
}

/// Teams the excluded authors vote from; their games are flagged on the board
pub fn excluded_teams(
    preferences: &[&PreferenceEvent],
    excluded_authors: &BTreeSet<String>,
) -> HashSet<String> {
    preferences
        .iter()
        .filter(|p| excluded_authors.contains(&p.author))
        .filter_map(|p| p.author_team.clone())
        .collect()
}

pub fn build_leaderboard(
    simulation: &Simulation,
    excluded_teams: &HashSet<String>,
    options: LeaderboardOptions,
) -> Vec<LeaderboardEntry> {
    let Simulation { actual, simulated } = simulation;

    let mut entries: Vec<LeaderboardEntry> = simulated
        .ratings
        .iter()
        .map(|(game_id, &simulated_elo)| {
            build_entry(game_id, simulated_elo, actual, simulated, excluded_teams)
        })
        .collect();

    if options.include_unrated {
        entries.extend(
            actual
                .ratings
                .keys()
                .filter(|game_id| !simulated.ratings.contains_key(*game_id))
                .map(|game_id| {
                    build_entry(game_id, simulated.initial_rating, actual, simulated, excluded_teams)
                }),
        );
    }

    sort_entries(&mut entries);
    entries
}

fn build_entry(
    game_id: &str,
    simulated_elo: f64,
    actual: &RatingSnapshot,
    simulated: &RatingSnapshot,
    excluded_teams: &HashSet<String>,
) -> LeaderboardEntry {
    let actual_elo = actual.get(game_id);

    LeaderboardEntry {
        game_id: game_id.to_string(),
        game_name: simulated.display_name(game_id).to_string(),
        simulated_elo,
        actual_elo,
        delta: actual_elo.map(|actual_elo| simulated_elo - actual_elo),
        owned_by_excluded: excluded_teams.contains(game_id),
    }
}

// Ties fall back to game id so repeated runs list games identically
fn sort_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.simulated_elo
            .total_cmp(&a.simulated_elo)
            .then_with(|| a.game_id.cmp(&b.game_id))
    });
}
