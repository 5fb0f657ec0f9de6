use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::debug;

use super::types::{RatingSnapshot, RatingValue, Simulation};
use crate::config::EloSettings;
use crate::domain::PreferenceEvent;

pub fn expected_score(rating_a: RatingValue, rating_b: RatingValue) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Replays the preferences in chronological order, skipping the rating
/// update of every comparison made by an excluded author.
pub fn replay(
    preferences: &[&PreferenceEvent],
    excluded_authors: &BTreeSet<String>,
    settings: &EloSettings,
) -> RatingSnapshot {
    let mut snapshot = RatingSnapshot::new(settings.initial_rating);
    let mut skipped = 0;

    for preference in sort_chronologically(preferences) {
        record_names(&mut snapshot, preference);

        if !should_apply(preference, excluded_authors, settings) {
            skipped += 1;
            continue;
        }

        apply_update(&mut snapshot, preference, settings.k_factor);
    }

    debug!(
        "Replayed {} preferences ({} skipped), {} games rated",
        preferences.len(),
        skipped,
        snapshot.ratings.len()
    );
    snapshot
}

/// Actual ratings next to ratings recomputed without the excluded authors
pub fn simulate(
    preferences: &[&PreferenceEvent],
    excluded_authors: &BTreeSet<String>,
    settings: &EloSettings,
) -> Simulation {
    Simulation {
        actual: replay(preferences, &BTreeSet::new(), settings),
        simulated: replay(preferences, excluded_authors, settings),
    }
}

// Stable; untimestamped preferences go first in their original order
fn sort_chronologically<'a>(preferences: &[&'a PreferenceEvent]) -> Vec<&'a PreferenceEvent> {
    let mut sorted = preferences.to_vec();
    sorted.sort_by(|a, b| compare_timestamps(a.timestamp, b.timestamp));
    sorted
}

fn compare_timestamps(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn record_names(snapshot: &mut RatingSnapshot, preference: &PreferenceEvent) {
    let (first_name, second_name) = preference.names();
    snapshot
        .game_names
        .insert(preference.games.0.clone(), first_name.to_string());
    snapshot
        .game_names
        .insert(preference.games.1.clone(), second_name.to_string());
}

fn should_apply(
    preference: &PreferenceEvent,
    excluded_authors: &BTreeSet<String>,
    settings: &EloSettings,
) -> bool {
    if excluded_authors.contains(&preference.author) {
        return false;
    }
    preference.counted || !settings.skip_uncounted
}

fn apply_update(snapshot: &mut RatingSnapshot, preference: &PreferenceEvent, k_factor: f64) {
    let (first, second) = &preference.games;
    let rating_a = snapshot.rating_or_default(first);
    let rating_b = snapshot.rating_or_default(second);

    let expected_a = expected_score(rating_a, rating_b);
    let new_a = rating_a + k_factor * (preference.first_score - expected_a);
    let new_b = rating_b + k_factor * (preference.second_score() - (1.0 - expected_a));

    snapshot.ratings.insert(first.clone(), new_a);
    snapshot.ratings.insert(second.clone(), new_b);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn preference(games: (&str, &str), first_score: f64, author: &str, timestamp: Option<f64>) -> PreferenceEvent {
        PreferenceEvent {
            games: (games.0.into(), games.1.into()),
            game_names: Some((games.0.to_uppercase(), games.1.to_uppercase())),
            first_score,
            author: author.into(),
            author_team: None,
            timestamp,
            elo_changes: Vec::new(),
            counted: true,
        }
    }

    fn authors(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn worked_example() -> Vec<PreferenceEvent> {
        vec![
            preference(("a", "b"), 0.0, "y", Some(2.0)),
            preference(("a", "b"), 1.0, "x", Some(1.0)),
        ]
    }

    #[test]
    fn test_expected_score() {
        assert!((expected_score(1000.0, 1000.0) - 0.5).abs() < EPSILON);
        assert!(expected_score(1200.0, 1000.0) > 0.5);
        assert!((expected_score(1200.0, 1000.0) + expected_score(1000.0, 1200.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_worked_example_actual() {
        let events = worked_example();
        let refs: Vec<&PreferenceEvent> = events.iter().collect();

        let snapshot = replay(&refs, &BTreeSet::new(), &EloSettings::default());

        // After the first (earlier) event: a = 1016, b = 984
        let expected_a = expected_score(1016.0, 984.0);
        let a = 1016.0 + 32.0 * (0.0 - expected_a);
        let b = 984.0 + 32.0 * (1.0 - (1.0 - expected_a));

        assert!((snapshot.get("a").unwrap() - a).abs() < EPSILON);
        assert!((snapshot.get("b").unwrap() - b).abs() < EPSILON);
        assert!(snapshot.get("a").unwrap() < 1000.0);
        assert!((snapshot.get("a").unwrap() + snapshot.get("b").unwrap() - 2000.0).abs() < EPSILON);
    }

    #[test]
    fn test_worked_example_excluding_author() {
        let events = worked_example();
        let refs: Vec<&PreferenceEvent> = events.iter().collect();

        let snapshot = replay(&refs, &authors(&["x"]), &EloSettings::default());

        assert!((snapshot.get("a").unwrap() - 984.0).abs() < EPSILON);
        assert!((snapshot.get("b").unwrap() - 1016.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_exclusion_reproduces_actual() {
        let events = vec![
            preference(("a", "b"), 1.0, "x", Some(3.0)),
            preference(("b", "c"), 0.25, "y", Some(1.0)),
            preference(("c", "a"), 0.6, "z", None),
            preference(("a", "c"), 0.0, "x", Some(1.0)),
        ];
        let refs: Vec<&PreferenceEvent> = events.iter().collect();

        let simulation = simulate(&refs, &BTreeSet::new(), &EloSettings::default());

        assert_eq!(simulation.actual, simulation.simulated);
        assert_eq!(simulate(&refs, &BTreeSet::new(), &EloSettings::default()), simulation);
    }

    #[test]
    fn test_excluding_everyone_leaves_no_ratings_but_keeps_names() {
        let events = worked_example();
        let refs: Vec<&PreferenceEvent> = events.iter().collect();

        let snapshot = replay(&refs, &authors(&["x", "y"]), &EloSettings::default());

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.rating_or_default("a"), 1000.0);
        assert_eq!(snapshot.display_name("a"), "A");
        assert_eq!(snapshot.display_name("missing"), "missing");
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let events = vec![
            preference(("a", "b"), 1.0, "x", Some(5.0)),
            preference(("a", "b"), 0.0, "x", Some(5.0)),
        ];
        let reversed = vec![events[1].clone(), events[0].clone()];

        let forward = replay(&events.iter().collect::<Vec<_>>(), &BTreeSet::new(), &EloSettings::default());
        let backward = replay(&reversed.iter().collect::<Vec<_>>(), &BTreeSet::new(), &EloSettings::default());

        // Order matters for ELO, so the two replays must differ
        assert!(forward.get("a").unwrap() < 1000.0);
        assert!(backward.get("a").unwrap() > 1000.0);
    }

    #[test]
    fn test_untimestamped_preferences_replay_first() {
        let events = vec![
            preference(("a", "b"), 1.0, "x", Some(1.0)),
            preference(("a", "b"), 0.0, "y", None),
            preference(("b", "c"), 1.0, "z", None),
        ];
        let refs: Vec<&PreferenceEvent> = events.iter().collect();

        let snapshot = replay(&refs, &BTreeSet::new(), &EloSettings::default());

        // b beats a, then b beats c, then a beats b
        let (a, b) = (984.0, 1016.0);
        let expected_b = expected_score(b, 1000.0);
        let (b, c) = (b + 32.0 * (1.0 - expected_b), 1000.0 - 32.0 * (1.0 - expected_b));
        let expected_a = expected_score(a, b);
        let (a, b) = (a + 32.0 * (1.0 - expected_a), b - 32.0 * (1.0 - expected_a));

        assert!((snapshot.get("a").unwrap() - a).abs() < EPSILON);
        assert!((snapshot.get("b").unwrap() - b).abs() < EPSILON);
        assert!((snapshot.get("c").unwrap() - c).abs() < EPSILON);

        let untimestamped_first = vec![events[1].clone(), events[2].clone(), events[0].clone()];
        let reordered = replay(
            &untimestamped_first.iter().collect::<Vec<_>>(),
            &BTreeSet::new(),
            &EloSettings::default(),
        );
        assert_eq!(snapshot, reordered);
    }

    #[test]
    fn test_skip_uncounted() {
        let mut uncounted = preference(("a", "b"), 1.0, "x", Some(1.0));
        uncounted.counted = false;
        let refs = vec![&uncounted];

        let settings = EloSettings {
            skip_uncounted: true,
            ..EloSettings::default()
        };

        assert!(replay(&refs, &BTreeSet::new(), &settings).is_empty());
        assert!(!replay(&refs, &BTreeSet::new(), &EloSettings::default()).is_empty());
    }
}
