use serde::{Deserialize, Serialize};

pub type GameId = String;

/// Single event from the admin history feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Report(ReportEvent),
    Preference(PreferenceEvent),
}

impl Event {
    /// Who produced the event: the reporter of a report, the voter of a preference
    pub fn author(&self) -> &str {
        match self {
            Event::Report(report) => &report.reporter,
            Event::Preference(preference) => &preference.author,
        }
    }

    pub fn timestamp(&self) -> Option<f64> {
        match self {
            Event::Report(report) => report.timestamp,
            Event::Preference(preference) => preference.timestamp,
        }
    }

    pub fn as_preference(&self) -> Option<&PreferenceEvent> {
        match self {
            Event::Preference(preference) => Some(preference),
            Event::Report(_) => None,
        }
    }
}

/// A player's report against a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
    #[serde(alias = "game_team_id")]
    pub game_id: GameId,
    pub game_name: String,
    pub reporter: String,
    pub short_reason: ShortReason,
    #[serde(default)]
    pub timestamp: Option<f64>,
    pub report_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortReason {
    Unclear,
    Buggy,
    Other,
}

impl ShortReason {
    pub fn as_str(&self) -> &str {
        match self {
            ShortReason::Unclear => "unclear",
            ShortReason::Buggy => "buggy",
            ShortReason::Other => "other",
        }
    }
}

/// A pairwise vote between two games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceEvent {
    pub games: (GameId, GameId),
    // Absent in the preference-only feed
    #[serde(default)]
    pub game_names: Option<(String, String)>,
    /// Score of the first game, 1.0 = first game fully preferred
    pub first_score: f64,
    pub author: String,
    #[serde(default)]
    pub author_team: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub elo_changes: Vec<EloChange>,
    #[serde(default = "default_counted")]
    pub counted: bool,
}

fn default_counted() -> bool {
    true
}

impl PreferenceEvent {
    /// Display names of both games, falling back to their ids
    pub fn names(&self) -> (&str, &str) {
        match &self.game_names {
            Some((first, second)) => (first.as_str(), second.as_str()),
            None => (self.games.0.as_str(), self.games.1.as_str()),
        }
    }

    pub fn second_score(&self) -> f64 {
        1.0 - self.first_score
    }
}

/// Rating movement recorded by the backend for one preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EloChange {
    pub team_id: String,
    pub before: f64,
    pub after: f64,
}

impl EloChange {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}
