use anyhow::{Context, Result};
use serde::Deserialize;

use super::models::{Event, PreferenceEvent};

/// Validated list of events as served by one of the history endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFeed {
    events: Vec<Event>,
}

// The combined history endpoint tags every entry, the preference history
// endpoint serves a flat untagged array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFeed {
    Tagged(Vec<Event>),
    Preferences(Vec<PreferenceEvent>),
}

impl EventFeed {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawFeed = serde_json::from_str(json)
            .context(crate::errors::parse_context("event feed"))?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawFeed = serde_json::from_value(value)
            .context(crate::errors::parse_context("event feed"))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawFeed) -> Self {
        match raw {
            RawFeed::Tagged(events) => Self::new(events),
            RawFeed::Preferences(preferences) => {
                Self::new(preferences.into_iter().map(Event::Preference).collect())
            }
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn preferences(&self) -> impl Iterator<Item = &PreferenceEvent> {
        self.events.iter().filter_map(Event::as_preference)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
