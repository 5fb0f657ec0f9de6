use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::analytics::{self, AuthorFilter, AuthorIndex, Granularity};
use crate::api::FeedSource;
use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::{Event, EventFeed, PreferenceEvent};
use crate::rating::{HypotheticalLeaderboard, LeaderboardOptions};
use crate::render;

/// Where the analysed events come from
#[derive(Debug, Clone, PartialEq)]
pub enum EventSource {
    File(PathBuf),
    Cache,
}

impl EventSource {
    pub fn from_arg(file: Option<PathBuf>) -> Self {
        file.map(EventSource::File).unwrap_or(EventSource::Cache)
    }
}

/// Runs the analytics views over one loaded event set
pub struct AnalysisService {
    config: AppConfig,
    feed: EventFeed,
    index: AuthorIndex,
}

impl AnalysisService {
    pub fn load(config: AppConfig, source: &EventSource) -> Result<Self> {
        let feed = match source {
            EventSource::File(path) => load_from_file(path)?,
            EventSource::Cache => load_from_cache(&Cache::new(&config.cache_dir)?)?,
        };
        info!("Loaded {} events", feed.len());

        Ok(Self::new(config, feed))
    }

    pub fn new(config: AppConfig, feed: EventFeed) -> Self {
        let index = AuthorIndex::build(feed.events());
        Self { config, feed, index }
    }

    pub fn events(&self) -> &[Event] {
        self.feed.events()
    }

    pub fn history(&self, limit: Option<usize>) -> String {
        render::render_history(self.feed.events(), limit)
    }

    /// Ranked authors; `toggle` flips one author in the filter and echoes the result
    pub fn authors(&self, filter: &str, toggle: Option<&str>, show_all: bool) -> String {
        let top = self.index.top_authors();
        let shown = if show_all {
            top.len()
        } else {
            self.config.display.top_authors_shown
        };

        let Some(author) = toggle else {
            return render::render_authors(top, shown, &AuthorFilter::parse(filter));
        };

        let filter = AuthorFilter::toggle(filter, author);
        format!(
            "Filter: {}\n{}",
            filter,
            render::render_authors(top, shown, &AuthorFilter::parse(&filter))
        )
    }

    pub fn chart(&self, filter: &str, granularity: Option<Granularity>) -> String {
        let granularity = granularity.unwrap_or(self.config.display.default_granularity);
        let selected = AuthorFilter::parse(filter);
        let buckets = analytics::compute_chart_data(&self.index, &selected, granularity);
        info!("Bucketed activity into {} {} buckets", buckets.len(), granularity.as_str());

        let label = analytics::selected_label(&selected);
        render::render_chart(&buckets, label.as_deref(), granularity)
    }

    pub fn leaderboard(&self, exclude: &str, include_unrated: bool) -> String {
        render::render_leaderboard(&self.compute_leaderboard(exclude, include_unrated))
    }

    pub fn compute_leaderboard(&self, exclude: &str, include_unrated: bool) -> HypotheticalLeaderboard {
        let excluded = AuthorFilter::parse(exclude);
        let preferences: Vec<&PreferenceEvent> = self.feed.preferences().collect();
        info!(
            "Simulating {} preferences without {} author(s)",
            preferences.len(),
            excluded.len()
        );

        HypotheticalLeaderboard::compute(
            &preferences,
            &excluded,
            &self.config.elo,
            LeaderboardOptions { include_unrated },
        )
    }

    pub fn suggest(&self, input: &str, pick: Option<&str>) -> String {
        if let Some(author) = pick {
            return format!("{}\n", AuthorFilter::complete(input, author));
        }

        let selected = AuthorFilter::parse(input);
        // The word being typed is not a selection yet
        let typed = AuthorFilter::current_word(input);
        let selected = selected
            .into_iter()
            .filter(|a| a.to_lowercase() != typed)
            .collect();

        let found = analytics::suggestions(
            self.index.top_authors(),
            input,
            &selected,
            self.config.display.suggestion_limit,
        );
        render::render_suggestions(&found)
    }
}

fn load_from_file(path: &Path) -> Result<EventFeed> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    EventFeed::parse(&json)
}

// Newest fetch wins, the combined feed on a tie
fn load_from_cache(cache: &Cache) -> Result<EventFeed> {
    let newest = [FeedSource::Events, FeedSource::Preferences]
        .into_iter()
        .filter_map(|source| cache.modified(source.cache_key()).map(|time| (source, time)))
        .reduce(|newest, candidate| if candidate.1 > newest.1 { candidate } else { newest });

    let Some((source, _)) = newest else {
        anyhow::bail!(
            "No cached history found in {}; run `fetch` first or pass --file",
            cache.dir().display()
        );
    };

    let events = cache
        .load_parsed::<Vec<Event>>(source.cache_key())?
        .with_context(|| format!("Cached {} history disappeared while loading", source.cache_key()))?;
    info!("Loading cached {} history", source.cache_key());
    Ok(EventFeed::new(events))
}
