use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::domain::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

/// Per-author timestamp index, rebuilt whenever the event set changes
#[derive(Debug, Clone, Default)]
pub struct AuthorIndex {
    all_timestamps: Vec<f64>,
    author_timestamps: HashMap<String, Vec<f64>>,
    top_authors: Vec<AuthorCount>,
}

impl AuthorIndex {
    pub fn build(events: &[Event]) -> Self {
        let mut all_timestamps = Vec::new();
        let mut author_timestamps: HashMap<String, Vec<f64>> = HashMap::new();
        let mut author_totals: IndexMap<String, usize> = IndexMap::new();

        for event in events {
            let author = event.author();

            if let Some(timestamp) = event.timestamp() {
                all_timestamps.push(timestamp);
                author_timestamps
                    .entry(author.to_string())
                    .or_default()
                    .push(timestamp);
            }

            // Untimestamped events still count toward the author total
            *author_totals.entry(author.to_string()).or_insert(0) += 1;
        }

        let top_authors = rank_authors(author_totals);
        debug!(
            "Indexed {} events ({} timestamped) from {} authors",
            events.len(),
            all_timestamps.len(),
            top_authors.len()
        );

        Self {
            all_timestamps,
            author_timestamps,
            top_authors,
        }
    }

    pub fn all_timestamps(&self) -> &[f64] {
        &self.all_timestamps
    }

    pub fn timestamps_for(&self, author: &str) -> &[f64] {
        self.author_timestamps
            .get(author)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn top_authors(&self) -> &[AuthorCount] {
        &self.top_authors
    }

    pub fn total_events(&self) -> usize {
        self.top_authors.iter().map(|a| a.count).sum()
    }

    pub fn author_count(&self) -> usize {
        self.top_authors.len()
    }
}

fn rank_authors(totals: IndexMap<String, usize>) -> Vec<AuthorCount> {
    let mut ranked: Vec<AuthorCount> = totals
        .into_iter()
        .map(|(author, count)| AuthorCount { author, count })
        .collect();

    // Stable, so equal counts keep first-encountered order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
