use std::collections::BTreeSet;

use super::ingest::AuthorCount;

/// Comma separated author filter as typed by the admin
pub struct AuthorFilter;

impl AuthorFilter {
    pub fn parse(input: &str) -> BTreeSet<String> {
        split_authors(input).map(str::to_string).collect()
    }

    /// Remove the author if listed, append it otherwise
    pub fn toggle(input: &str, author: &str) -> String {
        let current: Vec<&str> = split_authors(input).collect();

        if current.contains(&author) {
            current
                .into_iter()
                .filter(|a| *a != author)
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            let mut updated = current;
            updated.push(author);
            updated.join(", ")
        }
    }

    /// Replace the word being typed with a picked suggestion
    pub fn complete(input: &str, author: &str) -> String {
        let mut parts: Vec<&str> = input.split(',').map(str::trim).collect();
        parts.pop();
        parts.retain(|p| !p.is_empty());
        parts.push(author);
        format!("{}, ", parts.join(", "))
    }

    /// Text after the last comma, lowercased
    pub fn current_word(input: &str) -> String {
        input
            .rsplit(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    }
}

fn split_authors(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Autocomplete candidates for the word currently being typed
pub fn suggestions<'a>(
    top_authors: &'a [AuthorCount],
    input: &str,
    selected: &BTreeSet<String>,
    limit: usize,
) -> Vec<&'a AuthorCount> {
    let word = AuthorFilter::current_word(input);
    if word.is_empty() {
        return Vec::new();
    }

    top_authors
        .iter()
        .filter(|a| a.author.to_lowercase().contains(&word) && !selected.contains(&a.author))
        .take(limit)
        .collect()
}

/// Short legend for the selected series
pub fn selected_label(selected: &BTreeSet<String>) -> Option<String> {
    let authors: Vec<&str> = selected.iter().map(String::as_str).collect();

    match authors.len() {
        0 => None,
        1..=3 => Some(authors.join(", ")),
        n => Some(format!("{} +{} more", authors[..2].join(", "), n - 2)),
    }
}
