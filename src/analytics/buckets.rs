use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;

use super::ingest::AuthorIndex;

/// Width of a chart bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Week,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
    ];

    pub fn seconds(&self) -> i64 {
        match self {
            Granularity::Minute => 60,
            Granularity::Hour => 3_600,
            Granularity::Day => 86_400,
            Granularity::Week => 604_800,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucket {
    pub time: i64,
    pub all: usize,
    pub selected: usize,
}

/// Start of the bucket holding `timestamp`. Timestamps beyond the `i64`
/// range land in the outermost aligned bucket.
pub fn bucket_start(timestamp: f64, granularity: Granularity) -> i64 {
    let width = granularity.seconds();
    let index = (timestamp / width as f64).floor() as i64;

    index.checked_mul(width).unwrap_or_else(|| {
        if index < 0 {
            i64::MIN / width * width
        } else {
            i64::MAX / width * width
        }
    })
}

pub fn bucket_timestamps(timestamps: &[f64], granularity: Granularity) -> BTreeMap<i64, usize> {
    let mut buckets = BTreeMap::new();
    add_to_buckets(&mut buckets, timestamps, granularity);
    buckets
}

fn add_to_buckets(buckets: &mut BTreeMap<i64, usize>, timestamps: &[f64], granularity: Granularity) {
    for &timestamp in timestamps {
        *buckets.entry(bucket_start(timestamp, granularity)).or_insert(0) += 1;
    }
}

/// Activity series for every event plus the selected authors' share of it
pub fn compute_chart_data(
    index: &AuthorIndex,
    selected_authors: &BTreeSet<String>,
    granularity: Granularity,
) -> Vec<TimeBucket> {
    let all_buckets = bucket_timestamps(index.all_timestamps(), granularity);

    let mut selected_buckets = BTreeMap::new();
    for author in selected_authors {
        add_to_buckets(&mut selected_buckets, index.timestamps_for(author), granularity);
    }

    all_buckets
        .into_iter()
        .map(|(time, all)| TimeBucket {
            time,
            all,
            selected: selected_buckets.get(&time).copied().unwrap_or(0),
        })
        .collect()
}
