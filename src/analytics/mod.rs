pub mod buckets;
pub mod filter;
pub mod ingest;

pub use buckets::{Granularity, TimeBucket, bucket_start, bucket_timestamps, compute_chart_data};
pub use filter::{AuthorFilter, selected_label, suggestions};
pub use ingest::{AuthorCount, AuthorIndex};
