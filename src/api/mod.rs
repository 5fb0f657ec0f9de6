mod client;

pub use client::{FeedSource, GameBattleClient, build_feed_url};
