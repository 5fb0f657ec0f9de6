use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use crate::api::{FeedSource, GameBattleClient};
use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::EventFeed;
use crate::errors::parse_context;

pub struct IngestionService {
    cache: Cache,
    api_client: GameBattleClient,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.cache_dir)?,
            api_client: GameBattleClient::new(&config.fetch)?,
        })
    }

    pub async fn run(&self, source: FeedSource) -> Result<usize> {
        info!("=== Starting History Fetch ===");

        // Step 1: Fetch the raw feed
        let body = self.api_client.fetch_feed_raw(source).await?;
        info!("  → Received {} bytes", body.len());

        // Step 2: Validate before anything is written
        let value: Value = serde_json::from_str(&body).context(parse_context("history response"))?;
        let feed = EventFeed::from_value(value.clone())?;
        info!("  → Validated {} events", feed.len());

        // Step 3: Store both tiers
        let key = source.cache_key();
        self.cache.save_raw(key, &value)?;
        self.cache.save_parsed(key, &feed.events())?;
        info!("  → Saved to cache under '{}'", key);

        info!("=== Fetch Complete ===");
        Ok(feed.len())
    }
}
