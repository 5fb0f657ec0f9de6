use anyhow::Result;
use log::info;

use crate::config::FetchSettings;
use crate::errors::ApiError;
use crate::http::ApiHttpClient;

/// History feeds served by the GameBattle backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    /// Reports and preferences, tagged by `type`
    Events,
    /// Preferences only, untagged
    Preferences,
}

impl FeedSource {
    pub fn path(&self) -> &'static str {
        match self {
            FeedSource::Events => "/admin/history",
            FeedSource::Preferences => "/admin/preferences/history",
        }
    }

    /// Key the feed is stored under in the cache
    pub fn cache_key(&self) -> &'static str {
        match self {
            FeedSource::Events => "events",
            FeedSource::Preferences => "preferences",
        }
    }
}

/// GameBattle admin API client
pub struct GameBattleClient {
    client: ApiHttpClient,
    api_route: String,
}

impl GameBattleClient {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let api_route = settings.api_route.clone().ok_or(ApiError::MissingApiRoute)?;
        let token = settings.token.clone().ok_or(ApiError::MissingToken)?;
        let client = ApiHttpClient::new(settings.user_agent, settings.timeout_secs, token)?;

        Ok(Self { client, api_route })
    }

    /// Fetch the raw body of a history feed
    pub async fn fetch_feed_raw(&self, source: FeedSource) -> Result<String> {
        let url = build_feed_url(&self.api_route, source);
        info!("Fetching {:?} feed from {}", source, url);
        self.client.get_text(&url).await
    }
}

pub fn build_feed_url(api_route: &str, source: FeedSource) -> String {
    format!("{}{}", api_route.trim_end_matches('/'), source.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_feed_url() {
        assert_eq!(
            build_feed_url("https://api.example.com/", FeedSource::Events),
            "https://api.example.com/admin/history"
        );
        assert_eq!(
            build_feed_url("https://api.example.com", FeedSource::Preferences),
            "https://api.example.com/admin/preferences/history"
        );
    }

    #[test]
    fn test_client_requires_route_and_token() {
        let settings = FetchSettings::default();
        let err = GameBattleClient::new(&settings).err().unwrap();
        assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::MissingApiRoute));

        let settings = FetchSettings {
            api_route: Some("https://api.example.com".to_string()),
            ..FetchSettings::default()
        };
        let err = GameBattleClient::new(&settings).err().unwrap();
        assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::MissingToken));
    }
}
