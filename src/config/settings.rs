use std::path::PathBuf;

use crate::analytics::Granularity;

#[derive(Debug, Clone, PartialEq)]
pub struct EloSettings {
    pub k_factor: f64,
    pub initial_rating: f64,
    /// Ignore preferences the backend marked as not counted
    pub skip_uncounted: bool,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1000.0,
            skip_uncounted: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_route: Option<String>,
    pub token: Option<String>,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_route: None,
            token: None,
            user_agent: "GameBattleAnalytics/1.0",
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub top_authors_shown: usize,
    pub suggestion_limit: usize,
    pub default_granularity: Granularity,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            top_authors_shown: 10,
            suggestion_limit: 8,
            default_granularity: Granularity::Hour,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub elo: EloSettings,
    pub fetch: FetchSettings,
    pub display: DisplaySettings,
    pub cache_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            elo: EloSettings::default(),
            fetch: FetchSettings::default(),
            display: DisplaySettings::default(),
            cache_dir: PathBuf::from("cache"),
        }
    }

    /// Defaults overridden by `API_ROUTE`, `API_TOKEN` and `GAMEBATTLE_CACHE_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.fetch.api_route = read_env("API_ROUTE");
        config.fetch.token = read_env("API_TOKEN");
        if let Some(dir) = read_env("GAMEBATTLE_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        config
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();

        assert_eq!(config.elo.k_factor, 32.0);
        assert_eq!(config.elo.initial_rating, 1000.0);
        assert!(!config.elo.skip_uncounted);
        assert_eq!(config.display.top_authors_shown, 10);
        assert_eq!(config.display.suggestion_limit, 8);
        assert_eq!(config.display.default_granularity, Granularity::Hour);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }
}
