use anyhow::{Context, Result};
use log::warn;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use crate::errors::{ApiError, fetch_context};

/// HTTP client for the admin endpoints, authenticated with a bearer token
pub struct ApiHttpClient {
    client: Client,
    token: String,
}

impl ApiHttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64, token: String) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client, token })
    }

    /// GET the url and return the body, mapping non-success statuses to `ApiError`
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send_get_request(url).await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(ApiError::from_status(status.as_u16()).into());
        }

        response
            .text()
            .await
            .with_context(|| fetch_context(url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .with_context(|| fetch_context(url))
    }
}
