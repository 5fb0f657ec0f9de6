use thiserror::Error;

/// Failures talking to the GameBattle backend
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("API_ROUTE not set")]
    MissingApiRoute,
    #[error("API_TOKEN not set")]
    MissingToken,
    #[error("Access denied. Admin privileges required.")]
    AccessDenied,
    #[error("Failed to fetch history: {0}")]
    Status(u16),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => ApiError::AccessDenied,
            other => ApiError::Status(other),
        }
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}
