use thiserror::Error;

/// Errors encountered while querying the directions service.
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("directions request failed: {0}")]
    Http(reqwest::Error),
    /// Response body could not be decoded as JSON.
    #[error("directions response was not valid JSON: {0}")]
    Json(reqwest::Error),
    /// Non-2xx HTTP status.
    #[error("directions service returned HTTP status {0}")]
    Status(u16),
    /// Service-level rejection (a parsed body with a non-OK status string).
    #[error("directions service rejected the query: {0}")]
    Api(String),
    /// Body parsed but did not contain `routes[0].legs[0]`.
    #[error("malformed directions response: {0}")]
    Format(String),
    /// Missing API key or invalid endpoint.
    #[error("directions configuration error: {0}")]
    Config(String),
}

impl DirectionsError {
    /// Whether a retry could plausibly succeed. Service rejections and
    /// malformed bodies are deterministic; only transport failures and
    /// server-side 5xx responses are worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            DirectionsError::Http(_) => true,
            DirectionsError::Status(code) => *code >= 500,
            _ => false,
        }
    }
}
