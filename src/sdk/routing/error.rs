use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Provider request failed: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse provider response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    // Structured error reported inside an otherwise successful response
    #[error("Provider API error (code {code}): {message}")]
    ApiError { code: i64, message: String },

    #[error("No route: {0}")]
    NoRoute(String),

    #[error("Malformed request path: {0}")]
    MalformedRequestPath(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl RoutingError {
    /// True when the failure came from the upstream provider rather than from
    /// the request or an empty result.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RoutingError::Unreachable(_)
                | RoutingError::Status { .. }
                | RoutingError::MalformedResponse(_)
                | RoutingError::ApiError { .. }
        )
    }
}
