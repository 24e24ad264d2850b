// Error taxonomy for the flight search client

use thiserror::Error;

// Token exchange failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthenticationError {
    #[error("Failed to get access token: {message}")]
    Rejected { status_code: u16, message: String },

    #[error("Failed to get access token: {0}")]
    Network(String),

    #[error("Failed to get access token: malformed response: {0}")]
    MalformedResponse(String),
}

// Offer search failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Flight search failed: {message}")]
    Rejected { status_code: u16, message: String },

    #[error("Flight search failed: {0}")]
    Network(String),

    #[error("Flight search failed: malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),
}

// Everything a client operation can surface to its caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time of day '{0}', expected HH:MM")]
pub struct TimeParseError(pub String);

/// Fallback message when the vendor body carries nothing useful.
pub(crate) fn status_message(status_code: u16) -> String {
    format!("Request failed with status code {}", status_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_vendor_text() {
        let auth = AuthenticationError::Rejected {
            status_code: 401,
            message: "Client credentials are invalid".to_string(),
        };
        assert_eq!(
            auth.to_string(),
            "Failed to get access token: Client credentials are invalid"
        );

        let api: ApiError = SearchError::Network("connection reset".to_string()).into();
        assert_eq!(api.to_string(), "Flight search failed: connection reset");
    }

    #[test]
    fn test_status_message() {
        assert_eq!(status_message(500), "Request failed with status code 500");
    }
}
