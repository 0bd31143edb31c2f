use thiserror::Error;

/// Failure talking to the knowledge graph API.
///
/// Messages are kept as strings so the error stays `Clone + Send + Sync` and can be
/// stored in a resource and rendered by an `ErrorBoundary`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
	#[error("API error: {status} {status_text}")]
	Status { status: u16, status_text: String },

	/// Body decoding failure, message passed through from `serde_json` verbatim.
	#[error("{0}")]
	Parse(String),

	#[error("network error: {0}")]
	Network(String),

	#[error("invalid API URL: {0}")]
	InvalidUrl(String),
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		ApiError::Parse(err.to_string())
	}
}

impl From<reqwest::Error> for ApiError {
	fn from(err: reqwest::Error) -> Self {
		ApiError::Network(err.to_string())
	}
}

impl From<url::ParseError> for ApiError {
	fn from(err: url::ParseError) -> Self {
		ApiError::InvalidUrl(err.to_string())
	}
}

/// Map a response status to an error unless it is 2xx.
pub fn check_status(status: u16, status_text: &str) -> Result<(), ApiError> {
	if (200..300).contains(&status) {
		Ok(())
	} else {
		Err(ApiError::Status {
			status,
			status_text: status_text.to_string(),
		})
	}
}
