use thiserror::Error;

/// Failures surfaced by the weather core.
///
/// Every variant propagates to the calling frontend as-is: the core does not
/// retry, back off or fall back to cached data.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Location permission was not granted. Terminal for that fetch attempt.
    #[error("location permission denied")]
    PermissionDenied,

    /// Non-success HTTP status from the forecast or geocoding API, carrying
    /// the status text.
    #[error("upstream API error: {0}")]
    Upstream(String),

    /// The response body could not be parsed, or parsed into a shape that
    /// violates the expected schema.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure before any HTTP status was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Catch-all for failures outside the taxonomy above.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_failure() {
        assert_eq!(
            WeatherError::PermissionDenied.to_string(),
            "location permission denied"
        );
        assert_eq!(
            WeatherError::Upstream("404 Not Found".into()).to_string(),
            "upstream API error: 404 Not Found"
        );
        assert_eq!(
            WeatherError::Unknown("boom".into()).to_string(),
            "unknown error: boom"
        );
    }

    #[test]
    fn serde_json_errors_become_malformed_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WeatherError = parse_err.into();

        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }
}
