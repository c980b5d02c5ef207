use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscordError>;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Webhook request failed: {0}")]
    Network(String),

    /// Discord answered with a non-2xx status. `message` is the response body.
    #[error("Discord rejected webhook payload with HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for DiscordError {
    fn from(err: reqwest::Error) -> Self {
        DiscordError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_names_status_and_body() {
        let err = DiscordError::Api {
            status: 429,
            message: r#"{"message": "You are being rate limited."}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Discord rejected webhook payload with HTTP 429: {"message": "You are being rate limited."}"#
        );
    }
}
