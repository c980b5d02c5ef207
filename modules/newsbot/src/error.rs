/// Result type alias for news bot operations.
pub type Result<T> = std::result::Result<T, NewsBotError>;

#[derive(Debug, thiserror::Error)]
pub enum NewsBotError {
    #[error("{0} environment variable is required")]
    MissingEnv(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Cache I/O error: {0}")]
    Cache(#[from] std::io::Error),

    #[error("Webhook client error: {0}")]
    Webhook(#[from] discord_webhook::DiscordError),

    #[error("Translation client error: {0}")]
    Translate(#[from] translate_client::TranslateError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
