#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown preference: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown link scheme: {0}")]
    UnknownLinkScheme(String),

    #[error("Unknown lookup source: {0}")]
    UnknownSource(String),
}
