use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarError {
    #[error("Unknown card id: {0}")]
    UnknownCard(u8),

    #[error("Unknown class id: {0}")]
    UnknownClass(u8),

    #[error("Invalid dice notation: {0:?}")]
    InvalidDice(String),

    #[error("Roster not found: {0}")]
    RosterNotFound(String),

    #[error("Invalid war setup: {0}")]
    InvalidSetup(String),

    #[error("Invalid war transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WarError>;
