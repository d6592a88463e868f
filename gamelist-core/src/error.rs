use thiserror::Error;

use crate::types::GameField;

/// A `<game>` node that cannot become a canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("game entry has no path")]
    MissingPath,

    #[error("game entry '{path}' has no name")]
    MissingName { path: String },

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: GameField, value: String },
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
