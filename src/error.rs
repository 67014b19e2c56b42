use std::path::PathBuf;

/// Errors that can occur when building a board or session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unsupported board size {0} (expected 6, 8 or 10)")]
    InvalidBoardSize(usize),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
