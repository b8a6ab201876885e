use std::path::PathBuf;

/// Errors raised by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("board size must be at least 2, got {0}")]
    InvalidSize(usize),

    #[error("cannot spawn a tile: board has no empty cell")]
    BoardFull,
}

/// Errors that can occur while reading or writing the best score.
#[derive(Debug, thiserror::Error)]
pub enum ScoreStoreError {
    #[error("failed to read best score from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write best score to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid best score in {path}: {content:?}")]
    Parse { path: PathBuf, content: String },
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
