use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("TOML Serialization Error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stat Error: Path '{path}', Error: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open directory '{path}': {source}")]
    WalkRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern \"{pattern}\": {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(
        "no files matched the provided patterns; try 'dir/...' to take a whole directory, \
         'dir/.../*.rs' or 'src/**/*.rs' to filter recursively, or '*.go' for the current directory"
    )]
    NoFilesMatched,

    #[error("Working directory unavailable: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Git Error: {0}")]
    Git(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("TikToken Error: {0}")]
    TikToken(String),
}

impl AppError {
    pub(crate) fn invalid_pattern(pattern: &str, message: impl ToString) -> Self {
        AppError::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }
}
