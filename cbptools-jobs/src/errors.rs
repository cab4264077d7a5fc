use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Can't read template {path:?}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported value for placeholder ${key}: only strings, numbers and booleans can be substituted")]
    InvalidValue { key: String },

    #[error("File name {file_name} has unresolved placeholders: {placeholders}")]
    UnresolvedFileName {
        file_name: String,
        placeholders: String,
    },

    #[error("No parameter sets in config, add at least one [[params]] table")]
    NoParams,

    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    SubmitFailed { command: String, status: String },
}

pub type Result<T> = std::result::Result<T, JobsError>;
