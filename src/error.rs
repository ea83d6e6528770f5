use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotaError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Use --force to delete in non-interactive mode")]
    ConfirmationRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotaError>;
