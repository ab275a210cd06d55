use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ToolbeltError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("unmatched closing separator {separator:?} near byte {position}")]
    UnmatchedSeparator { separator: String, position: usize },

    #[error("separator {separator:?} opened near byte {position} is never closed")]
    UnclosedSeparator { separator: String, position: usize },

    #[error("replacement rules form a cycle through {word:?}")]
    CyclicRules { word: String },
}

pub type Result<T> = std::result::Result<T, ToolbeltError>;
