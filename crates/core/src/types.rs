use thiserror::Error;

/// The main error type for listr operations
#[derive(Debug, Error)]
pub enum ListrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task '{raw}' has no command to run")]
    EmptyCommand { raw: String },

    #[error("Malformed environment directive: '{segment}'")]
    MalformedDirective { segment: String },
}

/// Result type alias for listr operations
pub type ListrResult<T> = Result<T, ListrError>;
