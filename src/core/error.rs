//! Error types for the log router

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A handler chain references a handler name that was never registered
    #[error("Unknown handler '{name}' referenced by {referrer}")]
    UnknownHandler { name: String, referrer: String },

    /// A severity name that is not part of the configuration language
    #[error("Unknown severity '{name}' for {component}")]
    UnknownSeverity { name: String, component: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl RouterError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        RouterError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unknown handler reference error
    pub fn unknown_handler(name: impl Into<String>, referrer: impl Into<String>) -> Self {
        RouterError::UnknownHandler {
            name: name.into(),
            referrer: referrer.into(),
        }
    }

    /// Create an unknown severity error
    pub fn unknown_severity(name: impl Into<String>, component: impl Into<String>) -> Self {
        RouterError::UnknownSeverity {
            name: name.into(),
            component: component.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        RouterError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        RouterError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RouterError::Other(msg.into())
    }
}
