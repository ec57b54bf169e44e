use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required request field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Anything that went wrong reaching or querying the remote database.
    #[error("ChromaDB client error: {0}")]
    Connection(String),
}

impl Error {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Connection(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
