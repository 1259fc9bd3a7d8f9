//! Error types for the backend contract

use thiserror::Error;

/// Result type alias for contract operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Error type for backend operations
///
/// None of these cross the contract boundary as panics: initialization
/// failures are returned from the handshake, everything that happens during a
/// running check or install is reported through the completion events instead.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Initialization handshake failed; the instance must be discarded
    #[error("Initialization failed: {message}")]
    Initialization { message: String },

    /// A required setting was missing or malformed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An operation was requested in a state that does not permit it
    #[error("Illegal state: {message}")]
    State { message: String },

    /// The external installer could not be launched
    #[error("Installer launch failed: {message}")]
    Launch { message: String },

    /// An in-process install failed to run to completion
    #[error("Installation failed: {message}")]
    Install { message: String },

    /// I/O errors while talking to local update sources
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON errors while decoding backend settings or payloads
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl BackendError {
    /// Create a new initialization error
    pub fn initialization<S: Into<String>>(message: S) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new illegal-state error
    pub fn state<S: Into<String>>(message: S) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a new launch error
    pub fn launch<S: Into<String>>(message: S) -> Self {
        Self::Launch {
            message: message.into(),
        }
    }

    /// Create a new install error
    pub fn install<S: Into<String>>(message: S) -> Self {
        Self::Install {
            message: message.into(),
        }
    }
}
