//! Error types for the updater driver

use thiserror::Error;

use freshen_core::BackendError;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, UpdaterError>;

/// Errors the driver reports synchronously to the host
///
/// Everything that happens during a running check or install arrives as an
/// event instead; these cover caller mistakes and the initialization
/// handshake.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// The backend reported an error, typically from the handshake
    #[error("Backend error: {source}")]
    Backend {
        #[from]
        source: BackendError,
    },

    /// A check session is already running on this instance
    #[error("A check session is already running")]
    CheckInProgress,

    /// A previous installer launch is still in flight
    #[error("An installer launch is already in progress")]
    TriggerInProgress,

    /// The backend does not declare the capability this call needs
    #[error("Backend does not declare {feature}")]
    UnsupportedFeature { feature: &'static str },
}
