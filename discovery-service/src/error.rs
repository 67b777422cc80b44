use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Errors surfaced by the discovery core.
///
/// The ranking and scoring entry points are pure and infallible; only
/// configuration loading and table validation can fail.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
