//! Error taxonomy for the host runtime.

use thiserror::Error;

use super::AppName;

/// Errors surfaced from registration and from the navigation-handling
/// entry point.
///
/// A transition failure marks only the failing instance; it comes back
/// here as a value instead of crashing the host shell or touching other
/// instances.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("duplicate application name={0}")]
    DuplicateApplication(AppName),

    #[error("application not registered name={0}")]
    UnknownApplication(AppName),

    #[error("no container provided for selector {0}")]
    ContainerMissing(String),

    #[error("bundle load failed for {name}: {reason}")]
    LoadFailure { name: AppName, reason: String },

    #[error("mount failed for {name}: {reason}")]
    MountFailure { name: AppName, reason: String },

    #[error("unmount failed for {name}: {reason}")]
    UnmountFailure { name: AppName, reason: String },
}

/// Error returned by application entry points (`bootstrap`, `mount`,
/// `unmount`, `update`) and by bundle loaders.
///
/// The orchestrator maps it into the matching `HostError` variant, so
/// applications only ever report a reason.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EntryError(pub String);

impl EntryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<String> for EntryError {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

impl From<&str> for EntryError {
    fn from(reason: &str) -> Self {
        Self(reason.to_string())
    }
}
