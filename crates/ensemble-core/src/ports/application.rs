//! Application entry contract - what the host expects from each
//! registered application.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AppName, EntryError};
use crate::ports::Container;
use crate::store::StateHandle;

/// Side-channel properties handed to an application's entry points.
///
/// `state` carries the bound global-state accessors for this
/// application's owner token; `props` carries the static properties from
/// the descriptor.
#[derive(Clone)]
pub struct MountProps {
    pub name: AppName,
    pub container: Arc<dyn Container>,
    pub state: StateHandle,
    pub props: serde_json::Value,
}

/// The lifecycle capability every application implements.
///
/// The host is polymorphic over this trait, never over concrete
/// application types. All entry points are async: `mount`/`unmount`
/// resolve once the application has finished taking or releasing its
/// container.
#[async_trait]
pub trait Application: Send + Sync {
    /// Called once per bundle, before the first mount.
    async fn bootstrap(&self) -> Result<(), EntryError> {
        Ok(())
    }

    /// Take the container and start rendering.
    async fn mount(&self, props: MountProps) -> Result<(), EntryError>;

    /// Release the container.
    async fn unmount(&self, props: MountProps) -> Result<(), EntryError>;

    /// Live prop changes without a remount. Optional.
    async fn update(&self, _props: MountProps) -> Result<(), EntryError> {
        Ok(())
    }
}
