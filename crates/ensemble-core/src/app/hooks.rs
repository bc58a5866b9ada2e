//! Lifecycle hooks fired around application transitions.

use async_trait::async_trait;

use crate::domain::ApplicationDescriptor;

/// Host-level lifecycle hooks.
///
/// Fixed firing order per transition: `before_load` -> `before_mount` ->
/// `after_mount`, and `after_unmount` once an unmount completes. In
/// singular mode, hooks of two applications never interleave.
///
/// Hooks are infallible; fallibility lives in the entry points and the
/// loader.
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    async fn before_load(&self, _descriptor: &ApplicationDescriptor) {}

    async fn before_mount(&self, _descriptor: &ApplicationDescriptor) {}

    async fn after_mount(&self, _descriptor: &ApplicationDescriptor) {}

    async fn after_unmount(&self, _descriptor: &ApplicationDescriptor) {}
}

/// Hooks that do nothing (the default wiring).
pub struct NoopHooks;

#[async_trait]
impl LifecycleHooks for NoopHooks {}
