//! BundleLoader port - fetching/initializing application bundles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ApplicationDescriptor, EntryError};
use crate::ports::Application;

/// Loads an application's executable bundle.
///
/// This is the orchestrator's sole suspension point: a mount transition
/// awaits `load` before any entry point runs. No timeout is imposed
/// here; a caller that wants bounded loads wraps its loader.
#[async_trait]
pub trait BundleLoader: Send + Sync {
    async fn load(
        &self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Arc<dyn Application>, EntryError>;
}
