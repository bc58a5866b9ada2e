//! In-process bundle loader (dev implementation).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{AppName, ApplicationDescriptor, EntryError};
use crate::ports::{Application, BundleLoader};

/// Serves pre-linked applications instead of fetching remote bundles.
///
/// Entry locators are ignored; applications are registered directly by
/// name. Optional simulated fetch latency makes the suspension point
/// observable in demos and tests.
pub struct InProcessLoader {
    bundles: HashMap<AppName, Arc<dyn Application>>,
    latency: Option<Duration>,
}

impl InProcessLoader {
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn register(mut self, name: AppName, application: Arc<dyn Application>) -> Self {
        self.bundles.insert(name, application);
        self
    }
}

impl Default for InProcessLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BundleLoader for InProcessLoader {
    async fn load(
        &self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Arc<dyn Application>, EntryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.bundles.get(&descriptor.name).cloned().ok_or_else(|| {
            EntryError::new(format!(
                "no bundle registered for {} (entry {})",
                descriptor.name, descriptor.entry
            ))
        })
    }
}
