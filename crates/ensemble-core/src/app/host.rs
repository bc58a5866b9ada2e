//! Host runtime: the navigation-handling entry point.

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use crate::app::lifecycle::LifecycleOrchestrator;
use crate::app::prefetch::{BundleCache, PrefetchPool, partition};
use crate::domain::{AppName, HostError, OwnerToken};
use crate::observability::{AppStatusView, HostCounts};
use crate::ports::{BundleLoader, IdGenerator, IdleGate};
use crate::registry::ApplicationRegistry;
use crate::router::RoutingStrategy;
use crate::store::GlobalStateStore;

/// The assembled host.
///
/// All route-driven transitions run behind one async mutex: activation
/// and deactivation are serialized, and a navigation arriving while a
/// load is in flight waits for it and then unmounts - the queued-unmount
/// behavior, with no hard interrupt.
pub struct Host {
    orchestrator: Mutex<LifecycleOrchestrator>,
    store: Arc<GlobalStateStore>,
    registry: Arc<ApplicationRegistry>,
    cache: Arc<BundleCache>,
    loader: Arc<dyn BundleLoader>,
    idle_gate: Arc<dyn IdleGate>,
    ids: Arc<dyn IdGenerator>,
    routing: RoutingStrategy,
    prefetch: StdMutex<Option<PrefetchPool>>,
}

impl Host {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        orchestrator: LifecycleOrchestrator,
        store: Arc<GlobalStateStore>,
        registry: Arc<ApplicationRegistry>,
        cache: Arc<BundleCache>,
        loader: Arc<dyn BundleLoader>,
        idle_gate: Arc<dyn IdleGate>,
        ids: Arc<dyn IdGenerator>,
        routing: RoutingStrategy,
    ) -> Self {
        Self {
            orchestrator: Mutex::new(orchestrator),
            store,
            registry,
            cache,
            loader,
            idle_gate,
            ids,
            routing,
            prefetch: StdMutex::new(None),
        }
    }

    /// Start background prefetch: the immediate set begins loading now,
    /// the idle set waits behind the idle gate. Idempotent.
    pub fn start(&self) {
        let mut slot = self.prefetch.lock().unwrap();
        if slot.is_some() {
            return;
        }
        let (immediate, idle) = partition(self.registry.descriptors());
        *slot = Some(PrefetchPool::spawn(
            immediate,
            idle,
            Arc::clone(&self.loader),
            Arc::clone(&self.cache),
            Arc::clone(&self.idle_gate),
        ));
    }

    /// Handle a navigation event.
    ///
    /// Parses `location` with the configured strategy, recomputes the
    /// desired set and drives the transitions. Transition failures come
    /// back as the error value; they never crash the shell or other
    /// instances.
    pub async fn navigate(&self, location: &str) -> Result<(), HostError> {
        let path = self.routing.extract_path(location);
        self.orchestrator.lock().await.handle_route(&path).await
    }

    pub fn store(&self) -> Arc<GlobalStateStore> {
        Arc::clone(&self.store)
    }

    pub fn registry(&self) -> Arc<ApplicationRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn bundle_cache(&self) -> Arc<BundleCache> {
        Arc::clone(&self.cache)
    }

    /// Mint an owner token for a host-side subscriber (the shell).
    pub fn owner_token(&self) -> OwnerToken {
        self.ids.owner_token()
    }

    pub async fn counts(&self) -> HostCounts {
        self.orchestrator.lock().await.counts()
    }

    pub async fn status(&self, name: &AppName) -> Option<AppStatusView> {
        self.orchestrator.lock().await.status(name)
    }

    /// Stop background prefetch and wait for it.
    pub async fn shutdown(&self) {
        let pool = self.prefetch.lock().unwrap().take();
        if let Some(pool) = pool {
            pool.shutdown_and_join().await;
        }
    }
}
