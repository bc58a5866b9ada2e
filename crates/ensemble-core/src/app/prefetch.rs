//! Prefetch: priority split and background bundle loading.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{AppName, ApplicationDescriptor, Priority};
use crate::ports::{Application, BundleLoader, IdleGate};

/// Deterministic partition of descriptors by priority tag: `high` goes
/// to the immediate set, everything else to the idle set. Stable: the
/// relative order within each set follows the input order.
pub fn partition(
    descriptors: &[Arc<ApplicationDescriptor>],
) -> (
    Vec<Arc<ApplicationDescriptor>>,
    Vec<Arc<ApplicationDescriptor>>,
) {
    descriptors
        .iter()
        .cloned()
        .partition(|descriptor| descriptor.priority == Priority::High)
}

/// Shared cache of loaded bundles.
///
/// Filled by prefetch, read by the orchestrator on activation; a cache
/// hit skips the loader entirely.
#[derive(Default)]
pub struct BundleCache {
    inner: Mutex<HashMap<AppName, Arc<dyn Application>>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &AppName) -> Option<Arc<dyn Application>> {
        self.inner.lock().unwrap().get(name).cloned()
    }

    pub fn insert(&self, name: AppName, bundle: Arc<dyn Application>) {
        self.inner.lock().unwrap().insert(name, bundle);
    }

    pub fn contains(&self, name: &AppName) -> bool {
        self.inner.lock().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// Background prefetch tasks.
///
/// - The immediate set starts loading as soon as the pool is spawned.
/// - Each idle-set load first waits on the gate; a gate that never
///   opens defers those loads indefinitely (best effort by contract).
/// - `request_shutdown` stops the tasks before their next load;
///   `shutdown_and_join` also waits for them.
pub struct PrefetchPool {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl PrefetchPool {
    pub fn spawn(
        immediate: Vec<Arc<ApplicationDescriptor>>,
        idle: Vec<Arc<ApplicationDescriptor>>,
        loader: Arc<dyn BundleLoader>,
        cache: Arc<BundleCache>,
        idle_gate: Arc<dyn IdleGate>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut joins = Vec::with_capacity(2);

        if !immediate.is_empty() {
            let loader = Arc::clone(&loader);
            let cache = Arc::clone(&cache);
            let mut rx = shutdown_rx.clone();
            joins.push(tokio::spawn(async move {
                prefetch_set("immediate", immediate, loader, cache, None, &mut rx).await;
            }));
        }

        if !idle.is_empty() {
            let mut rx = shutdown_rx;
            joins.push(tokio::spawn(async move {
                prefetch_set("idle", idle, loader, cache, Some(idle_gate), &mut rx).await;
            }));
        }

        Self { shutdown_tx, joins }
    }

    /// Request shutdown. Does not cancel an in-flight load; it just
    /// stops starting new ones.
    pub fn request_shutdown(&self) {
        // ignore send error: receivers may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for join in self.joins {
            let _ = join.await;
        }
    }
}

async fn prefetch_set(
    label: &str,
    descriptors: Vec<Arc<ApplicationDescriptor>>,
    loader: Arc<dyn BundleLoader>,
    cache: Arc<BundleCache>,
    idle_gate: Option<Arc<dyn IdleGate>>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    for descriptor in descriptors {
        if *shutdown_rx.borrow() {
            break;
        }
        if let Some(gate) = &idle_gate {
            // The gate may never open; racing it against shutdown keeps
            // teardown prompt.
            tokio::select! {
                _ = gate.wait_idle() => {}
                _ = shutdown_rx.changed() => continue,
            }
        }
        if cache.contains(&descriptor.name) {
            continue;
        }
        match loader.load(&descriptor).await {
            Ok(bundle) => cache.insert(descriptor.name.clone(), bundle),
            Err(err) => {
                // Best effort: the real activation will retry the load
                // and surface the failure.
                log::warn!("{label} prefetch failed for {}: {err}", descriptor.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryError;
    use crate::impls::InProcessLoader;
    use crate::ports::{AlwaysIdle, Application, MountProps, NeverIdle};
    use async_trait::async_trait;
    use std::time::Duration;

    struct InertApp;

    #[async_trait]
    impl Application for InertApp {
        async fn mount(&self, _props: MountProps) -> Result<(), EntryError> {
            Ok(())
        }

        async fn unmount(&self, _props: MountProps) -> Result<(), EntryError> {
            Ok(())
        }
    }

    fn descriptor(name: &str, priority: Priority) -> Arc<ApplicationDescriptor> {
        Arc::new(
            ApplicationDescriptor::new(name, format!("//cdn/{name}"), "#c", format!("/{name}"))
                .with_priority(priority),
        )
    }

    fn loader_for(names: &[&str]) -> Arc<InProcessLoader> {
        let mut loader = InProcessLoader::new();
        for name in names {
            loader = loader.register(AppName::new(*name), Arc::new(InertApp));
        }
        Arc::new(loader)
    }

    async fn wait_for(cache: &BundleCache, name: &AppName) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !cache.contains(name) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("bundle should appear in the cache");
    }

    #[test]
    fn partition_splits_by_priority_regardless_of_order() {
        let a = descriptor("a", Priority::High);
        let b = descriptor("b", Priority::Low);

        for input in [vec![a.clone(), b.clone()], vec![b.clone(), a.clone()]] {
            let (immediate, idle) = partition(&input);
            assert_eq!(immediate.len(), 1);
            assert_eq!(immediate[0].name.as_str(), "a");
            assert_eq!(idle.len(), 1);
            assert_eq!(idle[0].name.as_str(), "b");
        }
    }

    #[test]
    fn partition_is_stable_within_sets() {
        let input = vec![
            descriptor("h1", Priority::High),
            descriptor("l1", Priority::Low),
            descriptor("h2", Priority::High),
            descriptor("l2", Priority::Low),
        ];

        let (immediate, idle) = partition(&input);

        let names = |set: &[Arc<ApplicationDescriptor>]| -> Vec<String> {
            set.iter().map(|d| d.name.to_string()).collect()
        };
        assert_eq!(names(&immediate), vec!["h1", "h2"]);
        assert_eq!(names(&idle), vec!["l1", "l2"]);
    }

    #[tokio::test]
    async fn immediate_set_loads_without_waiting_for_idle() {
        let cache = Arc::new(BundleCache::new());
        let pool = PrefetchPool::spawn(
            vec![descriptor("eager", Priority::High)],
            Vec::new(),
            loader_for(&["eager"]),
            Arc::clone(&cache),
            Arc::new(NeverIdle),
        );

        wait_for(&cache, &AppName::new("eager")).await;
        pool.shutdown_and_join().await;
    }

    #[tokio::test]
    async fn idle_set_loads_once_the_gate_opens() {
        let cache = Arc::new(BundleCache::new());
        let pool = PrefetchPool::spawn(
            Vec::new(),
            vec![descriptor("lazy", Priority::Low)],
            loader_for(&["lazy"]),
            Arc::clone(&cache),
            Arc::new(AlwaysIdle),
        );

        wait_for(&cache, &AppName::new("lazy")).await;
        pool.shutdown_and_join().await;
    }

    #[tokio::test]
    async fn idle_set_is_deferred_while_the_gate_never_opens() {
        let cache = Arc::new(BundleCache::new());
        let pool = PrefetchPool::spawn(
            Vec::new(),
            vec![descriptor("lazy", Priority::Low)],
            loader_for(&["lazy"]),
            Arc::clone(&cache),
            Arc::new(NeverIdle),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.is_empty());

        // Shutdown still completes even though the gate is stuck.
        pool.shutdown_and_join().await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn prefetch_failure_is_skipped_not_fatal() {
        let cache = Arc::new(BundleCache::new());
        // Loader knows "known" but not "missing".
        let pool = PrefetchPool::spawn(
            vec![
                descriptor("missing", Priority::High),
                descriptor("known", Priority::High),
            ],
            Vec::new(),
            loader_for(&["known"]),
            Arc::clone(&cache),
            Arc::new(AlwaysIdle),
        );

        wait_for(&cache, &AppName::new("known")).await;
        assert!(!cache.contains(&AppName::new("missing")));
        pool.shutdown_and_join().await;
    }
}
