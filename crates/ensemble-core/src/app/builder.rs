//! Host assembly and fail-fast startup validation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::app::hooks::{LifecycleHooks, NoopHooks};
use crate::app::host::Host;
use crate::app::lifecycle::LifecycleOrchestrator;
use crate::app::prefetch::BundleCache;
use crate::domain::{AppName, ApplicationDescriptor, HostError, SharedState};
use crate::ports::{
    BundleLoader, Container, IdGenerator, IdleGate, SettleIdle, SystemClock, UlidGenerator,
};
use crate::registry::ApplicationRegistry;
use crate::router::RoutingStrategy;
use crate::store::GlobalStateStore;

/// Errors detected while assembling a host.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing applications: {0:?}. These applications were expected but not registered.")]
    MissingApplications(Vec<String>),

    #[error("no container provided for selector {selector} (required by {name})")]
    MissingContainer { selector: String, name: AppName },

    #[error("no bundle loader provided")]
    MissingLoader,
}

/// Builds a `Host`.
///
/// # Fail-fast design
/// - `expect_apps` declares the application set the deployment relies
///   on; `build` fails if any of them is unregistered.
/// - `build` also verifies that a loader is set and that every
///   descriptor's container selector has a container.
///
/// # Defaults
/// Hash routing, singular mode, no-op hooks, a short settle-delay idle
/// gate, system-clock ULID ids, empty initial state.
pub struct HostBuilder {
    initial_state: SharedState,
    routing: RoutingStrategy,
    singular: bool,
    registry: ApplicationRegistry,
    containers: HashMap<String, Arc<dyn Container>>,
    loader: Option<Arc<dyn BundleLoader>>,
    hooks: Arc<dyn LifecycleHooks>,
    idle_gate: Arc<dyn IdleGate>,
    ids: Arc<dyn IdGenerator>,
    expected_apps: Option<Vec<String>>,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            initial_state: SharedState::new(),
            routing: RoutingStrategy::default(),
            singular: true,
            registry: ApplicationRegistry::new(),
            containers: HashMap::new(),
            loader: None,
            hooks: Arc::new(NoopHooks),
            idle_gate: Arc::new(SettleIdle::new(Duration::from_millis(50))),
            ids: Arc::new(UlidGenerator::new(SystemClock)),
            expected_apps: None,
        }
    }

    /// The shared state the store starts with.
    pub fn initial_state(mut self, state: SharedState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn routing(mut self, routing: RoutingStrategy) -> Self {
        self.routing = routing;
        self
    }

    /// At most one application mounted at a time (the default).
    pub fn singular(mut self, singular: bool) -> Self {
        self.singular = singular;
        self
    }

    /// Register application descriptors (order matters: it drives
    /// activation-rule evaluation and prefetch order).
    pub fn register_apps(
        mut self,
        descriptors: Vec<ApplicationDescriptor>,
    ) -> Result<Self, HostError> {
        self.registry.register(descriptors)?;
        Ok(self)
    }

    /// Provide the container behind a selector.
    pub fn container(mut self, container: Arc<dyn Container>) -> Self {
        self.containers
            .insert(container.selector().to_string(), container);
        self
    }

    pub fn loader(mut self, loader: Arc<dyn BundleLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn LifecycleHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn idle_gate(mut self, idle_gate: Arc<dyn IdleGate>) -> Self {
        self.idle_gate = idle_gate;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Declare the applications this deployment expects. `build` fails
    /// unless all of them are registered.
    pub fn expect_apps(mut self, names: &[&str]) -> Self {
        let mut expected = Vec::new();
        for &name in names {
            expected.push(name.to_string());
        }
        self.expected_apps = Some(expected);
        self
    }

    pub fn build(self) -> Result<Host, BuildError> {
        if let Some(expected) = &self.expected_apps {
            let missing: Vec<String> = expected
                .iter()
                .filter(|name| self.registry.get(&AppName::new(name.as_str())).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingApplications(missing));
            }
        }

        let loader = self.loader.ok_or(BuildError::MissingLoader)?;

        for descriptor in self.registry.descriptors() {
            if !self.containers.contains_key(&descriptor.container) {
                return Err(BuildError::MissingContainer {
                    selector: descriptor.container.clone(),
                    name: descriptor.name.clone(),
                });
            }
        }

        let store = Arc::new(GlobalStateStore::new(self.initial_state));
        let registry = Arc::new(self.registry);
        let cache = Arc::new(BundleCache::new());
        let orchestrator = LifecycleOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&store),
            Arc::clone(&loader),
            self.hooks,
            Arc::clone(&self.ids),
            Arc::clone(&cache),
            self.containers,
            self.singular,
        );

        Ok(Host::new(
            orchestrator,
            store,
            registry,
            cache,
            loader,
            self.idle_gate,
            self.ids,
            self.routing,
        ))
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
