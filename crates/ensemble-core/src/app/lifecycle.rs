//! Lifecycle orchestration: the central state machine.

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::hooks::LifecycleHooks;
use crate::app::instance::ApplicationInstance;
use crate::app::prefetch::BundleCache;
use crate::domain::{AppName, AppState, ApplicationDescriptor, HostError};
use crate::observability::{AppStatusView, HostCounts};
use crate::ports::{BundleLoader, Container, IdGenerator, MountProps};
use crate::registry::ApplicationRegistry;
use crate::router;
use crate::store::{GlobalStateStore, StateHandle};

/// Drives every registered application through its lifecycle.
///
/// Design:
/// - `handle_route` diffs the desired set against the current one and
///   runs all deactivations before any activation, so a container is
///   always empty before the next `mount` begins.
/// - Transitions are serialized: the caller (`Host`) holds this behind
///   an async mutex, so no two applications are ever mid-transition
///   concurrently.
/// - A failing transition forces teardown of that instance only; the
///   first error is returned after the remaining transitions ran.
pub struct LifecycleOrchestrator {
    registry: Arc<ApplicationRegistry>,
    store: Arc<GlobalStateStore>,
    loader: Arc<dyn BundleLoader>,
    hooks: Arc<dyn LifecycleHooks>,
    ids: Arc<dyn IdGenerator>,
    cache: Arc<BundleCache>,
    containers: HashMap<String, Arc<dyn Container>>,
    instances: HashMap<AppName, ApplicationInstance>,
    singular: bool,
}

impl LifecycleOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        registry: Arc<ApplicationRegistry>,
        store: Arc<GlobalStateStore>,
        loader: Arc<dyn BundleLoader>,
        hooks: Arc<dyn LifecycleHooks>,
        ids: Arc<dyn IdGenerator>,
        cache: Arc<BundleCache>,
        containers: HashMap<String, Arc<dyn Container>>,
        singular: bool,
    ) -> Self {
        Self {
            registry,
            store,
            loader,
            hooks,
            ids,
            cache,
            containers,
            instances: HashMap::new(),
            singular,
        }
    }

    /// Apply a route resolution: unmount what no longer matches, then
    /// mount what newly does.
    ///
    /// In singular mode only the first match (registration order) is
    /// activated. Failures force teardown of the failing instance and
    /// the first one is returned once everything else was attempted.
    pub async fn handle_route(&mut self, path: &str) -> Result<(), HostError> {
        let mut desired = router::resolve(path, &self.registry);
        if self.singular {
            desired.truncate(1);
        }

        let mut first_error: Option<HostError> = None;

        let to_deactivate: Vec<AppName> = self
            .instances
            .iter()
            .filter(|(name, instance)| instance.state.is_active() && !desired.contains(name))
            .map(|(name, _)| name.clone())
            .collect();
        for name in to_deactivate {
            if let Err(err) = self.deactivate(&name).await {
                log::error!("teardown of {name} failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        for name in desired {
            if self
                .instances
                .get(&name)
                .is_some_and(|instance| instance.state.is_active())
            {
                continue;
            }
            if let Err(err) = self.activate(&name).await {
                log::error!("activation of {name} failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Instance counts per state (applications without an instance yet
    /// count as registered).
    pub fn counts(&self) -> HostCounts {
        let mut counts = HostCounts::default();
        for descriptor in self.registry.descriptors() {
            match self.instances.get(&descriptor.name).map(|i| i.state) {
                None | Some(AppState::Registered) => counts.registered += 1,
                Some(AppState::Loading) => counts.loading += 1,
                Some(AppState::Mounted) => counts.mounted += 1,
                Some(AppState::Unmounting) => counts.unmounting += 1,
                Some(AppState::Unmounted) => counts.unmounted += 1,
            }
        }
        counts
    }

    pub fn status(&self, name: &AppName) -> Option<AppStatusView> {
        let descriptor = self.registry.get(name)?;
        let instance = self.instances.get(name);
        Some(AppStatusView {
            name: name.clone(),
            state: instance
                .map(|i| i.state)
                .unwrap_or(AppState::Registered),
            loaded: instance.is_some_and(|i| i.bundle.is_some()) || self.cache.contains(name),
            priority: descriptor.priority,
            last_error: instance.and_then(|i| i.last_error.clone()),
        })
    }

    /// Run one application up to `Mounted`.
    ///
    /// Order: `before_load` -> load (await, prefetched bundles skip the
    /// loader) -> `bootstrap` once -> `before_mount` -> `mount` ->
    /// `after_mount`.
    async fn activate(&mut self, name: &AppName) -> Result<(), HostError> {
        let descriptor = self
            .registry
            .get(name)
            .ok_or_else(|| HostError::UnknownApplication(name.clone()))?;
        let container = self
            .containers
            .get(&descriptor.container)
            .cloned()
            .ok_or_else(|| HostError::ContainerMissing(descriptor.container.clone()))?;

        // Exclusive container ownership: fully unmount any occupant
        // before this mount begins, in every mode.
        if let Some(occupant) = self.container_occupant(&descriptor.container, name) {
            if let Err(err) = self.deactivate(&occupant).await {
                // Forced teardown already cleared the container, so the
                // mount can proceed; the failure is not silent though.
                log::warn!(
                    "evicting {occupant} from {} failed: {err}",
                    descriptor.container
                );
            }
        }

        if !self.instances.contains_key(name) {
            let owner = self.ids.owner_token();
            self.instances.insert(
                name.clone(),
                ApplicationInstance::new(Arc::clone(&descriptor), owner),
            );
        }

        self.hooks.before_load(&descriptor).await;
        let instance_id = self.ids.instance_id();
        if let Some(instance) = self.instances.get_mut(name) {
            instance.start_loading(instance_id);
        }

        // The sole suspension point: fetch the bundle.
        let bundle = match self.cache.get(name) {
            Some(bundle) => bundle,
            None => match self.loader.load(&descriptor).await {
                Ok(bundle) => {
                    self.cache.insert(name.clone(), Arc::clone(&bundle));
                    bundle
                }
                Err(err) => {
                    let reason = err.to_string();
                    self.force_teardown(name, &container, reason.clone());
                    return Err(HostError::LoadFailure {
                        name: name.clone(),
                        reason,
                    });
                }
            },
        };

        let needs_bootstrap = match self.instances.get_mut(name) {
            Some(instance) => {
                instance.bundle = Some(Arc::clone(&bundle));
                !instance.bootstrapped
            }
            None => false,
        };
        if needs_bootstrap {
            if let Err(err) = bundle.bootstrap().await {
                let reason = err.to_string();
                self.force_teardown(name, &container, reason.clone());
                return Err(HostError::LoadFailure {
                    name: name.clone(),
                    reason,
                });
            }
            if let Some(instance) = self.instances.get_mut(name) {
                instance.bootstrapped = true;
            }
        }

        self.hooks.before_mount(&descriptor).await;

        let props = self.mount_props(name, &descriptor, &container);
        if let Err(err) = bundle.mount(props).await {
            let reason = err.to_string();
            self.force_teardown(name, &container, reason.clone());
            return Err(HostError::MountFailure {
                name: name.clone(),
                reason,
            });
        }

        if let Some(instance) = self.instances.get_mut(name) {
            instance.mark_mounted();
        }
        self.hooks.after_mount(&descriptor).await;
        Ok(())
    }

    /// Take one mounted application down to `Registered`.
    ///
    /// Order: `unmount` resolves -> listener unsubscribed -> container
    /// cleared -> `after_unmount`.
    async fn deactivate(&mut self, name: &AppName) -> Result<(), HostError> {
        let (descriptor, owner, bundle) = match self.instances.get(name) {
            Some(instance) if instance.state.is_mounted() => (
                Arc::clone(&instance.descriptor),
                instance.owner,
                instance.bundle.clone(),
            ),
            _ => return Ok(()),
        };
        let container = self
            .containers
            .get(&descriptor.container)
            .cloned()
            .ok_or_else(|| HostError::ContainerMissing(descriptor.container.clone()))?;

        if let Some(instance) = self.instances.get_mut(name) {
            instance.begin_unmount();
        }

        let result = match &bundle {
            Some(bundle) => {
                let props = self.mount_props(name, &descriptor, &container);
                bundle.unmount(props).await
            }
            None => Ok(()),
        };

        // The listener dies with its owning application, and the
        // container is empty before any next mount.
        self.store.unsubscribe(owner);
        container.clear();

        match result {
            Ok(()) => {
                if let Some(instance) = self.instances.get_mut(name) {
                    instance.finish_unmount();
                }
                self.hooks.after_unmount(&descriptor).await;
                Ok(())
            }
            Err(err) => {
                let reason = err.to_string();
                if let Some(instance) = self.instances.get_mut(name) {
                    instance.mark_unmounted(reason.clone());
                }
                Err(HostError::UnmountFailure {
                    name: name.clone(),
                    reason,
                })
            }
        }
    }

    /// Fail-safe teardown: the instance rests in `Unmounted`, its
    /// container is forcibly cleared, its store subscription dropped.
    /// Other instances are untouched.
    fn force_teardown(&mut self, name: &AppName, container: &Arc<dyn Container>, reason: String) {
        container.clear();
        if let Some(instance) = self.instances.get_mut(name) {
            self.store.unsubscribe(instance.owner);
            instance.mark_unmounted(reason);
        }
    }

    fn container_occupant(&self, selector: &str, incoming: &AppName) -> Option<AppName> {
        self.instances
            .iter()
            .find(|(name, instance)| {
                instance.state.is_mounted()
                    && instance.descriptor.container == selector
                    && *name != incoming
            })
            .map(|(name, _)| name.clone())
    }

    fn mount_props(
        &self,
        name: &AppName,
        descriptor: &Arc<ApplicationDescriptor>,
        container: &Arc<dyn Container>,
    ) -> MountProps {
        let owner = self
            .instances
            .get(name)
            .map(|instance| instance.owner)
            .unwrap_or_else(|| self.ids.owner_token());
        MountProps {
            name: name.clone(),
            container: Arc::clone(container),
            state: StateHandle::new(Arc::clone(&self.store), owner),
            props: descriptor.props.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builder::HostBuilder;
    use crate::app::host::Host;
    use crate::domain::{EntryError, Priority, SharedState};
    use crate::impls::{InProcessLoader, TextContainer};
    use crate::ports::Application;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Shared log of hook and entry-point invocations.
    struct EventLog(Mutex<Vec<String>>);

    impl EventLog {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }

        fn push(&self, event: impl Into<String>) {
            self.0.lock().unwrap().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.0.lock().unwrap().clear();
        }
    }

    struct RecordingApp {
        name: &'static str,
        log: Arc<EventLog>,
        fail_mount: bool,
        subscribe_on_mount: bool,
    }

    impl RecordingApp {
        fn new(name: &'static str, log: &Arc<EventLog>) -> Arc<Self> {
            Arc::new(Self {
                name,
                log: Arc::clone(log),
                fail_mount: false,
                subscribe_on_mount: false,
            })
        }
    }

    #[async_trait]
    impl Application for RecordingApp {
        async fn bootstrap(&self) -> Result<(), EntryError> {
            self.log.push(format!("{}.bootstrap", self.name));
            Ok(())
        }

        async fn mount(&self, props: MountProps) -> Result<(), EntryError> {
            // Render first so a failing mount leaves visible residue for
            // the forced-clear assertion.
            props.container.set_content(&format!("<{}>", self.name));
            if self.fail_mount {
                return Err(EntryError::new("mount exploded"));
            }
            if self.subscribe_on_mount {
                let log = Arc::clone(&self.log);
                let name = self.name;
                props.state.on_global_state_change(
                    Arc::new(move |_, _| log.push(format!("{name}.saw_change"))),
                    false,
                );
            }
            self.log.push(format!("{}.mount", self.name));
            Ok(())
        }

        async fn unmount(&self, props: MountProps) -> Result<(), EntryError> {
            props.container.clear();
            self.log.push(format!("{}.unmount", self.name));
            Ok(())
        }
    }

    struct RecordingHooks(Arc<EventLog>);

    #[async_trait]
    impl LifecycleHooks for RecordingHooks {
        async fn before_load(&self, descriptor: &ApplicationDescriptor) {
            self.0.push(format!("before_load({})", descriptor.name));
        }

        async fn before_mount(&self, descriptor: &ApplicationDescriptor) {
            self.0.push(format!("before_mount({})", descriptor.name));
        }

        async fn after_mount(&self, descriptor: &ApplicationDescriptor) {
            self.0.push(format!("after_mount({})", descriptor.name));
        }

        async fn after_unmount(&self, descriptor: &ApplicationDescriptor) {
            self.0.push(format!("after_unmount({})", descriptor.name));
        }
    }

    fn descriptor(name: &str, rule: &str, container: &str) -> ApplicationDescriptor {
        ApplicationDescriptor::new(name, format!("//cdn/{name}"), container, rule)
    }

    fn sub_container() -> Arc<TextContainer> {
        Arc::new(TextContainer::new("#sub-container"))
    }

    /// The demo pair: sub-react and sub-vue sharing one container,
    /// singular mode.
    fn singular_host(log: &Arc<EventLog>, container: &Arc<TextContainer>) -> Host {
        let loader = InProcessLoader::new()
            .register(AppName::new("sub-react"), RecordingApp::new("sub-react", log))
            .register(AppName::new("sub-vue"), RecordingApp::new("sub-vue", log));

        HostBuilder::new()
            .initial_state(SharedState::from_value(json!({ "count": 0 })))
            .register_apps(vec![
                descriptor("sub-react", "/sub-react", "#sub-container"),
                descriptor("sub-vue", "/sub-vue", "#sub-container"),
            ])
            .unwrap()
            .container(Arc::clone(container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .hooks(Arc::new(RecordingHooks(Arc::clone(log))))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn first_activation_runs_hooks_and_entry_points_in_order() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        host.navigate("#/sub-react").await.unwrap();

        assert_eq!(
            log.events(),
            vec![
                "before_load(sub-react)",
                "sub-react.bootstrap",
                "before_mount(sub-react)",
                "sub-react.mount",
                "after_mount(sub-react)",
            ]
        );
        assert_eq!(container.content(), "<sub-react>");
    }

    #[tokio::test]
    async fn singular_switch_never_interleaves() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        host.navigate("#/sub-react").await.unwrap();
        log.clear();

        host.navigate("#/sub-vue").await.unwrap();

        // The old application fully unmounts before anything happens
        // for the new one.
        assert_eq!(
            log.events(),
            vec![
                "sub-react.unmount",
                "after_unmount(sub-react)",
                "before_load(sub-vue)",
                "sub-vue.bootstrap",
                "before_mount(sub-vue)",
                "sub-vue.mount",
                "after_mount(sub-vue)",
            ]
        );

        let counts = host.counts().await;
        assert_eq!(counts.mounted, 1);
        assert_eq!(container.content(), "<sub-vue>");
    }

    #[tokio::test]
    async fn navigating_home_unmounts_everything() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        host.navigate("#/sub-vue").await.unwrap();
        host.navigate("#/").await.unwrap();

        let counts = host.counts().await;
        assert_eq!(counts.mounted, 0);
        assert_eq!(counts.registered, 2);
        assert!(container.is_empty());
    }

    #[tokio::test]
    async fn bundle_loads_and_bootstraps_once_across_remounts() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        host.navigate("#/sub-vue").await.unwrap();
        host.navigate("#/").await.unwrap();
        host.navigate("#/sub-vue").await.unwrap();

        let events = log.events();
        let bootstraps = events.iter().filter(|e| e.ends_with(".bootstrap")).count();
        let mounts = events.iter().filter(|e| e.ends_with(".mount")).count();
        assert_eq!(bootstraps, 1);
        assert_eq!(mounts, 2);
    }

    #[tokio::test]
    async fn orchestrator_unsubscribes_the_application_on_unmount() {
        let log = EventLog::new();
        let container = sub_container();

        let app = Arc::new(RecordingApp {
            name: "listener",
            log: Arc::clone(&log),
            fail_mount: false,
            subscribe_on_mount: true,
        });
        let loader = InProcessLoader::new().register(AppName::new("listener"), app);
        let host = HostBuilder::new()
            .initial_state(SharedState::from_value(json!({ "count": 0 })))
            .register_apps(vec![descriptor("listener", "/listener", "#sub-container")])
            .unwrap()
            .container(Arc::clone(&container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .build()
            .unwrap();

        host.navigate("#/listener").await.unwrap();
        host.store()
            .set_state(SharedState::from_value(json!({ "count": 1 })));
        host.navigate("#/").await.unwrap();
        host.store()
            .set_state(SharedState::from_value(json!({ "count": 2 })));

        let changes = log
            .events()
            .iter()
            .filter(|e| e.ends_with(".saw_change"))
            .count();
        // One notification while mounted, none after the unmount - the
        // application never called off itself, the orchestrator did.
        assert_eq!(changes, 1);
        assert_eq!(host.store().listener_count(), 0);
    }

    #[tokio::test]
    async fn mount_failure_forces_teardown_and_spares_siblings() {
        let log = EventLog::new();
        let container_a = Arc::new(TextContainer::new("#a"));
        let container_b = Arc::new(TextContainer::new("#b"));

        let stable = RecordingApp::new("stable", &log);
        let flaky = Arc::new(RecordingApp {
            name: "flaky",
            log: Arc::clone(&log),
            fail_mount: true,
            subscribe_on_mount: false,
        });
        let loader = InProcessLoader::new()
            .register(AppName::new("stable"), stable)
            .register(AppName::new("flaky"), flaky);

        let host = HostBuilder::new()
            .singular(false)
            .register_apps(vec![
                descriptor("stable", "/both", "#a"),
                descriptor("flaky", "/both", "#b"),
            ])
            .unwrap()
            .container(Arc::clone(&container_a) as Arc<dyn Container>)
            .container(Arc::clone(&container_b) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .build()
            .unwrap();

        let err = host.navigate("#/both").await.unwrap_err();
        assert!(matches!(
            err,
            HostError::MountFailure { ref name, .. } if name.as_str() == "flaky"
        ));

        // The failing instance rests in unmounted with an empty
        // container; its sibling is untouched.
        let flaky_status = host.status(&AppName::new("flaky")).await.unwrap();
        assert_eq!(flaky_status.state, AppState::Unmounted);
        assert_eq!(flaky_status.last_error.as_deref(), Some("mount exploded"));
        assert!(container_b.is_empty());

        let stable_status = host.status(&AppName::new("stable")).await.unwrap();
        assert_eq!(stable_status.state, AppState::Mounted);
        assert_eq!(container_a.content(), "<stable>");
    }

    #[tokio::test]
    async fn failed_application_can_be_activated_again() {
        let log = EventLog::new();
        let container = sub_container();

        let flaky = Arc::new(RecordingApp {
            name: "flaky",
            log: Arc::clone(&log),
            fail_mount: true,
            subscribe_on_mount: false,
        });
        let loader = InProcessLoader::new().register(AppName::new("flaky"), flaky);
        let host = HostBuilder::new()
            .register_apps(vec![descriptor("flaky", "/flaky", "#sub-container")])
            .unwrap()
            .container(Arc::clone(&container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .build()
            .unwrap();

        assert!(host.navigate("#/flaky").await.is_err());
        host.navigate("#/").await.unwrap();

        // Unmounted is a resting state, not a dead end.
        let err = host.navigate("#/flaky").await.unwrap_err();
        assert!(matches!(err, HostError::MountFailure { .. }));
    }

    #[tokio::test]
    async fn shared_container_is_evicted_in_non_singular_mode() {
        let log = EventLog::new();
        let container = sub_container();

        let loader = InProcessLoader::new()
            .register(AppName::new("first"), RecordingApp::new("first", &log))
            .register(AppName::new("second"), RecordingApp::new("second", &log));
        let host = HostBuilder::new()
            .singular(false)
            .register_apps(vec![
                descriptor("first", "/both", "#sub-container"),
                descriptor("second", "/both", "#sub-container"),
            ])
            .unwrap()
            .container(Arc::clone(&container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .build()
            .unwrap();

        host.navigate("#/both").await.unwrap();

        // Both matched, but the container has exactly one owner.
        let counts = host.counts().await;
        assert_eq!(counts.mounted, 1);
        assert_eq!(container.content(), "<second>");
    }

    #[tokio::test]
    async fn navigation_during_a_load_queues_the_unmount() {
        let log = EventLog::new();
        let container = sub_container();

        let loader = InProcessLoader::new()
            .with_latency(Duration::from_millis(80))
            .register(AppName::new("slow"), RecordingApp::new("slow", &log));
        let host = Arc::new(
            HostBuilder::new()
                .register_apps(vec![descriptor("slow", "/slow", "#sub-container")])
                .unwrap()
                .container(Arc::clone(&container) as Arc<dyn Container>)
                .loader(Arc::new(loader))
                .build()
                .unwrap(),
        );

        let mounting = tokio::spawn({
            let host = Arc::clone(&host);
            async move { host.navigate("#/slow").await }
        });
        // Let the first navigation take the lock and enter its load.
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Navigating away mid-load waits for the in-flight mount, then
        // unmounts - no hard interrupt.
        host.navigate("#/").await.unwrap();
        mounting.await.unwrap().unwrap();

        assert_eq!(log.events(), vec![
            "slow.bootstrap",
            "slow.mount",
            "slow.unmount",
        ]);
        let counts = host.counts().await;
        assert_eq!(counts.mounted, 0);
        assert!(container.is_empty());
    }

    #[tokio::test]
    async fn prefetched_bundle_skips_the_loader() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        // Simulate a completed prefetch by seeding the shared cache.
        host.bundle_cache().insert(
            AppName::new("sub-vue"),
            RecordingApp::new("sub-vue", &log) as Arc<dyn Application>,
        );

        host.navigate("#/sub-vue").await.unwrap();

        let status = host.status(&AppName::new("sub-vue")).await.unwrap();
        assert_eq!(status.state, AppState::Mounted);
        assert!(status.loaded);
    }

    #[tokio::test]
    async fn unknown_route_mounts_nothing() {
        let log = EventLog::new();
        let container = sub_container();
        let host = singular_host(&log, &container);

        host.navigate("#/nowhere").await.unwrap();

        assert!(log.events().is_empty());
        assert_eq!(host.counts().await.mounted, 0);
    }

    #[tokio::test]
    async fn mount_props_carry_descriptor_side_channel() {
        let log = EventLog::new();
        let container = sub_container();

        struct PropsProbe(Arc<EventLog>);

        #[async_trait]
        impl Application for PropsProbe {
            async fn mount(&self, props: MountProps) -> Result<(), EntryError> {
                self.0.push(format!(
                    "props: main={} count={}",
                    props.props["mainAppName"].as_str().unwrap_or("?"),
                    props.state.snapshot().get("count").unwrap_or(&json!(null))
                ));
                Ok(())
            }

            async fn unmount(&self, _props: MountProps) -> Result<(), EntryError> {
                Ok(())
            }
        }

        let loader = InProcessLoader::new().register(
            AppName::new("probe"),
            Arc::new(PropsProbe(Arc::clone(&log))),
        );
        let host = HostBuilder::new()
            .initial_state(SharedState::from_value(json!({ "count": 7 })))
            .register_apps(vec![
                descriptor("probe", "/probe", "#sub-container")
                    .with_props(json!({ "mainAppName": "host" }))
                    .with_priority(Priority::High),
            ])
            .unwrap()
            .container(Arc::clone(&container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .build()
            .unwrap();

        host.navigate("#/probe").await.unwrap();

        assert_eq!(log.events(), vec!["props: main=host count=7"]);
    }
}
