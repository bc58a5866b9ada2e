use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use ensemble_core::app::{HostBuilder, HostShell};
use ensemble_core::domain::{AppName, ApplicationDescriptor, EntryError, Priority, SharedState};
use ensemble_core::impls::{InProcessLoader, TextContainer};
use ensemble_core::observability::TimingMonitor;
use ensemble_core::ports::{Application, Container, MountProps, SettleIdle, SystemClock};
use ensemble_core::router::RoutingStrategy;

/// A sample sub-application: renders the shared state into its container
/// on every change.
struct StatePanel {
    title: &'static str,
}

#[async_trait]
impl Application for StatePanel {
    async fn bootstrap(&self) -> Result<(), EntryError> {
        println!("[{}] bootstrap", self.title);
        Ok(())
    }

    async fn mount(&self, props: MountProps) -> Result<(), EntryError> {
        println!("[{}] mount into {}", self.title, props.container.selector());
        let title = self.title;
        let container = Arc::clone(&props.container);
        props.state.on_global_state_change(
            Arc::new(move |state, _previous| {
                let user = state
                    .get("user")
                    .and_then(|user| user.get("name"))
                    .and_then(|name| name.as_str())
                    .unwrap_or("?")
                    .to_string();
                let theme = state
                    .get("theme")
                    .and_then(|theme| theme.as_str())
                    .unwrap_or("?")
                    .to_string();
                let count = state
                    .get("count")
                    .and_then(|count| count.as_i64())
                    .unwrap_or(0);
                container.set_content(&format!(
                    "[{title}] user={user} theme={theme} count={count}"
                ));
            }),
            true,
        );
        Ok(())
    }

    async fn unmount(&self, props: MountProps) -> Result<(), EntryError> {
        println!("[{}] unmount", self.title);
        props.state.off_global_state_change();
        props.container.clear();
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    // (A) Containers: one for the host chrome, one shared by the
    // sub-applications.
    let chrome = Arc::new(TextContainer::new("#host"));
    let sub_container = Arc::new(TextContainer::new("#sub-container"));

    // (B) Descriptors: sub-vue prefetches immediately, sub-react waits
    // for idle time.
    let apps = vec![
        ApplicationDescriptor::new("sub-vue", "//localhost:7100", "#sub-container", "/sub-vue")
            .with_props(json!({ "mainAppName": "ensemble-main" }))
            .with_priority(Priority::High),
        ApplicationDescriptor::new("sub-react", "//localhost:7200", "#sub-container", "/sub-react")
            .with_props(json!({ "mainAppName": "ensemble-main" }))
            .with_priority(Priority::Low),
    ];

    // (C) Loader serving the two in-process sample applications, with a
    // little simulated fetch latency so the timing report has something
    // to say.
    let loader = InProcessLoader::new()
        .with_latency(Duration::from_millis(30))
        .register(
            AppName::new("sub-vue"),
            Arc::new(StatePanel { title: "sub-vue" }),
        )
        .register(
            AppName::new("sub-react"),
            Arc::new(StatePanel { title: "sub-react" }),
        );

    let timing = Arc::new(TimingMonitor::new(SystemClock));

    // (D) Assemble the host: hash routing, singular mode, fail-fast on
    // the expected application set.
    let host = Arc::new(
        HostBuilder::new()
            .initial_state(SharedState::from_value(json!({
                "user": { "name": "guest", "role": "guest" },
                "theme": "light",
                "count": 0,
            })))
            .routing(RoutingStrategy::HashFragment)
            .singular(true)
            .register_apps(apps)
            .expect("unique application names")
            .container(Arc::clone(&sub_container) as Arc<dyn Container>)
            .loader(Arc::new(loader))
            .hooks(Arc::clone(&timing) as _)
            .idle_gate(Arc::new(SettleIdle::new(Duration::from_millis(100))))
            .expect_apps(&["sub-vue", "sub-react"])
            .build()
            .expect("host wiring"),
    );
    host.start();

    // (E) Shell: renders navigation + state into the chrome container.
    let shell = HostShell::new(Arc::clone(&host), Arc::clone(&chrome) as Arc<dyn Container>);
    println!("{}", shell.content());

    // (F) Walkthrough: navigate, mutate shared state, switch, report.
    shell.navigate("#/sub-vue").await.expect("mount sub-vue");
    println!("{}", sub_container.content());

    let store = host.store();
    store.set_state(SharedState::from_value(json!({
        "user": { "name": "alice", "role": "admin" },
    })));
    store.set_state(SharedState::from_value(json!({ "theme": "dark" })));
    let next = store
        .state()
        .get("count")
        .and_then(|count| count.as_i64())
        .unwrap_or(0)
        + 1;
    store.set_state(SharedState::from_value(json!({ "count": next })));
    println!("{}", sub_container.content());
    println!("{}", shell.content());

    shell
        .navigate("#/sub-react")
        .await
        .expect("switch to sub-react");
    println!("{}", sub_container.content());

    // (G) Status counts and the per-application performance report.
    let counts = host.counts().await;
    println!(
        "counts: {}",
        serde_json::to_string(&counts).expect("serializable counts")
    );
    for name in ["sub-vue", "sub-react"] {
        let name = AppName::new(name);
        if let Some(report) = timing.report(&name) {
            println!(
                "[{name}] load {}ms, mount {}ms, total {}ms",
                report.load_ms, report.mount_ms, report.total_ms
            );
        }
    }

    // (H) Clean teardown: the shell unsubscribes, prefetch stops.
    shell.teardown();
    host.shutdown().await;
}
