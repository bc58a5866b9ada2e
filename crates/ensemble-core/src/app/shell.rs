//! Host shell: navigation chrome and state reflection.

use std::sync::Arc;

use crate::app::host::Host;
use crate::domain::{HostError, OwnerToken, SharedState};
use crate::ports::Container;

/// The top-level surface of the host.
///
/// Owns its own chrome container (navigation links plus a state
/// summary), reflects every store change into it - subscribed with
/// `fire_immediately` so the first render happens before `new` returns -
/// and delegates all route-driven mount/unmount decisions to the host.
/// It never mutates application instances directly.
pub struct HostShell {
    host: Arc<Host>,
    container: Arc<dyn Container>,
    owner: OwnerToken,
}

impl HostShell {
    pub fn new(host: Arc<Host>, container: Arc<dyn Container>) -> Self {
        let owner = host.owner_token();

        let nav: Vec<String> = host
            .registry()
            .descriptors()
            .iter()
            .map(|descriptor| descriptor.name.to_string())
            .collect();
        let render_target = Arc::clone(&container);
        host.store().subscribe(
            owner,
            Arc::new(move |state, _previous| {
                render_target.set_content(&render(&nav, state));
            }),
            true,
        );

        Self {
            host,
            container,
            owner,
        }
    }

    /// Forward a navigation event to the host.
    pub async fn navigate(&self, location: &str) -> Result<(), HostError> {
        self.host.navigate(location).await
    }

    /// Current chrome content.
    pub fn content(&self) -> String {
        self.container.content()
    }

    /// Unsubscribe from the store. Mandatory before dropping the shell;
    /// listeners are never collected automatically.
    pub fn teardown(&self) {
        self.host.store().unsubscribe(self.owner);
    }
}

/// Render the chrome: one navigation line, one state line.
fn render(nav: &[String], state: &SharedState) -> String {
    let links: Vec<String> = nav.iter().map(|name| format!("#/{name}")).collect();
    let state_line = serde_json::to_string(state).unwrap_or_else(|_| "{}".to_string());
    format!("nav: {}\nstate: {}", links.join(" | "), state_line)
}
