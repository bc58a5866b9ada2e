//! Application instance record.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::{AppState, ApplicationDescriptor, InstanceId, OwnerToken};
use crate::ports::Application;

/// Runtime record for one registered application.
///
/// Design:
/// - Single source of truth for the instance's lifecycle state.
/// - All state transitions happen here, via methods.
/// - Holds a read-only back-reference to its descriptor, never owns it.
pub struct ApplicationInstance {
    pub descriptor: Arc<ApplicationDescriptor>,

    pub state: AppState,

    /// Fresh id per activation (None while inactive).
    pub instance_id: Option<InstanceId>,

    /// Store subscription owner for this application's injected
    /// accessors; unsubscribed on unmount.
    pub owner: OwnerToken,

    /// Cached bundle: loaded once, survives unmount.
    pub bundle: Option<Arc<dyn Application>>,

    /// `bootstrap` has already run for the cached bundle.
    pub bootstrapped: bool,

    /// Last transition failure (if any).
    pub last_error: Option<String>,

    /// Timestamps for observability.
    pub created_at: Instant,
    pub updated_at: Instant,
}

impl ApplicationInstance {
    pub fn new(descriptor: Arc<ApplicationDescriptor>, owner: OwnerToken) -> Self {
        let now = Instant::now();
        Self {
            descriptor,
            state: AppState::Registered,
            instance_id: None,
            owner,
            bundle: None,
            bootstrapped: false,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Registered/Unmounted -> Loading (a new activation begins).
    pub fn start_loading(&mut self, instance_id: InstanceId) {
        self.state = AppState::Loading;
        self.instance_id = Some(instance_id);
        self.last_error = None;
        self.touch();
    }

    /// Loading -> Mounted.
    pub fn mark_mounted(&mut self) {
        self.state = AppState::Mounted;
        self.touch();
    }

    /// Mounted -> Unmounting.
    pub fn begin_unmount(&mut self) {
        self.state = AppState::Unmounting;
        self.touch();
    }

    /// Normal teardown completed: back to Registered, ready for the
    /// next activation.
    pub fn finish_unmount(&mut self) {
        self.state = AppState::Registered;
        self.instance_id = None;
        self.touch();
    }

    /// Fail-safe teardown after a load or entry-point failure.
    pub fn mark_unmounted(&mut self, error: String) {
        self.state = AppState::Unmounted;
        self.instance_id = None;
        self.last_error = Some(error);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Instant::now();
    }
}
