//! Status views and lifecycle timing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::hooks::LifecycleHooks;
use crate::domain::{AppName, AppState, ApplicationDescriptor, Priority};
use crate::ports::Clock;

/// Instance counts per lifecycle state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostCounts {
    pub registered: usize,
    pub loading: usize,
    pub mounted: usize,
    pub unmounting: usize,
    pub unmounted: usize,
}

/// Serializable per-application status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStatusView {
    pub name: AppName,
    pub state: AppState,

    /// Bundle fetched already (prefetched or loaded on activation).
    pub loaded: bool,

    pub priority: Priority,
    pub last_error: Option<String>,
}

/// Load/mount durations for one application, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingReport {
    pub load_ms: i64,
    pub mount_ms: i64,
    pub total_ms: i64,
}

#[derive(Debug, Clone, Copy, Default)]
struct PhaseMarks {
    load_start: Option<DateTime<Utc>>,
    mount_start: Option<DateTime<Utc>>,
    mount_end: Option<DateTime<Utc>>,
}

/// Lifecycle hooks that time each application's load and mount phases.
///
/// - load  = `before_load` -> `before_mount` (bundle fetch/initialize)
/// - mount = `before_mount` -> `after_mount` (entry-point execution)
///
/// A re-activation restarts the marks, so `report` always describes the
/// latest completed mount.
pub struct TimingMonitor<C> {
    clock: C,
    marks: Mutex<HashMap<AppName, PhaseMarks>>,
}

impl<C: Clock> TimingMonitor<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            marks: Mutex::new(HashMap::new()),
        }
    }

    /// Durations for `name`, once its mount completed.
    pub fn report(&self, name: &AppName) -> Option<TimingReport> {
        let marks = self.marks.lock().unwrap().get(name).copied()?;
        let load_start = marks.load_start?;
        let mount_start = marks.mount_start?;
        let mount_end = marks.mount_end?;
        Some(TimingReport {
            load_ms: (mount_start - load_start).num_milliseconds(),
            mount_ms: (mount_end - mount_start).num_milliseconds(),
            total_ms: (mount_end - load_start).num_milliseconds(),
        })
    }
}

#[async_trait]
impl<C: Clock> LifecycleHooks for TimingMonitor<C> {
    async fn before_load(&self, descriptor: &ApplicationDescriptor) {
        let now = self.clock.now();
        let mut marks = self.marks.lock().unwrap();
        marks.insert(
            descriptor.name.clone(),
            PhaseMarks {
                load_start: Some(now),
                mount_start: None,
                mount_end: None,
            },
        );
    }

    async fn before_mount(&self, descriptor: &ApplicationDescriptor) {
        let now = self.clock.now();
        let mut marks = self.marks.lock().unwrap();
        if let Some(entry) = marks.get_mut(&descriptor.name) {
            entry.mount_start = Some(now);
        }
    }

    async fn after_mount(&self, descriptor: &ApplicationDescriptor) {
        let now = self.clock.now();
        let mut marks = self.marks.lock().unwrap();
        if let Some(entry) = marks.get_mut(&descriptor.name) {
            entry.mount_end = Some(now);
        }
    }
}
