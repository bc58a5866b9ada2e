//! Application lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Per-instance lifecycle state.
///
/// State transitions:
/// - Registered -> Loading -> Mounted -> Unmounting -> Registered (cycle)
/// - Loading | Mounted | Unmounting -> Unmounted (fail-safe teardown when
///   a load or entry point fails)
/// - Unmounted -> Loading (re-activation after a failure)
///
/// Design note: an enum keeps matching exhaustive and invalid states
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    /// Known to the registry, nothing loaded or mounted.
    Registered,

    /// Bundle fetch/initialization in flight (the sole suspension point).
    Loading,

    /// Holding its container and receiving state notifications.
    Mounted,

    /// `unmount` entry point in flight.
    Unmounting,

    /// Fail-safe resting state after a failed transition.
    Unmounted,
}

impl AppState {
    /// Active instances hold or are acquiring a container.
    pub fn is_active(self) -> bool {
        matches!(self, AppState::Loading | AppState::Mounted)
    }

    pub fn is_mounted(self) -> bool {
        matches!(self, AppState::Mounted)
    }
}
