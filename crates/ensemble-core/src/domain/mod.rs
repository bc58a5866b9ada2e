//! Domain model (names, ids, descriptors, shared state, lifecycle states, errors).

pub mod app_name;
pub mod descriptor;
pub mod errors;
pub mod ids;
pub mod shared_state;
pub mod state;

pub use app_name::AppName;
pub use descriptor::{ActivationRule, ApplicationDescriptor, Priority};
pub use errors::{EntryError, HostError};
pub use ids::{Id, IdMarker, InstanceId, OwnerToken};
pub use shared_state::SharedState;
pub use state::AppState;
