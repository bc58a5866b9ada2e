//! IdGenerator port - id generation for instances and subscription owners.

use ulid::Ulid;

use crate::domain::ids::{InstanceId, OwnerToken};
use crate::ports::Clock;

/// Generates the runtime's ULID-based identifiers.
pub trait IdGenerator: Send + Sync {
    fn instance_id(&self) -> InstanceId;

    fn owner_token(&self) -> OwnerToken;
}

/// ULID generator: clock millis + random entropy.
///
/// With `FixedClock` the timestamp part becomes deterministic while the
/// ids stay unique.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn instance_id(&self) -> InstanceId {
        InstanceId::from(self.next())
    }

    fn owner_token(&self) -> OwnerToken {
        OwnerToken::from(self.next())
    }
}
