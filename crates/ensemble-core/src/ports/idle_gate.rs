//! IdleGate port - idle-time scheduling for low-priority prefetch.

use std::time::Duration;

use async_trait::async_trait;

/// A yield point that resolves when no higher-priority work is pending.
///
/// Best effort by contract: a gate may never open, in which case
/// idle-time loads are deferred indefinitely.
#[async_trait]
pub trait IdleGate: Send + Sync {
    async fn wait_idle(&self);
}

/// Always idle: resolves immediately.
pub struct AlwaysIdle;

#[async_trait]
impl IdleGate for AlwaysIdle {
    async fn wait_idle(&self) {}
}

/// Considers the host idle after a fixed settle delay.
pub struct SettleIdle {
    delay: Duration,
}

impl SettleIdle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl IdleGate for SettleIdle {
    async fn wait_idle(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Never idle: pends forever. Pins the "idle time may never occur" case
/// in tests.
pub struct NeverIdle;

#[async_trait]
impl IdleGate for NeverIdle {
    async fn wait_idle(&self) {
        std::future::pending::<()>().await;
    }
}
