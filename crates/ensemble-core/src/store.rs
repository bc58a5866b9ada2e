//! Global state store: shallow-merge mutation, ordered change
//! notification, owner-scoped subscriptions.

use std::sync::{Arc, Mutex};

use crate::domain::{OwnerToken, SharedState};

/// A change listener: called with `(new_state, previous_state)`.
pub type Listener = Arc<dyn Fn(&SharedState, &SharedState) + Send + Sync>;

struct StoreInner {
    state: SharedState,

    /// Subscription order is notification order.
    listeners: Vec<(OwnerToken, Listener)>,
}

/// The one shared state object per running session.
///
/// Explicitly constructed and passed by handle to every collaborator
/// (host shell, orchestrator, each application's injected props) - there
/// is no process-wide singleton.
///
/// Design:
/// - All mutable data lives behind one lock; listener snapshots are
///   taken under it and invoked after it is released, so a listener may
///   itself call `set_state` (a terminating recursion is the caller's
///   responsibility to guarantee).
/// - One active listener per owner: re-subscribing replaces. Listeners
///   are never collected automatically - unsubscribing is mandatory, and
///   the orchestrator unsubscribes an application's owner on unmount.
pub struct GlobalStateStore {
    inner: Mutex<StoreInner>,
}

impl GlobalStateStore {
    pub fn new(initial: SharedState) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                state: initial,
                listeners: Vec::new(),
            }),
        }
    }

    /// Replace the whole state (re-initialization for restart
    /// scenarios). Deterministic reset: every current listener is
    /// notified with a synthetic change `(new, previous)`.
    pub fn reset(&self, state: SharedState) {
        let (previous, current, listeners) = {
            let mut inner = self.inner.lock().unwrap();
            let previous = std::mem::replace(&mut inner.state, state);
            (previous, inner.state.clone(), snapshot(&inner))
        };
        for listener in listeners {
            listener(&current, &previous);
        }
    }

    /// Shallow-merge `partial` into the state, then synchronously notify
    /// every listener, in subscription order, with `(new, previous)`.
    ///
    /// No value-equality dedup: every explicit set is observable, even
    /// one that leaves the state unchanged.
    pub fn set_state(&self, partial: SharedState) {
        let (previous, current, listeners) = {
            let mut inner = self.inner.lock().unwrap();
            let previous = inner.state.clone();
            inner.state.merge(partial);
            (previous, inner.state.clone(), snapshot(&inner))
        };
        for listener in listeners {
            listener(&current, &previous);
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SharedState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Register `listener` under `owner`.
    ///
    /// Re-subscribing replaces the previous listener in place, keeping
    /// its notification position. With `fire_immediately` the listener
    /// runs once, synchronously, with `(current, current)` before this
    /// returns.
    pub fn subscribe(&self, owner: OwnerToken, listener: Listener, fire_immediately: bool) {
        let current = {
            let mut inner = self.inner.lock().unwrap();
            match inner.listeners.iter_mut().find(|(o, _)| *o == owner) {
                Some(slot) => slot.1 = Arc::clone(&listener),
                None => inner.listeners.push((owner, Arc::clone(&listener))),
            }
            inner.state.clone()
        };
        if fire_immediately {
            listener(&current, &current);
        }
    }

    /// Drop the owner's listener. Later `set_state` calls never reach it.
    pub fn unsubscribe(&self, owner: OwnerToken) {
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.retain(|(o, _)| *o != owner);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }
}

fn snapshot(inner: &StoreInner) -> Vec<Listener> {
    inner
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect()
}

/// Bound global-state accessors, injected into an application's mount
/// props as side-channel properties.
///
/// One owner token per handle, so `on_global_state_change` replaces
/// rather than stacks, and one `off_global_state_change` cleans up
/// everything the owner registered.
#[derive(Clone)]
pub struct StateHandle {
    store: Arc<GlobalStateStore>,
    owner: OwnerToken,
}

impl StateHandle {
    pub fn new(store: Arc<GlobalStateStore>, owner: OwnerToken) -> Self {
        Self { store, owner }
    }

    pub fn owner(&self) -> OwnerToken {
        self.owner
    }

    pub fn set_global_state(&self, partial: SharedState) {
        self.store.set_state(partial);
    }

    pub fn on_global_state_change(&self, listener: Listener, fire_immediately: bool) {
        self.store.subscribe(self.owner, listener, fire_immediately);
    }

    pub fn off_global_state_change(&self) {
        self.store.unsubscribe(self.owner);
    }

    pub fn snapshot(&self) -> SharedState {
        self.store.state()
    }
}
