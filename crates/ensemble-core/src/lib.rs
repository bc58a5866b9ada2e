//! ensemble-core
//!
//! Core building blocks for the Ensemble host runtime: a host that
//! composes independently-built applications, registering them against
//! route patterns, driving their mount/unmount lifecycle with ordered
//! hooks, and synchronizing one shared state object across all of them.
//!
//! # Module layout
//! - **domain**: the model (names, ids, descriptors, shared state, lifecycle states, errors)
//! - **ports**: abstraction layer (Application, BundleLoader, Container, Clock, IdGenerator, IdleGate)
//! - **store**: the global state store and its bound accessors
//! - **registry**: descriptor registration and path lookup
//! - **router**: location parsing and route resolution
//! - **app**: application logic (builder, host, lifecycle orchestrator, prefetch, shell)
//! - **observability**: status views and lifecycle timing
//! - **impls**: dev implementations (InProcessLoader, TextContainer)

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod registry;
pub mod router;
pub mod store;
