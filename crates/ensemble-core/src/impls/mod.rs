//! Implementations - dev-oriented adapters for the ports.
//!
//! Production deployments bring their own loader (network fetch) and
//! containers (real UI surfaces); these are what the CLI demo and the
//! tests run on.

pub mod in_process;
pub mod text_container;

pub use self::in_process::InProcessLoader;
pub use self::text_container::TextContainer;
