//! Route matching: location to active application set.

use crate::domain::AppName;
use crate::registry::ApplicationRegistry;

/// How the current location encodes the routed path.
///
/// Selectable at configuration time; both deployment modes of the host
/// are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingStrategy {
    /// Hash fragments: `index.html#/shop/cart` routes on `/shop/cart`.
    #[default]
    HashFragment,

    /// History paths: `/shop/cart?x=1` routes on `/shop/cart`.
    BrowserHistory,
}

impl RoutingStrategy {
    /// Extract the routed path from a raw location string.
    ///
    /// Hash mode routes on the fragment (a location without one routes
    /// to `/`); history mode routes on the path with any query or
    /// fragment cut off.
    pub fn extract_path(self, location: &str) -> String {
        match self {
            RoutingStrategy::HashFragment => match location.split_once('#') {
                Some((_, fragment)) => strip_suffixes(fragment).to_string(),
                None => "/".to_string(),
            },
            RoutingStrategy::BrowserHistory => strip_suffixes(location).to_string(),
        }
    }
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Recompute the desired active set for `path`.
///
/// Pure: no hidden state, evaluated from scratch on every navigation
/// event. Order follows registration order.
pub fn resolve(path: &str, registry: &ApplicationRegistry) -> Vec<AppName> {
    registry
        .lookup(path)
        .into_iter()
        .map(|descriptor| descriptor.name.clone())
        .collect()
}
