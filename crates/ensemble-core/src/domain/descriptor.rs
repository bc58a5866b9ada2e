//! Application descriptors: what the host knows about each application.

use serde::{Deserialize, Serialize};

use super::AppName;

/// Prefetch priority tag.
///
/// `High` bundles start loading as soon as the host starts; everything
/// else waits for idle time (best effort, see the prefetch scheduler).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Low,
}

/// Path-prefix activation rule, normalized into segments at construction.
///
/// Matching is segment-based: `/shop` matches `/shop` and `/shop/cart`
/// but not `/shopping`. An empty rule matches every path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRule {
    segments: Vec<String>,
}

impl ActivationRule {
    pub fn prefix(rule: impl AsRef<str>) -> Self {
        Self {
            segments: normalize_segments(rule.as_ref()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let path_segments = normalize_segments(path);
        path_segments.len() >= self.segments.len()
            && path_segments
                .iter()
                .zip(&self.segments)
                .all(|(path_segment, rule_segment)| path_segment == rule_segment)
    }
}

/// Split a path into non-empty segments (leading/trailing/double slashes
/// are insignificant).
pub(crate) fn normalize_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// A registered application's load descriptor.
///
/// Immutable after registration: the registry hands out `Arc`s and
/// instances keep a read-only back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    pub name: AppName,

    /// Where the bundle lives (URL or any locator the loader understands).
    pub entry: String,

    /// Selector of the container this application mounts into.
    pub container: String,

    /// Which paths activate this application.
    pub activation: ActivationRule,

    /// Static side-channel properties passed to the application at mount.
    #[serde(default = "default_props")]
    pub props: serde_json::Value,

    #[serde(default)]
    pub priority: Priority,
}

fn default_props() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ApplicationDescriptor {
    /// Convenience constructor: empty props, low priority.
    pub fn new(
        name: impl Into<String>,
        entry: impl Into<String>,
        container: impl Into<String>,
        active_rule: impl AsRef<str>,
    ) -> Self {
        Self {
            name: AppName::new(name),
            entry: entry.into(),
            container: container.into(),
            activation: ActivationRule::prefix(active_rule),
            props: default_props(),
            priority: Priority::default(),
        }
    }

    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
