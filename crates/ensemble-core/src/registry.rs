//! Application registry: descriptor lookup by name and by path.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{AppName, ApplicationDescriptor, HostError};

/// Registry of application descriptors.
///
/// Design:
/// - Built during host assembly (mutable), read-only afterwards.
/// - Registration order is preserved: activation predicates are
///   evaluated in that order and `lookup` returns matches in it.
#[derive(Default)]
pub struct ApplicationRegistry {
    ordered: Vec<Arc<ApplicationDescriptor>>,
    by_name: HashMap<AppName, Arc<ApplicationDescriptor>>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self {
            ordered: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register descriptors, validating name uniqueness first (a
    /// colliding batch registers nothing).
    pub fn register(&mut self, descriptors: Vec<ApplicationDescriptor>) -> Result<(), HostError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            let collides_earlier = descriptors[..index]
                .iter()
                .any(|other| other.name == descriptor.name);
            if collides_earlier || self.by_name.contains_key(&descriptor.name) {
                return Err(HostError::DuplicateApplication(descriptor.name.clone()));
            }
        }
        for descriptor in descriptors {
            let descriptor = Arc::new(descriptor);
            self.by_name
                .insert(descriptor.name.clone(), Arc::clone(&descriptor));
            self.ordered.push(descriptor);
        }
        Ok(())
    }

    pub fn get(&self, name: &AppName) -> Option<Arc<ApplicationDescriptor>> {
        self.by_name.get(name).cloned()
    }

    /// Descriptors whose activation rule matches `path`, in registration
    /// order. Multiple simultaneous matches are permitted; the
    /// orchestrator decides activation policy.
    pub fn lookup(&self, path: &str) -> Vec<Arc<ApplicationDescriptor>> {
        self.ordered
            .iter()
            .filter(|descriptor| descriptor.activation.matches(path))
            .cloned()
            .collect()
    }

    pub fn descriptors(&self) -> &[Arc<ApplicationDescriptor>] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
