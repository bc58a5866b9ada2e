//! Headless text container (dev implementation).

use std::sync::Mutex;

use crate::ports::Container;

/// A mount container backed by a plain string. Stands in for a DOM node
/// in the CLI demo and in tests.
pub struct TextContainer {
    selector: String,
    content: Mutex<String>,
}

impl TextContainer {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            content: Mutex::new(String::new()),
        }
    }
}

impl Container for TextContainer {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn set_content(&self, content: &str) {
        *self.content.lock().unwrap() = content.to_string();
    }

    fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.content.lock().unwrap().clear();
    }
}
