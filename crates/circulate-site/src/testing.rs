//! Test doubles shared by the unit tests.

use std::cell::RefCell;

use serde_json::Value;

use crate::template::{TemplateEngine, TemplateError};

/// Engine that records every render call instead of rendering.
pub(crate) struct RecordingEngine {
    templates: Vec<&'static str>,
    pub(crate) calls: RefCell<Vec<(String, Value)>>,
}

impl RecordingEngine {
    /// Engine that reports `templates` as available.
    pub(crate) fn new(templates: &[&'static str]) -> Self {
        Self {
            templates: templates.to_vec(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn last_context(&self) -> Value {
        self.calls.borrow().last().unwrap().1.clone()
    }
}

impl TemplateEngine for RecordingEngine {
    fn has_template(&self, name: &str) -> bool {
        self.templates.contains(&name)
    }

    fn render(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        self.calls
            .borrow_mut()
            .push((name.to_owned(), context.clone()));
        Ok(format!("rendered:{name}"))
    }
}
