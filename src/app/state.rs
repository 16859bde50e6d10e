//! Application state fed by component hooks

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::events::{PropChange, PropEvent, PropValidation};

/// Errors per property and the ordered event log of a form
#[derive(Debug, Default, Clone, Serialize)]
pub struct FormState {
    errors: BTreeMap<String, Vec<String>>,
    events: Vec<PropEvent>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_validation(&mut self, event: &PropValidation) {
        self.errors.insert(event.prop.clone(), event.errors.clone());
        self.events.push(PropEvent::PropValidation(event.clone()));
    }

    pub fn record_change(&mut self, event: &PropChange) {
        self.events.push(PropEvent::PropChange(event.clone()));
    }

    /// Last reported errors for a property (empty if never validated)
    pub fn errors(&self, prop: &str) -> &[String] {
        self.errors.get(prop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no validated property currently has errors
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    pub fn events(&self) -> &[PropEvent] {
        &self.events
    }
}
