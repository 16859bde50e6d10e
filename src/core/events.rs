//! Property events and observers

use serde::Serialize;
use std::fmt;

use crate::core::value::Value;

/// Emitted after a property write has been validated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropValidation {
    pub prop: String,
    pub value: Value,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Emitted after a property write, following its validation event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropChange {
    pub prop: String,
    pub new_value: Value,
    pub old_value: Value,
}

/// Either kind of property event, in the order it was emitted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PropEvent {
    PropValidation(PropValidation),
    PropChange(PropChange),
}

impl PropEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PropEvent::PropValidation(_) => EventKind::Validation,
            PropEvent::PropChange(_) => EventKind::Change,
        }
    }

    pub fn prop(&self) -> &str {
        match self {
            PropEvent::PropValidation(e) => &e.prop,
            PropEvent::PropChange(e) => &e.prop,
        }
    }
}

/// The two event kinds an observer can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Change,
    Validation,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Change => write!(f, "propChange"),
            EventKind::Validation => write!(f, "propValidation"),
        }
    }
}

pub type ChangeFn = Box<dyn FnMut(&PropChange)>;
pub type ValidationFn = Box<dyn FnMut(&PropValidation)>;

/// A callback registered on a component instance
pub enum Observer {
    Change(ChangeFn),
    Validation(ValidationFn),
}

impl Observer {
    pub fn change(f: impl FnMut(&PropChange) + 'static) -> Self {
        Observer::Change(Box::new(f))
    }

    pub fn validation(f: impl FnMut(&PropValidation) + 'static) -> Self {
        Observer::Validation(Box::new(f))
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Observer::Change(_) => EventKind::Change,
            Observer::Validation(_) => EventKind::Validation,
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observer({})", self.kind())
    }
}
