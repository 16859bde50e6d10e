//! Component instances and the property validation pipeline
//!
//! Every write goes through the same steps: remember the old value, store
//! the raw value, validate it, store the errors, then notify validation
//! observers followed by change observers. Invalid input is recorded, not
//! rejected.

use std::collections::HashMap;
use std::rc::Rc;

use crate::core::error::ComponentError;
use crate::core::events::{ChangeFn, Observer, PropChange, PropValidation, ValidationFn};
use crate::core::value::Value;
use crate::schema::property::PropertySchema;

/// Current value and errors of one property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyState {
    pub current_value: Value,
    pub errors: Vec<String>,
}

impl PropertyState {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A live component: property state plus registered observers
pub struct ComponentInstance {
    component: String,
    schemas: Rc<[PropertySchema]>,
    states: Vec<PropertyState>,
    index: HashMap<String, usize>,
    change_observers: Vec<ChangeFn>,
    validation_observers: Vec<ValidationFn>,
}

impl ComponentInstance {
    /// Create an instance seeded from each schema's default
    ///
    /// Defaults are validated so errors are accurate from the start, but no
    /// events are emitted.
    pub fn create(
        component: impl Into<String>,
        schemas: Rc<[PropertySchema]>,
    ) -> Result<Self, ComponentError> {
        Self::with_values(component, schemas, Vec::new())
    }

    /// Create an instance, seeding the given properties with initial values
    ///
    /// Properties not listed start from their default. No events are emitted.
    pub fn with_values(
        component: impl Into<String>,
        schemas: Rc<[PropertySchema]>,
        initial: Vec<(String, Value)>,
    ) -> Result<Self, ComponentError> {
        let component = component.into();

        let mut index = HashMap::with_capacity(schemas.len());
        for (i, schema) in schemas.iter().enumerate() {
            if index.insert(schema.name().to_string(), i).is_some() {
                return Err(ComponentError::DuplicateProperty {
                    component,
                    name: schema.name().to_string(),
                });
            }
        }

        let mut values: Vec<Value> = schemas.iter().map(|s| s.default().clone()).collect();
        for (name, value) in initial {
            match index.get(&name) {
                Some(&i) => values[i] = value,
                None => {
                    return Err(ComponentError::unknown_property(
                        &component,
                        &name,
                        schemas.iter().map(|s| s.name()),
                    ))
                }
            }
        }

        let states = schemas
            .iter()
            .zip(values)
            .map(|(schema, value)| PropertyState {
                errors: schema.validate(&value),
                current_value: value,
            })
            .collect();

        Ok(Self {
            component,
            schemas,
            states,
            index,
            change_observers: Vec::new(),
            validation_observers: Vec::new(),
        })
    }

    /// Register an observer; observers of a kind run in registration order
    pub fn subscribe(&mut self, observer: Observer) {
        match observer {
            Observer::Change(f) => self.change_observers.push(f),
            Observer::Validation(f) => self.validation_observers.push(f),
        }
    }

    /// Write a property and run the validate-then-notify pipeline
    ///
    /// Both events fire exactly once per call, validation first, even when
    /// the new value equals the old one.
    pub fn set_property(
        &mut self,
        name: &str,
        raw_value: impl Into<Value>,
    ) -> Result<(), ComponentError> {
        let i = self.position(name)?;
        let raw_value = raw_value.into();
        let schema = &self.schemas[i];
        let state = &mut self.states[i];

        let old_value = std::mem::replace(&mut state.current_value, raw_value.clone());
        let errors = schema.validate(&raw_value);
        state.errors = errors.clone();

        tracing::debug!(
            component = %self.component,
            prop = name,
            valid = errors.is_empty(),
            errors = errors.len(),
            "property set"
        );

        let validation = PropValidation {
            prop: name.to_string(),
            value: raw_value.clone(),
            is_valid: errors.is_empty(),
            errors,
        };
        for observer in self.validation_observers.iter_mut() {
            observer(&validation);
        }

        let change = PropChange {
            prop: name.to_string(),
            new_value: raw_value,
            old_value,
        };
        for observer in self.change_observers.iter_mut() {
            observer(&change);
        }

        Ok(())
    }

    /// Current errors for a property
    pub fn errors(&self, name: &str) -> Result<&[String], ComponentError> {
        let i = self.position(name)?;
        Ok(&self.states[i].errors)
    }

    /// Current value of a property, if declared
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.states[i].current_value)
    }

    /// True when every property currently validates
    pub fn is_valid(&self) -> bool {
        self.states.iter().all(PropertyState::is_valid)
    }

    /// Declared property names, in declaration order
    pub fn prop_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.name())
    }

    /// Iterate over `(name, state)` in declaration order
    pub fn props(&self) -> impl Iterator<Item = (&str, &PropertyState)> {
        self.schemas.iter().map(|s| s.name()).zip(self.states.iter())
    }

    fn position(&self, name: &str) -> Result<usize, ComponentError> {
        self.index.get(name).copied().ok_or_else(|| {
            ComponentError::unknown_property(&self.component, name, self.prop_names())
        })
    }
}

impl std::fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("component", &self.component)
            .field("props", &self.props().collect::<Vec<_>>())
            .field("change_observers", &self.change_observers.len())
            .field("validation_observers", &self.validation_observers.len())
            .finish()
    }
}
