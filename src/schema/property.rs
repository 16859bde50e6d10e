//! Property schemas - the declarative half of a component

use std::fmt;
use std::sync::Arc;

use crate::core::value::Value;

/// A validator maps a raw value to zero or more violation messages
///
/// Validators must be total and free of side effects. The returned order is
/// the order in which messages are displayed.
pub type ValidatorFn = Arc<dyn Fn(&Value) -> Vec<String> + Send + Sync>;

/// Declaration of a single component property
#[derive(Clone)]
pub struct PropertySchema {
    name: String,
    default: Value,
    validator: Option<ValidatorFn>,
    required: bool,
}

impl PropertySchema {
    /// Declare a property with a `null` default, no validator, not required
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Value::Null,
            validator: None,
            required: false,
        }
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attach an already shared validator (e.g. one taken from a registry)
    pub fn with_validator_fn(mut self, validator: ValidatorFn) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Run the validator, if any, against a value
    pub fn validate(&self, value: &Value) -> Vec<String> {
        match &self.validator {
            Some(validator) => validator(value),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for PropertySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySchema")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .field("required", &self.required)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_defaults() {
        let schema = PropertySchema::new("text");
        assert_eq!(schema.name(), "text");
        assert_eq!(schema.default(), &Value::Null);
        assert!(!schema.is_required());
        assert!(!schema.has_validator());
        assert!(schema.validate(&json!("anything")).is_empty());
    }

    #[test]
    fn test_schema_validator_runs() {
        let schema = PropertySchema::new("code")
            .default_value("")
            .validator(|v| {
                if v.as_str().map_or(true, str::is_empty) {
                    vec!["empty".to_string()]
                } else {
                    Vec::new()
                }
            });
        assert!(schema.has_validator());
        assert_eq!(schema.validate(&json!("")), vec!["empty"]);
        assert!(schema.validate(&json!("x")).is_empty());
    }

    #[test]
    fn test_schema_is_cloneable_and_shares_validator() {
        let schema = PropertySchema::new("text").required().validator(|_| vec!["no".into()]);
        let copy = schema.clone();
        assert!(copy.is_required());
        assert_eq!(copy.validate(&json!(1)), schema.validate(&json!(1)));
    }
}
