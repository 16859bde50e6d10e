//! Component errors with diagnostic codes

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::template::TemplateError;

/// Errors raised by component definitions, instances, and mounts
///
/// Invalid property values are never reported here; they are data carried
/// by validation events.
#[derive(Debug, Error, Diagnostic)]
pub enum ComponentError {
    #[error("Unknown property '{name}' on component '{component}'")]
    #[diagnostic(code(coompo::component::unknown_property))]
    UnknownProperty {
        component: String,
        name: String,
        declared: Vec<String>,
        #[help]
        help: Option<String>,
    },

    #[error("Property '{name}' is declared more than once on component '{component}'")]
    #[diagnostic(code(coompo::component::duplicate_property))]
    DuplicateProperty { component: String, name: String },

    #[error("Missing required property '{name}' for component '{component}'")]
    #[diagnostic(
        code(coompo::component::missing_required),
        help("Pass a value for every required property when instantiating the component")
    )]
    MissingRequiredProperty { component: String, name: String },

    #[error("Component '{0}' has no render function")]
    #[diagnostic(code(coompo::component::missing_render))]
    MissingRender(String),

    #[error("Unknown validator '{validator}' for property '{prop}'")]
    #[diagnostic(code(coompo::schema::unknown_validator))]
    UnknownValidator {
        prop: String,
        validator: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid form definition {}: {message}", .path.display())]
    #[diagnostic(code(coompo::schema::definition))]
    Definition { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(code(coompo::render::template))]
    Template(#[from] TemplateError),

    #[error("Failed to write to mount surface: {0}")]
    #[diagnostic(code(coompo::mount::surface))]
    Surface(#[from] std::io::Error),
}

impl ComponentError {
    /// Build an `UnknownProperty` error listing the declared names
    pub fn unknown_property<'a>(
        component: &str,
        name: &str,
        declared: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let declared: Vec<String> = declared.into_iter().map(String::from).collect();
        let help = if declared.is_empty() {
            None
        } else {
            Some(format!("Declared properties: {}", declared.join(", ")))
        };
        ComponentError::UnknownProperty {
            component: component.to_string(),
            name: name.to_string(),
            declared,
            help,
        }
    }

    /// Build an `UnknownValidator` error listing the registered validators
    pub fn unknown_validator(prop: &str, validator: &str, available: &[&str]) -> Self {
        ComponentError::UnknownValidator {
            prop: prop.to_string(),
            validator: validator.to_string(),
            help: Some(format!("Available validators: {}", available.join(", "))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_property_message() {
        let err = ComponentError::unknown_property("form", "doesNotExist", ["firstname", "age"]);
        assert_eq!(
            err.to_string(),
            "Unknown property 'doesNotExist' on component 'form'"
        );
        match err {
            ComponentError::UnknownProperty { declared, .. } => {
                assert_eq!(declared, vec!["firstname", "age"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
