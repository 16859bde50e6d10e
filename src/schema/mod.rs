//! Schema system - property declarations, validators, form definitions, and templates

pub mod property;
pub mod registry;
pub mod template;
pub mod validator;

pub use property::{PropertySchema, ValidatorFn};
pub use registry::{FieldSpec, FormSpec, SchemaRegistry, DEFAULT_FORM};
pub use template::{TemplateError, TemplateRenderer};
pub use validator::{validate_age, validate_name, ValidatorRegistry};
