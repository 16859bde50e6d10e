//! Form definitions - declarative component property tables in YAML
//!
//! ```yaml
//! name: form
//! fields:
//!   - name: firstname
//!     label: First name
//!     default: ""
//!     validator: name
//! ```

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::ComponentError;
use crate::core::value::Value;
use crate::schema::property::PropertySchema;
use crate::schema::validator::ValidatorRegistry;

#[derive(Embed)]
#[folder = "definitions/"]
struct EmbeddedDefinitions;

/// Name of the built-in sample form
pub const DEFAULT_FORM: &str = "form";

/// A form component declared in YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// One bound input of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default = "empty_string")]
    pub default: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

fn empty_string() -> Value {
    Value::String(String::new())
}

impl FieldSpec {
    /// Label shown next to the input, defaulting to the field name
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl FormSpec {
    /// Parse a form definition from YAML text
    pub fn from_yaml(source: &str, origin: &Path) -> Result<Self, ComponentError> {
        serde_yml::from_str(source).map_err(|e| ComponentError::Definition {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a form definition from a YAML file
    pub fn load(path: &Path) -> Result<Self, ComponentError> {
        let source = std::fs::read_to_string(path).map_err(|e| ComponentError::Definition {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&source, path)
    }

    /// Resolve the fields into property schemas
    pub fn to_schemas(
        &self,
        validators: &ValidatorRegistry,
    ) -> Result<Vec<PropertySchema>, ComponentError> {
        self.fields
            .iter()
            .map(|field| -> Result<PropertySchema, ComponentError> {
                let mut schema = PropertySchema::new(&field.name).default_value(field.default.clone());
                if let Some(name) = &field.validator {
                    let validator = validators.get(name).ok_or_else(|| {
                        ComponentError::unknown_validator(&field.name, name, &validators.names())
                    })?;
                    schema = schema.with_validator_fn(validator);
                }
                if field.required {
                    schema = schema.required();
                }
                Ok(schema)
            })
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Registry of known form definitions, keyed by name
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    forms: BTreeMap<String, FormSpec>,
}

impl Default for SchemaRegistry {
    /// Registry holding the embedded definitions
    fn default() -> Self {
        let mut forms = BTreeMap::new();
        for file in EmbeddedDefinitions::iter() {
            let filename = file.as_ref();
            let Some(content) = EmbeddedDefinitions::get(filename) else {
                continue;
            };
            let Ok(source) = std::str::from_utf8(&content.data) else {
                continue;
            };
            match FormSpec::from_yaml(source, Path::new(filename)) {
                Ok(spec) => {
                    forms.insert(spec.name.clone(), spec);
                }
                Err(e) => tracing::warn!(file = filename, error = %e, "skipping embedded definition"),
            }
        }
        Self { forms }
    }
}

impl SchemaRegistry {
    /// Add every `*.yaml` definition found in a directory
    ///
    /// Definitions replace embedded ones of the same name.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ComponentError> {
        let entries = std::fs::read_dir(dir).map_err(|e| ComponentError::Definition {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| matches!(p.extension().and_then(|e| e.to_str()), Some("yaml" | "yml")))
            .collect();
        paths.sort();

        for path in &paths {
            self.insert(FormSpec::load(path)?);
        }
        Ok(paths.len())
    }

    pub fn insert(&mut self, spec: FormSpec) {
        self.forms.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&FormSpec> {
        self.forms.get(name)
    }

    /// All definitions, sorted by name
    pub fn forms(&self) -> impl Iterator<Item = &FormSpec> {
        self.forms.values()
    }
}
