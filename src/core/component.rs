//! Component definitions
//!
//! A definition is the immutable, reusable half of a component: its
//! property schemas, event hooks, and render function. Instances are
//! created from it per mount.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::core::error::ComponentError;
use crate::core::events::{Observer, PropChange, PropValidation};
use crate::core::instance::ComponentInstance;
use crate::core::value::Value;
use crate::schema::property::PropertySchema;

/// Render function: markup derived only from the instance passed in
pub type RenderFn = Rc<dyn Fn(&ComponentInstance) -> Result<String, ComponentError>>;

pub type ChangeHook = Rc<dyn Fn(&PropChange)>;
pub type ValidationHook = Rc<dyn Fn(&PropValidation)>;

/// Hooks wired onto every instance of a component
#[derive(Clone, Default)]
pub struct Hooks {
    pub prop_change: Option<ChangeHook>,
    pub prop_validation: Option<ValidationHook>,
}

/// A named, reusable component
#[derive(Clone)]
pub struct ComponentDefinition {
    name: String,
    props: Rc<[PropertySchema]>,
    on: Hooks,
    render: RenderFn,
}

impl ComponentDefinition {
    pub fn builder(name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder {
            name: name.into(),
            props: Vec::new(),
            on: Hooks::default(),
            render: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &[PropertySchema] {
        &self.props
    }

    /// Create an instance with the hooks subscribed as its observers
    ///
    /// Required properties must be present in `values`; everything else
    /// falls back to its default.
    pub fn instantiate<K, V>(
        &self,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ComponentInstance, ComponentError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let values: Vec<(String, Value)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for schema in self.props.iter().filter(|s| s.is_required()) {
            if !values.iter().any(|(k, _)| k == schema.name()) {
                return Err(ComponentError::MissingRequiredProperty {
                    component: self.name.clone(),
                    name: schema.name().to_string(),
                });
            }
        }

        let mut instance =
            ComponentInstance::with_values(self.name.clone(), Rc::clone(&self.props), values)?;

        if let Some(hook) = &self.on.prop_validation {
            let hook = Rc::clone(hook);
            instance.subscribe(Observer::validation(move |e| hook(e)));
        }
        if let Some(hook) = &self.on.prop_change {
            let hook = Rc::clone(hook);
            instance.subscribe(Observer::change(move |e| hook(e)));
        }

        tracing::trace!(component = %self.name, "instantiated");
        Ok(instance)
    }

    /// Render an instance of this component
    pub fn render(&self, instance: &ComponentInstance) -> Result<String, ComponentError> {
        (self.render)(instance)
    }

    /// Instantiate with the given values and render once
    ///
    /// This is how sub-components are embedded in a parent's markup.
    pub fn of<K, V>(&self, values: impl IntoIterator<Item = (K, V)>) -> Result<String, ComponentError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let instance = self.instantiate(values)?;
        self.render(&instance)
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("props", &self.props)
            .field("prop_change", &self.on.prop_change.is_some())
            .field("prop_validation", &self.on.prop_validation.is_some())
            .finish()
    }
}

/// Builder for [`ComponentDefinition`]
pub struct ComponentBuilder {
    name: String,
    props: Vec<PropertySchema>,
    on: Hooks,
    render: Option<RenderFn>,
}

impl ComponentBuilder {
    pub fn prop(mut self, schema: PropertySchema) -> Self {
        self.props.push(schema);
        self
    }

    pub fn props(mut self, schemas: impl IntoIterator<Item = PropertySchema>) -> Self {
        self.props.extend(schemas);
        self
    }

    pub fn on_prop_change(mut self, hook: impl Fn(&PropChange) + 'static) -> Self {
        self.on.prop_change = Some(Rc::new(hook));
        self
    }

    pub fn on_prop_validation(mut self, hook: impl Fn(&PropValidation) + 'static) -> Self {
        self.on.prop_validation = Some(Rc::new(hook));
        self
    }

    pub fn render(
        mut self,
        render: impl Fn(&ComponentInstance) -> Result<String, ComponentError> + 'static,
    ) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn build(self) -> Result<ComponentDefinition, ComponentError> {
        let mut seen = HashSet::new();
        for schema in &self.props {
            if !seen.insert(schema.name()) {
                return Err(ComponentError::DuplicateProperty {
                    component: self.name,
                    name: schema.name().to_string(),
                });
            }
        }

        let render = self
            .render
            .ok_or_else(|| ComponentError::MissingRender(self.name.clone()))?;

        Ok(ComponentDefinition {
            name: self.name,
            props: Rc::from(self.props),
            on: self.on,
            render,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::value_text;
    use serde_json::json;
    use std::cell::RefCell;

    fn greeting() -> ComponentDefinition {
        ComponentDefinition::builder("greeting")
            .prop(PropertySchema::new("name").required())
            .prop(PropertySchema::new("punctuation").default_value("!"))
            .render(|i| {
                Ok(format!(
                    "Hello, {}{}",
                    value_text(i.get("name").unwrap_or(&Value::Null)),
                    value_text(i.get("punctuation").unwrap_or(&Value::Null))
                ))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_of_renders_with_values_and_defaults() {
        let html = greeting().of([("name", "World")]).unwrap();
        assert_eq!(html, "Hello, World!");
    }

    #[test]
    fn test_of_missing_required_property() {
        let err = greeting().of(Vec::<(String, Value)>::new()).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::MissingRequiredProperty { ref name, .. } if name == "name"
        ));
    }

    #[test]
    fn test_of_unknown_property() {
        let err = greeting()
            .of([("name", json!("x")), ("colour", json!("red"))])
            .unwrap_err();
        assert!(matches!(err, ComponentError::UnknownProperty { .. }));
    }

    #[test]
    fn test_build_rejects_duplicates_and_missing_render() {
        let dup = ComponentDefinition::builder("dup")
            .prop(PropertySchema::new("a"))
            .prop(PropertySchema::new("a"))
            .render(|_| Ok(String::new()))
            .build();
        assert!(matches!(dup, Err(ComponentError::DuplicateProperty { .. })));

        let no_render = ComponentDefinition::builder("bare").build();
        assert!(matches!(no_render, Err(ComponentError::MissingRender(_))));
    }

    #[test]
    fn test_hooks_are_the_subscribed_observers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let on_validation = Rc::clone(&seen);
        let on_change = Rc::clone(&seen);
        let def = ComponentDefinition::builder("field")
            .prop(PropertySchema::new("value").default_value(""))
            .on_prop_change(move |e| {
                on_change
                    .borrow_mut()
                    .push(format!("change {} {} {}", e.prop, e.new_value, e.old_value))
            })
            .on_prop_validation(move |e| {
                on_validation
                    .borrow_mut()
                    .push(format!("validation {} {} {}", e.prop, e.value, e.is_valid))
            })
            .render(|_| Ok(String::new()))
            .build()
            .unwrap();

        let mut instance = def.instantiate(Vec::<(String, Value)>::new()).unwrap();
        assert!(seen.borrow().is_empty());

        instance.set_property("value", "a").unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                r#"validation value "a" true"#.to_string(),
                r#"change value "a" """#.to_string(),
            ]
        );
    }

    #[test]
    fn test_each_instance_gets_its_own_state() {
        let def = greeting();
        let mut a = def.instantiate([("name", "A")]).unwrap();
        let b = def.instantiate([("name", "B")]).unwrap();
        a.set_property("name", "Z").unwrap();
        assert_eq!(def.render(&a).unwrap(), "Hello, Z!");
        assert_eq!(def.render(&b).unwrap(), "Hello, B!");
    }
}
