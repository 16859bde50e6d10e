//! The form component, built from a [`FormSpec`]

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::error::{error_component, errors_to_components};
use crate::app::state::FormState;
use crate::core::component::ComponentDefinition;
use crate::core::error::ComponentError;
use crate::core::instance::ComponentInstance;
use crate::core::value::{value_text, Value};
use crate::schema::registry::FormSpec;
use crate::schema::template::TemplateRenderer;
use crate::schema::validator::ValidatorRegistry;

pub const FORM_TEMPLATE: &str = "form.html";

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'a str,
    label: &'a str,
    value: String,
    errors: String,
}

/// Define a form component whose hooks feed `state`
///
/// The change hook logs each write; the validation hook logs it and stores
/// the property's errors in `state`.
pub fn form_component(
    spec: &FormSpec,
    validators: &ValidatorRegistry,
    templates: Rc<TemplateRenderer>,
    state: Rc<RefCell<FormState>>,
) -> Result<ComponentDefinition, ComponentError> {
    let error = error_component(Rc::clone(&templates))?;
    let on_change = Rc::clone(&state);
    let on_validation = state;
    let spec_for_render = spec.clone();

    ComponentDefinition::builder(&spec.name)
        .props(spec.to_schemas(validators)?)
        .on_prop_change(move |e| {
            tracing::info!(
                prop = %e.prop,
                new_value = %e.new_value,
                old_value = %e.old_value,
                "propChange"
            );
            on_change.borrow_mut().record_change(e);
        })
        .on_prop_validation(move |e| {
            tracing::info!(
                prop = %e.prop,
                value = %e.value,
                is_valid = e.is_valid,
                errors = ?e.errors,
                "propValidation"
            );
            on_validation.borrow_mut().record_validation(e);
        })
        .render(move |instance| render_form(&spec_for_render, &error, &templates, instance))
        .build()
}

fn render_form(
    spec: &FormSpec,
    error: &ComponentDefinition,
    templates: &TemplateRenderer,
    instance: &ComponentInstance,
) -> Result<String, ComponentError> {
    let mut fields = Vec::with_capacity(spec.fields.len());
    for field in &spec.fields {
        let value = instance.get(&field.name).unwrap_or(&Value::Null);
        fields.push(FieldView {
            name: &field.name,
            label: field.label(),
            value: value_text(value).into_owned(),
            errors: errors_to_components(error, instance.errors(&field.name)?)?,
        });
    }

    let mut context = tera::Context::new();
    context.insert("name", &spec.name);
    context.insert("fields", &fields);
    Ok(templates.render(FORM_TEMPLATE, &context)?)
}

/// A form definition together with the state its hooks write to
pub struct FormApp {
    pub definition: ComponentDefinition,
    pub state: Rc<RefCell<FormState>>,
}

impl FormApp {
    pub fn new(
        spec: &FormSpec,
        validators: &ValidatorRegistry,
        templates: Rc<TemplateRenderer>,
    ) -> Result<Self, ComponentError> {
        let state = Rc::new(RefCell::new(FormState::new()));
        let definition = form_component(spec, validators, templates, Rc::clone(&state))?;
        Ok(Self { definition, state })
    }
}
