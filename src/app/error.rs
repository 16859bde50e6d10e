//! The `error` sub-component: one paragraph per error message

use std::rc::Rc;

use crate::core::component::ComponentDefinition;
use crate::core::error::ComponentError;
use crate::core::value::{value_text, Value};
use crate::schema::property::PropertySchema;
use crate::schema::template::TemplateRenderer;

pub const ERROR_TEMPLATE: &str = "error.html";

/// Define the `error` component; its only property is the required `text`
pub fn error_component(
    templates: Rc<TemplateRenderer>,
) -> Result<ComponentDefinition, ComponentError> {
    ComponentDefinition::builder("error")
        .prop(PropertySchema::new("text").required())
        .render(move |instance| {
            let mut context = tera::Context::new();
            let text = instance.get("text").unwrap_or(&Value::Null);
            context.insert("text", &value_text(text));
            Ok(templates.render(ERROR_TEMPLATE, &context)?)
        })
        .build()
}

/// Render one `error` block per message, in order; nothing when empty
pub fn errors_to_components(
    error: &ComponentDefinition,
    errors: &[String],
) -> Result<String, ComponentError> {
    errors
        .iter()
        .map(|e| error.of([("text", e.as_str())]))
        .collect::<Result<Vec<_>, _>>()
        .map(|blocks| blocks.join(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error() -> ComponentDefinition {
        error_component(Rc::new(TemplateRenderer::new().unwrap())).unwrap()
    }

    #[test]
    fn test_no_errors_render_nothing() {
        assert_eq!(errors_to_components(&error(), &[]).unwrap(), "");
    }

    #[test]
    fn test_one_block_per_error_in_order() {
        let html = errors_to_components(
            &error(),
            &["first problem".to_string(), "second problem".to_string()],
        )
        .unwrap();
        assert_eq!(
            html,
            r#"<p class="error">first problem</p><p class="error">second problem</p>"#
        );
    }

    #[test]
    fn test_text_is_required() {
        let err = error().of(Vec::<(String, Value)>::new()).unwrap_err();
        assert!(matches!(err, ComponentError::MissingRequiredProperty { .. }));
    }
}
