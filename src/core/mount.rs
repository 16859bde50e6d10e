//! Mounting components onto a presentation surface
//!
//! A mount owns one instance of the root component. Inputs arriving from
//! the surface's bound fields are written through the instance pipeline,
//! after which the root is rendered again and the surface patched.

use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;

use crate::core::component::ComponentDefinition;
use crate::core::error::ComponentError;
use crate::core::instance::ComponentInstance;
use crate::core::value::Value;

lazy_static! {
    static ref BINDING: Regex = Regex::new(r#"coompo-is="([^"]+)""#).unwrap();
}

/// Where rendered markup ends up
pub trait Surface {
    /// Replace the surface content with freshly rendered markup
    fn patch(&mut self, markup: &str) -> std::io::Result<()>;
}

/// Surface keeping the latest markup in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    markup: String,
    patches: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Number of times the surface has been patched
    pub fn patches(&self) -> usize {
        self.patches
    }
}

impl Surface for MemorySurface {
    fn patch(&mut self, markup: &str) -> std::io::Result<()> {
        self.markup.clear();
        self.markup.push_str(markup);
        self.patches += 1;
        Ok(())
    }
}

/// Surface writing every render to a stream, one after another
pub struct WriterSurface<W: Write> {
    writer: W,
}

impl<W: Write> WriterSurface<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for WriterSurface<W> {
    fn patch(&mut self, markup: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", markup)?;
        self.writer.flush()
    }
}

/// A root component attached to a surface
pub struct Mounted<S: Surface> {
    definition: ComponentDefinition,
    instance: ComponentInstance,
    surface: S,
    markup: String,
}

/// Instantiate the root component and render it onto the surface
pub fn compose<S: Surface>(
    root: &ComponentDefinition,
    mut surface: S,
) -> Result<Mounted<S>, ComponentError> {
    let instance = root.instantiate(Vec::<(String, Value)>::new())?;
    let markup = root.render(&instance)?;
    surface.patch(&markup)?;

    tracing::debug!(component = root.name(), "mounted");
    Ok(Mounted {
        definition: root.clone(),
        instance,
        surface,
        markup,
    })
}

impl<S: Surface> Mounted<S> {
    /// Feed a value typed into a bound field, then re-render
    pub fn input(&mut self, name: &str, raw_value: impl Into<Value>) -> Result<(), ComponentError> {
        self.instance.set_property(name, raw_value)?;
        self.rerender()
    }

    /// Render the root again and patch the surface
    pub fn rerender(&mut self) -> Result<(), ComponentError> {
        self.markup = self.definition.render(&self.instance)?;
        self.surface.patch(&self.markup)?;
        Ok(())
    }

    /// Property names bound to inputs in the current markup
    ///
    /// Attribute values may be HTML-escaped; each is mapped back to the
    /// declared property it names. Bindings to undeclared names are skipped.
    pub fn bindings(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in BINDING.captures_iter(&self.markup) {
            let Some(name) = self.bound_prop(&caps[1]) else {
                tracing::debug!(binding = &caps[1], "ignoring binding to undeclared property");
                continue;
            };
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    fn bound_prop(&self, attr: &str) -> Option<&str> {
        self.instance
            .prop_names()
            .find(|name| *name == attr || tera::escape_html(name) == attr)
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn instance(&self) -> &ComponentInstance {
        &self.instance
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Detach from the surface, dropping the instance and its state
    pub fn unmount(self) -> S {
        tracing::debug!(component = self.definition.name(), "unmounted");
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::value_text;
    use crate::schema::property::PropertySchema;
    use crate::schema::validator::validate_name;

    fn field() -> ComponentDefinition {
        ComponentDefinition::builder("field")
            .prop(
                PropertySchema::new("firstname")
                    .default_value("")
                    .validator(validate_name),
            )
            .render(|i| {
                let errors = i.errors("firstname")?;
                Ok(format!(
                    r#"<input coompo-is="firstname" value="{}" /><p>{}</p>"#,
                    value_text(i.get("firstname").unwrap_or(&Value::Null)),
                    errors.len()
                ))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_compose_renders_initial_markup() {
        let mounted = compose(&field(), MemorySurface::new()).unwrap();
        assert_eq!(mounted.surface().patches(), 1);
        assert_eq!(
            mounted.surface().markup(),
            r#"<input coompo-is="firstname" value="" /><p>2</p>"#
        );
        assert_eq!(mounted.bindings(), vec!["firstname"]);
    }

    #[test]
    fn test_input_rerenders_surface() {
        let mut mounted = compose(&field(), MemorySurface::new()).unwrap();
        mounted.input("firstname", "John").unwrap();
        assert_eq!(mounted.surface().patches(), 2);
        assert_eq!(
            mounted.surface().markup(),
            r#"<input coompo-is="firstname" value="John" /><p>0</p>"#
        );
    }

    #[test]
    fn test_input_unknown_property_does_not_rerender() {
        let mut mounted = compose(&field(), MemorySurface::new()).unwrap();
        assert!(mounted.input("age", "3").is_err());
        assert_eq!(mounted.surface().patches(), 1);
    }

    #[test]
    fn test_bindings_map_escaped_names_to_props() {
        let def = ComponentDefinition::builder("dates")
            .prop(PropertySchema::new("date/of/birth").default_value(""))
            .prop(PropertySchema::new("a&b").default_value(""))
            .render(|_| {
                Ok(concat!(
                    r#"<input coompo-is="date&#x2F;of&#x2F;birth" />"#,
                    r#"<input coompo-is="a&amp;b" />"#,
                    r#"<input coompo-is="a&b" />"#,
                    r#"<input coompo-is="missing" />"#
                )
                .to_string())
            })
            .build()
            .unwrap();

        let mut mounted = compose(&def, MemorySurface::new()).unwrap();
        let bindings = mounted.bindings();
        assert_eq!(bindings, vec!["date/of/birth", "a&b"]);
        for name in &bindings {
            mounted.input(name, "x").unwrap();
        }
        assert_eq!(mounted.instance().get("a&b"), Some(&Value::from("x")));
    }

    #[test]
    fn test_writer_surface_appends_each_render() {
        let mut mounted = compose(&field(), WriterSurface::new(Vec::new())).unwrap();
        mounted.input("firstname", "Ann").unwrap();
        let out = String::from_utf8(mounted.unmount().into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().last().unwrap().contains(r#"value="Ann""#));
    }
}
