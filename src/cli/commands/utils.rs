//! Shared utilities for CLI commands

use miette::Result;
use std::path::PathBuf;
use std::rc::Rc;

use crate::app::FormApp;
use crate::core::config::Config;
use crate::core::error::ComponentError;
use crate::schema::registry::{FormSpec, SchemaRegistry, DEFAULT_FORM};
use crate::schema::template::TemplateRenderer;
use crate::schema::validator::ValidatorRegistry;

/// Which form a command works on
#[derive(clap::Args, Debug, Clone)]
pub struct FormSource {
    /// Name of a known form definition (default: the built-in sample form)
    #[arg(long, conflicts_with = "definition")]
    pub form: Option<String>,

    /// Load the form definition from a YAML file
    #[arg(long, short = 'd')]
    pub definition: Option<PathBuf>,
}

/// Everything a command needs to work with one form
pub struct Session {
    pub config: Config,
    pub spec: FormSpec,
    pub app: FormApp,
}

/// Load the known form definitions, including the configured directory
pub fn load_registry(config: &Config) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::default();
    if let Some(dir) = &config.definitions_dir {
        let count = registry.load_dir(dir)?;
        tracing::debug!(dir = %dir.display(), count, "loaded form definitions");
    }
    Ok(registry)
}

/// Load the templates, honouring a configured override directory
pub fn load_templates(config: &Config) -> Result<TemplateRenderer> {
    let renderer = match &config.template_dir {
        Some(dir) => TemplateRenderer::with_overrides(dir),
        None => TemplateRenderer::new(),
    };
    Ok(renderer.map_err(ComponentError::from)?)
}

/// Resolve the form to use and build its component
pub fn open_form(source: &FormSource) -> Result<Session> {
    let config = Config::load();

    let spec = match &source.definition {
        Some(path) => FormSpec::load(path)?,
        None => {
            let registry = load_registry(&config)?;
            let name = source.form.as_deref().unwrap_or(DEFAULT_FORM);
            registry.get(name).cloned().ok_or_else(|| {
                let known: Vec<_> = registry.forms().map(|f| f.name.as_str()).collect();
                miette::miette!(
                    help = format!("Known forms: {}", known.join(", ")),
                    "Unknown form '{}'",
                    name
                )
            })?
        }
    };

    let templates = Rc::new(load_templates(&config)?);
    let app = FormApp::new(&spec, &ValidatorRegistry::builtin(), templates)?;

    Ok(Session { config, spec, app })
}
