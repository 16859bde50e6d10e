//! `coompo render` command - Mount a form, apply inputs, print HTML

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::commands::utils::{open_form, FormSource};
use crate::cli::helpers::{parse_assignment, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::mount::{compose, MemorySurface};

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: FormSource,

    /// Input to apply, as NAME=VALUE (repeatable, applied in order)
    #[arg(long = "set", short = 's', value_parser = parse_assignment)]
    pub inputs: Vec<(String, String)>,

    /// Write the HTML to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Fail if any property is invalid after the inputs are applied
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct RenderReport<'a> {
    form: &'a str,
    valid: bool,
    errors: BTreeMap<&'a str, &'a [String]>,
    html: &'a str,
}

pub fn run(args: RenderArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_form(&args.source)?;
    let format = global
        .format
        .resolve(session.config.default_format.as_deref());

    let mut mounted = compose(&session.app.definition, MemorySurface::new())?;
    for (name, value) in &args.inputs {
        mounted.input(name, value.as_str())?;
    }

    let instance = mounted.instance();
    let html = mounted.markup();

    if let Some(path) = &args.output {
        std::fs::write(path, format!("{}\n", html)).into_diagnostic()?;
        if !global.quiet {
            println!(
                "{} Wrote {} to {}",
                style("✓").green(),
                style(&session.spec.name).bold(),
                path.display()
            );
        }
    } else if format == OutputFormat::Text {
        println!("{}", html);
    } else {
        let errors = instance
            .props()
            .map(|(name, state)| (name, state.errors.as_slice()))
            .collect();
        let report = RenderReport {
            form: &session.spec.name,
            valid: instance.is_valid(),
            errors,
            html,
        };
        print_structured(&report, format)?;
    }

    if args.strict && !instance.is_valid() {
        let invalid: Vec<_> = instance
            .props()
            .filter(|(_, state)| !state.is_valid())
            .map(|(name, _)| name)
            .collect();
        return Err(miette::miette!(
            "Form '{}' is invalid: {}",
            session.spec.name,
            invalid.join(", ")
        ));
    }

    Ok(())
}
