//! `coompo fill` command - Interactive form filling
//!
//! Prompts for each bound input in the order it appears in the rendered
//! form. Every answer goes through the validation pipeline; a field is
//! asked again until its value validates.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::utils::{open_form, FormSource};
use crate::cli::helpers::print_validation;
use crate::cli::GlobalOpts;
use crate::core::mount::{compose, MemorySurface};
use crate::core::value::value_text;

#[derive(clap::Args, Debug)]
pub struct FillArgs {
    #[command(flatten)]
    pub source: FormSource,

    /// Write the final HTML to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: FillArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_form(&args.source)?;
    let theme = ColorfulTheme::default();

    let mut mounted = compose(&session.app.definition, MemorySurface::new())?;

    if !global.quiet {
        println!();
        println!(
            "{} Filling in {}",
            style("◆").cyan(),
            style(&session.spec.name).bold()
        );
        println!("{}", style("─".repeat(50)).dim());
        println!();
    }

    for binding in mounted.bindings() {
        let label = session
            .spec
            .field(&binding)
            .map(|f| f.label().to_string())
            .unwrap_or_else(|| binding.clone());

        loop {
            let current = mounted
                .instance()
                .get(&binding)
                .map(|v| value_text(v).into_owned())
                .unwrap_or_default();

            let answer: String = Input::with_theme(&theme)
                .with_prompt(&label)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;

            mounted.input(&binding, answer)?;

            let errors = mounted.instance().errors(&binding)?;
            if errors.is_empty() {
                break;
            }
            print_validation(&label, errors);
        }
    }

    let html = mounted.markup();
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", html)).into_diagnostic()?;
            if !global.quiet {
                println!();
                println!("{} Wrote form to {}", style("✓").green(), path.display());
            }
        }
        None => {
            println!();
            println!("{}", html);
        }
    }

    Ok(())
}
