//! `coompo schema` command - Inspect form definitions

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::load_registry;
use crate::cli::helpers::print_structured;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List all known form definitions
    List,

    /// Show the fields of a form definition
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Form name
    pub name: String,
}

pub fn run(cmd: SchemaCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global.format.resolve(config.default_format.as_deref());
    let registry = load_registry(&config)?;

    match cmd {
        SchemaCommands::List => {
            if format != OutputFormat::Text {
                let forms: Vec<_> = registry.forms().collect();
                return print_structured(&forms, format);
            }

            println!("{:<16} {:<8} {}", "FORM", "FIELDS", "BINDINGS");
            println!("{}", "-".repeat(50));
            for form in registry.forms() {
                let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
                println!("{:<16} {:<8} {}", form.name, form.fields.len(), names.join(", "));
            }
            if !global.quiet {
                println!("\nUse 'coompo schema show <form>' for field details");
            }
            Ok(())
        }
        SchemaCommands::Show(args) => {
            let form = registry
                .get(&args.name)
                .ok_or_else(|| miette::miette!("Unknown form '{}'", args.name))?;

            if format != OutputFormat::Text {
                return print_structured(form, format);
            }

            println!("{}", style(&form.name).bold());
            for field in &form.fields {
                let mut notes = Vec::new();
                if let Some(validator) = &field.validator {
                    notes.push(format!("validator: {}", validator));
                }
                if field.required {
                    notes.push("required".to_string());
                }
                println!(
                    "  {:<16} {:<16} default {} {}",
                    field.name,
                    field.label(),
                    field.default,
                    style(notes.join(", ")).dim()
                );
            }
            Ok(())
        }
    }
}
