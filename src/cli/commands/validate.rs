//! `coompo validate` command - Validate one property value

use miette::Result;

use crate::cli::commands::utils::{open_form, FormSource};
use crate::cli::helpers::{print_structured, print_validation};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::events::PropValidation;
use crate::core::value::Value;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: FormSource,

    /// Property to write
    pub prop: String,

    /// Raw value, as typed into the field
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_form(&args.source)?;
    let format = global
        .format
        .resolve(session.config.default_format.as_deref());

    let mut instance = session
        .app
        .definition
        .instantiate(Vec::<(String, Value)>::new())?;
    instance.set_property(&args.prop, args.value.as_str())?;

    // The form's validation hook has recorded the outcome
    let state = session.app.state.borrow();
    let errors = state.errors(&args.prop).to_vec();
    let is_valid = state.is_valid();

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let report = PropValidation {
                prop: args.prop.clone(),
                value: Value::String(args.value.clone()),
                is_valid,
                errors: errors.clone(),
            };
            print_structured(&report, format)?;
        }
        _ => {
            if !global.quiet || !errors.is_empty() {
                print_validation(&args.prop, &errors);
            }
        }
    }

    if is_valid {
        Ok(())
    } else {
        Err(miette::miette!(
            "'{}' is not a valid value for {}",
            args.value,
            args.prop
        ))
    }
}
