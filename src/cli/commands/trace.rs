//! `coompo trace` command - Show the event stream produced by inputs

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{open_form, FormSource};
use crate::cli::helpers::{parse_assignment, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::events::PropEvent;
use crate::core::value::Value;

#[derive(clap::Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub source: FormSource,

    /// Input to apply, as NAME=VALUE (repeatable, applied in order)
    #[arg(long = "set", short = 's', value_parser = parse_assignment)]
    pub inputs: Vec<(String, String)>,
}

pub fn run(args: TraceArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_form(&args.source)?;
    let format = global
        .format
        .resolve(session.config.default_format.as_deref());

    let mut instance = session
        .app
        .definition
        .instantiate(Vec::<(String, Value)>::new())?;
    for (name, value) in &args.inputs {
        instance.set_property(name, value.as_str())?;
    }

    let state = session.app.state.borrow();
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_structured(&state.events(), format)?,
        _ => {
            if state.events().is_empty() {
                if !global.quiet {
                    println!("No events (use --set NAME=VALUE to apply inputs)");
                }
            } else {
                println!("{}", events_table(state.events()));
            }
        }
    }

    Ok(())
}

/// Render events as a markdown table, one row per event
fn events_table(events: &[PropEvent]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "EVENT", "PROP", "VALUE", "DETAIL"]);

    for (i, event) in events.iter().enumerate() {
        let (value, detail) = match event {
            PropEvent::PropValidation(e) => {
                let detail = if e.is_valid {
                    "valid".to_string()
                } else {
                    format!("invalid: {}", e.errors.join("; "))
                };
                (e.value.to_string(), detail)
            }
            PropEvent::PropChange(e) => (e.new_value.to_string(), format!("was {}", e.old_value)),
        };
        builder.push_record([
            (i + 1).to_string(),
            event.kind().to_string(),
            event.prop().to_string(),
            value,
            detail,
        ]);
    }

    builder.build().with(Style::markdown()).to_string()
}
