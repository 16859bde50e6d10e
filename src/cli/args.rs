//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, fill::FillArgs, render::RenderArgs, schema::SchemaCommands,
    trace::TraceArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "coompo")]
#[command(author, version, about = "Coompo component toolkit")]
#[command(long_about = "Declarative components with validated properties: mount forms, feed inputs through the validation pipeline, and render HTML.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mount a form, apply inputs, and print the rendered HTML
    Render(RenderArgs),

    /// Validate one property value and report its errors
    Validate(ValidateArgs),

    /// Show the ordered validation/change events produced by inputs
    Trace(TraceArgs),

    /// Fill in a form interactively
    Fill(FillArgs),

    /// Inspect form definitions
    #[command(subcommand)]
    Schema(SchemaCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (text for terminals)
    #[default]
    Auto,
    /// Human-readable text
    Text,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve `auto` against a configured default
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .filter(|f| *f != OutputFormat::Auto)
            .unwrap_or(OutputFormat::Text)
    }
}
