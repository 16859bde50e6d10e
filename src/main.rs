use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use coompo::cli::{Cli, Commands};
use coompo::core::Config;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let filter = Config::load().log_filter(global.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Render(args) => coompo::cli::commands::render::run(args, &global),
        Commands::Validate(args) => coompo::cli::commands::validate::run(args, &global),
        Commands::Trace(args) => coompo::cli::commands::trace::run(args, &global),
        Commands::Fill(args) => coompo::cli::commands::fill::run(args, &global),
        Commands::Schema(cmd) => coompo::cli::commands::schema::run(cmd, &global),
        Commands::Completions(args) => coompo::cli::commands::completions::run(args),
    }
}
