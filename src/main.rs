//! Cheatsheet Generator - printable PDF cheat sheets from YAML hotkey lists.

use cheatsheet::cli::GenerateArgs;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cheatsheet Generator - printable PDF cheat sheets from YAML hotkey lists
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    if let Err(e) = cli.generate.execute() {
        eprintln!("Error: {}", e.message);
        std::process::exit(e.code.as_i32());
    }
}
