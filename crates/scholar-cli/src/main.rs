//! Scholar CLI - resolve academic objects and serve them over HTTP.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Get { id, json } => commands::get::run(&cli.backend, id, json),

        Commands::Cite { id, style, json } => commands::cite::run(&cli.backend, id, style, json),

        Commands::Network { id, top_n, json } => {
            commands::network::run(&cli.backend, id, top_n, json)
        }

        Commands::Works {
            id,
            page,
            page_size,
            display,
            json,
        } => commands::works::run(&cli.backend, id, page, page_size, display, json),

        Commands::Hot { limit, json } => commands::hot::run(&cli.backend, limit, json),

        Commands::Serve { host, port } => commands::serve::run(&cli.backend, host, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, `--verbose` gives `debug`).
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
