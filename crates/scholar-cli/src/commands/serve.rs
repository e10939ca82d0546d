//! Serve command - run the HTTP API.

use std::sync::Arc;

use colored::Colorize;
use scholar::ScholarConfig;

use super::build_scholar;
use crate::cli::BackendArgs;
use crate::server::{app, state::AppState};

pub fn run(
    backend: &BackendArgs,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let scholar = build_scholar(backend, ScholarConfig::from_env()?)?;
    let state = AppState::new(Arc::new(scholar));

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting scholar API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
