//! Network command - build an author's collaboration network.

use colored::Colorize;
use scholar::{CancelToken, ScholarConfig};

use super::build_scholar;
use crate::cli::BackendArgs;

pub fn run(
    backend: &BackendArgs,
    id: String,
    top_n: Option<usize>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ScholarConfig::from_env()?;
    if let Some(n) = top_n {
        config.network.top_n = n;
    }
    let scholar = build_scholar(backend, config)?;

    // Ctrl+C stops the page walk; the build then returns Cancelled
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("{}", "Cancelling...".yellow());
        handler_token.cancel();
    })?;

    let graph = scholar.author_network_with_cancel(&id, &cancel)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    let seed = graph
        .vertices
        .first()
        .map(|v| v.full.as_str())
        .unwrap_or(id.as_str());
    println!(
        "{} {}",
        "Collaborators of".cyan().bold(),
        seed.white().bold()
    );
    println!();

    if graph.edges.is_empty() {
        println!("{}", "No co-authors found.".dimmed());
        return Ok(());
    }

    for (rank, edge) in graph.edges.iter().enumerate() {
        let name = graph
            .vertex(&edge.to)
            .map(|v| v.full.as_str())
            .unwrap_or(edge.to.as_str());
        println!(
            "{:>3}. {:<40} {:>4} {} {}",
            rank + 1,
            name,
            edge.weight.to_string().green(),
            if edge.weight == 1 { "work " } else { "works" },
            edge.to.dimmed()
        );
    }

    Ok(())
}
