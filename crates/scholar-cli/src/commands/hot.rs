//! Hot command - list the most-viewed works.

use colored::Colorize;
use scholar::ScholarConfig;

use super::build_scholar;
use crate::cli::BackendArgs;

pub fn run(
    backend: &BackendArgs,
    limit: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scholar = build_scholar(backend, ScholarConfig::from_env()?)?;
    let hot = scholar.hot_works(limit)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&hot)?);
        return Ok(());
    }

    if hot.is_empty() {
        println!("{}", "No views recorded yet.".dimmed());
        if backend.store.is_none() {
            println!("{}", "Pass --store to read a persisted view counter.".dimmed());
        }
        return Ok(());
    }

    println!("{}", "Most-viewed works".cyan().bold());
    println!();
    for (rank, view) in hot.iter().enumerate() {
        println!(
            "{:>3}. {:<50} {:>6} {} {}",
            rank + 1,
            view.work_title,
            view.views.to_string().green(),
            if view.views == 1 { "view " } else { "views" },
            view.work_id.dimmed()
        );
    }

    Ok(())
}
