//! Works command - list an author's works in their stored order.

use colored::Colorize;
use scholar::store::NOT_PINNED;
use scholar::{DisplayMode, ScholarConfig};

use super::build_scholar;
use crate::cli::BackendArgs;

pub fn run(
    backend: &BackendArgs,
    id: String,
    page: usize,
    page_size: usize,
    display: DisplayMode,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scholar = build_scholar(backend, ScholarConfig::from_env()?)?;
    let works = scholar.personal_works(&id, page, page_size, display)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&works)?);
        return Ok(());
    }

    println!(
        "{} {} ({} {}, page {}/{})",
        "Works of".cyan().bold(),
        id.white().bold(),
        works.total_count,
        display,
        page,
        works.total_pages.max(1)
    );
    println!();

    for entry in &works.entries {
        let pinned = if entry.top != NOT_PINNED { "*".yellow() } else { " ".normal() };
        let pdf = if entry.has_pdf { "[pdf]".green() } else { "".normal() };
        match entry.record.as_ref().and_then(|r| r.title()) {
            Some(title) if entry.find => {
                println!("{} {} {} {}", pinned, entry.work_id.dimmed(), title, pdf)
            }
            _ => println!(
                "{} {} {}",
                pinned,
                entry.work_id.dimmed(),
                "(not found)".red()
            ),
        }
    }

    let unresolved = works.unresolved().count();
    if unresolved > 0 {
        println!();
        println!(
            "{} {} works could not be resolved",
            "Warning:".yellow(),
            unresolved
        );
    }

    Ok(())
}
