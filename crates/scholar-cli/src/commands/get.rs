//! Get command - resolve an object and show what it derives.

use colored::Colorize;
use scholar::ScholarConfig;

use super::build_scholar;
use crate::cli::BackendArgs;

pub fn run(
    backend: &BackendArgs,
    id: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scholar = build_scholar(backend, ScholarConfig::from_env()?)?;
    let detail = scholar.get_object(&id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let record = &detail.record;
    println!(
        "{} {} {}",
        record.entity().kind().to_string().cyan().bold(),
        record.id().white().bold(),
        format!("({:?})", record.origin()).dimmed()
    );
    if let Some(name) = record.title().or(record.display_name()) {
        println!("{}", name);
    }
    println!();

    if let Some(work) = &detail.work {
        println!("{}", "Citations:".yellow().bold());
        println!("  MLA: {}", work.citations.mla);
        println!("  APA: {}", work.citations.apa);
        println!("  GB:  {}", work.citations.gb);
        println!();

        if !work.referenced_works.is_empty() {
            println!("{}", "References:".yellow().bold());
            for reference in &work.referenced_works {
                println!("  {} {}", reference.id.dimmed(), reference.cited);
            }
            println!();
        }

        if !work.related_works.is_empty() {
            println!("{}", "Related works:".yellow().bold());
            for related in &work.related_works {
                let year = related
                    .publication_year
                    .map(|y| y.to_string())
                    .unwrap_or_default();
                println!(
                    "  {} {} {} {}",
                    related.id.dimmed(),
                    related.title,
                    year,
                    related.host_venue.dimmed()
                );
            }
            println!();
        }

        for link in &work.pdf_links {
            println!("{} {}", "PDF:".green(), link);
        }
    }

    if let Some(author) = &detail.author {
        println!("{}", author.intro);
    }

    if detail.work.is_none() && detail.author.is_none() {
        println!("{}", serde_json::to_string_pretty(record.fields())?);
    }

    Ok(())
}
