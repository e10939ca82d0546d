//! Cite command - print the citations of a work.

use colored::Colorize;
use scholar::ScholarConfig;

use super::build_scholar;
use crate::cli::{BackendArgs, CitationStyle};

pub fn run(
    backend: &BackendArgs,
    id: String,
    style: CitationStyle,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scholar = build_scholar(backend, ScholarConfig::from_env()?)?;
    let citations = scholar.citations(&id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&citations)?);
        return Ok(());
    }

    match style {
        CitationStyle::Mla => println!("{}", citations.mla),
        CitationStyle::Apa => println!("{}", citations.apa),
        CitationStyle::Gb => println!("{}", citations.gb),
        CitationStyle::All => {
            println!("{} {}", "MLA:".cyan().bold(), citations.mla);
            println!("{} {}", "APA:".cyan().bold(), citations.apa);
            println!("{} {}", "GB: ".cyan().bold(), citations.gb);
        }
    }

    Ok(())
}
