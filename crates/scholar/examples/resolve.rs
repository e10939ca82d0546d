//! Example: Resolve an object against the public catalog and print what
//! scholar derives from it.
//!
//! Usage:
//!   cargo run --example resolve -- <id>
//!
//! Example:
//!   cargo run --example resolve -- W2741809807
//!   cargo run --example resolve -- A2764814280

use std::env;

use scholar::{EntityKind, EntityRef, Scholar, ScholarConfig};

fn main() -> scholar::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example resolve -- <id>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example resolve -- W2741809807");
        std::process::exit(1);
    }

    let id = &args[1];
    let entity = EntityRef::parse(id)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Resolving {} {}", entity.kind(), entity.id());
    println!("{}", separator);
    println!();

    // Reads SCHOLAR_* variables; defaults to the public catalog
    let scholar = Scholar::from_config(ScholarConfig::from_env()?)?;
    let detail = scholar.get_object(id)?;

    println!("Origin: {:?}", detail.record.origin());
    if let Some(name) = detail.record.title().or(detail.record.display_name()) {
        println!("Name:   {}", name);
    }
    println!();

    match entity.kind() {
        EntityKind::Work => {
            if let Some(work) = &detail.work {
                println!("MLA: {}", work.citations.mla);
                println!("APA: {}", work.citations.apa);
                println!("GB:  {}", work.citations.gb);
                println!();
                println!("References ({}):", work.referenced_works.len());
                for reference in &work.referenced_works {
                    println!("  {} {}", reference.id, reference.cited);
                }
                for link in &work.pdf_links {
                    println!("PDF: {}", link);
                }
            }
        }
        EntityKind::Author => {
            if let Some(author) = &detail.author {
                println!("{}", author.intro);
                println!();
            }

            let graph = scholar.author_network(entity.id())?;
            println!("Top collaborators:");
            for edge in &graph.edges {
                let name = graph.vertex(&edge.to).map(|v| v.full.as_str()).unwrap_or("?");
                println!("  {:<40} {:>4} works", name, edge.weight);
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(detail.record.fields())?);
        }
    }

    Ok(())
}
