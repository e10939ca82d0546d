//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use scholar::DisplayMode;

/// Scholar: resolve works, authors, institutions, venues and concepts
#[derive(Parser)]
#[command(name = "scholar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub backend: BackendArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where records come from. Flags override `SCHOLAR_*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Serve the catalog from local records instead of the remote API
    #[arg(long, global = true)]
    pub offline: bool,

    /// JSON-lines file of raw catalog records (used with --offline)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog_snapshot: Option<PathBuf>,

    /// JSON-lines file loaded into an in-memory search index
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "index_url")]
    pub index_snapshot: Option<PathBuf>,

    /// Elasticsearch base URL
    #[arg(long, global = true)]
    pub index_url: Option<String>,

    /// Remote catalog base URL
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    /// Contact address sent with catalog requests
    #[arg(long, global = true)]
    pub mailto: Option<String>,

    /// JSON file holding view counts and personal work orders
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Timeout for every remote call, in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an object and show what is derived from it
    Get {
        /// Object id, bare (W2741809807) or as a catalog URI
        #[arg(value_name = "ID")]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the citations of a work
    Cite {
        /// Work id
        #[arg(value_name = "WORK_ID")]
        id: String,

        /// Citation style
        #[arg(short, long, default_value = "all")]
        style: CitationStyle,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build an author's collaboration network (Ctrl+C cancels)
    Network {
        /// Author id
        #[arg(value_name = "AUTHOR_ID")]
        id: String,

        /// Number of collaborators to keep
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List an author's works in their stored order
    Works {
        /// Author id
        #[arg(value_name = "AUTHOR_ID")]
        id: String,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Works per page
        #[arg(long, default_value = "25")]
        page_size: usize,

        /// Which works to show (visible, all)
        #[arg(short, long, default_value = "visible")]
        display: DisplayMode,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the most-viewed works recorded in the store
    Hot {
        /// Number of works to list
        #[arg(short = 'n', long, default_value_t = scholar::DEFAULT_HOT_WORKS)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

/// Citation style to print
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CitationStyle {
    Mla,
    Apa,
    Gb,
    #[default]
    All,
}

impl std::str::FromStr for CitationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mla" => Ok(CitationStyle::Mla),
            "apa" => Ok(CitationStyle::Apa),
            "gb" | "gbt7714" | "gb/t7714" => Ok(CitationStyle::Gb),
            "all" => Ok(CitationStyle::All),
            _ => Err(format!("Unknown style: {}. Use mla, apa, gb, or all.", s)),
        }
    }
}

impl std::fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CitationStyle::Mla => write!(f, "mla"),
            CitationStyle::Apa => write!(f, "apa"),
            CitationStyle::Gb => write!(f, "gb"),
            CitationStyle::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_backend_flags() {
        let cli = Cli::parse_from([
            "scholar",
            "works",
            "A1",
            "--offline",
            "--page",
            "2",
            "--display",
            "all",
            "--timeout",
            "3",
        ]);
        assert!(cli.backend.offline);
        assert_eq!(cli.backend.timeout, Some(3));
        match cli.command {
            Commands::Works {
                page, display, ..
            } => {
                assert_eq!(page, 2);
                assert_eq!(display, DisplayMode::All);
            }
            _ => panic!("Expected works command"),
        }
    }

    #[test]
    fn test_hot_defaults_to_ten() {
        let cli = Cli::parse_from(["scholar", "hot", "--store", "views.json"]);
        assert_eq!(cli.backend.store, Some(PathBuf::from("views.json")));
        match cli.command {
            Commands::Hot { limit, json } => {
                assert_eq!(limit, 10);
                assert!(!json);
            }
            _ => panic!("Expected hot command"),
        }
    }

    #[test]
    fn test_citation_style_parse() {
        assert_eq!("APA".parse::<CitationStyle>(), Ok(CitationStyle::Apa));
        assert_eq!("gbt7714".parse::<CitationStyle>(), Ok(CitationStyle::Gb));
        assert!("chicago".parse::<CitationStyle>().is_err());
    }
}
