//! get-papers-list - Entry Point
//!
//! Fetches PubMed papers with authors from pharmaceutical/biotech companies.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{
    EnvFilter, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use pubmed_affiliations::{
    Config, Paper, PubMedClient,
    formatters::{format_papers_json, format_papers_text, save_csv},
};

#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(about = "Fetch PubMed papers with authors from pharma/biotech companies")]
#[command(version)]
struct Cli {
    /// PubMed query string
    query: String,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Filename to save results as CSV
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of PubMed IDs to fetch [default: 100]
    #[arg(long, env = "PUBMED_MAX_RESULTS")]
    max_results: Option<u32>,

    /// NCBI API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Contact email reported to NCBI
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Academic keyword (repeatable); replaces the default list
    #[arg(long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Only report papers with at least one non-academic author
    #[arg(long)]
    only_industry: bool,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// Filter used by `--debug`: verbose for this crate, quiet for HTTP internals.
const DEBUG_FILTER: &str = "warn,pubmed_affiliations=debug,get_papers_list=debug";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogSink {
    Stdout,
    Stderr,
}

impl LogSink {
    /// `--debug` traces next to the report on stdout; otherwise stdout carries only the report.
    const fn for_run(debug: bool) -> Self {
        if debug { Self::Stdout } else { Self::Stderr }
    }

    fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

fn init_tracing(log_level: &str, debug: bool, json: bool) {
    let filter = if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    let subscriber = tracing_subscriber::registry().with(filter);
    let writer = LogSink::for_run(debug).make_writer();

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(writer)).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(writer)).init();
    }
}

/// Layer command-line flags over a base configuration. Flags that were not given
/// leave the base value untouched.
fn apply_cli(mut config: Config, cli: &Cli) -> Config {
    if let Some(max_results) = cli.max_results {
        config = config.with_max_results(max_results);
    }
    if cli.api_key.is_some() {
        config.api_key.clone_from(&cli.api_key);
    }
    if cli.email.is_some() {
        config.email.clone_from(&cli.email);
    }
    if !cli.keywords.is_empty() {
        config = config.with_academic_keywords(cli.keywords.iter().cloned());
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loads .env before the tracing filter reads RUST_LOG
    let config = apply_cli(Config::from_env()?, &cli);

    init_tracing(&cli.log_level, cli.debug, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), query = %cli.query, "Starting PubMed search");

    let client = PubMedClient::new(config)?;

    let mut papers = client.search(&cli.query).await?;

    if cli.only_industry {
        papers.retain(Paper::has_non_academic_authors);
    }

    if let Some(path) = &cli.file {
        save_csv(&papers, path)?;
        println!("Results saved to {}", path.display());
    } else if cli.json {
        println!("{}", format_papers_json(&papers)?);
    } else {
        println!("{}", format_papers_text(&papers));
    }

    Ok(())
}
