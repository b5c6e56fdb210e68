use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use sub_aggregator::config::load_or_default;
use sub_aggregator::fetch::HttpFetcher;
use sub_aggregator::observability::logging;
use sub_aggregator::pipeline::{Aggregator, CandidateUrl};

#[derive(Parser)]
#[command(name = "subscription-cli")]
#[command(about = "Offline tools for the subscription aggregator", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "AGGREGATOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and write the subscription document
    Generate {
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
    },
    /// List the candidate sources selected from the index document
    Candidates {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    logging::init(&config.observability);

    let aggregator = Aggregator::new(HttpFetcher::new()?, Arc::new(config));

    match cli.command {
        Commands::Generate { output } => {
            let document = aggregator.build_document().await?;
            if document.entry_count == 0 {
                eprintln!("Warning: no configs found");
            }
            std::fs::write(&output, &document.body)?;
            println!(
                "Wrote {} config(s) to {}",
                document.entry_count,
                output.display()
            );
        }
        Commands::Candidates { json } => {
            let candidates = aggregator.candidates().await?;
            print_candidates(&candidates, json)?;
        }
    }

    Ok(())
}

fn print_candidates(candidates: &[CandidateUrl], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let urls: Vec<&str> = candidates.iter().map(CandidateUrl::as_str).collect();
        println!("{}", serde_json::to_string_pretty(&urls)?);
    } else {
        for (i, candidate) in candidates.iter().enumerate() {
            println!("{:>2}. {}", i + 1, candidate);
        }
        println!("{} candidate(s)", candidates.len());
    }
    Ok(())
}
