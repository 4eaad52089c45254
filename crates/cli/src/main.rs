use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use yatra_agents::{ExternalPlanner, OpenAiConfig, TravelAgent};
use yatra_core::{Budget, ChatContext, ItineraryRequest};
use yatra_observability::{init_tracing, AppMetrics};
use yatra_storage::{DataStore, StoreConfig, DEFAULT_DATA_DIR, DEFAULT_FLAGSHIP};

#[derive(Debug, Parser)]
#[command(name = "yatra")]
#[command(about = "Yatra travel planner CLI")]
struct Cli {
    #[arg(long, env = "YATRA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[arg(long, env = "YATRA_FLAGSHIP_DESTINATION", default_value = DEFAULT_FLAGSHIP)]
    flagship: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a day-by-day itinerary.
    Itinerary {
        #[arg(long)]
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u8,
        #[arg(long, default_value = "medium")]
        budget: String,
        #[arg(long, default_value = "solo")]
        traveler_type: String,
        #[arg(long = "interest", required = true)]
        interests: Vec<String>,
        #[arg(long)]
        month: Option<String>,
        /// Try the configured text-generation backend first.
        #[arg(long)]
        external: bool,
    },
    Destination {
        slug: String,
    },
    Chat {
        #[arg(long)]
        destination: Option<String>,
    },
    Scraped {
        #[arg(long)]
        destination: Option<String>,
        /// Print one flat list tagged with each record's source.
        #[arg(long)]
        flat: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatra_cli");
    let cli = Cli::parse();

    let agent = build_agent(&cli.data_dir, &cli.flagship)?;

    match cli.command {
        Command::Itinerary {
            destination,
            days,
            budget,
            traveler_type,
            interests,
            month,
            external,
        } => {
            let budget = Budget::parse(&budget).context("invalid --budget value")?;
            let response = agent
                .generate_itinerary(&ItineraryRequest {
                    destination,
                    days,
                    budget,
                    traveler_type,
                    interests,
                    month,
                    use_external_model: external,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Destination { slug } => {
            let snapshot = agent.destination_snapshot(&slug)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Chat { destination } => run_chat(&agent, destination)?,
        Command::Scraped { destination, flat } => {
            if flat {
                println!("{}", serde_json::to_string_pretty(&agent.scraped_items())?);
            } else {
                let feed = agent.scraped_feed(destination.as_deref());
                println!("{}", serde_json::to_string_pretty(&feed)?);
            }
        }
    }

    Ok(())
}

fn run_chat(agent: &TravelAgent<DataStore>, destination: Option<String>) -> Result<()> {
    let context = ChatContext {
        destination,
        ..ChatContext::default()
    };

    println!("Yatra chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let reply = agent.chat(message, Some(&context))?;
        println!("\n{}\n", reply.reply);
        if !reply.sources.is_empty() {
            println!("{}\n", serde_json::to_string_pretty(&reply.sources)?);
        }
    }

    Ok(())
}

fn build_agent(data_dir: &Path, flagship: &str) -> Result<TravelAgent<DataStore>> {
    let store = DataStore::load(StoreConfig::new(data_dir, flagship))
        .with_context(|| format!("failed loading catalog from {}", data_dir.display()))?;

    Ok(TravelAgent::new(
        Arc::new(store),
        ExternalPlanner::new(OpenAiConfig::from_env()),
        AppMetrics::shared(),
    ))
}
