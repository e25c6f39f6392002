use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use copilot_agent::{
    category_insights, default_listing, AgentConfig, CategoryInsight,
    ChatMessage, ListingAgent, MarketplaceCategory, RawListing,
};
use serde::Serialize;
use serde_json::json;
use shared_event_bus::{EventPublisher, MemoryEventBus};
use shared_logging::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "copilot", version, about = "Marketplace listing copilot")]
struct Cli {
    /// TOML file with scoring, pricing, keyword and telemetry settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// JSON-lines log file; overrides `telemetry.log_path`.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Prints the events emitted during the command to stderr.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates a listing and prints the full report.
    Report {
        /// Listing JSON file, or `-` for stdin.
        #[arg(long)]
        listing: PathBuf,
    },
    /// Prints the report for the built-in reference listing.
    Sample,
    /// Suggests a reply to a buyer message.
    Chat {
        /// Listing JSON file, or `-` for stdin. Defaults to the reference listing.
        #[arg(long)]
        listing: Option<PathBuf>,
        /// Message to answer.
        #[arg(long)]
        message: String,
        /// JSON array of earlier chat messages.
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Shows buyer motivations and trust signals.
    Categories {
        /// Restrict output to one category.
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryEntry {
    category: MarketplaceCategory,
    #[serde(flatten)]
    insight: &'static CategoryInsight,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (agent, bus) = build_agent(&cli)?;
    let outcome = execute(&agent, cli.command);
    if let Some(tel) = agent.telemetry() {
        let _ = tel.log(
            if outcome.is_ok() {
                LogLevel::Debug
            } else {
                LogLevel::Error
            },
            "cli.command.finished",
            json!({ "ok": outcome.is_ok() }),
        );
    }
    if let Some(bus) = bus {
        for event in bus.snapshot() {
            eprintln!("{}", serde_json::to_string(&event)?);
        }
    }
    let output = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn build_agent(cli: &Cli) -> Result<(ListingAgent, Option<Arc<MemoryEventBus>>)> {
    let mut config = match &cli.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    if let Some(path) = &cli.log_file {
        config.telemetry.log_path = Some(path.clone());
    }
    if !cli.trace {
        return Ok((ListingAgent::from_config(&config)?, None));
    }
    let bus = Arc::new(MemoryEventBus::new(256));
    let trace: Arc<dyn EventPublisher> = bus.clone();
    let agent = ListingAgent::from_config_with(&config, vec![trace])?;
    Ok((agent, Some(bus)))
}

fn execute(agent: &ListingAgent, command: Commands) -> Result<serde_json::Value> {
    match command {
        Commands::Report { listing } => {
            let raw = read_listing(&listing)?;
            match agent.evaluate(&raw) {
                Ok(report) => Ok(serde_json::to_value(report)?),
                Err(err) => {
                    for message in err.messages() {
                        eprintln!("- {message}");
                    }
                    bail!("{} validation issue(s) in {}", err.issues().len(), listing.display())
                }
            }
        }
        Commands::Sample => Ok(serde_json::to_value(agent.evaluate(&default_listing())?)?),
        Commands::Chat {
            listing,
            message,
            history,
        } => {
            let raw = match &listing {
                Some(path) => read_listing(path)?,
                None => default_listing(),
            };
            let listing = agent
                .validate(&raw)
                .context("chat unlocks once the listing passes validation")?;
            let history = match &history {
                Some(path) => read_history(path)?,
                None => Vec::new(),
            };
            let trimmed = message.trim();
            if trimmed.is_empty() {
                bail!("message is empty");
            }
            let reply = agent.chat_reply(&listing, &history, trimmed);
            Ok(serde_json::to_value(reply)?)
        }
        Commands::Categories { category } => {
            let categories = match category {
                Some(label) => match MarketplaceCategory::from_label(&label) {
                    Some(category) => vec![category],
                    None => bail!("unknown category '{label}'"),
                },
                None => MarketplaceCategory::ALL.to_vec(),
            };
            let entries: Vec<_> = categories
                .into_iter()
                .map(|category| CategoryEntry {
                    category,
                    insight: category_insights(category),
                })
                .collect();
            Ok(serde_json::to_value(entries)?)
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn read_listing(path: &Path) -> Result<RawListing> {
    let raw = read_source(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing listing {}", path.display()))
}

fn read_history(path: &Path) -> Result<Vec<ChatMessage>> {
    let raw = read_source(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing chat history {}", path.display()))
}
