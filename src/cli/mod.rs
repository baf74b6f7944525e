mod render;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use eventplan::{CollectionKind, DynCollection, FileMedium, Medium, Planner, PlannerConfig};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "eventplan")]
#[command(about = "Wedding planning collections with a live progress dashboard")]
struct Cli {
    /// Directory holding one JSON file per collection
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed empty collections with the sample plan
    #[arg(long, global = true)]
    seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every section with its status and the overall progress
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// Print the records of one collection as JSON
    List { kind: CollectionKind },
    Stats { kind: CollectionKind },
    /// Add a record given as a JSON object; prints the assigned id
    Add {
        kind: CollectionKind,
        #[arg(long)]
        json: String,
    },
    Update {
        kind: CollectionKind,
        id: String,
        #[arg(long)]
        json: String,
    },
    Delete { kind: CollectionKind, id: String },
    /// Flip the completion flag of a record
    Toggle { kind: CollectionKind, id: String },
    /// Reprint the dashboard whenever another process changes the data
    Watch {
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PlannerConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.data_dir(dir);
    }
    if cli.seed {
        config = config.seed_sample_data(true);
    }

    let files = Arc::new(FileMedium::new(&config.data_dir));
    let medium: Arc<dyn Medium> = files.clone();
    let planner = Planner::with_config(medium, &config);

    match cli.command {
        Command::Dashboard { json } => {
            let snapshot = planner.dashboard().snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                render::print_dashboard(&snapshot);
            }
            Ok(())
        }
        Command::List { kind } => {
            let records = planner.collection(kind).records_json();
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Command::Stats { kind } => {
            render::print_stats(kind, &planner.collection(kind).stats());
            if kind == CollectionKind::Guests {
                render::print_headcount(&planner.headcount());
            }
            Ok(())
        }
        Command::Add { kind, json } => {
            let record = parse_object(&json)?;
            let id = mutate(planner.collection(kind), |c| c.create_json(record))?;
            println!("{}", id);
            Ok(())
        }
        Command::Update { kind, id, json } => {
            let record = parse_object(&json)?;
            mutate(planner.collection(kind), |c| c.update_json(&id, record))
                .with_context(|| format!("Failed to update {} '{}'", kind, id))?;
            println!("Updated {} '{}'", kind, id);
            Ok(())
        }
        Command::Delete { kind, id } => {
            if mutate(planner.collection(kind), |c| Ok(c.delete(&id)))? {
                println!("Deleted {} '{}'", kind, id);
            } else {
                println!("No {} record with id '{}'", kind, id);
            }
            Ok(())
        }
        Command::Toggle { kind, id } => {
            mutate(planner.collection(kind), |c| c.toggle_completed(&id))?;
            println!("Toggled {} '{}'", kind, id);
            Ok(())
        }
        Command::Watch { interval_ms } => {
            let interval = interval_ms
                .map(Duration::from_millis)
                .unwrap_or(config.poll_interval);
            watch(&planner, &files, interval).await
        }
    }
}

/// Runs one change and fails if it never reached the data directory.
///
/// The store keeps serving its in-memory value after a failed write, but this
/// process exits right after, so an unsaved change is a lost change.
fn mutate<R>(
    collection: &dyn DynCollection,
    change: impl FnOnce(&dyn DynCollection) -> eventplan::Result<R>,
) -> Result<R> {
    collection.take_warning();
    let outcome = change(collection)?;
    collection
        .ensure_persisted()
        .with_context(|| format!("Change to {} was not saved", collection.kind()))?;
    Ok(outcome)
}

fn parse_object(raw: &str) -> Result<JsonValue> {
    let value: JsonValue =
        serde_json::from_str(raw).with_context(|| "Record must be valid JSON".to_string())?;
    if !value.is_object() {
        return Err(anyhow!("Record must be a JSON object, got: {}", raw));
    }
    Ok(value)
}

async fn watch(planner: &Planner, files: &FileMedium, interval: Duration) -> Result<()> {
    let view = planner.dashboard();
    render::print_dashboard(&view.snapshot());

    let subscription = view.subscribe(|snapshot| {
        println!();
        render::print_dashboard(snapshot);
    });
    info!(dir = %files.root().display(), ?interval, "watching for changes");

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                files.poll_changes();
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for ctrl-c")?;
                break;
            }
        }
    }

    subscription.unsubscribe();
    Ok(())
}
