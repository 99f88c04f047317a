use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stripe_events::{construct_event, Event, EventConfig};

#[derive(Parser)]
#[command(
    name = "stripe-event-inspect",
    about = "Look up values in a Stripe webhook event"
)]
struct Cli {
    /// Event JSON file. Reads stdin when omitted or "-".
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Path segments into data.object, e.g. `customer address city` or `lines data 0 id`
    path: Vec<String>,

    /// Look up the path in data.previous_attributes instead
    #[arg(long)]
    previous: bool,

    /// Print the canonical JSON serialization of the event
    #[arg(long, conflicts_with_all = ["path", "previous"])]
    canonical: bool,

    /// Expected API version (overrides STRIPE_API_VERSION)
    #[arg(long)]
    api_version: Option<String>,

    /// Accept events whose API version does not match
    #[arg(long)]
    ignore_api_version_mismatch: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EventConfig::from_env()?;
    if let Some(version) = cli.api_version.clone() {
        config = config.with_api_version(version);
    }
    if cli.ignore_api_version_mismatch {
        config = config.with_ignore_api_version_mismatch(true);
    }
    config.log();

    let payload = read_payload(cli.file.as_ref())?;
    let event = construct_event(&payload, &config).context("Failed to decode event")?;

    tracing::info!(
        event_id = %event.id,
        event_type = %event.event_type,
        created = ?event.created_at(),
        "Loaded event"
    );

    println!("{}", render(&cli, &event)?);
    Ok(())
}

fn read_payload(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            Ok(buf)
        }
    }
}

fn render(cli: &Cli, event: &Event) -> Result<String> {
    if cli.canonical {
        return Ok(event.to_json()?);
    }

    let value = if cli.previous {
        event.try_get_previous_value(&cli.path)
    } else {
        event.try_get_object_value(&cli.path)
    };
    value.with_context(|| format!("Invalid path: {}", cli.path.join(" ")))
}
