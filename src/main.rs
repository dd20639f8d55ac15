//! Console entry point: load config, connect, optionally reset, run the menu.

use clap::Parser;
use std::path::PathBuf;
use tour_catalog::cli::Console;
use tour_catalog::{seed, AppConfig, CityTable, Database, RouteTable};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tour-catalog", version, about = "Browse and edit cities and tours")]
struct Args {
    /// YAML config file (default: $CONFIG_PATH or ./config.yaml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Drop, recreate and seed the tables before starting
    #[arg(long)]
    reset: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_catalog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    let db = Database::connect(&config).await?;

    let cities = CityTable::new(db.clone());
    let routes = RouteTable::new(db.clone());
    if args.reset {
        seed::reset(&cities, &routes).await?;
    } else {
        seed::init(&cities, &routes).await?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = Console::new(db.clone(), stdin.lock(), stdout.lock()).run().await;
    db.close().await;
    result?;
    Ok(())
}
