//! Price Tracker - MTG inventory pricing and shelf checks
//!
//! `serve` runs the backend (deck proxy, priced view, static client).
//! `report` prices an inventory and prints the filtered, sorted table.

use clap::{Args, Parser, Subcommand};
use price_tracker::api::archidekt::DEFAULT_DECK_ID;
use price_tracker::api::scryfall::SCRYFALL_BASE_URL;
use price_tracker::batch::DEFAULT_REQUEST_DELAY;
use price_tracker::config::DEFAULT_PORT;
use price_tracker::formatters::format_table;
use price_tracker::{evaluate, resolve_all, PricingSource, Selection, TrackerConfig};
use std::path::PathBuf;
use std::time::Duration;

/// MTG price tracker - flags cards shelved in the wrong price bucket
#[derive(Parser, Debug)]
#[command(name = "price_tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the deck proxy, priced view and web client
    Serve(ServeArgs),
    /// Print the priced inventory as a table
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct PricingArgs {
    /// Where prices come from: embedded vendor quotes or Scryfall
    #[arg(long, default_value = "embedded")]
    pricing: PricingSource,

    /// Scryfall API base URL
    #[arg(long, default_value = SCRYFALL_BASE_URL)]
    scryfall_base: String,

    /// Issue all Scryfall lookups at once instead of one by one
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Pause between sequential Scryfall lookups (milliseconds)
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY.as_millis() as u64)]
    request_delay_ms: u64,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PRICE_TRACKER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Archidekt deck holding the inventory
    #[arg(long, env = "PRICE_TRACKER_DECK_ID", default_value_t = DEFAULT_DECK_ID)]
    deck_id: u64,

    /// Directory with the built web client
    #[arg(long)]
    static_dir: Option<PathBuf>,

    #[command(flatten)]
    pricing: PricingArgs,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Backend serving /api/cards
    #[arg(long, env = "PRICE_TRACKER_API_BASE", default_value_t = format!("http://localhost:{}", DEFAULT_PORT))]
    api_base: String,

    /// Only cards in the wrong bucket
    #[arg(long, default_value_t = false)]
    mismatch_only: bool,

    /// Only cards that belong in a higher bucket
    #[arg(long, default_value_t = false)]
    move_up_only: bool,

    /// Current shelf, e.g. "$2"
    #[arg(long)]
    category: Option<String>,

    /// Single color ("Red") or exact combination ("Blue, White")
    #[arg(long)]
    color: Option<String>,

    /// Bucket the price says the card belongs in
    #[arg(long)]
    should_be: Option<String>,

    /// Column to sort by, e.g. price or current_category
    #[arg(long)]
    sort: Option<String>,

    /// asc or desc
    #[arg(long)]
    direction: Option<String>,

    #[command(flatten)]
    pricing: PricingArgs,
}

impl ReportArgs {
    fn selection(&self) -> Selection {
        Selection {
            mismatch_only: self.mismatch_only,
            move_up_only: self.move_up_only,
            category: self.category.clone(),
            color: self.color.clone(),
            should_be: self.should_be.clone(),
            sort: self.sort.clone(),
            direction: self.direction.clone(),
        }
    }
}

fn build_config(pricing: &PricingArgs) -> TrackerConfig {
    TrackerConfig {
        scryfall_base: pricing.scryfall_base.clone(),
        pricing: pricing.pricing,
        parallel: pricing.parallel,
        request_delay: Duration::from_millis(pricing.request_delay_ms),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Report(args) => run_report(args).await,
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_serve(args: ServeArgs) -> price_tracker::Result<()> {
    let config = TrackerConfig {
        deck_id: args.deck_id,
        ..build_config(&args.pricing)
    };

    log::info!("Starting price_tracker for deck {}", config.deck_id);
    log::info!("Pricing: {:?}", config.strategy());

    price_tracker::web::serve(&config, args.port, args.static_dir.as_deref()).await
}

async fn run_report(args: ReportArgs) -> price_tracker::Result<()> {
    let view_state = args.selection().into_view_state()?;
    let config = TrackerConfig {
        api_base: args.api_base.clone(),
        ..build_config(&args.pricing)
    };

    let inventory = config.inventory_client();
    log::info!("Fetching inventory from {}", inventory.base_url());
    let cards = inventory.fetch_cards().await?;

    let annotated = resolve_all(cards, config.strategy(), &config.scryfall_client()).await;
    let rows = evaluate(&annotated, &view_state);

    print!("{}", format_table(&rows));
    Ok(())
}
