use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use restock_catalog::SalesStore;
use restock_core::Sku;
use restock_forecast::Artifacts;
use restock_inventory::{DEFAULT_SERVICE_LEVEL_Z, InventoryPolicy, PolicyConfig, VolatilityScope};
use restock_observability::LogFormat;
use restock_planner::{Planner, PlanningService};

mod display;

#[derive(Parser, Debug)]
#[command(name = "restock")]
#[command(about = "Demand forecast and reorder decision per SKU")]
#[command(version)]
struct Cli {
    /// Sales history CSV export
    #[arg(long, env = "RESTOCK_DATA", default_value = "FMCG.csv")]
    data: PathBuf,

    /// Log output format (pretty|json)
    #[arg(long, env = "RESTOCK_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known SKUs
    Skus,

    /// Show the product attributes used for a SKU
    Product { sku: Sku },

    /// Forecast demand and decide whether to reorder
    Decide {
        sku: Sku,

        /// Decision date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Units currently on hand
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        stock: i64,

        /// Encoding vocabulary JSON
        #[arg(long, env = "RESTOCK_VOCAB", default_value = "encoders.json")]
        vocab: PathBuf,

        /// Trained model JSON
        #[arg(long, env = "RESTOCK_MODEL", default_value = "model.json")]
        model: PathBuf,

        /// Service-level z multiplier
        #[arg(long, env = "RESTOCK_SERVICE_Z", default_value_t = DEFAULT_SERVICE_LEVEL_Z)]
        service_z: f64,

        /// Demand volatility scope (global|per-sku)
        #[arg(long, env = "RESTOCK_VOLATILITY", default_value = "global")]
        volatility: VolatilityScope,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the units_sold history of a SKU
    History { sku: Sku },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    restock_observability::init(cli.log_format);
    tracing::debug!(?cli, "arguments parsed");

    let store = Arc::new(
        SalesStore::from_path(&cli.data)
            .with_context(|| format!("loading sales history from {}", cli.data.display()))?,
    );

    match cli.command {
        Command::Skus => {
            for sku in store.skus() {
                println!("{sku}");
            }
        }
        Command::Product { sku } => {
            let product = store.latest(&sku)?;
            display::product(&product);
        }
        Command::History { sku } => {
            for (date, units) in store.sku_history(&sku)? {
                println!("{date}  {units:>10.2}");
            }
        }
        Command::Decide {
            sku,
            date,
            stock,
            vocab,
            model,
            service_z,
            volatility,
            json,
        } => {
            let artifacts = Artifacts::load(&vocab, &model).context("loading model artifacts")?;
            let policy = InventoryPolicy::new(PolicyConfig::new(service_z)?);
            let planner = Arc::new(Planner::new(artifacts, policy));
            let service = PlanningService::new(planner, store.clone(), store)
                .with_volatility_scope(volatility);

            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let decision = service.decide(&sku, date, stock)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                display::decision(&decision);
            }
        }
    }

    Ok(())
}
