mod report;

use clap::{Parser, Subcommand};
use salesdash_core::{
    build_dashboard, DashboardRequest, Region, SourceQuery, Year, DEFAULT_TOP_SELLERS,
};
use salesdash_source::SalesClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "salesdash-cli")]
#[command(about = "Sales dashboard in the terminal")]
struct Cli {
    /// Region label (Brasil, Centro-Oeste, Nordeste, Norte, Sudeste, Sul).
    #[arg(long, global = true, default_value = "Brasil")]
    region: Region,

    /// Restrict to one year; omit for the whole period.
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(i32).range(i64::from(Year::MIN)..=i64::from(Year::MAX))
    )]
    year: Option<i32>,

    /// Keep only these sellers (repeat or comma-separate).
    #[arg(long = "seller", global = true, value_delimiter = ',')]
    sellers: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Revenue metrics, revenue by location, month and category.
    Revenue {
        #[arg(long)]
        json: bool,
    },
    /// Sale counts by location, month and category.
    Sales {
        #[arg(long)]
        json: bool,
    },
    /// Top sellers by revenue and by number of sales.
    Sellers {
        /// Number of sellers in each ranking.
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(2..=10))]
        top: u8,
        #[arg(long)]
        json: bool,
    },
    /// Sellers available for the selected region and year.
    SellersList,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salesdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let query = SourceQuery {
        region: cli.region,
        year: cli.year.map(Year::new).transpose()?,
    };

    let client = SalesClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.source_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build sales client: {e}"))?;

    let raw = client
        .fetch_transactions(&query)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch sales for {}: {e}", query.region))?;

    let top_sellers = match cli.command {
        Commands::Sellers { top, .. } => usize::from(top),
        _ => DEFAULT_TOP_SELLERS,
    };
    let request = DashboardRequest {
        sellers: cli.sellers,
        top_sellers,
    };
    let dashboard = build_dashboard(raw, &request)?;
    tracing::debug!(
        region = %query.region,
        total_sales = dashboard.total_sales,
        "dashboard built"
    );

    let output = match cli.command {
        Commands::Revenue { json: false } => report::render_revenue(&dashboard),
        Commands::Revenue { json: true } => report::revenue_json(&dashboard)?,
        Commands::Sales { json: false } => report::render_sales(&dashboard),
        Commands::Sales { json: true } => report::sales_json(&dashboard)?,
        Commands::Sellers { json: false, .. } => report::render_sellers(&dashboard),
        Commands::Sellers { json: true, .. } => report::sellers_json(&dashboard)?,
        Commands::SellersList => report::render_seller_list(&dashboard),
    };
    print!("{output}");

    Ok(())
}
