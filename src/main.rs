use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use covid_watch::config::Config;
use covid_watch::output::terminal;
use covid_watch::provider::{CachedStatsProvider, HttpStatsProvider, StatsProvider};
use covid_watch::stats::ranking::{rank_by, Statistic};
use covid_watch::stats::{percentage_report, resolve, ResolutionResult, StatsError};

/// covid-watch: track COVID-19 statistics for your favorite countries.
#[derive(Parser)]
#[command(name = "covid-watch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Look up a country by name fragment or ISO2 code
    Resolve {
        /// e.g. "united", "guinea-bissau" or "GB"
        query: String,
    },

    /// Show a country's statistics as a percentage of global statistics
    Percentage {
        /// Must resolve to exactly one country
        query: String,
    },

    /// Rank all countries by a statistic (e.g. TotalDeaths)
    Rank {
        stat: String,

        /// Only show the top N countries
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("covid_watch=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing covid-watch database...");
            let db = covid_watch::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
        }

        Commands::Serve { port, bind } => {
            config.require_session_secret()?;
            let db = covid_watch::db::initialize_sqlite(&config.db_path)?;
            let provider = build_provider(&config)?;
            covid_watch::web::run_server(config, db, provider, port, &bind).await?;
        }

        Commands::Resolve { query } => {
            let provider = build_provider(&config)?;
            let directory = provider.countries().await?;
            let resolution = resolve(&query, &directory);
            terminal::display_resolution(&query, &resolution);

            if let ResolutionResult::SingleMatch(country) = resolution {
                let totals = provider.latest_totals(&country.slug).await?;
                terminal::display_totals(&totals);
            }
        }

        Commands::Percentage { query } => {
            let provider = build_provider(&config)?;
            let directory = provider.countries().await?;
            let resolution = resolve(&query, &directory);

            let country = match resolution.clone().into_single() {
                Ok(country) => country,
                Err(StatsError::AmbiguousMatch(_)) => {
                    terminal::display_resolution(&query, &resolution);
                    anyhow::bail!("Query matched several countries. Narrow it down and retry.");
                }
                Err(e) => return Err(e.into()),
            };

            let summary = provider.summary().await?;
            let country_summary = summary.country_by_slug(&country.slug).ok_or_else(|| {
                StatsError::UpstreamDataUnavailable(format!(
                    "provider has no summary for {}",
                    country.slug
                ))
            })?;
            let report = percentage_report(&summary.global.totals(), country_summary)?;
            terminal::display_percentage_report(&report);
        }

        Commands::Rank { stat, limit } => {
            let stat: Statistic = stat.parse()?;
            let provider = build_provider(&config)?;
            let summary = provider.summary().await?;
            let mut ranked = rank_by(&summary.countries, stat);
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }
            terminal::display_ranking(stat, &ranked);
        }
    }

    Ok(())
}

/// The HTTP provider behind a response cache.
fn build_provider(config: &Config) -> Result<Arc<dyn StatsProvider>> {
    info!(api_url = %config.api_url, ttl_secs = config.cache_ttl.as_secs(), "Using statistics provider");
    let http = HttpStatsProvider::new(&config.api_url)?;
    Ok(Arc::new(CachedStatsProvider::new(http, config.cache_ttl)))
}
