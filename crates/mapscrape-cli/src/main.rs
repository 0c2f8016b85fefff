mod scrape;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mapscrape_core::{AppConfig, QueryError, Target};
use tracing_subscriber::EnvFilter;

/// Exit code when there is nothing to search for.
const EXIT_NO_QUERIES: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mapscrape")]
#[command(about = "Collect Google Maps business listings into spreadsheets")]
struct Cli {
    /// Search query to run; overrides the query file
    #[arg(short = 's', long = "pesquisa", visible_alias = "search")]
    pesquisa: Option<String>,

    /// Listings to collect per query (default: everything the search returns)
    #[arg(short = 't', long)]
    total: Option<usize>,

    /// Query file with one search per line
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the spreadsheets are written to
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run Chromium without a window
    #[arg(long)]
    headless: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output_dir.clone_from(output);
        }
        if self.headless {
            config.headless = true;
        }
    }

    fn target(&self) -> Target {
        Target::from(self.total)
    }
}

/// Queries to run, or the exit code to stop with.
#[derive(Debug, PartialEq, Eq)]
enum QueryPlan {
    Run(Vec<String>),
    Exit(u8),
}

fn plan_queries(cli: &Cli, config: &AppConfig) -> anyhow::Result<QueryPlan> {
    match mapscrape_core::load_queries(cli.pesquisa.as_deref(), &config.input_path) {
        Ok(queries) => Ok(QueryPlan::Run(queries)),
        Err(e @ QueryError::NoQueries { .. }) => {
            eprintln!("error: {e}");
            Ok(QueryPlan::Exit(EXIT_NO_QUERIES))
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = mapscrape_core::load_app_config().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let queries = match plan_queries(&cli, &config)? {
        QueryPlan::Run(queries) => queries,
        QueryPlan::Exit(code) => return Ok(ExitCode::from(code)),
    };

    tracing::info!(
        queries = queries.len(),
        target = %cli.target(),
        output = %config.output_dir.display(),
        "starting scrape"
    );

    scrape::run_scrape(&config, &queries, cli.target()).await?;
    Ok(ExitCode::SUCCESS)
}
