use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use iams_e2e::{scenarios, E2eConfig, Runner, SuiteContext};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "iams-e2e", about = "End-to-end API suite for the IAMS admin endpoints")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario to run (repeatable); all scenarios when omitted
    #[arg(short, long = "scenario")]
    scenarios: Vec<String>,

    /// Run scenarios concurrently
    #[arg(long)]
    parallel: bool,

    /// Reuse the token file instead of authenticating again
    #[arg(long)]
    skip_auth: bool,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list {
        for scenario in scenarios::all() {
            println!("{:<12} {}", scenario.name(), scenario.description());
        }
        return Ok(());
    }

    let (config, config_path) =
        E2eConfig::load(args.config).context("Failed to load configuration")?;
    info!("Loaded configuration from {}", config_path.display());
    info!("Target API: {}", config.api.base_url);

    let selected = scenarios::select(&args.scenarios)?;
    let ctx = SuiteContext::new(config)?;
    let report = Runner::new(ctx, selected)
        .parallel(args.parallel)
        .skip_auth(args.skip_auth)
        .run()
        .await
        .context("Global setup failed")?;

    println!("{}", report);

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
