mod aws;
mod config;
mod error;
mod patch;
mod patcher;

use anyhow::Result;
use clap::Parser;
use log::info;

use patcher::DistributionPatcher;

#[derive(Parser, Debug)]
#[command(name = "cloudfront-spa-fix")]
#[command(about = "Patches a CloudFront distribution so SPA routes fall back to /index.html")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Distribution to patch (overrides the config file)
    #[arg(short, long)]
    distribution_id: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        println!("❌ {err:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Load configuration first (before logger init)
    let mut config = config::Config::load(&args.config)?;
    if let Some(id) = args.distribution_id {
        config.distribution_id = id;
    }

    // Initialize logger with config log level (env var takes precedence)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();

    info!("Loaded configuration from: {}", args.config);
    info!("Target distribution: {}", config.distribution_id);

    let patcher = DistributionPatcher::new(config);
    patcher.run().await?;

    Ok(())
}
