use anyhow::Result;
use clap::Parser;
use mealbook::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealbook::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealbook::observability::init_observability(
        "mealbook",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    mealbook::cli::run(cli, config).await
}
