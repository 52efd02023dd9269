use anyhow::Result;
use clap::Parser;
use genesis_engine::logging;
use genesis_engine::tooling::cli::{Cli, CliContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::new(cli.config.clone())?;

    let mut logging_config = context.config().logging.clone();
    if let Some(level) = &cli.log_level {
        logging_config.level = level.clone();
    }
    logging::init_logging(&logging_config)?;

    let output = context.execute(&cli.command).await?;
    print!("{}", output);
    Ok(())
}
