use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use llm_cost_calculator::{config, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    if let cli::Commands::Version = command {
        println!("LLM Cost Calculator v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Logging settings live in the config, so load it first
    let cfg = config::load_config(&args.config)?;
    init_tracing(&cfg.server.log_level, &cfg.server.log_format);
    info!("Configuration loaded from {}", args.config.display());

    match command {
        cli::Commands::Report { model, usage } => {
            commands::report::execute(&cfg, model, &usage)?;
        }
        cli::Commands::Estimate { model, usage } => {
            commands::estimate::execute(&cfg, model, &usage)?;
        }
        cli::Commands::Compare { usage } => {
            commands::compare::execute(&cfg, &usage)?;
        }
        cli::Commands::Sweep {
            start,
            end,
            step,
            usage,
        } => {
            commands::sweep::execute(&cfg, start, end, step, &usage)?;
        }
        cli::Commands::Models { json } => {
            commands::models::execute(&cfg, json)?;
        }
        cli::Commands::Serve { port } => {
            commands::serve::execute(cfg, port).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&cfg)?;
        }
        // Printed above, before any configuration is read
        cli::Commands::Version => {}
    }

    Ok(())
}
