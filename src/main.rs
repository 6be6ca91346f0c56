mod cli;
mod commands;
mod config;
mod error;
mod llm;
mod mcp;
mod page_range;
mod pdf;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::ModelConfig;
use llm::QueryKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output and the MCP transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docllm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::ReadPages { path, range } => {
            commands::read_pages::run(&path, range.into())?;
        }
        Commands::Extract {
            path,
            start,
            end,
            output_dir,
        } => {
            commands::extract::run(&path, page_range::PageRange::new(start, end), &output_dir)?;
        }
        Commands::Summarize { path, range, model } => {
            let config = ModelConfig::from_env()?.with_overrides(model.model, model.temperature)?;
            commands::ask::run(&path, range.into(), QueryKind::Summarize, config).await?;
        }
        Commands::Query {
            path,
            question,
            range,
            model,
        } => {
            let config = ModelConfig::from_env()?.with_overrides(model.model, model.temperature)?;
            commands::ask::run(&path, range.into(), QueryKind::Question(question), config).await?;
        }
    }

    Ok(())
}
