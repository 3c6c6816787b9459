//! explainer - grade MySQL query plans and table structure
//!
//! Usage:
//!   explainer logs <path> [--limit N] [--format text|json]
//!   explainer table <name> [--format text|json]
//!
//! Connection settings come from `<config dir>/explainer/config.toml` (or
//! `--config`), overridden by flags and `EXPLAINER_*` environment variables.

mod args;
mod logging;
mod report;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use explainer_analyzer::{ConnectionExecutor, explain_all, grade_all, parse_file};
use explainer_core::DatabaseConfig;
use explainer_driver_mysql::MySqlDriver;

use crate::args::{Cli, Commands, Format};
use crate::report::LogsOutput;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.default_log_filter())?;

    let config = DatabaseConfig::load_or_default(cli.connection.config.as_deref())
        .context("failed to load configuration")?;
    let config = cli.connection.apply(config);

    match cli.command {
        Commands::Logs {
            path,
            limit,
            format,
        } => run_logs(&config, &path, limit, format).await,
        Commands::Table { name, format } => run_table(&config, &name, format).await,
    }
}

async fn connect(config: &DatabaseConfig) -> anyhow::Result<ConnectionExecutor> {
    let connection = MySqlDriver::new()
        .connect(config)
        .await
        .with_context(|| format!("cannot connect to {}", config.connection_url_redacted()))?;
    Ok(ConnectionExecutor::new(connection))
}

async fn run_logs(
    config: &DatabaseConfig,
    path: &Path,
    limit: Option<usize>,
    format: Format,
) -> anyhow::Result<()> {
    let mut queries =
        parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!("Analyzing {} unique queries...", queries.len());

    if let Some(limit) = limit {
        queries.truncate(limit);
    }

    let executor = connect(config).await?;
    let mut batch = explain_all(&executor, &queries).await;
    let reports = grade_all(std::mem::take(&mut batch.plans), &executor).await;
    close(&executor).await;

    match format {
        Format::Text => {
            if !reports.is_empty() {
                println!("{}", report::render_queries(&reports));
                println!("{}", report::summary_table(&reports));
            }
        }
        Format::Json => println!("{}", report::to_json(&LogsOutput::new(&reports, &batch))?),
    }

    tracing::info!("{} unique queries were analyzed", reports.len());

    if let Some(exhausted) = &batch.exhausted {
        eprintln!("{} {}", "warning:".yellow().bold(), exhausted);
    }
    Ok(())
}

async fn run_table(config: &DatabaseConfig, table: &str, format: Format) -> anyhow::Result<()> {
    let executor = connect(config).await?;
    let analyzed = explainer_analyzer::analyze(&executor, table).await;
    close(&executor).await;

    let table_report = analyzed.with_context(|| format!("failed to analyze table {table}"))?;
    match format {
        Format::Text => println!("{}", report::render(&table_report)),
        Format::Json => println!("{}", report::to_json(&table_report)?),
    }
    Ok(())
}

async fn close(executor: &ConnectionExecutor) {
    if let Err(e) = executor.connection().close().await {
        tracing::warn!(error = %e, "failed to close connection");
    }
}
