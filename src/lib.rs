pub mod analytics;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod rating;
pub mod render;
pub mod services;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::api::FeedSource;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::{AnalysisService, EventSource, IngestionService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_fetch(preferences: bool) -> Result<()> {
    let source = if preferences {
        FeedSource::Preferences
    } else {
        FeedSource::Events
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = IngestionService::new(&config)?;
        let count = service.run(source).await?;
        println!("Fetched {} events", count);
        Ok(())
    })
}

fn load_analysis(file: &Option<PathBuf>, config: AppConfig) -> Result<AnalysisService> {
    AnalysisService::load(config, &EventSource::from_arg(file.clone()))
}

pub fn handle_history(file: &Option<PathBuf>, limit: Option<usize>) -> Result<()> {
    let service = load_analysis(file, AppConfig::from_env())?;
    print!("{}", service.history(limit));
    Ok(())
}

pub fn handle_authors(
    file: &Option<PathBuf>,
    filter: &str,
    toggle: Option<&str>,
    all: bool,
) -> Result<()> {
    let service = load_analysis(file, AppConfig::from_env())?;
    print!("{}", service.authors(filter, toggle, all));
    Ok(())
}

pub fn handle_chart(
    file: &Option<PathBuf>,
    filter: &str,
    granularity: Option<analytics::Granularity>,
) -> Result<()> {
    let service = load_analysis(file, AppConfig::from_env())?;
    print!("{}", service.chart(filter, granularity));
    Ok(())
}

pub fn handle_leaderboard(
    file: &Option<PathBuf>,
    exclude: &str,
    include_unrated: bool,
    skip_uncounted: bool,
) -> Result<()> {
    let mut config = AppConfig::from_env();
    config.elo.skip_uncounted = skip_uncounted;

    let service = load_analysis(file, config)?;
    print!("{}", service.leaderboard(exclude, include_unrated));
    Ok(())
}

pub fn handle_suggest(file: &Option<PathBuf>, input: &str, pick: Option<&str>) -> Result<()> {
    let service = load_analysis(file, AppConfig::from_env())?;
    print!("{}", service.suggest(input, pick));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
