pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod http;
pub mod rate_limiter;
pub mod services;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;
use std::sync::Arc;

use crate::browser::ChromeSessionFactory;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::{MatchQuery, TournamentResult};
use crate::errors::fetch_context;
use crate::services::{forecast_all, report, MatchPipeline, ScrapeOrchestrator, ServerService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_scrape(json: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let results = scrape(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        report::print_tournaments(&results);
    }
    Ok(())
}

pub fn handle_forecast(
    player1: &str,
    player2: &str,
    tourney_type: Option<String>,
    surface: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let config = AppConfig::from_env();
    let query = MatchQuery {
        player1_name: player1.to_string(),
        player2_name: player2.to_string(),
        tourney_type,
        surface,
        snapshot_date: date,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let pipeline = MatchPipeline::from_settings(&config.services)?;
        anyhow::Ok(pipeline.run(query).await)
    })?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn handle_run(concurrency: usize) -> Result<()> {
    let config = AppConfig::from_env();
    let tournaments = scrape(&config)?;
    report::print_tournaments(&tournaments);

    let queries = pending_queries(&tournaments, Local::now().date_naive());
    if queries.is_empty() {
        info!("Nothing to forecast");
        return Ok(());
    }

    info!("=== Forecasting {} matches ===", queries.len());
    let runtime = tokio::runtime::Runtime::new()?;
    let results = runtime.block_on(async {
        let pipeline = Arc::new(MatchPipeline::from_settings(&config.services)?);
        anyhow::Ok(forecast_all(pipeline, queries, concurrency).await)
    })?;

    report::print_forecasts(&results);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

// --- Helpers ---

fn scrape(config: &AppConfig) -> Result<Vec<TournamentResult>> {
    let scraper = ScrapeOrchestrator::new(config.browser.clone())?;
    let sessions = ChromeSessionFactory::new(config.browser.clone());

    scraper
        .run(&sessions)
        .with_context(|| fetch_context(&config.browser.landing_url))
}

/// One pipeline query per pending match, tagged with its tournament's vocabulary
pub fn pending_queries(tournaments: &[TournamentResult], today: NaiveDate) -> Vec<MatchQuery> {
    tournaments
        .iter()
        .flat_map(|t| {
            t.incomplete_matches
                .iter()
                .map(move |game| MatchQuery::from_scraped(t, game, today))
        })
        .collect()
}
