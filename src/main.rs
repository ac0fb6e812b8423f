use anyhow::Result;

use atp_forecast::cli::Command;
use atp_forecast::{
    handle_completions, handle_forecast, handle_run, handle_scrape, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Scrape { json } => handle_scrape(*json),
        Command::Forecast {
            player1,
            player2,
            tourney_type,
            surface,
            date,
        } => handle_forecast(player1, player2, tourney_type.clone(), surface.clone(), *date),
        Command::Run { concurrency } => handle_run(*concurrency),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
