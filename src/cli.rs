use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "ATP live draws scraper and match forecaster")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Scrape live tournaments and their pending matches
    Scrape {
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forecast a single match
    Forecast {
        #[arg(long)]
        player1: String,
        #[arg(long)]
        player2: String,
        /// Tournament type as the site names it, e.g. "ATP 500"
        #[arg(long)]
        tourney_type: Option<String>,
        /// Surface as the site names it, e.g. "Clay"
        #[arg(long)]
        surface: Option<String>,
        /// Snapshot date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Scrape, then forecast every pending match
    Run {
        /// Forecasts in flight at once
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_arguments() {
        let cli = Cli::parse_from([
            "atp_forecast",
            "forecast",
            "--player1",
            "Casper Ruud",
            "--player2",
            "Holger Rune",
            "--surface",
            "Clay",
            "--date",
            "2025-05-30",
        ]);

        assert_eq!(
            cli.command,
            Command::Forecast {
                player1: "Casper Ruud".to_string(),
                player2: "Holger Rune".to_string(),
                tourney_type: None,
                surface: Some("Clay".to_string()),
                date: NaiveDate::from_ymd_opt(2025, 5, 30),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["atp_forecast", "serve"]);
        assert_eq!(cli.command, Command::Serve { port: 3000 });

        let cli = Cli::parse_from(["atp_forecast", "run"]);
        assert_eq!(cli.command, Command::Run { concurrency: 4 });
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let parsed = Cli::try_parse_from([
            "atp_forecast",
            "forecast",
            "--player1",
            "A",
            "--player2",
            "B",
            "--date",
            "30/05/2025",
        ]);
        assert!(parsed.is_err());
    }
}
