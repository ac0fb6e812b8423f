use colored::Colorize;

use crate::domain::{PipelineResult, PipelineStage, TournamentResult};

const NO_PENDING_MATCHES: &str = "(no pending matches)";

/// One line per forecast
pub fn forecast_line(result: &PipelineResult) -> String {
    let query = &result.match_query;
    let pairing = format!("{} vs {}", query.player1_name, query.player2_name);

    match (&result.prediction, result.stage) {
        (Some(prediction), PipelineStage::Predicted) => match &prediction.data {
            Some(output) => format!(
                "{}: {} ({:.1}%)",
                pairing,
                output.favourite(query),
                output.favourite_probability() * 100.0
            ),
            None => format!("{}: no prediction data", pairing),
        },
        _ => format!(
            "{}: {}",
            pairing,
            result.error.as_deref().unwrap_or("not forecast")
        ),
    }
}

pub fn print_tournaments(results: &[TournamentResult]) {
    if results.is_empty() {
        println!("{}", "No live tournaments.".yellow());
        return;
    }

    for tournament in results {
        println!(
            "{} {} {}",
            tournament.tournament_name.bold(),
            format!("[{}]", tournament.category).cyan(),
            tournament.surface.dimmed()
        );
        for line in match_lines(tournament) {
            println!("  {}", line);
        }
    }
}

/// Pending pairings of a tournament, or a note that there are none
pub fn match_lines(tournament: &TournamentResult) -> Vec<String> {
    if tournament.incomplete_matches.is_empty() {
        return vec![NO_PENDING_MATCHES.to_string()];
    }

    tournament
        .incomplete_matches
        .iter()
        .map(|game| format!("{} vs {}", game.player1, game.player2))
        .collect()
}

pub fn print_forecasts(results: &[PipelineResult]) {
    let succeeded = results.iter().filter(|r| r.is_success()).count();

    for result in results {
        let line = forecast_line(result);
        if result.is_success() {
            println!("{} {}", "✓".green(), line);
        } else {
            println!("{} {}", "✗".red(), line.red());
        }
    }

    println!(
        "{}",
        format!("{}/{} forecasts completed", succeeded, results.len()).bold()
    );
}
