mod common;

use atp_forecast::domain::{Category, Match, SURFACE_UNAVAILABLE};
use atp_forecast::errors::ScrapeError;
use atp_forecast::services::ScrapeOrchestrator;
use common::{browser_settings, empty_landing_page, FakeSessions, LANDING_URL, RG_DRAW, RG_OVERVIEW};
use std::sync::atomic::Ordering;

fn orchestrator() -> ScrapeOrchestrator {
    ScrapeOrchestrator::new(browser_settings()).unwrap()
}

#[test]
fn test_full_scrape_assembles_every_tournament() {
    let sessions = FakeSessions::live_site();

    let results = orchestrator().run(&sessions).unwrap();

    assert_eq!(results.len(), 2);

    let rg = &results[0];
    assert_eq!(rg.tournament_name, "Roland Garros");
    assert_eq!(rg.category, Category::GrandSlam);
    assert_eq!(rg.surface, "Clay");
    assert_eq!(rg.incomplete_matches, vec![Match::new("Novak Djokovic", "Daniil Medvedev")]);

    let halle = &results[1];
    assert_eq!(halle.category, Category::Atp500);
    assert_eq!(halle.surface, SURFACE_UNAVAILABLE);
    assert!(halle.incomplete_matches.is_empty());
}

#[test]
fn test_one_session_for_the_whole_run() {
    let sessions = FakeSessions::live_site();

    orchestrator().run(&sessions).unwrap();

    assert_eq!(sessions.recorder.opened.load(Ordering::SeqCst), 1);
    assert_eq!(sessions.recorder.closed(), 1);
    assert_eq!(sessions.recorder.consent_clicks.load(Ordering::SeqCst), 1);

    let visited = sessions.recorder.visited();
    assert_eq!(
        &visited[..3],
        &[LANDING_URL.to_string(), RG_OVERVIEW.to_string(), RG_DRAW.to_string()]
    );
    assert_eq!(visited.len(), 5);
}

#[test]
fn test_landing_timeout_aborts_and_closes_session() {
    let challenge = "<html><body>Just a moment...</body></html>".to_string();
    let sessions = FakeSessions::new(&[(LANDING_URL, challenge)]);

    let err = orchestrator().run(&sessions).unwrap_err();

    assert_eq!(
        err,
        ScrapeError::PageLoadTimeout {
            url: LANDING_URL.to_string(),
            marker: ".tournament--expanded".to_string(),
        }
    );
    assert_eq!(sessions.recorder.closed(), 1);
    assert_eq!(sessions.recorder.visited(), vec![LANDING_URL.to_string()]);
}

#[test]
fn test_landing_without_blocks_fails_on_marker() {
    let sessions = FakeSessions::new(&[(LANDING_URL, empty_landing_page())]);

    let result = orchestrator().run(&sessions);

    assert!(matches!(result, Err(ScrapeError::PageLoadTimeout { .. })));
    assert_eq!(sessions.recorder.closed(), 1);
}

#[test]
fn test_nothing_live_is_an_empty_result() {
    // Marker present, but not on a tournament block
    let markup =
        r#"<html><body><section><span class="tournament--expanded"></span></section></body></html>"#;
    let sessions = FakeSessions::new(&[(LANDING_URL, markup.to_string())]);

    let results = orchestrator().run(&sessions).unwrap();

    assert!(results.is_empty());
    assert_eq!(sessions.recorder.closed(), 1);
    assert_eq!(sessions.recorder.visited().len(), 1);
}

#[test]
fn test_missing_consent_banner_does_not_stop_the_run() {
    let landing = common::landing_page().replace("onetrust-accept-btn-handler", "something-else");
    let sessions = FakeSessions::new(&[
        (LANDING_URL, landing),
        (RG_OVERVIEW, common::overview_page("Clay")),
        (RG_DRAW, common::draw_page()),
    ]);

    let results = orchestrator().run(&sessions).unwrap();

    assert_eq!(sessions.recorder.consent_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(results[0].surface, "Clay");
}

#[test]
fn test_failed_consent_click_does_not_stop_the_run() {
    let sessions = FakeSessions::live_site().with_broken_clicks();

    let results = orchestrator().run(&sessions).unwrap();

    assert_eq!(sessions.recorder.consent_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].surface, "Clay");
    assert_eq!(
        results[0].incomplete_matches,
        vec![Match::new("Novak Djokovic", "Daniil Medvedev")]
    );
    assert_eq!(sessions.recorder.closed(), 1);
}
