pub mod pipeline;
pub mod report;
pub mod scrape;
pub mod server;

pub use pipeline::{forecast_all, MatchPipeline};
pub use scrape::{policy_for, OnFailure, ScrapeOrchestrator, Stage};
pub use server::ServerService;
