pub mod compare_client;
pub mod handlers;
pub mod models;
pub mod predict_client;
pub mod routes;

pub use compare_client::{CompareClient, CompareService};
pub use predict_client::{PredictClient, PredictService};
