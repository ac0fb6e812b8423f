pub mod settings;
pub mod vocabulary;

pub use settings::{AppConfig, BrowserSettings, ServiceSettings};
pub use vocabulary::{category_for_badge, surface_code, tourney_type_code};
