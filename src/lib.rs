pub mod api;
pub mod config;
pub mod error;
pub mod resources;
pub mod scraper;

use std::sync::Arc;
use crate::scraper::PageScraper;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<dyn PageScraper>,
}
