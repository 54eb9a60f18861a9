use serde::{Deserialize, Serialize};

use crate::resources::Resource;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScrapeResponse {
    pub content: String,
    pub status: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceList {
    pub resources: &'static [Resource],
}
