use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{ResourceList, ScrapeRequest, ScrapeResponse};
use crate::resources::TELECOM_RESOURCES;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/scrape", post(scrape_handler))
        .route("/telecom_resources", get(telecom_resources_handler));

    Router::new()
        .nest("/api", api.clone())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn scrape_handler(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>> {
    info!(url = %req.url, "Processing scrape request");
    let start_time = std::time::Instant::now();

    let result = process_scrape_request(&state, &req).await;

    match &result {
        Ok(response) => info!(
            url = %req.url,
            chars = response.content.len(),
            elapsed = ?start_time.elapsed(),
            "Scrape succeeded"
        ),
        Err(err @ AppError::Internal(_)) => warn!(url = %req.url, error = %err, "Scrape failed unexpectedly"),
        Err(err) => info!(url = %req.url, error = %err, "Scrape produced no content"),
    }

    result.map(Json)
}

// Expected misses become 400/404 and are returned as-is; only errors raised
// by the scraper itself are wrapped as internal errors.
async fn process_scrape_request(state: &AppState, req: &ScrapeRequest) -> Result<ScrapeResponse> {
    let html = state
        .scraper
        .fetch(&req.url)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::Download("Could not download the URL content".to_string()))?;

    let content = state
        .scraper
        .extract(html, &req.url)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::Extraction("Could not extract content from the URL".to_string()))?;

    Ok(ScrapeResponse {
        content,
        status: "success".to_string(),
        url: req.url.clone(),
    })
}

fn internal(err: anyhow::Error) -> AppError {
    AppError::Internal(format!("Error scraping content: {:#}", err))
}

async fn telecom_resources_handler() -> Json<ResourceList> {
    Json(ResourceList {
        resources: &TELECOM_RESOURCES,
    })
}
