use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use telecom_scraper::{
    api::create_router,
    scraper::{extract_main_text, PageScraper},
    AppState,
};

enum Fetch {
    Page(&'static str),
    Unreachable,
    Fails(&'static str),
}

enum Extract {
    Real,
    Nothing,
    Fails(&'static str),
}

struct StubScraper {
    fetch: Fetch,
    extract: Extract,
}

#[async_trait]
impl PageScraper for StubScraper {
    async fn fetch(&self, _url: &str) -> anyhow::Result<Option<String>> {
        match self.fetch {
            Fetch::Page(html) => Ok(Some(html.to_string())),
            Fetch::Unreachable => Ok(None),
            Fetch::Fails(msg) => Err(anyhow::anyhow!(msg)),
        }
    }

    async fn extract(&self, html: String, _url: &str) -> anyhow::Result<Option<String>> {
        match self.extract {
            Extract::Real => Ok(extract_main_text(&html)),
            Extract::Nothing => Ok(None),
            Extract::Fails(msg) => Err(anyhow::anyhow!(msg)),
        }
    }
}

fn app(fetch: Fetch, extract: Extract) -> Router {
    create_router(AppState {
        scraper: Arc::new(StubScraper { fetch, extract }),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn scrape_request(path: &str, url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap()
}

const PAGE: &str = "<html><body><nav>Home</nav><article><p>SMS-SUBMIT carries the TP-MR.</p></article></body></html>";

#[tokio::test]
async fn scrape_success_echoes_url() {
    let url = "https://example.com/sms?x=1";
    let (status, body) = send(app(Fetch::Page(PAGE), Extract::Real), scrape_request("/scrape", url)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "content": "SMS-SUBMIT carries the TP-MR.",
            "status": "success",
            "url": url,
        })
    );
}

#[tokio::test]
async fn scrape_is_also_served_under_api_prefix() {
    let (status, body) = send(
        app(Fetch::Page(PAGE), Extract::Real),
        scrape_request("/api/scrape", "https://example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn unreachable_url_is_a_client_error() {
    let (status, body) = send(
        app(Fetch::Unreachable, Extract::Real),
        scrape_request("/scrape", "https://unreachable.invalid"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Could not download the URL content" }));
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn nothing_extracted_is_not_found() {
    let (status, body) = send(
        app(Fetch::Page("<html><body><script>x()</script></body></html>"), Extract::Real),
        scrape_request("/scrape", "https://example.com/blank"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Could not extract content from the URL");
}

#[tokio::test]
async fn extractor_miss_is_not_found() {
    let (status, _) = send(
        app(Fetch::Page(PAGE), Extract::Nothing),
        scrape_request("/scrape", "https://example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetch_failure_is_internal_with_message() {
    let (status, body) = send(
        app(Fetch::Fails("socket exploded"), Extract::Real),
        scrape_request("/scrape", "https://example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Error scraping content: socket exploded");
}

#[tokio::test]
async fn extract_failure_is_internal_with_message() {
    let (status, body) = send(
        app(Fetch::Page(PAGE), Extract::Fails("parser panicked")),
        scrape_request("/scrape", "https://example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("parser panicked"));
}

#[tokio::test]
async fn missing_url_is_rejected_before_scraping() {
    let request = Request::builder()
        .method("POST")
        .uri("/scrape")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = send(app(Fetch::Fails("must not run"), Extract::Real), request).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn telecom_resources_lists_three_entries() {
    for path in ["/telecom_resources", "/api/telecom_resources"] {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let (status, body) = send(app(Fetch::Unreachable, Extract::Nothing), request).await;

        assert_eq!(status, StatusCode::OK);
        let resources = body["resources"].as_array().unwrap();
        assert_eq!(resources.len(), 3);
        for resource in resources {
            for field in ["name", "url", "description"] {
                assert!(!resource[field].as_str().unwrap().is_empty());
            }
        }
        assert_eq!(resources[0]["name"], "3GPP Specifications");
    }
}
