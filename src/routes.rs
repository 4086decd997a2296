use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::dashboard::DASHBOARD_HTML;
use crate::error::ScrapeError;
use crate::export::{CSV_FILENAME, to_csv};
use crate::fetch::PageFetcher;
use crate::scrape::scrape_page;
use crate::types::ExportReq;
use crate::view::ViewState;

/// Shared, read-only per-process state. Nothing here changes after startup.
pub struct AppState {
    pub config: Config,
    pub fetcher: PageFetcher,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(healthz)
        .service(scrape_endpoint)
        .service(export_endpoint)
        .service(dashboard);
}

// -------------------------
// HTTP Handlers
// -------------------------

#[get("/")]
async fn index(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "charmscrape online.\n\
         JSON:\n  POST /api/scrape {{\"url\":\"{}?order=highest_price\"}}\n\
         CSV:\n  POST /api/export {{\"items\":[...],\"query\":\"\",\"sortKey\":\"price\",\"sortDir\":\"desc\"}}\n\
         UI:\n  GET  /dashboard\n\
         Allowed host: {}",
        crate::config::DEFAULT_SEARCH_PAGE,
        state.config.allowed_host(),
    ))
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[post("/api/scrape")]
async fn scrape_endpoint(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ScrapeError> {
    let url = requested_url(&body)?;
    let result = scrape_page(&state.fetcher, &state.config.origin, &url)
        .await
        .inspect_err(|e| warn!(%url, error = %e, "scrape failed"))?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/export")]
async fn export_endpoint(body: web::Json<ExportReq>) -> Result<HttpResponse, ScrapeError> {
    let view = ViewState::from(&*body);
    let out = to_csv(view.apply(&body.items)).map_err(|e| ScrapeError::Internal(format!("{e:#}")))?;

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((CONTENT_DISPOSITION, format!("attachment; filename=\"{CSV_FILENAME}\"")))
        .body(out))
}

#[get("/dashboard")]
async fn dashboard() -> impl Responder {
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(DASHBOARD_HTML)
}

/// Pull a non-empty string `url` out of the request body.
/// Bodies that are not JSON at all are an internal error, not a missing url.
fn requested_url(body: &[u8]) -> Result<String, ScrapeError> {
    let v: Value = serde_json::from_slice(body)?;
    v.get("url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ScrapeError::MissingUrl)
}
