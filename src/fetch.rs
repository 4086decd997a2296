use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::ScrapeError;

// -------------------------
// Allow-list
// -------------------------

/// Parse `raw` and make sure it points at the one host we scrape.
pub fn validate_source_url(raw: &str, allowed_host: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw).map_err(|_| ScrapeError::InvalidUrl)?;
    match url.host_str() {
        Some(host) if host == allowed_host => Ok(url),
        _ => Err(ScrapeError::HostNotAllowed {
            host: allowed_host.to_string(),
        }),
    }
}

// -------------------------
// Fetcher
// -------------------------

/// Single-shot page fetcher. No retry, no cache, no cookies.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    allowed_host: String,
}

impl PageFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(base_headers())
            .build()?;

        Ok(Self {
            client,
            allowed_host: config.allowed_host().to_string(),
        })
    }

    pub fn allowed_host(&self) -> &str {
        &self.allowed_host
    }

    /// Validate `raw` against the allow-list, then GET it once and return the body.
    pub async fn fetch(&self, raw: &str) -> Result<String, ScrapeError> {
        let url = validate_source_url(raw, &self.allowed_host)?;

        let rsp = self.client.get(url.as_str()).send().await?;
        let status = rsp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "upstream fetch failed");
            return Err(ScrapeError::UpstreamStatus(status.as_u16()));
        }

        let text = rsp.text().await?;
        debug!(%url, status = status.as_u16(), len = text.len(), "fetched page");
        Ok(text)
    }
}

fn base_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    h.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    h.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_unparseable_url() {
        let err = validate_source_url("::nope::", "csgoskins.gg").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl));
    }

    #[test]
    fn rejects_other_hosts_and_subdomains() {
        for raw in ["https://example.com/items/charm-x", "https://www.csgoskins.gg/items/charm-x"] {
            let err = validate_source_url(raw, "csgoskins.gg").unwrap_err();
            assert_eq!(err.to_string(), "Only csgoskins.gg is allowed.");
        }
    }

    #[test]
    fn accepts_allowed_host() {
        let url = validate_source_url("https://csgoskins.gg/tournaments/2025-blast-austin/charm", "csgoskins.gg")
            .unwrap();
        assert_eq!(url.path(), "/tournaments/2025-blast-austin/charm");
    }

    #[tokio::test]
    async fn returns_body_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/charm"))
            .and(header("user-agent", "Mozilla/5.0 (CharmScraper/1.0)"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&Config::for_origin(&server.uri()).unwrap()).unwrap();
        let body = fetcher.fetch(&format!("{}/charm", server.uri())).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_is_surfaced_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&Config::for_origin(&server.uri()).unwrap()).unwrap();
        let err = fetcher.fetch(&format!("{}/charm", server.uri())).await.unwrap_err();
        assert!(matches!(err, ScrapeError::UpstreamStatus(503)));
    }
}
