use tracing::info;
use url::Url;

use crate::dedup::dedup_by_link;
use crate::error::ScrapeError;
use crate::extract::extract_items;
use crate::fetch::PageFetcher;
use crate::steam::steam_market_url;
use crate::types::ScrapeResult;

/// Fetch one listing page and turn it into deduplicated records.
///
/// The Steam guess for `raw_url` is computed before anything else so it
/// does not depend on the page being reachable.
pub async fn scrape_page(fetcher: &PageFetcher, origin: &Url, raw_url: &str) -> Result<ScrapeResult, ScrapeError> {
    let external = steam_market_url(raw_url);

    let html = fetcher.fetch(raw_url).await?;
    let raw = extract_items(&html, origin);
    let raw_count = raw.len();
    let items = dedup_by_link(raw);

    info!(url = raw_url, raw = raw_count, kept = items.len(), "scraped page");
    Ok(ScrapeResult::new(external, items))
}
