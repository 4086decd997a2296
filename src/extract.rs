//! Listing extraction for csgoskins charm pages.
//!
//! Extraction is an ordered list of strategies. Each one is a pure function
//! from a parsed document to candidate records; the first strategy that
//! returns anything wins. Card markup changes often, so keep selectors here
//! and add a fixture test whenever one moves.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::config::{FALLBACK_KEYWORD, ITEM_PATH_MARKER};
use crate::steam::steam_market_url;
use crate::types::ItemRecord;

// -------------------------
// Selectors / patterns
// -------------------------

static ITEM_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href*='/items/charm-']").expect("item link selector"));
static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3, h2, .title, [class*='title']").expect("title selector"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("image selector"));
static RARITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".rarity, [class*='rarity']").expect("rarity selector"));
static POPULARITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".popularity, [class*='popularity']").expect("popularity selector"));
static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".rating, [class*='rating']").expect("rating selector"));

/// Dollar amount, optional cents. Group 1 is the bare number.
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("price regex"));
static ITEM_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", regex::escape(ITEM_PATH_MARKER))).expect("href regex"));

/// Card containers, searched upward from the anchor. Nearest match wins.
const CARD_TAGS: &[&str] = &["article", "div", "li", "section"];

// -------------------------
// Strategies
// -------------------------

pub type Strategy = fn(&Html, &Url) -> Vec<ItemRecord>;

/// Tried in order until one yields records.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("cards", card_strategy as Strategy),
    ("keyword", keyword_strategy as Strategy),
];

/// Parse `html` and extract raw (not yet deduplicated) records.
/// Relative links are rebased onto `origin`.
pub fn extract_items(html: &str, origin: &Url) -> Vec<ItemRecord> {
    let doc = Html::parse_document(html);
    extract_from_document(&doc, origin)
}

pub fn extract_from_document(doc: &Html, origin: &Url) -> Vec<ItemRecord> {
    for (name, strategy) in STRATEGIES {
        let items = strategy(doc, origin);
        if !items.is_empty() {
            debug!(strategy = name, count = items.len(), "extraction strategy matched");
            return items;
        }
        debug!(strategy = name, "extraction strategy found nothing");
    }
    Vec::new()
}

/// Every charm detail link, read together with its enclosing card.
pub fn card_strategy(doc: &Html, origin: &Url) -> Vec<ItemRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();

    for a in doc.select(&ITEM_LINK) {
        let Some(href) = a.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };
        if seen.contains(href) {
            continue;
        }

        if let Some(item) = parse_card(a, enclosing_card(a), href, origin) {
            seen.insert(href);
            items.push(item);
        }
    }
    items
}

/// Anchors whose text mentions the keyword and whose href looks like a
/// charm page. Title and link only.
pub fn keyword_strategy(doc: &Html, origin: &Url) -> Vec<ItemRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();

    for a in doc.select(&ANY_LINK) {
        let text = a.text().collect::<String>();
        if !text.contains(FALLBACK_KEYWORD) {
            continue;
        }
        let Some(href) = a.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };
        if seen.contains(href) || !ITEM_HREF.is_match(href) {
            continue;
        }

        let link = absolutize(href, origin);
        let external = steam_market_url(&link);
        items.push(ItemRecord::minimal(clean_text(&text), link, external));
        seen.insert(href);
    }
    items
}

// -------------------------
// Card parsing
// -------------------------

type Lookup<'a> = &'a dyn Fn() -> Option<String>;

/// First lookup that produces a non-empty string. Lookups run lazily, in order.
fn first_non_empty(lookups: &[Lookup<'_>]) -> Option<String> {
    lookups.iter().find_map(|lookup| lookup().filter(|s| !s.is_empty()))
}

fn parse_card(a: ElementRef<'_>, card: Option<ElementRef<'_>>, href: &str, origin: &Url) -> Option<ItemRecord> {
    let title_lookups: [Lookup<'_>; 3] = [
        &|| card.and_then(|c| c.select(&TITLE).next()).map(collapsed_text),
        &|| a.value().attr("title").map(clean_text),
        &|| Some(collapsed_text(a)),
    ];
    let title = first_non_empty(&title_lookups).unwrap_or_default();

    let image = card.and_then(|c| c.select(&IMAGE).next()).and_then(|img| {
        let image_lookups: [Lookup<'_>; 2] = [
            &|| img.value().attr("src").map(str::to_string),
            &|| img.value().attr("data-src").map(str::to_string),
        ];
        first_non_empty(&image_lookups)
    });

    let blob = card.map(collapsed_text).unwrap_or_default();
    let (price_text, price) = find_price(&blob).unwrap_or_default();

    // Price-only cards put the amount where the title should be.
    if title == price_text {
        return None;
    }

    let link = absolutize(href, origin);
    let external_market_link = steam_market_url(&link);

    Some(ItemRecord {
        title: Some(title).filter(|t| !t.is_empty()),
        link,
        image,
        price,
        price_text: Some(price_text).filter(|p| !p.is_empty()),
        rarity: descriptor(card, &RARITY),
        popularity: descriptor(card, &POPULARITY),
        rating: descriptor(card, &RATING),
        external_market_link,
    })
}

fn enclosing_card(a: ElementRef<'_>) -> Option<ElementRef<'_>> {
    std::iter::successors(a.parent(), |node| node.parent())
        .filter_map(ElementRef::wrap)
        .find(|el| CARD_TAGS.contains(&el.value().name()))
}

fn descriptor(card: Option<ElementRef<'_>>, sel: &Selector) -> Option<String> {
    let lookup: Lookup<'_> = &|| card.and_then(|c| c.select(sel).next()).map(collapsed_text);
    first_non_empty(&[lookup])
}

// -------------------------
// Text helpers
// -------------------------

/// Collapse whitespace runs to single spaces and trim.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapsed_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

/// First dollar amount in `text`: the matched substring and its parsed value.
pub fn find_price(text: &str) -> Option<(String, Option<f64>)> {
    let caps = PRICE.captures(text)?;
    let matched = caps.get(0)?.as_str().to_string();
    let amount = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
    Some((matched, amount))
}

/// Absolute hrefs pass through untouched; everything else is joined onto `origin`.
pub fn absolutize(href: &str, origin: &Url) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    origin
        .join(href)
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", origin.as_str().trim_end_matches('/'), href))
}
