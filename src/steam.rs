//! Guess the Steam Community Market listing for a csgoskins item url.
//!
//! Pure string work on the slug, no network. The guess is unverified: the
//! market name is rebuilt from the slug, so players with odd casing
//! (e.g. `FalleN`) only come out right when the slug already carries it.

use url::Url;

use crate::config::{CATEGORY_LABEL, SLUG_PREFIX, STEAM_LISTING_BASE};

/// `https://csgoskins.gg/items/charm-s1mple` ->
/// `https://steamcommunity.com/market/listings/730/Souvenir%20Charm%20%7C%20S1mple`
pub fn steam_market_url(source_url: &str) -> Option<String> {
    let name = market_name(source_url)?;
    Some(format!("{}{}", STEAM_LISTING_BASE, urlencoding::encode(&name)))
}

/// Human readable market name, e.g. `Souvenir Charm | S1mple`.
pub fn market_name(source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    let slug = url.path_segments()?.last().unwrap_or_default();
    let raw = slug.strip_prefix(SLUG_PREFIX)?;

    let title = raw.split('-').map(capitalize_first).collect::<Vec<_>>().join(" ");
    Some(format!("{CATEGORY_LABEL} | {title}"))
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
