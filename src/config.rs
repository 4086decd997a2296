use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use std::env;
use url::Url;

// -------------------------
// Site constants
// -------------------------

/// Path fragment every charm detail page carries.
pub const ITEM_PATH_MARKER: &str = "/items/charm-";

/// Slug prefix the translator strips before building a market name.
pub const SLUG_PREFIX: &str = "charm-";

/// Visible anchor text the keyword fallback looks for.
pub const FALLBACK_KEYWORD: &str = "Charm";

pub const CATEGORY_LABEL: &str = "Souvenir Charm";

pub const STEAM_LISTING_BASE: &str = "https://steamcommunity.com/market/listings/730/";

pub const DEFAULT_ORIGIN: &str = "https://csgoskins.gg";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (CharmScraper/1.0)";

/// Tournament charm page the dashboard searches by player name.
pub const DEFAULT_SEARCH_PAGE: &str = "https://csgoskins.gg/tournaments/2025-blast-austin/charm";

// -------------------------
// Runtime config
// -------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Source site origin. Its host is the only one the fetcher will talk to.
    pub origin: Url,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let origin = env::var("CHARMSCRAPE_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());

        Ok(Self {
            bind: env::var("CHARMSCRAPE_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            origin: parse_origin(&origin)?,
            user_agent: env::var("CHARMSCRAPE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Config pointed at an arbitrary origin, everything else default.
    pub fn for_origin(origin: &str) -> Result<Self> {
        Ok(Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            origin: parse_origin(origin)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn allowed_host(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn parse_origin(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid origin url: {raw}"))?;
    if url.host_str().is_none() {
        return Err(anyhow!("origin url has no host: {raw}"));
    }
    Ok(url)
}
