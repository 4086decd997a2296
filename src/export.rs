use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::types::ItemRecord;

pub const CSV_HEADERS: [&str; 8] = [
    "Title",
    "URL",
    "Price",
    "PriceText",
    "Rarity",
    "Popularity",
    "Rating",
    "Image",
];

pub const CSV_FILENAME: &str = "charms.csv";

/// Serialize records to CSV. Fields holding a comma, quote or newline are
/// quoted with inner quotes doubled; everything else is written bare.
pub fn to_csv<'a, I>(items: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ItemRecord>,
{
    let mut w = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    w.write_record(CSV_HEADERS)?;
    for it in items {
        w.write_record(row(it))?;
    }

    let bytes = w
        .into_inner()
        .map_err(|e| anyhow!("flush csv buffer: {}", e.error()))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

fn row(it: &ItemRecord) -> [String; 8] {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        opt(&it.title),
        it.link.clone(),
        it.price.map(|p| p.to_string()).unwrap_or_default(),
        opt(&it.price_text),
        opt(&it.rarity),
        opt(&it.popularity),
        opt(&it.rating),
        opt(&it.image),
    ]
}
