use std::cmp::Ordering;

use crate::types::{ExportReq, ItemRecord, SortDir, SortKey};

/// Filter/sort state of one dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
}

impl ViewState {
    /// Items whose title contains the query (case-insensitive), sorted.
    /// Missing prices sort below every real price; ties keep input order.
    pub fn apply<'a>(&self, items: &'a [ItemRecord]) -> Vec<&'a ItemRecord> {
        let q = self.query.trim().to_lowercase();
        let mut view: Vec<&ItemRecord> = items
            .iter()
            .filter(|it| q.is_empty() || title_of(it).to_lowercase().contains(&q))
            .collect();

        view.sort_by(|a, b| {
            let ord = match self.sort_key {
                SortKey::Price => price_of(a).total_cmp(&price_of(b)),
                SortKey::Title => compare_titles(title_of(a), title_of(b)),
            };
            match self.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
        view
    }
}

impl From<&ExportReq> for ViewState {
    fn from(req: &ExportReq) -> Self {
        Self {
            query: req.query.clone(),
            sort_key: req.sort_key,
            sort_dir: req.sort_dir,
        }
    }
}

fn title_of(it: &ItemRecord) -> &str {
    it.title.as_deref().unwrap_or_default()
}

fn price_of(it: &ItemRecord) -> f64 {
    it.price.unwrap_or(f64::NEG_INFINITY)
}

// Lower-cased, then code point order (UTF-8 byte order). No locale collation.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
