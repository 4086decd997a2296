use std::collections::HashMap;

use crate::types::ItemRecord;

/// One record per link, in first-seen order.
///
/// The first record for a link is kept unless it has no price and a later
/// one does; in that case the later record replaces it wholesale.
pub fn dedup_by_link(items: Vec<ItemRecord>) -> Vec<ItemRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<ItemRecord> = Vec::with_capacity(items.len());

    for item in items {
        match slots.get(&item.link) {
            Some(&idx) => {
                if out[idx].price.is_none() && item.price.is_some() {
                    out[idx] = item;
                }
            }
            None => {
                slots.insert(item.link.clone(), out.len());
                out.push(item);
            }
        }
    }
    out
}
