//! Decoding persisted collections.

use std::collections::HashSet;

use serde_json::Value;

use super::CollectionKind;

/// Entries recovered from a stored payload.
#[derive(Debug)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    /// Entries that failed the schema check or repeated an earlier id.
    pub dropped: usize,
}

/// Decode a stored JSON array, dropping malformed or duplicate entries.
///
/// Returns `Err` only when the payload as a whole is not a JSON array; the
/// caller treats that as corruption.
pub fn decode<K: CollectionKind>(raw: &str) -> Result<Decoded<K::Item>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Decoded {
            items: Vec::new(),
            dropped: 0,
        });
    }

    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let total = entries.len();

    let mut seen = HashSet::new();
    let items: Vec<K::Item> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<K::Item>(entry) {
            Ok(item) if K::is_valid(&item) => Some(item),
            Ok(_) => {
                tracing::debug!(collection = K::NAME, "dropping entry failing schema check");
                None
            }
            Err(e) => {
                tracing::debug!(collection = K::NAME, error = %e, "dropping malformed entry");
                None
            }
        })
        .filter(|item| seen.insert(K::id(item).clone()))
        .collect();

    Ok(Decoded {
        dropped: total - items.len(),
        items,
    })
}
