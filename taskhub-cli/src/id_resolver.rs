//! ID resolver module
//!
//! Resolves id prefixes to full ids by looking them up in the local cache.
//! This allows users to type a short, unambiguous prefix of an id they have
//! seen in a listing instead of the full 24-character id.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use taskhub_store::cache::{CacheRecord, EntityCache};

use crate::types::IdOrPrefix;

/// Resolve an id or prefix of a `kind` record against `table`
///
/// A full id is returned as is, even when it is not cached.
///
/// # Errors
/// Returns an error if:
/// - No cached record matches the prefix
/// - Multiple cached records match the prefix (ambiguous)
pub async fn resolve_id<T: CacheRecord>(
    table: Arc<dyn EntityCache<T>>,
    kind: &str,
    input: &str,
) -> Result<String> {
    let prefix = match IdOrPrefix::parse(input) {
        IdOrPrefix::Full(id) => return Ok(id),
        IdOrPrefix::Prefix(prefix) => prefix,
    };

    if prefix.is_empty() {
        return Err(anyhow!("Empty {} id", kind));
    }

    let matches = table.ids_with_prefix(&prefix).await?;

    // Exact match on an id shorter than the usual 24 characters
    if matches.iter().any(|id| *id == prefix) {
        return Ok(prefix);
    }

    match matches.len() {
        0 => Err(anyhow!(
            "No cached {} found with ID starting with '{}' (list them first or pass the full id)",
            kind,
            prefix
        )),
        1 => Ok(matches[0].clone()),
        _ => Err(anyhow!(
            "Ambiguous prefix '{}' matches multiple {}s: {}",
            prefix,
            kind,
            matches.join(", ")
        )),
    }
}
