//! Normalization of wire payloads into domain [`MediaRecord`]s.
//!
//! All three sources (bulk response, per-day response, fallback dataset)
//! funnel through [`normalize_payload`], so downstream code never branches
//! on source shape. Entries that carry an `error` key or lack a parseable
//! date are dropped, not treated as fatal.

use chrono::NaiveDate;

use stargaze_core::{MediaRecord, MediaType};

use crate::types::ApodEntry;

/// Parses a `"YYYY-MM-DD"` date string into a [`NaiveDate`].
///
/// Returns `None` if the string does not match the expected format.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Converts one wire entry into a [`MediaRecord`].
///
/// Returns `None` for entries that are not usable data: error envelopes and
/// entries with a missing or unparseable `date`.
#[must_use]
pub fn normalize_entry(entry: &ApodEntry) -> Option<MediaRecord> {
    if entry.error.is_some() {
        return None;
    }
    let date = parse_date(entry.date.as_deref()?)?;
    let media_type = MediaType::from_wire(entry.media_type.as_deref());
    // For videos the `url` field holds the embeddable player link.
    let embed_url = match media_type {
        MediaType::Video => entry.url.clone(),
        MediaType::Image | MediaType::Other => None,
    };

    Some(MediaRecord {
        date,
        title: entry.title.clone(),
        explanation: entry.explanation.clone(),
        media_type,
        url: entry.url.clone(),
        hd_url: entry.hdurl.clone(),
        embed_url,
        thumbnail_url: entry.thumbnail_url.clone(),
    })
}

/// Normalizes a raw JSON payload into records.
///
/// Accepts the three shapes the sources produce: a single object (treated
/// as a one-element sequence), an array of objects (entries that fail to
/// deserialize are skipped individually), or anything else (yields no
/// records). Never fails.
#[must_use]
pub fn normalize_payload(payload: &serde_json::Value) -> Vec<MediaRecord> {
    match payload {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| serde_json::from_value::<ApodEntry>(v.clone()).ok())
            .filter_map(|e| normalize_entry(&e))
            .collect(),
        serde_json::Value::Object(_) => serde_json::from_value::<ApodEntry>(payload.clone())
            .ok()
            .and_then(|e| normalize_entry(&e))
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}
