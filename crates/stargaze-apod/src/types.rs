//! APOD wire types.
//!
//! The APOD API and the static fallback dataset both speak the same record
//! shape, but delivery varies: a bulk request may answer with a single
//! object or an array, and rate-limit or bad-date responses come back as an
//! object carrying an `error` key. Every field is therefore optional at the
//! wire level; [`crate::normalize`] decides what counts as a usable record.

use serde::Deserialize;

/// One raw entry as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
    /// Only present when the API is asked for video thumbnails.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Present on API error envelopes; its presence marks the entry as
    /// absent data, never as a request-level failure.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}
