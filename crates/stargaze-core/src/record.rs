//! Domain types for daily astronomy media records.
//!
//! One [`MediaRecord`] represents the item published for a single calendar
//! date. Records arrive from three differently shaped sources (bulk API
//! response, per-day API response, static fallback dataset) and are
//! normalized into this one shape before any other code sees them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of media attached to a day's record.
///
/// Unknown wire values deserialize as [`MediaType::Other`] rather than
/// failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

impl MediaType {
    /// Maps a wire `media_type` string to the enum. Missing or unrecognized
    /// values become [`MediaType::Other`].
    #[must_use]
    pub fn from_wire(s: Option<&str>) -> Self {
        match s {
            Some("image") => MediaType::Image,
            Some("video") => MediaType::Video,
            _ => MediaType::Other,
        }
    }
}

/// A single day's published media item, normalized from any source.
///
/// `date` is the unique key: within one retrieval result at most one record
/// exists per date. All other fields are optional because the wire shapes
/// disagree on what they carry (e.g. `hdurl` is absent for videos,
/// `thumbnail_url` only appears when the API is asked for it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub date: NaiveDate,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub media_type: MediaType,
    pub url: Option<String>,
    pub hd_url: Option<String>,
    /// Embeddable player URL; set for video records.
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Which tier produced a retrieval result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Live API (bulk or per-day tier).
    Primary,
    /// Static fallback dataset.
    Fallback,
}

/// The outcome of one retrieval: provenance plus records sorted ascending
/// by date.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub source: Source,
    pub records: Vec<MediaRecord>,
}
