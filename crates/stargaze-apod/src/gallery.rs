//! Shaping a retrieval result into renderable card slots.
//!
//! Two modes: exact-match (one slot per returned record) and fixed-window
//! (always [`WINDOW_DAYS`] consecutive slots, empty ones standing in for
//! dates with no record).

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use stargaze_core::{MediaRecord, RetrievalResult};

/// Width of the fixed window, in calendar days.
pub const WINDOW_DAYS: u64 = 9;

/// One renderable slot: a date, and the record for it if any.
#[derive(Debug, Clone)]
pub struct GallerySlot {
    pub date: NaiveDate,
    pub record: Option<MediaRecord>,
}

/// Exact-match mode: one slot per record, in the result's sorted order.
/// No placeholders are produced for missing days.
#[must_use]
pub fn exact_cards(result: &RetrievalResult) -> Vec<GallerySlot> {
    result
        .records
        .iter()
        .map(|r| GallerySlot {
            date: r.date,
            record: Some(r.clone()),
        })
        .collect()
}

/// Fixed-window mode: exactly [`WINDOW_DAYS`] slots for `start`,
/// `start+1`, …, looked up by exact date match. Dates absent from the
/// result get an empty slot.
#[must_use]
pub fn fixed_window(result: &RetrievalResult, start: NaiveDate) -> Vec<GallerySlot> {
    let by_date: BTreeMap<NaiveDate, &MediaRecord> =
        result.records.iter().map(|r| (r.date, r)).collect();

    (0..WINDOW_DAYS)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| GallerySlot {
            date,
            record: by_date.get(&date).map(|r| (*r).clone()),
        })
        .collect()
}
