//! Three-tier retrieval: bulk range, sequential per-day, static fallback.
//!
//! Each tier runs only if the previous one produced zero usable records;
//! whichever tier first yields at least one record wins outright (no
//! cross-tier merging). Lower tiers absorb their own errors and degrade;
//! only a fallback-dataset failure is fatal to the whole request.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};

use stargaze_core::{MediaRecord, RetrievalResult, Source};

use crate::client::ApodClient;
use crate::error::RetrieveError;
use crate::normalize;

/// Resolves a date range to the best-available sequence of records.
///
/// Holds a request-generation counter so that a retrieval overtaken by a
/// newer one reports [`RetrieveError::Superseded`] instead of handing back
/// stale records.
pub struct Retriever {
    client: ApodClient,
    generation: AtomicU64,
}

impl Retriever {
    #[must_use]
    pub fn new(client: ApodClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    /// Retrieves records for `[start, end]` inclusive, using the local
    /// calendar date as "today" for the future-day skip.
    ///
    /// # Errors
    ///
    /// - [`RetrieveError::InvalidRange`] if `start > end`.
    /// - [`RetrieveError::Superseded`] if a newer retrieval started first.
    /// - [`RetrieveError::FallbackUnavailable`] /
    ///   [`RetrieveError::FallbackShape`] if every tier came up empty and
    ///   the fallback dataset itself is unreachable or malformed.
    pub async fn retrieve(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RetrievalResult, RetrieveError> {
        self.retrieve_at(start, end, Local::now().date_naive()).await
    }

    /// Like [`Retriever::retrieve`] but with an explicit `today`, so tests
    /// control the clock.
    ///
    /// # Errors
    ///
    /// See [`Retriever::retrieve`].
    pub async fn retrieve_at(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<RetrievalResult, RetrieveError> {
        if start > end {
            return Err(RetrieveError::InvalidRange { start, end });
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut records = self.bulk_tier(start, end).await;
        if records.is_empty() {
            tracing::warn!(%start, %end, "bulk request yielded no usable records, trying per-day requests");
            records = self.per_day_tier(start, end, today).await;
        }

        let result = if records.is_empty() {
            tracing::warn!(%start, %end, "primary API yielded no records, using fallback dataset");
            RetrievalResult {
                source: Source::Fallback,
                records: self.fallback_tier(start, end).await?,
            }
        } else {
            RetrievalResult {
                source: Source::Primary,
                records,
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(%start, %end, "discarding stale retrieval result");
            return Err(RetrieveError::Superseded);
        }
        Ok(result)
    }

    /// Tier 1: one request covering the whole range. A transport failure or
    /// an unusable body both demote to the next tier.
    async fn bulk_tier(&self, start: NaiveDate, end: NaiveDate) -> Vec<MediaRecord> {
        match self.client.fetch_range(start, end).await {
            Ok(payload) => dedupe_sorted(normalize::normalize_payload(&payload)),
            Err(e) => {
                tracing::warn!(%start, %end, error = %e, "bulk range request failed");
                Vec::new()
            }
        }
    }

    /// Tier 2: one request per calendar day, strictly sequential.
    ///
    /// Serialization is deliberate pacing against the API's rate limit; do
    /// not parallelize. Days after `today` are known-empty and are never
    /// requested. A failed day is a miss, not a request-level failure.
    async fn per_day_tier(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Vec<MediaRecord> {
        let mut collected = Vec::new();
        let mut day = start;
        while day <= end && day <= today {
            match self.client.fetch_day(day).await {
                Ok(payload) => collected.extend(normalize::normalize_payload(&payload)),
                Err(e) => tracing::debug!(%day, error = %e, "no record for day"),
            }
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
        dedupe_sorted(collected)
    }

    /// Tier 3: fetch the whole static dataset and filter it to the range.
    /// The only tier whose failure is terminal.
    async fn fallback_tier(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MediaRecord>, RetrieveError> {
        let payload = self
            .client
            .fetch_fallback_dataset()
            .await
            .map_err(RetrieveError::FallbackUnavailable)?;

        if !payload.is_array() {
            return Err(RetrieveError::FallbackShape(
                json_type_name(&payload).to_string(),
            ));
        }

        let in_range = normalize::normalize_payload(&payload)
            .into_iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect();
        Ok(dedupe_sorted(in_range))
    }
}

/// Collapses duplicate dates (last write wins) and returns the records
/// sorted ascending by date.
fn dedupe_sorted(records: Vec<MediaRecord>) -> Vec<MediaRecord> {
    let mut by_date: BTreeMap<NaiveDate, MediaRecord> = BTreeMap::new();
    for record in records {
        by_date.insert(record.date, record);
    }
    by_date.into_values().collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
