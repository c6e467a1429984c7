//! APOD API client and tiered retrieval.
//!
//! [`ApodClient`] wraps the raw HTTP surface (bulk range, per-day, and
//! fallback-dataset requests). [`Retriever`] layers the three-tier fallback
//! strategy on top and hands back normalized, date-sorted
//! [`stargaze_core::RetrievalResult`]s. The [`gallery`] module shapes a
//! result into renderable card slots.

mod client;
mod error;
pub mod gallery;
mod normalize;
mod retriever;
mod types;

pub use client::ApodClient;
pub use error::{ApodError, RetrieveError};
pub use normalize::{normalize_entry, normalize_payload, parse_date};
pub use retriever::Retriever;
pub use types::ApodEntry;
