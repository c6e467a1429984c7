//! HTTP client for the APOD API and the static fallback dataset.
//!
//! Wraps `reqwest` with API-key management and raw-JSON fetching. The
//! client deliberately returns `serde_json::Value`s: the wire shape varies
//! per endpoint (object vs array), and [`crate::normalize`] owns that
//! decision.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use stargaze_core::AppConfig;

use crate::error::ApodError;

/// Client for the APOD REST API plus its fallback dataset.
///
/// Use [`ApodClient::from_config`] for production or [`ApodClient::with_urls`]
/// to point at a mock server in tests.
pub struct ApodClient {
    client: Client,
    api_key: String,
    api_url: Url,
    fallback_url: Url,
}

impl ApodClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApodError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApodError::InvalidUrl`] if a configured
    /// endpoint does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApodError> {
        Self::build(
            &config.api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_url,
            &config.fallback_url,
        )
    }

    /// Creates a client with explicit endpoint URLs (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApodClient::from_config`].
    pub fn with_urls(
        api_key: &str,
        timeout_secs: u64,
        api_url: &str,
        fallback_url: &str,
    ) -> Result<Self, ApodError> {
        Self::build(
            api_key,
            timeout_secs,
            "stargaze/0.1 (apod-gallery)",
            api_url,
            fallback_url,
        )
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_url: &str,
        fallback_url: &str,
    ) -> Result<Self, ApodError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let api_url =
            Url::parse(api_url).map_err(|_| ApodError::InvalidUrl(api_url.to_string()))?;
        let fallback_url = Url::parse(fallback_url)
            .map_err(|_| ApodError::InvalidUrl(fallback_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_url,
            fallback_url,
        })
    }

    /// Issues the bulk range request: `?api_key=…&start_date=…&end_date=…`.
    ///
    /// # Errors
    ///
    /// [`ApodError::Http`] on network failure or non-2xx status;
    /// [`ApodError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<serde_json::Value, ApodError> {
        let url = self.build_url(&[
            ("start_date", &start.to_string()),
            ("end_date", &end.to_string()),
        ]);
        self.request_json(&url).await
    }

    /// Issues a single-day request: `?api_key=…&date=…`.
    ///
    /// # Errors
    ///
    /// [`ApodError::Http`] on network failure or non-2xx status;
    /// [`ApodError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<serde_json::Value, ApodError> {
        let url = self.build_url(&[("date", &date.to_string())]);
        self.request_json(&url).await
    }

    /// Fetches the entire static fallback dataset.
    ///
    /// No API key is sent; the dataset is a public static resource.
    ///
    /// # Errors
    ///
    /// [`ApodError::Http`] on network failure or non-2xx status;
    /// [`ApodError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_fallback_dataset(&self) -> Result<serde_json::Value, ApodError> {
        let url = self.fallback_url.clone();
        self.request_json(&url).await
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, always including `api_key`.
    fn build_url(&self, extra: &[(&str, &str)]) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ApodError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApodError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(api_url: &str) -> ApodClient {
        ApodClient::with_urls("test-key", 30, api_url, "https://example.com/data.json")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_includes_api_key_and_range() {
        let client = test_client("https://api.nasa.gov/planetary/apod");
        let url = client.build_url(&[("start_date", "2024-01-01"), ("end_date", "2024-01-09")]);
        assert_eq!(
            url.as_str(),
            "https://api.nasa.gov/planetary/apod?api_key=test-key&start_date=2024-01-01&end_date=2024-01-09"
        );
    }

    #[test]
    fn build_url_single_day_form() {
        let client = test_client("https://api.nasa.gov/planetary/apod");
        let url = client.build_url(&[("date", "2024-01-01")]);
        assert_eq!(
            url.as_str(),
            "https://api.nasa.gov/planetary/apod?api_key=test-key&date=2024-01-01"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = ApodClient::with_urls(
            "key with spaces",
            30,
            "https://api.nasa.gov/planetary/apod",
            "https://example.com/data.json",
        )
        .unwrap();
        let url = client.build_url(&[]);
        assert!(
            url.as_str().contains("key+with+spaces")
                || url.as_str().contains("key%20with%20spaces"),
            "api key should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = ApodClient::with_urls("k", 30, "not a url", "https://example.com/d.json");
        assert!(matches!(result, Err(ApodError::InvalidUrl(_))));
    }
}
