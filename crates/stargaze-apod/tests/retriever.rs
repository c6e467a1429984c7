//! Integration tests for the three-tier `Retriever` using wiremock mocks.
//!
//! Unmounted requests get a 404 from the mock server, which the retriever
//! must treat as a per-day miss or a tier failure, never a panic.

use std::time::Duration;

use chrono::NaiveDate;
use stargaze_apod::{ApodClient, RetrieveError, Retriever};
use stargaze_core::Source;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_retriever(server_uri: &str) -> Retriever {
    let fallback = format!("{server_uri}/data.json");
    let client = ApodClient::with_urls("test-key", 30, server_uri, &fallback)
        .expect("client construction should not fail");
    Retriever::new(client)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

fn entry(d: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "date": d,
        "title": title,
        "media_type": "image",
        "url": format!("https://example.com/{d}.jpg")
    })
}

#[tokio::test]
async fn bulk_tier_returns_sorted_primary_records() {
    let server = MockServer::start().await;

    // Out of order and with a duplicate date; the retriever must sort and
    // keep the last occurrence.
    let body = serde_json::json!([
        entry("2024-01-03", "c"),
        entry("2024-01-01", "stale"),
        entry("2024-01-01", "a"),
        entry("2024-01-02", "b"),
    ]);

    Mock::given(method("GET"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2024-01-01"), date("2024-01-03"), date("2024-06-01"))
        .await
        .expect("bulk tier should succeed");

    assert_eq!(result.source, Source::Primary);
    let dates: Vec<String> = result.records.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert!(result
        .records
        .windows(2)
        .all(|pair| pair[0].date <= pair[1].date));
    assert_eq!(result.records[0].title.as_deref(), Some("a"));
}

#[tokio::test]
async fn bulk_single_object_is_one_element_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("start_date", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry("2024-01-01", "solo")))
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2024-01-01"), date("2024-01-01"), date("2024-06-01"))
        .await
        .expect("single-object bulk response should be accepted");

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].title.as_deref(), Some("solo"));
}

#[tokio::test]
async fn per_day_tier_skips_future_days_and_continues_past_misses() {
    let server = MockServer::start().await;
    let today = date("2024-06-03");

    // Bulk answers with an error envelope: zero usable records, demote.
    Mock::given(method("GET"))
        .and(query_param("start_date", "2024-06-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": { "code": "OVER_RATE_LIMIT" } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("date", "2024-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry("2024-06-01", "first")))
        .mount(&server)
        .await;
    // 2024-06-02 is deliberately unmounted: a 404 miss that must not abort
    // the iteration.
    Mock::given(method("GET"))
        .and(query_param("date", "2024-06-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry("2024-06-03", "third")))
        .mount(&server)
        .await;

    // Future days must never be requested at all.
    for future in ["2024-06-04", "2024-06-05"] {
        Mock::given(method("GET"))
            .and(query_param("date", future))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry(future, "never")))
            .expect(0)
            .mount(&server)
            .await;
    }

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2024-06-01"), date("2024-06-05"), today)
        .await
        .expect("per-day tier should succeed");

    assert_eq!(result.source, Source::Primary);
    let dates: Vec<String> = result.records.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-06-01", "2024-06-03"]);
}

#[tokio::test]
async fn fallback_tier_filters_to_inclusive_range() {
    let server = MockServer::start().await;

    // Bulk yields an empty array; the whole range is in the future relative
    // to `today`, so the per-day tier issues no requests at all. Tiers 1-2
    // are exhausted and the static dataset decides.
    Mock::given(method("GET"))
        .and(query_param("start_date", "2020-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            entry("2020-01-01", "in range"),
            entry("2020-01-05", "out of range"),
        ])))
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2020-01-01"), date("2020-01-03"), date("2019-12-31"))
        .await
        .expect("fallback tier should succeed");

    assert_eq!(result.source, Source::Fallback);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].date, date("2020-01-01"));
}

#[tokio::test]
async fn fallback_used_when_every_per_day_request_misses() {
    let server = MockServer::start().await;

    // No bulk mock and no day mocks: everything 404s until the dataset.
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            entry("2024-06-01", "archived"),
        ])))
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2024-06-01"), date("2024-06-02"), date("2024-06-02"))
        .await
        .expect("fallback should rescue the request");

    assert_eq!(result.source, Source::Fallback);
    assert_eq!(result.records.len(), 1);
}

#[tokio::test]
async fn malformed_fallback_is_terminal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "not": "an array" })),
        )
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2020-01-01"), date("2020-01-02"), date("2019-12-31"))
        .await;

    assert!(
        matches!(result, Err(RetrieveError::FallbackShape(ref t)) if t == "object"),
        "{result:?}"
    );
}

#[tokio::test]
async fn unreachable_fallback_is_terminal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let result = retriever
        .retrieve_at(date("2020-01-01"), date("2020-01-02"), date("2019-12-31"))
        .await;

    assert!(
        matches!(result, Err(RetrieveError::FallbackUnavailable(_))),
        "{result:?}"
    );
}

#[tokio::test]
async fn invalid_range_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let retriever = test_retriever(&server.uri());

    let result = retriever
        .retrieve_at(date("2024-01-05"), date("2024-01-01"), date("2024-06-01"))
        .await;

    assert!(
        matches!(result, Err(RetrieveError::InvalidRange { .. })),
        "{result:?}"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn stale_retrieval_is_superseded_by_a_newer_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("start_date", "2024-01-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([entry("2024-01-01", "slow")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let retriever = test_retriever(&server.uri());
    let range = (date("2024-01-01"), date("2024-01-01"));
    let today = date("2024-06-01");

    let (stale, fresh) = tokio::join!(
        retriever.retrieve_at(range.0, range.1, today),
        async {
            // Let the first retrieval get in flight before starting the
            // second.
            tokio::time::sleep(Duration::from_millis(100)).await;
            retriever.retrieve_at(range.0, range.1, today).await
        }
    );

    assert!(matches!(stale, Err(RetrieveError::Superseded)), "{stale:?}");
    let fresh = fresh.expect("newest retrieval must deliver its records");
    assert_eq!(fresh.records.len(), 1);
}
