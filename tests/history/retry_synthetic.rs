use httpmock::{Method::GET, MockServer};
use motorwatch::core::client::{Backoff, RetryConfig};
use motorwatch::{Client, Error, PriceHistoryBuilder};
use std::time::Duration;
use url::Url;

#[tokio::test]
async fn history_retries_on_persistent_5xx() {
    let server = MockServer::start();
    let sym = "RETRY";

    // This single mock fails persistently, letting us count the retries.
    let fail_mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v8/finance/chart/{sym}"))
            .query_param("interval", "1d");
        then.status(503).body("Service Unavailable");
    });

    let max_retries = 3;
    let policy = RetryConfig {
        max_retries,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    };

    let client = Client::builder()
        .base_chart(Url::parse(&format!("{}/v8/finance/chart/", server.base_url())).unwrap())
        .retry_policy(policy)
        .build()
        .unwrap();

    let result = PriceHistoryBuilder::new(&client, sym).fetch().await;

    // 1 initial attempt + 3 retries.
    fail_mock.assert_hits((1 + max_retries) as usize);

    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected Status error after retries, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_stops_as_soon_as_a_request_succeeds() {
    let server = MockServer::start();
    let sym = "FLAKY";

    let mut fail_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(500).body("transient");
    });

    let client = Client::builder()
        .base_chart(Url::parse(&format!("{}/v8/finance/chart/", server.base_url())).unwrap())
        .retry_policy(RetryConfig {
            max_retries: 2,
            backoff: Backoff::Fixed(Duration::from_millis(1)),
            ..RetryConfig::default()
        })
        .build()
        .unwrap();

    // First run exhausts against the failing mock.
    let result = PriceHistoryBuilder::new(&client, sym).fetch().await;
    assert!(matches!(result, Err(Error::Status { status: 500, .. })));

    // Replace the mock with a healthy one; the next run succeeds first try.
    fail_mock.delete();
    let ok_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(200).body(crate::common::chart_json(
            crate::common::date(2025, 4, 1),
            &[Some(10.0), Some(10.5)],
            &[Some(1), Some(2)],
        ));
    });

    let points = PriceHistoryBuilder::new(&client, sym).fetch().await.unwrap();
    ok_mock.assert();
    assert_eq!(points.len(), 2);
}
