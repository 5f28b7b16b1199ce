use httpmock::{Method::GET, MockServer};
use motorwatch::core::client::RetryConfig;
use motorwatch::{Client, Error, PriceHistoryBuilder};
use url::Url;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_chart(Url::parse(&format!("{}/v8/finance/chart/", server.base_url())).unwrap())
        .build()
        .unwrap()
}

#[tokio::test]
async fn provider_error_maps_to_price_unavailable() {
    let server = MockServer::start();
    let sym = "DELISTED";

    server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(200).body(crate::common::chart_error_json(
            "Not Found",
            "No data found, symbol may be delisted",
        ));
    });

    let client = client_for(&server);
    let result = PriceHistoryBuilder::new(&client, sym).fetch().await;

    match result {
        Err(Error::PriceUnavailable { symbol, reason }) => {
            assert_eq!(symbol, sym);
            assert!(reason.contains("delisted"));
        }
        other => panic!("expected PriceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_result_maps_to_price_unavailable() {
    let server = MockServer::start();
    let sym = "GM";

    server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(200).body(crate::common::chart_empty_json());
    });

    let client = client_for(&server);
    let result = PriceHistoryBuilder::new(&client, sym).fetch().await;

    assert!(matches!(result, Err(Error::PriceUnavailable { .. })));
}

#[tokio::test]
async fn all_null_closes_map_to_price_unavailable() {
    let server = MockServer::start();
    let sym = "HOLLOW";

    server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(200).body(crate::common::chart_json(
            crate::common::date(2025, 4, 1),
            &[None, None],
            &[Some(1), Some(2)],
        ));
    });

    let client = client_for(&server);
    let result = PriceHistoryBuilder::new(&client, sym).fetch().await;

    assert!(matches!(result, Err(Error::PriceUnavailable { .. })));
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start();
    let sym = "NOPE";

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(404).body("not found");
    });

    let client = client_for(&server);
    let result = PriceHistoryBuilder::new(&client, sym)
        .retry_policy(Some(RetryConfig::disabled()))
        .fetch()
        .await;

    mock.assert();
    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Status error, got {other:?}"),
    }
}
