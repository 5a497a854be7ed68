//! Integration tests for the authenticated read endpoints.
//!
//! The Trade Me API is mocked with wiremock; assertions cover the request
//! shape (path, query, OAuth header) and response decoding.

use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trademe_rs::prelude::*;

fn test_client(server: &MockServer) -> TrademeClient {
    TrademeClient::new(
        Credentials::new("ck", "cs", "at", "ats"),
        Environment::custom(server.uri(), server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/2149713186.json"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ListingId": 2149713186u64,
            "Title": "Vintage radio",
            "StartPrice": 10.0,
            "BidCount": 3
        })))
        .mount(&server)
        .await;

    let listing = test_client(&server)
        .listings()
        .get(ListingId::new(2149713186))
        .await
        .unwrap();

    assert_eq!(listing.listing_id, ListingId::new(2149713186));
    assert_eq!(listing.title, "Vintage radio");
    assert_eq!(listing.bid_count, Some(3));
}

#[tokio::test]
async fn test_get_watchlist_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/mytrademe/watchlist/ClosingToday.json"))
        .and(query_param("page", "2"))
        .and(query_param("rows", "25"))
        .and(query_param("category", "0350-"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "TotalCount": 1,
            "Page": 2,
            "PageSize": 25,
            "List": [{"ListingId": 101, "Title": "Lamp"}]
        })))
        .mount(&server)
        .await;

    let page = test_client(&server)
        .watchlist()
        .list(
            WatchlistFilter::ClosingToday,
            &WatchlistQuery::default()
                .with_page(2)
                .with_rows(25)
                .with_category("0350-"),
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, Some(1));
    assert_eq!(page.list[0].listing_id, ListingId::new(101));
}

#[tokio::test]
async fn test_watchlist_omits_category_when_unset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/mytrademe/watchlist/All.json"))
        .and(query_param("page", "1"))
        .and(query_param("rows", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "TotalCount": 0,
            "List": []
        })))
        .mount(&server)
        .await;

    let page = test_client(&server)
        .watchlist()
        .list(WatchlistFilter::All, &WatchlistQuery::default())
        .await
        .unwrap();
    assert!(page.list.is_empty());
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/1.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"ErrorDescription": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .listings()
        .get(ListingId::new(1))
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/999.json"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"ErrorDescription": "Listing not found"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .listings()
        .get(ListingId::new(999))
        .await
        .unwrap_err();
    match err {
        Error::NotFound(message) => assert_eq!(message, "Listing not found"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/1.json"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"ErrorDescription": "Down for maintenance"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .listings()
        .get(ListingId::new(1))
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Down for maintenance");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}
