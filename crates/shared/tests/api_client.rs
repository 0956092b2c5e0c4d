//! Integration tests for `ApiClient` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calocheck_shared::api::ApiClient;
use calocheck_shared::config::ApiConfig;
use calocheck_shared::filter::{FilterState, Nutrient, Side};
use calocheck_shared::geo::LatLng;
use calocheck_shared::query;
use calocheck_shared::search::StoreRequest;
use calocheck_shared::LocatorError;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig::new(&server.uri()))
}

fn sample_filters() -> FilterState {
    let mut f = FilterState::new();
    f.toggle_category("cafe");
    f.set_bound(Nutrient::Calories, Side::Max, "300");
    f
}

#[tokio::test]
async fn fetch_all_stores_decodes_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "brandId": 3, "name": "Ediya Seolleung", "lat": 37.504, "lon": 127.048, "address": "Teheran-ro"},
            {"id": 2, "brandId": 3, "name": "No coords", "lat": null, "lon": null}
        ])))
        .mount(&server)
        .await;

    let stores = client_for(&server).fetch_all_stores().await.unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].address.as_deref(), Some("Teheran-ro"));
    assert!(stores[1].position().is_err());
}

#[tokio::test]
async fn fetch_stores_posts_payload() {
    let server = MockServer::start().await;
    let payload = query::build(&sample_filters(), LatLng::new(37.5, 127.0));

    Mock::given(method("POST"))
        .and(path("/api/v1/stores/filtered"))
        .and(body_json(json!({
            "categories": ["cafe"],
            "caloriesMax": "300",
            "centerLat": 37.5,
            "centerLon": 127.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "brandId": 1, "name": "Mega Coffee", "lat": 37.5, "lon": 127.0, "category": "cafe"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let stores = client_for(&server).fetch_stores(&payload).await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].category.as_deref(), Some("cafe"));
}

#[tokio::test]
async fn execute_dispatches_by_request_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let stores = client_for(&server)
        .execute(&StoreRequest::All)
        .await
        .unwrap();
    assert!(stores.is_empty());
}

#[tokio::test]
async fn fetch_menus_sends_nutrient_only_payload() {
    let server = MockServer::start().await;
    let payload = query::build(&sample_filters(), LatLng::new(37.5, 127.0));

    Mock::given(method("POST"))
        .and(path("/api/v1/brands/3/menus/filtered"))
        .and(body_json(json!({
            "caloriesMax": "300",
            "centerLat": 37.5,
            "centerLon": 127.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "name": "Iced Americano", "calories": 15.0},
            {"id": 12, "name": "Cafe Latte", "calories": 180.0, "protein": 9.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let menus = client_for(&server).fetch_menus(3, &payload).await.unwrap();
    assert_eq!(menus.len(), 2);
    assert_eq!(menus[0].name, "Iced Americano");
    assert_eq!(menus[1].protein, Some(9.0));
}

#[tokio::test]
async fn non_success_status_is_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/stores/filtered"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let payload = query::build(&FilterState::new(), LatLng::new(37.5, 127.0));
    let err = client_for(&server).fetch_stores(&payload).await.unwrap_err();
    match err {
        LocatorError::HttpStatus { status, ref url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/v1/stores/filtered"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(err.is_network());
}

#[tokio::test]
async fn malformed_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_all_stores().await.unwrap_err();
    assert!(matches!(err, LocatorError::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:1"));
    let err = client.fetch_all_stores().await.unwrap_err();
    assert!(matches!(err, LocatorError::Network { .. }), "got {err:?}");
}
