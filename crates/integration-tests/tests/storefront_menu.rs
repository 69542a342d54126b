//! Public menu browsing.

use axum::http::StatusCode;
use echoeats_integration_tests::TestClient;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_categories_start_with_all() {
    let mut client = TestClient::new();
    let response = client.get("/api/categories").await;
    assert_eq!(response.status, StatusCode::OK);

    let tabs = response.body.as_array().expect("array of tabs");
    assert_eq!(tabs.len(), 12);
    assert_eq!(tabs.first().expect("first tab")["id"], "all");
}

#[tokio::test]
async fn test_menu_filter() {
    let mut client = TestClient::new();

    let all = client.get("/api/menu").await;
    let total = all.body.as_array().expect("items").len();
    assert_eq!(total, echoeats_core::menu::catalog().len());

    let biryani = client.get("/api/menu?category=biryani").await;
    let items = biryani.body.as_array().expect("items");
    assert!(!items.is_empty());
    assert!(items.len() < total);
    assert!(items.iter().all(|item| item["category"] == "biryani"));
}

#[tokio::test]
async fn test_unknown_category_is_bad_request() {
    let mut client = TestClient::new();
    let response = client.get("/api/menu?category=pizza").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_menu_item_detail() {
    let mut client = TestClient::new();

    let found = client.get("/api/menu/14").await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["name"], "Chicken Biryani");
    assert_eq!(found.body["price"], "13.99");

    let missing = client.get("/api/menu/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_browsing_needs_no_session() {
    let mut client = TestClient::new();
    client.get("/api/menu").await;
    assert!(!client.has_session());
}
