//! Cart and checkout through the HTTP API.

use axum::http::StatusCode;
use echoeats_integration_tests::TestClient;
use serde_json::json;

#[tokio::test]
async fn test_cart_requires_sign_in() {
    let mut client = TestClient::new();
    let response = client.get("/api/cart").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Please sign in");

    let add = client.post("/api/cart/add", json!({ "item_id": 14 })).await;
    assert_eq!(add.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_cart_has_no_fee() {
    let mut client = TestClient::new();
    client.login_demo().await;

    let cart = client.get("/api/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.body["item_count"], 0);
    assert_eq!(cart.body["delivery_fee"], "0");
}

#[tokio::test]
async fn test_add_twice_then_checkout() {
    let mut client = TestClient::new();
    client.login_demo().await;

    let first = client.post("/api/cart/add", json!({ "item_id": 14 })).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["notice"]["kind"], "added");
    assert_eq!(first.body["notice"]["message"], "Chicken Biryani added to cart");

    let second = client.post("/api/cart/add", json!({ "item_id": 14 })).await;
    assert_eq!(second.body["notice"]["kind"], "added_another");
    let cart = &second.body["cart"];
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert_eq!(cart["lines"][0]["line_total"], "27.98");
    assert_eq!(cart["subtotal"], "27.98");
    assert_eq!(cart["delivery_fee"], "3.99");
    assert_eq!(cart["total"], "31.97");

    let checkout = client.post("/api/cart/checkout", json!({})).await;
    assert_eq!(checkout.status, StatusCode::OK);
    assert_eq!(checkout.body["receipt"]["total"], "31.97");
    assert_eq!(checkout.body["notice"]["kind"], "order_placed");

    let after = client.get("/api/cart").await;
    assert_eq!(after.body["item_count"], 0);
}

#[tokio::test]
async fn test_update_and_remove() {
    let mut client = TestClient::new();
    client.login_demo().await;
    client.post("/api/cart/add", json!({ "item_id": 1 })).await;
    client.post("/api/cart/add", json!({ "item_id": 43 })).await;

    let updated = client
        .post("/api/cart/update", json!({ "item_id": 1, "quantity": 4 }))
        .await;
    assert_eq!(updated.body["cart"]["item_count"], 5);
    assert!(updated.body["notice"].is_null());

    let zeroed = client
        .post("/api/cart/update", json!({ "item_id": 1, "quantity": 0 }))
        .await;
    assert_eq!(zeroed.body["notice"]["kind"], "removed");
    assert_eq!(zeroed.body["cart"]["item_count"], 1);

    let removed = client.post("/api/cart/remove", json!({ "item_id": 43 })).await;
    assert_eq!(removed.body["notice"]["kind"], "removed");
    assert_eq!(removed.body["cart"]["item_count"], 0);

    let again = client.post("/api/cart/remove", json!({ "item_id": 43 })).await;
    assert_eq!(again.status, StatusCode::OK);
    assert!(again.body["notice"].is_null());
}

#[tokio::test]
async fn test_empty_checkout_is_rejected() {
    let mut client = TestClient::new();
    client.login_demo().await;
    let response = client.post("/api/cart/checkout", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Your cart is empty");
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let mut client = TestClient::new();
    client.login_demo().await;
    let response = client.post("/api/cart/add", json!({ "item_id": 999 })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_carts_are_per_visitor_and_dropped_on_logout() {
    let mut alice = TestClient::new();
    alice.login_demo().await;
    alice.post("/api/cart/add", json!({ "item_id": 14 })).await;

    let mut bob = TestClient::for_app(alice.app());
    bob.login_demo().await;
    assert_eq!(bob.get("/api/cart").await.body["item_count"], 0);

    alice.post("/api/auth/logout", json!({})).await;
    alice.login_demo().await;
    assert_eq!(alice.get("/api/cart").await.body["item_count"], 0);
}
