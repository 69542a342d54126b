//! Sign in, sign up, sign out and profile edits.

use axum::http::StatusCode;
use echoeats_core::auth::DEMO_EMAIL;
use echoeats_integration_tests::TestClient;
use serde_json::json;

fn signup_form() -> serde_json::Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "555-010-2030",
        "location": "Austin, TX",
        "password": "curry-leaf",
    })
}

#[tokio::test]
async fn test_me_when_signed_out() {
    let mut client = TestClient::new();
    let response = client.get("/api/auth/me").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["authenticated"], false);
    assert!(response.body["user"].is_null());
}

#[tokio::test]
async fn test_demo_login() {
    let mut client = TestClient::new();
    let response = client.login_demo().await;
    assert_eq!(response.body["message"], "Welcome back to EchoEats!");
    assert_eq!(response.body["user"]["email"], DEMO_EMAIL);
    assert!(client.has_session());

    let me = client.get("/api/auth/me").await;
    assert_eq!(me.body["authenticated"], true);
    assert_eq!(me.body["user"]["email"], DEMO_EMAIL);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let mut client = TestClient::new();
    let response = client
        .post(
            "/api/auth/login",
            json!({ "email": DEMO_EMAIL, "password": "nope" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_validates_input() {
    let mut client = TestClient::new();
    let blank = client
        .post("/api/auth/login", json!({ "email": "", "password": "" }))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["error"], "Please fill in all fields");
}

#[tokio::test]
async fn test_signup_logout_login() {
    let mut client = TestClient::new();

    let signup = client.post("/api/auth/signup", signup_form()).await;
    assert_eq!(signup.status, StatusCode::OK);
    assert_eq!(signup.body["message"], "Account created successfully!");
    assert_eq!(signup.body["user"]["name"], "Asha Rao");

    let logout = client.post("/api/auth/logout", json!({})).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "Logged out successfully");
    let me = client.get("/api/auth/me").await;
    assert_eq!(me.body["authenticated"], false);

    let login = client
        .post(
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "curry-leaf" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["location"], "Austin, TX");
}

#[tokio::test]
async fn test_account_is_shared_across_visitors() {
    let mut first = TestClient::new();
    first.post("/api/auth/signup", signup_form()).await;

    let mut second = TestClient::for_app(first.app());
    let bad = second
        .post(
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "wrong" }),
        )
        .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);

    let good = second
        .post(
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "curry-leaf" }),
        )
        .await;
    assert_eq!(good.status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_rejects_short_phone() {
    let mut client = TestClient::new();
    let mut form = signup_form();
    form["phone"] = json!("555");
    let response = client.post("/api/auth/signup", form).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Please enter a valid phone number");
}

#[tokio::test]
async fn test_update_profile() {
    let mut client = TestClient::new();

    let anonymous = client
        .put(
            "/api/auth/profile",
            json!({ "name": "X", "email": "x@example.com", "phone": "5550102030", "location": "Here" }),
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    client.login_demo().await;
    let updated = client
        .put(
            "/api/auth/profile",
            json!({
                "name": "Demo Person",
                "email": DEMO_EMAIL,
                "phone": "+1 (555) 000-1111",
                "location": "Brooklyn, NY",
            }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["message"], "Profile updated successfully!");

    let me = client.get("/api/auth/me").await;
    assert_eq!(me.body["user"]["location"], "Brooklyn, NY");
}
