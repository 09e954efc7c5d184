use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;
use stockpilot_auth::{JwtClaims, PrincipalId, Role};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = stockpilot_api::app::build_app(jwt_secret.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, roles: Vec<Role>) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: PrincipalId::new(),
        roles,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn create_item(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    name: &str,
    quantity: f64,
    threshold: f64,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/inventory/items", base_url))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "unit": "kg",
            "current_quantity": quantity,
            "reorder_threshold": threshold,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn("test-secret").await;

    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn("test-secret").await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // A token signed with the wrong secret is also rejected.
    let bad_token = mint_jwt("another-secret", vec![Role::new("admin")]);
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(bad_token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_token_roles() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);

    let res = reqwest::Client::new()
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("viewer")]);

    let res = reqwest::Client::new()
        .post(format!("{}/inventory/items", srv.base_url))
        .bearer_auth(token)
        .json(&json!({
            "name": "Flour",
            "unit": "kg",
            "current_quantity": 10.0,
            "reorder_threshold": 2.0,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_and_fetch_item() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &token, "Flour", 10.0, 2.0).await;
    assert_eq!(created["status"], "IN_STOCK");
    let id = created["id"].as_str().unwrap();

    let res = client
        .get(format!("{}/inventory/items/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["name"], "Flour");
    assert_eq!(fetched["current_quantity"], 10.0);

    // Duplicate names are rejected regardless of case.
    let res = client
        .post(format!("{}/inventory/items", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "FLOUR",
            "unit": "kg",
            "current_quantity": 1.0,
            "reorder_threshold": 0.5,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn invalid_and_unknown_item_ids() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/inventory/items/not-a-uuid", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");

    let res = client
        .get(format!(
            "{}/inventory/items/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restock_raises_quantity_and_status() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &token, "Sugar", 2.0, 5.0).await;
    assert_eq!(created["status"], "LOW_STOCK");
    let id = created["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/inventory/items/{}/restock", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["current_quantity"], 12.0);
    assert_eq!(body["status"], "IN_STOCK");

    // Zero and negative amounts are rejected before any mutation.
    let res = client
        .post(format!("{}/inventory/items/{}/restock", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 0.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn consumption_decrements_stock_and_appends_history() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &token, "Rice", 10.0, 5.0).await;
    let id = created["id"].as_str().unwrap().to_string();
    let today = Utc::now().date_naive().to_string();

    let res = client
        .post(format!("{}/consumption", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "item_id": id, "date": today, "quantity": 6.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let event: serde_json::Value = res.json().await.unwrap();
    assert_eq!(event["quantity"], 6.0);

    let res = client
        .get(format!("{}/inventory/items/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let item: serde_json::Value = res.json().await.unwrap();
    assert_eq!(item["current_quantity"], 4.0);
    assert_eq!(item["status"], "LOW_STOCK");

    // History is visible and joined with the item snapshot.
    let res = client
        .get(format!("{}/consumption?item_id={}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["item"]["name"], "Rice");
}

#[tokio::test]
async fn overconsumption_is_rejected_without_mutation() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &token, "Beans", 10.0, 2.0).await;
    let id = created["id"].as_str().unwrap().to_string();
    let today = Utc::now().date_naive().to_string();

    let res = client
        .post(format!("{}/consumption", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "item_id": id, "date": today, "quantity": 15.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");
    assert_eq!(body["available"], 10.0);
    assert_eq!(body["unit"], "kg");
    assert_eq!(
        body["message"],
        "Insufficient stock. Available: 10 kg"
    );

    // Neither the item nor the ledger changed.
    let res = client
        .get(format!("{}/inventory/items/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let item: serde_json::Value = res.json().await.unwrap();
    assert_eq!(item["current_quantity"], 10.0);

    let res = client
        .get(format!("{}/consumption?item_id={}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn restock_alerts_rank_imminent_stockouts() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();
    let today = Utc::now().date_naive().to_string();

    // Milk: 3 left after consuming 1/day -> ~3 days until empty.
    let milk = create_item(&client, &srv.base_url, &token, "Milk", 4.0, 1.0).await;
    // Oats: runs out in ~1 day.
    let oats = create_item(&client, &srv.base_url, &token, "Oats", 4.0, 1.0).await;
    // Salt: barely consumed, far beyond the horizon.
    let salt = create_item(&client, &srv.base_url, &token, "Salt", 100.0, 1.0).await;

    for (item, qty) in [(&milk, 1.0), (&oats, 3.0), (&salt, 1.0)] {
        let res = client
            .post(format!("{}/consumption", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "item_id": item["id"].as_str().unwrap(),
                "date": today,
                "quantity": qty,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/alerts/restock", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let alerts = body["alerts"].as_array().unwrap();

    // Oats (1/3 day of stock left) before Milk (3 days); Salt excluded.
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["item_name"], "Oats");
    assert_eq!(alerts[0]["days_until_empty"], 0.33);
    assert_eq!(alerts[1]["item_name"], "Milk");
    assert_eq!(alerts[1]["days_until_empty"], 3.0);
}

#[tokio::test]
async fn consumption_summary_totals_per_item() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, vec![Role::new("admin")]);
    let client = reqwest::Client::new();
    let today = Utc::now().date_naive();

    let item = create_item(&client, &srv.base_url, &token, "Coffee", 20.0, 2.0).await;
    let id = item["id"].as_str().unwrap().to_string();
    // An item with no consumption stays out of the summary.
    create_item(&client, &srv.base_url, &token, "Tea", 20.0, 2.0).await;

    for (date, qty) in [(today, 2.5), (today.pred_opt().unwrap(), 1.5)] {
        let res = client
            .post(format!("{}/consumption", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({ "item_id": id, "date": date.to_string(), "quantity": qty }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/consumption/summary", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let rows = body["summary"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["item_name"], "Coffee");
    assert_eq!(rows[0]["total_consumption"], 4.0);
    assert_eq!(rows[0]["current_quantity"], 16.0);
}
