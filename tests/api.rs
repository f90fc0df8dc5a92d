use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use consistify_admin::{build_router, config::Config, services::Dataset, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const SEED: &str = r#"{
    "transactions": [
        {"id": "txn_001", "userId": "usr_01", "amount": 25, "paymentReference": "pay_1",
         "status": "success", "createdAt": "2026-01-05T07:00:00Z", "attempts": 1, "refunds": 0},
        {"id": "txn_002", "userId": "usr_01", "amount": 25, "paymentReference": "pay_2",
         "status": "success", "createdAt": "2026-01-05T07:05:00Z", "attempts": 1, "refunds": 0},
        {"id": "txn_003", "userId": "usr_01", "amount": 25, "paymentReference": "pay_3",
         "status": "success", "createdAt": "2026-01-05T07:09:00Z", "attempts": 1, "refunds": 0},
        {"id": "txn_004", "userId": "usr_02", "amount": -10, "razorpayPaymentId": "pay_4",
         "status": "failed", "createdAt": "2026-01-04T10:00:00Z", "attempts": 3, "refunds": 0}
    ]
}"#;

fn app() -> Router {
    let dataset = Dataset::from_json(SEED).unwrap();
    build_router(AppState::new(Config::default(), dataset))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Logs in with the fallback credentials and returns the `name=value` cookie pair.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"email": "admin@example.com", "password": "password123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Max-Age=28800"));
    assert!(!set_cookie.contains("Secure"));

    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"email": "admin@example.com", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email or password");
    assert_eq!(body["errorCode"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn non_string_credentials_are_rejected() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"email": 42, "password": ["password123"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/login")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guard_redirects_without_live_session() {
    let app = app();

    let response = app.clone().oneshot(get("/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fdashboard");

    let response = app
        .clone()
        .oneshot(get("/wallet/alerts", Some("admin_session=forged-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fwallet%2Falerts");

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logged_in_admin_skips_login_page() {
    let app = app();

    let response = app.clone().oneshot(get("/login?from=%2Fusers", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["page"], "login");
    assert_eq!(body["from"], "/users");

    let cookie = login(&app).await;
    let response = app.clone().oneshot(get("/login", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");

    let response = app.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["successfulLogins"], 1);
    assert_eq!(body["data"]["openFraudAlerts"], 2);
}

#[tokio::test]
async fn logout_revokes_session() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/logout", Some(&cookie), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = app.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn system_config_put_then_get() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/api/admin/systemconfig", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut config = body_json(response).await;
    assert_eq!(config["payment"]["provider"], "Razorpay");
    assert_eq!(config["sessions"]["maxSessionMinutes"], 120);

    config["sessions"]["maintenanceMode"] = json!(true);
    config["wallet"]["depositAmountInRupees"] = json!(-5.5);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/admin/systemconfig", None, config.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let response = app
        .oneshot(get("/api/admin/systemconfig", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, config);
}

#[tokio::test]
async fn system_config_stores_partial_documents_as_written() {
    let app = app();
    let partial = json!({
        "wallet": {"enabled": false},
        "sessions": {"maxSessionMinutes": 90.5},
        "extra": {"rolloutPercent": 10}
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/admin/systemconfig", None, partial.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/admin/systemconfig", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, partial);

    let cookie = login(&app).await;
    let response = app
        .clone()
        .oneshot(get("/settings", Some(&cookie)))
        .await
        .unwrap();
    let settings = body_json(response).await;
    assert_eq!(settings["data"]["config"], partial);
    assert_eq!(settings["data"]["featureFlags"]["walletEnforcementEnabled"], false);
    assert_eq!(settings["data"]["featureFlags"]["badgeRewardsEnabled"], true);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/admin/systemconfig")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn manual_credit_validation() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/wallet/credits",
            Some(&cookie),
            json!({"userId": "usr_01", "amount": 0, "note": "goodwill"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Enter a positive amount to credit.");
    assert_eq!(body["errorCode"], "VALIDATION_FAILED");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/wallet/credits",
            Some(&cookie),
            json!({"userId": "usr_01", "amount": 50, "note": ""}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a short admin note.");

    let response = app
        .oneshot(json_request(
            "POST",
            "/wallet/credits",
            Some(&cookie),
            json!({"userId": "usr_01", "amount": 50, "note": "goodwill"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "manual_1");
}

#[tokio::test]
async fn resolving_an_alert_hides_it() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get("/wallet/alerts", Some(&cookie)))
        .await
        .unwrap();
    let alerts = body_json(response).await;
    let ids: Vec<&str> = alerts["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["alert_usr_01_rapid_deposits", "alert_usr_02_flagged"]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/wallet/alerts/alert_usr_01_rapid_deposits/resolve",
            Some(&cookie),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Alert resolved for usr_01 with 3 transaction(s)."
    );

    let response = app
        .clone()
        .oneshot(get("/wallet", Some(&cookie)))
        .await
        .unwrap();
    let page = body_json(response).await;
    assert_eq!(page["data"]["alerts"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"]["transactions"][0]["reconciled"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/wallet/alerts/alert_usr_01_rapid_deposits/resolve",
            Some(&cookie),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/logs", Some(&cookie))).await.unwrap();
    let logs = body_json(response).await;
    assert_eq!(logs["data"]["adminActions"][0]["adminEmail"], "admin@example.com");
}

#[tokio::test]
async fn unknown_ocr_status_filter_is_a_bad_request() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get("/ocr?status=bogus", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/ocr?status=all", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
