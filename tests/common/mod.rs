#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use trade_journal::{config::Settings, services::store::Db, AppState};

pub fn test_state() -> AppState {
    let settings = Settings {
        bcrypt_cost: 4,
        ..Settings::default()
    };
    AppState::new(Db::memory(), settings)
}

pub fn strict_state() -> AppState {
    let mut state = test_state();
    state.settings.strict_ownership = true;
    state
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }

    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Registers and logs in; returns (user id, access token).
pub async fn signup(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/users/register/",
        None,
        Some(json!({ "name": name, "email": email, "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let user_id = body["user"]["_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        Method::POST,
        "/users/login/",
        None,
        Some(json!({ "email": email, "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let token = body["access_token"].as_str().unwrap().to_string();

    (user_id, token)
}

pub fn holding_body() -> Value {
    json!({
        "asset_name": "X",
        "quantity": 10,
        "bought_price": 5.0,
        "current_price": 7.0,
        "date": "2024-03-01T00:00:00Z"
    })
}

pub fn trade_body(trade_type: &str) -> Value {
    json!({
        "asset_name": "ACME",
        "quantity": 4,
        "trade_type": trade_type,
        "asset_type": "equity",
        "trade_category": "buy",
        "enter_price": 10.0,
        "exit_price": 12.5,
        "strategy_name": "breakout",
        "strategy_description": "range break",
        "date": "2024-03-01T00:00:00Z"
    })
}

pub fn journal_body(journal_for: &str) -> Value {
    json!({
        "asset_name": "ACME",
        "quantity": 2,
        "asset_type": "equity",
        "journal_for": journal_for,
        "trade_category": "buy",
        "enter_price": 10.0,
        "exit_price": 11.0,
        "stop_loss": 9.5,
        "strategy_name": "pullback",
        "strategy_description": "bought the dip",
        "date": "2024-03-01T00:00:00Z"
    })
}
