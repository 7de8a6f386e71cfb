mod common;

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use serde_json::json;
use tower::ServiceExt;
use trade_journal::routes;

use common::{holding_body, send, signup, test_state};

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = routes::app(test_state());
    let (user_id, _) = signup(&app, "A", "a@x.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/holdings/{user_id}/all-holdings"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Authorization token not provided"));
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn garbage_token_is_unauthorized_with_challenge() {
    let app = routes::app(test_state());
    let (user_id, _) = signup(&app, "A", "a@x.com").await;

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/trades/{user_id}/all-trades"))
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[tokio::test]
async fn raw_token_without_scheme_is_accepted() {
    let app = routes::app(test_state());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/journals/{user_id}/all-journals"))
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_runs_before_id_checks() {
    let app = routes::app(test_state());

    let (status, _) = send(
        &app,
        Method::POST,
        "/holdings/not-an-id/new-holding/",
        None,
        Some(holding_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
