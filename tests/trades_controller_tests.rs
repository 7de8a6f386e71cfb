mod common;

use axum::http::{Method, StatusCode};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use trade_journal::{routes, services::store::Filter};

use common::{send, signup, strict_state, test_state, trade_body};

#[tokio::test]
async fn day_trade_only_creates_a_journal() {
    let state = test_state();
    let app = routes::app(state.clone());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/trades/{user_id}/new-trade/"),
        Some(&token),
        Some(trade_body("Day Trade")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], json!("Day trade journal added successfully"));
    assert_eq!(body["data"]["journal_for"], json!("Trade"));

    assert!(state.db.trades.find(&Filter::Owner(user_id.clone())).await.unwrap().is_empty());
    assert_eq!(state.db.journals.find(&Filter::Owner(user_id.clone())).await.unwrap().len(), 1);

    let owner = ObjectId::parse_str(&user_id).unwrap();
    let user = state.db.users.find_one(&Filter::Id(owner)).await.unwrap().unwrap();
    assert!(user.trades.is_empty());
    assert_eq!(user.journal.len(), 1);
}

#[tokio::test]
async fn regular_trade_computes_totals() {
    let state = test_state();
    let app = routes::app(state.clone());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/trades/{user_id}/new-trade/"),
        Some(&token),
        Some(trade_body("Swing")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], json!("Trade added successfully"));
    assert_eq!(body["data"]["total_traded"], json!(40.0));
    assert_eq!(body["data"]["profit_or_loss"], json!(10.0));

    let trade_id = body["data"]["_id"].as_str().unwrap().to_string();
    let owner = ObjectId::parse_str(&user_id).unwrap();
    let user = state.db.users.find_one(&Filter::Id(owner)).await.unwrap().unwrap();
    assert_eq!(user.trades, vec![trade_id]);
    // no companion journal for a regular trade
    assert!(user.journal.is_empty());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/trades/{user_id}/all-trades"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_trade_replaces_fields() {
    let app = routes::app(test_state());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/trades/{user_id}/new-trade/"),
        Some(&token),
        Some(trade_body("Swing")),
    )
    .await;
    let trade_id = created["data"]["_id"].as_str().unwrap().to_string();

    let mut changed = trade_body("Swing");
    changed["exit_price"] = json!(8.0);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/trades/{user_id}/{trade_id}"),
        Some(&token),
        Some(changed.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["profit_or_loss"], json!(-8.0));

    // same payload again changes nothing
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/trades/{user_id}/{trade_id}"),
        Some(&token),
        Some(changed),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("Failed to update trade"));
}

#[tokio::test]
async fn delete_trade_leaves_a_deleted_trade_journal() {
    let state = test_state();
    let app = routes::app(state.clone());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/trades/{user_id}/new-trade/"),
        Some(&token),
        Some(trade_body("Swing")),
    )
    .await;
    let trade_id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/trades/{user_id}/{trade_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Trade deleted successfully"));

    let owner = ObjectId::parse_str(&user_id).unwrap();
    let user = state.db.users.find_one(&Filter::Id(owner)).await.unwrap().unwrap();
    assert!(user.trades.is_empty());
    assert_eq!(user.journal.len(), 1);

    let journals = state.db.journals.find(&Filter::Owner(user_id.clone())).await.unwrap();
    assert_eq!(journals[0].journal_for, "Deleted Trade");
    assert_eq!(journals[0].trade_category, "sell");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/trades/{user_id}/{trade_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_trade_is_not_found() {
    let app = routes::app(test_state());
    let (user_id, token) = signup(&app, "A", "a@x.com").await;
    let ghost = ObjectId::new().to_hex();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/trades/{user_id}/{ghost}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Trade does not exist or does not belong to the user"));
}

#[tokio::test]
async fn foreign_trade_resolves_under_another_users_path() {
    let app = routes::app(test_state());
    let (alice_id, alice_token) = signup(&app, "A", "a@x.com").await;
    let (bob_id, bob_token) = signup(&app, "B", "b@x.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/trades/{alice_id}/new-trade/"),
        Some(&alice_token),
        Some(trade_body("Swing")),
    )
    .await;
    let trade_id = created["data"]["_id"].as_str().unwrap().to_string();

    // trade lookups check existence only
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/trades/{bob_id}/{trade_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"], json!(alice_id));
}

#[tokio::test]
async fn strict_ownership_scopes_trade_lookups() {
    let app = routes::app(strict_state());
    let (alice_id, alice_token) = signup(&app, "A", "a@x.com").await;
    let (bob_id, bob_token) = signup(&app, "B", "b@x.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/trades/{alice_id}/new-trade/"),
        Some(&alice_token),
        Some(trade_body("Swing")),
    )
    .await;
    let trade_id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/trades/{bob_id}/{trade_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Trade does not exist or does not belong to the user"));

    // the owner still reaches it
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/trades/{alice_id}/{trade_id}"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
