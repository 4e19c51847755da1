mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn signed_init_data_authenticates_user() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let init_data = sign_init_data(
        BOT_TOKEN,
        &[
            ("user", r#"{"id":123456789,"username":"testuser"}"#),
            ("auth_date", &now().to_string()),
        ],
    );

    let resp = app.oneshot(get("/api/me", Some(&init_data))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["userId"], 123456789);
    assert_eq!(body["user"]["username"], "testuser");
}

#[tokio::test]
async fn missing_init_data_is_rejected() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let resp = app.oneshot(get("/api/me", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["code"], "MISSING_INIT_DATA");
}

#[tokio::test]
async fn tampered_or_foreign_signatures_are_rejected() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;

    let tampered = valid_init_data(42).replace("%3A42", "%3A43");
    let resp = app
        .clone()
        .oneshot(get("/api/me", Some(&tampered)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["code"], "INVALID_SIGNATURE");

    let foreign = sign_init_data(
        "another-bot-token",
        &[("user", &user_json(42)), ("auth_date", &now().to_string())],
    );
    let resp = app.oneshot(get("/api/me", Some(&foreign))).await.unwrap();
    assert_eq!(json_body(resp).await["code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn auth_date_outside_window_is_expired() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    for auth_date in [now() - 86_400 - 60, now() + 600] {
        let init_data = sign_init_data(
            BOT_TOKEN,
            &[("user", &user_json(7)), ("auth_date", &auth_date.to_string())],
        );
        let resp = app
            .clone()
            .oneshot(get("/api/me", Some(&init_data)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(resp).await["code"], "EXPIRED_AUTH_DATA");
    }
}

#[tokio::test]
async fn user_field_problems_are_reported_separately() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;

    let no_user = sign_init_data(BOT_TOKEN, &[("auth_date", &now().to_string())]);
    let resp = app
        .clone()
        .oneshot(get("/api/me", Some(&no_user)))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["code"], "MISSING_USER_DATA");

    let bad_user = sign_init_data(
        BOT_TOKEN,
        &[("user", "not json"), ("auth_date", &now().to_string())],
    );
    let resp = app.oneshot(get("/api/me", Some(&bad_user))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["code"], "INVALID_USER_DATA");
}

#[tokio::test]
async fn header_wins_over_query_parameter() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let header = valid_init_data(1);
    let query = urlencoding::encode(&valid_init_data(2)).into_owned();

    let resp = app
        .oneshot(get(&format!("/api/me?initData={}", query), Some(&header)))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["userId"], 1);
}

#[tokio::test]
async fn query_parameter_is_accepted_without_header() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let query = urlencoding::encode(&valid_init_data(2)).into_owned();

    let resp = app
        .oneshot(get(&format!("/api/me?initData={}", query), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["userId"], 2);
}

#[tokio::test]
async fn missing_bot_token_is_a_server_error() {
    let (app, _dir) = setup_app(None).await;
    let resp = app
        .oneshot(get("/api/wishlist", Some(&valid_init_data(1))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await["code"], "MISSING_BOT_TOKEN");
}

#[tokio::test]
async fn public_routes_need_no_init_data() {
    let (app, _dir) = setup_app(None).await;
    let resp = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["botConfigured"], false);

    let resp = app
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    assert!(doc["paths"]["/api/wishlist"].is_object());
    assert!(doc["components"]["securitySchemes"]["telegram_init_data"].is_object());
}
