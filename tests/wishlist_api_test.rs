mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn wishlist_round_trip_per_user() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let alice = valid_init_data(1001);
    let bob = valid_init_data(1002);

    let body = json!({ "tobaccoId": "42", "brand": "Darkside", "name": "Supernova" });
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/wishlist", Some(&alice), Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["created"], true);

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/wishlist", Some(&alice), Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let dup = json_body(resp).await;
    assert_eq!(dup["created"], false);
    assert_eq!(dup["item"]["tobaccoId"], "42");

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/wishlist",
            Some(&alice),
            Some(json!({ "tobaccoId": "7", "note": "for friday" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(get("/api/wishlist", Some(&alice)))
        .await
        .unwrap();
    let list = json_body(resp).await;
    assert_eq!(list["total"], 2);
    assert_eq!(list["items"][0]["tobaccoId"], "7");
    assert_eq!(list["items"][1]["tobaccoId"], "42");

    let resp = app
        .clone()
        .oneshot(get("/api/wishlist", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["total"], 0);

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/api/wishlist/42", Some(&alice), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["tobaccoId"], "42");

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/api/wishlist/42", Some(&alice), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(request("DELETE", "/api/wishlist", Some(&alice), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["removed"], 1);
}

#[tokio::test]
async fn invalid_payload_and_full_wishlist_are_bad_requests() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let init_data = valid_init_data(5);

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/wishlist",
            Some(&init_data),
            Some(json!({ "tobaccoId": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The test configuration caps wishlists at three items.
    for id in ["a", "b", "c"] {
        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/wishlist",
                Some(&init_data),
                Some(json!({ "tobaccoId": id })),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = app
        .oneshot(request(
            "POST",
            "/api/wishlist",
            Some(&init_data),
            Some(json!({ "tobaccoId": "d" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_search_query_is_rejected() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let init_data = valid_init_data(9);

    for uri in ["/api/search", "/api/search?q=%20%20"] {
        let resp = app
            .clone()
            .oneshot(get(uri, Some(&init_data)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn unreachable_catalog_is_a_bad_gateway() {
    let (app, _dir) = setup_app(Some(BOT_TOKEN)).await;
    let resp = app
        .oneshot(get("/api/search?q=mint", Some(&valid_init_data(9))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
