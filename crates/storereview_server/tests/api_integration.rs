//! Integration tests for the store review HTTP API.

mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use support::{
    as_user, create_menu, create_store, id_of, register_file, setup_test_server,
};

#[tokio::test]
async fn store_menu_and_file_lifecycle() {
    let (server, _temp) = setup_test_server();

    let response = server
        .post("/api/store")
        .json(&json!({ "name": "  Corner Cafe ", "address": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let store: Value = response.json();
    assert_eq!(store["name"], "Corner Cafe");
    assert!(store["address"].is_null());
    let store_id = id_of(&store);

    let fetched = server.get(&format!("/api/store/{}", store_id)).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);

    let menu_id = create_menu(&server, &store_id, "flat white").await;
    let file_id = register_file(&server, &store_id, "cafe/latte-art.png").await;

    let menus: Value = server
        .get(&format!("/api/store/{}/menus", store_id))
        .await
        .json();
    assert_eq!(menus[0]["id"], menu_id.as_str());
    let files: Value = server
        .get(&format!("/api/store/{}/files", store_id))
        .await
        .json();
    assert_eq!(files[0]["id"], file_id.as_str());

    let stores: Value = server.get("/api/stores").await.json();
    assert_eq!(stores.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_store_routes_return_not_found() {
    let (server, _temp) = setup_test_server();

    let missing = server.get("/api/store/nope").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["kind"], "not_found");

    let menu = server
        .post("/api/store/nope/menu")
        .json(&json!({ "name": "ghost dish" }))
        .await;
    assert_eq!(menu.status_code(), StatusCode::NOT_FOUND);

    let reviews = server.get("/api/store/nope/reviews").await;
    assert_eq!(reviews.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_store_name_is_bad_request() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/store")
        .json(&json!({ "name": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_review_requires_identity() {
    let (server, _temp) = setup_test_server();
    let store_id = create_store(&server, "Dim Sum Palace").await;

    let response = server
        .post(&format!("/api/store/{}/review", store_id))
        .json(&json!({ "rating": 5 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn review_lifecycle_with_links() {
    let (server, _temp) = setup_test_server();
    let store_id = create_store(&server, "Dim Sum Palace").await;
    let menu_id = create_menu(&server, &store_id, "har gow").await;
    let file_id = register_file(&server, &store_id, "dimsum/har-gow.png").await;

    let response = as_user(
        server.post(&format!("/api/store/{}/review", store_id)),
        "alice",
    )
    .json(&json!({
        "rating": 4,
        "content": "Great dumplings",
        "rating_details": { "taste": 5, "service": 3 },
        "menu_ids": [menu_id, menu_id],
        "file_ids": [file_id]
    }))
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let created: Value = response.json();
    assert_eq!(created["user_id"], "alice");
    assert_eq!(created["store_id"], store_id.as_str());
    assert_eq!(created["rating_details"]["taste"], 5);
    assert_eq!(created["menu_ids"], json!([menu_id]));
    assert_eq!(created["file_ids"], json!([file_id]));
    assert_eq!(created["likes_count"], 0);
    assert_eq!(created["liked_by_me"], false);
    let review_id = id_of(&created);

    let fetched = server
        .get(&format!("/api/store/{}/review/{}", store_id, review_id))
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    let fetched: Value = fetched.json();
    assert_eq!(fetched["content"], "Great dumplings");

    let by_user: Value = server.get("/api/user/alice/reviews").await.json();
    assert_eq!(by_user[0]["id"], review_id.as_str());
}

#[tokio::test]
async fn invalid_reviews_are_rejected_with_bad_request() {
    let (server, _temp) = setup_test_server();
    let store_id = create_store(&server, "Taco Stand").await;
    let other_id = create_store(&server, "Burger Barn").await;
    let foreign_menu = create_menu(&server, &other_id, "smash burger").await;
    let foreign_file = register_file(&server, &other_id, "burger/1.png").await;

    let cases = [
        json!({ "rating": 0 }),
        json!({ "rating": 6 }),
        json!({ "rating": 3, "menu_ids": [foreign_menu] }),
        json!({ "rating": 3, "file_ids": [foreign_file] }),
    ];
    for body in cases {
        let response = as_user(
            server.post(&format!("/api/store/{}/review", store_id)),
            "alice",
        )
        .json(&body)
        .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
    }

    let listed: Value = server
        .get(&format!("/api/store/{}/reviews", store_id))
        .await
        .json();
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn review_under_another_store_is_not_found() {
    let (server, _temp) = setup_test_server();
    let store_id = create_store(&server, "Noodle Bar").await;
    let other_id = create_store(&server, "Rice Bowl").await;
    let created: Value = as_user(
        server.post(&format!("/api/store/{}/review", store_id)),
        "alice",
    )
    .json(&json!({ "rating": 3 }))
    .await
    .json();
    let review_id = id_of(&created);

    let response = server
        .get(&format!("/api/store/{}/review/{}", other_id, review_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn likes_are_idempotent_and_drive_liked_sort() {
    let (server, _temp) = setup_test_server();
    let store_id = create_store(&server, "Ramen House").await;

    let mut review_ids = Vec::new();
    for author in ["alice", "bob"] {
        let created: Value = as_user(
            server.post(&format!("/api/store/{}/review", store_id)),
            author,
        )
        .json(&json!({ "rating": 4 }))
        .await
        .json();
        review_ids.push(id_of(&created));
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let older = &review_ids[0];

    let unauthenticated = server.post(&format!("/api/review/{}/like", older)).await;
    assert_eq!(unauthenticated.status_code(), StatusCode::UNAUTHORIZED);

    for _ in 0..2 {
        let liked = as_user(server.post(&format!("/api/review/{}/like", older)), "carol").await;
        assert_eq!(liked.status_code(), StatusCode::OK);
        let summary: Value = liked.json();
        assert_eq!(summary["likes_count"], 1);
        assert_eq!(summary["liked"], true);
    }

    let newest: Value = server
        .get(&format!("/api/store/{}/reviews", store_id))
        .await
        .json();
    assert_eq!(newest[0]["id"], review_ids[1].as_str());

    let popular: Value = as_user(
        server.get(&format!("/api/store/{}/reviews?sort=LIKED", store_id)),
        "carol",
    )
    .await
    .json();
    assert_eq!(popular[0]["id"], older.as_str());
    assert_eq!(popular[0]["liked_by_me"], true);
    assert_eq!(popular[1]["liked_by_me"], false);

    let fallback: Value = server
        .get(&format!("/api/store/{}/reviews?sort=bogus", store_id))
        .await
        .json();
    assert_eq!(fallback[0]["id"], review_ids[1].as_str());

    let unliked = as_user(server.delete(&format!("/api/review/{}/like", older)), "carol").await;
    assert_eq!(unliked.status_code(), StatusCode::OK);
    let summary: Value = unliked.json();
    assert_eq!(summary["likes_count"], 0);
    assert_eq!(summary["liked"], false);
}

#[tokio::test]
async fn liking_missing_review_is_not_found() {
    let (server, _temp) = setup_test_server();
    let response = as_user(server.post("/api/review/missing/like"), "carol").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/stores").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "DENY");
    response.assert_contains_header("content-security-policy");
}
