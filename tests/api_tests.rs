use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_root() {
    let app = common::create_test_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_live_and_info() {
    let app = common::create_test_app().await;

    let response = app.clone().oneshot(get("/api/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/health/info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "ustoz-backend");
}

#[tokio::test]
async fn test_initial_snapshot_is_dashboard() {
    let app = common::create_test_app().await;
    let response = app.oneshot(get("/api/session")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["view"], "dashboard");
    assert_eq!(body["data"]["loading"], false);
    assert!(body["data"]["syllabus"].is_null());
    assert!(body["data"]["pendingExport"].is_null());
}

#[tokio::test]
async fn test_navigation_to_create_syllabus() {
    let app = common::create_test_app().await;
    let response = app
        .oneshot(post_json(
            "/api/session/view",
            serde_json::json!({ "view": "create-syllabus" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["view"], "create-syllabus");
}

#[tokio::test]
async fn test_syllabus_view_unreachable_without_syllabus() {
    let app = common::create_test_app().await;
    let response = app
        .oneshot(post_json(
            "/api/session/view",
            serde_json::json!({ "view": "view-syllabus" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_generating_view_unreachable_by_navigation() {
    let app = common::create_test_app().await;
    let response = app
        .oneshot(post_json(
            "/api/session/view",
            serde_json::json!({ "view": "generating-content" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_subject_never_reaches_generation() {
    let app = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/view",
            serde_json::json!({ "view": "create-syllabus" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            "/api/syllabus/generate",
            serde_json::json!({ "subject": "   ", "topicCount": 5, "difficulty": "beginner" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_generation_failure_returns_to_form() {
    // No credential is configured, so the call fails before any
    // network traffic and the machine must revert to the form view.
    let app = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/view",
            serde_json::json!({ "view": "create-syllabus" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/syllabus/generate",
            serde_json::json!({ "subject": "Artificial Intelligence", "topicCount": 14, "difficulty": "intermediate" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "GENERATION_FAILED");

    let response = app.oneshot(get("/api/session")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["view"], "create-syllabus");
    assert_eq!(body["data"]["loading"], false);
}

#[tokio::test]
async fn test_content_generation_requires_syllabus_view() {
    let app = common::create_test_app().await;
    let response = app
        .oneshot(post_json(
            "/api/content/generate",
            serde_json::json!({ "topicId": "t1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_topic_is_not_found() {
    let app = common::create_seeded_app().await;
    let response = app
        .oneshot(post_json(
            "/api/content/generate",
            serde_json::json!({ "topicId": "missing" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_filters_snapshot() {
    let app = common::create_seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/search",
            serde_json::json!({ "query": "logic" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let topics = body["data"]["syllabus"]["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0]["id"], "t2");
    assert_eq!(body["data"]["syllabus"]["totalTopics"], 3);
}

#[tokio::test]
async fn test_reorder_preserves_week_numbers() {
    let app = common::create_seeded_app().await;

    let response = app
        .oneshot(post_json(
            "/api/syllabus/reorder",
            serde_json::json!({ "from": 0, "to": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let topics = body["data"]["syllabus"]["topics"].as_array().unwrap();
    let ids: Vec<&str> = topics.iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["t2", "t3", "t1"]);
    let weeks: Vec<u64> = topics.iter().map(|t| t["week"].as_u64().unwrap()).collect();
    assert_eq!(weeks, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_export_confirmation_flow() {
    let app = common::create_seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/export/request",
            serde_json::json!({ "kind": "syllabusPdf" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["data"]["message"],
        "Confirm PDF download for Artificial Intelligence?"
    );

    let response = app
        .clone()
        .oneshot(post_json("/api/export/confirm", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Artificial_Intelligence_Syllabus.pdf\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[tokio::test]
async fn test_declined_export_produces_nothing() {
    let app = common::create_seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/export/request",
            serde_json::json!({ "kind": "syllabusDocx" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/api/export/decline", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["pendingExport"].is_null());
    assert_eq!(body["data"]["view"], "view-syllabus");

    // Nothing left to confirm.
    let response = app
        .oneshot(post_json("/api/export/confirm", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_content_export_unavailable_from_syllabus_view() {
    let app = common::create_seeded_app().await;
    let response = app
        .oneshot(post_json(
            "/api/export/request",
            serde_json::json!({ "kind": "contentPdf" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_docx_export_is_a_zip_container() {
    let app = common::create_seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/export/request",
            serde_json::json!({ "kind": "syllabusDocx" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json("/api/export/confirm", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Artificial_Intelligence_Syllabus.docx\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = common::create_test_app().await;
    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
