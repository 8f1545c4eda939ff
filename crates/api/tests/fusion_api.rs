//! Integration tests for `POST /api/v1/fusions`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_json, MemoryUploadStore, StubGateway, GENERATED_URL};
use fusion_core::error::GatewayError;
use serde_json::json;

fn fusion_body(character: &str, mode: &str) -> serde_json::Value {
    json!({
        "prompt": "at a summer festival",
        "characterId": character,
        "fusionModeId": mode,
    })
}

// ---------------------------------------------------------------------------
// Test: successful fusion returns 200 and the gateway's image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_fusion_returns_result() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));

    let response = post_json(app, "/api/v1/fusions", fusion_body("sakura-dreamer", "group-photo")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["imageUrl"], GENERATED_URL);
    assert_eq!(json["processedImageUrl"], GENERATED_URL);
    assert_eq!(json["creditsUsed"], 2);
    assert_eq!(json["characterName"], "Sakura Dreamer");
    assert_eq!(json["fusionModeName"], "Group Photo Fusion");
    assert!(json["processingTimeMs"].is_u64());
    assert!(json.get("error").is_none());
    assert_eq!(gateway.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: legacy field names and the uploaded image are forwarded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_field_names_are_accepted() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));

    let response = post_json(
        app,
        "/api/v1/fusions",
        json!({
            "prompt": "rooftop at dusk",
            "character": "cyber-hero",
            "fusionMode": "character-replacement",
            "imageUrl": "https://uploads.test/0.png",
            "userId": "user-7",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["sourceImageUrl"], "https://uploads.test/0.png");

    let last = gateway.last.lock().unwrap().clone().unwrap();
    assert_eq!(last.character.id, "cyber-hero");
    assert_eq!(last.image_ref.as_deref(), Some("https://uploads.test/0.png"));
    assert_eq!(last.user_id.as_deref(), Some("user-7"));
    assert_eq!(last.quoted_credits, 3);
}

// ---------------------------------------------------------------------------
// Test: unknown ids are a 422 and never reach the gateway
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_character_returns_422_without_gateway_call() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));

    let response = post_json(app, "/api/v1/fusions", fusion_body("nobody", "group-photo")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["creditsUsed"], 0);
    assert_eq!(json["characterName"], "Unknown");
    assert_eq!(json["fusionModeName"], "Group Photo Fusion");
    assert!(json["error"].as_str().unwrap().contains("nobody"));
    assert_eq!(gateway.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: missing prompt or ids are a 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_prompt_returns_400() {
    let response = post_json(
        common::default_app(),
        "/api/v1/fusions",
        json!({"prompt": "   ", "characterId": "ninja-shadow", "fusionModeId": "group-photo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Prompt is required");
}

#[tokio::test]
async fn missing_ids_return_400() {
    let response = post_json(
        common::default_app(),
        "/api/v1/fusions",
        json!({"prompt": "hello"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: malformed bodies get the JSON error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn negative_credits_return_json_400() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));
    let response = post_json(
        app,
        "/api/v1/fusions",
        json!({
            "prompt": "hello",
            "characterId": "ninja-shadow",
            "fusionModeId": "group-photo",
            "userCredits": -1
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(gateway.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: gateway failure is a 502 carrying the gateway's message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gateway_failure_returns_502() {
    let gateway = StubGateway::failing(GatewayError::Rejected("No image generated".into()));
    let app = common::build_test_app(gateway, Arc::new(MemoryUploadStore::default()));

    let response = post_json(app, "/api/v1/fusions", fusion_body("ninja-shadow", "scene-integration")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No image generated");
    assert_eq!(json["creditsUsed"], 0);
    assert_eq!(json["characterName"], "Ninja Shadow");
    assert!(json.get("imageUrl").is_none());
}

// ---------------------------------------------------------------------------
// Test: an insufficient balance is refused before generation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insufficient_credits_returns_402() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));

    let mut body = fusion_body("dragon-summoner", "interactive-effects");
    body["userCredits"] = json!(3);
    let response = post_json(app, "/api/v1/fusions", body).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_CREDITS");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn sufficient_credits_proceed() {
    let gateway = StubGateway::succeeding();
    let app = common::build_test_app(gateway.clone(), Arc::new(MemoryUploadStore::default()));

    let mut body = fusion_body("dragon-summoner", "interactive-effects");
    body["userCredits"] = json!(5);
    let response = post_json(app, "/api/v1/fusions", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(gateway.call_count(), 1);
}
