mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::Engine;
use chorus_server::app;
use common::{body_json, test_state, TEST_KEY, TEST_SECRET};
use livekit_api::access_token::AccessToken;
use livekit_protocol::{Room, WebhookEvent};
use sha2::{Digest, Sha256};
use tower::ServiceExt; // for oneshot

/// Signs `body` the way LiveKit does for webhook delivery: a JWT whose
/// claims carry the base64 sha256 of the payload.
fn sign_body(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    let sha = base64::engine::general_purpose::STANDARD.encode(digest);
    AccessToken::with_api_key(TEST_KEY, TEST_SECRET)
        .with_sha256(&sha)
        .to_jwt()
        .expect("failed to sign webhook token")
}

fn room_started_body() -> String {
    let event = WebhookEvent {
        event: "room_started".to_owned(),
        room: Some(Room {
            name: "demo".to_owned(),
            ..Default::default()
        }),
        ..Default::default()
    };
    serde_json::to_string(&event).unwrap()
}

#[tokio::test]
async fn valid_signed_event_returns_200() {
    let app = app(test_state());
    let body = room_started_body();
    let auth = sign_body(&body);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhooks/livekit")
                .header(header::AUTHORIZATION, auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn missing_authorization_header_returns_401() {
    let app = app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhooks/livekit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(room_started_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_body_returns_400_with_opaque_error() {
    let app = app(test_state());
    let body = room_started_body();
    let auth = sign_body(&body);
    let tampered = body.replace("room_started", "room_finished");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhooks/livekit")
                .header(header::AUTHORIZATION, auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(tampered))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid webhook payload");
}

#[tokio::test]
async fn unrecognized_event_kind_still_returns_200() {
    let app = app(test_state());
    let event = WebhookEvent {
        event: "egress_started".to_owned(),
        ..Default::default()
    };
    let body = serde_json::to_string(&event).unwrap();
    let auth = sign_body(&body);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhooks/livekit")
                .header(header::AUTHORIZATION, auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
