//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use trener_ai::AiError;
use trener_api::error::AppError;
use trener_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Workout",
        id: "42".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Workout with id 42 not found");
}

#[tokio::test]
async fn missing_singleton_returns_404() {
    let (status, json) =
        error_to_response(CoreError::Missing("No active workout".into()).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No active workout");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("name: must not be empty".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) =
        error_to_response(CoreError::Conflict("already in progress".into()).into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "already in progress");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let (status, json) =
        error_to_response(CoreError::Internal("disk on fire".into()).into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn ai_error_returns_502() {
    let (status, json) = error_to_response(AiError::EmptyResponse.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "AI_ERROR");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(sqlx::Error::RowNotFound.into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
