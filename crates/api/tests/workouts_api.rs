//! HTTP-level integration tests for the workout history, stats and weight
//! suggestion endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

fn push_day(date: &str, bench_kg: f64) -> Value {
    json!({
        "name": "Push A",
        "type": "push",
        "date": date,
        "muscle_groups": ["chest", "triceps"],
        "exercises": [
            {"name": "Bench Press", "sets": 4, "reps": 8, "weight_kg": bench_kg},
            {"name": "Dips", "sets": 3, "reps": 12, "weight_kg": "bodyweight"}
        ]
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_get_workout(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/workouts",
        push_day("2026-03-02", 70.0),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let key = created["data"]["key"].as_str().unwrap().to_string();
    assert!(key.starts_with("2026-03-02-push-"));

    let by_id = body_json(get(build_test_app(pool.clone()), &format!("/api/v1/workouts/{id}")).await).await;
    assert_eq!(by_id["data"]["name"], "Push A");
    assert_eq!(by_id["data"]["exercises"].as_array().unwrap().len(), 2);

    let response = get(build_test_app(pool), &format!("/api/v1/workouts/{key}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"].as_i64(), Some(id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_empty_name(pool: SqlitePool) {
    let mut body = push_day("2026-03-02", 70.0);
    body["name"] = json!("");

    let response = post_json(build_test_app(pool), "/api/v1/workouts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_oversized_sets(pool: SqlitePool) {
    let mut body = push_day("2026-03-02", 70.0);
    body["exercises"][0]["sets"] = json!(u32::MAX);

    let response = post_json(build_test_app(pool.clone()), "/api/v1/workouts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut body = push_day("2026-03-02", 70.0);
    body["exercises"][1]["reps"] = json!([12, u32::MAX]);
    let response = post_json(build_test_app(pool.clone()), "/api/v1/workouts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(get(build_test_app(pool), "/api/v1/workouts").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_workout_returns_404(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/v1/workouts/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_replace_and_delete_workout(pool: SqlitePool) {
    let created = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/workouts",
            push_day("2026-03-02", 70.0),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut changed = push_day("2026-03-02", 75.0);
    changed["name"] = json!("Push A (heavy)");
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/workouts/{id}"),
        changed,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Push A (heavy)");

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/workouts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/workouts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filters_by_type_and_date(pool: SqlitePool) {
    for (date, kind) in [("2026-03-02", "push"), ("2026-03-04", "legs"), ("2026-03-06", "push")] {
        let mut body = push_day(date, 70.0);
        body["type"] = json!(kind);
        post_json(build_test_app(pool.clone()), "/api/v1/workouts", body).await;
    }

    let all = body_json(get(build_test_app(pool.clone()), "/api/v1/workouts").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let push = body_json(get(build_test_app(pool.clone()), "/api/v1/workouts?type=push").await).await;
    assert_eq!(push["data"].as_array().unwrap().len(), 2);

    let ranged = body_json(
        get(
            build_test_app(pool),
            "/api/v1/workouts?from=2026-03-03&to=2026-03-05",
        )
        .await,
    )
    .await;
    let items = ranged["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "legs");
}

// ---------------------------------------------------------------------------
// Stats and suggestions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_general_stats(pool: SqlitePool) {
    post_json(build_test_app(pool.clone()), "/api/v1/workouts", push_day("2026-03-02", 70.0)).await;
    post_json(build_test_app(pool.clone()), "/api/v1/workouts", push_day("2026-03-04", 72.5)).await;

    let json = body_json(get(build_test_app(pool), "/api/v1/stats").await).await;
    let stats = &json["data"];
    assert_eq!(stats["total_workouts"], 2);
    assert_eq!(stats["days_trained"], 2);
    assert_eq!(stats["unique_exercises"], 2);
    assert_eq!(stats["by_type"]["push"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weight_suggestion_uses_most_recent_match(pool: SqlitePool) {
    post_json(build_test_app(pool.clone()), "/api/v1/workouts", push_day("2026-03-02", 70.0)).await;
    post_json(build_test_app(pool.clone()), "/api/v1/workouts", push_day("2026-03-09", 75.0)).await;

    let json = body_json(
        get(
            build_test_app(pool),
            "/api/v1/weights/suggest?exercise=Bench%20Press&groups=chest",
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["suggestion"].as_f64(), Some(75.0));
    assert!(!json["data"]["matches"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weight_suggestion_without_history_is_adjust(pool: SqlitePool) {
    let json = body_json(
        get(build_test_app(pool), "/api/v1/weights/suggest?exercise=Squat").await,
    )
    .await;
    assert_eq!(json["data"]["suggestion"], "adjust");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weight_suggestion_requires_exercise(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/v1/weights/suggest?exercise=%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
