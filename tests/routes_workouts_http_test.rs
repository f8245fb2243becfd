// ABOUTME: HTTP integration tests for the workout routes
// ABOUTME: Exercises CRUD, validation, metrics computation, statistics, and progress over the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn create_workout(app: &axum::Router, token: &str, body: &Value) -> Value {
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(token)
        .json(body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_list_requires_token() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/workouts").send(app).await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/workouts")
        .bearer("not-a-jwt")
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

// ============================================================================
// Create / read / update / delete
// ============================================================================

#[tokio::test]
async fn test_create_computes_metrics() {
    let (_, app, user_id, token) = common::setup_app().await;

    let workout = create_workout(&app, &token, &common::sample_workout_body()).await;

    assert_eq!(workout["userId"], user_id.to_string());
    assert_eq!(workout["name"], "Push Day");
    assert_eq!(workout["metrics"]["totalVolume"], 1360.0);
    assert_eq!(workout["metrics"]["totalSets"], 3);
    assert_eq!(workout["metrics"]["totalReps"], 23);
    assert_eq!(workout["metrics"]["maxWeight"], 70.0);
    assert_eq!(workout["metrics"]["averageRPE"], 8.0);
    assert_eq!(workout["exercises"][0]["totalVolume"], 1160.0);
    assert_eq!(workout["exercises"][1]["averageRPE"], Value::Null);
}

#[tokio::test]
async fn test_rep_totals_past_u32_survive_storage() {
    let (_, app, _, token) = common::setup_app().await;
    let body = json!({
        "name": "High Rep Day",
        "exercises": [{
            "name": "Jump Rope",
            "category": "cardio",
            "sets": [
                { "reps": u32::MAX, "weight": 0 },
                { "reps": 1, "weight": 0 }
            ]
        }]
    });

    let workout = create_workout(&app, &token, &body).await;
    assert_eq!(workout["metrics"]["totalReps"], u64::from(u32::MAX) + 1);

    let id = workout["id"].as_str().unwrap();
    let response = AxumTestRequest::get(&format!("/api/workouts/{id}"))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let fetched: Value = response.json();
    assert_eq!(fetched["metrics"]["totalReps"], u64::from(u32::MAX) + 1);
    assert_eq!(fetched["metrics"]["totalSets"], 2);
}

#[tokio::test]
async fn test_client_supplied_metrics_are_ignored() {
    let (_, app, _, token) = common::setup_app().await;
    let mut body = common::sample_workout_body();
    body["metrics"] = json!({ "totalVolume": 999_999 });
    body["exercises"][0]["totalVolume"] = json!(1);

    let workout = create_workout(&app, &token, &body).await;
    assert_eq!(workout["metrics"]["totalVolume"], 1360.0);
    assert_eq!(workout["exercises"][0]["totalVolume"], 1160.0);
}

#[tokio::test]
async fn test_blank_name_defaults_to_workout() {
    let (_, app, _, token) = common::setup_app().await;
    let mut body = common::sample_workout_body();
    body["name"] = json!("   ");

    let workout = create_workout(&app, &token, &body).await;
    assert_eq!(workout["name"], "Workout");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (_, app, _, token) = common::setup_app().await;

    let cases = [
        ("/exercises/0/sets/0/reps", json!(0)),
        ("/exercises/0/sets/0/weight", json!(-5)),
        ("/exercises/0/sets/0/rpe", json!(11)),
        ("/exercises/0/category", json!("neck")),
        ("/exercises/0/name", json!("")),
        ("/name", json!("x".repeat(101))),
    ];

    for (pointer, value) in cases {
        let mut body = common::sample_workout_body();
        *body.pointer_mut(pointer).unwrap() = value;

        let response = AxumTestRequest::post("/api/workouts")
            .bearer(&token)
            .json(&body)
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 400, "expected 400 for {pointer}");
    }

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&token)
        .json(&json!({ "name": "No exercises" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_get_is_scoped_to_owner() {
    let (resources, app, _, token) = common::setup_app().await;
    let workout = create_workout(&app, &token, &common::sample_workout_body()).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let response = AxumTestRequest::get(&uri).bearer(&token).send(app.clone()).await;
    assert_eq!(response.status(), 200);

    let other = common::token_for(&resources, uuid::Uuid::new_v4());
    let response = AxumTestRequest::get(&uri).bearer(&other).send(app.clone()).await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::get("/api/workouts/not-a-uuid")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_update_recomputes_metrics() {
    let (_, app, _, token) = common::setup_app().await;
    let workout = create_workout(&app, &token, &common::sample_workout_body()).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let update = json!({
        "notes": "Felt strong",
        "exercises": [
            { "name": "Bench Press", "category": "chest", "sets": [ { "reps": 3, "weight": 100 } ] }
        ]
    });
    let response = AxumTestRequest::put(&uri)
        .bearer(&token)
        .json(&update)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let updated: Value = response.json();
    assert_eq!(updated["name"], "Push Day");
    assert_eq!(updated["notes"], "Felt strong");
    assert_eq!(updated["metrics"]["totalVolume"], 300.0);
    assert_eq!(updated["metrics"]["maxWeight"], 100.0);
    assert_eq!(updated["metrics"]["averageRPE"], Value::Null);

    let response = AxumTestRequest::get(&uri).bearer(&token).send(app).await;
    let stored: Value = response.json();
    assert_eq!(stored["metrics"]["totalSets"], 1);
}

#[tokio::test]
async fn test_delete_workout() {
    let (_, app, _, token) = common::setup_app().await;
    let workout = create_workout(&app, &token, &common::sample_workout_body()).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let response = AxumTestRequest::delete(&uri).bearer(&token).send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Workout deleted successfully");

    let response = AxumTestRequest::delete(&uri).bearer(&token).send(app).await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Listing, statistics, progress
// ============================================================================

#[tokio::test]
async fn test_list_with_pagination() {
    let (_, app, _, token) = common::setup_app().await;
    for _ in 0..3 {
        create_workout(&app, &token, &common::sample_workout_body()).await;
    }

    let response = AxumTestRequest::get("/api/workouts?page=2&limit=2&sortBy=createdAt&sortOrder=asc")
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);

    let response = AxumTestRequest::get("/api/workouts?sortBy=password")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_stats_overview() {
    let (_, app, _, token) = common::setup_app().await;
    let mut body = common::sample_workout_body();
    body["date"] = json!(chrono::Utc::now().to_rfc3339());
    create_workout(&app, &token, &body).await;

    let response = AxumTestRequest::get("/api/workouts/stats/overview?period=7d")
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let stats: Value = response.json();
    assert_eq!(stats["totalWorkouts"], 1);
    assert_eq!(stats["totalVolume"], 1360.0);
    assert_eq!(stats["totalReps"], 23);
    assert_eq!(stats["avgDuration"], 60.0);
    assert_eq!(stats["avgRPE"], 8.0);
    assert_eq!(stats["maxWeight"], 70.0);

    let (_, fresh_app, _, fresh_token) = common::setup_app().await;
    let response = AxumTestRequest::get("/api/workouts/stats/overview")
        .bearer(&fresh_token)
        .send(fresh_app)
        .await;
    let stats: Value = response.json();
    assert_eq!(stats["totalWorkouts"], 0);
    assert_eq!(stats["maxWeight"], 0.0);
}

#[tokio::test]
async fn test_exercise_progress() {
    let (_, app, _, token) = common::setup_app().await;
    let now = chrono::Utc::now();
    for (days_ago, weight) in [(3, 60), (1, 65)] {
        let body = json!({
            "date": (now - chrono::Duration::days(days_ago)).to_rfc3339(),
            "exercises": [
                { "name": "Bench Press", "category": "chest", "sets": [ { "reps": 5, "weight": weight } ] }
            ]
        });
        create_workout(&app, &token, &body).await;
    }

    let response = AxumTestRequest::get("/api/workouts/progress/bench%20PRESS")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let points: Vec<Value> = response.json();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["maxWeight"], 60.0);
    assert_eq!(points[1]["volume"], 325.0);
    assert_eq!(points[1]["exercise"], "Bench Press");
}
