// ABOUTME: HTTP integration tests for the recovery routes
// ABOUTME: Exercises scoring on save, workout ownership, listing, recommendations, and feedback
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

async fn create_workout_id(app: &axum::Router, token: &str) -> String {
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(token)
        .json(&common::sample_workout_body())
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let workout: Value = response.json();
    workout["id"].as_str().unwrap().to_owned()
}

async fn create_recovery(app: &axum::Router, token: &str, body: &Value) -> Value {
    let response = AxumTestRequest::post("/api/recovery")
        .bearer(token)
        .json(body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()
}

fn healthy_factors() -> Value {
    json!({
        "sleep": { "hours": 8, "quality": 8 },
        "nutrition": { "quality": 8, "hydration": 8 },
        "stress": { "level": 3 },
        "activity": { "stepCount": 9000, "cardioMinutes": 20 }
    })
}

#[tokio::test]
async fn test_create_scores_factors() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;

    let record = create_recovery(
        &app,
        &token,
        &json!({
            "workoutId": workout_id,
            "factors": { "sleep": { "quality": 10 }, "stress": { "level": 1 } }
        }),
    )
    .await;

    assert_eq!(record["recoveryScore"], 10);
    assert_eq!(record["readinessScore"], 10);
    assert_eq!(record["workoutId"], workout_id);
}

#[tokio::test]
async fn test_create_without_factors_is_neutral() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;

    let record = create_recovery(&app, &token, &json!({ "workoutId": workout_id })).await;
    assert_eq!(record["recoveryScore"], 50);
    assert_eq!(record["readinessScore"], 50);
}

#[tokio::test]
async fn test_create_requires_owned_workout() {
    let (resources, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;

    let other = common::token_for(&resources, uuid::Uuid::new_v4());
    let response = AxumTestRequest::post("/api/recovery")
        .bearer(&other)
        .json(&json!({ "workoutId": workout_id }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Workout not found");

    let response = AxumTestRequest::post("/api/recovery")
        .bearer(&token)
        .json(&json!({ "factors": healthy_factors() }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_create_validates_ranges() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;

    let cases = [
        json!({ "sleep": { "hours": 25 } }),
        json!({ "sleep": { "quality": 0 } }),
        json!({ "nutrition": { "hydration": 11 } }),
        json!({ "stress": { "level": 12 } }),
    ];
    for factors in cases {
        let response = AxumTestRequest::post("/api/recovery")
            .bearer(&token)
            .json(&json!({ "workoutId": workout_id, "factors": factors }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 400, "expected 400 for {factors}");
    }
}

#[tokio::test]
async fn test_update_rescores() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;
    let record = create_recovery(&app, &token, &json!({ "workoutId": workout_id })).await;
    let uri = format!("/api/recovery/{}", record["id"].as_str().unwrap());

    let response = AxumTestRequest::put(&uri)
        .bearer(&token)
        .json(&json!({ "factors": { "sleep": { "quality": 10 }, "stress": { "level": 1 } } }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["recoveryScore"], 10);
    assert_eq!(updated["workoutId"], workout_id);

    let response = AxumTestRequest::put(&format!("/api/recovery/{}", uuid::Uuid::new_v4()))
        .bearer(&token)
        .json(&json!({}))
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Recovery entry not found");
}

#[tokio::test]
async fn test_list_includes_workout_summary() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;
    for date in ["2025-03-01", "2025-03-05", "2025-03-09"] {
        create_recovery(
            &app,
            &token,
            &json!({ "workoutId": workout_id, "date": date, "factors": healthy_factors() }),
        )
        .await;
    }

    let response = AxumTestRequest::get("/api/recovery?startDate=2025-03-02&limit=10")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    let recoveries = body["recoveries"].as_array().unwrap();
    assert_eq!(recoveries.len(), 2);
    assert!(recoveries[0]["date"].as_str().unwrap().starts_with("2025-03-09"));
    assert_eq!(recoveries[0]["workout"]["name"], "Push Day");
    assert_eq!(body["pagination"]["totalItems"], 2);
}

#[tokio::test]
async fn test_recommendations_without_history() {
    let (_, app, _, token) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/recovery/recommendations")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["recommendations"]["suggestedRecoveryTime"], 60);
    assert_eq!(body["recommendations"]["intensityModifier"], 1.0);
    assert_eq!(
        body["recommendations"]["focusAreas"],
        json!(["sleep", "sleep_quality", "nutrition", "hydration", "activity"])
    );
    assert_eq!(body["averageFactors"]["sleep"]["hours"], 0.0);
    assert_eq!(body["recentWorkouts"], 0);
    assert_eq!(body["recentRecoveries"], 0);
}

#[tokio::test]
async fn test_recommendations_follow_latest_records() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;
    create_recovery(
        &app,
        &token,
        &json!({ "workoutId": workout_id, "factors": healthy_factors() }),
    )
    .await;

    let response = AxumTestRequest::get("/api/recovery/recommendations")
        .bearer(&token)
        .send(app.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["recommendations"]["focusAreas"], json!([]));
    assert_eq!(body["recommendations"]["suggestedRecoveryTime"], 48);
    assert_eq!(body["recentWorkouts"], 1);
    assert_eq!(body["recentRecoveries"], 1);

    let mut stressed = healthy_factors();
    stressed["stress"]["level"] = json!(10);
    create_recovery(
        &app,
        &token,
        &json!({ "workoutId": workout_id, "factors": stressed }),
    )
    .await;

    let response = AxumTestRequest::get("/api/recovery/recommendations")
        .bearer(&token)
        .send(app)
        .await;
    let body: Value = response.json();
    assert_eq!(body["averageFactors"]["stress"]["level"], 6.5);
    assert_eq!(body["recommendations"]["focusAreas"], json!([]));
}

#[tokio::test]
async fn test_feedback_submission() {
    let (_, app, _, token) = common::setup_app().await;
    let workout_id = create_workout_id(&app, &token).await;
    let record = create_recovery(
        &app,
        &token,
        &json!({ "workoutId": workout_id, "factors": healthy_factors() }),
    )
    .await;
    let uri = format!("/api/recovery/{}/feedback", record["id"].as_str().unwrap());

    let response = AxumTestRequest::post(&uri)
        .bearer(&token)
        .json(&json!({ "accuracy": 4, "helpfulness": 5, "comments": "Useful" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Feedback submitted successfully");
    assert_eq!(body["recovery"]["feedback"]["accuracy"], 4);
    assert_eq!(body["recovery"]["recoveryScore"], record["recoveryScore"]);

    let response = AxumTestRequest::post(&uri)
        .bearer(&token)
        .json(&json!({ "accuracy": 6, "helpfulness": 5 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post(&uri)
        .bearer(&token)
        .json(&json!({ "accuracy": 3, "helpfulness": 3, "comments": "x".repeat(501) }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}
