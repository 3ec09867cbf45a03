// ABOUTME: End-to-end tests for the REST API over a real HTTP listener
// ABOUTME: Covers authentication failures, CRUD round trips and the progress report
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use trailfit::auth::AuthManager;
use trailfit::config::{Environment, ServerConfig};
use trailfit::database::test_utils::create_test_db;
use trailfit::models::UpsertUser;
use trailfit::server::{FitnessServer, ServerResources};
use uuid::Uuid;

const TEST_SECRET: &[u8] = b"routes-test-secret";

struct TestApp {
    base_url: String,
    auth_manager: AuthManager,
    client: reqwest::Client,
}

impl TestApp {
    /// Start the full router on an ephemeral port backed by an in-memory database
    async fn spawn() -> Self {
        let database = create_test_db().await.unwrap();
        let auth_manager = AuthManager::new(TEST_SECRET, 1);
        let config = ServerConfig {
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            jwt_secret: String::from_utf8_lossy(TEST_SECRET).into_owned(),
            token_expiry_hours: 1,
            log_level: "warn".into(),
            environment: Environment::Testing,
        };

        let resources = Arc::new(ServerResources::new(
            database,
            auth_manager.clone(),
            Arc::new(config),
        ));
        let router = FitnessServer::new(resources).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            auth_manager,
            client: reqwest::Client::new(),
        }
    }

    fn token_for(&self, user_id: Uuid, email: &str) -> String {
        self.auth_manager
            .generate_token(&UpsertUser {
                id: user_id,
                email: email.to_owned(),
                first_name: Some("Route".into()),
                last_name: Some("Tester".into()),
                profile_image_url: None,
            })
            .unwrap()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    // Readiness round-trips the database, not just the process
    let response = app.client.get(app.url("/ready")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_api_rejects_missing_and_bad_tokens() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/workouts"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());

    let response = app
        .client
        .get(app.url("/api/workouts"))
        .header("authorization", "Bearer not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_auth_user_synced_from_token() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();
    let token = app.token_for(user_id, "sync@example.com");

    let response = app
        .client
        .get(app.url("/api/auth/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["email"], "sync@example.com");
    assert_eq!(body["first_name"], "Route");
}

#[tokio::test]
async fn test_fitness_profile_round_trip() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "profile@example.com");

    // No profile yet
    let response = app
        .client
        .get(app.url("/api/fitness-profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app
        .client
        .post(app.url("/api/fitness-profile"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "age": 28,
            "weight_kg": "70.5",
            "fitness_goal": "endurance"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["age"], 28);
    let profile_id = created["id"].as_str().unwrap().to_owned();

    // Partial update leaves unspecified fields intact
    let response = app
        .client
        .put(app.url(&format!("/api/fitness-profile/{profile_id}")))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "age": 29 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["age"], 29);
    assert_eq!(updated["weight_kg"], "70.5");
}

#[tokio::test]
async fn test_workout_lifecycle_over_http() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "workouts@example.com");

    // Empty name is rejected before any write
    let response = app
        .client
        .post(app.url("/api/workouts"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());

    let response = app
        .client
        .post(app.url("/api/workouts"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "name": "Morning run",
            "type": "cardio",
            "duration_minutes": 30
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let workout: serde_json::Value = response.json().await.unwrap();
    assert_eq!(workout["type"], "cardio");
    assert_eq!(workout["completed"], false);
    let workout_id = workout["id"].as_str().unwrap().to_owned();

    let response = app
        .client
        .patch(app.url(&format!("/api/workouts/{workout_id}/complete")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let completed: serde_json::Value = response.json().await.unwrap();
    assert_eq!(completed["completed"], true);

    let response = app
        .client
        .get(app.url("/api/workouts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listing: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listing.len(), 1);
}

#[tokio::test]
async fn test_completing_foreign_workout_is_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.token_for(Uuid::new_v4(), "owner@example.com");
    let intruder = app.token_for(Uuid::new_v4(), "intruder@example.com");

    let response = app
        .client
        .post(app.url("/api/workouts"))
        .bearer_auth(&owner)
        .json(&serde_json::json!({ "name": "Private session" }))
        .send()
        .await
        .unwrap();
    let workout: serde_json::Value = response.json().await.unwrap();
    let workout_id = workout["id"].as_str().unwrap().to_owned();

    let response = app
        .client
        .patch(app.url(&format!("/api/workouts/{workout_id}/complete")))
        .bearer_auth(&intruder)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_notifications_unread_flow() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "notify@example.com");

    let response = app
        .client
        .post(app.url("/api/notifications"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "type": "achievement",
            "title": "Nice work",
            "message": "You hit a streak"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let notification: serde_json::Value = response.json().await.unwrap();
    let id = notification["id"].as_str().unwrap().to_owned();

    let response = app
        .client
        .get(app.url("/api/notifications/unread"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let unread: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(unread.len(), 1);

    let response = app
        .client
        .patch(app.url(&format!("/api/notifications/{id}/read")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .client
        .get(app.url("/api/notifications/unread"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let unread: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(unread.is_empty());
}

#[tokio::test]
async fn test_progress_report_reflects_activity() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "progress@example.com");

    // Empty state: zeros everywhere, nothing unlocked
    let response = app
        .client
        .get(app.url("/api/progress"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let report: serde_json::Value = response.json().await.unwrap();
    assert_eq!(report["total_workouts"], 0);
    assert_eq!(report["total_steps"], 0);
    assert!(report["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["unlocked"] == false));

    for i in 0..5 {
        let response = app
            .client
            .post(app.url("/api/workouts"))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "name": format!("Session {i}") }))
            .send()
            .await
            .unwrap();
        let workout: serde_json::Value = response.json().await.unwrap();
        let id = workout["id"].as_str().unwrap().to_owned();
        app.client
            .patch(app.url(&format!("/api/workouts/{id}/complete")))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
    }

    let response = app
        .client
        .get(app.url("/api/progress"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let report: serde_json::Value = response.json().await.unwrap();
    assert_eq!(report["completed_workouts"], 5);
    let warrior = report["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "workout_warrior")
        .unwrap();
    assert_eq!(warrior["unlocked"], true);
    assert_eq!(report["weekly_activity"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request_with_json_body() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "badid@example.com");

    // Every 4xx carries the JSON envelope, path-parse failures included
    for path in [
        "/api/workouts/not-a-uuid/complete",
        "/api/notifications/not-a-uuid/read",
    ] {
        let response = app
            .client
            .patch(app.url(path))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/json"));
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    let response = app
        .client
        .put(app.url("/api/fitness-profile/not-a-uuid"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "age": 30 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4(), "badjson@example.com");

    let response = app
        .client
        .post(app.url("/api/workouts"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}
