//! Integration tests for the root status endpoint.
//!
//! Run with: cargo test -p recipe-service --test health_check

use recipe_service::config::RecipeConfig;
use recipe_service::services::providers::mock::MockVisionProvider;
use recipe_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("GOOGLE_API_KEY", "test-api-key");

    let config = RecipeConfig::load().expect("Failed to load config");
    let app =
        Application::build_with_provider(config, Arc::new(MockVisionProvider::replying("unused")))
            .await
            .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn root_status_returns_running_message() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "SnapDish backend is running!");
}
