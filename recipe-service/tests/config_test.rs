//! Configuration loading tests.
//!
//! These mutate process environment variables, so they live in their own test
//! binary and run as a single sequential test.

use recipe_service::config::RecipeConfig;

#[test]
fn api_key_is_required_and_must_be_non_empty() {
    std::env::remove_var("GOOGLE_API_KEY");
    assert!(RecipeConfig::load().is_err());

    std::env::set_var("GOOGLE_API_KEY", "");
    assert!(RecipeConfig::load().is_err());

    std::env::set_var("GOOGLE_API_KEY", "   ");
    assert!(RecipeConfig::load().is_err());

    std::env::set_var("GOOGLE_API_KEY", "test-api-key");
    let config = RecipeConfig::load().expect("load should succeed with the key set");

    assert_eq!(config.models.vision_model, "gemini-2.0-flash");
    assert_eq!(
        config.security.allowed_origins,
        vec!["http://localhost:5173", "http://127.0.0.1:5173"]
    );
}
