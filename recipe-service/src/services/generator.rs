use crate::services::providers::{ImagePart, ProviderError, VisionProvider};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

/// Errors from the recipe generation pipeline.
///
/// Variants are typed internally but collapse to two user-visible classes at
/// the HTTP boundary: `InvalidImage` is a 400, everything else a 500.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("File provided is not an image.")]
    InvalidImage,

    #[error("failed to decode image: {0}")]
    DecodeFailure(#[from] image::ImageError),

    #[error(transparent)]
    UpstreamFailure(#[from] ProviderError),
}

impl From<RecipeError> for AppError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::InvalidImage => {
                AppError::BadRequest(anyhow::anyhow!("File provided is not an image."))
            }
            other => AppError::InternalError(anyhow::anyhow!("An error occurred: {}", other)),
        }
    }
}

/// Turns a validated upload into a single model call and returns its text.
#[derive(Clone)]
pub struct RecipeGenerator {
    provider: Arc<dyn VisionProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Generate a recipe for the uploaded image bytes.
    ///
    /// The declared media type must start with `image/`; the provider is not
    /// invoked otherwise. The bytes must decode as an image, but the original
    /// bytes (not a re-encode) are what is sent upstream.
    pub async fn generate(
        &self,
        preference: &str,
        data: &[u8],
        mime_type: &str,
    ) -> Result<String, RecipeError> {
        if !mime_type.starts_with("image/") {
            return Err(RecipeError::InvalidImage);
        }

        // Decode up front so an unreadable upload fails here instead of as an
        // opaque upstream rejection.
        let decoded = image::load_from_memory(data)?;
        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Decoded uploaded image"
        );

        let prompt = build_prompt(preference);
        let image_part = ImagePart {
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
        };

        let recipe = self.provider.generate(&prompt, &image_part).await?;
        Ok(recipe)
    }
}

fn build_prompt(preference: &str) -> String {
    format!(
        "You are a creative chef. Based on the ingredients in this image and the user's \
         preference for '{}' food, generate a recipe. The recipe should include:\n\
         1. A catchy title.\n\
         2. A list of ingredients.\n\
         3. Step-by-step instructions.\n\
         Format the response clearly.",
        preference
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockVisionProvider;

    // 1x1 RGBA PNG.
    const TEST_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    fn test_png() -> Vec<u8> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(TEST_PNG_BASE64)
            .unwrap()
    }

    #[test]
    fn prompt_contains_preference_and_instructions() {
        let prompt = build_prompt("vegan");
        assert!(prompt.contains("'vegan'"));
        assert!(prompt.contains("creative chef"));
        assert!(prompt.contains("A catchy title."));
        assert!(prompt.contains("A list of ingredients."));
        assert!(prompt.contains("Step-by-step instructions."));
    }

    #[tokio::test]
    async fn non_image_media_type_skips_the_provider() {
        let provider = Arc::new(MockVisionProvider::replying("unused"));
        let generator = RecipeGenerator::new(provider.clone());

        let result = generator.generate("any", &test_png(), "text/plain").await;

        assert!(matches!(result, Err(RecipeError::InvalidImage)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn undecodable_bytes_fail_before_the_provider() {
        let provider = Arc::new(MockVisionProvider::replying("unused"));
        let generator = RecipeGenerator::new(provider.clone());

        let result = generator.generate("any", &[0u8; 64], "image/png").await;

        assert!(matches!(result, Err(RecipeError::DecodeFailure(_))));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn valid_image_returns_provider_text_verbatim() {
        let provider = Arc::new(MockVisionProvider::replying("Tomato Soup"));
        let generator = RecipeGenerator::new(provider.clone());

        let recipe = generator
            .generate("vegetarian", &test_png(), "image/png")
            .await
            .unwrap();

        assert_eq!(recipe, "Tomato Soup");
        assert_eq!(provider.calls(), 1);
        assert!(provider.last_prompt().unwrap().contains("'vegetarian'"));
    }
}
