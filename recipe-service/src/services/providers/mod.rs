//! Vision-model provider abstraction.
//!
//! This module provides a trait-based seam between the recipe generator and
//! the upstream model, allowing easy swapping between backends (Gemini, mock).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// An image attached to a generation request: raw bytes plus the MIME type
/// declared by the uploader.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Trait for prompt-plus-image text generation providers (e.g., Gemini).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Generate a text response for the prompt and image.
    async fn generate(&self, prompt: &str, image: &ImagePart) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
