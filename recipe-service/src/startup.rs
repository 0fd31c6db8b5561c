use crate::config::RecipeConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiVisionProvider};
use crate::services::providers::VisionProvider;
use crate::services::RecipeGenerator;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state. Immutable once built; cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: RecipeConfig,
    pub generator: RecipeGenerator,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.vision_model.clone(),
        };
        let provider: Arc<dyn VisionProvider> = Arc::new(GeminiVisionProvider::new(gemini_config));

        tracing::info!(
            model = %config.models.vision_model,
            "Initialized Gemini vision provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build with an explicit provider; the test suite uses this to inject a
    /// mock.
    pub async fn build_with_provider(
        config: RecipeConfig,
        provider: Arc<dyn VisionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            generator: RecipeGenerator::new(provider),
        };

        // Credentials are allowed, so wildcard origins/methods/headers are
        // off the table; everything is an explicit list.
        let cors = CorsLayer::new()
            .allow_origin(
                config
                    .security
                    .allowed_origins
                    .iter()
                    .filter_map(|origin| match origin.parse::<HeaderValue>() {
                        Ok(value) => Some(value),
                        Err(e) => {
                            tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                            None
                        }
                    })
                    .collect::<Vec<HeaderValue>>(),
            )
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        let app = Router::new()
            .route("/", get(handlers::root_status))
            .route("/api/generate-recipe", post(handlers::generate_recipe))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
