use crate::dtos::RecipeResponse;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// `POST /api/generate-recipe`
///
/// Multipart form fields: `preference` (optional, defaults to "any") and
/// `image` (required file part).
pub async fn generate_recipe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut preference = String::from("any");
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("preference") => {
                preference = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!(
                        "Failed to read preference field: {}",
                        e
                    ))
                })?;
            }
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;

                image = Some((data.to_vec(), mime_type));
            }
            _ => {}
        }
    }

    let (data, mime_type) =
        image.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No image file uploaded.")))?;

    tracing::info!(
        preference = %preference,
        mime_type = %mime_type,
        size = data.len(),
        "Recipe generation requested"
    );

    let recipe = state
        .generator
        .generate(&preference, &data, &mime_type)
        .await?;

    Ok(Json(RecipeResponse { recipe }))
}
