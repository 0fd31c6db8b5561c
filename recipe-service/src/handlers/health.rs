use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn root_status() -> impl IntoResponse {
    Json(json!({
        "status": "SnapDish backend is running!"
    }))
}
