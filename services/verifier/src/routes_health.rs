use axum::Json;

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Fake News Detector API is running."
    }))
}
