use crate::model::health::HealthResponse;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use registry::AppRegistry;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Meeting room booking backend is running",
        timestamp: Utc::now(),
    })
}

pub async fn health_check_store(State(registry): State<AppRegistry>) -> StatusCode {
    if registry.health_check_repository().check_store().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
