//! Store health endpoint

use everylog_infrastructure::AppContext;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, get};
use tracing::warn;

use crate::constants::{HEALTH_STATUS_DEGRADED, HEALTH_STATUS_OK};
use crate::models::HealthResponse;

/// `GET /health` - 200 when the store answers, 503 otherwise
#[get("/health")]
pub async fn health(context: &State<AppContext>) -> (Status, Json<HealthResponse>) {
    let store = context.store();
    let provider = store.provider_name().to_string();

    let healthy = match tokio::task::spawn_blocking(move || store.health_check()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(provider = %provider, error = %e, "Store health check failed");
            false
        }
        Err(e) => {
            warn!(provider = %provider, error = %e, "Store health check task failed");
            false
        }
    };

    let (status, label) = if healthy {
        (Status::Ok, HEALTH_STATUS_OK)
    } else {
        (Status::ServiceUnavailable, HEALTH_STATUS_DEGRADED)
    };
    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            provider,
        }),
    )
}
