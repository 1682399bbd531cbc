use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the league store is usable while logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.require_league_store().await {
        Ok(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage health check failed");
            }
        }
        Err(_) => warn!("storage unavailable (degraded mode)"),
    }

    if state.is_degraded() {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
