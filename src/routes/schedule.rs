use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::schedule::{SchedulePreviewRequest, ScheduleResponse},
    error::AppError,
    services::schedule_service,
    state::SharedState,
};

/// Generate a schedule from an inline roster without storing it.
#[utoipa::path(
    post,
    path = "/schedule/preview",
    tag = "schedule",
    request_body = SchedulePreviewRequest,
    responses(
        (status = 200, description = "Generated schedule grouped by week", body = ScheduleResponse),
        (status = 400, description = "Roster or week count rejected by the scheduler")
    )
)]
pub async fn preview_schedule(
    State(state): State<SharedState>,
    Json(payload): Json<SchedulePreviewRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    Ok(Json(schedule_service::preview(&state, payload)?))
}

/// Configure the stateless scheduling subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/schedule/preview", post(preview_schedule))
}
