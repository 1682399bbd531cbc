use axum::{
    Extension, Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        league::{
            ActionResponse, CreateLeagueRequest, LeagueResponse, LeagueScheduleResponse,
            UpdateLeagueRequest,
        },
        schedule::{GenerateScheduleRequest, PersistedWeekDto},
    },
    error::AppError,
    services::league_service,
    state::SharedState,
};

const OWNER_ID_HEADER: &str = "x-owner-id";

/// Identity of the caller, resolved from the `X-Owner-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct OwnerId(pub Uuid);

/// League management endpoints, all scoped to the calling owner.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leagues", get(list_leagues).post(create_league))
        .route(
            "/leagues/{id}",
            get(get_league).put(update_league).delete(delete_league),
        )
        .route("/leagues/{id}/schedule", post(generate_schedule))
        .route("/leagues/{id}/schedule/weeks", get(schedule_weeks))
        .route_layer(middleware::from_fn(require_owner))
}

/// List the caller's leagues, newest first.
#[utoipa::path(
    get,
    path = "/leagues",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner")),
    responses((status = 200, description = "Leagues of the caller", body = [LeagueResponse]))
)]
pub async fn list_leagues(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    Ok(Json(league_service::list_leagues(&state, owner_id).await?))
}

/// Create a league for the caller.
#[utoipa::path(
    post,
    path = "/leagues",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner")),
    request_body = CreateLeagueRequest,
    responses(
        (status = 201, description = "League created", body = LeagueResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_league(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Json(payload): Json<CreateLeagueRequest>,
) -> Result<(StatusCode, Json<LeagueResponse>), AppError> {
    payload.validate()?;
    let league = league_service::create_league(&state, owner_id, payload).await?;
    Ok((StatusCode::CREATED, Json(league)))
}

/// Retrieve one league of the caller.
#[utoipa::path(
    get,
    path = "/leagues/{id}",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner"),
    ("id" = String, Path, description = "Identifier of the league")),
    responses(
        (status = 200, description = "League", body = LeagueResponse),
        (status = 404, description = "No such league for this owner")
    )
)]
pub async fn get_league(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeagueResponse>, AppError> {
    Ok(Json(league_service::get_league(&state, owner_id, id).await?))
}

/// Update the name, description, settings or schedule of a league.
#[utoipa::path(
    put,
    path = "/leagues/{id}",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner"),
    ("id" = String, Path, description = "Identifier of the league")),
    request_body = UpdateLeagueRequest,
    responses(
        (status = 200, description = "League updated", body = LeagueResponse),
        (status = 404, description = "No such league for this owner")
    )
)]
pub async fn update_league(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeagueRequest>,
) -> Result<Json<LeagueResponse>, AppError> {
    payload.validate()?;
    Ok(Json(
        league_service::update_league(&state, owner_id, id, payload).await?,
    ))
}

/// Delete a league of the caller.
#[utoipa::path(
    delete,
    path = "/leagues/{id}",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner"),
    ("id" = String, Path, description = "Identifier of the league")),
    responses(
        (status = 200, description = "League deleted", body = ActionResponse),
        (status = 404, description = "No such league for this owner")
    )
)]
pub async fn delete_league(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, AppError> {
    Ok(Json(league_service::delete_league(&state, owner_id, id).await?))
}

/// Generate a schedule from the league's roster and save it.
#[utoipa::path(
    post,
    path = "/leagues/{id}/schedule",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner"),
    ("id" = String, Path, description = "Identifier of the league")),
    request_body = GenerateScheduleRequest,
    responses(
        (status = 200, description = "Schedule generated and saved", body = LeagueScheduleResponse),
        (status = 400, description = "Roster or week count rejected by the scheduler"),
        (status = 404, description = "No such league for this owner")
    )
)]
pub async fn generate_schedule(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateScheduleRequest>,
) -> Result<Json<LeagueScheduleResponse>, AppError> {
    Ok(Json(
        league_service::generate_schedule(&state, owner_id, id, payload).await?,
    ))
}

/// Return the saved schedule grouped into weeks.
#[utoipa::path(
    get,
    path = "/leagues/{id}/schedule/weeks",
    tag = "leagues",
    params(("X-Owner-Id" = String, Header, description = "UUID of the calling owner"),
    ("id" = String, Path, description = "Identifier of the league")),
    responses(
        (status = 200, description = "Saved games grouped by week", body = [PersistedWeekDto]),
        (status = 404, description = "No such league for this owner")
    )
)]
pub async fn schedule_weeks(
    State(state): State<SharedState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PersistedWeekDto>>, AppError> {
    Ok(Json(
        league_service::schedule_weeks(&state, owner_id, id).await?,
    ))
}

async fn require_owner(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let raw = req
        .headers()
        .get(OWNER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing owner header `X-Owner-Id`".into()))?;

    let owner_id = Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Unauthorized("`X-Owner-Id` must be a UUID".into()))?;

    req.extensions_mut().insert(OwnerId(owner_id));
    Ok(next.run(req).await)
}
