use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the league fixtures backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::schedule::preview_schedule,
        crate::routes::leagues::list_leagues,
        crate::routes::leagues::create_league,
        crate::routes::leagues::get_league,
        crate::routes::leagues::update_league,
        crate::routes::leagues::delete_league,
        crate::routes::leagues::generate_schedule,
        crate::routes::leagues::schedule_weeks,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::schedule::SchedulePreviewRequest,
            crate::dto::schedule::GenerateScheduleRequest,
            crate::dto::schedule::ScheduleResponse,
            crate::dto::schedule::WeekDto,
            crate::dto::schedule::MatchDto,
            crate::dto::schedule::PersistedWeekDto,
            crate::dto::league::CreateLeagueRequest,
            crate::dto::league::UpdateLeagueRequest,
            crate::dto::league::LeagueSettingsDto,
            crate::dto::league::GameInput,
            crate::dto::league::GameDto,
            crate::dto::league::LeagueResponse,
            crate::dto::league::LeagueScheduleResponse,
            crate::dto::league::ActionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "schedule", description = "Stateless schedule generation"),
        (name = "leagues", description = "League management scoped to the calling owner"),
    )
)]
pub struct ApiDoc;
