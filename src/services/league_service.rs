//! Business logic behind the league routes. Every operation is scoped to the
//! calling owner: a league owned by someone else is reported as missing.

use std::time::SystemTime;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, LeagueEntity, LeagueSettingsEntity},
    dto::{
        league::{
            ActionResponse, CreateLeagueRequest, LeagueResponse, LeagueScheduleResponse,
            UpdateLeagueRequest,
        },
        schedule::{GenerateScheduleRequest, PersistedWeekDto, ScheduleResponse},
    },
    error::ServiceError,
    services::schedule_service,
    state::SharedState,
};

async fn load_league(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<LeagueEntity, ServiceError> {
    let store = state.require_league_store().await?;
    store
        .find_league(owner_id, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("league `{id}` not found")))
}

async fn save_league(state: &SharedState, league: &LeagueEntity) -> Result<(), ServiceError> {
    let store = state.require_league_store().await?;
    store.save_league(league.clone()).await?;
    Ok(())
}

/// Return the caller's leagues, newest first.
pub async fn list_leagues(
    state: &SharedState,
    owner_id: Uuid,
) -> Result<Vec<LeagueResponse>, ServiceError> {
    let store = state.require_league_store().await?;
    let leagues = store.list_leagues(owner_id).await?;
    Ok(leagues.into_iter().map(LeagueResponse::from).collect())
}

/// Return one league of the caller.
pub async fn get_league(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<LeagueResponse, ServiceError> {
    Ok(load_league(state, owner_id, id).await?.into())
}

/// Create a league for the caller with an empty schedule.
pub async fn create_league(
    state: &SharedState,
    owner_id: Uuid,
    payload: CreateLeagueRequest,
) -> Result<LeagueResponse, ServiceError> {
    let settings = LeagueSettingsEntity::try_from(payload.settings)?;
    let mut league = LeagueEntity::new(owner_id, payload.name.trim().to_owned(), payload.description);
    league.settings = settings;

    save_league(state, &league).await?;
    info!(league_id = %league.id, %owner_id, "league created");
    Ok(league.into())
}

/// Apply a partial update to a league of the caller.
pub async fn update_league(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
    payload: UpdateLeagueRequest,
) -> Result<LeagueResponse, ServiceError> {
    let mut league = load_league(state, owner_id, id).await?;

    if let Some(name) = payload.name {
        league.name = name.trim().to_owned();
    }
    if let Some(description) = payload.description {
        league.description = description;
    }
    if let Some(settings) = payload.settings {
        league.settings = LeagueSettingsEntity::try_from(settings)?;
    }
    if let Some(schedule) = payload.schedule {
        league.schedule = schedule
            .into_iter()
            .map(GameEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
    }
    league.updated_at = SystemTime::now();

    save_league(state, &league).await?;
    debug!(league_id = %id, "league updated");
    Ok(league.into())
}

/// Delete a league of the caller.
pub async fn delete_league(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<ActionResponse, ServiceError> {
    let store = state.require_league_store().await?;
    if !store.delete_league(owner_id, id).await? {
        return Err(ServiceError::NotFound(format!("league `{id}` not found")));
    }

    info!(league_id = %id, %owner_id, "league deleted");
    Ok(ActionResponse::new("League deleted successfully"))
}

/// Generate a schedule from the league's stored roster and replace its saved schedule.
pub async fn generate_schedule(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
    payload: GenerateScheduleRequest,
) -> Result<LeagueScheduleResponse, ServiceError> {
    let mut league = load_league(state, owner_id, id).await?;
    let weeks = payload.weeks.unwrap_or(state.config().default_weeks());

    let schedule = schedule_service::generate_for_settings(&league.settings, weeks)?;
    let now = SystemTime::now();
    league.schedule = schedule_service::to_games(&schedule, league.settings.start_date, now);
    league.updated_at = now;

    save_league(state, &league).await?;
    info!(
        league_id = %id,
        weeks,
        games = league.schedule.len(),
        "league schedule generated"
    );

    Ok(LeagueScheduleResponse {
        league: league.into(),
        schedule: ScheduleResponse::from(&schedule),
    })
}

/// Return the league's saved games grouped into weeks.
pub async fn schedule_weeks(
    state: &SharedState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Vec<PersistedWeekDto>, ServiceError> {
    let league = load_league(state, owner_id, id).await?;
    let team_count = league.settings.teams.len();
    Ok(schedule_service::regroup_games(league.schedule, team_count))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::league_store::memory::MemoryLeagueStore,
        dto::league::LeagueSettingsDto, state::AppState,
    };

    async fn ready_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .set_league_store(Arc::new(MemoryLeagueStore::new()))
            .await;
        state
    }

    fn create_request(teams: &[&str]) -> CreateLeagueRequest {
        CreateLeagueRequest {
            name: "  Metro  ".into(),
            description: "weeknights".into(),
            settings: LeagueSettingsDto {
                teams: teams.iter().map(|team| team.to_string()).collect(),
                fields: vec!["North".into()],
                referees: vec!["Ada".into()],
                start_date: Some("2024-06-03T00:00:00Z".into()),
                end_date: None,
            },
        }
    }

    #[tokio::test]
    async fn crud_is_scoped_to_owner() {
        let state = ready_state().await;
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let created = create_league(&state, owner, create_request(&["A", "B"]))
            .await
            .unwrap();
        assert_eq!(created.name, "Metro");
        assert!(created.schedule.is_empty());

        assert_eq!(list_leagues(&state, owner).await.unwrap().len(), 1);
        assert!(list_leagues(&state, stranger).await.unwrap().is_empty());
        assert!(matches!(
            get_league(&state, stranger, created.id).await,
            Err(ServiceError::NotFound(_))
        ));

        let updated = update_league(
            &state,
            owner,
            created.id,
            UpdateLeagueRequest {
                description: Some("sundays".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Metro");
        assert_eq!(updated.description, "sundays");

        assert!(matches!(
            delete_league(&state, stranger, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        let ack = delete_league(&state, owner, created.id).await.unwrap();
        assert_eq!(ack.message, "League deleted successfully");
        assert!(get_league(&state, owner, created.id).await.is_err());
    }

    #[tokio::test]
    async fn generated_schedule_is_saved_and_regrouped() {
        let state = ready_state().await;
        let owner = Uuid::new_v4();
        let created = create_league(&state, owner, create_request(&["A", "B", "C", "D"]))
            .await
            .unwrap();

        let generated = generate_schedule(
            &state,
            owner,
            created.id,
            GenerateScheduleRequest { weeks: Some(3) },
        )
        .await
        .unwrap();
        assert_eq!(generated.schedule.week_numbers, vec![1, 2, 3]);
        assert_eq!(generated.league.schedule.len(), 6);
        assert_eq!(generated.league.schedule[0].date_time, "2024-06-03T18:00:00Z");

        let stored = get_league(&state, owner, created.id).await.unwrap();
        assert_eq!(stored.schedule.len(), 6);

        let weeks = schedule_weeks(&state, owner, created.id).await.unwrap();
        assert_eq!(weeks.len(), 3);
        for (week, generated_week) in weeks.iter().zip(&generated.schedule.weeks) {
            assert_eq!(week.games.len(), generated_week.matches.len());
            assert_eq!(week.games[0].home_team, generated_week.matches[0].home_team);
        }
    }

    #[tokio::test]
    async fn generation_uses_configured_default_weeks() {
        let state = ready_state().await;
        let owner = Uuid::new_v4();
        let created = create_league(&state, owner, create_request(&["A", "B"]))
            .await
            .unwrap();

        let generated = generate_schedule(&state, owner, created.id, GenerateScheduleRequest::default())
            .await
            .unwrap();
        assert_eq!(
            generated.schedule.week_numbers.len() as u32,
            state.config().default_weeks()
        );
    }

    #[tokio::test]
    async fn invalid_roster_leaves_saved_schedule_untouched() {
        let state = ready_state().await;
        let owner = Uuid::new_v4();
        let created = create_league(&state, owner, create_request(&["A"]))
            .await
            .unwrap();

        let err = generate_schedule(
            &state,
            owner,
            created.id,
            GenerateScheduleRequest { weeks: Some(2) },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(message) if message == "need at least 2 teams"));
        assert!(get_league(&state, owner, created.id).await.unwrap().schedule.is_empty());
    }

    #[tokio::test]
    async fn degraded_state_rejects_league_operations() {
        let state = AppState::new(AppConfig::default());
        assert!(matches!(
            list_leagues(&state, Uuid::new_v4()).await,
            Err(ServiceError::Degraded)
        ));
    }
}
