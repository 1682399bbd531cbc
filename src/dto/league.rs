//! DTO definitions used by the league REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{GameEntity, LeagueEntity, LeagueSettingsEntity},
    dto::{
        format_system_time, parse_timestamp,
        schedule::ScheduleResponse,
        validation::{validate_name_list, validate_not_blank},
    },
    error::ServiceError,
};

/// Roster pools and season bounds of a league.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettingsDto {
    #[serde(default)]
    #[validate(custom(function = "validate_name_list"))]
    pub teams: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_name_list"))]
    pub fields: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_name_list"))]
    pub referees: Vec<String>,
    /// RFC 3339 timestamp of the first match day. Week 1 is played on this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// RFC 3339 timestamp of the last match day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Payload creating a new league for the calling owner.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub settings: LeagueSettingsDto,
}

/// Partial update of a league. Omitted members are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeagueRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub settings: Option<LeagueSettingsDto>,
    /// Replaces the stored schedule wholesale.
    pub schedule: Option<Vec<GameInput>>,
}

impl Validate for UpdateLeagueRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(ref name) = self.name {
            if let Err(e) = validate_not_blank(name) {
                errors.add("name", e);
            }
        }

        if let Some(ref settings) = self.settings {
            if let Err(settings_errors) = settings.validate() {
                errors.merge_self("settings", Err(settings_errors));
            }
        }

        if let Some(ref games) = self.schedule {
            for game in games {
                if let Err(game_errors) = game.validate() {
                    errors.merge_self("schedule", Err(game_errors));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Game supplied by a client when editing a schedule by hand.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    /// Existing identifier to keep; a new one is minted when omitted.
    pub game_id: Option<Uuid>,
    #[validate(custom(function = "validate_not_blank"))]
    pub home_team: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub away_team: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub field: String,
    pub referee: Option<String>,
    /// RFC 3339 kickoff instant.
    pub date_time: String,
}

/// Persisted game as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub game_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub field: String,
    pub referee: Option<String>,
    pub date_time: String,
}

/// Full projection of a league owned by the caller.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub settings: LeagueSettingsDto,
    pub schedule: Vec<GameDto>,
    pub created_at: String,
    pub updated_at: String,
}

/// League together with the schedule that was just generated and saved for it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueScheduleResponse {
    pub league: LeagueResponse,
    pub schedule: ScheduleResponse,
}

/// Generic acknowledgement returned by mutation endpoints without a body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<GameEntity> for GameDto {
    fn from(game: GameEntity) -> Self {
        Self {
            game_id: game.game_id,
            home_team: game.home_team,
            away_team: game.away_team,
            field: game.field,
            referee: game.referee,
            date_time: format_system_time(game.date_time),
        }
    }
}

impl From<LeagueSettingsEntity> for LeagueSettingsDto {
    fn from(settings: LeagueSettingsEntity) -> Self {
        Self {
            teams: settings.teams,
            fields: settings.fields,
            referees: settings.referees,
            start_date: settings.start_date.map(format_system_time),
            end_date: settings.end_date.map(format_system_time),
        }
    }
}

impl From<LeagueEntity> for LeagueResponse {
    fn from(league: LeagueEntity) -> Self {
        Self {
            id: league.id,
            name: league.name,
            description: league.description,
            settings: league.settings.into(),
            schedule: league.schedule.into_iter().map(GameDto::from).collect(),
            created_at: format_system_time(league.created_at),
            updated_at: format_system_time(league.updated_at),
        }
    }
}

impl TryFrom<LeagueSettingsDto> for LeagueSettingsEntity {
    type Error = ServiceError;

    fn try_from(dto: LeagueSettingsDto) -> Result<Self, Self::Error> {
        let start_date = dto
            .start_date
            .as_deref()
            .map(|raw| parse_date("startDate", raw))
            .transpose()?;
        let end_date = dto
            .end_date
            .as_deref()
            .map(|raw| parse_date("endDate", raw))
            .transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ServiceError::InvalidInput(
                    "endDate must not be before startDate".into(),
                ));
            }
        }

        Ok(Self {
            teams: dto.teams,
            fields: dto.fields,
            referees: dto.referees,
            start_date,
            end_date,
        })
    }
}

impl TryFrom<GameInput> for GameEntity {
    type Error = ServiceError;

    fn try_from(input: GameInput) -> Result<Self, Self::Error> {
        if input.home_team == input.away_team {
            return Err(ServiceError::InvalidInput(format!(
                "team `{}` cannot play itself",
                input.home_team
            )));
        }

        Ok(Self {
            game_id: input.game_id.unwrap_or_else(Uuid::new_v4),
            date_time: parse_date("dateTime", &input.date_time)?,
            home_team: input.home_team,
            away_team: input.away_team,
            field: input.field,
            referee: input.referee,
        })
    }
}

fn parse_date(member: &str, raw: &str) -> Result<std::time::SystemTime, ServiceError> {
    parse_timestamp(raw).map_err(|err| {
        ServiceError::InvalidInput(format!("{member} is not an RFC 3339 timestamp: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(teams: &[&str]) -> LeagueSettingsDto {
        LeagueSettingsDto {
            teams: teams.iter().map(|team| team.to_string()).collect(),
            fields: vec!["North".into()],
            referees: vec!["Ada".into()],
            ..Default::default()
        }
    }

    #[test]
    fn create_request_rejects_blank_names() {
        let request = CreateLeagueRequest {
            name: " ".into(),
            description: String::new(),
            settings: settings(&["A", "B"]),
        };
        assert!(request.validate().is_err());

        let request = CreateLeagueRequest {
            name: "Metro".into(),
            description: String::new(),
            settings: settings(&["A", ""]),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("settings"));
    }

    #[test]
    fn create_request_accepts_empty_roster() {
        let request: CreateLeagueRequest =
            serde_json::from_str(r#"{"name":"Metro"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.settings.teams.is_empty());
    }

    #[test]
    fn update_request_validates_present_members_only() {
        assert!(UpdateLeagueRequest::default().validate().is_ok());

        let request: UpdateLeagueRequest = serde_json::from_str(
            r#"{"settings":{"teams":["A","  "]},"schedule":[{"homeTeam":"A","awayTeam":"","field":"North","dateTime":"2024-06-01T18:00:00Z"}]}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("settings"));
        assert!(errors.errors().contains_key("schedule"));
    }

    #[test]
    fn settings_dates_are_parsed_and_ordered() {
        let mut dto = settings(&["A", "B"]);
        dto.start_date = Some("2024-06-01T00:00:00Z".into());
        dto.end_date = Some("2024-08-31T00:00:00Z".into());
        let entity = LeagueSettingsEntity::try_from(dto.clone()).unwrap();
        assert!(entity.start_date < entity.end_date);
        assert_eq!(
            LeagueSettingsDto::from(entity).start_date.as_deref(),
            Some("2024-06-01T00:00:00Z")
        );

        dto.end_date = Some("2024-05-01T00:00:00Z".into());
        assert!(matches!(
            LeagueSettingsEntity::try_from(dto),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn game_input_keeps_or_mints_identifier() {
        let input = GameInput {
            game_id: None,
            home_team: "A".into(),
            away_team: "B".into(),
            field: "North".into(),
            referee: None,
            date_time: "2024-06-01T18:00:00Z".into(),
        };
        let minted = GameEntity::try_from(input.clone()).unwrap();

        let kept = GameEntity::try_from(GameInput {
            game_id: Some(minted.game_id),
            ..input.clone()
        })
        .unwrap();
        assert_eq!(kept.game_id, minted.game_id);

        let self_match = GameInput {
            away_team: "A".into(),
            ..input
        };
        assert!(GameEntity::try_from(self_match).is_err());
    }
}
