use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::dao::models::{GameEntity, LeagueEntity, LeagueSettingsEntity};

/// Identifiers are stored as hyphenated strings so filters never depend on the
/// driver's UUID representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoLeagueDocument {
    #[serde(rename = "_id")]
    id: String,
    owner_id: String,
    name: String,
    #[serde(default)]
    description: String,
    settings: MongoSettingsDocument,
    #[serde(default)]
    schedule: Vec<MongoGameDocument>,
    created_at: DateTime,
    updated_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MongoSettingsDocument {
    #[serde(default)]
    teams: Vec<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    referees: Vec<String>,
    start_date: Option<DateTime>,
    end_date: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MongoGameDocument {
    game_id: String,
    home_team: String,
    away_team: String,
    field: String,
    referee: Option<String>,
    date_time: DateTime,
}

impl From<LeagueEntity> for MongoLeagueDocument {
    fn from(value: LeagueEntity) -> Self {
        Self {
            id: value.id.to_string(),
            owner_id: value.owner_id.to_string(),
            name: value.name,
            description: value.description,
            settings: value.settings.into(),
            schedule: value.schedule.into_iter().map(Into::into).collect(),
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<LeagueSettingsEntity> for MongoSettingsDocument {
    fn from(value: LeagueSettingsEntity) -> Self {
        Self {
            teams: value.teams,
            fields: value.fields,
            referees: value.referees,
            start_date: value.start_date.map(DateTime::from_system_time),
            end_date: value.end_date.map(DateTime::from_system_time),
        }
    }
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            game_id: value.game_id.to_string(),
            home_team: value.home_team,
            away_team: value.away_team,
            field: value.field,
            referee: value.referee,
            date_time: DateTime::from_system_time(value.date_time),
        }
    }
}

impl TryFrom<MongoLeagueDocument> for LeagueEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoLeagueDocument) -> Result<Self, Self::Error> {
        let id = parse_id(&value.id, &value.id)?;
        let owner_id = parse_id(&value.id, &value.owner_id)?;
        let schedule = value
            .schedule
            .into_iter()
            .map(|game| {
                Ok(GameEntity {
                    game_id: parse_id(&value.id, &game.game_id)?,
                    home_team: game.home_team,
                    away_team: game.away_team,
                    field: game.field,
                    referee: game.referee,
                    date_time: game.date_time.to_system_time(),
                })
            })
            .collect::<Result<Vec<_>, MongoDaoError>>()?;

        Ok(Self {
            id,
            owner_id,
            name: value.name,
            description: value.description,
            settings: LeagueSettingsEntity {
                teams: value.settings.teams,
                fields: value.settings.fields,
                referees: value.settings.referees,
                start_date: value.settings.start_date.map(DateTime::to_system_time),
                end_date: value.settings.end_date.map(DateTime::to_system_time),
            },
            schedule,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        })
    }
}

fn parse_id(document_id: &str, raw: &str) -> Result<Uuid, MongoDaoError> {
    Uuid::parse_str(raw).map_err(|source| MongoDaoError::CorruptedDocument {
        id: document_id.to_owned(),
        source,
    })
}

/// Filter matching one league of one owner.
pub fn owned_league(owner_id: Uuid, id: Uuid) -> Document {
    doc! {"_id": id.to_string(), "owner_id": owner_id.to_string()}
}

/// Filter matching every league of one owner.
pub fn owned_by(owner_id: Uuid) -> Document {
    doc! {"owner_id": owner_id.to_string()}
}

/// Filter matching a league by primary key.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    fn sample() -> LeagueEntity {
        let mut league = LeagueEntity::new(Uuid::new_v4(), "Metro".into(), "weeknights".into());
        // BSON dates are millisecond precision.
        league.created_at = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
        league.updated_at = league.created_at;
        league.settings.teams = vec!["A".into(), "B".into()];
        league.schedule.push(GameEntity {
            game_id: Uuid::new_v4(),
            home_team: "A".into(),
            away_team: "B".into(),
            field: "North".into(),
            referee: Some("Ada".into()),
            date_time: league.created_at,
        });
        league
    }

    #[test]
    fn document_conversion_keeps_entity_intact() {
        let league = sample();
        let document = MongoLeagueDocument::from(league.clone());
        assert_eq!(LeagueEntity::try_from(document).unwrap(), league);
    }

    #[test]
    fn invalid_identifier_is_reported_as_corruption() {
        let mut document = MongoLeagueDocument::from(sample());
        document.owner_id = "not-a-uuid".into();
        let err = LeagueEntity::try_from(document).unwrap_err();
        assert!(matches!(err, MongoDaoError::CorruptedDocument { .. }));
    }
}
