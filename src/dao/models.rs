use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// League record persisted by the storage layer, scoped to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueEntity {
    /// Primary key of the league.
    pub id: Uuid,
    /// Identity of the user the league belongs to.
    pub owner_id: Uuid,
    /// Display name of the league.
    pub name: String,
    /// Free-form description, empty when not provided.
    pub description: String,
    /// Roster the schedule is generated from.
    pub settings: LeagueSettingsEntity,
    /// Last saved schedule, in generation order.
    pub schedule: Vec<GameEntity>,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last time the league was updated.
    pub updated_at: SystemTime,
}

/// Roster and season bounds of a league. Pools hold names only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueSettingsEntity {
    pub teams: Vec<String>,
    pub fields: Vec<String>,
    pub referees: Vec<String>,
    /// First day of the season; week 1 is played on this date.
    pub start_date: Option<SystemTime>,
    pub end_date: Option<SystemTime>,
}

/// A scheduled game as stored with its league.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Identifier minted when the game was saved.
    pub game_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub field: String,
    pub referee: Option<String>,
    /// Concrete kickoff instant.
    pub date_time: SystemTime,
}

impl LeagueEntity {
    /// Fresh league with an empty roster and schedule.
    pub fn new(owner_id: Uuid, name: String, description: String) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description,
            settings: LeagueSettingsEntity::default(),
            schedule: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
