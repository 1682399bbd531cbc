//! DTOs describing generated schedules.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::league::GameDto,
    scheduler::{Match, Schedule, WeekFixtures},
};

/// Inline roster used to preview a schedule without storing anything.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreviewRequest {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub referees: Vec<String>,
    /// Number of weeks to generate; the configured default applies when omitted.
    pub weeks: Option<u32>,
}

/// Options for generating the schedule of a stored league.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScheduleRequest {
    /// Number of weeks to generate; the configured default applies when omitted.
    pub weeks: Option<u32>,
}

/// A generated match with its resources.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub field: String,
    pub referee: String,
    /// Kickoff as `HH:00`.
    pub time: String,
}

/// One week of a generated schedule.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekDto {
    pub week: u32,
    pub matches: Vec<MatchDto>,
    /// Team sitting the week out when the roster is odd.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bye: Option<String>,
}

/// Generated schedule grouped by week.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub week_numbers: Vec<u32>,
    pub total_matches: usize,
    pub weeks: Vec<WeekDto>,
}

/// Stored games regrouped into weeks.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWeekDto {
    pub week: u32,
    pub games: Vec<GameDto>,
}

impl From<&Match> for MatchDto {
    fn from(m: &Match) -> Self {
        Self {
            week: m.week,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            field: m.field.clone(),
            referee: m.referee.clone(),
            time: m.time.to_string(),
        }
    }
}

impl From<&WeekFixtures> for WeekDto {
    fn from(week: &WeekFixtures) -> Self {
        Self {
            week: week.week,
            matches: week.matches().map(MatchDto::from).collect(),
            bye: week.bye().map(|bye| bye.team.clone()),
        }
    }
}

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            week_numbers: schedule.week_numbers(),
            total_matches: schedule.len(),
            weeks: schedule.weeks().iter().map(WeekDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{self, Field, Referee, Team};

    #[test]
    fn schedule_response_groups_matches_and_byes() {
        let teams = ["A", "B", "C"].map(Team::new);
        let schedule = scheduler::generate(
            &teams,
            &[Field::new("North")],
            &[Referee::new("Ada")],
            2,
        )
        .unwrap();

        let response = ScheduleResponse::from(&schedule);
        assert_eq!(response.week_numbers, vec![1, 2]);
        assert_eq!(response.total_matches, 2);
        assert_eq!(response.weeks.len(), 2);
        for week in &response.weeks {
            assert_eq!(week.matches.len(), 1);
            assert_eq!(week.matches[0].time, "18:00");
            assert!(week.bye.is_some());
        }

        let json = serde_json::to_value(&response.weeks[0]).unwrap();
        assert_eq!(json["matches"][0]["homeTeam"], "A");
        assert_eq!(json["bye"], "C");
    }
}
