//! Bridges the pure scheduler and the league records: builds rosters from stored
//! names, stamps generated matches with concrete instants and regroups stored games
//! into weeks.

use std::time::SystemTime;

use time::{Duration, OffsetDateTime, Time};
use tracing::debug;
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, LeagueSettingsEntity},
    dto::{
        league::GameDto,
        schedule::{PersistedWeekDto, ScheduleResponse, SchedulePreviewRequest},
    },
    error::ServiceError,
    scheduler::{self, Field, Match, Referee, Schedule, Team},
    state::SharedState,
};

/// Generate a schedule from an inline roster without touching storage.
pub fn preview(
    state: &SharedState,
    request: SchedulePreviewRequest,
) -> Result<ScheduleResponse, ServiceError> {
    let weeks = request.weeks.unwrap_or(state.config().default_weeks());
    let schedule = generate_from_names(&request.teams, &request.fields, &request.referees, weeks)?;
    Ok(ScheduleResponse::from(&schedule))
}

/// Generate a schedule for the roster stored in a league's settings.
pub fn generate_for_settings(
    settings: &LeagueSettingsEntity,
    weeks: u32,
) -> Result<Schedule, ServiceError> {
    generate_from_names(&settings.teams, &settings.fields, &settings.referees, weeks)
}

fn generate_from_names(
    teams: &[String],
    fields: &[String],
    referees: &[String],
    weeks: u32,
) -> Result<Schedule, ServiceError> {
    let teams = teams.iter().map(Team::new).collect::<Vec<_>>();
    let fields = fields.iter().map(Field::new).collect::<Vec<_>>();
    let referees = referees.iter().map(Referee::new).collect::<Vec<_>>();

    let schedule = scheduler::generate(&teams, &fields, &referees, weeks)?;
    debug!(
        teams = teams.len(),
        fields = fields.len(),
        referees = referees.len(),
        weeks,
        matches = schedule.len(),
        byes = schedule.byes().len(),
        "schedule generated"
    );
    Ok(schedule)
}

/// Turn generated matches into storable games, minting a fresh id for each.
///
/// With a season start date, a match of week `w` kicking off at hour `h` is placed on
/// the start day (UTC) plus `w - 1` weeks and `h` hours, so hours past 23 roll into
/// the next day. Without one, every game is stamped with `generated_at`.
pub fn to_games(
    schedule: &Schedule,
    start_date: Option<SystemTime>,
    generated_at: SystemTime,
) -> Vec<GameEntity> {
    schedule
        .matches()
        .iter()
        .map(|m| GameEntity {
            game_id: Uuid::new_v4(),
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            field: m.field.clone(),
            referee: Some(m.referee.clone()),
            date_time: kickoff_instant(m, start_date).unwrap_or(generated_at),
        })
        .collect()
}

fn kickoff_instant(m: &Match, start_date: Option<SystemTime>) -> Option<SystemTime> {
    let season_start = OffsetDateTime::from(start_date?).replace_time(Time::MIDNIGHT);
    let offset = Duration::weeks(i64::from(m.week.saturating_sub(1)))
        + Duration::hours(i64::from(m.time.hour()));
    Some(SystemTime::from(season_start.saturating_add(offset)))
}

/// Regroup stored games into weeks by position.
///
/// Each week is assumed to hold `team_count / 2` games (at least one), which only
/// matches the generated layout while the stored order is the generation order.
pub fn regroup_games(games: Vec<GameEntity>, team_count: usize) -> Vec<PersistedWeekDto> {
    let per_week = (team_count / 2).max(1);
    let mut weeks: Vec<PersistedWeekDto> = Vec::new();

    for (position, game) in games.into_iter().enumerate() {
        let week = (position / per_week) as u32 + 1;
        match weeks.last_mut() {
            Some(current) if current.week == week => current.games.push(GameDto::from(game)),
            _ => weeks.push(PersistedWeekDto {
                week,
                games: vec![GameDto::from(game)],
            }),
        }
    }

    weeks
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| name.to_string()).collect()
    }

    fn settings(teams: &[&str], fields: &[&str]) -> LeagueSettingsEntity {
        LeagueSettingsEntity {
            teams: names(teams),
            fields: names(fields),
            referees: names(&["Ada"]),
            ..Default::default()
        }
    }

    #[test]
    fn scheduler_errors_surface_as_invalid_input() {
        let err = generate_for_settings(&settings(&["A"], &["North"]), 2).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(message) if message == "need at least 2 teams"));

        let err = generate_for_settings(&settings(&["A", "B"], &[]), 2).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(message) if message == "need at least 1 field"));
    }

    #[test]
    fn games_are_stamped_from_the_season_start() {
        let schedule = generate_for_settings(&settings(&["A", "B", "C", "D"], &["North"]), 2).unwrap();
        // Mid-afternoon start: the time of day is dropped.
        let start = SystemTime::from(datetime!(2024-06-03 15:30 UTC));
        let games = to_games(&schedule, Some(start), SystemTime::UNIX_EPOCH);

        let stamps = games
            .iter()
            .map(|game| OffsetDateTime::from(game.date_time))
            .collect::<Vec<_>>();
        assert_eq!(
            stamps,
            vec![
                datetime!(2024-06-03 18:00 UTC),
                datetime!(2024-06-03 19:00 UTC),
                datetime!(2024-06-10 18:00 UTC),
                datetime!(2024-06-10 19:00 UTC),
            ]
        );
        assert!(games.iter().all(|game| game.referee.as_deref() == Some("Ada")));
        assert_ne!(games[0].game_id, games[1].game_id);
    }

    #[test]
    fn late_kickoffs_roll_into_the_next_day() {
        let teams = (0..16).map(|i| format!("T{i}")).collect::<Vec<_>>();
        let settings = LeagueSettingsEntity {
            teams,
            fields: names(&["North"]),
            referees: names(&["Ada"]),
            ..Default::default()
        };
        let schedule = generate_for_settings(&settings, 1).unwrap();
        let start = SystemTime::from(datetime!(2024-06-03 0:00 UTC));
        let games = to_games(&schedule, Some(start), SystemTime::UNIX_EPOCH);

        assert_eq!(schedule.matches()[7].time.to_string(), "25:00");
        assert_eq!(
            OffsetDateTime::from(games[7].date_time),
            datetime!(2024-06-04 1:00 UTC)
        );
    }

    #[test]
    fn games_without_start_date_use_generation_instant() {
        let schedule = generate_for_settings(&settings(&["A", "B"], &["North"]), 3).unwrap();
        let generated_at = SystemTime::from(datetime!(2024-01-01 12:00 UTC));
        let games = to_games(&schedule, None, generated_at);
        assert_eq!(games.len(), 3);
        assert!(games.iter().all(|game| game.date_time == generated_at));
    }

    #[test]
    fn stored_games_regroup_by_position() {
        let schedule = generate_for_settings(&settings(&["A", "B", "C", "D", "E"], &["North"]), 3).unwrap();
        let games = to_games(&schedule, None, SystemTime::UNIX_EPOCH);
        let weeks = regroup_games(games, 5);

        assert_eq!(weeks.iter().map(|week| week.week).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(weeks.iter().all(|week| week.games.len() == 2));
        assert_eq!(weeks[1].games[0].home_team, schedule.matches_for_week(2)[0].home_team);
    }

    #[test]
    fn regrouping_tolerates_tiny_rosters() {
        let game = |home: &str| GameEntity {
            game_id: Uuid::new_v4(),
            home_team: home.into(),
            away_team: "X".into(),
            field: "North".into(),
            referee: None,
            date_time: SystemTime::UNIX_EPOCH,
        };
        let weeks = regroup_games(vec![game("A"), game("B")], 0);
        assert_eq!(weeks.len(), 2);
        assert!(regroup_games(Vec::new(), 4).is_empty());
    }
}
