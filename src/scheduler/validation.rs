use std::collections::HashSet;

use thiserror::Error;

use super::roster::{Field, Referee, Team};

/// Longest season a single request may generate.
pub const MAX_WEEKS: u32 = 52;
/// Largest roster a single request may schedule.
pub const MAX_TEAMS: usize = 32;

/// Roster problems that prevent a schedule from being generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("need at least 2 teams")]
    NotEnoughTeams,
    #[error("need at least 1 field")]
    NoFields,
    #[error("need at least 1 referee")]
    NoReferees,
    #[error("need at least 1 week")]
    NoWeeks,
    #[error("at most {} teams can be scheduled", MAX_TEAMS)]
    TooManyTeams,
    #[error("at most {} weeks can be generated", MAX_WEEKS)]
    TooManyWeeks,
    /// A name in the given pool is empty or whitespace.
    #[error("{pool} names must not be blank")]
    BlankName { pool: &'static str },
    #[error("duplicate team name `{0}`")]
    DuplicateTeam(String),
}

/// Check the roster before any pairing happens. Checks run in a fixed order so the
/// caller always sees the same first problem.
pub(super) fn validate(
    teams: &[Team],
    fields: &[Field],
    referees: &[Referee],
    weeks: u32,
) -> Result<(), ScheduleError> {
    if teams.len() < 2 {
        return Err(ScheduleError::NotEnoughTeams);
    }
    if fields.is_empty() {
        return Err(ScheduleError::NoFields);
    }
    if referees.is_empty() {
        return Err(ScheduleError::NoReferees);
    }
    if weeks < 1 {
        return Err(ScheduleError::NoWeeks);
    }
    if teams.len() > MAX_TEAMS {
        return Err(ScheduleError::TooManyTeams);
    }
    if weeks > MAX_WEEKS {
        return Err(ScheduleError::TooManyWeeks);
    }

    if teams.iter().any(|team| is_blank(&team.name)) {
        return Err(ScheduleError::BlankName { pool: "team" });
    }
    if fields.iter().any(|field| is_blank(&field.name)) {
        return Err(ScheduleError::BlankName { pool: "field" });
    }
    if referees.iter().any(|referee| is_blank(&referee.name)) {
        return Err(ScheduleError::BlankName { pool: "referee" });
    }

    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(ScheduleError::DuplicateTeam(team.name.clone()));
        }
    }

    Ok(())
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}
