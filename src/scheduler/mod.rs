//! Fixture generation: turns a roster of teams, fields and referees into a
//! multi-week schedule.
//!
//! Generation is pure and deterministic. For every week the [`pairer`] greedily
//! picks home/away pairs using the rules in [`scoring`], [`resources`] projects each
//! pair onto a field, a referee and a kickoff, and the resulting [`Schedule`] offers
//! per-week views. The heuristic is approximate: it does not guarantee that every
//! pair of teams meets before any pair meets twice.

pub mod pairer;
pub mod resources;
mod roster;
mod schedule;
pub mod scoring;
mod validation;

pub use self::resources::{Assignment, Kickoff, KickoffParseError};
pub use self::roster::{Field, Referee, Team};
pub use self::schedule::{Bye, Fixture, Match, Schedule, WeekFixtures};
pub use self::validation::{MAX_TEAMS, MAX_WEEKS, ScheduleError};

use self::pairer::{Pairing, WeekPool};

/// Build a `weeks`-long schedule for the given roster.
///
/// The roster is validated first and nothing is generated when it is rejected.
/// Identical inputs, in identical order, always produce the identical schedule.
pub fn generate(
    teams: &[Team],
    fields: &[Field],
    referees: &[Referee],
    weeks: u32,
) -> Result<Schedule, ScheduleError> {
    validation::validate(teams, fields, referees, weeks)?;

    let mut schedule = Schedule::default();
    for week in 1..=weeks {
        let mut pool = WeekPool::new(teams);
        let mut game_index = 0;

        loop {
            let slot = Kickoff::for_game(game_index, fields.len());
            let Some(Pairing { home, away }) = pool.next_pair(schedule.matches(), &slot) else {
                break;
            };

            let Assignment {
                field,
                referee,
                time,
            } = resources::assign(game_index, fields, referees);

            schedule.push_match(Match {
                week,
                home_team: home.name.clone(),
                away_team: away.name.clone(),
                field: field.name.clone(),
                referee: referee.name.clone(),
                time,
            });
            game_index += 1;
        }

        if let Some(team) = pool.into_bye() {
            schedule.push_bye(Bye {
                week,
                team: team.name.clone(),
            });
        }
    }

    Ok(schedule)
}
