//! Positional projection of a week's matches onto fields, referees and kickoff times.
//!
//! There is no collision detection here: game `g` of a week plays on
//! `fields[g % fields.len()]`, is refereed by `referees[g % referees.len()]` and kicks
//! off one hour later for every full rotation of the field pool, starting at 18:00.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::roster::{Field, Referee};

/// Hour of the first kickoff of every week.
pub const FIRST_KICKOFF_HOUR: u32 = 18;

/// Whole-hour kickoff rendered as `HH:00`.
///
/// The hour is not wrapped at midnight: a week long enough to run past 23:00 yields
/// `24:00`, `25:00`, ... and it is up to the caller to roll those into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Kickoff {
    hour: u32,
}

impl Kickoff {
    /// Kickoff at the given hour of the day.
    pub const fn at(hour: u32) -> Self {
        Self { hour }
    }

    /// Kickoff used by the `game_index`-th match of a week played over `field_count` fields.
    pub fn for_game(game_index: usize, field_count: usize) -> Self {
        debug_assert!(field_count > 0, "field pool must not be empty");
        let rotation = (game_index / field_count) as u32;
        Self::at(FIRST_KICKOFF_HOUR + rotation)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl fmt::Display for Kickoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.hour)
    }
}

/// Error returned when a string is not a whole-hour `HH:00` kickoff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid kickoff `{0}`: expected a whole hour such as `18:00`")]
pub struct KickoffParseError(String);

impl FromStr for Kickoff {
    type Err = KickoffParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || KickoffParseError(value.to_owned());
        let (hour, minutes) = value.split_once(':').ok_or_else(invalid)?;
        if minutes != "00" || hour.is_empty() {
            return Err(invalid());
        }
        let hour = hour.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::at(hour))
    }
}

impl TryFrom<String> for Kickoff {
    type Error = KickoffParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Kickoff> for String {
    fn from(value: Kickoff) -> Self {
        value.to_string()
    }
}

/// Resources picked for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub field: &'a Field,
    pub referee: &'a Referee,
    pub time: Kickoff,
}

/// Pick the field, referee and kickoff of the `game_index`-th match of a week.
///
/// Both pools must be non-empty; [`super::generate`] validates this before calling.
pub fn assign<'a>(game_index: usize, fields: &'a [Field], referees: &'a [Referee]) -> Assignment<'a> {
    Assignment {
        field: &fields[game_index % fields.len()],
        referee: &referees[game_index % referees.len()],
        time: Kickoff::for_game(game_index, fields.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<Field> {
        names.iter().map(|name| Field::new(*name)).collect()
    }

    fn referees(names: &[&str]) -> Vec<Referee> {
        names.iter().map(|name| Referee::new(*name)).collect()
    }

    #[test]
    fn kickoff_steps_one_hour_per_field_rotation() {
        assert_eq!(Kickoff::for_game(0, 2).to_string(), "18:00");
        assert_eq!(Kickoff::for_game(1, 2).to_string(), "18:00");
        assert_eq!(Kickoff::for_game(2, 2).to_string(), "19:00");
        assert_eq!(Kickoff::for_game(5, 2).to_string(), "20:00");
        assert_eq!(Kickoff::for_game(3, 1).to_string(), "21:00");
    }

    #[test]
    fn kickoff_does_not_wrap_past_midnight() {
        assert_eq!(Kickoff::for_game(6, 1).to_string(), "24:00");
        assert_eq!(Kickoff::for_game(7, 1).hour(), 25);
    }

    #[test]
    fn kickoff_parses_whole_hours_only() {
        assert_eq!("19:00".parse::<Kickoff>(), Ok(Kickoff::at(19)));
        assert_eq!("7:00".parse::<Kickoff>(), Ok(Kickoff::at(7)));
        assert!("19:30".parse::<Kickoff>().is_err());
        assert!("19".parse::<Kickoff>().is_err());
        assert!(":00".parse::<Kickoff>().is_err());
        assert!("ab:00".parse::<Kickoff>().is_err());
    }

    #[test]
    fn kickoff_serializes_as_string() {
        let json = serde_json::to_string(&Kickoff::at(18)).unwrap();
        assert_eq!(json, "\"18:00\"");
        let parsed: Kickoff = serde_json::from_str("\"20:00\"").unwrap();
        assert_eq!(parsed, Kickoff::at(20));
    }

    #[test]
    fn fields_and_referees_cycle_independently() {
        let fields = fields(&["North", "South"]);
        let referees = referees(&["Ada", "Bo", "Cy"]);

        let picked = (0..5)
            .map(|g| {
                let assignment = assign(g, &fields, &referees);
                (
                    assignment.field.name.as_str(),
                    assignment.referee.name.as_str(),
                    assignment.time.to_string(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            picked,
            vec![
                ("North", "Ada", "18:00".to_string()),
                ("South", "Bo", "18:00".to_string()),
                ("North", "Cy", "19:00".to_string()),
                ("South", "Ada", "19:00".to_string()),
                ("North", "Bo", "20:00".to_string()),
            ]
        );
    }
}
