use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::resources::Kickoff;

/// One fixture between two teams, with its resources resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// 1-based week number.
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub field: String,
    pub referee: String,
    pub time: Kickoff,
}

impl Match {
    /// Whether `team` plays this match on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

/// A team left without an opponent for a week because the roster is odd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bye {
    pub week: u32,
    pub team: String,
}

/// Entry of a week's programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fixture {
    Match(Match),
    Bye(Bye),
}

/// Everything happening in one week: matches in generation order, then the bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekFixtures {
    pub week: u32,
    pub fixtures: Vec<Fixture>,
}

impl WeekFixtures {
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.fixtures.iter().filter_map(|fixture| match fixture {
            Fixture::Match(m) => Some(m),
            Fixture::Bye(_) => None,
        })
    }

    pub fn bye(&self) -> Option<&Bye> {
        self.fixtures.iter().find_map(|fixture| match fixture {
            Fixture::Bye(bye) => Some(bye),
            Fixture::Match(_) => None,
        })
    }
}

/// Generated schedule. Matches are kept in generation order (week-major).
///
/// A schedule is only ever produced whole by [`super::generate`]; every accessor is
/// a read-only projection over the match list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    matches: Vec<Match>,
    byes: Vec<Bye>,
}

impl Schedule {
    pub(super) fn push_match(&mut self, fixture: Match) {
        self.matches.push(fixture);
    }

    pub(super) fn push_bye(&mut self, bye: Bye) {
        self.byes.push(bye);
    }

    /// Flat match list in generation order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Every bye handed out, in week order.
    pub fn byes(&self) -> &[Bye] {
        &self.byes
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches played in `week`, in generation order.
    pub fn matches_for_week(&self, week: u32) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.week == week).collect()
    }

    /// The team sitting out `week`, if the roster is odd.
    pub fn bye_for_week(&self, week: u32) -> Option<&Bye> {
        self.byes.iter().find(|bye| bye.week == week)
    }

    /// Distinct week numbers that have at least one match, ascending.
    pub fn week_numbers(&self) -> Vec<u32> {
        self.matches
            .iter()
            .map(|m| m.week)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Group matches and byes by week, ascending.
    pub fn weeks(&self) -> Vec<WeekFixtures> {
        let mut grouped: BTreeMap<u32, Vec<Fixture>> = BTreeMap::new();
        for m in &self.matches {
            grouped
                .entry(m.week)
                .or_default()
                .push(Fixture::Match(m.clone()));
        }
        for bye in &self.byes {
            grouped
                .entry(bye.week)
                .or_default()
                .push(Fixture::Bye(bye.clone()));
        }

        grouped
            .into_iter()
            .map(|(week, fixtures)| WeekFixtures { week, fixtures })
            .collect()
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(week: u32, home: &str, away: &str) -> Match {
        Match {
            week,
            home_team: home.into(),
            away_team: away.into(),
            field: "Main".into(),
            referee: "Ref".into(),
            time: Kickoff::at(18),
        }
    }

    fn sample() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.push_match(fixture(1, "A", "B"));
        schedule.push_bye(Bye {
            week: 1,
            team: "C".into(),
        });
        schedule.push_match(fixture(2, "C", "A"));
        schedule.push_bye(Bye {
            week: 2,
            team: "B".into(),
        });
        schedule.push_match(fixture(3, "B", "C"));
        schedule
    }

    #[test]
    fn matches_for_week_filters_in_generation_order() {
        let schedule = sample();
        let week_two = schedule.matches_for_week(2);
        assert_eq!(week_two.len(), 1);
        assert_eq!(week_two[0].home_team, "C");
        assert!(schedule.matches_for_week(4).is_empty());
    }

    #[test]
    fn week_numbers_are_distinct_and_sorted() {
        assert_eq!(sample().week_numbers(), vec![1, 2, 3]);
        assert!(Schedule::default().week_numbers().is_empty());
    }

    #[test]
    fn weeks_put_byes_after_matches() {
        let weeks = sample().weeks();
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].week, 1);
        assert!(matches!(weeks[0].fixtures[0], Fixture::Match(_)));
        assert_eq!(weeks[0].bye().map(|bye| bye.team.as_str()), Some("C"));
        assert_eq!(weeks[2].bye(), None);
        assert_eq!(weeks[2].matches().count(), 1);
    }

    #[test]
    fn fixture_serializes_with_kind_tag() {
        let json = serde_json::to_value(Fixture::Match(fixture(1, "A", "B"))).unwrap();
        assert_eq!(json["kind"], "match");
        assert_eq!(json["homeTeam"], "A");
        assert_eq!(json["time"], "18:00");

        let json = serde_json::to_value(Fixture::Bye(Bye {
            week: 1,
            team: "C".into(),
        }))
        .unwrap();
        assert_eq!(json["kind"], "bye");
        assert_eq!(json["team"], "C");
    }
}
