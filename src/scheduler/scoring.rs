//! Fairness rules used by the pairer.
//!
//! Every rule is a pure count over the snapshot of matches generated so far. The
//! rank structs order their fields by priority, so their derived `Ord` is the
//! tie-break chain: lower ranks are picked first.

use std::cmp::Reverse;

use super::{resources::Kickoff, schedule::Match};

/// Number of matches in which `team` played at home.
pub fn home_count_of(team: &str, matches: &[Match]) -> usize {
    matches.iter().filter(|m| m.home_team == team).count()
}

/// Number of meetings between `a` and `b`, regardless of who hosted.
pub fn head_to_head_count(a: &str, b: &str, matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| {
            (m.home_team == a && m.away_team == b) || (m.home_team == b && m.away_team == a)
        })
        .count()
}

/// Number of matches kicking off at `slot` in which `team` played on either side.
pub fn conflict_count_at_slot(team: &str, slot: &Kickoff, matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| m.time == *slot && m.involves(team))
        .count()
}

/// Rank of a candidate for the home side of the next pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HomeRank {
    /// Fewer home games first.
    pub home_games: usize,
    /// Then fewer games already played at the upcoming kickoff.
    pub slot_conflicts: usize,
}

/// Rank of a candidate for the away side against an already chosen home team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AwayRank {
    /// Fewer previous meetings with the home team first.
    pub meetings: usize,
    /// Then more home games first, to even out home and away duty.
    pub home_games: Reverse<usize>,
}

/// Sort key for home candidates: fewest home games, then fewest matches at `slot`.
pub fn home_rank(team: &str, slot: &Kickoff, matches: &[Match]) -> HomeRank {
    HomeRank {
        home_games: home_count_of(team, matches),
        slot_conflicts: conflict_count_at_slot(team, slot, matches),
    }
}

/// Sort key for away candidates: fewest meetings with `home`, then most home games.
pub fn away_rank(candidate: &str, home: &str, matches: &[Match]) -> AwayRank {
    AwayRank {
        meetings: head_to_head_count(candidate, home, matches),
        home_games: Reverse(home_count_of(candidate, matches)),
    }
}
