//! Greedy per-week pairing.
//!
//! The pool is re-sorted in place before every pick, so ties keep whatever order
//! the previous sort left behind. Nothing is ever undone: a pair, once emitted,
//! stays for the week.

use super::{
    resources::Kickoff,
    roster::Team,
    schedule::Match,
    scoring::{away_rank, home_rank},
};

/// Home and away sides chosen for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing<'a> {
    pub home: &'a Team,
    pub away: &'a Team,
}

/// Teams still unpaired in the week being built.
#[derive(Debug, Clone)]
pub struct WeekPool<'a> {
    pool: Vec<&'a Team>,
}

impl<'a> WeekPool<'a> {
    /// Start a week with every team of the roster available, in roster order.
    pub fn new(teams: &'a [Team]) -> Self {
        Self {
            pool: teams.iter().collect(),
        }
    }

    /// Teams not yet paired this week.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Pick the next pair, or `None` once fewer than two teams are left.
    ///
    /// `history` is every match generated so far, all weeks included, and `slot` is
    /// the kickoff the resulting match will be given.
    pub fn next_pair(&mut self, history: &[Match], slot: &Kickoff) -> Option<Pairing<'a>> {
        if self.pool.len() < 2 {
            return None;
        }

        self.pool
            .sort_by_cached_key(|team| home_rank(&team.name, slot, history));
        let home = self.pool.remove(0);

        self.pool
            .sort_by_cached_key(|team| away_rank(&team.name, &home.name, history));
        let away = self.pool.remove(0);

        debug_assert_ne!(home.name, away.name, "a team cannot meet itself");
        Some(Pairing { home, away })
    }

    /// Close the week, returning the team left without an opponent, if any.
    pub fn into_bye(self) -> Option<&'a Team> {
        debug_assert!(self.pool.len() < 2, "week closed with unpaired teams");
        self.pool.into_iter().next()
    }
}
