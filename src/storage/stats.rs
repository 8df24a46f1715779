//! User statistics: XP, daily streak, activity heatmap, rank.
//!
//! Transitions are pure functions of `(stats, outcome, today)` so they can
//! be tested without touching the clock or the filesystem; the thin
//! `update_stats` / `check_for_rank_up` wrappers do the load-modify-save.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{progress, store};

pub const STATS_FILE: &str = "user_stats.json";

const XP_CORRECT: u64 = 10;
// Partial credit: attempting at all earns something.
const XP_INCORRECT: u64 = 5;

/// Rank-up is earned every 10 completed subtopics.
const SUBTOPICS_PER_RANK: usize = 10;

/// The fixed rank ladder, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Artisan,
    Peasant,
    Ronin,
    Samurai,
    Daimyo,
    Shogun,
    Emperor,
    Demigod,
    Engineer,
}

impl Rank {
    pub const LADDER: [Rank; 9] = [
        Rank::Artisan,
        Rank::Peasant,
        Rank::Ronin,
        Rank::Samurai,
        Rank::Daimyo,
        Rank::Shogun,
        Rank::Emperor,
        Rank::Demigod,
        Rank::Engineer,
    ];

    /// The next rank up, or `None` at the top of the ladder.
    pub fn next(self) -> Option<Rank> {
        let pos = Self::LADDER.iter().position(|r| *r == self)?;
        Self::LADDER.get(pos + 1).copied()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Artisan => "Artisan",
            Rank::Peasant => "Peasant",
            Rank::Ronin => "Ronin",
            Rank::Samurai => "Samurai",
            Rank::Daimyo => "Daimyo",
            Rank::Shogun => "Shogun",
            Rank::Emperor => "Emperor",
            Rank::Demigod => "Demigod",
            Rank::Engineer => "Engineer",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub username: String,
    pub xp: u64,
    pub rank: Rank,
    pub daily_streak: u32,
    pub last_active_date: NaiveDate,
    pub heatmap_data: BTreeMap<NaiveDate, u32>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            username: "GURU".to_string(),
            xp: 0,
            rank: Rank::Artisan,
            daily_streak: 0,
            last_active_date: Local::now().date_naive(),
            heatmap_data: BTreeMap::new(),
        }
    }
}

impl UserStats {
    /// Apply one graded attempt dated `today`.
    pub fn record_attempt(&mut self, is_correct: bool, today: NaiveDate) {
        self.xp += if is_correct { XP_CORRECT } else { XP_INCORRECT };

        *self.heatmap_data.entry(today).or_insert(0) += 1;

        let gap = (today - self.last_active_date).num_days();
        if gap == 1 {
            // Consecutive day
            self.daily_streak += 1;
        } else if gap > 1 {
            // Streak broken; today counts as day 1 of a new streak.
            self.daily_streak = 1;
        }
        // Same day (or a clock that moved backwards) leaves the streak alone.

        self.last_active_date = today;
    }
}

/// Promotion due at `total_practiced` completed subtopics, if any.
/// Positive multiples of ten promote one step; the top rank never moves.
fn rank_up_candidate(total_practiced: usize, current: Rank) -> Option<Rank> {
    if total_practiced > 0 && total_practiced % SUBTOPICS_PER_RANK == 0 {
        current.next()
    } else {
        None
    }
}

pub fn load_stats() -> Result<UserStats> {
    store::load_or_default(STATS_FILE)
}

pub fn save_stats(stats: &UserStats) -> Result<()> {
    store::save(STATS_FILE, stats)
}

/// Update XP, heatmap and streak after one graded attempt, and persist.
pub fn update_stats(is_correct: bool) -> Result<UserStats> {
    let mut stats = load_stats()?;
    stats.record_attempt(is_correct, Local::now().date_naive());
    save_stats(&stats)?;
    Ok(stats)
}

/// Promote the user if their completed-subtopic count has hit a rank-up
/// threshold. Returns the new rank when a promotion happened.
pub fn check_for_rank_up() -> Result<Option<Rank>> {
    let progress = progress::load_progress()?;
    let mut stats = load_stats()?;

    match rank_up_candidate(progress.total_subtopics_practiced, stats.rank) {
        Some(new_rank) => {
            stats.rank = new_rank;
            save_stats(&stats)?;
            Ok(Some(new_rank))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stats_on(day: NaiveDate) -> UserStats {
        UserStats {
            last_active_date: day,
            ..UserStats::default()
        }
    }

    #[test]
    fn correct_attempt_earns_more_xp_than_incorrect() {
        let day = date(2026, 8, 1);
        let mut stats = stats_on(day);
        stats.record_attempt(true, day);
        assert_eq!(stats.xp, 10);
        stats.record_attempt(false, day);
        assert_eq!(stats.xp, 15);
    }

    #[test]
    fn heatmap_counts_per_day() {
        let day = date(2026, 8, 1);
        let next = date(2026, 8, 2);
        let mut stats = stats_on(day);
        stats.record_attempt(true, day);
        stats.record_attempt(false, day);
        stats.record_attempt(true, next);
        assert_eq!(stats.heatmap_data[&day], 2);
        assert_eq!(stats.heatmap_data[&next], 1);
    }

    #[test]
    fn consecutive_days_grow_the_streak() {
        let mut stats = stats_on(date(2026, 8, 1));
        stats.daily_streak = 3;
        stats.record_attempt(true, date(2026, 8, 2));
        assert_eq!(stats.daily_streak, 4);
        stats.record_attempt(true, date(2026, 8, 3));
        assert_eq!(stats.daily_streak, 5);
    }

    #[test]
    fn gap_resets_streak_to_one() {
        let mut stats = stats_on(date(2026, 8, 1));
        stats.daily_streak = 7;
        stats.record_attempt(true, date(2026, 8, 4));
        assert_eq!(stats.daily_streak, 1);
        assert_eq!(stats.last_active_date, date(2026, 8, 4));
    }

    #[test]
    fn same_day_leaves_streak_unchanged() {
        let day = date(2026, 8, 1);
        let mut stats = stats_on(day);
        stats.daily_streak = 2;
        stats.record_attempt(true, day);
        stats.record_attempt(false, day);
        assert_eq!(stats.daily_streak, 2);
    }

    #[test]
    fn backwards_clock_is_treated_as_same_day() {
        let mut stats = stats_on(date(2026, 8, 5));
        stats.daily_streak = 2;
        stats.record_attempt(true, date(2026, 8, 3));
        assert_eq!(stats.daily_streak, 2);
    }

    #[test]
    fn rank_up_at_multiples_of_ten() {
        assert_eq!(rank_up_candidate(10, Rank::Artisan), Some(Rank::Peasant));
        assert_eq!(rank_up_candidate(20, Rank::Peasant), Some(Rank::Ronin));
        assert_eq!(rank_up_candidate(11, Rank::Peasant), None);
        assert_eq!(rank_up_candidate(0, Rank::Artisan), None);
    }

    #[test]
    fn top_rank_never_promotes() {
        assert_eq!(rank_up_candidate(90, Rank::Engineer), None);
        assert_eq!(Rank::Engineer.next(), None);
    }

    #[test]
    fn ladder_walks_every_rank() {
        let mut rank = Rank::Artisan;
        let mut seen = vec![rank];
        while let Some(next) = rank.next() {
            seen.push(next);
            rank = next;
        }
        assert_eq!(seen, Rank::LADDER);
    }
}
