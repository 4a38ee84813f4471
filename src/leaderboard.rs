//! Leaderboard
//!
//! In-memory top 10 across all modes, sorted descending by score. Ties keep
//! insertion order: a new entry lands after existing entries with equal score.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_SIZE;
use crate::sim::GameMode;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub mode: GameMode,
}

/// Top-10 leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve (1-indexed, None if it wouldn't place)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        (pos < LEADERBOARD_SIZE).then_some(pos + 1)
    }

    /// Insert an entry, re-sort and truncate.
    /// Returns the rank achieved (1-indexed) or None if it didn't place.
    pub fn add_entry(&mut self, name: &str, score: u64, mode: GameMode) -> Option<usize> {
        let rank = self.potential_rank(score)?;

        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                name: name.to_string(),
                score,
                mode,
            },
        );
        self.entries.truncate(LEADERBOARD_SIZE);

        log::info!("Leaderboard: {} placed #{} with {} ({:?})", name, rank, score, mode);
        Some(rank)
    }

    /// Ordered entries, optionally only those for one mode
    pub fn list_top(&self, mode: Option<GameMode>) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| mode.is_none_or(|m| e.mode == m))
            .collect()
    }

    /// Best score recorded for a mode (0 if none)
    pub fn best_for_mode(&self, mode: GameMode) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.mode == mode)
            .map(|e| e.score)
            .max()
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_returns_rank() {
        let mut lb = Leaderboard::new();
        assert_eq!(lb.add_entry("a", 100, GameMode::Collect), Some(1));
        assert_eq!(lb.add_entry("b", 300, GameMode::Asteroids), Some(1));
        assert_eq!(lb.add_entry("c", 200, GameMode::Climbing), Some(2));
        let scores: Vec<u64> = lb.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(lb.top_score(), Some(300));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut lb = Leaderboard::new();
        lb.add_entry("first", 50, GameMode::Collect);
        assert_eq!(lb.add_entry("second", 50, GameMode::Collect), Some(2));
        assert_eq!(lb.entries()[0].name, "first");
    }

    #[test]
    fn test_full_board_rejects_low_score() {
        let mut lb = Leaderboard::new();
        for i in 0..10 {
            lb.add_entry("p", 100 + i, GameMode::Asteroids);
        }
        assert_eq!(lb.add_entry("low", 100, GameMode::Asteroids), None);
        assert_eq!(lb.len(), 10);
        assert!(lb.entries().iter().all(|e| e.name != "low"));
        assert_eq!(lb.add_entry("high", 1000, GameMode::Asteroids), Some(1));
        assert_eq!(lb.len(), 10);
        assert_eq!(lb.entries().last().map(|e| e.score), Some(101));
    }

    #[test]
    fn test_filter_and_best_by_mode() {
        let mut lb = Leaderboard::new();
        lb.add_entry("a", 10, GameMode::Collect);
        lb.add_entry("b", 40, GameMode::Climbing);
        lb.add_entry("c", 30, GameMode::Collect);
        let collect = lb.list_top(Some(GameMode::Collect));
        assert_eq!(collect.len(), 2);
        assert_eq!(collect[0].score, 30);
        assert_eq!(lb.list_top(None).len(), 3);
        assert_eq!(lb.best_for_mode(GameMode::Climbing), 40);
        assert_eq!(lb.best_for_mode(GameMode::Asteroids), 0);
    }

    proptest! {
        #[test]
        fn prop_sorted_and_capped(scores in proptest::collection::vec(0u64..1000, 0..40)) {
            let mut lb = Leaderboard::new();
            for (i, s) in scores.iter().enumerate() {
                lb.add_entry(&format!("p{}", i), *s, GameMode::Collect);
            }
            prop_assert!(lb.len() <= LEADERBOARD_SIZE);
            prop_assert!(lb.entries().windows(2).all(|w| w[0].score >= w[1].score));

            // The board holds exactly the best scores seen
            let mut sorted = scores.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            sorted.truncate(LEADERBOARD_SIZE);
            let kept: Vec<u64> = lb.entries().iter().map(|e| e.score).collect();
            prop_assert_eq!(kept, sorted);
        }
    }
}
