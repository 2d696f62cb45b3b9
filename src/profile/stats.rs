//! Cumulative gameplay statistics and the event fold that updates them.
//!
//! `Stats` is a flat record of counters. Every counter is monotonic
//! non-decreasing except `current_correct_streak`, which resets to 0 on a
//! wrong answer. The fold is a pure functional update: it never mutates
//! the input record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::events::ProgressEvent;

/// Flat record of cumulative counters, persisted with the profile.
///
/// Legacy blobs may miss any of these fields; serde defaults backfill
/// them with zero values (see [`crate::store`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    // Tests
    pub total_tests: u32,
    pub total_questions: u32,
    pub perfect_tests: u32,
    pub current_correct_streak: u32,
    pub max_correct_streak: u32,
    pub topic_correct_count: BTreeMap<String, u32>,

    // Games
    pub total_games_played: u32,
    pub game_wins: BTreeMap<String, u32>,
    pub game_high_scores: BTreeMap<String, u32>,
    pub max_typing_score: u32,

    // Economy
    pub total_stars_earned: u32,
    pub stars_spent: u32,

    // Collection (mirrors of the canonical owned sets; the achievement
    // engine recomputes these from the sets and never trusts them)
    pub total_cards: u32,
    pub legendary_cards: u32,
    pub avatars_owned: u32,
    pub themes_owned: u32,

    // Learning extras
    pub riddles_solved: u32,
    pub riddles_solved_by_category: BTreeMap<String, u32>,
    pub riddles_solved_by_difficulty: BTreeMap<String, u32>,
    pub facts_read: u32,
    pub facts_read_by_category: BTreeMap<String, u32>,
}

impl Stats {
    /// Fold one gameplay event into a new stats record.
    pub fn apply(&self, event: &ProgressEvent) -> Stats {
        let mut next = self.clone();
        match event {
            ProgressEvent::TestCompleted(result) => {
                next.total_tests += 1;
                next.total_questions += result.total_questions;

                // The running streak seeds from the persisted value: a
                // perfect run spanning several tests keeps building.
                let mut streak = next.current_correct_streak;
                let mut best = next.max_correct_streak;
                for &correct in &result.correctness {
                    if correct {
                        streak += 1;
                        best = best.max(streak);
                    } else {
                        streak = 0;
                    }
                }
                next.current_correct_streak = streak;
                next.max_correct_streak = best;

                if result.is_perfect() {
                    next.perfect_tests += 1;
                }
                if let Some(topic) = &result.topic_id {
                    let correct = result.score();
                    if correct > 0 {
                        *next.topic_correct_count.entry(topic.clone()).or_default() += correct;
                    }
                }
            }
            ProgressEvent::GameCompleted(result) => {
                next.total_games_played += 1;
                next.total_stars_earned += result.stars_earned;
                if result.won {
                    *next.game_wins.entry(result.game_type.clone()).or_default() += 1;
                    if let Some(key) = result.compound_key() {
                        *next.game_wins.entry(key).or_default() += 1;
                    }
                }
                bump_high_score(&mut next.game_high_scores, &result.game_type, result.score);
                if let Some(key) = result.compound_key() {
                    bump_high_score(&mut next.game_high_scores, &key, result.score);
                }
            }
            ProgressEvent::StarsSpent { amount } => {
                next.stars_spent += amount;
            }
            ProgressEvent::CollectibleGained { is_new, is_legendary } => {
                if *is_new {
                    next.total_cards += 1;
                    if *is_legendary {
                        next.legendary_cards += 1;
                    }
                }
            }
            ProgressEvent::AvatarBought => {
                next.avatars_owned += 1;
            }
            ProgressEvent::ThemeBought => {
                next.themes_owned += 1;
            }
            ProgressEvent::FactRead { category } => {
                next.facts_read += 1;
                *next.facts_read_by_category.entry(category.clone()).or_default() += 1;
            }
            ProgressEvent::RiddleSolved { category, difficulty } => {
                next.riddles_solved += 1;
                *next
                    .riddles_solved_by_category
                    .entry(category.clone())
                    .or_default() += 1;
                *next
                    .riddles_solved_by_difficulty
                    .entry(difficulty.clone())
                    .or_default() += 1;
            }
            ProgressEvent::TypingScoreRecorded { score } => {
                next.max_typing_score = next.max_typing_score.max(*score);
            }
        }
        next
    }
}

fn bump_high_score(scores: &mut BTreeMap<String, u32>, key: &str, score: u32) {
    let entry = scores.entry(key.to_string()).or_default();
    *entry = (*entry).max(score);
}
