//! Gameplay events fed into the stats aggregator.
//!
//! Game and test screens build these payloads; the facade folds them into
//! the profile's [`Stats`](crate::profile::Stats) record.

use serde::{Deserialize, Serialize};

/// Outcome of one completed test (a run of questions on a topic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub total_questions: u32,
    /// Per-question correctness in answer order.
    pub correctness: Vec<bool>,
    /// Topic the test was drawn from, when the test targets a single topic.
    #[serde(default)]
    pub topic_id: Option<String>,
    pub duration_seconds: u32,
}

impl TestResult {
    /// Number of correctly answered questions.
    pub fn score(&self) -> u32 {
        self.correctness.iter().filter(|&&ok| ok).count() as u32
    }

    /// A perfect run answers every question correctly.
    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.score() == self.total_questions
    }
}

/// Outcome of one completed mini-game round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_type: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub score: u32,
    /// Stars the game screen awarded for this round.
    pub stars_earned: u32,
    pub won: bool,
}

impl GameResult {
    /// Compound stats key, e.g. `"memory_hard"`. `None` without a difficulty.
    pub fn compound_key(&self) -> Option<String> {
        self.difficulty
            .as_ref()
            .map(|d| format!("{}_{}", self.game_type, d))
    }
}

/// A discrete gameplay event folded into the cumulative stats record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    TestCompleted(TestResult),
    GameCompleted(GameResult),
    #[serde(rename_all = "camelCase")]
    StarsSpent { amount: u32 },
    #[serde(rename_all = "camelCase")]
    CollectibleGained { is_new: bool, is_legendary: bool },
    AvatarBought,
    ThemeBought,
    FactRead { category: String },
    RiddleSolved { category: String, difficulty: String },
    TypingScoreRecorded { score: u32 },
}
