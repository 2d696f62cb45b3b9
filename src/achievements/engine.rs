//! Achievement evaluation.
//!
//! Compares live-recomputed values against the static tier ladders and
//! reports newly unlocked tiers with their aggregate star reward. The
//! sweep is idempotent: re-evaluating an unchanged profile unlocks
//! nothing.

use std::collections::BTreeMap;

use crate::achievements::config::{AchievementConfig, RuleKind, Tier};
use crate::catalog::Catalog;
use crate::profile::{AchievementProgress, Profile};

/// A tier that unlocked during one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierUnlock {
    pub id: String,
    pub tier: Tier,
    pub reward_stars: u32,
}

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Tiers unlocked by this pass, in config order.
    pub unlocked: Vec<TierUnlock>,
    /// Sum of the unlocked tiers' star rewards.
    pub total_reward: u32,
    /// Updated progress map to store back on the profile.
    pub achievements: BTreeMap<String, AchievementProgress>,
}

/// Evaluate every config against the profile.
///
/// Tiers are checked in ascending threshold order and never revoked; a
/// profile without a progress record for some achievement gets one with
/// an empty tier set before evaluation.
pub fn evaluate(
    profile: &Profile,
    configs: &[AchievementConfig],
    catalog: &Catalog,
) -> Evaluation {
    let mut achievements = profile.achievements.clone();
    let mut unlocked = Vec::new();
    let mut total_reward = 0u32;

    for config in configs {
        let value = resolve_value(&config.rule, profile, catalog);
        let progress = achievements
            .entry(config.id.clone())
            .or_insert_with(|| AchievementProgress::new(&config.id));
        progress.current_value = value;

        for spec in &config.tiers {
            if progress.unlocked_tiers.contains(&spec.tier) {
                continue;
            }
            if value >= spec.threshold {
                progress.unlocked_tiers.insert(spec.tier);
                total_reward += spec.reward_stars;
                tracing::debug!(
                    achievement = %config.id,
                    tier = spec.tier.as_str(),
                    reward = spec.reward_stars,
                    "achievement tier unlocked"
                );
                unlocked.push(TierUnlock {
                    id: config.id.clone(),
                    tier: spec.tier,
                    reward_stars: spec.reward_stars,
                });
            }
        }
    }

    Evaluation {
        unlocked,
        total_reward,
        achievements,
    }
}

/// Resolve the live value for one rule.
///
/// Derived kinds count the canonical owned sets instead of the stats
/// mirrors, so a forgotten stats event cannot make them drift.
fn resolve_value(rule: &RuleKind, profile: &Profile, catalog: &Catalog) -> u64 {
    let stats = &profile.stats;
    match rule {
        RuleKind::TotalTests => stats.total_tests as u64,
        RuleKind::TotalQuestions => stats.total_questions as u64,
        RuleKind::PerfectTests => stats.perfect_tests as u64,
        // The max streak: the current streak resets on a wrong answer and
        // progress must never regress.
        RuleKind::CorrectStreak => stats.max_correct_streak as u64,
        RuleKind::TotalGames => stats.total_games_played as u64,
        RuleKind::TotalStarsEarned => stats.total_stars_earned as u64,
        RuleKind::StarsSpent => stats.stars_spent as u64,
        RuleKind::RiddlesSolved => stats.riddles_solved as u64,
        RuleKind::FactsRead => stats.facts_read as u64,
        RuleKind::TypingScore => stats.max_typing_score as u64,

        RuleKind::TopicMastery { topic_id } => keyed(&stats.topic_correct_count, topic_id),
        RuleKind::GameWin {
            game_type,
            difficulty,
        } => {
            let key = match difficulty {
                Some(d) => format!("{game_type}_{d}"),
                None => game_type.clone(),
            };
            keyed(&stats.game_wins, &key)
        }
        RuleKind::GameScore { game_type } => keyed(&stats.game_high_scores, game_type),
        RuleKind::RiddlesSolvedCategory { category } => {
            keyed(&stats.riddles_solved_by_category, category)
        }
        RuleKind::RiddlesSolvedDifficulty { difficulty } => {
            keyed(&stats.riddles_solved_by_difficulty, difficulty)
        }
        RuleKind::FactsReadCategory { category } => {
            keyed(&stats.facts_read_by_category, category)
        }

        RuleKind::TotalCards => profile.owned_collectible_ids.len() as u64,
        RuleKind::RarityCount { rarity } => profile
            .owned_collectible_ids
            .iter()
            .filter(|id| catalog.get(id).is_some_and(|c| c.rarity == *rarity))
            .count() as u64,
        RuleKind::AvatarsOwned => profile.owned_avatar_ids.len() as u64,
        RuleKind::ThemesOwned => profile.owned_theme_ids.len() as u64,
    }
}

fn keyed(map: &std::collections::BTreeMap<String, u32>, key: &str) -> u64 {
    map.get(key).copied().unwrap_or(0) as u64
}
