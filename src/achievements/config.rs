//! Achievement configuration: rule kinds, tiers, loading, and the
//! built-in catalog.
//!
//! Configs are loaded once at process start (YAML resource or the
//! built-in set) and are immutable afterwards. Each achievement carries
//! an ordered bronze/silver/gold tier ladder; each tier pays its star
//! reward exactly once.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Rarity;
use crate::error::ConfigError;

/// Reward level within a single achievement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            _ => None,
        }
    }
}

/// One step of an achievement's tier ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSpec {
    pub tier: Tier,
    pub threshold: u64,
    pub reward_stars: u32,
}

/// The closed set of achievement rule kinds.
///
/// Counter kinds read one stats counter. Keyed kinds read one entry of a
/// per-key stats map (0 when absent). Derived kinds are recomputed fresh
/// from the canonical owned sets so a forgotten stats event cannot make
/// them drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    // Counter kinds
    TotalTests,
    TotalQuestions,
    PerfectTests,
    CorrectStreak,
    TotalGames,
    TotalStarsEarned,
    StarsSpent,
    RiddlesSolved,
    FactsRead,
    TypingScore,

    // Keyed kinds
    #[serde(rename_all = "camelCase")]
    TopicMastery { topic_id: String },
    #[serde(rename_all = "camelCase")]
    GameWin {
        game_type: String,
        #[serde(default)]
        difficulty: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    GameScore { game_type: String },
    RiddlesSolvedCategory { category: String },
    RiddlesSolvedDifficulty { difficulty: String },
    FactsReadCategory { category: String },

    // Derived kinds (recomputed from canonical sets)
    TotalCards,
    RarityCount { rarity: Rarity },
    AvatarsOwned,
    ThemesOwned,
}

/// Static definition of one achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementConfig {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(flatten)]
    pub rule: RuleKind,
    pub tiers: Vec<TierSpec>,
}

/// Parse an achievement catalog from YAML content.
pub fn load_from_yaml(content: &str) -> Result<Vec<AchievementConfig>, ConfigError> {
    let configs: Vec<AchievementConfig> = serde_yaml::from_str(content)?;
    validate(&configs)?;
    Ok(configs)
}

/// Load an achievement catalog from a YAML file.
pub fn load_from_path(path: &Path) -> Result<Vec<AchievementConfig>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_from_yaml(&content)
}

/// Validate a catalog: unique ids, non-empty ladders, each ladder in
/// strictly ascending threshold order with no repeated tier.
pub fn validate(configs: &[AchievementConfig]) -> Result<(), ConfigError> {
    let mut seen = std::collections::BTreeSet::new();
    for config in configs {
        if !seen.insert(config.id.as_str()) {
            return Err(ConfigError::DuplicateAchievement(config.id.clone()));
        }
        if config.tiers.is_empty() {
            return Err(ConfigError::EmptyTiers(config.id.clone()));
        }
        for pair in config.tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(ConfigError::UnsortedTiers(config.id.clone()));
            }
        }
        let mut tiers = std::collections::BTreeSet::new();
        for spec in &config.tiers {
            if !tiers.insert(spec.tier) {
                return Err(ConfigError::DuplicateTier(config.id.clone()));
            }
        }
    }
    Ok(())
}

fn cfg(
    id: &str,
    name: &str,
    icon: &str,
    rule: RuleKind,
    ladder: [(Tier, u64, u32); 3],
) -> AchievementConfig {
    AchievementConfig {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        rule,
        tiers: ladder
            .into_iter()
            .map(|(tier, threshold, reward_stars)| TierSpec {
                tier,
                threshold,
                reward_stars,
            })
            .collect(),
    }
}

use Tier::{Bronze, Gold, Silver};

/// The built-in achievement catalog shipped with the app.
pub fn default_catalog() -> Vec<AchievementConfig> {
    vec![
        // === TESTS ===
        cfg(
            "test_rookie",
            "Test Rookie",
            "🎯",
            RuleKind::TotalTests,
            [(Bronze, 1, 1), (Silver, 10, 3), (Gold, 50, 5)],
        ),
        cfg(
            "question_hunter",
            "Question Hunter",
            "❓",
            RuleKind::TotalQuestions,
            [(Bronze, 50, 2), (Silver, 250, 5), (Gold, 1000, 10)],
        ),
        cfg(
            "perfectionist",
            "Perfectionist",
            "💯",
            RuleKind::PerfectTests,
            [(Bronze, 1, 2), (Silver, 10, 5), (Gold, 25, 10)],
        ),
        cfg(
            "on_a_roll",
            "On a Roll",
            "🔥",
            RuleKind::CorrectStreak,
            [(Bronze, 5, 2), (Silver, 15, 5), (Gold, 40, 12)],
        ),
        cfg(
            "plus_master",
            "Plus Master",
            "➕",
            RuleKind::TopicMastery {
                topic_id: "addition".to_string(),
            },
            [(Bronze, 20, 2), (Silver, 100, 5), (Gold, 300, 10)],
        ),
        cfg(
            "times_tamer",
            "Times Tamer",
            "✖️",
            RuleKind::TopicMastery {
                topic_id: "multiplication".to_string(),
            },
            [(Bronze, 20, 2), (Silver, 100, 5), (Gold, 300, 10)],
        ),
        // === GAMES ===
        cfg(
            "game_explorer",
            "Game Explorer",
            "🎮",
            RuleKind::TotalGames,
            [(Bronze, 5, 1), (Silver, 25, 3), (Gold, 100, 8)],
        ),
        cfg(
            "memory_champ",
            "Memory Champ",
            "🧠",
            RuleKind::GameWin {
                game_type: "memory".to_string(),
                difficulty: None,
            },
            [(Bronze, 3, 2), (Silver, 15, 4), (Gold, 50, 8)],
        ),
        cfg(
            "memory_expert",
            "Memory Expert",
            "🏆",
            RuleKind::GameWin {
                game_type: "memory".to_string(),
                difficulty: Some("hard".to_string()),
            },
            [(Bronze, 1, 3), (Silver, 10, 6), (Gold, 30, 12)],
        ),
        cfg(
            "number_cruncher",
            "Number Cruncher",
            "🔢",
            RuleKind::GameScore {
                game_type: "mental_math".to_string(),
            },
            [(Bronze, 20, 2), (Silver, 50, 4), (Gold, 120, 10)],
        ),
        cfg(
            "swift_fingers",
            "Swift Fingers",
            "⌨️",
            RuleKind::TypingScore,
            [(Bronze, 50, 2), (Silver, 120, 4), (Gold, 250, 8)],
        ),
        // === ECONOMY ===
        cfg(
            "star_gatherer",
            "Star Gatherer",
            "⭐",
            RuleKind::TotalStarsEarned,
            [(Bronze, 25, 2), (Silver, 150, 5), (Gold, 500, 12)],
        ),
        cfg(
            "big_spender",
            "Big Spender",
            "🛍️",
            RuleKind::StarsSpent,
            [(Bronze, 50, 2), (Silver, 250, 5), (Gold, 1000, 12)],
        ),
        // === COLLECTION ===
        cfg(
            "card_collector",
            "Card Collector",
            "🃏",
            RuleKind::TotalCards,
            [(Bronze, 5, 2), (Silver, 15, 5), (Gold, 30, 15)],
        ),
        cfg(
            "legend_seeker",
            "Legend Seeker",
            "🐉",
            RuleKind::RarityCount {
                rarity: Rarity::Legendary,
            },
            [(Bronze, 1, 5), (Silver, 2, 10), (Gold, 3, 20)],
        ),
        cfg(
            "dress_up",
            "Dress Up",
            "🪞",
            RuleKind::AvatarsOwned,
            [(Bronze, 1, 1), (Silver, 4, 3), (Gold, 8, 6)],
        ),
        cfg(
            "decorator",
            "Decorator",
            "🎨",
            RuleKind::ThemesOwned,
            [(Bronze, 1, 1), (Silver, 3, 3), (Gold, 6, 6)],
        ),
        // === RIDDLES & FACTS ===
        cfg(
            "riddle_solver",
            "Riddle Solver",
            "🧩",
            RuleKind::RiddlesSolved,
            [(Bronze, 3, 1), (Silver, 15, 3), (Gold, 50, 8)],
        ),
        cfg(
            "logic_lover",
            "Logic Lover",
            "💡",
            RuleKind::RiddlesSolvedCategory {
                category: "logic".to_string(),
            },
            [(Bronze, 3, 1), (Silver, 10, 3), (Gold, 25, 6)],
        ),
        cfg(
            "brave_thinker",
            "Brave Thinker",
            "🦁",
            RuleKind::RiddlesSolvedDifficulty {
                difficulty: "hard".to_string(),
            },
            [(Bronze, 1, 2), (Silver, 5, 4), (Gold, 15, 8)],
        ),
        cfg(
            "curious_mind",
            "Curious Mind",
            "📚",
            RuleKind::FactsRead,
            [(Bronze, 5, 1), (Silver, 25, 3), (Gold, 100, 8)],
        ),
        cfg(
            "space_cadet",
            "Space Cadet",
            "🚀",
            RuleKind::FactsReadCategory {
                category: "space".to_string(),
            },
            [(Bronze, 3, 1), (Silver, 10, 3), (Gold, 30, 6)],
        ),
    ]
}
