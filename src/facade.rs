//! Facade: one consistent profile update per gameplay event.
//!
//! Every operation runs the same pipeline: fold the event into stats,
//! evaluate achievements, credit the aggregate reward through the ledger,
//! optionally run a gacha draw, resync the derived collection counters,
//! and hand back a new snapshot plus the notifications the UI should
//! show. Operations never throw for expected business conditions.

use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;

use crate::achievements::{self, AchievementConfig, Tier};
use crate::catalog::{Catalog, Collectible, Rarity};
use crate::error::{ConfigError, EconomyError};
use crate::events::{GameResult, ProgressEvent, TestResult};
use crate::gacha;
use crate::ledger;
use crate::profile::Profile;
use crate::shop;

/// Price of one gacha spin.
pub const GACHA_SPIN_COST: u32 = 50;
/// Partial refund when a spin draws an already-owned collectible.
pub const GACHA_DUPLICATE_REFUND: u32 = 10;

/// Side effect the UI should display after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    AchievementUnlocked {
        id: String,
        tier: Tier,
        reward_stars: u32,
    },
    CollectibleGranted {
        collectible: Collectible,
        is_new: bool,
    },
}

/// Process-wide static content: the collectible catalog and the
/// achievement configuration.
///
/// Built once at startup and shared behind an [`Arc`]; dropping the last
/// facade tears it down. There is no other lifecycle.
#[derive(Debug, Clone)]
pub struct EngineContext {
    catalog: Catalog,
    achievements: Vec<AchievementConfig>,
}

impl EngineContext {
    /// Build a context from explicit content, validating the achievement
    /// configuration.
    pub fn new(
        catalog: Catalog,
        achievement_configs: Vec<AchievementConfig>,
    ) -> Result<Self, ConfigError> {
        achievements::validate(&achievement_configs)?;
        Ok(Self {
            catalog,
            achievements: achievement_configs,
        })
    }

    /// Context over the built-in catalogs.
    pub fn with_defaults() -> Self {
        Self::new(Catalog::builtin().clone(), achievements::default_catalog())
            .expect("built-in content is valid")
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn achievement_configs(&self) -> &[AchievementConfig] {
        &self.achievements
    }
}

/// Orchestration entry point for all profile mutations.
pub struct ProgressionFacade {
    ctx: Arc<EngineContext>,
}

impl ProgressionFacade {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Record a finished test run.
    pub fn record_test_result(
        &self,
        profile: &Profile,
        result: TestResult,
    ) -> (Profile, Vec<Notification>) {
        let mut next = profile.clone();
        next.stats = next.stats.apply(&ProgressEvent::TestCompleted(result));
        self.settle(next)
    }

    /// Record a finished mini-game round and credit its star payout.
    pub fn record_game_result(
        &self,
        profile: &Profile,
        result: GameResult,
    ) -> (Profile, Vec<Notification>) {
        let mut next = ledger::credit(profile, result.stars_earned);
        next.stats = next.stats.apply(&ProgressEvent::GameCompleted(result));
        self.settle(next)
    }

    /// Record a typing-game score (tracked as a running maximum).
    pub fn record_typing_score(
        &self,
        profile: &Profile,
        score: u32,
    ) -> (Profile, Vec<Notification>) {
        let mut next = profile.clone();
        next.stats = next.stats.apply(&ProgressEvent::TypingScoreRecorded { score });
        self.settle(next)
    }

    /// Record one read fun-fact.
    pub fn record_fact_read(
        &self,
        profile: &Profile,
        category: &str,
    ) -> (Profile, Vec<Notification>) {
        let mut next = profile.clone();
        next.stats = next.stats.apply(&ProgressEvent::FactRead {
            category: category.to_string(),
        });
        self.settle(next)
    }

    /// Record one solved riddle.
    pub fn record_riddle_solved(
        &self,
        profile: &Profile,
        category: &str,
        difficulty: &str,
    ) -> (Profile, Vec<Notification>) {
        let mut next = profile.clone();
        next.stats = next.stats.apply(&ProgressEvent::RiddleSolved {
            category: category.to_string(),
            difficulty: difficulty.to_string(),
        });
        self.settle(next)
    }

    /// Buy an avatar. Rejects duplicates and unaffordable purchases
    /// without mutation.
    pub fn buy_avatar(
        &self,
        profile: &Profile,
        avatar_id: &str,
        price: u32,
    ) -> Result<(Profile, Vec<Notification>), EconomyError> {
        if profile.owned_avatar_ids.contains(avatar_id) {
            return Err(EconomyError::AlreadyOwned(avatar_id.to_string()));
        }
        let mut next = ledger::spend(profile, price)?;
        next.owned_avatar_ids.insert(avatar_id.to_string());
        next.stats = next.stats.apply(&ProgressEvent::StarsSpent { amount: price });
        next.stats = next.stats.apply(&ProgressEvent::AvatarBought);
        next.sync_derived_counts(self.ctx.catalog());
        Ok(self.settle(next))
    }

    /// Buy a theme. Same contract as [`ProgressionFacade::buy_avatar`].
    pub fn buy_theme(
        &self,
        profile: &Profile,
        theme_id: &str,
        price: u32,
    ) -> Result<(Profile, Vec<Notification>), EconomyError> {
        if profile.owned_theme_ids.contains(theme_id) {
            return Err(EconomyError::AlreadyOwned(theme_id.to_string()));
        }
        let mut next = ledger::spend(profile, price)?;
        next.owned_theme_ids.insert(theme_id.to_string());
        next.stats = next.stats.apply(&ProgressEvent::StarsSpent { amount: price });
        next.stats = next.stats.apply(&ProgressEvent::ThemeBought);
        next.sync_derived_counts(self.ctx.catalog());
        Ok(self.settle(next))
    }

    /// Buy a collectible out of the daily shop.
    pub fn buy_collectible(
        &self,
        profile: &Profile,
        collectible_id: &str,
        price: u32,
    ) -> Result<(Profile, Vec<Notification>), EconomyError> {
        let mut next = shop::purchase(profile, collectible_id, price)?;
        let is_legendary = self
            .ctx
            .catalog()
            .get(collectible_id)
            .is_some_and(|c| c.rarity == Rarity::Legendary);
        next.stats = next.stats.apply(&ProgressEvent::StarsSpent { amount: price });
        next.stats = next.stats.apply(&ProgressEvent::CollectibleGained {
            is_new: true,
            is_legendary,
        });
        next.sync_derived_counts(self.ctx.catalog());
        Ok(self.settle(next))
    }

    /// Spin the gacha: costs [`GACHA_SPIN_COST`] stars, refunds
    /// [`GACHA_DUPLICATE_REFUND`] on a duplicate draw.
    pub fn spin_gacha<R: Rng>(
        &self,
        profile: &Profile,
        rng: &mut R,
    ) -> Result<(Profile, Vec<Notification>), EconomyError> {
        let mut next = ledger::spend(profile, GACHA_SPIN_COST)?;
        let draw = gacha::draw(self.ctx.catalog(), &profile.owned_collectible_ids, rng)?;

        let net_cost = if draw.is_new {
            GACHA_SPIN_COST
        } else {
            next = ledger::credit(&next, GACHA_DUPLICATE_REFUND);
            GACHA_SPIN_COST - GACHA_DUPLICATE_REFUND
        };

        next.owned_collectible_ids.insert(draw.collectible.id.clone());
        next.stats = next.stats.apply(&ProgressEvent::StarsSpent { amount: net_cost });
        next.stats = next.stats.apply(&ProgressEvent::CollectibleGained {
            is_new: draw.is_new,
            is_legendary: draw.collectible.rarity == Rarity::Legendary,
        });
        next.sync_derived_counts(self.ctx.catalog());

        let (next, achievement_notes) = self.settle(next);
        let mut notifications = vec![Notification::CollectibleGranted {
            collectible: draw.collectible,
            is_new: draw.is_new,
        }];
        notifications.extend(achievement_notes);
        Ok((next, notifications))
    }

    /// Rotate the daily shop if it is stale. `None` means no change.
    pub fn refresh_shop<R: Rng>(
        &self,
        profile: &Profile,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<Profile> {
        shop::refresh_if_stale(profile, self.ctx.catalog(), today, rng)
    }

    /// Shared tail of every operation: evaluate achievements, credit the
    /// aggregate reward, and turn unlocks into notifications.
    fn settle(&self, profile: Profile) -> (Profile, Vec<Notification>) {
        let eval = achievements::evaluate(
            &profile,
            self.ctx.achievement_configs(),
            self.ctx.catalog(),
        );
        let mut next = profile;
        next.achievements = eval.achievements;
        if eval.total_reward > 0 {
            next = ledger::credit(&next, eval.total_reward);
            // Reward stars are earned stars, same as game payouts.
            next.stats.total_stars_earned += eval.total_reward;
        }

        let notifications = eval
            .unlocked
            .into_iter()
            .map(|u| Notification::AchievementUnlocked {
                id: u.id,
                tier: u.tier,
                reward_stars: u.reward_stars,
            })
            .collect();
        (next, notifications)
    }
}
