//! Player profile: the single durable record everything operates on.
//!
//! A profile is owned by one logical caller at a time. Facade operations
//! take a snapshot and return a new one; the caller must persist the
//! returned snapshot before issuing the next operation against the same
//! profile, otherwise stale writers silently lose updates (there is no
//! version check).

mod stats;

pub use stats::Stats;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::Tier;
use crate::catalog::{Catalog, Rarity};

/// Per-achievement progress stored on the profile.
///
/// `unlocked_tiers` is monotonic: a tier unlocks at most once and is never
/// revoked. `current_value` is a display convenience recomputed on every
/// evaluation, never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub id: String,
    #[serde(default)]
    pub unlocked_tiers: BTreeSet<Tier>,
    #[serde(default)]
    pub current_value: u64,
}

impl AchievementProgress {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            unlocked_tiers: BTreeSet::new(),
            current_value: 0,
        }
    }
}

/// One of up to five daily-rotating purchasable collectibles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSlot {
    pub collectible_id: String,
    pub rarity: Rarity,
    pub last_refresh_date: NaiveDate,
}

/// Durable player record.
///
/// Created at account creation, mutated only through facade operations,
/// removed from the store on account deletion. Serialized field names
/// match the legacy persisted schema (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub owned_collectible_ids: BTreeSet<String>,
    #[serde(default)]
    pub owned_avatar_ids: BTreeSet<String>,
    #[serde(default)]
    pub owned_theme_ids: BTreeSet<String>,
    /// Persisted as a list of progress records, keyed by id in memory.
    #[serde(default, with = "achievement_list")]
    pub achievements: BTreeMap<String, AchievementProgress>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub shop_slots: Vec<ShopSlot>,
}

impl Profile {
    /// Fresh profile with a new identity and all-zero progress.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            stars: 0,
            owned_collectible_ids: BTreeSet::new(),
            owned_avatar_ids: BTreeSet::new(),
            owned_theme_ids: BTreeSet::new(),
            achievements: BTreeMap::new(),
            stats: Stats::default(),
            shop_slots: Vec::new(),
        }
    }

    pub fn owns_collectible(&self, id: &str) -> bool {
        self.owned_collectible_ids.contains(id)
    }

    /// Recompute the collection counters from the canonical owned sets.
    ///
    /// The counters also exist as event-driven mirrors in [`Stats`]; this
    /// overwrite keeps them from drifting when a caller forgets to emit
    /// the matching event.
    pub(crate) fn sync_derived_counts(&mut self, catalog: &Catalog) {
        self.stats.total_cards = self.owned_collectible_ids.len() as u32;
        self.stats.legendary_cards = self
            .owned_collectible_ids
            .iter()
            .filter(|id| {
                catalog
                    .get(id)
                    .is_some_and(|c| c.rarity == Rarity::Legendary)
            })
            .count() as u32;
        self.stats.avatars_owned = self.owned_avatar_ids.len() as u32;
        self.stats.themes_owned = self.owned_theme_ids.len() as u32;
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes the achievement map as the schema's list form.
mod achievement_list {
    use super::AchievementProgress;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, AchievementProgress>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<&AchievementProgress> = map.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, AchievementProgress>, D::Error> {
        let list = Vec::<AchievementProgress>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|p| (p.id.clone(), p)).collect())
    }
}
